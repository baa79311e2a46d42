//! Shared constants for end-to-end tests
//!
//! When the demo dataset changes (handles, track order, passwords),
//! update only this file.
#![allow(dead_code)]

// ============================================================================
// Demo Accounts
// ============================================================================

pub const ADMIN: &str = "admin";
pub const ADMIN_PASS: &str = "admin123";

pub const JUAN: &str = "juan";
pub const MARIA: &str = "maria";
pub const CARLOS: &str = "carlos";
pub const ANA: &str = "ana";
pub const DEMO_PASS: &str = "password123";

// ============================================================================
// Demo Track Ids (assigned in seeding order on an empty store)
// ============================================================================

pub const BOHEMIAN_RHAPSODY_ID: u64 = 1;
pub const ANOTHER_ONE_BITES_THE_DUST_ID: u64 = 2;
pub const WE_WILL_ROCK_YOU_ID: u64 = 3;
pub const BILLIE_JEAN_ID: u64 = 4;
pub const THRILLER_ID: u64 = 5;
pub const BEAT_IT_ID: u64 = 6;
pub const HOTEL_CALIFORNIA_ID: u64 = 7;
pub const STAIRWAY_TO_HEAVEN_ID: u64 = 9;
pub const SMELLS_LIKE_TEEN_SPIRIT_ID: u64 = 10;
pub const LIKE_A_ROLLING_STONE_ID: u64 = 12;
pub const PURPLE_RAIN_ID: u64 = 14;
pub const SUPERSTITION_ID: u64 = 15;
pub const GIMME_SHELTER_ID: u64 = 16;
pub const PAINT_IT_BLACK_ID: u64 = 19;

pub const DEMO_TRACK_COUNT: usize = 20;

// ============================================================================
// Default Audio
// ============================================================================

pub const DEFAULT_AUDIO: [&str; 3] = [
    "/audio/syncup_intro.wav",
    "/audio/syncup_groove.wav",
    "/audio/syncup_chill.wav",
];
