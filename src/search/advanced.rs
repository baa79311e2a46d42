//! Multi-criteria track search.
//!
//! Each criterion of a [`SearchRequest`] becomes an independent lookup
//! against the catalog store. The lookups run concurrently on the rayon pool
//! and are all joined before their results are combined:
//!
//! - [`SearchOperator::And`] keeps the tracks present in every criterion's
//!   results, in the order of the first criterion.
//! - [`SearchOperator::Or`] keeps every track found by any criterion, in
//!   first-seen order, without duplicates.
//!
//! A failing lookup is never turned into an empty list. The search returns
//! [`SearchError::PartialFailure`] naming each failed criterion, together
//! with what the successful criteria produced.

use crate::catalog_store::{CatalogStore, Track, TrackId};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SearchOperator {
    #[default]
    And,
    Or,
}

impl SearchOperator {
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "and" => Some(SearchOperator::And),
            "or" => Some(SearchOperator::Or),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchRequest {
    pub artist: Option<String>,
    pub genre: Option<String>,
    pub year: Option<i32>,
    #[serde(default)]
    pub operator: SearchOperator,
}

impl SearchRequest {
    /// The criteria actually provided, blank strings excluded.
    pub fn criteria(&self) -> Vec<Criterion> {
        let non_blank = |value: &Option<String>| {
            value
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };
        let mut criteria = Vec::with_capacity(3);
        if let Some(artist) = non_blank(&self.artist) {
            criteria.push(Criterion::Artist(artist));
        }
        if let Some(genre) = non_blank(&self.genre) {
            criteria.push(Criterion::Genre(genre));
        }
        if let Some(year) = self.year {
            criteria.push(Criterion::Year(year));
        }
        criteria
    }

    pub fn has_criteria(&self) -> bool {
        !self.criteria().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Criterion {
    Artist(String),
    Genre(String),
    Year(i32),
}

impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Criterion::Artist(artist) => write!(f, "artist={}", artist),
            Criterion::Genre(genre) => write!(f, "genre={}", genre),
            Criterion::Year(year) => write!(f, "year={}", year),
        }
    }
}

#[derive(Debug, Clone)]
pub struct CriterionFailure {
    pub criterion: Criterion,
    pub message: String,
}

#[derive(Debug, Error)]
pub enum SearchError {
    /// Some lookups failed. `partial` combines the ones that succeeded.
    #[error(
        "{} of {} search criteria failed: {}",
        .failures.len(),
        .total,
        describe_failures(.failures)
    )]
    PartialFailure {
        failures: Vec<CriterionFailure>,
        partial: Vec<Track>,
        total: usize,
    },
}

fn describe_failures(failures: &[CriterionFailure]) -> String {
    failures
        .iter()
        .map(|f| format!("{} ({})", f.criterion, f.message))
        .collect::<Vec<_>>()
        .join(", ")
}

pub struct AdvancedSearch {
    catalog_store: Arc<dyn CatalogStore>,
}

impl AdvancedSearch {
    pub fn new(catalog_store: Arc<dyn CatalogStore>) -> Self {
        AdvancedSearch { catalog_store }
    }

    pub fn search(&self, request: &SearchRequest) -> Result<Vec<Track>, SearchError> {
        let criteria = request.criteria();
        if criteria.is_empty() {
            return Ok(Vec::new());
        }
        debug!(
            "Advanced search with {} criteria, operator {:?}",
            criteria.len(),
            request.operator
        );

        let total = criteria.len();
        let outcomes: Vec<(Criterion, anyhow::Result<Vec<Track>>)> = criteria
            .into_par_iter()
            .map(|criterion| {
                let result = self.lookup(&criterion);
                (criterion, result)
            })
            .collect();

        let mut successes = Vec::with_capacity(total);
        let mut failures = Vec::new();
        for (criterion, outcome) in outcomes {
            match outcome {
                Ok(tracks) => successes.push(tracks),
                Err(err) => {
                    error!("Search by {} failed: {:#}", criterion, err);
                    failures.push(CriterionFailure {
                        criterion,
                        message: format!("{:#}", err),
                    });
                }
            }
        }

        let combined = combine(request.operator, successes);
        if failures.is_empty() {
            debug!("Advanced search completed: {} results", combined.len());
            Ok(combined)
        } else {
            Err(SearchError::PartialFailure {
                failures,
                partial: combined,
                total,
            })
        }
    }

    fn lookup(&self, criterion: &Criterion) -> anyhow::Result<Vec<Track>> {
        match criterion {
            Criterion::Artist(artist) => self.catalog_store.find_tracks_by_artist(artist),
            Criterion::Genre(genre) => self.catalog_store.find_tracks_by_genre(genre),
            Criterion::Year(year) => self.catalog_store.find_tracks_by_year(*year),
        }
    }
}

fn combine(operator: SearchOperator, result_sets: Vec<Vec<Track>>) -> Vec<Track> {
    match operator {
        SearchOperator::And => intersect(result_sets),
        SearchOperator::Or => union(result_sets),
    }
}

fn intersect(result_sets: Vec<Vec<Track>>) -> Vec<Track> {
    let mut sets = result_sets.into_iter();
    let Some(first) = sets.next() else {
        return Vec::new();
    };
    let others: Vec<HashSet<TrackId>> = sets
        .map(|set| set.iter().map(|t| t.id).collect())
        .collect();

    let mut seen = HashSet::new();
    first
        .into_iter()
        .filter(|t| others.iter().all(|ids| ids.contains(&t.id)))
        .filter(|t| seen.insert(t.id))
        .collect()
}

fn union(result_sets: Vec<Vec<Track>>) -> Vec<Track> {
    let mut seen = HashSet::new();
    result_sets
        .into_iter()
        .flatten()
        .filter(|t| seen.insert(t.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog_store::{InMemoryCatalogStore, NewTrack};
    use anyhow::bail;

    fn track(title: &str, artist: &str, genre: &str, year: i32) -> Track {
        NewTrack {
            title: title.to_string(),
            artist: artist.to_string(),
            genre: genre.to_string(),
            year,
            duration_secs: 200,
            audio_ref: None,
        }
        .into_track(0)
    }

    fn store() -> Arc<InMemoryCatalogStore> {
        Arc::new(
            InMemoryCatalogStore::with_tracks([
                track("Bohemian Rhapsody", "Queen", "Rock", 1975),
                track("We Will Rock You", "Queen", "Rock", 1977),
                track("Hotel California", "Eagles", "Rock", 1977),
                track("Thriller", "Michael Jackson", "Pop", 1982),
            ])
            .unwrap(),
        )
    }

    fn ids(tracks: &[Track]) -> Vec<TrackId> {
        tracks.iter().map(|t| t.id).collect()
    }

    fn request(
        artist: Option<&str>,
        genre: Option<&str>,
        year: Option<i32>,
        operator: SearchOperator,
    ) -> SearchRequest {
        SearchRequest {
            artist: artist.map(str::to_string),
            genre: genre.map(str::to_string),
            year,
            operator,
        }
    }

    /// Fails artist lookups, delegates the rest.
    struct FlakyArtistStore(Arc<InMemoryCatalogStore>);

    impl CatalogStore for FlakyArtistStore {
        fn load_all_tracks(&self) -> anyhow::Result<Vec<Track>> {
            self.0.load_all_tracks()
        }
        fn count_tracks(&self) -> anyhow::Result<usize> {
            self.0.count_tracks()
        }
        fn get_track(&self, id: TrackId) -> anyhow::Result<Option<Track>> {
            self.0.get_track(id)
        }
        fn find_track_by_title_and_artist(
            &self,
            title: &str,
            artist: &str,
        ) -> anyhow::Result<Option<Track>> {
            self.0.find_track_by_title_and_artist(title, artist)
        }
        fn find_tracks_by_artist(&self, _artist: &str) -> anyhow::Result<Vec<Track>> {
            bail!("artist index unavailable")
        }
        fn find_tracks_by_genre(&self, genre: &str) -> anyhow::Result<Vec<Track>> {
            self.0.find_tracks_by_genre(genre)
        }
        fn find_tracks_by_year(&self, year: i32) -> anyhow::Result<Vec<Track>> {
            self.0.find_tracks_by_year(year)
        }
        fn save_track(&self, track: Track) -> anyhow::Result<Track> {
            self.0.save_track(track)
        }
        fn delete_track(&self, id: TrackId) -> anyhow::Result<bool> {
            self.0.delete_track(id)
        }
    }

    #[test]
    fn test_no_criteria_is_empty() {
        let search = AdvancedSearch::new(store());
        assert!(search.search(&SearchRequest::default()).unwrap().is_empty());

        let blank = request(Some("  "), Some(""), None, SearchOperator::Or);
        assert!(!blank.has_criteria());
        assert!(search.search(&blank).unwrap().is_empty());
    }

    #[test]
    fn test_and_is_intersection() {
        let search = AdvancedSearch::new(store());
        let result = search
            .search(&request(
                Some("queen"),
                Some("rock"),
                Some(1977),
                SearchOperator::And,
            ))
            .unwrap();
        assert_eq!(ids(&result), vec![2]);
    }

    #[test]
    fn test_and_with_empty_criterion_is_empty() {
        let search = AdvancedSearch::new(store());
        let result = search
            .search(&request(
                Some("Queen"),
                Some("Jazz"),
                None,
                SearchOperator::And,
            ))
            .unwrap();
        assert!(result.is_empty());
    }

    #[test]
    fn test_or_is_union_without_duplicates() {
        let search = AdvancedSearch::new(store());
        let result = search
            .search(&request(
                Some("Queen"),
                Some("Pop"),
                Some(1977),
                SearchOperator::Or,
            ))
            .unwrap();
        assert_eq!(ids(&result), vec![1, 2, 4, 3]);
    }

    #[test]
    fn test_failure_is_surfaced() {
        let search = AdvancedSearch::new(Arc::new(FlakyArtistStore(store())));
        let err = search
            .search(&request(
                Some("Queen"),
                Some("Rock"),
                None,
                SearchOperator::Or,
            ))
            .unwrap_err();

        let SearchError::PartialFailure {
            failures,
            partial,
            total,
        } = &err;
        assert_eq!(*total, 2);
        assert_eq!(failures.len(), 1);
        assert_eq!(failures[0].criterion, Criterion::Artist("Queen".to_string()));
        assert!(failures[0].message.contains("artist index unavailable"));
        assert_eq!(ids(partial), vec![1, 2, 3]);
        assert!(err.to_string().contains("1 of 2"));
    }

    #[test]
    fn test_operator_parsing() {
        assert_eq!(SearchOperator::from_str("or"), Some(SearchOperator::Or));
        assert_eq!(SearchOperator::from_str(" AND "), Some(SearchOperator::And));
        assert_eq!(SearchOperator::from_str("xor"), None);
    }
}
