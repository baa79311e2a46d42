use crate::catalog_store::Track;
use clap::builder::styling::{AnsiColor, Color, Style};
use clap::builder::Styles;
use crossterm::style::{Attribute, Color as CtColor, Stylize};
use unicode_width::UnicodeWidthStr;

// ═══════════════════════════════════════════════════════════════════════════════
// Clap Styles
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_styles() -> Styles {
    let accent = |color: AnsiColor| Style::new().bold().fg_color(Some(Color::Ansi(color)));
    Styles::styled()
        .usage(accent(AnsiColor::Magenta).underline())
        .header(accent(AnsiColor::Magenta).underline())
        .literal(accent(AnsiColor::Green))
        .invalid(accent(AnsiColor::Red))
        .error(accent(AnsiColor::Red))
        .valid(accent(AnsiColor::Green))
        .placeholder(Style::new().fg_color(Some(Color::Ansi(AnsiColor::BrightBlack))))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Color Palette
// ═══════════════════════════════════════════════════════════════════════════════

pub mod colors {
    use crossterm::style::Color;

    pub const TEAL: Color = Color::Rgb {
        r: 0,
        g: 200,
        b: 180,
    };
    pub const VIOLET: Color = Color::Rgb {
        r: 170,
        g: 110,
        b: 255,
    };
    pub const CORAL: Color = Color::Rgb {
        r: 255,
        g: 120,
        b: 100,
    };
    pub const GREEN: Color = Color::Rgb {
        r: 0,
        g: 230,
        b: 120,
    };
    pub const AMBER: Color = Color::Rgb {
        r: 255,
        g: 190,
        b: 0,
    };
    pub const RED: Color = Color::Rgb {
        r: 255,
        g: 85,
        b: 85,
    };
    pub const DIM: Color = Color::Rgb {
        r: 128,
        g: 128,
        b: 128,
    };
    pub const WHITE: Color = Color::Rgb {
        r: 255,
        g: 255,
        b: 255,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Box Drawing Characters
// ═══════════════════════════════════════════════════════════════════════════════

pub mod box_chars {
    pub const HORIZONTAL: &str = "─";
    pub const VERTICAL: &str = "│";

    pub const ROUND_TOP_LEFT: &str = "╭";
    pub const ROUND_TOP_RIGHT: &str = "╮";
    pub const ROUND_BOTTOM_LEFT: &str = "╰";
    pub const ROUND_BOTTOM_RIGHT: &str = "╯";

    pub const T_LEFT: &str = "├";
    pub const T_RIGHT: &str = "┤";
    pub const T_TOP: &str = "┬";
    pub const T_BOTTOM: &str = "┴";
    pub const CROSS: &str = "┼";

    pub const ARROW_RIGHT: &str = "▶";
    pub const BULLET: &str = "●";
    pub const BULLET_EMPTY: &str = "○";
    pub const NOTE: &str = "♪";
    pub const CHECK: &str = "✓";
    pub const CROSS_MARK: &str = "✗";
}

// ═══════════════════════════════════════════════════════════════════════════════
// Formatting Helpers
// ═══════════════════════════════════════════════════════════════════════════════

/// `m:ss` rendering of a duration in seconds.
pub fn format_duration(secs: u32) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

/// Pads `text` with spaces to a display width of `width` columns.
pub fn pad_to_width(text: &str, width: usize) -> String {
    format!("{}{}", text, " ".repeat(width.saturating_sub(text.width())))
}

// ═══════════════════════════════════════════════════════════════════════════════
// Status Indicators
// ═══════════════════════════════════════════════════════════════════════════════

pub fn print_success(message: &str) {
    println!(
        " {} {}",
        box_chars::CHECK.with(colors::GREEN).bold(),
        message.with(colors::GREEN)
    );
}

pub fn print_error(message: &str) {
    println!(
        " {} {}",
        box_chars::CROSS_MARK.with(colors::RED).bold(),
        message.with(colors::RED)
    );
}

pub fn print_warning(message: &str) {
    println!(
        " {} {}",
        "⚠".with(colors::AMBER).bold(),
        message.with(colors::AMBER)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Sections, Key-Values and Lists
// ═══════════════════════════════════════════════════════════════════════════════

const SECTION_WIDTH: usize = 60;

pub fn print_section_header(title: &str) {
    let title_len = title.width();
    let left = SECTION_WIDTH.saturating_sub(title_len + 4) / 2;
    let right = SECTION_WIDTH.saturating_sub(title_len + 4 + left);

    println!();
    println!(
        "{}{} {} {}{}",
        box_chars::ROUND_TOP_LEFT.with(colors::TEAL),
        box_chars::HORIZONTAL.repeat(left).with(colors::TEAL),
        title.with(colors::TEAL).bold().attribute(Attribute::Italic),
        box_chars::HORIZONTAL.repeat(right).with(colors::TEAL),
        box_chars::ROUND_TOP_RIGHT.with(colors::TEAL)
    );
}

pub fn print_section_footer() {
    println!(
        "{}{}{}",
        box_chars::ROUND_BOTTOM_LEFT.with(colors::TEAL),
        box_chars::HORIZONTAL.repeat(SECTION_WIDTH).with(colors::TEAL),
        box_chars::ROUND_BOTTOM_RIGHT.with(colors::TEAL)
    );
    println!();
}

pub fn print_key_value(key: &str, value: &str) {
    println!(
        "  {} {} {}",
        box_chars::BULLET.with(colors::VIOLET),
        format!("{}:", key).with(colors::DIM),
        value.with(colors::WHITE)
    );
}

pub fn print_list_item(item: &str, indent: usize) {
    println!(
        "{}{}  {}",
        "  ".repeat(indent),
        box_chars::ARROW_RIGHT.with(colors::TEAL),
        item.with(colors::WHITE)
    );
}

pub fn print_empty_list(message: &str) {
    println!(
        "  {} {}",
        box_chars::BULLET_EMPTY.with(colors::DIM),
        message.with(colors::DIM).attribute(Attribute::Italic)
    );
}

// ═══════════════════════════════════════════════════════════════════════════════
// Table Display
// ═══════════════════════════════════════════════════════════════════════════════

pub struct TableBuilder {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
    col_widths: Vec<usize>,
}

impl TableBuilder {
    pub fn new(headers: &[&str]) -> Self {
        TableBuilder {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
            col_widths: headers.iter().map(|h| h.width()).collect(),
        }
    }

    /// Cells beyond the header count are dropped.
    pub fn add_row<S: Into<String>>(&mut self, row: impl IntoIterator<Item = S>) {
        let row: Vec<String> = row
            .into_iter()
            .map(Into::into)
            .take(self.headers.len())
            .collect();
        for (width, cell) in self.col_widths.iter_mut().zip(&row) {
            *width = (*width).max(cell.width());
        }
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn border(&self, left: &str, junction: &str, right: &str) -> String {
        let inner: Vec<String> = self
            .col_widths
            .iter()
            .map(|w| box_chars::HORIZONTAL.repeat(w + 2))
            .collect();
        format!("{}{}{}", left, inner.join(junction), right)
    }

    fn print_row(&self, cells: &[String], color: CtColor, bold: bool) {
        print!("{}", box_chars::VERTICAL.with(colors::TEAL));
        for (i, width) in self.col_widths.iter().enumerate() {
            let cell = pad_to_width(cells.get(i).map(String::as_str).unwrap_or(""), *width);
            let styled = if bold {
                cell.with(color).bold()
            } else {
                cell.with(color)
            };
            print!(" {} {}", styled, box_chars::VERTICAL.with(colors::TEAL));
        }
        println!();
    }

    pub fn print(&self) {
        let top = self.border(
            box_chars::ROUND_TOP_LEFT,
            box_chars::T_TOP,
            box_chars::ROUND_TOP_RIGHT,
        );
        let separator = self.border(box_chars::T_LEFT, box_chars::CROSS, box_chars::T_RIGHT);
        let bottom = self.border(
            box_chars::ROUND_BOTTOM_LEFT,
            box_chars::T_BOTTOM,
            box_chars::ROUND_BOTTOM_RIGHT,
        );

        println!("{}", top.with(colors::TEAL));
        self.print_row(&self.headers, colors::TEAL, true);
        println!("{}", separator.with(colors::TEAL));
        for row in &self.rows {
            self.print_row(row, colors::WHITE, false);
        }
        println!("{}", bottom.with(colors::TEAL));
    }
}

/// Prints tracks as a table, or `empty_message` when there are none.
pub fn print_tracks(tracks: &[Track], empty_message: &str) {
    if tracks.is_empty() {
        print_empty_list(empty_message);
        return;
    }
    let mut table = TableBuilder::new(&["ID", "Title", "Artist", "Genre", "Year", "Time"]);
    for track in tracks {
        table.add_row([
            track.id.to_string(),
            track.title.clone(),
            track.artist.clone(),
            track.genre.clone(),
            track.year.to_string(),
            format_duration(track.duration_secs),
        ]);
    }
    table.print();
}

// ═══════════════════════════════════════════════════════════════════════════════
// Prompt, Welcome and Goodbye
// ═══════════════════════════════════════════════════════════════════════════════

pub fn get_prompt() -> String {
    format!(
        "{} {} ",
        "syncup".with(colors::TEAL).bold(),
        box_chars::NOTE.with(colors::VIOLET).bold(),
    )
}

pub fn print_welcome(track_count: usize, account_count: usize) {
    let banner = r#"
   ███████╗██╗   ██╗███╗   ██╗ ██████╗██╗   ██╗██████╗
   ██╔════╝╚██╗ ██╔╝████╗  ██║██╔════╝██║   ██║██╔══██╗
   ███████╗ ╚████╔╝ ██╔██╗ ██║██║     ██║   ██║██████╔╝
   ╚════██║  ╚██╔╝  ██║╚██╗██║██║     ██║   ██║██╔═══╝
   ███████║   ██║   ██║ ╚████║╚██████╗╚██████╔╝██║
   ╚══════╝   ╚═╝   ╚═╝  ╚═══╝ ╚═════╝ ╚═════╝ ╚═╝
"#;
    let gradient = [colors::TEAL, colors::TEAL, colors::VIOLET, colors::VIOLET, colors::CORAL];
    for (i, line) in banner.lines().filter(|l| !l.is_empty()).enumerate() {
        let color = gradient.get(i).copied().unwrap_or(colors::CORAL);
        println!("{}", line.with(color).bold());
    }
    println!();

    print_key_value("Version", env!("CARGO_PKG_VERSION"));
    print_key_value("Tracks", &track_count.to_string());
    print_key_value("Accounts", &account_count.to_string());
    println!();
    println!("  {}", "Type 'help' for available commands".with(colors::DIM));
    println!();
}

pub fn print_goodbye() {
    println!();
    println!(
        "  {} {}",
        box_chars::NOTE.with(colors::TEAL),
        "Bye! Keep the music playing.".with(colors::VIOLET).bold()
    );
    println!();
}
