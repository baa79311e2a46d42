use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use rustyline::{
    completion::Completer, highlight::Highlighter, history::FileHistory, validate::Validator,
    CompletionType, Config, Editor, Helper,
};

use syncup_core::catalog_store::{
    AllAudioAvailable, AudioAvailability, InMemoryCatalogStore, MediaDirAudioAvailability,
    NewTrack, TrackId,
};
use syncup_core::cli_style::*;
use syncup_core::config::{AppConfig, CliConfig, FileConfig};
use syncup_core::search::{SearchError, SearchOperator, SearchRequest};
use syncup_core::user::{Account, InMemoryUserStore};
use syncup_core::SyncupState;

fn parse_path(s: &str) -> Result<PathBuf> {
    let original_path = PathBuf::from(s);
    if original_path.is_absolute() {
        return Ok(original_path);
    }
    let cwd = std::env::current_dir()?;
    Ok(cwd.join(original_path))
}

#[derive(Parser, Debug)]
#[command(styles = get_styles(), version)]
struct CliArgs {
    /// Path to a TOML config file. Its values override the flags below.
    #[clap(value_parser = parse_path)]
    pub config: Option<PathBuf>,

    /// Directory that audio references such as `/audio/x.wav` resolve against.
    /// When omitted every non-blank reference is treated as playable.
    #[clap(long, value_parser = parse_path)]
    pub media_path: Option<PathBuf>,

    /// Load the demo catalog, accounts, favorites and connections.
    #[clap(long)]
    pub seed_demo: bool,

    /// Keep tracks without playable audio instead of deleting them at startup.
    #[clap(long)]
    pub no_prune: bool,
}

#[derive(Parser)]
#[command(styles = get_styles(), name = "")]
struct InnerCli {
    #[command(subcommand)]
    command: InnerCommand,
}

#[derive(Subcommand)]
enum InnerCommand {
    /// Autocompletes tracks by title or artist prefix.
    Search {
        #[arg(required = true)]
        query: Vec<String>,
    },

    /// Searches tracks by artist, genre and year, combined with AND or OR.
    AdvancedSearch {
        #[arg(long)]
        artist: Option<String>,
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        year: Option<i32>,
        /// "and" or "or".
        #[arg(long, default_value = "and")]
        op: String,
    },

    /// Shows the tracks most similar to the given one.
    Similar {
        track_id: TrackId,
        #[arg(short, long, default_value_t = 5)]
        count: usize,
    },

    /// Shows the most similar chain of tracks between two tracks.
    Path { from: TrackId, to: TrackId },

    /// Recommends tracks based on an account's favorites.
    Discover {
        handle: String,
        #[arg(long)]
        max: Option<usize>,
    },

    /// Builds a playlist starting from a seed track.
    Radio {
        track_id: TrackId,
        #[arg(long)]
        max: Option<usize>,
    },

    /// Connects two accounts.
    Follow { follower: String, followee: String },

    /// Removes the connection between two accounts.
    Unfollow { follower: String, followee: String },

    /// Lists the accounts connected to the given one.
    Following { handle: String },

    /// Suggests accounts reachable through existing connections.
    Suggest {
        handle: String,
        #[arg(long)]
        max: Option<usize>,
    },

    /// Checks whether two accounts are within the configured connection depth.
    Connected { a: String, b: String },

    /// Adds a track to an account's favorites.
    FavAdd { handle: String, track_id: TrackId },

    /// Removes a track from an account's favorites.
    FavRemove { handle: String, track_id: TrackId },

    /// Lists an account's favorites.
    Favs { handle: String },

    /// Shows an account.
    Whois { handle: String },

    /// Finds accounts by handle or display name.
    Users { query: String },

    /// Changes an account's display name or password.
    EditUser {
        handle: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },

    /// Deletes an account with its connections and favorites.
    DeleteUser { handle: String },

    /// Lists every track in the catalog.
    Tracks,

    /// Adds a track to the catalog.
    AddTrack {
        title: String,
        artist: String,
        genre: String,
        year: i32,
        duration_secs: u32,
        #[arg(long)]
        audio: Option<String>,
    },

    /// Deletes a track from the catalog.
    DeleteTrack { track_id: TrackId },

    /// Shows catalog statistics.
    Metrics {
        #[arg(long, default_value_t = 5)]
        top: usize,

        /// Print the raw counts as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Close this program.
    Exit,
}

enum CommandExecutionResult {
    Ok,
    Exit,
    Error(String),
}

fn print_accounts(accounts: &[Account], empty_message: &str) {
    if accounts.is_empty() {
        print_empty_list(empty_message);
        return;
    }
    for account in accounts {
        print_list_item(
            &format!("{} ({})", account.handle, account.display_name),
            1,
        );
    }
}

fn print_bool(value: bool, yes: &str, no: &str) {
    if value {
        print_success(yes);
    } else {
        print_warning(no);
    }
}

fn execute_command(line: String, state: &SyncupState) -> CommandExecutionResult {
    if line.trim().is_empty() {
        return CommandExecutionResult::Ok;
    }

    let args =
        shlex::split(&line).unwrap_or_else(|| line.split_whitespace().map(String::from).collect());

    let cli = match InnerCli::try_parse_from(
        std::iter::once(" ").chain(args.iter().map(String::as_str)),
    ) {
        Ok(cli) => cli,
        Err(e) => {
            println!("{}", e);
            return CommandExecutionResult::Ok;
        }
    };

    match cli.command {
        InnerCommand::Search { query } => {
            let query = query.join(" ");
            print_section_header(&format!("Search \"{}\"", query));
            print_tracks(&state.autocomplete(&query), "No matches");
            print_section_footer();
        }
        InnerCommand::AdvancedSearch {
            artist,
            genre,
            year,
            op,
        } => {
            let Some(operator) = SearchOperator::from_str(&op) else {
                return CommandExecutionResult::Error(format!("Unknown operator '{}'", op));
            };
            let request = SearchRequest {
                artist,
                genre,
                year,
                operator,
            };
            print_section_header("Advanced search");
            match state.advanced_search(&request) {
                Ok(tracks) => print_tracks(&tracks, "No matches"),
                Err(err @ SearchError::PartialFailure { .. }) => {
                    print_error(&err.to_string());
                    let SearchError::PartialFailure { partial, .. } = err;
                    print_tracks(&partial, "No partial results");
                }
            }
            print_section_footer();
        }
        InnerCommand::Similar { track_id, count } => {
            print_section_header(&format!("Similar to track {}", track_id));
            print_tracks(&state.similar(track_id, count), "No similar tracks");
            print_section_footer();
        }
        InnerCommand::Path { from, to } => {
            print_section_header(&format!("Path {} -> {}", from, to));
            print_tracks(&state.best_path(from, to), "No path between these tracks");
            print_section_footer();
        }
        InnerCommand::Discover { handle, max } => {
            print_section_header(&format!("Discover for {}", handle));
            print_tracks(&state.discover(&handle, max), "Nothing to discover");
            print_section_footer();
        }
        InnerCommand::Radio { track_id, max } => {
            print_section_header(&format!("Radio from track {}", track_id));
            print_tracks(&state.radio(track_id, max), "Unknown seed track");
            print_section_footer();
        }
        InnerCommand::Follow { follower, followee } => print_bool(
            state.follow(&follower, &followee),
            &format!("{} and {} are now connected", follower, followee),
            "Nothing changed (unknown account or already connected)",
        ),
        InnerCommand::Unfollow { follower, followee } => print_bool(
            state.unfollow(&follower, &followee),
            &format!("{} and {} are no longer connected", follower, followee),
            "Nothing changed (unknown account or not connected)",
        ),
        InnerCommand::Following { handle } => {
            print_section_header(&format!("Connections of {}", handle));
            print_accounts(&state.following(&handle), "No connections");
            print_section_footer();
        }
        InnerCommand::Suggest { handle, max } => {
            print_section_header(&format!("Suggestions for {}", handle));
            print_accounts(&state.suggestions(&handle, max), "No suggestions");
            print_section_footer();
        }
        InnerCommand::Connected { a, b } => print_bool(
            state.are_connected(&a, &b),
            &format!("{} can reach {}", a, b),
            &format!("{} cannot reach {}", a, b),
        ),
        InnerCommand::FavAdd { handle, track_id } => match state.add_favorite(&handle, track_id) {
            Ok(added) => print_bool(
                added,
                &format!("Track {} added to {}'s favorites", track_id, handle),
                "Nothing changed (unknown account, unknown track or already a favorite)",
            ),
            Err(err) => return CommandExecutionResult::Error(err.to_string()),
        },
        InnerCommand::FavRemove { handle, track_id } => print_bool(
            state.remove_favorite(&handle, track_id),
            &format!("Track {} removed from {}'s favorites", track_id, handle),
            "Track was not a favorite",
        ),
        InnerCommand::Favs { handle } => {
            print_section_header(&format!("Favorites of {}", handle));
            print_tracks(&state.favorites_of(&handle), "No favorites");
            print_section_footer();
        }
        InnerCommand::Whois { handle } => match state.account(&handle) {
            Some(account) => {
                print_section_header(&account.handle);
                print_key_value("Id", &account.id.to_string());
                print_key_value("Name", &account.display_name);
                print_key_value("Role", account.role.as_str());
                print_key_value(
                    "Credentials",
                    if account.has_credentials() { "set" } else { "missing" },
                );
                print_key_value(
                    "Favorites",
                    &state.favorites.count(&account.handle).to_string(),
                );
                print_section_footer();
            }
            None => print_warning(&format!("Unknown account '{}'", handle)),
        },
        InnerCommand::Users { query } => {
            print_section_header(&format!("Accounts matching '{}'", query));
            print_accounts(&state.search_accounts(&query), "No accounts found");
            print_section_footer();
        }
        InnerCommand::EditUser {
            handle,
            name,
            password,
        } => match state.update_account(&handle, name.as_deref(), password.as_deref()) {
            Ok(account) => print_success(&format!("Updated '{}'", account.handle)),
            Err(err) => return CommandExecutionResult::Error(format!("{:#}", err)),
        },
        InnerCommand::DeleteUser { handle } => match state.delete_account(&handle) {
            Ok(deleted) => print_bool(
                deleted,
                &format!("Deleted account '{}'", handle),
                "Unknown account",
            ),
            Err(err) => return CommandExecutionResult::Error(format!("{:#}", err)),
        },
        InnerCommand::Tracks => match state.catalog.list() {
            Ok(tracks) => {
                print_section_header("Catalog");
                print_tracks(&tracks, "The catalog is empty");
                print_section_footer();
            }
            Err(err) => return CommandExecutionResult::Error(err.to_string()),
        },
        InnerCommand::AddTrack {
            title,
            artist,
            genre,
            year,
            duration_secs,
            audio,
        } => {
            let new_track = NewTrack {
                title,
                artist,
                genre,
                year,
                duration_secs,
                audio_ref: audio,
            };
            match state.catalog.create(new_track) {
                Ok(track) => print_success(&format!(
                    "Created track {} '{}'",
                    track.id,
                    track.display_name()
                )),
                Err(err) => return CommandExecutionResult::Error(err.to_string()),
            }
        }
        InnerCommand::DeleteTrack { track_id } => match state.catalog.delete(track_id) {
            Ok(track) => print_success(&format!("Deleted '{}'", track.display_name())),
            Err(err) => return CommandExecutionResult::Error(err.to_string()),
        },
        InnerCommand::Metrics { json: true, .. } => match state.catalog.metrics() {
            Ok(metrics) => match serde_json::to_string_pretty(&metrics) {
                Ok(body) => println!("{}", body),
                Err(err) => return CommandExecutionResult::Error(err.to_string()),
            },
            Err(err) => return CommandExecutionResult::Error(err.to_string()),
        },
        InnerCommand::Metrics { top, json: false } => match state.catalog.metrics() {
            Ok(metrics) => {
                print_section_header("Catalog metrics");
                print_key_value("Tracks", &metrics.track_count.to_string());
                print_key_value("Similarity edges", &state.similarity.edge_count().to_string());
                print_key_value("Connections", &state.social.connection_count().to_string());
                let search_stats = state.search_vault.get_stats();
                print_key_value(
                    "Search index",
                    &format!(
                        "{} ({} entries)",
                        search_stats.index_type, search_stats.indexed_items
                    ),
                );
                println!();
                let mut genres = TableBuilder::new(&["Genre", "Tracks"]);
                for (genre, count) in &metrics.genre_counts {
                    genres.add_row([genre.clone(), count.to_string()]);
                }
                genres.print();
                let mut artists = TableBuilder::new(&["Top artist", "Tracks"]);
                for (artist, count) in metrics.top_artists(top) {
                    artists.add_row([artist, count.to_string()]);
                }
                artists.print();
                print_section_footer();
            }
            Err(err) => return CommandExecutionResult::Error(err.to_string()),
        },
        InnerCommand::Exit => return CommandExecutionResult::Exit,
    }
    CommandExecutionResult::Ok
}

#[derive(rustyline_derive::Hinter)]
struct MyHelper {
    commands_names: Vec<String>,
}

impl MyHelper {
    pub fn new() -> Self {
        let commands_names: Vec<String> = InnerCli::command()
            .get_subcommands()
            .map(|sc| sc.get_name().to_string())
            .collect();

        MyHelper { commands_names }
    }
}

impl Completer for MyHelper {
    type Candidate = String;

    fn complete(
        &self,
        line: &str,
        _pos: usize,
        _ctx: &rustyline::Context<'_>,
    ) -> rustyline::Result<(usize, Vec<String>)> {
        if line.contains(' ') {
            return Ok((0, Vec::with_capacity(0)));
        }
        let matches = self
            .commands_names
            .iter()
            .filter(|c| c.starts_with(line))
            .cloned()
            .collect::<Vec<_>>();

        Ok((0, matches))
    }
}

impl Highlighter for MyHelper {}
impl Validator for MyHelper {}
impl Helper for MyHelper {}

fn main() -> Result<()> {
    let cli_args = CliArgs::parse();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .with_env_var("LOG_LEVEL")
                .from_env_lossy(),
        )
        .try_init()
        .context("Failed to initialise logging")?;

    let file_config = cli_args
        .config
        .as_deref()
        .map(FileConfig::load)
        .transpose()?;
    let cli_config = CliConfig {
        media_path: cli_args.media_path,
        prune_tracks_without_audio: !cli_args.no_prune,
        seed_demo_data: cli_args.seed_demo,
    };
    let config = AppConfig::resolve(&cli_config, file_config)?;

    let audio: Arc<dyn AudioAvailability> = match &config.media_path {
        Some(path) => Arc::new(MediaDirAudioAvailability::new(path)),
        None => Arc::new(AllAudioAvailable),
    };
    let state = SyncupState::bootstrap(
        config,
        Arc::new(InMemoryCatalogStore::new()),
        Arc::new(InMemoryUserStore::new()),
        audio,
    )?;

    print_welcome(state.similarity.node_count(), state.identities.len());

    let rl_config = Config::builder()
        .completion_type(CompletionType::List)
        .build();
    let mut rl = Editor::<MyHelper, FileHistory>::with_config(rl_config)?;
    rl.set_helper(Some(MyHelper::new()));

    let prompt = get_prompt();
    loop {
        match rl.readline(&prompt) {
            Ok(line) => {
                let _ = rl.add_history_entry(&line);
                match execute_command(line, &state) {
                    CommandExecutionResult::Ok => {}
                    CommandExecutionResult::Exit => break,
                    CommandExecutionResult::Error(err) => print_error(&err),
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!("CTRL-C");
                break;
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                println!("CTRL-D: exiting.");
                break;
            }
            Err(e) => {
                print_error(&format!("{:?}", e));
                break;
            }
        }
    }
    print_goodbye();
    Ok(())
}
