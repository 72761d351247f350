use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Parser, Subcommand};

use crate::constants::{query_defaults, search};

fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .usage(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::Yellow.on_default())
        .error(AnsiColor::Red.on_default().effects(Effects::BOLD))
        .valid(AnsiColor::Green.on_default())
        .invalid(AnsiColor::Red.on_default())
}

/// Cricket stats client
///
/// Looks up batter profiles, batter-vs-bowler matchups and match details from a
/// cricket stats API. The API location comes from the config file or the
/// CRICKET_STATS_API_URL environment variable.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(styles = get_styles())]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// List current configuration settings
    #[arg(long = "list-config", short = 'l', help_heading = "Configuration")]
    pub list_config: bool,

    /// Retry transient failures (timeouts, network errors, server errors) until the
    /// configured number of retries is used up.
    #[arg(long = "retry", short = 'r', global = true, help_heading = "Requests")]
    pub retry: bool,

    /// Also write logs to the terminal.
    #[arg(long = "debug", global = true, help_heading = "Debug")]
    pub debug: bool,

    /// Specify a custom log file path. If not provided, logs will be written to the default location.
    #[arg(long = "log-file", global = true, help_heading = "Debug")]
    pub log_file: Option<String>,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Career stats, season breakdown and recent form for a batter
    Profile {
        batter: String,
        /// Limit the season breakdown to one season. Defaults to the latest season.
        #[arg(long)]
        season: Option<String>,
    },
    /// Head-to-head record of a batter against a bowler
    Matchup {
        batter: String,
        bowler: String,
        #[arg(long)]
        season: Option<String>,
    },
    /// One batter against several bowlers (at most five)
    Compare {
        batter: String,
        #[arg(required = true, num_args = 1..)]
        bowlers: Vec<String>,
    },
    /// Season, venue, teams and toss for a match id
    Match { match_id: String },
    /// Player name suggestions
    Search {
        query: String,
        #[arg(long, default_value_t = search::SUGGESTION_LIMIT)]
        limit: u32,
    },
    /// Paged list of player names
    Players {
        #[arg(long)]
        search: Option<String>,
        #[arg(long, default_value_t = query_defaults::PLAYER_LIST_LIMIT)]
        limit: u32,
        #[arg(long, default_value_t = 0)]
        offset: u32,
    },
    /// Seasons that have match data
    Seasons,
    /// API and database status
    Health,
}
