//! Cricket Stats Client Library
//!
//! This library fetches batter profiles, batter-vs-bowler matchups and match details
//! from a cricket stats API, and keeps the async state for screens that show them.
//!
//! # Examples
//!
//! ```rust,no_run
//! use cricket_stats::controllers::{ProfileQuery, profile_controller};
//! use cricket_stats::{AppError, Config, StatsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), AppError> {
//!     let config = Config::load().await?;
//!     let client = StatsClient::new(&config)?;
//!
//!     // One-off request
//!     let seasons = client.seasons().await?;
//!     println!("{} seasons", seasons.seasons.len());
//!
//!     // Controller-driven request with published state
//!     let profile = profile_controller(&client);
//!     profile.set_query(Some(ProfileQuery::new("V Kohli")));
//!     let state = profile.settled().await;
//!     if let Some(data) = state.data {
//!         println!("{} career runs", data.career.runs);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod controllers;
pub mod data_fetcher;
pub mod display;
pub mod error;
pub mod logging;
pub mod session;
pub mod testing_utils;

// Re-export commonly used types for convenience
pub use config::Config;
pub use data_fetcher::StatsClient;
pub use error::AppError;
pub use session::{
    BatterProfileSession, CompareMatchupsSession, MatchContextSession, MatchupSearchSession,
    ScreenStatus,
};

/// Current version of the library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
