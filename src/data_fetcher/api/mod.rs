pub mod client;
pub mod endpoints;
pub mod http_client;
pub mod urls;

pub use client::{StatsClient, parse_error_response};
pub use endpoints::{ListPlayersParams, MatchupOptions};
pub use http_client::create_http_client_with_timeout;
pub use urls::*;
