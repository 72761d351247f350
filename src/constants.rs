//! Application-wide constants and configuration values
//!
//! This module centralizes all magic numbers and configuration constants
//! to improve maintainability and make the codebase more configurable.

/// Default API host used when no config file or override is present
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";

/// Path prefix every API route lives under
pub const DEFAULT_API_BASE_PATH: &str = "/api/v1";

/// Default timeout for HTTP requests in milliseconds
pub const DEFAULT_HTTP_TIMEOUT_MS: u64 = 15_000;

/// Maximum number of connections per host in the HTTP client pool
pub const HTTP_POOL_MAX_IDLE_PER_HOST: usize = 16;

/// Player search (autocomplete) settings
pub mod search {
    /// Quiet period before a typed query is sent
    pub const DEBOUNCE_MS: u64 = 300;

    /// Queries shorter than this never reach the network
    pub const MIN_QUERY_LENGTH: usize = 2;

    /// Number of suggestions requested per query
    pub const SUGGESTION_LIMIT: u32 = 10;
}

/// Retry affordance settings
pub mod retry {
    /// Maximum number of user-driven retries before the action becomes a reset
    pub const MAX_ATTEMPTS: u32 = 3;
}

/// Compare matchups screen settings
pub mod compare {
    /// Maximum number of bowlers compared against one batter
    pub const MAX_BOWLERS: usize = 5;
}

/// Endpoint query defaults
pub mod query_defaults {
    /// Number of matches summarized by the recent form endpoint
    pub const RECENT_FORM_MATCHES: u32 = 5;

    /// Page size for the player listing endpoint
    pub const PLAYER_LIST_LIMIT: u32 = 100;
}

/// Error codes surfaced to controllers
pub mod error_codes {
    pub const TIMEOUT: &str = "TIMEOUT";
    pub const NETWORK_ERROR: &str = "NETWORK_ERROR";
    pub const UNKNOWN: &str = "UNKNOWN";
    pub const NOT_FOUND: &str = "NOT_FOUND";
}

/// Environment variable names
pub mod env_vars {
    /// Environment variable for API base URL override
    pub const API_URL: &str = "CRICKET_STATS_API_URL";

    /// Environment variable for HTTP timeout override in milliseconds
    pub const API_TIMEOUT: &str = "CRICKET_STATS_API_TIMEOUT";

    /// Environment variable for log file path override
    pub const LOG_FILE: &str = "CRICKET_STATS_LOG_FILE";
}
