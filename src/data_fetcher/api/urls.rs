//! URL building utilities for API endpoints

use reqwest::Url;

use crate::error::AppError;

/// Joins the API root and a route path with exactly one `/` between them.
/// Absolute `http(s)://` paths are returned unchanged.
///
/// # Example
/// ```
/// use cricket_stats::data_fetcher::api::join_url;
///
/// assert_eq!(join_url("http://localhost:8000/api/v1", "/seasons"), "http://localhost:8000/api/v1/seasons");
/// assert_eq!(join_url("http://localhost:8000/api/v1/", "seasons"), "http://localhost:8000/api/v1/seasons");
/// ```
pub fn join_url(api_root: &str, path: &str) -> String {
    if path.starts_with("http://") || path.starts_with("https://") {
        return path.to_string();
    }
    let segment = path.trim_start_matches('/');
    if api_root.ends_with('/') {
        format!("{api_root}{segment}")
    } else {
        format!("{api_root}/{segment}")
    }
}

/// Route below the API root, held as raw segments.
///
/// Segments are percent-encoded only when applied to a [`Url`], so a name with
/// spaces, `?` or `/` always stays a single segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Route {
    segments: Vec<String>,
}

impl Route {
    /// Starts a route from a static path such as `matchups/batter`.
    pub fn new(path: &str) -> Self {
        Self {
            segments: path
                .split('/')
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    /// Appends one segment. Player names are trimmed.
    pub fn segment(mut self, value: impl ToString) -> Self {
        self.segments.push(value.to_string().trim().to_string());
        self
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Appends the segments to `base`'s path.
    pub fn apply(&self, base: &mut Url) -> Result<(), AppError> {
        let display = base.to_string();
        base.path_segments_mut()
            .map_err(|_| AppError::InvalidUrl(format!("{display} cannot take path segments")))?
            .pop_if_empty()
            .extend(&self.segments);
        Ok(())
    }
}

pub fn batter_profile_route(batter: &str) -> Route {
    Route::new("batters").segment(batter).segment("profile")
}

pub fn batter_seasons_route(batter: &str) -> Route {
    batter_profile_route(batter).segment("seasons")
}

pub fn batter_recent_form_route(batter: &str) -> Route {
    Route::new("batters").segment(batter).segment("recent-form")
}

pub fn match_info_route(match_id: u64) -> Route {
    Route::new("matches").segment(match_id)
}

pub fn matchup_route(batter: &str, bowler: &str) -> Route {
    Route::new("matchups/batter")
        .segment(batter)
        .segment("bowler")
        .segment(bowler)
}

/// Ordered query parameters. Keys with an absent or empty value are never stored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct QueryParams {
    pairs: Vec<(&'static str, String)>,
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `key=value` unless the value renders to an empty string.
    pub fn with(mut self, key: &'static str, value: impl ToString) -> Self {
        let value = value.to_string();
        if !value.is_empty() {
            self.pairs.push((key, value));
        }
        self
    }

    /// Appends `key=value` only when a value is present and non-empty.
    pub fn with_opt<V: ToString>(self, key: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.with(key, value),
            None => self,
        }
    }

    pub fn pairs(&self) -> &[(&'static str, String)] {
        &self.pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_join_url_absolute_path() {
        assert_eq!(
            join_url("http://localhost:8000/api/v1", "https://other.example.com/x"),
            "https://other.example.com/x"
        );
    }

    fn applied(route: &Route) -> String {
        let mut url = Url::parse("http://localhost:8000/api/v1").unwrap();
        route.apply(&mut url).unwrap();
        url.path().to_string()
    }

    #[test]
    fn test_route_segments_are_trimmed_and_encoded() {
        assert_eq!(
            applied(&batter_profile_route("  V Kohli ")),
            "/api/v1/batters/V%20Kohli/profile"
        );
        assert_eq!(applied(&Route::new("x").segment("a/b")), "/api/v1/x/a%2Fb");
        assert_eq!(applied(&Route::new("x").segment("R Ashwin?")), "/api/v1/x/R%20Ashwin%3F");
        assert_eq!(applied(&Route::new("x").segment("50%")), "/api/v1/x/50%25");
        assert_eq!(applied(&Route::new("x").segment("é")), "/api/v1/x/%C3%A9");
    }

    #[test]
    fn test_route_onto_root_with_trailing_slash() {
        let mut url = Url::parse("http://localhost:8000/api/v1/").unwrap();
        match_info_route(335982).apply(&mut url).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8000/api/v1/matches/335982");
    }

    #[test]
    fn test_route_paths() {
        assert_eq!(
            batter_seasons_route(" V Kohli").segments(),
            &["batters", "V Kohli", "profile", "seasons"]
        );
        assert_eq!(
            applied(&batter_recent_form_route("V Kohli")),
            "/api/v1/batters/V%20Kohli/recent-form"
        );
        assert_eq!(
            applied(&matchup_route("V Kohli", "JJ Bumrah")),
            "/api/v1/matchups/batter/V%20Kohli/bowler/JJ%20Bumrah"
        );
    }

    #[test]
    fn test_query_params_skip_absent_and_empty() {
        let params = QueryParams::new()
            .with("matches", 5)
            .with_opt("season", None::<String>)
            .with_opt("venue", Some(""))
            .with("q", "")
            .with("include_phases", true);

        assert_eq!(
            params.pairs(),
            &[("matches", "5".to_string()), ("include_phases", "true".to_string())]
        );
    }

    #[test]
    fn test_query_params_keep_declaration_order() {
        let params = QueryParams::new()
            .with_opt("search", Some("Kohli"))
            .with("limit", 100)
            .with("offset", 0);

        let keys: Vec<_> = params.pairs().iter().map(|(k, _)| *k).collect();
        assert_eq!(keys, vec!["search", "limit", "offset"]);
    }
}
