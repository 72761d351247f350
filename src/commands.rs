use std::fmt::Write;
use std::future::Future;
use std::time::Duration;
use tracing::{info, warn};

use crate::cli::{Args, Command};
use crate::config::Config;
use crate::constants::compare::MAX_BOWLERS;
use crate::controllers::{MatchQuery, Query, SearchQuery};
use crate::data_fetcher::api::{ListPlayersParams, StatsClient};
use crate::display;
use crate::error::{AppError, is_retryable_code};
use crate::session::{
    BatterProfileSession, CompareMatchupsSession, MatchContextSession, MatchupSearchSession,
    ScreenStatus,
};

const INITIAL_BACKOFF: Duration = Duration::from_millis(250);

/// Validates command line argument combinations.
///
/// Returns an error for input that can never produce a request.
pub fn validate_args(args: &Args) -> Result<(), AppError> {
    match &args.command {
        Some(Command::Compare { bowlers, .. }) if bowlers.len() > MAX_BOWLERS => {
            Err(AppError::invalid_argument(format!(
                "At most {MAX_BOWLERS} bowlers can be compared, got {}",
                bowlers.len()
            )))
        }
        Some(Command::Match { match_id }) if MatchQuery::parse(match_id).is_none() => Err(
            AppError::invalid_argument(format!("Match id must be a positive integer: {match_id}")),
        ),
        _ => Ok(()),
    }
}

/// Handles the --list-config command.
pub async fn handle_list_config_command() -> Result<(), AppError> {
    Config::display().await
}

/// Runs one subcommand and returns the text to print.
///
/// Request failures of the screen-style commands (profile, matchup, compare, match)
/// are rendered into the output; failures of the plain lookups are returned as errors.
pub async fn execute(command: &Command, config: &Config, retry: bool) -> Result<String, AppError> {
    let client = StatsClient::new(config)?;
    info!("Running {:?} against {}", command, client.api_root());

    match command {
        Command::Profile { batter, season } => {
            profile(&client, config, retry, batter, season.clone()).await
        }
        Command::Matchup {
            batter,
            bowler,
            season,
        } => matchup(&client, config, retry, batter, bowler, season.clone()).await,
        Command::Compare { batter, bowlers } => {
            compare(&client, config, retry, batter, bowlers).await
        }
        Command::Match { match_id } => match_info(&client, config, retry, match_id).await,
        Command::Search { query, limit } => {
            let mut search = SearchQuery::new(query.as_str());
            search.limit = *limit;
            let Some(search) = search.normalize() else {
                return Ok("Enter at least 2 characters to search.\n".to_string());
            };
            let response = with_retries(retry, config.max_retries, || {
                client.search_players(&search.text, search.limit)
            })
            .await?;
            Ok(response
                .players
                .iter()
                .map(|p| format!("{}\n", p.name))
                .collect())
        }
        Command::Players {
            search,
            limit,
            offset,
        } => {
            let params = ListPlayersParams {
                search: search.clone(),
                limit: *limit,
                offset: *offset,
            };
            let response =
                with_retries(retry, config.max_retries, || client.list_players(&params)).await?;
            let mut out: String = response.players.iter().map(|p| format!("{p}\n")).collect();
            let shown_to = response.offset as usize + response.players.len();
            let _ = writeln!(
                out,
                "Showing {}-{} of {}",
                (response.offset as usize + 1).min(shown_to),
                shown_to,
                response.total
            );
            Ok(out)
        }
        Command::Seasons => {
            let response = with_retries(retry, config.max_retries, || client.seasons()).await?;
            Ok(response.seasons.iter().map(|s| format!("{s}\n")).collect())
        }
        Command::Health => {
            let health = with_retries(retry, config.max_retries, || client.health()).await?;
            Ok(format!(
                "status: {}\ndatabase: {}\nversion: {}\n",
                health.status, health.database, health.version
            ))
        }
    }
}

async fn profile(
    client: &StatsClient,
    config: &Config,
    retry: bool,
    batter: &str,
    season: Option<String>,
) -> Result<String, AppError> {
    let mut session = BatterProfileSession::new(client, config);
    session.select_batter(batter);
    if season.is_some() {
        session.select_season(season);
    }
    session.settle().await;

    if retry {
        for attempt in 0..config.max_retries {
            let state = session.profile().state();
            if state.data.is_some() || !is_retryable_code(state.error_code.as_deref()) {
                break;
            }
            backoff(attempt).await;
            session.retry();
            session.settle().await;
        }
    }

    let mut out = String::new();
    match session.status() {
        ScreenStatus::Failed { message, .. } => {
            let _ = writeln!(out, "Error: {message}");
        }
        _ => {
            if let Some(profile) = session.profile().state().data {
                out.push_str(&display::render_profile(&profile));
            }
            match session.season_notice() {
                Some(notice) => {
                    let _ = writeln!(out, "{notice}");
                }
                None => out.push_str(&display::render_seasons(&session.season_rows())),
            }
            if let Some(form) = session.recent_form().state().data {
                out.push_str(&display::render_recent_form(&form));
            }
        }
    }
    Ok(out)
}

async fn matchup(
    client: &StatsClient,
    config: &Config,
    retry: bool,
    batter: &str,
    bowler: &str,
    season: Option<String>,
) -> Result<String, AppError> {
    let mut session = MatchupSearchSession::new(client, config);
    session.set_batter_text(batter);
    session.set_bowler_text(bowler);
    session.select_season(season);
    session.analyze();
    session.settle().await;

    if retry {
        for attempt in 0..config.max_retries {
            let state = session.matchup().state();
            if state.data.is_some() || !is_retryable_code(state.error_code.as_deref()) {
                break;
            }
            backoff(attempt).await;
            session.retry();
            session.settle().await;
        }
    }

    Ok(match (session.status(), session.result()) {
        (ScreenStatus::Failed { message, .. }, _) => format!("Error: {message}\n"),
        (_, Some(result)) => display::render_matchup(&result),
        _ => String::new(),
    })
}

async fn compare(
    client: &StatsClient,
    config: &Config,
    retry: bool,
    batter: &str,
    bowlers: &[String],
) -> Result<String, AppError> {
    let mut session = CompareMatchupsSession::new(client, config);
    session.select_batter(batter);
    for bowler in bowlers {
        if !session.add_bowler(bowler) {
            warn!("Skipping bowler {bowler:?}");
        }
    }
    let mut state = session.settle().await;

    if retry {
        for attempt in 0..config.max_retries {
            let retryable = state
                .error_codes
                .iter()
                .any(|code| is_retryable_code(code.as_deref()));
            if !retryable {
                break;
            }
            backoff(attempt).await;
            session.retry();
            state = session.settle().await;
        }
    }

    Ok(display::render_compare(
        session.batter().unwrap_or(batter),
        session.bowlers(),
        &state,
    ))
}

async fn match_info(
    client: &StatsClient,
    config: &Config,
    retry: bool,
    match_id: &str,
) -> Result<String, AppError> {
    let mut session = MatchContextSession::new(client);
    session.set_input(match_id);
    if !session.load() {
        return Err(AppError::invalid_argument(format!(
            "Match id must be a positive integer: {match_id}"
        )));
    }
    session.settle().await;

    if retry {
        for attempt in 0..config.max_retries {
            let state = session.controller().state();
            if state.data.is_some() || !is_retryable_code(state.error_code.as_deref()) {
                break;
            }
            backoff(attempt).await;
            session.retry();
            session.settle().await;
        }
    }

    Ok(match (session.status(), session.data()) {
        (ScreenStatus::Failed { message, .. }, _) => format!("Error: {message}\n"),
        (_, Some(info)) => display::render_match_info(&info),
        _ => String::new(),
    })
}

fn backoff_delay(attempt: u32) -> Duration {
    INITIAL_BACKOFF.saturating_mul(2u32.saturating_pow(attempt))
}

async fn backoff(attempt: u32) {
    let delay = backoff_delay(attempt);
    warn!("Retrying in {delay:?} (attempt {})", attempt + 1);
    tokio::time::sleep(delay).await;
}

/// Runs `op`, repeating it on retryable errors when `enabled`.
async fn with_retries<T, F, Fut>(enabled: bool, max: u32, mut op: F) -> Result<T, AppError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, AppError>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if enabled && attempt < max && e.is_retryable() => {
                backoff(attempt).await;
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}
