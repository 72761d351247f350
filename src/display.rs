//! Plain-text rendering of API payloads for the command line.

use chrono::NaiveDate;
use std::fmt::Write;

use crate::controllers::BatchState;
use crate::data_fetcher::models::{
    BatterBowlerMatchupResponse, BatterProfileResponse, BatterRecentFormResponse,
    MatchInfoResponse, PhaseStats, SeasonProfile,
};

/// Shown in place of a missing statistic.
pub const MISSING: &str = "—";

/// Strike rate above which a matchup favours the batter.
const BATTER_ADVANTAGE_STRIKE_RATE: f64 = 120.0;

/// Two decimals, or [`MISSING`] when the batter was never dismissed.
pub fn format_average(average: Option<f64>) -> String {
    match average {
        Some(avg) => format!("{avg:.2}"),
        None => MISSING.to_string(),
    }
}

pub fn format_strike_rate(strike_rate: f64) -> String {
    format!("{strike_rate:.1}")
}

/// Thousands separated with commas: `7263` becomes `7,263`.
pub fn format_number(n: u32) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// `2008-04-18` becomes `18 Apr 2008`; anything else is returned unchanged.
pub fn format_match_date(date: &str) -> String {
    NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map(|d| d.format("%d %b %Y").to_string())
        .unwrap_or_else(|_| date.to_string())
}

/// Confidence bucket for a matchup score (0-100).
pub fn confidence_label(score: f64) -> &'static str {
    if score > 70.0 {
        "High"
    } else if score > 50.0 {
        "Medium"
    } else {
        "Low"
    }
}

/// Who a head-to-head record favours.
pub fn advantage(matchup: &BatterBowlerMatchupResponse) -> &'static str {
    if matchup.overall.strike_rate > BATTER_ADVANTAGE_STRIKE_RATE {
        "Batter"
    } else {
        "Bowler"
    }
}

fn phase_label(key: &str) -> &str {
    match key {
        "powerplay" => "Powerplay",
        "middle" => "Middle",
        "death" => "Death",
        other => other,
    }
}

fn phase_line(out: &mut String, label: &str, stats: &PhaseStats) {
    let _ = writeln!(
        out,
        "  {label:<10} {:>5} runs  SR {:>6}  Avg {}",
        stats.runs,
        format_strike_rate(stats.strike_rate),
        format_average(stats.average)
    );
}

pub fn render_profile(profile: &BatterProfileResponse) -> String {
    let career = &profile.career;
    let mut out = String::new();
    let _ = writeln!(out, "{}", profile.batter);
    let _ = writeln!(out, "Career Statistics");
    let _ = writeln!(
        out,
        "  Matches {}  Runs {}  Average {}  Strike Rate {:.2}  Highest {}",
        career.matches,
        format_number(career.runs),
        format_average(career.average),
        career.strike_rate,
        career
            .highest_score
            .map(|h| h.to_string())
            .unwrap_or_else(|| MISSING.to_string())
    );

    if !profile.phase_performance.is_empty() {
        let _ = writeln!(out, "Phase Performance");
        for (label, stats) in profile.phase_performance.phases() {
            phase_line(&mut out, label, stats);
        }
    }

    let d = &profile.dismissals;
    let _ = writeln!(out, "Dismissals");
    let _ = writeln!(
        out,
        "  Caught {}  Bowled {}  LBW {}  Stumped {}",
        d.caught, d.bowled, d.lbw, d.stumped
    );
    out
}

pub fn render_seasons(rows: &[SeasonProfile]) -> String {
    let mut out = String::from("By Season\n");
    for s in rows {
        let _ = writeln!(
            out,
            "  {:<8} Matches {:>3}  Runs {:>5}  Avg {:>6}  SR {:>6}",
            s.season,
            s.matches,
            s.runs,
            format_average(s.average),
            format_strike_rate(s.strike_rate)
        );
    }
    out
}

pub fn render_recent_form(form: &BatterRecentFormResponse) -> String {
    let mut out = String::new();
    if form.recent_matches.is_empty() {
        return out;
    }
    let summary = &form.summary;
    let _ = writeln!(out, "Recent Form (Last {})", summary.matches);
    let _ = writeln!(
        out,
        "  Runs {} ({} balls)  Avg {}  SR {}",
        summary.runs,
        summary.balls,
        format_average(summary.average),
        format_strike_rate(summary.strike_rate)
    );
    for m in &form.recent_matches {
        let _ = writeln!(
            out,
            "  #{:<8} {:<6} {:>3}{} ({} balls) at {}",
            m.match_id,
            m.season,
            m.runs,
            if m.dismissed { "" } else { "*" },
            m.balls,
            m.venue
        );
    }
    out
}

pub fn render_matchup(matchup: &BatterBowlerMatchupResponse) -> String {
    let overall = &matchup.overall;
    let mut out = String::new();
    let _ = writeln!(out, "{} vs {}", matchup.batter, matchup.bowler);
    if let Some(score) = overall.confidence_score {
        let _ = writeln!(
            out,
            "Confidence Score {score:.0} ({})",
            confidence_label(score)
        );
    }
    let _ = writeln!(
        out,
        "  Total Runs {} ({} balls)  Strike Rate {}  Dismissals {}  Average {}",
        overall.runs,
        overall.balls,
        format_strike_rate(overall.strike_rate),
        overall.dismissals,
        format_average(overall.average)
    );

    if let Some(phases) = matchup.phase_breakdown.as_ref().filter(|p| !p.is_empty()) {
        let _ = writeln!(out, "Phase-wise Performance");
        for (key, stats) in phases {
            phase_line(&mut out, phase_label(key), stats);
        }
    }

    if !matchup.recent_encounters.is_empty() {
        let _ = writeln!(out, "Recent Encounters");
        for enc in &matchup.recent_encounters {
            let _ = writeln!(
                out,
                "  #{:<8} {:<6} {} runs, {} balls  {}",
                enc.match_id,
                enc.season,
                enc.runs,
                enc.balls,
                if enc.dismissed { "Out" } else { "Not Out" }
            );
        }
    }
    out
}

/// One line per bowler, aligned with the batch result.
pub fn render_compare(
    batter: &str,
    bowlers: &[String],
    state: &BatchState<BatterBowlerMatchupResponse>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Batter: {batter}");
    for (i, bowler) in bowlers.iter().enumerate() {
        let data = state.data.get(i).and_then(Option::as_ref);
        let error = state.errors.get(i).and_then(Option::as_deref);
        match (data, error) {
            (_, Some(error)) => {
                let _ = writeln!(out, "  {bowler:<20} failed: {error}");
            }
            (Some(m), None) => {
                let _ = writeln!(
                    out,
                    "  {:<20} {:<6}  Runs {:>4} ({} balls)  SR {:>6}  Dismissals {}",
                    m.bowler,
                    advantage(m),
                    m.overall.runs,
                    m.overall.balls,
                    format_strike_rate(m.overall.strike_rate),
                    m.overall.dismissals
                );
            }
            (None, None) => {}
        }
    }
    if state.has_errors() {
        let _ = writeln!(out, "Some matchups could not be loaded.");
    }
    out
}

pub fn render_match_info(info: &MatchInfoResponse) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Match {}", info.match_id);
    let _ = writeln!(out, "  Season  {}", info.season);
    let _ = writeln!(out, "  Venue   {}", info.venue);
    if let Some(date) = info.date.as_deref().filter(|d| !d.is_empty()) {
        let _ = writeln!(out, "  Date    {}", format_match_date(date));
    }
    if let Some(teams) = info.teams.as_ref().filter(|t| !t.is_empty()) {
        let _ = writeln!(out, "  Teams   {}", join_entries(teams));
    }
    if let Some(toss) = info.toss.as_ref().filter(|t| !t.is_empty()) {
        let _ = writeln!(out, "  Toss    {}", join_entries(toss));
    }
    out
}

fn join_entries(map: &std::collections::BTreeMap<String, String>) -> String {
    map.iter()
        .map(|(k, v)| format!("{k}: {v}"))
        .collect::<Vec<_>>()
        .join(" • ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing_utils::TestDataBuilder;

    #[test]
    fn test_format_average() {
        assert_eq!(format_average(None), "—");
        assert_eq!(format_average(Some(36.5)), "36.50");
        assert_eq!(format_average(Some(0.0)), "0.00");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(7263), "7,263");
        assert_eq!(format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn test_format_match_date() {
        assert_eq!(format_match_date("2008-04-18"), "18 Apr 2008");
        assert_eq!(format_match_date("sometime"), "sometime");
    }

    #[test]
    fn test_confidence_label_buckets() {
        assert_eq!(confidence_label(80.0), "High");
        assert_eq!(confidence_label(70.0), "Medium");
        assert_eq!(confidence_label(50.0), "Low");
    }

    #[test]
    fn test_render_profile_sections() {
        let text = render_profile(&TestDataBuilder::profile("V Kohli"));
        assert!(text.starts_with("V Kohli\n"));
        assert!(text.contains("Runs 7,263"));
        assert!(text.contains("Powerplay"));
        assert!(!text.contains("Middle"));
        assert!(text.contains("Caught 120"));
    }

    #[test]
    fn test_render_compare_marks_failures() {
        let state = BatchState {
            data: vec![
                None,
                Some(TestDataBuilder::matchup("V Kohli", "RA Jadeja", 80)),
            ],
            errors: vec![Some("connection refused".to_string()), None],
            error_codes: vec![Some("NETWORK_ERROR".to_string()), None],
            is_loading: false,
        };
        let bowlers = vec!["JJ Bumrah".to_string(), "RA Jadeja".to_string()];

        let text = render_compare("V Kohli", &bowlers, &state);

        let lines: Vec<_> = text.lines().collect();
        assert!(lines[1].trim_start().starts_with("JJ Bumrah"));
        assert!(lines[1].ends_with("failed: connection refused"));
        assert!(lines[2].contains("RA Jadeja"));
        assert!(lines[2].contains("Batter"));
        assert!(text.ends_with("Some matchups could not be loaded.\n"));
    }

    #[test]
    fn test_render_match_info_joins_entries() {
        let text = render_match_info(&TestDataBuilder::match_info(335982));
        assert!(text.contains("Date    18 Apr 2008"));
        assert!(text.contains("team1: Kolkata Knight Riders • team2: Royal Challengers Bangalore"));
    }
}
