use std::collections::BTreeSet;
use std::fmt::Write as _;

use chrono::{DateTime, Local, TimeZone};
use colored::Colorize;

use crate::analytics::{AuthorCount, Granularity, TimeBucket};
use crate::domain::{EloChange, Event, PreferenceEvent, ReportEvent};
use crate::rating::HypotheticalLeaderboard;

const BAR_WIDTH: usize = 40;

fn local_time(seconds: i64) -> Option<DateTime<Local>> {
    Local.timestamp_opt(seconds, 0).single()
}

/// Axis label for a bucket start
pub fn format_bucket_time(time: i64, granularity: Granularity) -> String {
    let Some(date) = local_time(time) else {
        return time.to_string();
    };

    match granularity {
        Granularity::Minute => date.format("%b %e %H:%M").to_string(),
        Granularity::Hour => date.format("%b %e %H:00").to_string(),
        Granularity::Day => date.format("%b %e").to_string(),
        Granularity::Week => format!("Week of {}", date.format("%b %e")),
    }
}

pub fn format_timestamp(timestamp: Option<f64>) -> String {
    timestamp
        .and_then(|ts| local_time(ts.floor() as i64))
        .map(|date| date.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "Unknown time".to_string())
}

/// Signed delta right-aligned to `width`, colored by sign
pub fn format_delta(delta: f64, width: usize) -> String {
    let text = if delta > 0.0 {
        format!("+{:.0}", delta)
    } else {
        format!("{:.0}", delta)
    };
    let text = format!("{:>width$}", text);

    if delta > 0.0 {
        text.green().to_string()
    } else if delta < 0.0 {
        text.red().to_string()
    } else {
        text.dimmed().to_string()
    }
}

fn format_elo_change(change: &EloChange) -> String {
    let delta = change.delta();
    let diff = format!("({}{:.1})", if delta >= 0.0 { "+" } else { "" }, delta);
    let diff = if delta >= 0.0 { diff.green() } else { diff.red() };
    format!("{}: {:.0} -> {:.0} {}", change.team_id, change.before, change.after, diff)
}

fn render_preference(out: &mut String, preference: &PreferenceEvent) {
    let (first_name, second_name) = preference.names();
    let line = format!(
        "[preference] {} ({}) vs {} ({}) | score {:.2} | {} | {}",
        first_name,
        preference.games.0,
        second_name,
        preference.games.1,
        preference.first_score,
        preference.author,
        format_timestamp(preference.timestamp)
    );

    if preference.counted {
        let _ = writeln!(out, "{}", line);
    } else {
        let _ = writeln!(out, "{} {}", line.dimmed(), "(not counted)".dimmed());
    }

    for change in &preference.elo_changes {
        let _ = writeln!(out, "    {}", format_elo_change(change));
    }
}

fn render_report(out: &mut String, report: &ReportEvent) {
    let _ = writeln!(
        out,
        "[report] {} ({}) | reason {} | {} | {} | {}",
        report.game_name,
        report.game_id,
        report.short_reason.as_str().yellow(),
        report.reporter,
        report.report_url,
        format_timestamp(report.timestamp)
    );
}

/// Event log, newest entries as served by the backend
pub fn render_history(events: &[Event], limit: Option<usize>) -> String {
    if events.is_empty() {
        return "No history found.\n".to_string();
    }

    let mut out = String::new();
    for event in events.iter().take(limit.unwrap_or(usize::MAX)) {
        match event {
            Event::Preference(preference) => render_preference(&mut out, preference),
            Event::Report(report) => render_report(&mut out, report),
        }
    }
    out
}

pub fn render_authors(top_authors: &[AuthorCount], shown: usize, selected: &BTreeSet<String>) -> String {
    let mut out = String::new();

    for entry in top_authors.iter().take(shown) {
        let label = format!("{} ({})", entry.author, entry.count);
        if selected.contains(&entry.author) {
            let _ = writeln!(out, "* {}", label.green());
        } else {
            let _ = writeln!(out, "  {}", label);
        }
    }

    if top_authors.len() > shown {
        let _ = writeln!(out, "  +{} more", top_authors.len() - shown);
    }
    out
}

/// Text area chart: one row per bucket, selected share drawn over the total
pub fn render_chart(buckets: &[TimeBucket], selected_label: Option<&str>, granularity: Granularity) -> String {
    if buckets.is_empty() {
        return "No timestamped events.\n".to_string();
    }

    let max = buckets.iter().map(|b| b.all).max().unwrap_or(1).max(1);
    let mut out = String::new();

    let _ = writeln!(
        out,
        "Activity per {} (all{})",
        granularity.as_str(),
        selected_label.map(|l| format!(" vs {}", l)).unwrap_or_default()
    );

    for bucket in buckets {
        let all_width = bucket.all * BAR_WIDTH / max;
        let selected_width = bucket.selected * BAR_WIDTH / max;
        let bar = format!(
            "{}{}",
            "#".repeat(selected_width).green(),
            ".".repeat(all_width.saturating_sub(selected_width))
        );

        let counts = match selected_label {
            Some(_) => format!("{:>5} {:>5}", bucket.all, bucket.selected),
            None => format!("{:>5}", bucket.all),
        };
        let _ = writeln!(out, "{:<20} {} {}", format_bucket_time(bucket.time, granularity), counts, bar);
    }
    out
}

pub fn render_leaderboard(board: &HypotheticalLeaderboard) -> String {
    if board.excluded_count == 0 {
        return "No authors excluded.\n".to_string();
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Simulated Leaderboard (excluding {} author{})",
        board.excluded_count,
        if board.excluded_count == 1 { "" } else { "s" }
    );
    let _ = writeln!(out, "{:>4}  {:<32} {:>8} {:>8} {:>6}", "#", "Game", "ELO", "Actual", "Delta");

    for (index, entry) in board.entries.iter().enumerate() {
        let actual = entry
            .actual_elo
            .map(|elo| format!("{:.0}", elo))
            .unwrap_or_else(|| "-".to_string());
        let delta = entry
            .delta
            .map(|d| format_delta(d, 6))
            .unwrap_or_else(|| format!("{:>6}", "-"));
        // Pad before styling, escape codes would count towards the width
        let name = format!("{:<32}", format!("{} [{}]", entry.game_name, entry.game_id));
        let name = if entry.owned_by_excluded {
            name.magenta().to_string()
        } else if entry.is_affected() {
            name.yellow().to_string()
        } else {
            name
        };

        let _ = writeln!(
            out,
            "{:>4}  {} {:>8.0} {:>8} {}",
            index + 1,
            name,
            entry.simulated_elo,
            actual,
            delta
        );
    }

    let _ = writeln!(
        out,
        "{} of {} games moved",
        board.affected().count(),
        board.entries.len()
    );
    out
}

/// Autocomplete list for the author filter
pub fn render_suggestions(found: &[&AuthorCount]) -> String {
    let mut out = String::new();
    for entry in found {
        let _ = writeln!(out, "{} ({})", entry.author, entry.count);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ShortReason;
    use crate::rating::LeaderboardEntry;

    fn strip_ansi(text: &str) -> String {
        let mut out = String::new();
        let mut in_escape = false;
        for c in text.chars() {
            match c {
                '\u{1b}' => in_escape = true,
                'm' if in_escape => in_escape = false,
                _ if in_escape => {}
                _ => out.push(c),
            }
        }
        out
    }

    #[test]
    fn test_format_timestamp_unknown() {
        assert_eq!(format_timestamp(None), "Unknown time");
        assert_ne!(format_timestamp(Some(1_700_000_000.0)), "Unknown time");
    }

    #[test]
    fn test_week_label() {
        assert!(format_bucket_time(604_800, Granularity::Week).starts_with("Week of "));
    }

    #[test]
    fn test_format_delta_sign() {
        assert!(format_delta(12.4, 0).contains("+12"));
        assert!(format_delta(-3.2, 0).contains("-3"));
        assert!(!format_delta(0.0, 0).contains('+'));
        assert!(format_delta(-3.2, 6).contains("    -3"));
    }

    #[test]
    fn test_render_history() {
        let events = vec![
            Event::Report(ReportEvent {
                game_id: "g1".into(),
                game_name: "Snake".into(),
                reporter: "r@x.org".into(),
                short_reason: ShortReason::Unclear,
                timestamp: None,
                report_url: "/report/g1/1".into(),
            }),
            Event::Preference(PreferenceEvent {
                games: ("g1".into(), "g2".into()),
                game_names: Some(("Snake".into(), "Tetris".into())),
                first_score: 0.5,
                author: "a@x.org".into(),
                author_team: None,
                timestamp: None,
                elo_changes: vec![EloChange {
                    team_id: "g1".into(),
                    before: 1000.0,
                    after: 990.0,
                }],
                counted: false,
            }),
        ];

        let text = render_history(&events, None);
        assert!(text.contains("Snake (g1)"));
        assert!(text.contains("Unknown time"));
        assert!(text.contains("not counted"));
        assert!(text.contains("-10.0"));

        let first_only = render_history(&events, Some(1));
        assert!(!first_only.contains("Tetris"));
        assert_eq!(render_history(&[], None), "No history found.\n");
    }

    #[test]
    fn test_render_authors_truncates() {
        let top: Vec<AuthorCount> = (0..12)
            .map(|i| AuthorCount {
                author: format!("author{}", i),
                count: 12 - i,
            })
            .collect();

        let text = render_authors(&top, 10, &BTreeSet::new());

        assert!(text.contains("author9 (3)"));
        assert!(!text.contains("author10"));
        assert!(text.contains("+2 more"));
    }

    #[test]
    fn test_render_leaderboard() {
        let board = HypotheticalLeaderboard {
            entries: vec![
                LeaderboardEntry {
                    game_id: "b".into(),
                    game_name: "Game B".into(),
                    simulated_elo: 1016.0,
                    actual_elo: Some(1001.5),
                    delta: Some(14.5),
                    owned_by_excluded: false,
                },
                LeaderboardEntry {
                    game_id: "c".into(),
                    game_name: "Game C".into(),
                    simulated_elo: 1000.0,
                    actual_elo: None,
                    delta: None,
                    owned_by_excluded: true,
                },
            ],
            excluded_count: 1,
        };

        let text = render_leaderboard(&board);

        assert!(text.contains("excluding 1 author)"));
        assert!(text.contains("Game B [b]"));
        assert!(text.contains("Game C [c]"));
        assert!(text.contains("1 of 2 games moved"));

        colored::control::set_override(true);
        let styled = strip_ansi(&render_leaderboard(&board));
        colored::control::unset_override();
        let lines: Vec<&str> = styled.lines().collect();
        assert_eq!(lines[1][39..47].trim(), "ELO");
        assert_eq!(lines[2][39..47].trim(), "1016");
        assert_eq!(lines[3][39..47].trim(), "1000");
        assert_eq!(lines[2].len(), lines[1].len());
        assert!(lines[2][57..].trim_start().starts_with("+1"));
        assert_eq!(&lines[3][57..], "     -");

        let empty = HypotheticalLeaderboard {
            entries: Vec::new(),
            excluded_count: 0,
        };
        assert_eq!(render_leaderboard(&empty), "No authors excluded.\n");
    }

    #[test]
    fn test_render_chart() {
        let buckets = vec![
            TimeBucket { time: 0, all: 4, selected: 1 },
            TimeBucket { time: 3_600, all: 2, selected: 0 },
        ];

        let text = render_chart(&buckets, Some("x"), Granularity::Hour);

        assert!(text.starts_with("Activity per hour (all vs x)"));
        assert_eq!(text.lines().count(), 3);
        assert_eq!(render_chart(&[], None, Granularity::Hour), "No timestamped events.\n");
    }
}
