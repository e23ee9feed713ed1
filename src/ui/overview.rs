//! Line builders for the overview tab: overview card with the activity chart, stat cards, and the
//! top posts list. Each slice shows one of loading / error / empty / populated, and whatever it
//! held before stays visible under a loading or error caption.

use crate::analytics_client::api::{ActivityDay, TopPost};
use crate::chart::{self, Bar};
use crate::fetchable::{Fetchable, IsEmpty, Status};
use crate::format;
use crate::selection::ActivityMetric;
use crate::store::Store;
use crate::ui::lines::{fit, footer, spread, wrapped};
use crate::ui::theme;
use crate::ui_framework::scroll_buffer::{Line, TextSegment};
use crossterm::style::{Attribute, Colors};

pub const CHART_ROWS: u16 = 8;
pub const BAR_COLUMN_WIDTH: usize = 7;
const CARD_WIDTH: usize = 18;
const RANGE_CHIPS: [&str; 5] = ["7D", "2W", "4W", "3M", "1Y"];

pub const NO_ACTIVITY: &str = "No recent activity yet for this fid.";
pub const NO_POSTS: &str = "No posts found yet for this fid.";

pub fn overview_lines(store: &Store, metric: ActivityMetric, width: usize) -> Vec<Line> {
    let mut lines = Vec::new();

    lines.push(range_bar(width));
    lines.push(vec![]);
    overview_card(&mut lines, store, metric, width);
    lines.push(vec![]);
    stat_cards(&mut lines, store, width);
    lines.push(vec![]);
    top_posts(&mut lines, store, width);
    lines.push(vec![]);
    lines.push(footer(width));

    lines
}

fn range_bar(width: usize) -> Line {
    let chips = RANGE_CHIPS
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let chip = format!(" {label} ");
            if i == 0 {
                TextSegment::color(&chip, Colors::new(theme::BACKGROUND, theme::TEXT))
            } else {
                TextSegment::fg(&chip, theme::SUBTLE)
            }
        })
        .collect();
    spread(
        vec![TextSegment::bold("Account overview", theme::TEXT)],
        chips,
        width,
    )
}

/// Caption for a slice that is loading or failed; `None` once it settled.
fn status_caption<T: IsEmpty>(slice: &Fetchable<T>, loading: &str) -> Option<Line> {
    match slice.status() {
        Status::Loading => Some(vec![TextSegment::fg(loading, theme::MUTED)]),
        Status::Failed(reason) => Some(vec![TextSegment::fg(reason, theme::ERROR)]),
        Status::Empty | Status::Populated(_) => None,
    }
}

fn overview_card(lines: &mut Vec<Line>, store: &Store, metric: ActivityMetric, width: usize) {
    {
        let summary = store.summary.lock().unwrap();
        let resp = summary.data();

        let title = match resp {
            Some(resp) => format!("@{} – Overview", resp.account.handle),
            None => "Loading overview…".to_string(),
        };
        let subtitle = match resp {
            Some(resp) => format!(
                "{} • Account age: {} days",
                resp.summary.range, resp.summary.account_age_days
            ),
            None => "Fetching summary…".to_string(),
        };

        lines.push(spread(
            vec![TextSegment::bold(&title, theme::TEXT)],
            vec![TextSegment::fg(
                &format!("Daily · {}", metric.label()),
                theme::SUBTLE,
            )],
            width,
        ));
        lines.push(vec![TextSegment::fg(&subtitle, theme::SUBTLE)]);

        if let Some(best) = resp.and_then(|resp| resp.highlights.best_day_impressions.as_ref()) {
            lines.push(vec![TextSegment::fg(
                &format!(
                    "Best day: {} · {} impressions",
                    format::day_label(&best.date),
                    format::count(best.impressions)
                ),
                theme::SUBTLE,
            )]);
        }
    }

    lines.push(vec![]);
    lines.push(metric_toggle(metric));
    lines.push(vec![]);

    let activity = store.activity.lock().unwrap();
    if let Some(caption) = status_caption(&activity, "Loading activity…") {
        lines.push(caption);
    }
    match activity.status() {
        Status::Empty => lines.push(vec![TextSegment::fg(NO_ACTIVITY, theme::MUTED)]),
        Status::Populated(days) => lines.extend(chart_lines(days, metric, width)),
        Status::Loading | Status::Failed(_) => {
            if let Some(days) = activity.data().filter(|days| !days.is_empty()) {
                lines.extend(chart_lines(days, metric, width));
            }
        }
    }
}

fn metric_toggle(metric: ActivityMetric) -> Line {
    [ActivityMetric::PostCount, ActivityMetric::Engagements]
        .iter()
        .map(|option| {
            let label = format!(" {} ", option.label());
            if *option == metric {
                TextSegment::new(
                    &label,
                    Colors::new(theme::TEXT, theme::BRAND),
                    Attribute::Bold.into(),
                )
            } else {
                TextSegment::fg(&label, theme::SUBTLE)
            }
        })
        .collect()
}

/// Vertical bars, most recent days last; days that don't fit the width are dropped from the front.
/// Scaling is always over the whole series.
pub fn chart_lines(days: &[ActivityDay], metric: ActivityMetric, width: usize) -> Vec<Line> {
    let bars = chart::bars(days, metric);
    let fit_count = (width / BAR_COLUMN_WIDTH).max(1);
    let visible: &[Bar] = &bars[bars.len().saturating_sub(fit_count)..];

    let mut lines: Vec<Line> = (0..CHART_ROWS)
        .rev()
        .map(|row| {
            visible
                .iter()
                .map(|bar| {
                    let cell = if chart::bar_rows(bar.height_percent, CHART_ROWS) > row {
                        format!("{:^w$}", "██", w = BAR_COLUMN_WIDTH)
                    } else {
                        " ".repeat(BAR_COLUMN_WIDTH)
                    };
                    TextSegment::fg(&cell, theme::BAR)
                })
                .collect()
        })
        .collect();

    lines.push(
        visible
            .iter()
            .map(|bar| {
                TextSegment::fg(&chart_cell(&format::count(bar.value)), theme::SUBTLE)
            })
            .collect(),
    );
    lines.push(
        visible
            .iter()
            .map(|bar| {
                TextSegment::fg(&chart_cell(&bar.label), theme::MUTED)
            })
            .collect(),
    );

    lines
}

/// Centered in one bar column; anything wider is clipped so later columns stay under their bars.
fn chart_cell(text: &str) -> String {
    fit(&format!("{text:^w$}", w = BAR_COLUMN_WIDTH), BAR_COLUMN_WIDTH)
}

struct StatCard {
    label: &'static str,
    main: String,
    sub: Option<String>,
}

fn stat_cards(lines: &mut Vec<Line>, store: &Store, width: usize) {
    let summary = store.summary.lock().unwrap();
    if let Some(caption) = status_caption(&summary, "Loading summary…") {
        lines.push(caption);
    }

    let stats = summary.data().map(|resp| &resp.summary);
    let main = |value: Option<String>| value.unwrap_or_else(|| format::PLACEHOLDER.to_string());

    let cards = [
        StatCard {
            label: "Followers",
            main: main(stats.map(|s| format::count(s.follower_count))),
            sub: stats.map(|s| format!("{} total", format::count(s.follower_count))),
        },
        StatCard {
            label: "Total casts",
            main: main(stats.map(|s| format::count(s.total_casts))),
            sub: None,
        },
        StatCard {
            label: "Impressions",
            main: main(stats.map(|s| format::count(s.total_impressions))),
            sub: None,
        },
        StatCard {
            label: "Engagements",
            main: main(stats.map(|s| format::count(s.total_engagements))),
            sub: None,
        },
        StatCard {
            label: "Engagement rate",
            main: main(stats.map(|s| format::percent(s.avg_engagement_rate_percent))),
            sub: None,
        },
    ];

    if width >= CARD_WIDTH * cards.len() {
        let mut labels = Vec::new();
        let mut values = Vec::new();
        let mut subs = Vec::new();
        for card in &cards {
            labels.push(TextSegment::fg(&fit(card.label, CARD_WIDTH), theme::SUBTLE));
            values.push(TextSegment::bold(&fit(&card.main, CARD_WIDTH), theme::TEXT));
            subs.push(TextSegment::fg(
                &fit(card.sub.as_deref().unwrap_or(""), CARD_WIDTH),
                theme::MUTED,
            ));
        }
        lines.push(labels);
        lines.push(values);
        if cards.iter().any(|card| card.sub.is_some()) {
            lines.push(subs);
        }
    } else {
        for card in &cards {
            let mut line = vec![
                TextSegment::fg(&fit(card.label, CARD_WIDTH), theme::SUBTLE),
                TextSegment::bold(&card.main, theme::TEXT),
            ];
            if let Some(sub) = &card.sub {
                line.push(TextSegment::fg(&format!(" {sub}"), theme::MUTED));
            }
            lines.push(line);
        }
    }
}

fn top_posts(lines: &mut Vec<Line>, store: &Store, width: usize) {
    lines.push(spread(
        vec![TextSegment::bold("Top posts (by engagements)", theme::TEXT)],
        vec![TextSegment::fg("Recent", theme::MUTED)],
        width,
    ));

    let top_posts = store.top_posts.lock().unwrap();
    if let Some(caption) = status_caption(&top_posts, "Loading top posts…") {
        lines.push(caption);
    }
    match top_posts.status() {
        Status::Empty => lines.push(vec![TextSegment::fg(NO_POSTS, theme::MUTED)]),
        Status::Populated(posts) => lines.extend(post_lines(posts, width)),
        Status::Loading | Status::Failed(_) => {
            if let Some(posts) = top_posts.data() {
                lines.extend(post_lines(posts, width));
            }
        }
    }
}

fn post_lines(posts: &[TopPost], width: usize) -> Vec<Line> {
    let mut lines = Vec::new();

    for post in posts {
        lines.push(vec![TextSegment::fg(&"─".repeat(width), theme::MUTED)]);

        let text = format::post_text(post.text.as_deref());
        lines.extend(wrapped(&format::collapse_newlines(&text), width, theme::TEXT));

        lines.push(spread(
            vec![TextSegment::fg(
                &format::post_timestamp(&post.created_at),
                theme::MUTED,
            )],
            vec![TextSegment::fg(
                &format!(
                    "{} impressions · {} engagements",
                    format::count(post.impressions),
                    format::count(post.engagements)
                ),
                theme::MUTED,
            )],
            width,
        ));
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytics_client::{ClientError, Endpoint, Fid};
    use crate::store::tests::{summary, ScriptedSource};
    use crate::ui::lines::display_width;
    use crate::ui_framework::scroll_buffer::line_text;
    use std::sync::Arc;

    fn store() -> Store {
        Store::new(Arc::new(ScriptedSource::default()), Fid::default(), 5)
    }

    fn text(lines: &[Line]) -> Vec<String> {
        lines.iter().map(|line| line_text(line)).collect()
    }

    fn day(date: &str, post_count: u64, engagements: u64) -> ActivityDay {
        ActivityDay {
            date: date.to_string(),
            post_count,
            engagements,
        }
    }

    #[test]
    fn test_before_anything_loads() {
        let store = store();
        store.start_cycle(Fid::default());
        let lines = text(&overview_lines(&store, ActivityMetric::PostCount, 100));

        assert!(lines.iter().any(|l| l.starts_with("Loading overview…")));
        assert!(lines.iter().any(|l| l == "Fetching summary…"));
        assert!(lines.iter().any(|l| l == "Loading activity…"));
        assert!(lines.iter().any(|l| l == "Loading summary…"));
        assert!(lines.iter().any(|l| l == "Loading top posts…"));
        // NB: loading takes priority over the empty state
        assert!(!lines.iter().any(|l| l == NO_ACTIVITY || l == NO_POSTS));
    }

    #[test]
    fn test_populated_summary() {
        let store = store();
        store.summary.lock().unwrap().resolve(summary("774643"));
        let lines = text(&overview_lines(&store, ActivityMetric::Engagements, 100));

        assert!(lines.iter().any(|l| l.starts_with("@user774643 – Overview") && l.ends_with("Daily · Engagements")));
        assert!(lines.iter().any(|l| l == "Last 7 days • Account age: 321 days"));

        let values = lines
            .iter()
            .find(|l| l.contains("12,345"))
            .expect("stat card values");
        assert!(values.contains("1,500"));
        assert!(values.contains("5.5%"));
        assert!(lines.iter().any(|l| l.contains("1,500 total")));
    }

    #[test]
    fn test_stat_cards_without_summary_use_placeholder() {
        let store = store();
        let lines = text(&overview_lines(&store, ActivityMetric::PostCount, 100));
        let values = lines
            .iter()
            .find(|l| l.starts_with(format::PLACEHOLDER))
            .expect("placeholder row");
        assert_eq!(values.matches(format::PLACEHOLDER).count(), 5);
    }

    #[test]
    fn test_empty_activity_shows_message_not_chart() {
        let store = store();
        store.activity.lock().unwrap().resolve(Vec::new());
        let lines = text(&overview_lines(&store, ActivityMetric::PostCount, 100));
        assert!(lines.iter().any(|l| l == NO_ACTIVITY));
        assert!(!lines.iter().any(|l| l.contains("██")));
    }

    #[test]
    fn test_max_bar_reaches_top_row() {
        let days = vec![
            day("2024-05-01", 0, 3),
            day("2024-05-02", 5, 1),
            day("2024-05-03", 10, 0),
        ];
        let lines = text(&chart_lines(&days, ActivityMetric::PostCount, 100));
        assert_eq!(lines.len(), CHART_ROWS as usize + 2);

        let top = &lines[0];
        assert_eq!(top.matches("██").count(), 1);
        assert!(top[2 * BAR_COLUMN_WIDTH..].contains("██"));

        // NB: zero values still get one row
        let bottom = &lines[CHART_ROWS as usize - 1];
        assert_eq!(bottom.matches("██").count(), 3);

        assert!(lines[CHART_ROWS as usize + 1].contains("May 3"));

        // switching the metric moves the full-height bar
        let lines = chart_lines(&days, ActivityMetric::Engagements, 100);
        let top: Vec<bool> = lines[0]
            .iter()
            .map(|cell| cell.text().contains("██"))
            .collect();
        assert_eq!(top, vec![true, false, false]);
    }

    #[test]
    fn test_large_counts_stay_in_their_column() {
        let days = vec![day("2024-05-01", 1_234_567, 0), day("2024-05-02", 3, 0)];
        let lines = chart_lines(&days, ActivityMetric::PostCount, 100);

        for line in &lines {
            for cell in line {
                assert_eq!(display_width(cell.text()), BAR_COLUMN_WIDTH);
            }
        }
        let labels = line_text(&lines[CHART_ROWS as usize + 1]);
        assert_eq!(&labels[BAR_COLUMN_WIDTH..], chart_cell("May 2"));
    }

    #[test]
    fn test_chart_keeps_most_recent_days() {
        let days: Vec<ActivityDay> = (1..=20)
            .map(|d| day(&format!("2024-05-{d:02}"), d, 0))
            .collect();
        let lines = text(&chart_lines(&days, ActivityMetric::PostCount, 7 * BAR_COLUMN_WIDTH));
        let labels = &lines[CHART_ROWS as usize + 1];
        assert!(labels.contains("May 20"));
        assert!(labels.contains("May 14"));
        assert!(!labels.contains("May 13"));
    }

    #[test]
    fn test_top_posts_error_keeps_other_sections() {
        let store = store();
        store.summary.lock().unwrap().resolve(summary("774643"));
        store
            .activity
            .lock()
            .unwrap()
            .resolve(vec![day("2024-05-01", 1, 1)]);
        store.top_posts.lock().unwrap().reject(
            ClientError::Request {
                endpoint: Endpoint::TopPosts,
                status: 500,
                status_text: "Internal Server Error".to_string(),
                body: "boom".to_string(),
            }
            .to_string(),
        );

        let lines = text(&overview_lines(&store, ActivityMetric::PostCount, 100));
        let error_at = lines
            .iter()
            .position(|l| l == "Top posts error: 500 Internal Server Error – boom")
            .expect("error line");
        let heading_at = lines
            .iter()
            .position(|l| l.starts_with("Top posts (by engagements)"))
            .unwrap();
        assert_eq!(error_at, heading_at + 1);
        assert!(lines.iter().any(|l| l.contains("██")));
        assert!(lines.iter().any(|l| l.contains("12,345")));
    }

    #[test]
    fn test_posts() {
        let store = store();
        store.top_posts.lock().unwrap().resolve(vec![TopPost {
            id: 1,
            text: Some(format!("gm\n{}", "x".repeat(200))),
            impressions: 2_500,
            engagements: 40,
            created_at: "garbage".to_string(),
        }]);
        let lines = text(&overview_lines(&store, ActivityMetric::PostCount, 400));

        let body = lines
            .iter()
            .find(|l| l.starts_with("gm⏎ "))
            .expect("post body");
        assert!(body.ends_with('…'));
        assert!(lines
            .iter()
            .any(|l| l.starts_with("garbage") && l.ends_with("2,500 impressions · 40 engagements")));
    }

    #[test]
    fn test_empty_posts() {
        let store = store();
        store.top_posts.lock().unwrap().resolve(Vec::new());
        let lines = text(&overview_lines(&store, ActivityMetric::PostCount, 100));
        assert!(lines.iter().any(|l| l == NO_POSTS));
    }
}
