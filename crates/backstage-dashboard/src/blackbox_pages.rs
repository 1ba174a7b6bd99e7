//! Blackbox section: the mini-game's content, puzzles and launch countdown.

use crate::pages::{Loaded, load_failed};
use crate::state::PageContext;
use crate::templates::{badge, card, empty_state, escape, layout, page_header, stats_card, table};
use backstage_core::{ContentEntry, Countdown, Puzzle, Route};
use chrono::{DateTime, Duration, Utc};

pub fn blackbox_page(ctx: &PageContext) -> String {
    let links: String = [Route::ContentManager, Route::GameEditor, Route::Countdown]
        .iter()
        .map(|route| {
            format!(
                r##"<a href="{path}" class="flex items-center gap-4 p-4 bg-gray-50 dark:bg-gray-700/50 rounded-lg hover:bg-gray-100 dark:hover:bg-gray-700 transition-colors">
                    <div class="w-10 h-10 rounded-full bg-primary-100 dark:bg-primary-900/30 flex items-center justify-center">
                        <i class="fas fa-{icon} text-primary-500"></i>
                    </div>
                    <h4 class="font-medium text-gray-900 dark:text-white">{label}</h4>
                </a>"##,
                path = route.path(),
                icon = route.icon(),
                label = route.label(),
            )
        })
        .collect();

    let content = format!(
        r##"{header}
        {sections}"##,
        header = page_header("Blackbox", "The hidden game behind the store.", None),
        sections = card(
            "Sections",
            &format!(r#"<div class="grid grid-cols-1 md:grid-cols-3 gap-4">{links}</div>"#),
        ),
    );
    layout("Blackbox", ctx, &content)
}

pub fn content_page(ctx: &PageContext, entries: &Loaded<Vec<ContentEntry>>) -> String {
    let body = match entries {
        Ok(entries) if entries.is_empty() => {
            empty_state("folder-open", "No content", "Nothing has been written for the game yet.", None)
        }
        Ok(entries) => {
            let rows: Vec<Vec<String>> = entries
                .iter()
                .map(|e| {
                    let state = if e.published {
                        badge("Published", "green")
                    } else {
                        badge("Draft", "gray")
                    };
                    vec![escape(&e.title), escape(&e.kind), state]
                })
                .collect();
            table(&["Title", "Kind", "State"], &rows)
        }
        Err(message) => load_failed(message),
    };

    let content = format!(
        "{}{}",
        page_header("Content Manager", "Clues, lore and messages shown in the game.", None),
        card("Content", &body),
    );
    layout("Content Manager", ctx, &content)
}

pub fn game_editor_page(ctx: &PageContext, puzzles: &Loaded<Vec<Puzzle>>) -> String {
    let body = match puzzles {
        Ok(puzzles) if puzzles.is_empty() => {
            empty_state("puzzle-piece", "No puzzles", "Puzzles added through the API appear here.", None)
        }
        Ok(puzzles) => {
            let rows: Vec<Vec<String>> = puzzles
                .iter()
                .map(|p| {
                    vec![
                        format!(r#"<code class="text-xs">{}</code>"#, escape(&p.id)),
                        escape(&p.name),
                        escape(&p.difficulty),
                    ]
                })
                .collect();
            table(&["ID", "Puzzle", "Difficulty"], &rows)
        }
        Err(message) => load_failed(message),
    };

    let content = format!(
        "{}{}",
        page_header("Game Editor", "Puzzles in the current season.", None),
        card("Puzzles", &body),
    );
    layout("Game Editor", ctx, &content)
}

/// `3d 04h 05m`, or `0m` once the target has passed.
pub fn format_remaining(remaining: Duration) -> String {
    let days = remaining.num_days();
    let hours = remaining.num_hours() % 24;
    let minutes = remaining.num_minutes() % 60;
    match (days, hours) {
        (0, 0) => format!("{minutes}m"),
        (0, _) => format!("{hours}h {minutes:02}m"),
        _ => format!("{days}d {hours:02}h {minutes:02}m"),
    }
}

pub fn countdown_page(ctx: &PageContext, countdown: &Loaded<Option<Countdown>>, now: DateTime<Utc>) -> String {
    let body = match countdown {
        Ok(Some(countdown)) => {
            let remaining = countdown.remaining(now);
            let state = if remaining.is_zero() {
                badge("Live", "green")
            } else {
                badge("Scheduled", "blue")
            };
            format!(
                r##"<div class="grid grid-cols-1 md:grid-cols-2 gap-6">
                    {target}
                    {left}
                </div>
                <p class="mt-4 text-sm text-gray-500 dark:text-gray-400">{label} {state}</p>"##,
                target = stats_card("Target", &countdown.target.format("%b %d, %Y %H:%M UTC").to_string(), "calendar", "blue"),
                left = stats_card("Remaining", &format_remaining(remaining), "hourglass-half", "primary"),
                label = escape(&countdown.label),
            )
        }
        Ok(None) => empty_state("hourglass", "No countdown", "No countdown is scheduled.", None),
        Err(message) => load_failed(message),
    };

    let content = format!(
        "{}{}",
        page_header("Countdown", "Time until the next drop.", None),
        card("Countdown", &body),
    );
    layout("Countdown", ctx, &content)
}
