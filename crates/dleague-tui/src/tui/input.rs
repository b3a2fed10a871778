// Keyboard input handling and command dispatch.
//
// Translates crossterm key events into UserCommand messages for the season
// loader, or into local ViewState changes (tabs, scrolling, filters).

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use dleague_core::model::Conference;

use super::ViewState;
use crate::protocol::{TabId, UserCommand};

/// Lines moved by PageUp/PageDown.
const PAGE_SIZE: usize = 20;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` when the key should be forwarded to the
/// loader (season switch, refresh, quit). Returns `None` when it was handled
/// locally.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // crossterm on Windows reports both Press and Release.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) && key_event.code == KeyCode::Char('c') {
        return Some(UserCommand::Quit);
    }

    if view_state.confirm_quit {
        return handle_confirm_quit(key_event, view_state);
    }

    match key_event.code {
        KeyCode::Char(c @ '1'..='5') => {
            if let Some(tab) = TabId::from_key(c) {
                view_state.active_tab = tab;
            }
            None
        }
        KeyCode::Tab => {
            view_state.active_tab = next_tab(view_state.active_tab);
            None
        }

        KeyCode::Up | KeyCode::Char('k') => {
            scroll_up(view_state, 1);
            None
        }
        KeyCode::Down | KeyCode::Char('j') => {
            scroll_down(view_state, 1);
            None
        }
        KeyCode::PageUp => {
            scroll_up(view_state, PAGE_SIZE);
            None
        }
        KeyCode::PageDown => {
            scroll_down(view_state, PAGE_SIZE);
            None
        }

        KeyCode::Left | KeyCode::Char('h') => {
            step_game_day(view_state, -1);
            None
        }
        KeyCode::Right | KeyCode::Char('l') => {
            step_game_day(view_state, 1);
            None
        }

        KeyCode::Char('c') => {
            cycle_conference(view_state);
            None
        }

        KeyCode::Char('s') => view_state
            .next_unlocked_season()
            .filter(|id| Some(*id) != view_state.selected_season)
            .map(UserCommand::SelectSeason),
        KeyCode::Char('r') => Some(UserCommand::Refresh),

        KeyCode::Char('q') => {
            view_state.confirm_quit = true;
            None
        }

        _ => None,
    }
}

/// y/q confirm, n/Esc cancel, everything else is swallowed.
fn handle_confirm_quit(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    match key_event.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Char('q') | KeyCode::Char('Q') => {
            Some(UserCommand::Quit)
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            view_state.confirm_quit = false;
            None
        }
        _ => None,
    }
}

fn next_tab(tab: TabId) -> TabId {
    let idx = TabId::ALL.iter().position(|t| *t == tab).unwrap_or(0);
    TabId::ALL[(idx + 1) % TabId::ALL.len()]
}

/// None -> West -> East -> None
fn cycle_conference(view_state: &mut ViewState) {
    view_state.conference = match view_state.conference {
        None => Some(Conference::West),
        Some(Conference::West) => Some(Conference::East),
        Some(Conference::East) => None,
    };
    view_state.scroll_offset.remove(&view_state.active_tab);
}

/// Move the scoring tab's game day selection, clamped to the played days.
fn step_game_day(view_state: &mut ViewState, delta: isize) {
    let count = view_state.game_days().len();
    if count == 0 {
        return;
    }
    let last = count - 1;
    let current = view_state.game_day.map_or(last, |i| i.min(last));
    let next = current.saturating_add_signed(delta).min(last);
    view_state.game_day = Some(next);
    view_state.scroll_offset.remove(&TabId::Scoring);
}

fn scroll_up(view_state: &mut ViewState, lines: usize) {
    let offset = view_state.scroll_offset.entry(view_state.active_tab).or_insert(0);
    *offset = offset.saturating_sub(lines);
}

fn scroll_down(view_state: &mut ViewState, lines: usize) {
    let offset = view_state.scroll_offset.entry(view_state.active_tab).or_insert(0);
    *offset = offset.saturating_add(lines);
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
