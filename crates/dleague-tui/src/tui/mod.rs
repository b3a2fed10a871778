// TUI dashboard: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` fed by `UiUpdate` messages from the season
// loader task, and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use crossterm::event::{Event, EventStream};
use futures_util::StreamExt;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use ratatui::Frame;
use tokio::sync::mpsc;

use dleague_app::SeasonSnapshot;
use dleague_core::config::SeasonConfig;
use dleague_core::leaderboard::scored_game_days;
use dleague_core::model::Conference;

use crate::protocol::{LoadStatus, TabId, UiUpdate, UserCommand};

use layout::{build_layout, AppLayout};

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// TUI-local state mirroring what the loader has sent.
pub struct ViewState {
    pub league_name: String,
    pub seasons: Vec<SeasonConfig>,
    /// Season the user is looking at; may differ from the snapshot's while a
    /// new season loads.
    pub selected_season: Option<u32>,
    pub snapshot: Option<Arc<SeasonSnapshot>>,
    pub load_status: LoadStatus,
    pub active_tab: TabId,
    pub scroll_offset: HashMap<TabId, usize>,
    /// Conference filter for the standings and teams tabs.
    pub conference: Option<Conference>,
    /// Index into the scored game days; `None` follows the latest.
    pub game_day: Option<usize>,
    pub confirm_quit: bool,
    pub today: NaiveDate,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState {
            league_name: String::new(),
            seasons: Vec::new(),
            selected_season: None,
            snapshot: None,
            load_status: LoadStatus::Idle,
            active_tab: TabId::Standings,
            scroll_offset: HashMap::new(),
            conference: None,
            game_day: None,
            confirm_quit: false,
            today: chrono::Local::now().date_naive(),
        }
    }
}

impl ViewState {
    pub fn scroll(&self, tab: TabId) -> usize {
        self.scroll_offset.get(&tab).copied().unwrap_or(0)
    }

    pub fn selected_season_config(&self) -> Option<&SeasonConfig> {
        let id = self.selected_season?;
        self.seasons.iter().find(|s| s.id == id)
    }

    /// Played game days with lineups, oldest first.
    pub fn game_days(&self) -> Vec<&str> {
        self.snapshot
            .as_deref()
            .map(|s| scored_game_days(&s.schedule))
            .unwrap_or_default()
    }

    pub fn selected_game_day(&self) -> Option<&str> {
        let days = self.game_days();
        let last = days.len().checked_sub(1)?;
        let idx = self.game_day.map_or(last, |i| i.min(last));
        days.get(idx).copied()
    }

    /// The next unlocked season after the selected one, wrapping around.
    pub fn next_unlocked_season(&self) -> Option<u32> {
        let open: Vec<u32> = self.seasons.iter().filter(|s| !s.locked).map(|s| s.id).collect();
        let current = self.selected_season.and_then(|id| open.iter().position(|o| *o == id));
        match current {
            Some(i) => open.get((i + 1) % open.len()).copied(),
            None => open.first().copied(),
        }
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Seasons { league, seasons } => {
            state.league_name = league;
            state.seasons = seasons;
            if state.selected_season.is_none() {
                state.selected_season = state.seasons.iter().find(|s| !s.locked).map(|s| s.id);
            }
        }
        UiUpdate::Status { season, status } => {
            if state.snapshot.as_ref().map_or(false, |s| s.season.id != season) {
                state.snapshot = None;
            }
            state.selected_season = Some(season);
            state.load_status = status;
        }
        UiUpdate::Snapshot(snapshot) => {
            let changed = state.snapshot.as_ref().map_or(true, |s| s.season.id != snapshot.season.id);
            if changed {
                state.game_day = None;
                state.scroll_offset.clear();
            }
            state.selected_season = Some(snapshot.season.id);
            state.snapshot = Some(snapshot);
            state.load_status = LoadStatus::Ready;
        }
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete dashboard frame.
fn render_frame(frame: &mut Frame, state: &ViewState) {
    let area = frame.area();
    let layout = build_layout(area);

    widgets::status_bar::render(frame, layout.status_bar, state);
    widgets::banner::render(frame, layout.banner, state);
    match state.active_tab {
        TabId::Standings => widgets::standings::render(frame, layout.main_panel, state),
        TabId::Schedule => widgets::schedule::render(frame, layout.main_panel, state),
        TabId::Teams => widgets::teams::render(frame, layout.main_panel, state),
        TabId::Draft => widgets::draft::render(frame, layout.main_panel, state),
        TabId::Scoring => widgets::scoring::render(frame, layout.main_panel, state),
    }
    widgets::calendar::render(frame, layout.calendar, state);
    render_help_bar(frame, &layout, state);

    if state.confirm_quit {
        widgets::quit_confirm::render(frame, area);
    }
}

fn render_help_bar(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let mut text = String::from(" q:Quit | 1-5:Tabs | j/k:Scroll | s:Season | r:Refresh");
    match state.active_tab {
        TabId::Standings | TabId::Teams => text.push_str(" | c:Conference"),
        TabId::Scoring => text.push_str(" | ←/→:Game day"),
        _ => {}
    }
    let paragraph = Paragraph::new(Line::from(vec![Span::styled(
        text,
        Style::default().fg(Color::White).add_modifier(Modifier::DIM),
    )]))
    .style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI event loop until the user quits or the loader goes away.
pub async fn run(
    mut ui_rx: mpsc::Receiver<UiUpdate>,
    cmd_tx: mpsc::Sender<UserCommand>,
) -> anyhow::Result<()> {
    // 1. Initialize terminal
    let mut terminal = ratatui::init();

    // 2. Restore the terminal before the default panic output.
    let original_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        ratatui::restore();
        original_hook(panic_info);
    }));

    let mut view_state = ViewState::default();
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    // 3. Main loop
    let result = loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(&mut view_state, ui_update),
                    // Loader exited
                    None => break Ok(()),
                }
            }

            maybe_event = event_stream.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key_event))) => {
                        if let Some(cmd) = input::handle_key(key_event, &mut view_state) {
                            let quit = cmd == UserCommand::Quit;
                            let _ = cmd_tx.send(cmd).await;
                            if quit {
                                break Ok(());
                            }
                        }
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => break Err(anyhow::Error::new(e).context("terminal input error")),
                    None => break Ok(()),
                }
            }

            _ = render_tick.tick() => {
                if let Err(e) = terminal.draw(|frame| render_frame(frame, &view_state)) {
                    break Err(anyhow::Error::new(e).context("failed to draw frame"));
                }
            }
        }
    };

    // 4. Restore terminal
    ratatui::restore();
    result
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{default_config, default_snapshot};

    fn with_seasons() -> ViewState {
        let mut state = ViewState::default();
        apply_ui_update(
            &mut state,
            UiUpdate::Seasons {
                league: "NBA Draft League".into(),
                seasons: default_config().seasons,
            },
        );
        state
    }

    #[test]
    fn view_state_default_is_sensible() {
        let state = ViewState::default();
        assert!(state.snapshot.is_none());
        assert_eq!(state.active_tab, TabId::Standings);
        assert_eq!(state.load_status, LoadStatus::Idle);
        assert!(state.conference.is_none());
        assert!(!state.confirm_quit);
        assert_eq!(state.scroll(TabId::Schedule), 0);
        assert!(state.selected_game_day().is_none());
    }

    #[test]
    fn seasons_update_selects_first_unlocked() {
        let state = with_seasons();
        assert_eq!(state.league_name, "NBA Draft League");
        assert_eq!(state.selected_season, Some(1));
        assert_eq!(state.selected_season_config().unwrap().label, "Season 1");
    }

    #[test]
    fn next_unlocked_season_wraps() {
        let mut state = with_seasons();
        // Only season 1 is open in the defaults.
        assert_eq!(state.next_unlocked_season(), Some(1));
        state.seasons[1].locked = false;
        assert_eq!(state.next_unlocked_season(), Some(2));
        state.selected_season = Some(2);
        assert_eq!(state.next_unlocked_season(), Some(1));
    }

    #[tokio::test]
    async fn snapshot_update_marks_ready_and_resets_view() {
        let mut state = with_seasons();
        state.game_day = Some(3);
        state.scroll_offset.insert(TabId::Schedule, 5);

        apply_ui_update(&mut state, UiUpdate::Snapshot(default_snapshot().await));
        assert_eq!(state.load_status, LoadStatus::Ready);
        assert!(state.snapshot.is_some());
        assert_eq!(state.game_day, None);
        assert_eq!(state.scroll(TabId::Schedule), 0);

        // Reloading the same season keeps the user's place.
        state.scroll_offset.insert(TabId::Schedule, 5);
        apply_ui_update(&mut state, UiUpdate::Snapshot(default_snapshot().await));
        assert_eq!(state.scroll(TabId::Schedule), 5);
    }

    #[tokio::test]
    async fn status_for_other_season_drops_snapshot() {
        let mut state = with_seasons();
        apply_ui_update(&mut state, UiUpdate::Snapshot(default_snapshot().await));

        apply_ui_update(
            &mut state,
            UiUpdate::Status {
                season: 1,
                status: LoadStatus::Loading,
            },
        );
        assert!(state.snapshot.is_some());

        apply_ui_update(
            &mut state,
            UiUpdate::Status {
                season: 2,
                status: LoadStatus::Failed("Season 2 is locked".into()),
            },
        );
        assert!(state.snapshot.is_none());
        assert_eq!(state.selected_season, Some(2));
    }

    #[tokio::test]
    async fn render_frame_all_tabs() {
        let mut state = with_seasons();
        apply_ui_update(&mut state, UiUpdate::Snapshot(default_snapshot().await));
        for tab in TabId::ALL {
            state.active_tab = tab;
            let backend = ratatui::backend::TestBackend::new(120, 40);
            let mut terminal = ratatui::Terminal::new(backend).unwrap();
            terminal.draw(|frame| render_frame(frame, &state)).unwrap();
        }
        state.confirm_quit = true;
        let backend = ratatui::backend::TestBackend::new(40, 10);
        let mut terminal = ratatui::Terminal::new(backend).unwrap();
        terminal.draw(|frame| render_frame(frame, &state)).unwrap();
    }
}
