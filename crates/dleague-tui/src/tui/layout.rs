// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Status Bar (1 row)                                |
// +--------------------------------------------------+
// | Season Banner (4 rows)                            |
// +----------------------------------+---------------+
// | Main Panel (70%)                  | Calendar (30%)|
// |                                   |               |
// +----------------------------------+---------------+
// | Help Bar (1 row)                                  |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Resolved screen areas for each dashboard zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    /// League name, season and tab strip.
    pub status_bar: Rect,
    /// Season progress and load status.
    pub banner: Rect,
    /// Tab-switched content.
    pub main_panel: Rect,
    /// Upcoming game days.
    pub calendar: Rect,
    /// Keyboard shortcut hints.
    pub help_bar: Rect,
}

pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // status bar
            Constraint::Length(4), // season banner
            Constraint::Min(5),    // main + calendar
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(70), Constraint::Percentage(30)])
        .split(vertical[2]);

    AppLayout {
        status_bar: vertical[0],
        banner: vertical[1],
        main_panel: horizontal[0],
        calendar: horizontal[1],
        help_bar: vertical[3],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_area() -> Rect {
        Rect::new(0, 0, 160, 50)
    }

    #[test]
    fn layout_all_rects_nonzero() {
        let layout = build_layout(test_area());
        let rects = [
            ("status_bar", layout.status_bar),
            ("banner", layout.banner),
            ("main_panel", layout.main_panel),
            ("calendar", layout.calendar),
            ("help_bar", layout.help_bar),
        ];
        for (name, rect) in &rects {
            assert!(rect.width > 0 && rect.height > 0, "{name} has zero area: {rect:?}");
        }
    }

    #[test]
    fn layout_fixed_rows() {
        let layout = build_layout(test_area());
        assert_eq!(layout.status_bar.height, 1);
        assert_eq!(layout.banner.height, 4);
        assert_eq!(layout.help_bar.height, 1);
        assert_eq!(layout.main_panel.height, 50 - 1 - 4 - 1);
    }

    #[test]
    fn layout_main_panel_wider_than_calendar() {
        let layout = build_layout(test_area());
        assert!(layout.main_panel.width > layout.calendar.width);
        assert_eq!(layout.main_panel.y, layout.calendar.y);
        assert_eq!(layout.main_panel.width + layout.calendar.width, 160);
    }

    #[test]
    fn layout_fits_within_area() {
        let area = test_area();
        let layout = build_layout(area);
        for rect in [layout.status_bar, layout.banner, layout.main_panel, layout.calendar, layout.help_bar] {
            assert!(rect.right() <= area.right());
            assert!(rect.bottom() <= area.bottom());
        }
    }
}
