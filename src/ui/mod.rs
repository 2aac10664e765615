pub mod lightning;
pub mod overlay;
pub mod particles;
pub mod popups;
pub mod sky;
pub mod snapshot;

use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    widgets::{Block, Borders, Paragraph, Wrap},
};

use crate::app::state::{AppMode, AppState};

pub const MIN_WIDTH: u16 = 40;
pub const MIN_HEIGHT: u16 = 14;

pub fn render(frame: &mut Frame, state: &AppState) {
    let area = frame.area();

    if area.width < MIN_WIDTH || area.height < MIN_HEIGHT {
        let warning = Paragraph::new(format!(
            "Terminal too small. Resize to at least {MIN_WIDTH}x{MIN_HEIGHT}."
        ))
        .wrap(Wrap { trim: true })
        .block(Block::default().borders(Borders::ALL).title("skyportal"));
        frame.render_widget(warning, area);
        return;
    }

    if state.mode == AppMode::Error {
        popups::render_error(frame, area, state);
    } else {
        sky::render(frame, area, state);
        if state.mode == AppMode::Ready {
            overlay::render(frame, area, state);
        }
        if state.mode == AppMode::Loading {
            popups::render_loading(frame, fixed_rect(36, 3, area), state);
        }
    }

    if state.location_input.is_some() {
        popups::render_location_input(frame, fixed_rect(48, 5, area), state);
    }
}

/// A `width`×`height` rect centred in `r`, shrunk to fit.
fn fixed_rect(width: u16, height: u16, r: Rect) -> Rect {
    let width = width.min(r.width);
    let height = height.min(r.height);
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(height),
            Constraint::Fill(1),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Fill(1),
            Constraint::Length(width),
            Constraint::Fill(1),
        ])
        .split(vertical[1])[1]
}
