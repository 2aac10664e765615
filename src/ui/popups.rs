use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use crate::app::state::AppState;

const SPINNER: [&str; 4] = ["◐", "◓", "◑", "◒"];

fn popup_block(title: &str) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(format!(" {title} "))
        .border_style(Style::default().fg(Color::Gray))
        .style(Style::default().bg(Color::Black).fg(Color::White))
}

pub fn render_loading(frame: &mut Frame, area: Rect, state: &AppState) {
    frame.render_widget(Clear, area);
    let spinner = if state.animate_ui {
        SPINNER[(state.frame_tick / 4) as usize % SPINNER.len()]
    } else {
        SPINNER[0]
    };
    let body = Paragraph::new(Line::from(format!("{spinner} {}", state.loading_message)))
        .alignment(Alignment::Center)
        .block(popup_block("skyportal"));
    frame.render_widget(body, area);
}

/// Full-screen failure panel. Nothing of the scene is drawn behind it.
pub fn render_error(frame: &mut Frame, area: Rect, state: &AppState) {
    frame.render_widget(Clear, area);
    let block = popup_block("Error");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let Some(screen) = state.error.as_ref() else {
        return;
    };
    let chunks = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(5),
        Constraint::Length(2),
        Constraint::Fill(1),
    ])
    .split(inner);

    let message = Paragraph::new(vec![
        Line::from(Span::styled(
            screen.message.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::default(),
        Line::from(Span::styled(
            screen.cause.to_string(),
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center)
    .wrap(Wrap { trim: true });
    frame.render_widget(message, chunks[1]);

    let hint = Paragraph::new(Line::from(
        "[r/Enter] retry   [l] enter a city   [q] quit",
    ))
    .alignment(Alignment::Center)
    .style(Style::default().fg(Color::LightYellow));
    frame.render_widget(hint, chunks[2]);
}

pub fn render_location_input(frame: &mut Frame, area: Rect, state: &AppState) {
    let Some(query) = state.location_input.as_deref() else {
        return;
    };
    frame.render_widget(Clear, area);
    let block = popup_block("Location");
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = vec![
        Line::from(vec![
            Span::styled("City: ", Style::default().fg(Color::Gray)),
            Span::styled(
                format!("{query}▏"),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::default(),
        Line::from(Span::styled(
            "Enter to search · Esc to cancel",
            Style::default().fg(Color::Gray),
        )),
    ];
    frame.render_widget(Paragraph::new(lines), inner);
}
