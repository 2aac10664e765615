use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};

use crate::{
    app::state::AppState,
    cli::IconMode,
    domain::weather::{
        ForecastDay, Units, WeatherRecord, condition_icon, convert_temp, round_temp, unit_suffix,
    },
};

/// `Today` for day 0, the upper-case short weekday otherwise.
#[must_use]
pub fn day_label(index: usize, day: &ForecastDay) -> String {
    if index == 0 {
        "Today".to_string()
    } else {
        day.date.format("%a").to_string().to_uppercase()
    }
}

#[must_use]
pub fn forecast_entry(index: usize, day: &ForecastDay, units: Units, icons: IconMode) -> String {
    let high = round_temp(convert_temp(day.max_temp_f, units));
    let low = round_temp(convert_temp(day.min_temp_f, units));
    format!(
        "[{}] {} {} {high}°/{low}°",
        index + 1,
        day_label(index, day),
        condition_icon(day.condition.category(), icons, false),
    )
}

#[must_use]
pub fn stats_line(record: &WeatherRecord, units: Units) -> String {
    format!(
        "HUMIDITY {:.0}%   WIND {:.0} mph   FEELS LIKE {}°   VISIBILITY {:.0} mi",
        record.current.humidity_pct,
        record.current.wind_mph,
        record.feels_like(units),
        record.current.visibility_miles,
    )
}

#[must_use]
pub fn temperature_line(record: &WeatherRecord, units: Units) -> String {
    format!("{}{}", record.current_temp(units), unit_suffix(units))
}

#[must_use]
pub fn high_low_line(record: &WeatherRecord, units: Units) -> Option<String> {
    record
        .high_low(units)
        .map(|(high, low)| format!("H:{high}°  L:{low}°"))
}

pub fn render(frame: &mut Frame, area: Rect, state: &AppState) {
    let (Some(main), Some(record)) = (state.weather.as_ref(), state.effective_record()) else {
        return;
    };
    let text = if state.scene.is_night {
        Color::White
    } else {
        Color::Black
    };
    let base = Style::default().fg(text);

    render_header(frame, area, state, record, base);
    render_footer(frame, area, state, main, record, base);
    if let Some(day_index) = state.portal.source_day_index() {
        render_portal_banner(frame, area, main, day_index, base);
    }
}

fn render_header(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    record: &WeatherRecord,
    base: Style,
) {
    let icon = condition_icon(
        record.current_category(),
        state.icon_mode,
        state.scene.is_night,
    );
    let mut lines = vec![
        Line::from(Span::styled(
            record.location.name.to_uppercase(),
            base.add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(record.location.region.clone(), base)),
        Line::default(),
        Line::from(vec![
            Span::styled(
                temperature_line(record, state.units),
                base.add_modifier(Modifier::BOLD),
            ),
            Span::styled(format!("  {icon} {}", record.current.condition.text), base),
        ]),
    ];
    if let Some(high_low) = high_low_line(record, state.units) {
        lines.push(Line::from(Span::styled(high_low, base)));
    }

    let header = Rect {
        x: area.x.saturating_add(2),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(4),
        height: (lines.len() as u16).min(area.height.saturating_sub(1)),
    };
    frame.render_widget(Paragraph::new(lines), header);
}

fn render_footer(
    frame: &mut Frame,
    area: Rect,
    state: &AppState,
    main: &WeatherRecord,
    record: &WeatherRecord,
    base: Style,
) {
    if area.height < 4 {
        return;
    }
    let active = state.portal.source_day_index();
    let mut strip = Vec::new();
    for (index, day) in main.forecast_days.iter().enumerate() {
        let style = if active == Some(index) {
            base.add_modifier(Modifier::BOLD | Modifier::REVERSED)
        } else {
            base
        };
        if index > 0 {
            strip.push(Span::styled("    ", base));
        }
        strip.push(Span::styled(
            forecast_entry(index, day, state.units, state.icon_mode),
            style,
        ));
    }

    let hint = if state.portal.is_active() {
        "[0/Esc] leave portal  [l] location  [q] quit"
    } else {
        "[1-3] portal  [l] location  [r] refresh  [f/c] units  [q] quit"
    };
    let lines = vec![
        Line::from(strip),
        Line::from(Span::styled(stats_line(record, state.units), base)),
        Line::from(Span::styled(hint, base.add_modifier(Modifier::DIM))),
    ];
    let footer = Rect {
        x: area.x.saturating_add(2),
        y: area.bottom().saturating_sub(4),
        width: area.width.saturating_sub(4),
        height: 3,
    };
    frame.render_widget(Paragraph::new(lines), footer);
}

fn render_portal_banner(
    frame: &mut Frame,
    area: Rect,
    main: &WeatherRecord,
    day_index: usize,
    base: Style,
) {
    let Some(day) = main.forecast_days.get(day_index) else {
        return;
    };
    let label = format!(
        " ◆ PORTAL · {} · {} ◆ ",
        day_label(day_index, day),
        day.date.format("%b %-d")
    );
    let banner = Rect {
        x: area.x,
        y: area.y,
        width: area.width,
        height: 1,
    };
    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            label,
            base.add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center),
        banner,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::weather::parse_date,
        test_support::sample_record,
    };

    #[test]
    fn forecast_strip_labels_today_then_weekdays() {
        let record = sample_record("Sunny", "2024-06-01 14:00");
        let entries = record
            .forecast_days
            .iter()
            .enumerate()
            .map(|(i, day)| forecast_entry(i, day, Units::Fahrenheit, IconMode::Ascii))
            .collect::<Vec<_>>();
        assert_eq!(entries[0], "[1] Today RAN 85°/70°");
        // 2024-06-02 was a Sunday.
        assert_eq!(entries[1], "[2] SUN CLD 90°/72°");
        assert_eq!(entries[2], "[3] MON SUN 95°/75°");
    }

    #[test]
    fn readouts_follow_units() {
        let record = sample_record("Sunny", "2024-06-01 14:00");
        assert_eq!(temperature_line(&record, Units::Fahrenheit), "78°F");
        assert_eq!(temperature_line(&record, Units::Celsius), "26°C");
        assert_eq!(
            high_low_line(&record, Units::Celsius).as_deref(),
            Some("H:29°  L:21°")
        );
        assert_eq!(
            stats_line(&record, Units::Fahrenheit),
            "HUMIDITY 62%   WIND 9 mph   FEELS LIKE 80°   VISIBILITY 6 mi"
        );
    }

    #[test]
    fn day_label_uses_date_weekday() {
        let record = sample_record("Sunny", "2024-06-01 14:00");
        let mut day = record.forecast_days[0].clone();
        day.date = parse_date("2024-06-05").expect("date");
        assert_eq!(day_label(1, &day), "WED");
    }
}
