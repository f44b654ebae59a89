// Terminal rendering of the dashboard state
use crate::domain::chart;
use crate::domain::dashboard::DashboardState;
use crate::domain::gauge::GaugeBand;
use crate::domain::status::DisplayStatus;
use crate::domain::telemetry::{format_reading, safe_value};
use chrono::{DateTime, Local};
use rand::Rng;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::symbols;
use ratatui::text::{Line, Span};
use ratatui::widgets::canvas::{Canvas, Circle, Line as CanvasLine};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph};
use ratatui::Frame;

const GREEN: Color = Color::Rgb(76, 240, 166);
const AMBER: Color = Color::Rgb(255, 213, 106);
const RED: Color = Color::Rgb(255, 95, 109);
const TEMP_BLUE: Color = Color::Rgb(111, 183, 255);
const GRID: Color = Color::DarkGray;

pub fn draw(f: &mut Frame, state: &DashboardState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(13),
            Constraint::Length(8),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_header(f, rows[0], state);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(36), Constraint::Min(30)])
        .split(rows[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(5),
            Constraint::Length(4),
            Constraint::Min(1),
        ])
        .split(columns[0]);

    draw_gauge(f, left[0], state);
    draw_readouts(f, left[1], state);
    draw_status(f, left[2], state);
    draw_rocket(f, left[3], state);
    draw_chart(f, columns[1], state);
    draw_events(f, rows[2], state);
    draw_footer(f, rows[3], state);
}

fn draw_header(f: &mut Frame, area: Rect, state: &DashboardState) {
    let conn_color = if state.connection.is_connected() {
        GREEN
    } else {
        RED
    };
    let last_pkt = state
        .last_packet_at
        .map(|t| t.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "—".to_string());

    let line = Line::from(vec![
        Span::styled("TEST STAND", Style::default().add_modifier(Modifier::BOLD)),
        Span::raw("  "),
        Span::styled(
            state.connection.indicator_text(state.age_secs),
            Style::default().fg(conn_color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("   pkts: {}", state.packet_count)),
        Span::raw(format!("   last pkt: {}", last_pkt)),
    ]);

    f.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn draw_gauge(f: &mut Frame, area: Rect, state: &DashboardState) {
    let reading = &state.gauge;
    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" temp gauge "))
        .gauge_style(Style::default().fg(band_color(reading.band)))
        .ratio((reading.fill_pct / 100.0).clamp(0.0, 1.0))
        .label(format!(
            "{} °C  {:.0}°",
            format_reading(state.temp),
            reading.angle_deg
        ));
    f.render_widget(gauge, area);
}

fn draw_readouts(f: &mut Frame, area: Rect, state: &DashboardState) {
    let lines = vec![
        Line::from(format!("pressure  {} bar", format_reading(state.pressure))),
        Line::from(format!("temp      {} °C", format_reading(state.temp))),
        Line::from(format!("vib       {}", format_reading(state.vib))),
    ];
    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" readouts ")),
        area,
    );
}

fn draw_status(f: &mut Frame, area: Rect, state: &DashboardState) {
    let lines = vec![
        Line::from(Span::styled(
            state.status_text.clone(),
            Style::default()
                .fg(status_color(state.status))
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            state.status.hint(),
            Style::default().fg(Color::Gray),
        )),
    ];
    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" status ")),
        area,
    );
}

fn draw_rocket(f: &mut Frame, area: Rect, state: &DashboardState) {
    // Micro-vibration driven by the last received vib value, even while
    // disconnected.
    let amplitude = jitter_amplitude(safe_value(state.vib));
    let dx = jitter_offset(amplitude);
    let pad = (area.width as i32 / 2 + dx).clamp(0, area.width.saturating_sub(2) as i32) as usize;
    f.render_widget(Paragraph::new(format!("{}🚀", " ".repeat(pad))), area);
}

fn draw_chart(f: &mut Frame, area: Rect, state: &DashboardState) {
    let history: Vec<_> = state.history.points().collect();
    let canvas = Canvas::default()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" temp / pressure  (~72s window) "),
        )
        .marker(symbols::Marker::Braille)
        .x_bounds([0.0, chart::CHART_WIDTH])
        .y_bounds([0.0, chart::CHART_HEIGHT])
        .paint(|ctx| {
            for y in chart::horizontal_gridlines() {
                ctx.draw(&CanvasLine {
                    x1: 0.0,
                    y1: y,
                    x2: chart::CHART_WIDTH,
                    y2: y,
                    color: GRID,
                });
            }
            for x in chart::vertical_gridlines() {
                ctx.draw(&CanvasLine {
                    x1: x,
                    y1: 0.0,
                    x2: x,
                    y2: chart::CHART_HEIGHT,
                    color: GRID,
                });
            }

            if history.len() < 2 {
                return;
            }

            ctx.layer();
            for (i, pair) in history.windows(2).enumerate() {
                ctx.draw(&CanvasLine {
                    x1: chart::slot_x(i),
                    y1: chart::temp_y(pair[0].temp),
                    x2: chart::slot_x(i + 1),
                    y2: chart::temp_y(pair[1].temp),
                    color: TEMP_BLUE,
                });
            }
            for (i, pair) in history.windows(2).enumerate() {
                ctx.draw(&CanvasLine {
                    x1: chart::slot_x(i),
                    y1: chart::pressure_y(pair[0].press),
                    x2: chart::slot_x(i + 1),
                    y2: chart::pressure_y(pair[1].press),
                    color: GREEN,
                });
            }
            if let Some(last) = state.history.last() {
                ctx.draw(&Circle {
                    x: chart::slot_x(state.history.len() - 1),
                    y: chart::temp_y(last.temp),
                    radius: chart::HIGHLIGHT_RADIUS,
                    color: TEMP_BLUE,
                });
            }
        });
    f.render_widget(canvas, area);
}

fn draw_events(f: &mut Frame, area: Rect, state: &DashboardState) {
    // Pin the view to the newest entries, like a log scrolled to the
    // bottom.
    let visible = area.height.saturating_sub(2) as usize;
    let start = state.events.len().saturating_sub(visible);
    let lines: Vec<Line> = state.events[start..]
        .iter()
        .map(|e| Line::from(format!("[{}] {}", event_time(e.ts), sanitize_message(&e.msg))))
        .collect();

    f.render_widget(
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" events ")),
        area,
    );
}

fn draw_footer(f: &mut Frame, area: Rect, state: &DashboardState) {
    let label = fault_label(state.fault_mode);
    let label_color = match state.fault_mode {
        Some(true) => RED,
        Some(false) => GREEN,
        None => Color::Gray,
    };
    let line = Line::from(vec![
        Span::styled(
            "e: fault ON   d: fault OFF   q: quit",
            Style::default().fg(Color::Gray),
        ),
        Span::raw("   fault mode: "),
        Span::styled(
            label,
            Style::default().fg(label_color).add_modifier(Modifier::BOLD),
        ),
    ]);
    f.render_widget(
        Paragraph::new(line).block(Block::default().borders(Borders::ALL)),
        area,
    );
}

fn band_color(band: GaugeBand) -> Color {
    match band {
        GaugeBand::Green => GREEN,
        GaugeBand::Amber => AMBER,
        GaugeBand::Red => RED,
    }
}

fn status_color(status: DisplayStatus) -> Color {
    match status {
        DisplayStatus::Ok => GREEN,
        DisplayStatus::Init => Color::Gray,
        DisplayStatus::Fault => RED,
    }
}

/// Fault label text: ON, OFF, or an unknown marker when the last read
/// failed.
pub fn fault_label(mode: Option<bool>) -> &'static str {
    match mode {
        Some(true) => "ON",
        Some(false) => "OFF",
        None => "—",
    }
}

/// Event messages render as plain text. Control characters are the
/// terminal's markup channel, so each becomes a space; everything else
/// passes through literally.
pub fn sanitize_message(msg: &str) -> String {
    msg.chars()
        .map(|c| if c.is_control() { ' ' } else { c })
        .collect()
}

fn event_time(ts: f64) -> String {
    if !ts.is_finite() {
        return "—".to_string();
    }
    DateTime::from_timestamp_millis((ts * 1000.0) as i64)
        .map(|utc| utc.with_timezone(&Local).format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "—".to_string())
}

/// Jitter amplitude in cells for a vibration reading; the reading is
/// capped at 2 before scaling.
pub fn jitter_amplitude(vib: f64) -> f64 {
    if !vib.is_finite() {
        return 0.0;
    }
    vib.clamp(0.0, 2.0) * 1.8
}

fn jitter_offset(amplitude: f64) -> i32 {
    if amplitude <= 0.0 {
        return 0;
    }
    rand::thread_rng()
        .gen_range(-amplitude..=amplitude)
        .round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::telemetry::{EventRecord, TelemetrySample};
    use ratatui::backend::TestBackend;
    use ratatui::Terminal;

    #[test]
    fn test_hostile_message_renders_as_plain_text() {
        let sanitized = sanitize_message("<script>alert(1)</script>");
        assert_eq!(sanitized, "<script>alert(1)</script>");

        let sanitized = sanitize_message("\u{1b}[2Jwiped & <done>");
        assert_eq!(sanitized, " [2Jwiped & <done>");
    }

    #[test]
    fn test_sanitize_softens_controls_to_spaces() {
        // Multi-line payloads stay legible as single-line text.
        assert_eq!(sanitize_message("a\nb\tc"), "a b c");
    }

    #[test]
    fn test_fault_label() {
        assert_eq!(fault_label(Some(true)), "ON");
        assert_eq!(fault_label(Some(false)), "OFF");
        assert_eq!(fault_label(None), "—");
    }

    #[test]
    fn test_jitter_amplitude() {
        assert_eq!(jitter_amplitude(0.0), 0.0);
        assert_eq!(jitter_amplitude(0.5), 0.9);
        // Vibration clamps at 2 before scaling.
        assert_eq!(jitter_amplitude(5.0), 3.6);
        assert_eq!(jitter_amplitude(f64::NAN), 0.0);
    }

    #[test]
    fn test_event_time_handles_garbage() {
        assert_eq!(event_time(f64::NAN), "—");
        assert_eq!(event_time(1_700_000_000.0).len(), 8);
    }

    #[test]
    fn test_full_frame_renders_key_widgets() {
        let backend = TestBackend::new(100, 32);
        let mut terminal = Terminal::new(backend).unwrap();

        let now = chrono::Utc::now().timestamp_millis() as f64 / 1000.0;
        let mut state = DashboardState::new();
        let sample = TelemetrySample {
            ts: Some(now),
            temp: Some(50.0),
            pressure: Some(8.0),
            vib: Some(0.1),
            status: Some("OK".to_string()),
        };
        // Three points so the chart draws both series and the highlight.
        for _ in 0..3 {
            state.apply_sample(&sample, now);
        }
        state.apply_events(vec![EventRecord::new(now, "RECOVERED: OK".to_string())]);
        state.set_fault_mode(Some(false));

        terminal.draw(|f| draw(f, &state)).unwrap();

        let content = frame_text(&terminal);
        assert!(content.contains("CONNECTED"));
        assert!(content.contains("pkts: 3"));
        assert!(content.contains("pressure"));
        assert!(content.contains("RECOVERED: OK"));
        assert!(content.contains("fault mode"));
        assert!(content.contains("OFF"));
    }

    #[test]
    fn test_event_log_pins_to_newest_when_overflowing() {
        let backend = TestBackend::new(100, 32);
        let mut terminal = Terminal::new(backend).unwrap();

        let now = chrono::Utc::now().timestamp_millis() as f64 / 1000.0;
        let mut state = DashboardState::new();
        state.apply_events(
            (0..20)
                .map(|i| EventRecord::new(now + i as f64, format!("FAULT: OVERTEMP {i:02}")))
                .collect(),
        );

        terminal.draw(|f| draw(f, &state)).unwrap();

        // The 8-row log area holds 6 lines inside its borders, so only
        // the newest six entries stay visible.
        let content = frame_text(&terminal);
        assert!(content.contains("FAULT: OVERTEMP 19"));
        assert!(content.contains("FAULT: OVERTEMP 14"));
        assert!(!content.contains("FAULT: OVERTEMP 13"));
        assert!(!content.contains("FAULT: OVERTEMP 00"));
    }

    fn frame_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }
}
