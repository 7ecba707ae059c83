use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::shared::{DisplayState, LedState, STEPS_PER_PATTERN};

use super::grid::draw_pad_grid;

pub fn render(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),  // screen: transport + selected pad
            Constraint::Length(3),  // step LED row
            Constraint::Min(12),    // pad grid
        ])
        .split(area);

    draw_screen(frame, sections[0], state);
    draw_step_row(frame, sections[1], state);
    draw_pad_grid(frame, sections[2], state);
}

fn draw_screen(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let transport = if state.playing { "PLAY" } else { "STOP" };
    let write = if state.write_mode { " WRITE" } else { "" };

    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {transport}{write} "),
                Style::default().fg(if state.playing { Color::Green } else { Color::Red }),
            ),
            Span::raw(format!(
                " bpm {:>3}  vol {:>3.0}%  step {:>2}",
                state.bpm,
                state.volume * 100.0,
                state.current_step + 1,
            )),
        ]),
        Line::from(format!(
            " pad {:>2}: {} [{}]",
            state.selected_pad + 1,
            state.pad_label,
            state.pad_kind,
        )),
        Line::from(format!(
            " pitch {:.1}x  decay {:.2}s",
            state.pitch, state.decay
        )),
        Line::from(Span::styled(
            format!(" {}", state.status_text),
            Style::default().fg(Color::Yellow),
        )),
    ];

    let screen = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" pulsepad ")
            .border_style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(screen, area);
}

fn draw_step_row(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let mut spans = Vec::with_capacity(STEPS_PER_PATTERN * 2);
    for (i, led) in state.step_leds.iter().enumerate() {
        let style = match led {
            LedState::Off => Style::default().fg(Color::DarkGray),
            LedState::OnMedium => Style::default().fg(Color::Cyan),
            LedState::OnHigh => Style::default()
                .fg(Color::White)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        };
        let symbol = match led {
            LedState::Off => "··",
            _ => "██",
        };
        spans.push(Span::styled(symbol, style));
        // beat group gap every 4 steps
        spans.push(Span::raw(if i % 4 == 3 { "  " } else { " " }));
    }

    let row = Paragraph::new(Line::from(spans))
        .block(Block::default().borders(Borders::ALL).title(" steps "));
    frame.render_widget(row, area);
}
