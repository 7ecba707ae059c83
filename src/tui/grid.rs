use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};

use crate::shared::{DisplayState, NUM_PADS};

const COLS: usize = 4;
const ROWS: usize = 4;

const KEY_LABELS: [&str; NUM_PADS] = [
    "1", "2", "3", "4",
    "Q", "W", "E", "R",
    "A", "S", "D", "F",
    "Z", "X", "C", "V",
];

pub fn draw_pad_grid(frame: &mut Frame, area: Rect, state: &DisplayState) {
    let row_constraints = [Constraint::Percentage(25); ROWS];
    let col_constraints = [Constraint::Percentage(25); COLS];

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(row_constraints)
        .split(area);

    for (row_idx, row_area) in rows.iter().enumerate() {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(col_constraints)
            .split(*row_area);

        for (col_idx, cell_area) in cols.iter().enumerate() {
            let pad_idx = row_idx * COLS + col_idx;
            let lit = state.pads_lit[pad_idx];
            let selected = state.selected_pad as usize == pad_idx;

            let style = if lit {
                Style::default().fg(Color::Black).bg(Color::Cyan)
            } else if selected {
                Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };

            let cell = Paragraph::new(KEY_LABELS[pad_idx])
                .alignment(Alignment::Center)
                .style(style)
                .block(Block::default().borders(Borders::ALL).border_style(style));
            frame.render_widget(cell, *cell_area);
        }
    }
}
