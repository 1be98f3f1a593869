use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

use crate::game::{GameStatus, Snapshot};
use crate::metrics::GameMetrics;

// Neon palette: orange head, cyan body, magenta food
const HEAD: Color = Color::Rgb(0xff, 0x95, 0x00);
const BODY: Color = Color::Rgb(0x00, 0xcc, 0xff);
const FOOD: Color = Color::Rgb(0xd3, 0x00, 0xc5);

#[derive(Clone, Copy, PartialEq, Eq)]
enum Cell {
    Empty,
    Head,
    Body,
    Food,
}

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, snapshot: &Snapshot, metrics: &GameMetrics) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        frame.render_widget(self.render_stats(snapshot, metrics), chunks[0]);

        if snapshot.status == GameStatus::Ended {
            frame.render_widget(self.render_game_over(snapshot), chunks[1]);
        } else {
            frame.render_widget(self.render_grid(snapshot), chunks[1]);
        }

        frame.render_widget(self.render_controls(), chunks[2]);
    }

    fn render_grid(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let grid = snapshot.grid;
        let mut cells = vec![Cell::Empty; grid.cell_count()];
        let index = |x: i32, y: i32| y as usize * grid.columns + x as usize;

        cells[index(snapshot.food.x, snapshot.food.y)] = Cell::Food;
        for (i, pos) in snapshot.snake_cells.iter().enumerate() {
            cells[index(pos.x, pos.y)] = if i == 0 { Cell::Head } else { Cell::Body };
        }

        let lines: Vec<Line> = cells
            .chunks(grid.columns)
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|cell| match cell {
                        Cell::Head => Span::styled(
                            "██",
                            Style::default().fg(HEAD).add_modifier(Modifier::BOLD),
                        ),
                        Cell::Body => Span::styled("██", Style::default().fg(BODY)),
                        Cell::Food => Span::styled(
                            "◆ ",
                            Style::default().fg(FOOD).add_modifier(Modifier::BOLD),
                        ),
                        Cell::Empty => Span::styled("· ", Style::default().fg(Color::DarkGray)),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        let (title, border) = match snapshot.status {
            GameStatus::NotStarted => (" SPACE or an arrow key to start ", Color::Cyan),
            GameStatus::Paused => (" PAUSED - SPACE to resume ", Color::Yellow),
            _ if snapshot.boosted => (" Snake >> BOOST ", HEAD),
            _ => (" Snake ", Color::White),
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(border))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, snapshot: &Snapshot, metrics: &GameMetrics) -> Paragraph<'_> {
        let label = Style::default().fg(Color::Yellow);
        let value = Style::default().fg(Color::White);

        let speed = if snapshot.boosted {
            Span::styled(
                "BOOST",
                Style::default().fg(HEAD).add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(snapshot.base_speed.to_string(), value)
        };

        let text = vec![Line::from(vec![
            Span::styled("Score: ", label),
            Span::styled(
                snapshot.score.to_string(),
                value.add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("High: ", label),
            Span::styled(snapshot.high_score.to_string(), value),
            Span::raw("    "),
            Span::styled("Speed: ", label),
            speed,
            Span::raw("    "),
            Span::styled("Map: ", label),
            Span::styled(snapshot.map_size.to_string(), value),
            Span::raw("    "),
            Span::styled("Time: ", label),
            Span::styled(metrics.format_time(), value),
            Span::raw("    "),
            Span::styled("Games: ", label),
            Span::styled(metrics.games_played.to_string(), value),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }

    fn render_game_over(&self, snapshot: &Snapshot) -> Paragraph<'_> {
        let mut text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    snapshot.score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
        ];

        if snapshot.new_record {
            text.push(Line::from(vec![Span::styled(
                "NEW HIGH SCORE!",
                Style::default().fg(FOOD).add_modifier(Modifier::BOLD),
            )]));
        }

        text.extend([
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "R",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to restart or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ]);

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let key = Style::default().fg(Color::Cyan);
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→/WASD", key),
            Span::raw(" move | "),
            Span::styled("SPACE", key),
            Span::raw(" pause | "),
            Span::styled("Shift/B", key),
            Span::raw(" boost | "),
            Span::styled("+/-", key),
            Span::raw(" speed | "),
            Span::styled("1/2/3", key),
            Span::raw(" map | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" reset | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}
