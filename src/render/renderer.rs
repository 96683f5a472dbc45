use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::game::Position;
use crate::leaderboard::Leaderboard;
use crate::session::{GameSession, RunState};

/// Draws a session onto a ratatui frame. Pure output: reads the session,
/// decides nothing.
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, session: &GameSession) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Play field + leaderboard
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let header = self.render_header(session);
        frame.render_widget(header, chunks[0]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Min(0), Constraint::Length(26)])
            .split(chunks[1]);

        let round_over = session.run_state() == RunState::Stopped && !session.state().is_alive;
        if round_over {
            let game_over = self.render_game_over(session);
            frame.render_widget(game_over, body[0]);
        } else {
            let grid = self.render_grid(body[0], session);
            frame.render_widget(grid, body[0]);
        }

        let board = self.render_leaderboard(session.leaderboard());
        frame.render_widget(board, body[1]);

        let controls = self.render_controls(chunks[2]);
        frame.render_widget(controls, chunks[2]);
    }

    fn render_header(&self, session: &GameSession) -> Paragraph<'_> {
        let state = session.state();
        let stats = session.stats();

        let mut spans = vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                state.score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(stats.best_score.to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(stats.format_time(), Style::default().fg(Color::White)),
        ];

        if !session.player_name().is_empty() {
            spans.push(Span::raw("    "));
            spans.push(Span::styled("Player: ", Style::default().fg(Color::Yellow)));
            spans.push(Span::styled(
                session.player_name().to_owned(),
                Style::default().fg(Color::Cyan),
            ));
        }

        Paragraph::new(vec![Line::from(spans)]).alignment(Alignment::Center)
    }

    fn render_grid(&self, _area: Rect, session: &GameSession) -> Paragraph<'_> {
        let state = session.state();
        let mut lines = Vec::with_capacity(state.grid_rows as usize);

        for y in 0..state.grid_rows {
            let mut spans = Vec::with_capacity(state.grid_cols as usize);

            for x in 0..state.grid_cols {
                let pos = Position::new(x, y);

                let cell = if pos == state.snake.head() {
                    Span::styled(
                        "█",
                        Style::default()
                            .fg(Color::Green)
                            .add_modifier(Modifier::BOLD),
                    )
                } else if state.snake.occupies(pos) {
                    Span::styled("█", Style::default().fg(Color::Green))
                } else if pos == state.food {
                    Span::styled(
                        "●",
                        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                    )
                } else {
                    Span::styled("·", Style::default().fg(Color::DarkGray))
                };

                spans.push(cell);
            }

            lines.push(Line::from(spans));
        }

        let title = match session.run_state() {
            RunState::Paused => " Snake [paused] ",
            RunState::Stopped => " Snake [press Enter to start] ",
            RunState::Running => " Snake ",
        };

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_game_over(&self, session: &GameSession) -> Paragraph<'_> {
        let text = vec![
            Line::from(""),
            Line::from(vec![Span::styled(
                "GAME OVER",
                Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
            )]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Final Score: ", Style::default().fg(Color::Yellow)),
                Span::styled(
                    session.state().score.to_string(),
                    Style::default()
                        .fg(Color::White)
                        .add_modifier(Modifier::BOLD),
                ),
            ]),
            Line::from(""),
            Line::from(vec![
                Span::styled("Press ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Enter",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to play again or ", Style::default().fg(Color::Gray)),
                Span::styled(
                    "Q",
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                Span::styled(" to quit", Style::default().fg(Color::Gray)),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Red)),
        )
    }

    fn render_leaderboard(&self, board: &Leaderboard) -> Table<'_> {
        let rows: Vec<Row> = board
            .entries()
            .iter()
            .enumerate()
            .map(|(rank, entry)| {
                Row::new(vec![
                    Cell::from((rank + 1).to_string()),
                    Cell::from(entry.name.clone()),
                    Cell::from(entry.score.to_string()),
                ])
            })
            .collect();

        Table::new(
            rows,
            [
                Constraint::Length(3),
                Constraint::Min(10),
                Constraint::Length(6),
            ],
        )
        .header(
            Row::new(vec!["#", "Name", "Score"]).style(
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
        )
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Top 10 "),
        )
    }

    fn render_controls(&self, _area: Rect) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" steer | "),
            Span::styled("Enter", Style::default().fg(Color::Green)),
            Span::raw(" start | "),
            Span::styled("P", Style::default().fg(Color::Yellow)),
            Span::raw(" pause | "),
            Span::styled("Space", Style::default().fg(Color::Yellow)),
            Span::raw(" resume | "),
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
