use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io::{stderr, Stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::GameConfig;
use crate::input::{InputHandler, KeyAction};
use crate::leaderboard::Leaderboard;
use crate::render::Renderer;
use crate::session::GameSession;

/// Render cadence; game ticks run on their own configured interval
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

/// Interactive keyboard play in the terminal
pub struct HumanMode {
    session: GameSession,
    renderer: Renderer,
    input_handler: InputHandler,
    tick_interval: Duration,
    should_quit: bool,
}

impl HumanMode {
    pub fn new(config: GameConfig, leaderboard: Leaderboard, player_name: String) -> Self {
        let tick_interval = Duration::from_millis(config.tick_interval_ms);

        Self {
            session: GameSession::new(config, leaderboard, player_name),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            tick_interval,
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        let result = self.run_event_loop(&mut terminal).await;

        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_event_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = interval(self.tick_interval);
        let mut frame_timer = interval(FRAME_INTERVAL);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    if let Some(Ok(event)) = maybe_event {
                        self.handle_event(event);
                    }
                }

                // The single game tick source; the session decides whether
                // it moves anything
                _ = tick_timer.tick() => {
                    self.session.tick();
                }

                _ = frame_timer.tick() => {
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.session);
                    }).context("Failed to draw frame")?;
                }

                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) {
        if let Event::Key(key) = event {
            if key.kind != KeyEventKind::Press {
                return;
            }

            match self.input_handler.handle_key_event(key) {
                KeyAction::Steer(direction) => self.session.steer(direction),
                KeyAction::Start => self.session.start(),
                KeyAction::Pause => self.session.pause(),
                KeyAction::Resume => self.session.resume(),
                KeyAction::Quit => self.should_quit = true,
                KeyAction::None => {}
            }
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
    use crate::session::RunState;
    use tempfile::TempDir;

    fn mode_in(dir: &TempDir) -> HumanMode {
        let board = Leaderboard::open(dir.path().join("leaderboard.json"));
        HumanMode::new(GameConfig::small(), board, "tester".to_owned())
    }

    #[test]
    fn test_mode_starts_idle() {
        let dir = TempDir::new().unwrap();
        let mode = mode_in(&dir);

        assert_eq!(mode.session.run_state(), RunState::Stopped);
        assert_eq!(mode.tick_interval, Duration::from_millis(40));
        assert!(!mode.should_quit);
    }

    #[test]
    fn test_key_events_drive_the_session() {
        let dir = TempDir::new().unwrap();
        let mut mode = mode_in(&dir);

        let enter = Event::Key(KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE));
        mode.handle_event(enter);
        assert_eq!(mode.session.run_state(), RunState::Running);

        let p = Event::Key(KeyEvent::new(KeyCode::Char('p'), KeyModifiers::NONE));
        mode.handle_event(p);
        assert_eq!(mode.session.run_state(), RunState::Paused);

        let space = Event::Key(KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE));
        mode.handle_event(space);
        assert_eq!(mode.session.run_state(), RunState::Running);

        let q = Event::Key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        mode.handle_event(q);
        assert!(mode.should_quit);
    }

    #[test]
    fn test_key_release_is_ignored() {
        let dir = TempDir::new().unwrap();
        let mut mode = mode_in(&dir);

        let mut release = KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE);
        release.kind = KeyEventKind::Release;
        mode.handle_event(Event::Key(release));

        assert_eq!(mode.session.run_state(), RunState::Stopped);
    }
}
