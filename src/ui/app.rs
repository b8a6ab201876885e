use crate::game::{BoardEngine, Direction, GameStatus};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{backend::Backend, style::Color, Terminal};
use std::io;
use std::time::{Duration, Instant};
use tracing::{info, warn};

use super::game_view::{self, ViewState};
use super::intro::{Intro, TITLE};

const REJECTED_MOVE_FLASH: Duration = Duration::from_millis(400);
const UNDO_FLASH: Duration = Duration::from_millis(800);

/// Terminal UI settings.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Play the title and instructions animation at startup.
    pub intro: bool,
    /// Input poll interval in milliseconds.
    pub tick_rate_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        UiConfig {
            intro: true,
            tick_rate_ms: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Playing,
    /// Waiting for the player to answer the replay prompt.
    GameOver(GameStatus),
}

/// A status line that disappears at `expires`, or stays until replaced.
#[derive(Debug, Clone)]
struct Flash {
    text: &'static str,
    color: Color,
    expires: Option<Instant>,
}

pub struct App {
    engine: BoardEngine,
    phase: Phase,
    intro: Option<Intro>,
    flash: Option<Flash>,
    tick_rate: Duration,
    should_quit: bool,
}

impl App {
    pub fn new(engine: BoardEngine, config: &UiConfig) -> Self {
        App {
            engine,
            phase: Phase::Playing,
            intro: config.intro.then(|| Intro::start(Instant::now())),
            flash: None,
            tick_rate: Duration::from_millis(config.tick_rate_ms),
            should_quit: false,
        }
    }

    pub fn engine(&self) -> &BoardEngine {
        &self.engine
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Main application loop
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            self.tick(Instant::now());
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            self.handle_events()?;
        }
        Ok(())
    }

    /// Handle keyboard events
    fn handle_events(&mut self) -> io::Result<()> {
        if event::poll(self.tick_rate)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key);
                }
            }
        }
        Ok(())
    }

    /// Advance timers: finish the intro and drop expired messages.
    fn tick(&mut self, now: Instant) {
        if let Some(intro) = self.intro.as_mut() {
            intro.update(now);
            if intro.is_finished() {
                self.intro = None;
            }
        }
        if self
            .flash
            .as_ref()
            .and_then(|f| f.expires)
            .is_some_and(|expires| now >= expires)
        {
            self.flash = None;
        }
    }

    /// Handle key press
    fn handle_key(&mut self, key: KeyEvent) {
        if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
            self.quit();
            return;
        }

        // Keys pressed during the intro only skip it
        if self.intro.take().is_some() {
            return;
        }

        match self.phase {
            Phase::Playing => match key.code {
                KeyCode::Char('u') => self.undo(),
                code => {
                    if let Some(direction) = direction_for(code) {
                        self.play(direction);
                    }
                }
            },
            Phase::GameOver(_) => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => self.restart(),
                KeyCode::Char('n') | KeyCode::Char('N') => self.quit(),
                _ => {}
            },
        }
    }

    /// Move, then spawn and check for the end of the game if anything moved.
    fn play(&mut self, direction: Direction) {
        self.flash = None;
        self.engine.apply_move(direction);

        if !self.engine.move_changed_board() {
            self.flash = Some(Flash {
                text: "Not allowed!",
                color: Color::Red,
                expires: Some(Instant::now() + REJECTED_MOVE_FLASH),
            });
            return;
        }

        if let Err(e) = self.engine.spawn_tile() {
            warn!(error = %e, "spawn after a changing move failed");
        }

        match self.engine.status() {
            GameStatus::Playing => {}
            status => self.finish_game(status),
        }
    }

    fn finish_game(&mut self, status: GameStatus) {
        info!(
            outcome = ?status,
            score = self.engine.score(),
            best = self.engine.best_score(),
            max_tile = self.engine.max_tile(),
            "game over"
        );
        let (text, color) = match status {
            GameStatus::Won => ("You WON!", Color::Green),
            _ => ("You LOST!", Color::Red),
        };
        self.flash = Some(Flash {
            text,
            color,
            expires: None,
        });
        self.phase = Phase::GameOver(status);
        self.save_best();
    }

    fn undo(&mut self) {
        let text = if self.engine.undo() {
            "Undone."
        } else {
            "Nothing to undo."
        };
        self.flash = Some(Flash {
            text,
            color: Color::Yellow,
            expires: Some(Instant::now() + UNDO_FLASH),
        });
    }

    fn restart(&mut self) {
        let size = self.engine.size();
        if let Err(e) = self.engine.reset(size) {
            warn!(error = %e, "could not start a new game");
            self.quit();
            return;
        }
        self.phase = Phase::Playing;
        self.flash = None;
    }

    fn quit(&mut self) {
        self.save_best();
        self.should_quit = true;
    }

    fn save_best(&mut self) {
        if let Err(e) = self.engine.save_best() {
            warn!(error = %e, "failed to save best score");
        }
    }

    /// Render the UI
    fn render(&self, frame: &mut ratatui::Frame) {
        let view = ViewState {
            title_rows: self.intro.map_or(TITLE.len(), |intro| intro.title_rows()),
            hint: self.intro.and_then(|intro| intro.hint()),
            message: self.flash.as_ref().map(|f| (f.text, f.color)),
            prompt: matches!(self.phase, Phase::GameOver(_)),
        };
        game_view::render(frame, &self.engine, &view);
    }
}

fn direction_for(code: KeyCode) -> Option<Direction> {
    match code {
        KeyCode::Left | KeyCode::Char('h') | KeyCode::Char('a') => Some(Direction::Left),
        KeyCode::Right | KeyCode::Char('l') | KeyCode::Char('d') => Some(Direction::Right),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::Char('w') => Some(Direction::Up),
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Char('s') => Some(Direction::Down),
        _ => None,
    }
}
