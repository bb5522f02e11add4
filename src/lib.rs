//! # quizgen
//!
//! Quiz generation over an external language model, plus a terminal player.
//!
//! The crate has two halves: a small HTTP server that turns generation
//! options into validated multiple-choice questions
//! (`POST /api/quiz/generate`), and a client + terminal player that
//! consumes the endpoint.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use quizgen::{GenerationError, GenerationOptions, Quiz, QuizClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), GenerationError> {
//!     let client = QuizClient::new("http://127.0.0.1:8750");
//!     let questions = client
//!         .generate_quiz_questions(&GenerationOptions::default())
//!         .await?;
//!
//!     Quiz::new(questions).run()?;
//!     Ok(())
//! }
//! ```

mod app;
pub mod client;
pub mod generation;
pub mod models;
pub mod protocol;
pub mod server;
mod ui;

use std::io::{self, Stdout};
use std::panic;

use crossterm::ExecutableCommand;
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{Terminal, backend::CrosstermBackend};

pub use app::App;
pub use client::QuizClient;
pub use models::{AppState, Difficulty, GenerationOptions, QuizQuestion};

/// Error type for quiz generation and playback.
#[derive(Debug)]
pub enum GenerationError {
    /// The external completion API failed or timed out.
    Upstream(String),
    /// The completion API answered something that is not the expected
    /// JSON envelope.
    InvalidResponse,
    /// Every candidate question failed validation.
    NoValidQuestions,
    /// A required configuration variable is missing.
    MissingConfig(&'static str),
    /// Transport failure while talking to the generation endpoint.
    Request(reqwest::Error),
    /// The generation endpoint rejected the request.
    Server(String),
    /// IO error from the listener or the terminal.
    Io(io::Error),
}

impl std::fmt::Display for GenerationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenerationError::Upstream(msg) => write!(f, "Falha na geração: {}", msg),
            GenerationError::InvalidResponse => {
                write!(f, "O modelo retornou uma resposta em formato inválido")
            }
            GenerationError::NoValidQuestions => {
                write!(f, "Nenhuma pergunta válida foi gerada")
            }
            GenerationError::MissingConfig(name) => {
                write!(f, "Variável de ambiente obrigatória: {}", name)
            }
            GenerationError::Request(e) => write!(f, "Falha de rede: {}", e),
            GenerationError::Server(msg) => write!(f, "{}", msg),
            GenerationError::Io(e) => write!(f, "Erro de IO: {}", e),
        }
    }
}

impl std::error::Error for GenerationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GenerationError::Request(e) => Some(e),
            GenerationError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for GenerationError {
    fn from(err: io::Error) -> Self {
        GenerationError::Io(err)
    }
}

impl From<reqwest::Error> for GenerationError {
    fn from(err: reqwest::Error) -> Self {
        GenerationError::Request(err)
    }
}

/// A playable quiz over already-generated questions.
pub struct Quiz {
    app: App,
}

impl Quiz {
    /// Create a quiz from questions returned by the generation endpoint.
    pub fn new(questions: Vec<QuizQuestion>) -> Self {
        Self {
            app: App::new(questions),
        }
    }

    /// Run the quiz in the terminal.
    ///
    /// This will take over the terminal, display the player UI, and return
    /// when the user quits.
    pub fn run(mut self) -> Result<(), GenerationError> {
        let mut terminal = init_terminal()?;
        let result = run_event_loop(&mut terminal, &mut self.app);
        restore_terminal()?;
        result
    }
}

type AppTerminal = Terminal<CrosstermBackend<Stdout>>;

fn init_terminal() -> io::Result<AppTerminal> {
    setup_panic_hook();
    enable_raw_mode()?;
    io::stdout().execute(EnterAlternateScreen)?;
    Terminal::new(CrosstermBackend::new(io::stdout()))
}

fn restore_terminal() -> io::Result<()> {
    disable_raw_mode()?;
    io::stdout().execute(LeaveAlternateScreen)?;
    Ok(())
}

fn setup_panic_hook() {
    let original_hook = panic::take_hook();
    panic::set_hook(Box::new(move |panic_info| {
        let _ = disable_raw_mode();
        let _ = io::stdout().execute(LeaveAlternateScreen);
        original_hook(panic_info);
    }));
}

fn run_event_loop(terminal: &mut AppTerminal, app: &mut App) -> Result<(), GenerationError> {
    loop {
        terminal.draw(|frame| ui::render(frame, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }

            if handle_input(app, key.code) {
                break;
            }
        }
    }

    Ok(())
}

/// Returns true if the app should exit.
fn handle_input(app: &mut App, key: KeyCode) -> bool {
    match app.state {
        AppState::Welcome => handle_welcome_input(app, key),
        AppState::Quiz => handle_quiz_input(app, key),
        AppState::Result => handle_result_input(app, key),
    }
}

fn handle_welcome_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Enter => {
            app.start_quiz();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_quiz_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Up | KeyCode::Char('k') => {
            app.select_previous_option();
            false
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.select_next_option();
            false
        }
        KeyCode::Enter | KeyCode::Char(' ') => {
            app.submit_answer();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}

fn handle_result_input(app: &mut App, key: KeyCode) -> bool {
    match key {
        KeyCode::Down | KeyCode::Char('j') => {
            app.scroll_results_down();
            false
        }
        KeyCode::Up | KeyCode::Char('k') => {
            app.scroll_results_up();
            false
        }
        KeyCode::Char('r') | KeyCode::Char('R') => {
            app.restart();
            false
        }
        KeyCode::Char('q') | KeyCode::Char('Q') => true,
        _ => false,
    }
}
