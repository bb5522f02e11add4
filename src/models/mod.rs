//! Domain types shared by the client, the server and the player.

mod options;
mod question;
mod state;

pub use options::{Difficulty, GenerationOptions};
pub use question::QuizQuestion;
pub use state::AppState;
