pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::HttpTriviaSource;
pub use config::GameConfig;
pub use core::{GameSession, Selector, TriviaGame};
pub use domain::model::{Board, BoardShape, Category, Clue, Reveal, RevealState};
pub use utils::error::{GameError, Result};
