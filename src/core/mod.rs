pub mod game;
pub mod selector;
pub mod session;

pub use crate::domain::model::{Board, BoardShape, Category, Clue, Reveal, RevealState};
pub use crate::domain::ports::{ConfigProvider, TriviaSource};
pub use crate::utils::error::Result;
pub use game::{SetupOutcome, TriviaGame};
pub use selector::Selector;
pub use session::{GameSession, SessionStatus, SetupTicket};
