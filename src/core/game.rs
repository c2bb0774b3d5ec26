use crate::core::session::{GameSession, SetupTicket};
use crate::core::{Selector, TriviaSource};
use crate::domain::model::{Board, Reveal};
use crate::utils::error::Result;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc::UnboundedSender;

/// Result of a background setup, tagged with the ticket it was started under.
pub type SetupOutcome = (SetupTicket, Result<Board>);

/// Runs the selector for each new game and hands the board to the session.
pub struct TriviaGame<S: TriviaSource + 'static> {
    selector: Selector<S>,
    session: GameSession,
    seed: Option<u64>,
}

impl<S: TriviaSource + 'static> TriviaGame<S> {
    pub fn new(selector: Selector<S>) -> Self {
        Self {
            selector,
            session: GameSession::new(),
            seed: None,
        }
    }

    /// 固定種子；每局以 seed + 局數 推導，重開仍會換一組題目
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    fn rng_for(&self, ticket: SetupTicket) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(ticket.generation())),
            None => StdRng::from_entropy(),
        }
    }

    /// Starts a new game and waits for its board.
    pub async fn restart(&mut self) -> Result<()> {
        let ticket = self.session.begin_setup();
        let mut rng = self.rng_for(ticket);

        match self.selector.select_categories_with(&mut rng).await {
            Ok(board) => {
                self.session.install_board(ticket, board);
                Ok(())
            }
            Err(e) => {
                self.session.fail_setup(ticket, &e);
                Err(e)
            }
        }
    }

    /// Starts a new game in a background task; the outcome arrives on `tx` and
    /// must be passed to [`TriviaGame::install`]. Must be called inside a tokio runtime.
    pub fn spawn_setup(&mut self, tx: &UnboundedSender<SetupOutcome>) -> SetupTicket {
        let ticket = self.session.begin_setup();
        let mut rng = self.rng_for(ticket);
        let selector = self.selector.clone();
        let tx = tx.clone();

        tokio::spawn(async move {
            let outcome = selector.select_categories_with(&mut rng).await;
            if tx.send((ticket, outcome)).is_err() {
                tracing::debug!("Setup #{} finished after shutdown", ticket.generation());
            }
        });

        ticket
    }

    /// Returns `false` when the outcome belongs to a superseded game.
    pub fn install(&mut self, outcome: SetupOutcome) -> bool {
        let (ticket, result) = outcome;
        self.session.finish_setup(ticket, result)
    }

    pub fn reveal(&mut self, category: usize, clue: usize) -> Result<Reveal> {
        self.session.reveal(category, clue)
    }

    pub fn session(&self) -> &GameSession {
        &self.session
    }
}
