use crate::domain::model::{Board, Reveal};
use crate::utils::error::{GameError, Result};

/// Identifies one setup run; only the newest ticket may install its board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetupTicket {
    generation: u64,
}

impl SetupTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStatus {
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Owns the board of the running game and dispatches reveals to it.
#[derive(Debug)]
pub struct GameSession {
    board: Option<Board>,
    generation: u64,
    status: SessionStatus,
    recent_clue: Option<String>,
}

impl Default for GameSession {
    fn default() -> Self {
        Self::new()
    }
}

impl GameSession {
    pub fn new() -> Self {
        Self {
            board: None,
            generation: 0,
            status: SessionStatus::Idle,
            recent_clue: None,
        }
    }

    /// 開始新的一局：清空目前棋盤並發出新的 ticket
    pub fn begin_setup(&mut self) -> SetupTicket {
        self.generation += 1;
        self.board = None;
        self.recent_clue = None;
        self.status = SessionStatus::Loading;

        tracing::debug!("Setup #{} started", self.generation);
        SetupTicket {
            generation: self.generation,
        }
    }

    /// Installs the outcome of a setup run. Returns `false` when the ticket was
    /// superseded by a later restart and the outcome was dropped.
    pub fn finish_setup(&mut self, ticket: SetupTicket, outcome: Result<Board>) -> bool {
        match outcome {
            Ok(board) => self.install_board(ticket, board),
            Err(e) => self.fail_setup(ticket, &e),
        }
    }

    pub fn install_board(&mut self, ticket: SetupTicket, board: Board) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        self.board = Some(board);
        self.status = SessionStatus::Ready;
        true
    }

    /// 失敗時棋盤維持空白，不留下半套資料
    pub fn fail_setup(&mut self, ticket: SetupTicket, error: &GameError) -> bool {
        if !self.is_current(ticket) {
            return false;
        }

        tracing::error!("❌ Game setup failed: {}", error);
        self.board = None;
        self.status = SessionStatus::Failed(error.user_friendly_message());
        true
    }

    fn is_current(&self, ticket: SetupTicket) -> bool {
        if ticket.generation != self.generation {
            tracing::debug!(
                "Discarding setup #{} result, #{} is current",
                ticket.generation,
                self.generation
            );
            return false;
        }
        true
    }

    pub fn reveal(&mut self, category: usize, clue: usize) -> Result<Reveal> {
        let board = self
            .board
            .as_mut()
            .ok_or_else(|| GameError::data_unavailable("no board loaded"))?;

        let reveal = board.reveal(category, clue)?;
        if let Some(text) = reveal.recent_clue() {
            self.recent_clue = Some(text.to_string());
        }

        Ok(reveal)
    }

    pub fn board(&self) -> Option<&Board> {
        self.board.as_ref()
    }

    pub fn status(&self) -> &SessionStatus {
        &self.status
    }

    pub fn recent_clue(&self) -> Option<&str> {
        self.recent_clue.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{BoardShape, Category, Clue, RevealState};

    fn small_board(tag: &str) -> Board {
        let shape = BoardShape {
            categories: 2,
            clues_per_category: 2,
        };
        let categories = (0..2)
            .map(|c| {
                Category::new(
                    format!("{} {}", tag, c),
                    (0..2)
                        .map(|q| Clue::new(format!("{}q{}{}", tag, c, q), format!("{}a{}{}", tag, c, q)))
                        .collect(),
                )
            })
            .collect();
        Board::new(shape, categories).unwrap()
    }

    #[test]
    fn test_reveal_tracks_recent_clue() {
        let mut session = GameSession::new();
        let ticket = session.begin_setup();
        assert!(session.finish_setup(ticket, Ok(small_board("x"))));
        assert_eq!(session.status(), &SessionStatus::Ready);

        session.reveal(1, 0).unwrap();
        assert_eq!(session.recent_clue(), Some("xq10"));

        // 顯示答案時不更新最近題目
        session.reveal(1, 0).unwrap();
        assert_eq!(session.recent_clue(), Some("xq10"));

        session.reveal(0, 1).unwrap();
        assert_eq!(session.recent_clue(), Some("xq01"));

        let recall = session.reveal(1, 0).unwrap();
        assert_eq!(recall, Reveal::Recall("xq10".to_string()));
        assert_eq!(session.recent_clue(), Some("xq10"));
    }

    #[test]
    fn test_restart_does_not_leak_reveal_state() {
        let mut session = GameSession::new();
        let first = session.begin_setup();
        session.finish_setup(first, Ok(small_board("x")));
        session.reveal(0, 0).unwrap();
        session.reveal(0, 0).unwrap();

        let second = session.begin_setup();
        assert!(session.board().is_none());
        assert_eq!(session.recent_clue(), None);
        session.finish_setup(second, Ok(small_board("x")));

        let board = session.board().unwrap();
        assert!(board
            .categories()
            .iter()
            .flat_map(|c| c.clues())
            .all(|c| c.state() == RevealState::Hidden));
    }

    #[test]
    fn test_stale_setup_is_discarded() {
        let mut session = GameSession::new();
        let stale = session.begin_setup();
        let current = session.begin_setup();

        assert!(session.finish_setup(current, Ok(small_board("new"))));
        assert!(!session.finish_setup(stale, Ok(small_board("old"))));

        assert_eq!(session.board().unwrap().categories()[0].title(), "new 0");
        assert!(current.generation() > stale.generation());
    }

    #[test]
    fn test_failed_setup_leaves_board_empty() {
        let mut session = GameSession::new();
        let ticket = session.begin_setup();
        session.finish_setup(ticket, Err(GameError::data_unavailable("offline")));

        assert!(session.board().is_none());
        assert!(matches!(session.status(), SessionStatus::Failed(_)));
        assert!(matches!(
            session.reveal(0, 0),
            Err(GameError::DataUnavailable { .. })
        ));
    }

    #[test]
    fn test_out_of_range_reveal_keeps_recent_clue() {
        let mut session = GameSession::new();
        let ticket = session.begin_setup();
        session.finish_setup(ticket, Ok(small_board("x")));
        session.reveal(0, 0).unwrap();

        assert!(matches!(
            session.reveal(2, 0),
            Err(GameError::IndexOutOfRange { .. })
        ));
        assert_eq!(session.recent_clue(), Some("xq00"));
    }
}
