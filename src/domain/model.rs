use crate::utils::error::{GameError, Result};
use serde::{Deserialize, Serialize};

/// Board dimensions: `categories` columns by `clues_per_category` rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardShape {
    pub categories: usize,
    pub clues_per_category: usize,
}

impl Default for BoardShape {
    fn default() -> Self {
        Self {
            categories: 6,
            clues_per_category: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RevealState {
    #[default]
    Hidden,
    Question,
    Answer,
}

impl RevealState {
    /// 狀態只會 Hidden -> Question -> Answer 前進，Answer 為終態
    pub fn next(self) -> Self {
        match self {
            Self::Hidden => Self::Question,
            Self::Question | Self::Answer => Self::Answer,
        }
    }
}

/// What a reveal produced and where it should be painted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reveal {
    /// Cell now shows the question; it is also the most recently shown clue.
    Question(String),
    /// Cell now shows the answer.
    Answer(String),
    /// Cell keeps its answer; the question is shown again in the recent-clue area only.
    Recall(String),
}

impl Reveal {
    pub fn text(&self) -> &str {
        match self {
            Self::Question(text) | Self::Answer(text) | Self::Recall(text) => text,
        }
    }

    /// Text for the clicked cell, `None` when the cell must stay as it is.
    pub fn cell_text(&self) -> Option<&str> {
        match self {
            Self::Question(text) | Self::Answer(text) => Some(text),
            Self::Recall(_) => None,
        }
    }

    /// Text for the secondary "recent clue" display, if this reveal updates it.
    pub fn recent_clue(&self) -> Option<&str> {
        match self {
            Self::Question(text) | Self::Recall(text) => Some(text),
            Self::Answer(_) => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Clue {
    question: String,
    answer: String,
    state: RevealState,
}

impl Clue {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
            state: RevealState::Hidden,
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    /// Text currently painted in this clue's cell, `None` while hidden.
    pub fn display_text(&self) -> Option<&str> {
        match self.state {
            RevealState::Hidden => None,
            RevealState::Question => Some(&self.question),
            RevealState::Answer => Some(&self.answer),
        }
    }

    pub fn reveal(&mut self) -> Reveal {
        let reveal = match self.state {
            RevealState::Hidden => Reveal::Question(self.question.clone()),
            RevealState::Question => Reveal::Answer(self.answer.clone()),
            RevealState::Answer => Reveal::Recall(self.question.clone()),
        };
        self.state = self.state.next();
        reveal
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    title: String,
    clues: Vec<Clue>,
}

impl Category {
    pub fn new(title: impl Into<String>, clues: Vec<Clue>) -> Self {
        Self {
            title: title.into(),
            clues,
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn clues(&self) -> &[Clue] {
        &self.clues
    }
}

/// One game's worth of categories. Built by the selector, replaced wholesale on restart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    shape: BoardShape,
    categories: Vec<Category>,
}

impl Board {
    /// Fails unless there are exactly `shape.categories` categories each holding
    /// exactly `shape.clues_per_category` clues.
    pub fn new(shape: BoardShape, categories: Vec<Category>) -> Result<Self> {
        if categories.len() != shape.categories {
            return Err(GameError::data_unavailable(format!(
                "expected {} categories, got {}",
                shape.categories,
                categories.len()
            )));
        }

        if let Some(short) = categories
            .iter()
            .find(|c| c.clues.len() != shape.clues_per_category)
        {
            return Err(GameError::data_unavailable(format!(
                "category '{}' has {} clues, expected {}",
                short.title,
                short.clues.len(),
                shape.clues_per_category
            )));
        }

        Ok(Self { shape, categories })
    }

    pub fn shape(&self) -> BoardShape {
        self.shape
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn clue(&self, category: usize, clue: usize) -> Result<&Clue> {
        self.categories
            .get(category)
            .and_then(|c| c.clues.get(clue))
            .ok_or_else(|| self.out_of_range(category, clue))
    }

    pub fn reveal(&mut self, category: usize, clue: usize) -> Result<Reveal> {
        let err = self.out_of_range(category, clue);
        let target = self
            .categories
            .get_mut(category)
            .and_then(|c| c.clues.get_mut(clue))
            .ok_or(err)?;

        Ok(target.reveal())
    }

    fn out_of_range(&self, category: usize, clue: usize) -> GameError {
        GameError::IndexOutOfRange {
            category,
            clue,
            categories: self.shape.categories,
            clues_per_category: self.shape.clues_per_category,
        }
    }
}

/// Entry of the data source's category listing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategorySummary {
    pub id: u64,
    #[serde(default)]
    pub title: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawClue {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub question: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub answer: String,
}

/// A category with its full clue pool as served by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CategoryDetail {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub clues: Vec<RawClue>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(shape: BoardShape) -> Board {
        let categories = (0..shape.categories)
            .map(|c| {
                let clues = (0..shape.clues_per_category)
                    .map(|q| Clue::new(format!("q{}-{}", c, q), format!("a{}-{}", c, q)))
                    .collect();
                Category::new(format!("Category {}", c), clues)
            })
            .collect();
        Board::new(shape, categories).unwrap()
    }

    #[test]
    fn test_reveal_sequence_question_answer_question() {
        let mut clue = Clue::new("2+2", "4");

        assert_eq!(clue.reveal(), Reveal::Question("2+2".to_string()));
        assert_eq!(clue.state(), RevealState::Question);
        assert_eq!(clue.reveal(), Reveal::Answer("4".to_string()));
        assert_eq!(clue.state(), RevealState::Answer);
        assert_eq!(clue.reveal(), Reveal::Recall("2+2".to_string()));
        assert_eq!(clue.state(), RevealState::Answer);
    }

    #[test]
    fn test_answer_state_is_idempotent() {
        let mut clue = Clue::new("Hamlet Author", "Shakespeare");
        clue.reveal();
        clue.reveal();

        for _ in 0..5 {
            let reveal = clue.reveal();
            assert_eq!(reveal.text(), "Hamlet Author");
            assert_eq!(reveal.cell_text(), None);
            assert_eq!(reveal.recent_clue(), Some("Hamlet Author"));
            assert_eq!(clue.state(), RevealState::Answer);
            assert_eq!(clue.display_text(), Some("Shakespeare"));
        }
    }

    #[test]
    fn test_reveal_surfaces() {
        let question = Reveal::Question("q".to_string());
        assert_eq!(question.cell_text(), Some("q"));
        assert_eq!(question.recent_clue(), Some("q"));

        let answer = Reveal::Answer("a".to_string());
        assert_eq!(answer.cell_text(), Some("a"));
        assert_eq!(answer.recent_clue(), None);
    }

    #[test]
    fn test_board_scenario_cells_are_independent() {
        let mut board = board(BoardShape::default());

        assert_eq!(board.reveal(0, 0).unwrap().text(), "q0-0");
        assert_eq!(board.clue(0, 0).unwrap().state(), RevealState::Question);
        assert_eq!(board.reveal(0, 0).unwrap().text(), "a0-0");
        assert_eq!(board.clue(0, 0).unwrap().state(), RevealState::Answer);

        assert_eq!(board.reveal(3, 4).unwrap(), Reveal::Question("q3-4".to_string()));
        assert_eq!(board.clue(3, 4).unwrap().state(), RevealState::Question);
        assert_eq!(board.clue(0, 0).unwrap().state(), RevealState::Answer);
    }

    #[test]
    fn test_reveal_out_of_range_does_not_mutate() {
        let mut board = board(BoardShape::default());
        let before = board.clone();

        for (c, q) in [(6, 0), (0, 5), (99, 99)] {
            match board.reveal(c, q) {
                Err(GameError::IndexOutOfRange { category, clue, .. }) => {
                    assert_eq!((category, clue), (c, q));
                }
                other => panic!("expected IndexOutOfRange, got {:?}", other),
            }
        }

        assert_eq!(board, before);
    }

    #[test]
    fn test_board_rejects_wrong_shape() {
        let shape = BoardShape {
            categories: 2,
            clues_per_category: 1,
        };
        let one = vec![Category::new("Only", vec![Clue::new("q", "a")])];
        assert!(Board::new(shape, one).is_err());

        let short = vec![
            Category::new("A", vec![Clue::new("q", "a")]),
            Category::new("B", vec![]),
        ];
        assert!(Board::new(shape, short).is_err());
    }

    #[test]
    fn test_category_detail_tolerates_nulls_and_extra_fields() {
        let detail: CategoryDetail = serde_json::from_value(serde_json::json!({
            "id": 11,
            "title": "math",
            "clues_count": 2,
            "clues": [
                {"id": 1, "question": "2+2", "answer": "4", "value": 200},
                {"id": 2, "question": null, "answer": "x", "invalid_count": 1}
            ]
        }))
        .unwrap();

        assert_eq!(detail.clues.len(), 2);
        assert_eq!(detail.clues[1].question, "");
    }
}
