use crate::core::{ConfigProvider, TriviaSource};
use crate::domain::model::{Board, BoardShape, Category, CategoryDetail, Clue};
use crate::utils::error::{GameError, Result};
use futures::future::join_all;
use rand::rngs::StdRng;
use rand::seq::{index, SliceRandom};
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::sync::Arc;

/// Samples categories and clues from a `TriviaSource` to build a fresh `Board`.
pub struct Selector<S: TriviaSource> {
    source: Arc<S>,
    shape: BoardShape,
    pool_size: usize,
}

impl<S: TriviaSource> Clone for Selector<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            shape: self.shape,
            pool_size: self.pool_size,
        }
    }
}

impl<S: TriviaSource> Selector<S> {
    pub fn new<C: ConfigProvider>(source: S, config: &C) -> Self {
        Self {
            source: Arc::new(source),
            shape: config.board_shape(),
            pool_size: config.pool_size(),
        }
    }

    pub fn shape(&self) -> BoardShape {
        self.shape
    }

    pub async fn select_categories(&self) -> Result<Board> {
        let mut rng = StdRng::from_entropy();
        self.select_categories_with(&mut rng).await
    }

    /// 從候選池隨機挑分類；線索不足的分類會以池中下一個分類遞補，
    /// 池子用完才回報 `DataUnavailable`
    pub async fn select_categories_with<R: Rng + Send>(&self, rng: &mut R) -> Result<Board> {
        let wanted = self.shape.categories;

        let summaries = self.source.list_categories(self.pool_size).await?;
        let mut seen = HashSet::new();
        let mut pool: Vec<u64> = summaries
            .into_iter()
            .map(|c| c.id)
            .filter(|id| seen.insert(*id))
            .collect();

        if pool.len() < wanted {
            return Err(GameError::data_unavailable(format!(
                "source offered {} distinct categories, need {}",
                pool.len(),
                wanted
            )));
        }

        tracing::info!(
            "🎲 Sampling {} of {} categories ({} clues each)",
            wanted,
            pool.len(),
            self.shape.clues_per_category
        );

        // 洗牌後依序取用即為不放回的均勻抽樣，剩下的當遞補
        pool.shuffle(rng);
        let mut reserve = pool.into_iter();
        let mut chosen: Vec<Category> = Vec::with_capacity(wanted);

        while chosen.len() < wanted {
            let batch: Vec<u64> = reserve.by_ref().take(wanted - chosen.len()).collect();
            if batch.is_empty() {
                return Err(GameError::data_unavailable(format!(
                    "only {} of {} categories have {} usable clues",
                    chosen.len(),
                    wanted,
                    self.shape.clues_per_category
                )));
            }

            let fetched = join_all(batch.iter().map(|id| self.source.get_category(*id))).await;

            for (id, detail) in batch.into_iter().zip(fetched) {
                match self.sample_clues(detail?, rng) {
                    Some(category) => chosen.push(category),
                    None => tracing::warn!(
                        "⚠️ Category {} has fewer than {} usable clues, picking another",
                        id,
                        self.shape.clues_per_category
                    ),
                }
            }
        }

        let board = Board::new(self.shape, chosen)?;
        tracing::info!(
            "✅ Board ready: {}",
            board
                .categories()
                .iter()
                .map(|c| c.title())
                .collect::<Vec<_>>()
                .join(", ")
        );
        Ok(board)
    }

    /// `None` when the category cannot fill a column.
    fn sample_clues<R: Rng>(&self, detail: CategoryDetail, rng: &mut R) -> Option<Category> {
        let wanted = self.shape.clues_per_category;

        let mut seen = HashSet::new();
        let usable: Vec<(String, String)> = detail
            .clues
            .into_iter()
            .filter(|c| !c.question.trim().is_empty() && !c.answer.trim().is_empty())
            .map(|c| (c.question, c.answer))
            .filter(|pair| seen.insert(pair.clone()))
            .collect();

        if usable.len() < wanted {
            return None;
        }

        let clues = index::sample(rng, usable.len(), wanted)
            .into_iter()
            .map(|i| {
                let (question, answer) = &usable[i];
                Clue::new(question.as_str(), answer.as_str())
            })
            .collect();

        Some(Category::new(detail.title, clues))
    }
}
