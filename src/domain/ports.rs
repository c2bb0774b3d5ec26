use crate::domain::model::{BoardShape, CategoryDetail, CategorySummary};
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// Read-only trivia data source. Every failure surfaces as `DataUnavailable`.
#[async_trait]
pub trait TriviaSource: Send + Sync {
    async fn list_categories(&self, limit: usize) -> Result<Vec<CategorySummary>>;
    async fn get_category(&self, id: u64) -> Result<CategoryDetail>;
}

pub trait ConfigProvider: Send + Sync {
    fn base_url(&self) -> &str;
    fn board_shape(&self) -> BoardShape;
    fn pool_size(&self) -> usize;
    fn request_timeout(&self) -> Duration;
    fn strip_html(&self) -> bool;
    fn placeholder(&self) -> &str;
}
