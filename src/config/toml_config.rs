use crate::core::ConfigProvider;
use crate::domain::model::BoardShape;
use crate::utils::error::{GameError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://jservice.io/api/";
/// 題庫 API 單次最多只回傳 100 個分類
pub const MAX_POOL_SIZE: usize = 100;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameConfig {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub board: BoardConfig,
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    pub base_url: String,
    pub pool_size: usize,
    pub timeout_seconds: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            pool_size: MAX_POOL_SIZE,
            timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub categories: usize,
    pub clues_per_category: usize,
}

impl Default for BoardConfig {
    fn default() -> Self {
        let shape = BoardShape::default();
        Self {
            categories: shape.categories,
            clues_per_category: shape.clues_per_category,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub placeholder: String,
    pub strip_html: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            placeholder: "?".to_string(),
            strip_html: true,
        }
    }
}

impl GameConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(GameError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GameError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${TRIVIA_API})
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GameError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validation::validate_url("source.base_url", &self.source.base_url)?;
        validation::validate_positive_number(
            "source.timeout_seconds",
            self.source.timeout_seconds as usize,
            1,
        )?;
        validation::validate_positive_number("board.categories", self.board.categories, 1)?;
        validation::validate_positive_number(
            "board.clues_per_category",
            self.board.clues_per_category,
            1,
        )?;
        validation::validate_range("source.pool_size", self.source.pool_size, 1, MAX_POOL_SIZE)?;
        validation::validate_non_empty_string("display.placeholder", &self.display.placeholder)?;

        // 候選池至少要能湊滿一整排分類
        if self.source.pool_size < self.board.categories {
            return Err(GameError::InvalidConfigValueError {
                field: "source.pool_size".to_string(),
                value: self.source.pool_size.to_string(),
                reason: format!(
                    "Pool must hold at least board.categories ({}) ids",
                    self.board.categories
                ),
            });
        }

        Ok(())
    }
}

impl ConfigProvider for GameConfig {
    fn base_url(&self) -> &str {
        &self.source.base_url
    }

    fn board_shape(&self) -> BoardShape {
        BoardShape {
            categories: self.board.categories,
            clues_per_category: self.board.clues_per_category,
        }
    }

    fn pool_size(&self) -> usize {
        self.source.pool_size
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.source.timeout_seconds)
    }

    fn strip_html(&self) -> bool {
        self.display.strip_html
    }

    fn placeholder(&self) -> &str {
        &self.display.placeholder
    }
}

impl Validate for GameConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
