pub mod toml_config;

pub use toml_config::GameConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "trivia-board")]
#[command(about = "Play a trivia board in the terminal")]
pub struct CliConfig {
    #[arg(long, help = "TOML config file; flags below override it")]
    pub config: Option<PathBuf>,

    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long)]
    pub categories: Option<usize>,

    #[arg(long)]
    pub clues_per_category: Option<usize>,

    #[arg(long, help = "How many category ids to sample from (max 100)")]
    pub pool_size: Option<usize>,

    #[arg(long)]
    pub timeout_seconds: Option<u64>,

    #[arg(long, help = "Seed the random sampler for a reproducible board")]
    pub seed: Option<u64>,

    #[arg(long, help = "Keep HTML markup in clue text")]
    pub no_strip_html: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON")]
    pub log_json: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 合併設定檔與命令列參數，命令列優先
    pub fn resolve(&self) -> Result<GameConfig> {
        let mut config = match &self.config {
            Some(path) => {
                tracing::debug!("Loading config file: {}", path.display());
                GameConfig::from_file(path)?
            }
            None => GameConfig::default(),
        };

        if let Some(base_url) = &self.base_url {
            config.source.base_url = base_url.clone();
        }
        if let Some(pool_size) = self.pool_size {
            config.source.pool_size = pool_size;
        }
        if let Some(timeout) = self.timeout_seconds {
            config.source.timeout_seconds = timeout;
        }
        if let Some(categories) = self.categories {
            config.board.categories = categories;
        }
        if let Some(clues) = self.clues_per_category {
            config.board.clues_per_category = clues;
        }
        if self.no_strip_html {
            config.display.strip_html = false;
        }

        Ok(config)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use crate::core::ConfigProvider;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_flags_override_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[source]\nbase_url = \"http://file.test/api/\"\npool_size = 40\n[board]\ncategories = 3\n")
            .unwrap();

        let cli = CliConfig::parse_from([
            "trivia-board",
            "--config",
            temp_file.path().to_str().unwrap(),
            "--categories",
            "4",
            "--no-strip-html",
        ]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.base_url(), "http://file.test/api/");
        assert_eq!(config.pool_size(), 40);
        assert_eq!(config.board_shape().categories, 4);
        assert!(!config.strip_html());
    }

    #[test]
    fn test_no_flags_gives_defaults() {
        let config = CliConfig::parse_from(["trivia-board"]).resolve().unwrap();
        assert_eq!(config.board_shape().categories, 6);
        assert_eq!(config.board_shape().clues_per_category, 5);
    }
}
