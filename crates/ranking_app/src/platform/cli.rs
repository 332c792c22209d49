use std::path::PathBuf;

use clap::Parser;
use ranking_core::Category;
use ranking_logging::log::LevelFilter;

use super::logging::LogTarget;

/// Browse marketplace product rankings by category.
#[derive(Debug, Clone, Parser)]
#[command(name = "ranking", version)]
pub struct Cli {
    /// RON configuration file; a missing file means defaults.
    #[arg(long, default_value = "ranking.ron")]
    pub config: PathBuf,

    /// Ranking API application id.
    #[arg(long, env = "RAKUTEN_APP_ID", hide_env_values = true)]
    pub app_id: Option<String>,

    /// Affiliate id attached to product links.
    #[arg(long, env = "RAKUTEN_AFFILIATE_ID", hide_env_values = true)]
    pub affiliate_id: Option<String>,

    /// Category to load first (slug such as `food`, or a genre id).
    #[arg(long)]
    pub category: Option<Category>,

    /// Load one category, print it and exit.
    #[arg(long)]
    pub once: bool,

    /// With --once, print the products as JSON.
    #[arg(long, requires = "once")]
    pub json: bool,

    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,

    #[arg(long, default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,
}
