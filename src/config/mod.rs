pub mod cli;
pub mod content_config;

#[cfg(feature = "cli")]
use clap::Parser;
use content_config::ContentConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(Parser))]
#[cfg_attr(feature = "cli", command(name = "portfolio-site"))]
#[cfg_attr(
    feature = "cli",
    command(about = "Build a single-page portfolio from a TOML content file")
)]
pub struct CliConfig {
    /// Path to the TOML content file
    #[cfg_attr(feature = "cli", arg(short, long, default_value = "portfolio.toml"))]
    pub content: String,

    /// Override the profile image path from the content file
    #[cfg_attr(feature = "cli", arg(long))]
    pub image: Option<String>,

    /// Override the animation path from the content file
    #[cfg_attr(feature = "cli", arg(long))]
    pub animation: Option<String>,

    /// Override the output directory from the content file
    #[cfg_attr(feature = "cli", arg(short, long))]
    pub output: Option<String>,

    /// Enable verbose output
    #[cfg_attr(feature = "cli", arg(short, long))]
    pub verbose: bool,

    /// Emit logs as JSON
    #[cfg_attr(feature = "cli", arg(long))]
    pub json_logs: bool,

    /// Dry run - show what would be built without reading assets or writing output
    #[cfg_attr(feature = "cli", arg(long))]
    pub dry_run: bool,
}

impl CliConfig {
    /// 命令列覆蓋的路徑以目前目錄為基準，因此改寫成絕對路徑
    pub fn apply_overrides(&self, config: &mut ContentConfig) {
        let cwd = std::env::current_dir().unwrap_or_default();

        if let Some(image) = &self.image {
            config.assets.profile_image = cwd.join(image).display().to_string();
            tracing::info!("🔧 Profile image overridden to: {}", image);
        }
        if let Some(animation) = &self.animation {
            config.assets.animation = cwd.join(animation).display().to_string();
            tracing::info!("🔧 Animation overridden to: {}", animation);
        }
        if let Some(output) = &self.output {
            config.output.path = cwd.join(output).display().to_string();
            tracing::info!("🔧 Output path overridden to: {}", output);
        }
    }
}
