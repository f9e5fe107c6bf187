use anyhow::Context;
use clap::Parser;
use portfolio_site::utils::error::ErrorSeverity;
use portfolio_site::utils::{logger, validation::Validate};
use portfolio_site::{CliConfig, ContentConfig, LocalStorage, PortfolioPipeline, SiteEngine};

fn main() -> anyhow::Result<()> {
    let args = CliConfig::parse();

    // 初始化日誌
    if args.json_logs {
        logger::init_json_logger(args.verbose);
    } else {
        logger::init_cli_logger(args.verbose);
    }

    tracing::info!("🚀 Starting portfolio-site");
    tracing::info!("📁 Loading content from: {}", args.content);
    if args.verbose {
        tracing::debug!("CLI config: {:?}", args);
    }

    // 載入內容檔
    let mut config = match ContentConfig::from_file(&args.content) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load content file '{}': {}", args.content, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 套用命令列覆蓋設定
    args.apply_overrides(&mut config);

    // 驗證內容
    if let Err(e) = config.validate() {
        tracing::error!("❌ Content validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Content loaded and validated successfully");

    println!("{}", config.config_summary(args.dry_run));

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No assets read, nothing written");
        print!("{}", config.dry_run_summary());
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path());
    let pipeline = PortfolioPipeline::new(storage, config)
        .context("failed to initialise the page renderer")?;
    let engine = SiteEngine::new(pipeline);

    match engine.run() {
        Ok(output_path) => {
            tracing::info!("✅ Portfolio built successfully!");
            println!("✅ Portfolio built successfully!");
            println!("📁 Output saved to: {}", output_path);
        }
        Err(e) => {
            // 記錄詳細錯誤信息
            tracing::error!(
                "❌ Build failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

            // 根據錯誤嚴重程度決定退出碼
            let exit_code = match e.severity() {
                ErrorSeverity::Low => 0,
                ErrorSeverity::Medium => 2,
                ErrorSeverity::High => 1,
                ErrorSeverity::Critical => 3,
            };

            if exit_code > 0 {
                std::process::exit(exit_code);
            }
        }
    }

    Ok(())
}
