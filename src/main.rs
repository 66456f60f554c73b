use clap::Parser;
use seed_share::core::ConfigProvider;
use seed_share::utils::error::{ErrorSeverity, SeedError};
use seed_share::utils::{logger, validation::validate_provider};
use seed_share::{build_app, CliConfig, TomlConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    // 指定 --config 時改用 TOML 設定
    let config: Box<dyn ConfigProvider> = match &cli.config {
        Some(path) => match TomlConfig::from_file(path) {
            Ok(toml) => Box::new(toml) as Box<dyn ConfigProvider>,
            Err(e) => {
                eprintln!("❌ Failed to load config file '{}': {}", path, e);
                eprintln!("💡 Make sure the file exists and is valid TOML format");
                std::process::exit(1);
            }
        },
        None => Box::new(cli.clone()),
    };

    // 初始化日誌
    if config.json_logs() || cli.json_logs {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::info!("🚀 Starting seed-share server");
    if cli.verbose {
        tracing::debug!("CLI config: {:?}", cli);
    }

    // 驗證配置
    if let Err(e) = validate_provider(config.as_ref()) {
        fail(e);
    }

    tracing::info!("📁 Data directory: {}", config.data_dir());
    tracing::info!(
        "🌱 Selection caps: member {}, guest {}",
        config.member_cap(),
        config.guest_cap()
    );

    let app = match build_app(config.as_ref()).await {
        Ok(app) => app,
        Err(e) => fail(e),
    };

    let listener = match tokio::net::TcpListener::bind(config.bind_addr()).await {
        Ok(listener) => listener,
        Err(e) => fail(SeedError::IoError(e)),
    };

    let prefix = if config.base_path().is_empty() {
        "/"
    } else {
        config.base_path()
    };
    tracing::info!(
        "✅ Server listening on http://{} (routes under {})",
        listener.local_addr()?,
        prefix
    );

    if let Err(e) = seed_share::server::serve(listener, app).await {
        fail(e);
    }

    tracing::info!("Server stopped");
    Ok(())
}

fn fail(e: SeedError) -> ! {
    // 記錄詳細錯誤信息
    tracing::error!(
        "❌ Server failed: {} (Category: {:?}, Severity: {:?})",
        e,
        e.category(),
        e.severity()
    );
    tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

    // 根據錯誤嚴重程度決定退出碼
    let exit_code = match e.severity() {
        ErrorSeverity::Low | ErrorSeverity::High => 1,
        ErrorSeverity::Medium => 2,
        ErrorSeverity::Critical => 3,
    };
    std::process::exit(exit_code);
}
