//! Web 服务器主程序入口

use std::path::PathBuf;

use clap::Parser;
use tracing_subscriber::{prelude::*, EnvFilter};

use bhashantar::env::generate_env_docs;
use bhashantar::translation::ConfigManager;
use bhashantar::web::{WebConfig, WebServer};

/// Translation microservice with a dictionary fallback engine
#[derive(Parser, Debug)]
#[command(name = "bhashantar-web", version, about)]
struct Cli {
    /// Bind address [env: BHASHANTAR_WEB_BIND_ADDRESS, default: 0.0.0.0]
    #[arg(short, long)]
    bind: Option<String>,

    /// Port number [env: BHASHANTAR_WEB_PORT, default: 8000]
    #[arg(short, long)]
    port: Option<u16>,

    /// Translation config file (TOML or JSON)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print environment variable documentation and exit
    #[arg(long)]
    print_env_docs: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.print_env_docs {
        print!("{}", generate_env_docs());
        return Ok(());
    }

    // 先读取 .env 文件以便日志级别生效，再初始化日志，最后加载配置
    ConfigManager::load_dotenv();
    init_tracing()?;

    let translation_config = ConfigManager::load(cli.config.as_deref())?.into_config();

    let mut web_config = WebConfig::from_env()?;
    if let Some(bind) = cli.bind {
        web_config.bind_addr = bind;
    }
    if let Some(port) = cli.port {
        web_config.port = port;
    }
    web_config.validate()?;

    let server = WebServer::new(web_config, translation_config);
    server.start().await?;

    Ok(())
}

fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let level = bhashantar::env::core::effective_log_level()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("bhashantar={level},tower_http={level}"))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::debug!("日志级别: {}", level);
    Ok(())
}
