use std::{net::SocketAddr, path::PathBuf, time::Duration};

use clap::Parser;
use servidor_game::{
    bot::{Bot, BotConfig},
    store::UserStore,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "servidor-game")]
#[command(about = "ServidorGame webhook receiver")]
struct Cli {
    #[arg(long, env = "BIND", default_value = "0.0.0.0:8000")]
    bind: SocketAddr,

    #[arg(long, env = "BOT_TOKEN", hide_env_values = true)]
    bot_token: Option<String>,

    #[arg(long, env = "VIP_CHANNEL_ID")]
    vip_channel_id: Option<String>,

    #[arg(long, env = "ADMIN_ID")]
    admin_id: Option<String>,

    #[arg(long, env = "API_BASE_URL", default_value = servidor_game::consts::API_DOMAIN)]
    api_base_url: String,

    /// Seconds to wait for one vip membership lookup
    #[arg(long, env = "MEMBERSHIP_TIMEOUT", default_value_t = 5)]
    membership_timeout: u64,

    #[arg(long, env = "WEBHOOK_SECRET", hide_env_values = true)]
    webhook_secret: Option<String>,

    #[arg(long, env = "BODY_SIZE_LIMIT", default_value_t = servidor_game::consts::DEFAULT_BODY_SIZE)]
    body_size_limit: usize,

    #[arg(long, env = "DATABASE_PATH", default_value = servidor_game::consts::DEFAULT_DATABASE_PATH)]
    database_path: String,

    /// JSON config file, used instead of the other bot options
    #[arg(long, env = "CONFIG_FILE")]
    config: Option<PathBuf>,

    /// Create the users table and exit
    #[arg(long)]
    init_db: bool,
}

impl From<Cli> for BotConfig {
    fn from(cli: Cli) -> Self {
        BotConfig {
            bot_token: cli.bot_token,
            vip_channel_id: cli.vip_channel_id,
            admin_id: cli.admin_id,
            api_base_url: cli.api_base_url,
            membership_timeout: Duration::from_secs(cli.membership_timeout),
            webhook_secret: cli.webhook_secret,
            body_size_limit: cli.body_size_limit,
            database_path: cli.database_path,
        }
    }
}

#[tokio::main]
async fn main() -> servidor_game::Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,servidor_game=info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
    let cli = Cli::parse();
    let bind = cli.bind;
    let init_db = cli.init_db;
    let config = match cli.config.clone() {
        Some(path) => BotConfig::from_json_file(path)?,
        None => BotConfig::from(cli),
    };

    if init_db {
        let store = UserStore::open(&config.database_path)?;
        store.init_schema()?;
        tracing::info!(path = %config.database_path, "users table ready");
        return Ok(());
    }

    let bot = Bot::new(config);
    let service = bot.start_webhook_service(bind).await?;
    tracing::info!(bind = %service.get_bind(), "servidor-game started");
    tokio::signal::ctrl_c()
        .await
        .map_err(servidor_game::Error::context("waiting for ctrl-c"))?;
    bot.stop();
    service.join().await
}
