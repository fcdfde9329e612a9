//! Startup: configuration, credentials, and wiring of the long-lived parts.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use ferry_auth::TokenStore;
use ferry_config::FerryConfig;
use ferry_core::clock::{Clock, SystemClock};
use ferry_core::relevance::RelevanceFilter;
use ferry_gtasks::TasksClient;
use ferry_linear::LinearClient;
use ferry_sync::bus::ListenerBus;
use ferry_sync::list::ScopedList;
use ferry_sync::mutation::MutationHandler;
use ferry_sync::notify::TaskBoard;
use ferry_sync::reconcile::Reconciler;
use ferry_telegram::{BotClient, ChatFrontEnd, OwnerChat};

/// Load `.env`, then layered config, and fail on anything missing.
pub fn load_config() -> anyhow::Result<FerryConfig> {
    let config = FerryConfig::load_with_dotenv().context("failed to load configuration")?;
    config.validate().context("configuration is incomplete")?;
    Ok(config)
}

pub struct App {
    pub reconciler: Arc<Reconciler>,
    pub interval: Duration,
    pub bot: BotClient,
    pub front: ChatFrontEnd,
}

impl App {
    pub async fn build(config: &FerryConfig) -> anyhow::Result<Self> {
        let timeout = Duration::from_secs(config.general.http_timeout_secs);
        let http = reqwest::Client::builder()
            .user_agent("ferry/0.1")
            .timeout(timeout)
            .build()
            .context("failed to build HTTP client")?;

        let tokens = ferry_auth::authorize(
            &http,
            Path::new(&config.google.client_secret_path),
            TokenStore::new(&config.google.token_path),
            Duration::from_secs(config.google.consent_timeout_secs),
        )
        .await
        .context("failed to authorize with Google")?;

        let tasks = TasksClient::with_http(http, &config.google.api_url, Arc::new(tokens));
        let linear = LinearClient::new(
            &config.linear.api_url,
            &config.linear.api_key,
            config.linear.page_size,
            timeout,
        )
        .context("failed to build Linear client")?;
        let bot = BotClient::new(&config.telegram.api_url, &config.telegram.token, timeout)
            .context("failed to build Telegram client")?;

        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let list = ScopedList::new(Arc::new(tasks), &config.google.task_list);
        let board = Arc::new(TaskBoard::new(Arc::new(OwnerChat::new(
            bot.clone(),
            config.telegram.owner_id,
        ))));

        let bus = Arc::new(ListenerBus::new());
        bus.register(Arc::new(MutationHandler::new(
            list.clone(),
            Arc::clone(&board),
            Arc::clone(&clock),
        )))
        .await;

        let reconciler = Reconciler::new(list, Arc::new(linear), Arc::clone(&board), clock)
            .with_filter(RelevanceFilter::new(config.linear.lookback_days))
            .with_max_concurrent(config.general.max_concurrent_creates);

        Ok(Self {
            reconciler: Arc::new(reconciler),
            interval: Duration::from_secs(config.general.sync_interval_secs),
            bot,
            front: ChatFrontEnd::new(config.telegram.owner_id, bus, board),
        })
    }
}
