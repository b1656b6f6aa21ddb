mod config;
mod error;
mod payload;
mod router;
mod state;
mod util;

use dotenvy::dotenv;
use tracing_subscriber::filter::{EnvFilter, LevelFilter};

use std::sync::Arc;

use nitpick_feed::UpstreamFetcher;
use timeline_client::TimelineClient;

use crate::{config::Config, state::AppState};

#[tokio::main]
async fn main() {
    dotenv().ok();

    // 1. Initialize logger
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::DEBUG.into())
        .from_env()
        .unwrap()
        .add_directive("hyper::proto=info".parse().unwrap())
        .add_directive("hyper::client=info".parse().unwrap())
        .add_directive("reqwest=info".parse().unwrap());
    tracing_subscriber::fmt().with_env_filter(filter).compact().init();

    // 2. Load configuration
    let config = Config::from_env().expect("invalid configuration");
    tracing::info!(
        "Feed: {} per cycle via {}, ranked {}, refresh {:?}",
        config.cache.sample_width,
        config.strategy.feed_strategy,
        config.strategy.ranking_algorithm,
        config.cache.refresh_interval
    );

    // 3. Initialize upstream fetcher
    let client = TimelineClient::new(&config.upstream_url, config.cache.fetch_timeout)
        .expect("UPSTREAM_URL must be a valid URL");
    tracing::info!("Upstream timelines at {}", client.base_url());
    let fetcher = Arc::new(UpstreamFetcher::new(client));

    // 4. Setup state and router
    let app_state = AppState::new(config.cache.clone(), config.strategy, fetcher);
    let app = router::app(app_state);

    // 5. Start server
    let addr = config.server_address;
    tracing::info!("Server starting at {}", addr);
    axum::Server::bind(&addr.parse().expect("SERVER_ADDRESS must be a socket address"))
        .serve(app.into_make_service())
        .await
        .unwrap();
}
