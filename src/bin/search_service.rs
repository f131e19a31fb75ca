// region:    --- Imports
use auction_listings::config::SearchConfig;
use auction_listings::logging::init_tracing;
use auction_listings::message_broker::KafkaManager;
use auction_listings::search::bootstrap;
use auction_listings::search::consumer::AuctionEventConsumer;
use auction_listings::search::handlers;
use auction_listings::search::index::{ItemIndex, MongoItemIndex};
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = SearchConfig::from_env()?;

    // 인덱스와 시드가 준비되기 전에는 트래픽을 받지 않는다
    let index: Arc<dyn ItemIndex> = Arc::new(MongoItemIndex::connect(&config).await?);
    match bootstrap::initialize(index.as_ref(), &config.seed_file).await {
        Ok(seeded) => info!(
            "{:<12} --> 검색 인덱스 초기화 성공 (시드 {}건)",
            "Main", seeded
        ),
        Err(e) => {
            error!("{:<12} --> 검색 인덱스 초기화 실패: {}", "Main", e);
            return Err(e.into());
        }
    }

    // 경매 이벤트 소비 시작
    let kafka_consumer = KafkaManager::new(&config.kafka_brokers).consumer(&config.group_id)?;
    let event_consumer = AuctionEventConsumer::new(Arc::clone(&index));
    tokio::spawn(async move {
        event_consumer.start(kafka_consumer).await;
    });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);
    let routes_all = handlers::routes(index).layer(cors);

    let listener = TcpListener::bind(config.bind_address).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    if let Err(err) = axum::serve(listener, routes_all.into_make_service()).await {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}
// endregion: --- Main
