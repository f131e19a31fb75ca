// region:    --- Imports
use auction_listings::auction::repository::PgAuctionRepository;
use auction_listings::config::AuctionConfig;
use auction_listings::database::DatabaseManager;
use auction_listings::event_store::{OutboxRelay, AUCTION_EVENTS_TOPIC};
use auction_listings::handlers::{self, AppState};
use auction_listings::logging::init_tracing;
use auction_listings::message_broker::KafkaManager;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};
// endregion: --- Imports

// region:    --- Main
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = AuctionConfig::from_env()?;

    // DatabaseManager 생성
    let db_manager = Arc::new(DatabaseManager::connect(&config).await?);

    // 스키마 초기화
    if let Err(e) = db_manager.initialize_database().await {
        error!("{:<12} --> 데이터베이스 초기화 실패: {:?}", "Main", e);
        return Err(e.into());
    }
    info!("{:<12} --> 데이터베이스 초기화 성공", "Main");

    // 이벤트 토픽 생성 및 outbox 릴레이 시작
    // 브로커 장애는 경매 API 를 막지 않는다. 이벤트는 outbox 에 쌓였다가 재발행된다.
    let kafka_manager = KafkaManager::new(&config.kafka_brokers);
    if let Err(e) = kafka_manager.create_topic(AUCTION_EVENTS_TOPIC, 3, 1).await {
        warn!(
            "{:<12} --> 이벤트 토픽 준비 실패, 릴레이가 계속 재시도: {:?}",
            "Main", e
        );
    }
    let relay = Arc::new(OutboxRelay::new(
        db_manager.get_pool(),
        kafka_manager.producer()?,
        config.outbox_interval,
        config.outbox_retention,
    ));
    relay.start();

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // 라우터 설정
    let repository = Arc::new(PgAuctionRepository::new(Arc::clone(&db_manager)));
    let routes_all = handlers::routes(AppState::new(repository)).layer(cors);

    let listener = TcpListener::bind(config.bind_address).await?;
    info!(
        "{:<12} --> Web Server: Listening on {}",
        "Main",
        listener.local_addr()?
    );

    // 서버 실행
    if let Err(err) = axum::serve(listener, routes_all.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("{:<12} --> Server error: {}", "Main", err);
    }
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("{:<12} --> 종료 신호 수신 실패: {:?}", "Main", e);
    }
    info!("{:<12} --> 종료 중", "Main");
}
// endregion: --- Main
