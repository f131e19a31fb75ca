// region:    --- Imports
use crate::auction::events::AuctionEvent;
use crate::auction::queries;
use crate::message_broker::KafkaProducer;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::{FromRow, PgConnection, PgPool};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::interval;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

// endregion: --- Imports

/// 경매 이벤트 토픽
pub const AUCTION_EVENTS_TOPIC: &str = "auction-events";

// 한 번에 발행하는 최대 이벤트 수
const RELAY_BATCH_SIZE: i64 = 100;

// region:    --- Event Model
/// outbox 에 저장되는 이벤트 모델
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct OutboxEvent {
    pub id: i64,
    pub aggregate_id: Uuid,
    pub event_type: String,
    pub data: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
// endregion: --- Event Model

/// 이벤트를 outbox 에 기록
///
/// 호출자의 트랜잭션 안에서 실행되어야 한다.
pub async fn append_event(
    conn: &mut PgConnection,
    event: &AuctionEvent,
    at: DateTime<Utc>,
) -> Result<i64, sqlx::Error> {
    let event_id = sqlx::query_scalar::<_, i64>(queries::APPEND_EVENT)
        .bind(event.aggregate_id())
        .bind(event.event_type())
        .bind(Json(event))
        .bind(at)
        .fetch_one(conn)
        .await?;
    debug!(
        "{:<12} --> 이벤트 기록: id={}, type={}",
        "Outbox",
        event_id,
        event.event_type()
    );
    Ok(event_id)
}

// region:    --- Event Publisher Trait
/// 이벤트 발행 트레이트
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, event: &OutboxEvent) -> Result<(), String>;
}

#[async_trait]
impl EventPublisher for KafkaProducer {
    async fn publish(&self, event: &OutboxEvent) -> Result<(), String> {
        let payload = serde_json::to_string(&event.data).map_err(|e| e.to_string())?;
        self.send_message(
            AUCTION_EVENTS_TOPIC,
            &event.aggregate_id.to_string(),
            &payload,
        )
        .await
        .map_err(|e| e.to_string())
    }
}
// endregion: --- Event Publisher Trait

// region:    --- Outbox Relay
/// 보관 기간이 지난 발행 완료 이벤트 삭제
pub async fn prune_published(
    pool: &PgPool,
    before: DateTime<Utc>,
) -> Result<u64, sqlx::Error> {
    let pruned = sqlx::query(queries::PRUNE_PUBLISHED_EVENTS)
        .bind(before)
        .execute(pool)
        .await?
        .rows_affected();
    if pruned > 0 {
        info!("{:<12} --> 발행 완료 이벤트 {}건 정리", "Outbox", pruned);
    }
    Ok(pruned)
}

/// 미발행 이벤트를 주기적으로 브로커에 발행
///
/// 발행 후 표시 전에 중단되면 다시 발행하므로 최소 1회 전달이다.
/// 브로커에 닿지 않는 동안에는 이벤트가 outbox 에 남아 다음 주기에 재시도된다.
pub struct OutboxRelay<P> {
    pool: Arc<PgPool>,
    publisher: Arc<P>,
    period: Duration,
    retention: Duration,
}

impl<P: EventPublisher + 'static> OutboxRelay<P> {
    pub fn new(
        pool: Arc<PgPool>,
        publisher: Arc<P>,
        period: Duration,
        retention: Duration,
    ) -> Self {
        Self {
            pool,
            publisher,
            period,
            retention,
        }
    }

    /// outbox 릴레이 시작
    ///
    /// `period` 는 0 이 아니어야 한다 (설정 로드 시 검증).
    pub fn start(self: Arc<Self>) {
        info!(
            "{:<12} --> outbox 릴레이 시작 ({:?} 주기, {:?} 보관)",
            "Outbox", self.period, self.retention
        );
        tokio::spawn(async move {
            let mut interval = interval(self.period);
            loop {
                interval.tick().await;
                if let Err(e) = self.relay_once().await {
                    error!("{:<12} --> 이벤트 발행 중 오류 발생: {:?}", "Outbox", e);
                }
            }
        });
    }

    /// 한 주기 실행: 미발행 이벤트 발행 후 오래된 발행 완료 이벤트 정리
    pub async fn relay_once(&self) -> Result<usize, sqlx::Error> {
        let published = Self::relay_pending(&self.pool, self.publisher.as_ref()).await?;
        let cutoff = chrono::Duration::from_std(self.retention)
            .ok()
            .and_then(|retention| Utc::now().checked_sub_signed(retention));
        if let Some(before) = cutoff {
            prune_published(&self.pool, before).await?;
        }
        Ok(published)
    }

    /// 미발행 이벤트 발행
    async fn relay_pending(pool: &PgPool, publisher: &P) -> Result<usize, sqlx::Error> {
        let events = sqlx::query_as::<_, OutboxEvent>(queries::GET_UNPUBLISHED_EVENTS)
            .bind(RELAY_BATCH_SIZE)
            .fetch_all(pool)
            .await?;

        let mut published = 0;
        for event in events {
            // 순서 보장을 위해 실패한 이벤트 이후는 다음 주기로 미룬다
            if let Err(e) = publisher.publish(&event).await {
                warn!(
                    "{:<12} --> 이벤트 발행 실패 id={}: {}",
                    "Outbox", event.id, e
                );
                break;
            }
            sqlx::query(queries::MARK_EVENT_PUBLISHED)
                .bind(event.id)
                .bind(Utc::now())
                .execute(pool)
                .await?;
            published += 1;
        }

        if published > 0 {
            info!("{:<12} --> 이벤트 {}건 발행", "Outbox", published);
        }
        Ok(published)
    }
}
// endregion: --- Outbox Relay
