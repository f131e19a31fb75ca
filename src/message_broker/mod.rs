// region:    --- Imports
use rdkafka::admin::{AdminClient, AdminOptions, NewTopic, TopicReplication};
use rdkafka::client::DefaultClientContext;
use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::error::KafkaError;
use rdkafka::message::Message;
use rdkafka::producer::{FutureProducer, FutureRecord};
use rdkafka::types::RDKafkaErrorCode;
use rdkafka::{ClientConfig, Offset, TopicPartitionList};
use serde::de::DeserializeOwned;
use std::fmt::Debug;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

// endregion: --- Imports

// region:    --- Kafka Producer
#[derive(Clone)]
pub struct KafkaProducer {
    producer: Arc<FutureProducer>,
}

/// KafkaProducer 구현
impl KafkaProducer {
    pub fn new(brokers: &str) -> Result<Self, KafkaError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("message.timeout.ms", "5000")
            .create()?;

        Ok(KafkaProducer {
            producer: Arc::new(producer),
        })
    }

    /// 메시지 전송
    pub async fn send_message(
        &self,
        topic: &str,
        key: &str,
        value: &str,
    ) -> Result<(), KafkaError> {
        debug!(
            "{:<12} --> Kafka 메시지 전송: topic={}, key={}",
            "Producer", topic, key
        );
        let record = FutureRecord::to(topic).key(key).payload(value);

        self.producer
            .send(record, Duration::from_secs(0))
            .await
            .map_err(|(e, _)| e)?;

        Ok(())
    }
}

// endregion: --- Kafka Producer

// region:    --- Kafka Consumer
// 처리 재시도 간격
pub const RETRY_INITIAL_BACKOFF: Duration = Duration::from_millis(500);
const RETRY_MAX_BACKOFF: Duration = Duration::from_secs(30);

/// 성공할 때까지 지수 백오프로 재시도하고 시도 횟수를 반환
pub async fn retry_with_backoff<F, Fut, E>(
    label: &str,
    initial: Duration,
    mut attempt: F,
) -> usize
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<(), E>>,
    E: Debug,
{
    let mut delay = initial;
    let mut attempts = 0;
    loop {
        attempts += 1;
        match attempt().await {
            Ok(()) => return attempts,
            Err(e) => {
                warn!(
                    "{:<12} --> {} 실패 ({}회), {:?} 후 재시도: {:?}",
                    "Retry", label, attempts, delay, e
                );
                tokio::time::sleep(delay).await;
                delay = (delay * 2).min(RETRY_MAX_BACKOFF);
            }
        }
    }
}

pub struct KafkaConsumer {
    consumer: Arc<StreamConsumer>,
}

/// KafkaConsumer 구현
impl KafkaConsumer {
    pub fn new(brokers: &str, group_id: &str) -> Result<Self, KafkaError> {
        let consumer: StreamConsumer = ClientConfig::new()
            .set("bootstrap.servers", brokers)
            .set("group.id", group_id)
            .set("enable.auto.commit", "false")
            .set("auto.offset.reset", "earliest")
            .set("session.timeout.ms", "6000")
            .set("allow.auto.create.topics", "true")
            .create()?;

        Ok(KafkaConsumer {
            consumer: Arc::new(consumer),
        })
    }

    /// 토픽 구독 후 메시지를 역직렬화하여 핸들러에 전달
    ///
    /// 오프셋은 핸들러가 성공한 뒤에만 커밋한다. 처리 실패는 성공할 때까지
    /// 재시도하고, 역직렬화할 수 없는 메시지만 기록 후 건너뛴다.
    pub async fn consume_events<T, F, Fut, E>(&self, topic: &str, handler: F)
    where
        T: DeserializeOwned + Clone,
        F: Fn(T) -> Fut,
        Fut: Future<Output = Result<(), E>>,
        E: Debug,
    {
        info!(
            "{:<12} --> Kafka 이벤트 소비 시작: topic={}",
            "Consumer", topic
        );
        retry_with_backoff("토픽 구독", RETRY_INITIAL_BACKOFF, || async move {
            self.consumer.subscribe(&[topic])
        })
        .await;

        loop {
            // 메시지는 핸들러 실행 전에 해제하고 위치만 보관한다
            let (position, event) = match self.consumer.recv().await {
                Ok(message) => {
                    debug!(
                        "{:<12} --> 메시지 수신: topic={}, partition={}, offset={}",
                        "Consumer",
                        message.topic(),
                        message.partition(),
                        message.offset()
                    );
                    let position = (
                        message.topic().to_string(),
                        message.partition(),
                        message.offset(),
                    );
                    let event = match message.payload().map(serde_json::from_slice::<T>) {
                        Some(Ok(event)) => Some(event),
                        Some(Err(e)) => {
                            error!("{:<12} --> deserialize 오류: {:?}", "Consumer", e);
                            None
                        }
                        None => {
                            warn!("{:<12} --> 빈 페이로드 수신", "Consumer");
                            None
                        }
                    };
                    (position, event)
                }
                Err(e) => {
                    error!("{:<12} --> 메시지 수신 오류: {:?}", "Consumer", e);
                    continue;
                }
            };

            if let Some(event) = event {
                retry_with_backoff("이벤트 처리", RETRY_INITIAL_BACKOFF, || {
                    handler(event.clone())
                })
                .await;
            }

            let (topic, partition, offset) = position;
            if let Err(e) = self.commit(&topic, partition, offset) {
                error!("{:<12} --> 오프셋 커밋 오류: {:?}", "Consumer", e);
            }
        }
    }

    /// 처리 완료한 메시지 다음 위치를 커밋
    fn commit(&self, topic: &str, partition: i32, offset: i64) -> Result<(), KafkaError> {
        let mut positions = TopicPartitionList::new();
        positions.add_partition_offset(topic, partition, Offset::Offset(offset + 1))?;
        self.consumer.commit(&positions, CommitMode::Async)
    }
}

// endregion: --- Kafka Consumer

// region:    --- Kafka Manager
pub struct KafkaManager {
    brokers: String,
}

/// KafkaManager 구현
impl KafkaManager {
    pub fn new(brokers: impl Into<String>) -> Self {
        KafkaManager {
            brokers: brokers.into(),
        }
    }

    /// 프로듀서 생성
    pub fn producer(&self) -> Result<Arc<KafkaProducer>, KafkaError> {
        Ok(Arc::new(KafkaProducer::new(&self.brokers)?))
    }

    /// 컨슈머 생성
    pub fn consumer(&self, group_id: &str) -> Result<Arc<KafkaConsumer>, KafkaError> {
        Ok(Arc::new(KafkaConsumer::new(&self.brokers, group_id)?))
    }

    /// 토픽 생성 (이미 존재하면 성공으로 취급)
    pub async fn create_topic(
        &self,
        topic_name: &str,
        num_partitions: i32,
        replication_factor: i32,
    ) -> Result<(), KafkaError> {
        info!("{:<12} --> Kafka 토픽 생성 시작: {}", "Manager", topic_name);

        let admin_client: AdminClient<DefaultClientContext> = ClientConfig::new()
            .set("bootstrap.servers", &self.brokers)
            .create()?;

        let new_topic = NewTopic::new(
            topic_name,
            num_partitions,
            TopicReplication::Fixed(replication_factor),
        );

        let results = admin_client
            .create_topics(
                &[new_topic],
                &AdminOptions::new().request_timeout(Some(Duration::from_secs(5))),
            )
            .await?;

        for result in results {
            match result {
                Ok(topic) => info!("{:<12} --> Kafka 토픽 생성 성공: {}", "Manager", topic),
                Err((topic, RDKafkaErrorCode::TopicAlreadyExists)) => {
                    info!("{:<12} --> Kafka 토픽 이미 존재: {}", "Manager", topic)
                }
                Err((topic, code)) => {
                    error!(
                        "{:<12} --> Kafka 토픽 생성 실패: {} ({:?})",
                        "Manager", topic, code
                    );
                    return Err(KafkaError::AdminOp(code));
                }
            }
        }
        Ok(())
    }
}

// endregion: --- Kafka Manager
