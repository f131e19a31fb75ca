// region:    --- Imports
use crate::error::ConfigError;
use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;

// endregion: --- Imports

pub const DEFAULT_KAFKA_BROKERS: &str = "localhost:9092";

const MILLIS: Duration = Duration::from_millis(1);
const HOURS: Duration = Duration::from_secs(60 * 60);

// region:    --- Auction Config
/// 경매 서비스 설정
#[derive(Debug, Clone)]
pub struct AuctionConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub bind_address: SocketAddr,
    pub kafka_brokers: String,
    pub outbox_interval: Duration,
    /// 발행된 outbox 이벤트 보관 기간
    pub outbox_retention: Duration,
}

impl AuctionConfig {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            max_connections: parsed_or("DATABASE_MAX_CONNECTIONS", 5)?,
            bind_address: parsed_or(
                "AUCTION_BIND_ADDRESS",
                SocketAddr::from(([0, 0, 0, 0], 7001)),
            )?,
            kafka_brokers: optional("KAFKA_BROKERS")
                .unwrap_or_else(|| DEFAULT_KAFKA_BROKERS.to_string()),
            outbox_interval: period_or("OUTBOX_INTERVAL_MS", MILLIS, 1000)?,
            outbox_retention: period_or("OUTBOX_RETENTION_HOURS", HOURS, 24)?,
        })
    }
}
// endregion: --- Auction Config

// region:    --- Search Config
/// 검색 서비스 설정
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub mongo_url: String,
    pub database: String,
    pub collection: String,
    pub seed_file: String,
    pub bind_address: SocketAddr,
    pub kafka_brokers: String,
    pub group_id: String,
}

impl SearchConfig {
    /// 환경 변수에서 설정 로드
    pub fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            mongo_url: required("MONGO_CONNECTION_STRING")?,
            database: optional("SEARCH_DATABASE").unwrap_or_else(|| "SearchDb".to_string()),
            collection: optional("SEARCH_COLLECTION").unwrap_or_else(|| "items".to_string()),
            seed_file: optional("SEED_FILE").unwrap_or_else(|| "data/items.json".to_string()),
            bind_address: parsed_or(
                "SEARCH_BIND_ADDRESS",
                SocketAddr::from(([0, 0, 0, 0], 7002)),
            )?,
            kafka_brokers: optional("KAFKA_BROKERS")
                .unwrap_or_else(|| DEFAULT_KAFKA_BROKERS.to_string()),
            group_id: optional("KAFKA_GROUP_ID").unwrap_or_else(|| "search-service".to_string()),
        })
    }
}
// endregion: --- Search Config

// region:    --- Helpers
fn optional(key: &'static str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn required(key: &'static str) -> Result<String, ConfigError> {
    optional(key).ok_or(ConfigError::Missing(key))
}

fn parsed_or<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match optional(key) {
        Some(value) => parse_value(key, value),
        None => Ok(default),
    }
}

/// 양수 배수 * 단위 기간. 0 은 허용하지 않는다.
fn period_or(key: &'static str, unit: Duration, default: u32) -> Result<Duration, ConfigError> {
    match optional(key) {
        Some(value) => parse_period(key, unit, value),
        None => Ok(unit * default),
    }
}

fn parse_period(key: &'static str, unit: Duration, value: String) -> Result<Duration, ConfigError> {
    match parse_value::<u32>(key, value)? {
        0 => Err(ConfigError::Invalid {
            key,
            value: "0".to_string(),
        }),
        count => Ok(unit * count),
    }
}

fn parse_value<T: FromStr>(key: &'static str, value: String) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Invalid { key, value })
}
// endregion: --- Helpers

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_value_accepts_socket_addresses() {
        let addr: SocketAddr = parse_value("ADDR", "127.0.0.1:3000".to_string()).unwrap();
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn parse_value_reports_key_and_value() {
        let err = parse_value::<u32>("DATABASE_MAX_CONNECTIONS", "many".to_string()).unwrap_err();
        match err {
            ConfigError::Invalid { key, value } => {
                assert_eq!(key, "DATABASE_MAX_CONNECTIONS");
                assert_eq!(value, "many");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn parse_period_rejects_zero() {
        let err = parse_period("OUTBOX_INTERVAL_MS", MILLIS, "0".to_string()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                key: "OUTBOX_INTERVAL_MS",
                ..
            }
        ));
    }

    #[test]
    fn parse_period_scales_by_unit() {
        let period = parse_period("OUTBOX_RETENTION_HOURS", HOURS, "2".to_string()).unwrap();
        assert_eq!(period, Duration::from_secs(2 * 60 * 60));
    }
}
