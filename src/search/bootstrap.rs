//! 검색 인덱스 초기화
//! 1. 텍스트 인덱스 생성
//! 2. 빈 컬렉션일 때만 시드 데이터 적재
// region:    --- Imports
use super::index::ItemIndex;
use super::model::{SearchItem, SeedRecord};
use crate::error::SearchError;
use serde_json::Value;
use tracing::info;

// endregion: --- Imports

/// 텍스트 인덱스 생성 후 시드 적재. 실패 시 서비스를 시작하면 안 된다.
pub async fn initialize(index: &dyn ItemIndex, seed_file: &str) -> Result<usize, SearchError> {
    ensure_index(index).await?;
    seed(index, seed_file).await
}

/// 텍스트 인덱스 생성 (멱등)
pub async fn ensure_index(index: &dyn ItemIndex) -> Result<(), SearchError> {
    index.ensure_text_index().await?;
    info!("{:<12} --> 텍스트 인덱스 확인 완료", "Bootstrap");
    Ok(())
}

/// 컬렉션이 비어 있을 때만 시드 파일을 적재하고 삽입한 문서 수를 반환
pub async fn seed(index: &dyn ItemIndex, seed_file: &str) -> Result<usize, SearchError> {
    let count = index.count().await?;
    if count > 0 {
        info!(
            "{:<12} --> 기존 문서 {}건, 시드 생략",
            "Bootstrap", count
        );
        return Ok(0);
    }

    info!("{:<12} --> 시드 데이터 적재: {}", "Bootstrap", seed_file);
    let contents = tokio::fs::read_to_string(seed_file)
        .await
        .map_err(|source| SearchError::SeedFileRead {
            path: seed_file.to_string(),
            source,
        })?;
    let items = parse_seed(&contents)?;
    let seeded = items.len();
    index.insert_many(items).await?;

    info!("{:<12} --> 시드 문서 {}건 삽입", "Bootstrap", seeded);
    Ok(seeded)
}

/// 시드 JSON 배열 파싱. 필드 이름은 대소문자를 구분하지 않는다.
pub fn parse_seed(contents: &str) -> Result<Vec<SearchItem>, SearchError> {
    let raw: Value = serde_json::from_str(contents)?;
    let records: Vec<SeedRecord> = serde_json::from_value(lowercase_keys(raw))?;
    Ok(records.into_iter().map(SearchItem::from).collect())
}

/// 객체 키를 재귀적으로 소문자화
fn lowercase_keys(value: Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(key, value)| (key.to_lowercase(), lowercase_keys(value)))
                .collect(),
        ),
        Value::Array(values) => Value::Array(values.into_iter().map(lowercase_keys).collect()),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_seed_matches_keys_case_insensitively() {
        let items = parse_seed(
            r#"[{
                "ID": "afbee524-5972-4075-8800-7d1f9d7b0a0c",
                "Make": "Ford", "MODEL": "GT", "year": 2020,
                "Color": "White", "Mileage": 50000,
                "ImageUrl": "https://cdn.example.com/ford-gt.jpg",
                "Seller": "bob"
            }]"#,
        )
        .unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].auction_id, "afbee524-5972-4075-8800-7d1f9d7b0a0c");
        assert_eq!(items[0].model, "GT");
        assert_eq!(items[0].image_url, "https://cdn.example.com/ford-gt.jpg");
    }

    #[test]
    fn parse_seed_defaults_omitted_fields() {
        let items = parse_seed(
            r#"[{
                "ID": "afbee524-5972-4075-8800-7d1f9d7b0a0c",
                "Make": "Ford", "Model": "GT", "Color": "White", "Year": 2020
            }]"#,
        )
        .unwrap();

        assert_eq!(items[0].mileage, 0);
        assert_eq!(items[0].year, 2020);
        assert_eq!(items[0].image_url, "");
    }

    #[test]
    fn parse_seed_requires_an_id() {
        assert!(matches!(
            parse_seed(r#"[{"Make": "Ford"}]"#),
            Err(SearchError::SeedFileFormat(_))
        ));
    }

    #[test]
    fn parse_seed_rejects_non_arrays() {
        assert!(matches!(
            parse_seed(r#"{"make": "Ford"}"#),
            Err(SearchError::SeedFileFormat(_))
        ));
    }

    #[test]
    fn parse_seed_rejects_invalid_json() {
        assert!(matches!(
            parse_seed("[{"),
            Err(SearchError::SeedFileFormat(_))
        ));
    }
}
