/// 경매 + 상품 조인 컬럼
macro_rules! auction_columns {
    () => {
        "a.id, a.seller, a.reserve_price, a.sold_amount, a.current_high_bid, a.status, \
         a.created_at, a.updated_at, i.id AS item_id, i.make, i.model, i.year, i.color, \
         i.mileage, i.image_url"
    };
}

/// 모든 경매 조회 (상품 제조사 오름차순, 바이트 순서)
pub const LIST_AUCTIONS: &str = concat!(
    "SELECT ",
    auction_columns!(),
    " FROM auctions a JOIN items i ON i.auction_id = a.id ORDER BY i.make COLLATE \"C\" ASC"
);

/// 경매 조회
pub const GET_AUCTION: &str = concat!(
    "SELECT ",
    auction_columns!(),
    " FROM auctions a JOIN items i ON i.auction_id = a.id WHERE a.id = $1"
);

/// 경매 생성
pub const INSERT_AUCTION: &str = r#"
    INSERT INTO auctions
        (id, seller, reserve_price, sold_amount, current_high_bid, status, created_at, updated_at)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
"#;

/// 상품 생성
pub const INSERT_ITEM: &str = r#"
    INSERT INTO items (id, auction_id, make, model, year, color, mileage, image_url)
    VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
"#;

/// 상품 패치 적용 (NULL 은 기존 값 유지)
pub const PATCH_ITEM: &str = r#"
    UPDATE items SET
        make = COALESCE($2, make),
        model = COALESCE($3, model),
        year = COALESCE($4, year),
        color = COALESCE($5, color),
        mileage = COALESCE($6, mileage),
        image_url = COALESCE($7, image_url)
    WHERE auction_id = $1
    RETURNING id, make, model, year, color, mileage, image_url
"#;

/// 경매 수정 시각 갱신
pub const TOUCH_AUCTION: &str = "UPDATE auctions SET updated_at = $2 WHERE id = $1";

/// 경매 삭제 (상품은 cascade)
pub const DELETE_AUCTION: &str = "DELETE FROM auctions WHERE id = $1";

/// 이벤트 outbox 기록
pub const APPEND_EVENT: &str = r#"
    INSERT INTO auction_events (aggregate_id, event_type, data, created_at)
    VALUES ($1, $2, $3, $4)
    RETURNING id
"#;

/// 미발행 이벤트 조회
pub const GET_UNPUBLISHED_EVENTS: &str = r#"
    SELECT id, aggregate_id, event_type, data, created_at
    FROM auction_events
    WHERE published_at IS NULL
    ORDER BY id ASC
    LIMIT $1
"#;

/// 이벤트 발행 완료 표시
pub const MARK_EVENT_PUBLISHED: &str =
    "UPDATE auction_events SET published_at = $2 WHERE id = $1";

/// 보관 기간이 지난 발행 완료 이벤트 삭제
pub const PRUNE_PUBLISHED_EVENTS: &str =
    "DELETE FROM auction_events WHERE published_at IS NOT NULL AND published_at < $1";
