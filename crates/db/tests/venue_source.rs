use weddy_core::domain::questionnaire::VenueQueryRequest;
use weddy_core::domain::venue::VenueType;
use weddy_core::errors::ApplicationError;
use weddy_core::recommend::assembler::NO_MATCH_ADVICE;
use weddy_core::recommend::mapper::INDOOR_TYPES;
use weddy_core::recommend::VenueRecommender;
use weddy_db::{connect_with_settings, migrations, DbPool, SqlVenueSource, WeddingHallSeed};

async fn empty_pool() -> DbPool {
    let pool = connect_with_settings("sqlite::memory:", 1, 5).await.expect("connect");
    migrations::run_pending(&pool).await.expect("run migrations");
    pool
}

async fn seeded_recommender() -> VenueRecommender<SqlVenueSource> {
    let pool = empty_pool().await;
    WeddingHallSeed::load(&pool).await.expect("seed venues");
    VenueRecommender::new(SqlVenueSource::new(pool))
}

fn request(guest: &str, budget: &str, region: &str, style: &str, season: &str) -> VenueQueryRequest {
    VenueQueryRequest {
        guest_count: guest.to_string(),
        budget: budget.to_string(),
        region: region.to_string(),
        style_preference: style.to_string(),
        season: season.to_string(),
        num_recommendations: 3,
    }
}

#[tokio::test]
async fn strict_query_returns_matching_seoul_wedding_hall() {
    let recommender = seeded_recommender().await;

    let response = recommender
        .recommend(&request("중규모", "고", "서울", "모던", "가을"))
        .await
        .expect("recommend");

    let names: Vec<&str> =
        response.recommendations.iter().map(|item| item.venue_name.as_str()).collect();
    assert_eq!(names, vec!["더채플앳청담"]);

    let chapel = &response.recommendations[0];
    assert_eq!(chapel.capacity, "주차 120대 가능");
    assert_eq!(chapel.phone, "02-1234-5678");
    assert!(chapel.why_recommended.contains("서울 지역"));
    assert_eq!(chapel.booking_tips.len(), 3);
}

#[tokio::test]
async fn indoor_season_replaces_outdoor_styles_with_indoor_set() {
    let recommender = seeded_recommender().await;

    let response = recommender
        .recommend(&request("", "", "상관없음", "자연친화", "여름"))
        .await
        .expect("recommend");

    assert_eq!(response.recommendations.len(), 3);
    for item in &response.recommendations {
        assert!(
            !item.venue_name.contains("가든") && !item.venue_name.contains("루프탑"),
            "outdoor venue {} should be filtered in summer",
            item.venue_name
        );
    }
}

#[tokio::test]
async fn high_budget_orders_hotels_first_then_by_id() {
    let recommender = seeded_recommender().await;

    let response = recommender
        .recommend(&VenueQueryRequest {
            budget: "고".to_string(),
            num_recommendations: 50,
            ..VenueQueryRequest::default()
        })
        .await
        .expect("recommend");

    let names: Vec<&str> =
        response.recommendations.iter().map(|item| item.venue_name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "그랜드 인터컨티넨탈 서울",
            "해운대 오션 호텔",
            "호텔 수원 파크",
            "더채플앳청담",
            "가든 포레스트",
            "한강 루프탑 웨딩",
            "라비에벨 다이닝",
            "스튜디오 오월",
            "아트하우스 제주",
            "더클래식 웨딩홀 대구",
        ]
    );
}

#[tokio::test]
async fn style_only_fallback_returns_single_relaxed_result() {
    let recommender = seeded_recommender().await;

    let response = recommender
        .recommend(&request("대규모", "", "제주", "유니크", "봄"))
        .await
        .expect("recommend");

    assert_eq!(response.recommendations.len(), 1);
    let item = &response.recommendations[0];
    assert!(item.why_recommended.starts_with("정확히 일치하는 결과가 없어 스타일 조건만 적용"));
    assert!(response.overall_advice.contains("스타일 조건만 적용"));
}

#[tokio::test]
async fn unconditional_fallback_when_style_is_unanswered() {
    let recommender = seeded_recommender().await;

    let response =
        recommender.recommend(&request("", "", "울릉도", "", "")).await.expect("recommend");

    assert_eq!(response.recommendations.len(), 1);
    assert!(response.overall_advice.contains("지역 조건을 완화"));
}

#[tokio::test]
async fn empty_catalogue_yields_no_match_advice() {
    let recommender = VenueRecommender::new(SqlVenueSource::new(empty_pool().await));

    let response = recommender
        .recommend(&request("중규모", "고", "서울", "유니크", "가을"))
        .await
        .expect("recommend");

    assert!(response.recommendations.is_empty());
    assert_eq!(response.overall_advice, NO_MATCH_ADVICE);
}

#[tokio::test]
async fn database_failure_is_not_reported_as_no_match() {
    let recommender = seeded_recommender().await;
    recommender.source().pool().close().await;

    let error = recommender
        .recommend(&request("중규모", "고", "서울", "모던", "가을"))
        .await
        .expect_err("closed pool must fail");
    assert!(matches!(error, ApplicationError::Database(_)));
}

#[tokio::test]
async fn indoor_set_matches_seeded_types() {
    let pool = empty_pool().await;
    WeddingHallSeed::load(&pool).await.expect("seed venues");

    for venue_type in INDOOR_TYPES {
        let present: i64 =
            sqlx::query_scalar("SELECT COUNT(1) FROM tb_wedding_hall WHERE venueType = ?1")
                .bind(venue_type.code())
                .fetch_one(&pool)
                .await
                .expect("count type");
        assert!(present > 0, "{venue_type:?} missing from seed");
    }
    assert_eq!(VenueType::from_code("GARDEN"), Some(VenueType::Garden));
}
