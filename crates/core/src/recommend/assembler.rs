use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::domain::questionnaire::{Budget, GuestCount, Season, VenueQueryRequest};
use crate::domain::venue::VenueRow;
use crate::errors::ApplicationError;

use super::fallback::{self, Relaxation};
use super::mapper;
use super::query::{self, VenueQuery};

pub const NO_MATCH_ADVICE: &str = "조건에 맞는 웨딩홀을 찾지 못했습니다. 다른 조건으로 검색해보세요.";
const DEFAULT_ADVICE: &str = "조건에 맞는 웨딩홀을 신중히 비교해보세요.";
const NOT_AVAILABLE: &str = "정보 없음";
const RELAXED_BOOKING_TIP: &str = "조건을 조정하시면 더 많은 옵션을 확인할 수 있습니다.";

/// Executes composed venue queries. Implementations must bind every value in
/// [`VenueQuery::params`] through the driver, never by splicing text.
#[async_trait]
pub trait VenueSource: Send + Sync {
    async fn fetch(&self, query: &VenueQuery) -> Result<Vec<VenueRow>, ApplicationError>;
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recommendation {
    pub venue_name: String,
    pub description: String,
    pub capacity: String,
    pub location: String,
    pub price_range: String,
    pub estimated_cost: String,
    pub why_recommended: String,
    pub pros: Vec<String>,
    pub cons: Vec<String>,
    pub amenities: Vec<String>,
    pub food_style: Vec<String>,
    pub phone: String,
    pub image_url: String,
    pub booking_tips: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationResponse {
    pub recommendations: Vec<Recommendation>,
    pub overall_advice: String,
}

impl RecommendationResponse {
    pub fn no_match() -> Self {
        Self { recommendations: Vec::new(), overall_advice: NO_MATCH_ADVICE.to_string() }
    }
}

pub struct VenueRecommender<S> {
    source: S,
}

impl<S: VenueSource> VenueRecommender<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Runs the strict query, then the fallback candidates in order if it
    /// comes back empty. Source failures are returned as-is.
    pub async fn recommend(
        &self,
        request: &VenueQueryRequest,
    ) -> Result<RecommendationResponse, ApplicationError> {
        let fingerprint = request.fingerprint();
        let primary = query::compose(request);
        debug!(
            event_name = "venue.recommend.query_composed",
            request_fingerprint = %fingerprint,
            sql = %primary.sql,
            explanation = ?query::explain(request),
            "composed recommendation query"
        );

        let rows = self.source.fetch(&primary).await?;
        if !rows.is_empty() {
            info!(
                event_name = "venue.recommend.matched",
                request_fingerprint = %fingerprint,
                row_count = rows.len(),
                "recommendation query matched"
            );
            return Ok(RecommendationResponse {
                recommendations: rows.iter().map(|row| matched(row, request)).collect(),
                overall_advice: overall_advice(request),
            });
        }

        for candidate in fallback::plan(request) {
            info!(
                event_name = "venue.recommend.fallback_attempt",
                request_fingerprint = %fingerprint,
                relaxation = ?candidate.relaxation,
                "strict query empty, trying relaxed query"
            );
            let rows = self.source.fetch(&candidate.query).await?;
            if let Some(row) = rows.first() {
                return Ok(relaxed(row, request, candidate.relaxation));
            }
        }

        info!(
            event_name = "venue.recommend.no_match",
            request_fingerprint = %fingerprint,
            "no venue matched even after relaxation"
        );
        Ok(RecommendationResponse::no_match())
    }
}

fn enrich(row: &VenueRow, request: &VenueQueryRequest) -> Recommendation {
    let venue_type = row.venue_type();
    let profile = mapper::profile(venue_type);
    let label = match venue_type {
        Some(_) => profile.label,
        None => row.venue_type.as_str(),
    };

    Recommendation {
        venue_name: row.name.clone(),
        description: format!("{label} 타입의 웨딩홀입니다."),
        capacity: format!("주차 {}대 가능", row.parking),
        location: non_empty(row.address.as_deref()).unwrap_or(NOT_AVAILABLE).to_string(),
        price_range: profile.price_tier.as_str().to_string(),
        estimated_cost: mapper::estimated_cost(venue_type, request.guest_count()).to_string(),
        why_recommended: String::new(),
        pros: to_strings(profile.pros),
        cons: to_strings(profile.cons),
        amenities: vec![format!("주차 {}대", row.parking)],
        food_style: to_strings(profile.food_styles),
        phone: row.phone.clone().unwrap_or_default(),
        image_url: row.image_url.clone().unwrap_or_default(),
        booking_tips: Vec::new(),
    }
}

fn matched(row: &VenueRow, request: &VenueQueryRequest) -> Recommendation {
    let season = request.season.trim();
    Recommendation {
        why_recommended: why_recommended(request),
        booking_tips: vec![
            format!("{season} 시즌은 최소 6개월 전 예약 권장"),
            "주말 예약 시 평일 대비 20-30% 할증".to_string(),
            "오프 시즌 할인 이벤트 확인".to_string(),
        ],
        ..enrich(row, request)
    }
}

fn relaxed(
    row: &VenueRow,
    request: &VenueQueryRequest,
    relaxation: Relaxation,
) -> RecommendationResponse {
    let relaxed_by = relaxation.description();
    let recommendation = Recommendation {
        why_recommended: format!("정확히 일치하는 결과가 없어 {relaxed_by}하여 추천드립니다."),
        booking_tips: vec![RELAXED_BOOKING_TIP.to_string()],
        ..enrich(row, request)
    };

    RecommendationResponse {
        recommendations: vec![recommendation],
        overall_advice: format!(
            "정확히 일치하는 결과가 없어 {relaxed_by}하여 비슷한 웨딩홀을 추천드립니다."
        ),
    }
}

/// Sentence naming only the facets the user actually answered.
pub fn why_recommended(request: &VenueQueryRequest) -> String {
    let mut parts = Vec::new();
    if let Some(guest_count) = non_empty(Some(&request.guest_count)) {
        parts.push(format!("{guest_count} 하객 수용"));
    }
    if let Some(budget) = non_empty(Some(&request.budget)) {
        parts.push(format!("{budget} 예산대"));
    }
    if let Some(region) = request.region_filter() {
        parts.push(format!("{region} 지역"));
    }
    if let Some(style) = non_empty(Some(&request.style_preference)) {
        parts.push(format!("{style} 스타일"));
    }
    if let Some(season) = non_empty(Some(&request.season)) {
        parts.push(format!("{season} 예식"));
    }

    if parts.is_empty() {
        return "요청하신 조건에 적합합니다.".to_string();
    }
    format!("{}에 적합합니다.", parts.join(", "))
}

pub fn overall_advice(request: &VenueQueryRequest) -> String {
    let mut advice = Vec::new();

    match request.budget() {
        Some(Budget::Low) => advice.push("예산을 고려해 평일 예식이나 오프시즌 할인을 활용해보세요"),
        Some(Budget::High) => advice.push("프리미엄 서비스와 부대시설을 적극 활용하세요"),
        None => {}
    }

    match request.guest_count() {
        Some(GuestCount::Small) => advice.push("소규모 웨딩은 프라이빗한 분위기를 살릴 수 있어요"),
        Some(GuestCount::Large) => advice.push("대규모 예식은 주차와 접근성을 꼭 확인하세요"),
        Some(GuestCount::Medium) | None => {}
    }

    match request.season() {
        Some(Season::Spring) | Some(Season::Autumn) => {
            advice.push("성수기라 최소 6개월 전 예약을 권장합니다")
        }
        Some(Season::Summer) => advice.push("야외 웨딩홀은 날씨 변수를 고려하세요"),
        Some(Season::Winter) => advice.push("실내 웨딩홀 위주로 알아보시는 것을 추천드려요"),
        None => {}
    }

    if advice.is_empty() {
        DEFAULT_ADVICE.to_string()
    } else {
        advice.join(" ")
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(ToString::to_string).collect()
}
