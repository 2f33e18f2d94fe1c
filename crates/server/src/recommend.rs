use std::sync::Arc;

use axum::{extract::State, routing::post, Json, Router};
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;
use weddy_core::domain::questionnaire::VenueQueryRequest;
use weddy_core::recommend::{RecommendationResponse, VenueRecommender};
use weddy_db::SqlVenueSource;

use crate::error::ApiError;

#[derive(Clone)]
pub struct RecommendState {
    recommender: Arc<VenueRecommender<SqlVenueSource>>,
    default_limit: u32,
}

impl RecommendState {
    pub fn new(source: SqlVenueSource, default_limit: u32) -> Self {
        Self { recommender: Arc::new(VenueRecommender::new(source)), default_limit }
    }
}

/// Wire shape of a questionnaire submission. Every answer may be omitted.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct RecommendBody {
    pub guest_count: String,
    pub budget: String,
    pub region: String,
    pub style_preference: String,
    pub season: String,
    pub num_recommendations: Option<u32>,
}

impl RecommendBody {
    pub fn into_request(self, default_limit: u32) -> VenueQueryRequest {
        VenueQueryRequest {
            guest_count: self.guest_count,
            budget: self.budget,
            region: self.region,
            style_preference: self.style_preference,
            season: self.season,
            num_recommendations: self.num_recommendations.unwrap_or(default_limit),
        }
    }
}

pub fn router(state: RecommendState) -> Router {
    Router::new().route("/api/v1/venues/recommend", post(recommend)).with_state(state)
}

async fn recommend(
    State(state): State<RecommendState>,
    Json(body): Json<RecommendBody>,
) -> Result<Json<RecommendationResponse>, ApiError> {
    let correlation_id = Uuid::new_v4().to_string();
    let request = body.into_request(state.default_limit);
    let fingerprint = request.fingerprint();

    info!(
        event_name = "venue.recommend.requested",
        correlation_id = %correlation_id,
        request_fingerprint = %fingerprint,
        region = %request.region,
        style = %request.style_preference,
        limit = request.limit(),
        "recommendation requested"
    );

    match state.recommender.recommend(&request).await {
        Ok(response) => {
            info!(
                event_name = "venue.recommend.completed",
                correlation_id = %correlation_id,
                request_fingerprint = %fingerprint,
                result_count = response.recommendations.len(),
                "recommendation completed"
            );
            Ok(Json(response))
        }
        Err(failure) => {
            error!(
                event_name = "venue.recommend.failed",
                correlation_id = %correlation_id,
                request_fingerprint = %fingerprint,
                error = %failure,
                "recommendation failed"
            );
            Err(ApiError(failure.into_interface(correlation_id)))
        }
    }
}
