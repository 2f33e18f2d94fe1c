use clap::Args;
use serde_json::json;
use weddy_core::config::{AppConfig, LoadOptions};
use weddy_core::domain::questionnaire::VenueQueryRequest;
use weddy_core::recommend::{explain, VenueRecommender};
use weddy_db::{connect_with_config, migrations, SqlVenueSource};

use crate::commands::{command_runtime, CommandResult};

#[derive(Debug, Clone, Args)]
pub struct RecommendArgs {
    #[arg(long, default_value = "", help = "소규모 | 중규모 | 대규모")]
    pub guest_count: String,
    #[arg(long, default_value = "", help = "저 | 중 | 고")]
    pub budget: String,
    #[arg(long, default_value = "", help = "Region substring, or 상관없음")]
    pub region: String,
    #[arg(long = "style", default_value = "", help = "Style answer, e.g. 모던")]
    pub style_preference: String,
    #[arg(long, default_value = "", help = "봄 | 여름 | 가을 | 겨울")]
    pub season: String,
    #[arg(long, help = "Number of venues to return (defaults to recommend.default_limit)")]
    pub limit: Option<u32>,
    #[arg(long, help = "Include how each answer was mapped onto the query")]
    pub explain: bool,
}

impl RecommendArgs {
    pub fn to_request(&self, default_limit: u32) -> VenueQueryRequest {
        VenueQueryRequest {
            guest_count: self.guest_count.clone(),
            budget: self.budget.clone(),
            region: self.region.clone(),
            style_preference: self.style_preference.clone(),
            season: self.season.clone(),
            num_recommendations: self.limit.unwrap_or(default_limit),
        }
    }
}

pub fn run(args: RecommendArgs) -> CommandResult {
    let config = match AppConfig::load(LoadOptions::default()) {
        Ok(config) => config,
        Err(error) => {
            return CommandResult::failure(
                "recommend",
                "config_validation",
                format!("configuration issue: {error}"),
                2,
            );
        }
    };

    let runtime = match command_runtime("recommend") {
        Ok(runtime) => runtime,
        Err(failure) => return failure,
    };

    let request = args.to_request(config.recommend.default_limit);
    let result = runtime.block_on(async {
        let pool = connect_with_config(&config.database)
            .await
            .map_err(|error| ("db_connectivity", error.to_string(), 4u8))?;
        migrations::run_pending(&pool)
            .await
            .map_err(|error| ("migration", error.to_string(), 5u8))?;

        let recommender = VenueRecommender::new(SqlVenueSource::new(pool.clone()));
        let response = recommender
            .recommend(&request)
            .await
            .map_err(|error| ("recommendation", error.to_string(), 7u8));
        pool.close().await;
        response
    });

    match result {
        Ok(response) => {
            let count = response.recommendations.len();
            let mut data = json!({ "response": response });
            if args.explain {
                data["explanation"] = json!(explain(&request));
            }
            CommandResult::success_with_data(
                "recommend",
                format!("{count} venue(s) recommended"),
                Some(data),
            )
        }
        Err((error_class, message, exit_code)) => {
            CommandResult::failure("recommend", error_class, message, exit_code)
        }
    }
}
