pub mod cache;
pub mod config;
pub mod domain;
pub mod errors;
pub mod recommend;

pub use cache::{CacheClient, CacheError, DisabledCache, MemoryCache};
pub use domain::questionnaire::{Budget, GuestCount, Season, Style, VenueQueryRequest};
pub use domain::venue::{VenueRow, VenueType};
pub use errors::{ApplicationError, DomainError, InterfaceError};
pub use recommend::{
    Recommendation, RecommendationResponse, VenueQuery, VenueRecommender, VenueSource,
};
