//! Questionnaire-driven venue recommendation.
//!
//! `mapper` holds the static lookup tables, `query` turns a request into one
//! parameterized statement, `fallback` lists the relaxed statements tried when
//! that finds nothing, and `assembler` drives the whole exchange against a
//! [`VenueSource`].

pub mod assembler;
pub mod fallback;
pub mod mapper;
pub mod query;

pub use assembler::{Recommendation, RecommendationResponse, VenueRecommender, VenueSource};
pub use fallback::{FallbackCandidate, Relaxation};
pub use query::{compose, explain, QueryExplanation, QueryParams, QueryValue, VenueQuery};
