//! Relaxed queries tried, in order, when the strict query finds nothing.

use serde::Serialize;

use crate::domain::questionnaire::VenueQueryRequest;

use super::mapper;
use super::query::{PredicateSet, VenueQuery};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relaxation {
    /// Keep only the style-derived venue types.
    StyleOnly,
    /// Drop every filter.
    Unconditional,
}

impl Relaxation {
    pub fn description(self) -> &'static str {
        match self {
            Self::StyleOnly => "스타일 조건만 적용",
            Self::Unconditional => "지역 조건을 완화",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FallbackCandidate {
    pub query: VenueQuery,
    pub relaxation: Relaxation,
}

/// Candidates in the order they must be tried. Region, parking and budget are
/// dropped outright; the style filter ignores the season adjustment. A style
/// with no type mapping skips straight to the unconditional query.
pub fn plan(request: &VenueQueryRequest) -> Vec<FallbackCandidate> {
    let mut candidates = Vec::with_capacity(2);

    let style_types = mapper::style_venue_types(request.style());
    if !style_types.is_empty() {
        let mut predicates = PredicateSet::default();
        predicates.push_venue_types(style_types);
        candidates.push(FallbackCandidate {
            query: VenueQuery::render(predicates, false, 1),
            relaxation: Relaxation::StyleOnly,
        });
    }

    candidates.push(FallbackCandidate {
        query: VenueQuery::render(PredicateSet::default(), false, 1),
        relaxation: Relaxation::Unconditional,
    });

    candidates
}

#[cfg(test)]
mod tests {
    use crate::domain::questionnaire::VenueQueryRequest;
    use crate::recommend::query::QueryValue;

    use super::{plan, Relaxation};

    fn request(style: &str) -> VenueQueryRequest {
        VenueQueryRequest {
            guest_count: "대규모".to_string(),
            budget: "저".to_string(),
            region: "제주".to_string(),
            style_preference: style.to_string(),
            season: "여름".to_string(),
            num_recommendations: 5,
        }
    }

    #[test]
    fn style_only_candidate_comes_first() {
        let candidates = plan(&request("유니크"));

        assert_eq!(candidates.len(), 2);
        assert_eq!(candidates[0].relaxation, Relaxation::StyleOnly);
        assert_eq!(candidates[1].relaxation, Relaxation::Unconditional);
    }

    #[test]
    fn style_only_keeps_raw_style_types_and_drops_everything_else() {
        let candidates = plan(&request("유니크"));
        let style_only = &candidates[0].query;

        assert_eq!(
            style_only.sql,
            "SELECT name, venueType, parking, address, phone, imageUrl FROM tb_wedding_hall \
             WHERE venueType IN (:venue_type_0, :venue_type_1, :venue_type_2) LIMIT :limit"
        );
        assert_eq!(
            style_only.params.get("venue_type_2"),
            Some(&QueryValue::Text("OTHER".to_string()))
        );
        assert_eq!(style_only.params.get("limit"), Some(&QueryValue::Int(1)));
        assert!(style_only.params.get("region_pattern").is_none());
        assert!(style_only.params.get("parking_min").is_none());
        assert!(style_only.params.get("excluded_type").is_none());
    }

    #[test]
    fn unconditional_candidate_has_no_where_clause() {
        let candidates = plan(&request("모던"));
        let unconditional = &candidates[1].query;

        assert!(!unconditional.sql.contains("WHERE"));
        assert_eq!(unconditional.limit, 1);
        assert_eq!(unconditional.params.len(), 1);
    }

    #[test]
    fn unmapped_style_skips_style_only_candidate() {
        let candidates = plan(&request(""));

        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].relaxation, Relaxation::Unconditional);
    }

    #[test]
    fn descriptions_are_fixed_text() {
        assert_eq!(Relaxation::StyleOnly.description(), "스타일 조건만 적용");
        assert_eq!(Relaxation::Unconditional.description(), "지역 조건을 완화");
    }
}
