//! Static lookup tables translating questionnaire answers into query filters
//! and venue-type enrichment.
//!
//! Every function here is total: answers outside the known domain map to an
//! empty filter or a default profile instead of an error.

use serde::Serialize;

use crate::domain::questionnaire::{GuestCount, Season, Style};
use crate::domain::venue::VenueType;

/// Venue types considered usable regardless of weather.
pub const INDOOR_TYPES: [VenueType; 4] =
    [VenueType::Hotel, VenueType::WeddingHall, VenueType::Restaurant, VenueType::HouseStudio];

const UNKNOWN_COST: &str = "문의 필요";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum PriceTier {
    #[serde(rename = "저")]
    Low,
    #[serde(rename = "중")]
    Mid,
    #[serde(rename = "고")]
    High,
}

impl PriceTier {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "저",
            Self::Mid => "중",
            Self::High => "고",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParkingRange {
    pub min: i64,
    pub max: Option<i64>,
}

/// Fixed descriptive data for one venue type.
#[derive(Debug)]
pub struct VenueProfile {
    pub label: &'static str,
    pub price_tier: PriceTier,
    /// Estimated total cost indexed small / medium / large.
    pub costs: Option<[&'static str; 3]>,
    pub pros: &'static [&'static str],
    pub cons: &'static [&'static str],
    pub food_styles: &'static [&'static str],
}

const NO_INFO: &[&str] = &["정보 없음"];

const HOTEL: VenueProfile = VenueProfile {
    label: "호텔",
    price_tier: PriceTier::High,
    costs: Some(["3,000만원~", "5,000만원~", "8,000만원~"]),
    pros: &["최고급 서비스", "부대시설 완비", "접근성 좋음"],
    cons: &["높은 비용", "형식적 분위기"],
    food_styles: &["코스", "파인다이닝"],
};

const WEDDING_HALL: VenueProfile = VenueProfile {
    label: "웨딩홀",
    price_tier: PriceTier::Mid,
    costs: Some(["1,500만원~", "2,500만원~", "4,000만원~"]),
    pros: &["전문 웨딩 서비스", "다양한 패키지", "편리한 진행"],
    cons: &["획일적인 진행", "시간 제약"],
    food_styles: &["뷔페", "코스"],
};

const OUTDOOR: VenueProfile = VenueProfile {
    label: "야외",
    price_tier: PriceTier::Mid,
    costs: Some(["800만원~", "1,500만원~", "2,500만원~"]),
    pros: &["개방적인 분위기", "자유로운 연출", "자연광 활용"],
    cons: &["날씨 변수", "편의시설 부족"],
    food_styles: &["뷔페", "케이터링"],
};

const RESTAURANT: VenueProfile = VenueProfile {
    label: "레스토랑",
    price_tier: PriceTier::Mid,
    costs: Some(["500만원~", "1,000만원~", "2,000만원~"]),
    pros: &["맛있는 식사", "아늑한 분위기", "합리적 가격"],
    cons: &["공간 제약", "대규모 어려움"],
    food_styles: &["코스", "한정식"],
};

const HOUSE_STUDIO: VenueProfile = VenueProfile {
    label: "하우스스튜디오",
    price_tier: PriceTier::Low,
    costs: Some(["300만원~", "700만원~", "1,200만원~"]),
    pros: &["프라이빗한 공간", "자유로운 구성", "저렴한 비용"],
    cons: &["소규모만 가능", "시설 한계"],
    food_styles: &["케이터링", "핑거푸드"],
};

const GARDEN: VenueProfile = VenueProfile {
    label: "가든",
    price_tier: PriceTier::Mid,
    costs: Some(["1,000만원~", "2,000만원~", "3,500만원~"]),
    pros: &["자연친화적 분위기", "사진 촬영 좋음", "야외 세레모니 가능"],
    cons: &["날씨 영향", "계절 제한"],
    food_styles: &["뷔페", "바비큐"],
};

// Also serves as the profile for codes outside the known set.
const OTHER: VenueProfile = VenueProfile {
    label: "기타",
    price_tier: PriceTier::Mid,
    costs: None,
    pros: NO_INFO,
    cons: NO_INFO,
    food_styles: &["뷔페"],
};

pub fn profile(venue_type: Option<VenueType>) -> &'static VenueProfile {
    match venue_type {
        Some(VenueType::Hotel) => &HOTEL,
        Some(VenueType::WeddingHall) => &WEDDING_HALL,
        Some(VenueType::Outdoor) => &OUTDOOR,
        Some(VenueType::Restaurant) => &RESTAURANT,
        Some(VenueType::HouseStudio) => &HOUSE_STUDIO,
        Some(VenueType::Garden) => &GARDEN,
        Some(VenueType::Other) | None => &OTHER,
    }
}

pub fn style_venue_types(style: Option<Style>) -> &'static [VenueType] {
    use VenueType::*;

    match style {
        Some(Style::Luxury) => &[Hotel],
        Some(Style::Modern) | Some(Style::Classic) => &[Hotel, WeddingHall],
        Some(Style::NatureFriendly) | Some(Style::OutdoorGarden) => &[Garden, Outdoor],
        Some(Style::Minimal) => &[HouseStudio, Restaurant],
        Some(Style::Unique) => &[HouseStudio, Restaurant, Other],
        None => &[],
    }
}

/// Narrows a style-derived type list for seasons that favour indoor venues.
///
/// An indoor season always yields a non-empty list: when the style list is
/// empty, or shares nothing with the indoor set, the whole indoor set is used.
pub fn season_adjusted(types: &[VenueType], season: Option<Season>) -> Vec<VenueType> {
    if !season.is_some_and(Season::prefers_indoor) {
        return types.to_vec();
    }

    let indoor: Vec<VenueType> =
        types.iter().copied().filter(|venue_type| INDOOR_TYPES.contains(venue_type)).collect();
    if indoor.is_empty() {
        INDOOR_TYPES.to_vec()
    } else {
        indoor
    }
}

pub fn parking_range(guest_count: Option<GuestCount>) -> Option<ParkingRange> {
    match guest_count? {
        GuestCount::Small => Some(ParkingRange { min: 0, max: Some(50) }),
        GuestCount::Medium => Some(ParkingRange { min: 30, max: Some(150) }),
        GuestCount::Large => Some(ParkingRange { min: 100, max: None }),
    }
}

pub fn estimated_cost(venue_type: Option<VenueType>, guest_count: Option<GuestCount>) -> &'static str {
    let (Some(costs), Some(guest_count)) = (profile(venue_type).costs, guest_count) else {
        return UNKNOWN_COST;
    };

    match guest_count {
        GuestCount::Small => costs[0],
        GuestCount::Medium => costs[1],
        GuestCount::Large => costs[2],
    }
}

#[cfg(test)]
mod tests {
    use crate::domain::questionnaire::{GuestCount, Season, Style};
    use crate::domain::venue::VenueType;

    use super::{
        estimated_cost, parking_range, profile, season_adjusted, style_venue_types, PriceTier,
        INDOOR_TYPES,
    };

    #[test]
    fn every_style_maps_to_one_to_three_types() {
        for style in Style::ALL {
            let types = style_venue_types(Some(style));
            assert!((1..=3).contains(&types.len()), "{style:?} mapped to {types:?}");
        }
        assert!(style_venue_types(None).is_empty());
    }

    #[test]
    fn spring_and_autumn_leave_types_untouched() {
        let types = style_venue_types(Some(Style::NatureFriendly));
        assert_eq!(season_adjusted(types, Some(Season::Spring)), types.to_vec());
        assert_eq!(season_adjusted(types, Some(Season::Autumn)), types.to_vec());
        assert_eq!(season_adjusted(types, None), types.to_vec());
        assert!(season_adjusted(&[], Some(Season::Autumn)).is_empty());
    }

    #[test]
    fn indoor_seasons_intersect_with_indoor_set() {
        let types = style_venue_types(Some(Style::Unique));
        assert_eq!(
            season_adjusted(types, Some(Season::Winter)),
            vec![VenueType::HouseStudio, VenueType::Restaurant]
        );
    }

    #[test]
    fn indoor_season_without_style_uses_whole_indoor_set() {
        assert_eq!(season_adjusted(&[], Some(Season::Summer)), INDOOR_TYPES.to_vec());
    }

    #[test]
    fn outdoor_style_in_summer_falls_back_to_indoor_set() {
        let types = style_venue_types(Some(Style::NatureFriendly));
        assert_eq!(season_adjusted(types, Some(Season::Summer)), INDOOR_TYPES.to_vec());
    }

    #[test]
    fn parking_ranges_follow_guest_buckets() {
        let small = parking_range(Some(GuestCount::Small)).expect("small range");
        assert_eq!((small.min, small.max), (0, Some(50)));

        let medium = parking_range(Some(GuestCount::Medium)).expect("medium range");
        assert_eq!((medium.min, medium.max), (30, Some(150)));

        let large = parking_range(Some(GuestCount::Large)).expect("large range");
        assert_eq!((large.min, large.max), (100, None));

        assert!(parking_range(None).is_none());
    }

    #[test]
    fn cost_table_covers_six_types_and_defaults_otherwise() {
        assert_eq!(estimated_cost(Some(VenueType::Hotel), Some(GuestCount::Large)), "8,000만원~");
        assert_eq!(
            estimated_cost(Some(VenueType::HouseStudio), Some(GuestCount::Small)),
            "300만원~"
        );
        assert_eq!(estimated_cost(Some(VenueType::Other), Some(GuestCount::Small)), "문의 필요");
        assert_eq!(estimated_cost(Some(VenueType::Garden), None), "문의 필요");
        assert_eq!(estimated_cost(None, Some(GuestCount::Medium)), "문의 필요");
    }

    #[test]
    fn unknown_types_use_default_profile() {
        let fallback = profile(None);
        assert_eq!(fallback.price_tier, PriceTier::Mid);
        assert_eq!(fallback.pros, &["정보 없음"]);
        assert_eq!(fallback.cons, &["정보 없음"]);
        assert_eq!(fallback.food_styles, &["뷔페"]);

        assert_eq!(profile(Some(VenueType::Hotel)).price_tier, PriceTier::High);
        assert_eq!(profile(Some(VenueType::HouseStudio)).price_tier, PriceTier::Low);
    }
}
