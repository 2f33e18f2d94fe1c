use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Region answer meaning "no preference".
pub const ANY_REGION: &str = "상관없음";

pub const DEFAULT_RECOMMENDATIONS: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GuestCount {
    Small,
    Medium,
    Large,
}

impl GuestCount {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "소규모" => Some(Self::Small),
            "중규모" => Some(Self::Medium),
            "대규모" => Some(Self::Large),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Small => "소규모",
            Self::Medium => "중규모",
            Self::Large => "대규모",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Budget {
    Low,
    High,
}

impl Budget {
    /// Only the two extreme tiers carry query semantics; "중" and anything else
    /// are treated as unspecified.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "저" => Some(Self::Low),
            "고" => Some(Self::High),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "저",
            Self::High => "고",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Style {
    Luxury,
    Modern,
    Classic,
    NatureFriendly,
    OutdoorGarden,
    Minimal,
    Unique,
}

impl Style {
    pub const ALL: [Style; 7] = [
        Self::Luxury,
        Self::Modern,
        Self::Classic,
        Self::NatureFriendly,
        Self::OutdoorGarden,
        Self::Minimal,
        Self::Unique,
    ];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "럭셔리" => Some(Self::Luxury),
            "모던" => Some(Self::Modern),
            "클래식" => Some(Self::Classic),
            "자연친화" => Some(Self::NatureFriendly),
            "야외정원" => Some(Self::OutdoorGarden),
            "미니멀" => Some(Self::Minimal),
            "유니크" => Some(Self::Unique),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Luxury => "럭셔리",
            Self::Modern => "모던",
            Self::Classic => "클래식",
            Self::NatureFriendly => "자연친화",
            Self::OutdoorGarden => "야외정원",
            Self::Minimal => "미니멀",
            Self::Unique => "유니크",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Season {
    Spring,
    Summer,
    Autumn,
    Winter,
}

impl Season {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "봄" => Some(Self::Spring),
            "여름" => Some(Self::Summer),
            "가을" => Some(Self::Autumn),
            "겨울" => Some(Self::Winter),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Spring => "봄",
            Self::Summer => "여름",
            Self::Autumn => "가을",
            Self::Winter => "겨울",
        }
    }

    /// Summer and winter weddings are steered toward indoor venues.
    pub fn prefers_indoor(self) -> bool {
        matches!(self, Self::Summer | Self::Winter)
    }
}

/// Questionnaire answers as submitted by the user.
///
/// The raw answer text is kept so explanatory sentences can echo the user's
/// own wording; the typed accessors resolve each answer into its enum domain
/// and return `None` for anything unrecognized.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueQueryRequest {
    #[serde(default)]
    pub guest_count: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub style_preference: String,
    #[serde(default)]
    pub season: String,
    #[serde(default = "default_recommendations")]
    pub num_recommendations: u32,
}

fn default_recommendations() -> u32 {
    DEFAULT_RECOMMENDATIONS
}

impl Default for VenueQueryRequest {
    fn default() -> Self {
        Self {
            guest_count: String::new(),
            budget: String::new(),
            region: String::new(),
            style_preference: String::new(),
            season: String::new(),
            num_recommendations: DEFAULT_RECOMMENDATIONS,
        }
    }
}

impl VenueQueryRequest {
    pub fn guest_count(&self) -> Option<GuestCount> {
        GuestCount::parse(&self.guest_count)
    }

    pub fn budget(&self) -> Option<Budget> {
        Budget::parse(&self.budget)
    }

    pub fn style(&self) -> Option<Style> {
        Style::parse(&self.style_preference)
    }

    pub fn season(&self) -> Option<Season> {
        Season::parse(&self.season)
    }

    /// Region text to filter on, or `None` when empty or the no-preference
    /// sentinel.
    pub fn region_filter(&self) -> Option<&str> {
        let region = self.region.trim();
        (!region.is_empty() && region != ANY_REGION).then_some(region)
    }

    pub fn limit(&self) -> u32 {
        self.num_recommendations.max(1)
    }

    /// Stable hex digest of the answers, used to correlate identical requests
    /// in logs.
    pub fn fingerprint(&self) -> String {
        let key = format!(
            "{}_{}_{}_{}_{}_{}",
            self.guest_count,
            self.budget,
            self.region,
            self.style_preference,
            self.season,
            self.num_recommendations
        );
        let mut hasher = Sha256::new();
        hasher.update(key.as_bytes());
        format!("{:x}", hasher.finalize())
    }
}

#[cfg(test)]
mod tests {
    use super::{Budget, GuestCount, Season, Style, VenueQueryRequest, ANY_REGION};

    #[test]
    fn parses_known_answers_and_rejects_unknown() {
        assert_eq!(GuestCount::parse("중규모"), Some(GuestCount::Medium));
        assert_eq!(GuestCount::parse("엄청 많음"), None);
        assert_eq!(Budget::parse("저"), Some(Budget::Low));
        assert_eq!(Budget::parse("중"), None);
        assert_eq!(Season::parse(" 겨울 "), Some(Season::Winter));
        assert_eq!(Style::parse("빈티지"), None);

        for style in Style::ALL {
            assert_eq!(Style::parse(style.as_str()), Some(style));
        }
    }

    #[test]
    fn region_sentinel_and_blank_mean_no_filter() {
        let mut request = VenueQueryRequest { region: ANY_REGION.to_string(), ..Default::default() };
        assert_eq!(request.region_filter(), None);

        request.region = "   ".to_string();
        assert_eq!(request.region_filter(), None);

        request.region = "서울".to_string();
        assert_eq!(request.region_filter(), Some("서울"));
    }

    #[test]
    fn limit_is_always_positive() {
        let request = VenueQueryRequest { num_recommendations: 0, ..Default::default() };
        assert_eq!(request.limit(), 1);
        assert_eq!(VenueQueryRequest::default().limit(), 3);
    }

    #[test]
    fn missing_json_fields_fall_back_to_defaults() {
        let request: VenueQueryRequest =
            serde_json::from_str(r#"{"style_preference":"모던"}"#).expect("request should parse");

        assert_eq!(request.style(), Some(Style::Modern));
        assert_eq!(request.num_recommendations, 3);
        assert!(request.guest_count.is_empty());
    }

    #[test]
    fn fingerprint_is_stable_and_input_sensitive() {
        let request = VenueQueryRequest {
            guest_count: "중규모".to_string(),
            budget: "고".to_string(),
            region: "서울".to_string(),
            style_preference: "모던".to_string(),
            season: "가을".to_string(),
            num_recommendations: 3,
        };

        let first = request.fingerprint();
        assert_eq!(first, request.clone().fingerprint());
        assert_eq!(first.len(), 64);

        let other = VenueQueryRequest { season: "봄".to_string(), ..request };
        assert_ne!(first, other.fingerprint());
    }
}
