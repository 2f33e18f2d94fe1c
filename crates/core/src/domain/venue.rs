use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum VenueType {
    Hotel,
    WeddingHall,
    Outdoor,
    Restaurant,
    HouseStudio,
    Garden,
    Other,
}

impl VenueType {
    pub const ALL: [VenueType; 7] = [
        Self::Hotel,
        Self::WeddingHall,
        Self::Outdoor,
        Self::Restaurant,
        Self::HouseStudio,
        Self::Garden,
        Self::Other,
    ];

    /// Code stored in the `venueType` column.
    pub fn code(self) -> &'static str {
        match self {
            Self::Hotel => "HOTEL",
            Self::WeddingHall => "WEDDING_HALL",
            Self::Outdoor => "OUTDOOR",
            Self::Restaurant => "RESTAURANT",
            Self::HouseStudio => "HOUSE_STUDIO",
            Self::Garden => "GARDEN",
            Self::Other => "OTHER",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|venue_type| venue_type.code() == code.trim())
    }
}

/// One `tb_wedding_hall` record. The venue type is kept as the stored code so
/// rows with codes outside the known set still render.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VenueRow {
    pub name: String,
    pub venue_type: String,
    pub parking: i64,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub image_url: Option<String>,
}

impl VenueRow {
    pub fn venue_type(&self) -> Option<VenueType> {
        VenueType::from_code(&self.venue_type)
    }
}
