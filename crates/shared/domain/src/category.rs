//! Service categories and price types.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Fixed set of service categories.
///
/// Serialized with the Turkish wire names the backend stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Ev & Tadilat")]
    HomeRenovation,
    #[serde(rename = "Temizlik")]
    Cleaning,
    #[serde(rename = "Eğitim")]
    Education,
    #[serde(rename = "Taşımacılık")]
    Transport,
    #[serde(rename = "Teknoloji")]
    Technology,
    #[serde(rename = "Güzellik & Bakım")]
    BeautyCare,
    #[serde(rename = "Teknik Servis")]
    TechnicalService,
    #[serde(rename = "Etkinlik")]
    Events,
}

impl Category {
    /// All categories in display order
    pub const ALL: [Category; 8] = [
        Category::HomeRenovation,
        Category::Cleaning,
        Category::Education,
        Category::Transport,
        Category::Technology,
        Category::BeautyCare,
        Category::TechnicalService,
        Category::Events,
    ];

    /// Wire/display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::HomeRenovation => "Ev & Tadilat",
            Category::Cleaning => "Temizlik",
            Category::Education => "Eğitim",
            Category::Transport => "Taşımacılık",
            Category::Technology => "Teknoloji",
            Category::BeautyCare => "Güzellik & Bakım",
            Category::TechnicalService => "Teknik Servis",
            Category::Events => "Etkinlik",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            Category::HomeRenovation => "\u{1F3E0}",   // 🏠
            Category::Cleaning => "\u{1F9F9}",         // 🧹
            Category::Education => "\u{1F4DA}",        // 📚
            Category::Transport => "\u{1F69A}",        // 🚚
            Category::Technology => "\u{1F4BB}",       // 💻
            Category::BeautyCare => "\u{1F485}",       // 💅
            Category::TechnicalService => "\u{1F527}", // 🔧
            Category::Events => "\u{1F389}",           // 🎉
        }
    }

    /// Short blurb shown in the categories dialog
    pub fn description(&self) -> &'static str {
        match self {
            Category::HomeRenovation => "Boya, tadilat, tamirat işleri",
            Category::Cleaning => "Ev, ofis, inşaat temizliği",
            Category::Education => "Özel ders, kurs, koçluk",
            Category::Transport => "Nakliye, taşıma hizmetleri",
            Category::Technology => "Yazılım, donanım, IT destek",
            Category::BeautyCare => "Kuaför, manikür, masaj",
            Category::TechnicalService => "Elektronik tamiri, montaj",
            Category::Events => "Organizasyon, fotoğrafçılık",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::HomeRenovation
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == trimmed)
            .ok_or_else(|| ValidationError::InvalidCategory(trimmed.to_string()))
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How a listing's price is charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceType {
    #[serde(rename = "sabit")]
    Fixed,
    #[serde(rename = "saat")]
    Hourly,
    #[serde(rename = "m²")]
    PerArea,
    #[serde(rename = "gün")]
    Daily,
}

impl PriceType {
    pub const ALL: [PriceType; 4] = [
        PriceType::Fixed,
        PriceType::Hourly,
        PriceType::PerArea,
        PriceType::Daily,
    ];

    /// Wire value, also used as the price suffix
    pub fn as_str(&self) -> &'static str {
        match self {
            PriceType::Fixed => "sabit",
            PriceType::Hourly => "saat",
            PriceType::PerArea => "m²",
            PriceType::Daily => "gün",
        }
    }

    /// Form label
    pub fn label(&self) -> &'static str {
        match self {
            PriceType::Fixed => "Sabit Fiyat",
            PriceType::Hourly => "Saat Başı",
            PriceType::PerArea => "Metrekare",
            PriceType::Daily => "Günlük",
        }
    }
}

impl Default for PriceType {
    fn default() -> Self {
        PriceType::Fixed
    }
}

impl FromStr for PriceType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        PriceType::ALL
            .into_iter()
            .find(|p| p.as_str() == trimmed)
            .ok_or_else(|| ValidationError::InvalidPriceType(trimmed.to_string()))
    }
}

impl std::fmt::Display for PriceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_wire_names_round_trip() {
        for category in Category::ALL {
            let json = serde_json::to_string(&category).unwrap();
            assert_eq!(json, format!("\"{}\"", category.as_str()));
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_unknown_category_rejected() {
        let err = "Bahçe".parse::<Category>().unwrap_err();
        assert_eq!(err, ValidationError::InvalidCategory("Bahçe".to_string()));
    }

    #[test]
    fn test_all_sentinel_is_not_a_category() {
        assert!(crate::CATEGORY_ALL.parse::<Category>().is_err());
    }

    #[test]
    fn test_price_type_parse() {
        assert_eq!("saat".parse::<PriceType>().unwrap(), PriceType::Hourly);
        assert_eq!(" m² ".parse::<PriceType>().unwrap(), PriceType::PerArea);
        assert!("weekly".parse::<PriceType>().is_err());
    }

    #[test]
    fn test_defaults_match_form_defaults() {
        assert_eq!(Category::default().as_str(), "Ev & Tadilat");
        assert_eq!(PriceType::default().as_str(), "sabit");
    }
}
