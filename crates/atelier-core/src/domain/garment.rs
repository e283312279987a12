//! Garment Types and Templates
//!
//! The template table lists, per garment, the measurement fields a
//! designer is expected to take, in the order the form shows them.

use serde::{Deserialize, Serialize};

/// Canonical measurement fields per garment key
pub const GARMENT_TEMPLATES: &[(&str, &[&str])] = &[
    (
        "suit",
        &[
            "Chest",
            "Waist",
            "Hips",
            "Shoulder",
            "Sleeve Length",
            "Jacket Length",
            "Neck",
            "Inseam",
            "Trouser Length",
        ],
    ),
    (
        "shirt",
        &["Neck", "Chest", "Waist", "Shoulder", "Sleeve Length", "Shirt Length", "Cuff"],
    ),
    (
        "trousers",
        &["Waist", "Hips", "Inseam", "Outseam", "Thigh", "Knee", "Ankle"],
    ),
    (
        "dress",
        &["Bust", "Waist", "Hips", "Shoulder", "Dress Length", "Armhole", "Sleeve Length"],
    ),
    ("skirt", &["Waist", "Hips", "Skirt Length"]),
    (
        "blouse",
        &["Bust", "Waist", "Shoulder", "Sleeve Length", "Blouse Length", "Armhole"],
    ),
    (
        "jacket",
        &["Chest", "Waist", "Shoulder", "Sleeve Length", "Jacket Length"],
    ),
    (
        "kaftan",
        &[
            "Chest",
            "Shoulder",
            "Sleeve Length",
            "Top Length",
            "Trouser Length",
            "Waist",
            "Cap Size",
        ],
    ),
];

/// Garment category driving the expected measurement fields
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GarmentType {
    #[default]
    Suit,
    Shirt,
    Trousers,
    Dress,
    Skirt,
    Blouse,
    Jacket,
    Kaftan,
    /// Free text, used when the enumeration is bypassed
    Other(String),
}

impl GarmentType {
    /// Every predefined garment, in selector order
    pub const KNOWN: [GarmentType; 8] = [
        GarmentType::Suit,
        GarmentType::Shirt,
        GarmentType::Trousers,
        GarmentType::Dress,
        GarmentType::Skirt,
        GarmentType::Blouse,
        GarmentType::Jacket,
        GarmentType::Kaftan,
    ];

    /// Case-insensitive on the known keys; any other text becomes `Other`
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "suit" => GarmentType::Suit,
            "shirt" => GarmentType::Shirt,
            "trousers" => GarmentType::Trousers,
            "dress" => GarmentType::Dress,
            "skirt" => GarmentType::Skirt,
            "blouse" => GarmentType::Blouse,
            "jacket" => GarmentType::Jacket,
            "kaftan" => GarmentType::Kaftan,
            _ => GarmentType::Other(trimmed.to_string()),
        }
    }

    /// Key used on the wire and in the template table
    pub fn key(&self) -> &str {
        match self {
            GarmentType::Suit => "suit",
            GarmentType::Shirt => "shirt",
            GarmentType::Trousers => "trousers",
            GarmentType::Dress => "dress",
            GarmentType::Skirt => "skirt",
            GarmentType::Blouse => "blouse",
            GarmentType::Jacket => "jacket",
            GarmentType::Kaftan => "kaftan",
            GarmentType::Other(text) => text,
        }
    }

    pub fn label(&self) -> String {
        match self {
            GarmentType::Other(text) if text.is_empty() => "Other".to_string(),
            GarmentType::Other(text) => text.clone(),
            known => {
                let key = known.key();
                let mut chars = key.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }

    pub fn is_other(&self) -> bool {
        matches!(self, GarmentType::Other(_))
    }

    /// Ordered template fields; empty for free-text garments
    pub fn template(&self) -> &'static [&'static str] {
        GARMENT_TEMPLATES
            .iter()
            .find(|(key, _)| *key == self.key())
            .map(|(_, fields)| *fields)
            .unwrap_or(&[])
    }

    /// Canonical template name matching `name`, ignoring case and padding
    pub fn template_field(&self, name: &str) -> Option<&'static str> {
        let wanted = name.trim();
        self.template()
            .iter()
            .copied()
            .find(|field| field.eq_ignore_ascii_case(wanted))
    }
}

impl From<String> for GarmentType {
    fn from(value: String) -> Self {
        GarmentType::parse(&value)
    }
}

impl From<GarmentType> for String {
    fn from(value: GarmentType) -> Self {
        match value {
            GarmentType::Other(text) => text,
            known => known.key().to_string(),
        }
    }
}

impl std::fmt::Display for GarmentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}
