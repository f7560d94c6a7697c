//! Customization parameters: the single source of truth for one avatar.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::color::{Rgb, SkinTone};
use crate::error::ParamsError;

/// Minimum height accepted at the UI boundary, in centimeters.
pub const MIN_HEIGHT_CM: f64 = 140.0;
/// Maximum height accepted at the UI boundary, in centimeters.
pub const MAX_HEIGHT_CM: f64 = 200.0;
/// Minimum weight accepted at the UI boundary, in kilograms.
pub const MIN_WEIGHT_KG: f64 = 40.0;
/// Maximum weight accepted at the UI boundary, in kilograms.
pub const MAX_WEIGHT_KG: f64 = 120.0;

/// Default height (also the reference height of the proportion engine).
pub const DEFAULT_HEIGHT_CM: f64 = 170.0;
/// Default weight.
pub const DEFAULT_WEIGHT_KG: f64 = 70.0;

/// Binary gender selector. Selects which external model (if any) is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(ParamsError::UnknownValue {
                field: "gender",
                value: s.to_string(),
            }),
        }
    }
}

/// Hair style variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HairType {
    #[default]
    Short,
    Medium,
    Long,
    Curly,
    Bald,
}

impl HairType {
    /// All hair types in UI order.
    pub const ALL: [HairType; 5] = [
        HairType::Short,
        HairType::Medium,
        HairType::Long,
        HairType::Curly,
        HairType::Bald,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HairType::Short => "short",
            HairType::Medium => "medium",
            HairType::Long => "long",
            HairType::Curly => "curly",
            HairType::Bald => "bald",
        }
    }

    /// Whether this style produces any hair geometry.
    pub fn has_hair(&self) -> bool {
        !matches!(self, HairType::Bald)
    }

    /// Hair color used by both generators.
    pub fn color(&self) -> Rgb {
        match self {
            HairType::Curly => CURLY_HAIR_COLOR,
            _ => HAIR_COLOR,
        }
    }
}

/// Hair color for every style except curly.
pub const HAIR_COLOR: Rgb = Rgb::from_hex(0x2C1810);
/// Curly hair color.
pub const CURLY_HAIR_COLOR: Rgb = Rgb::from_hex(0x4A3728);

impl fmt::Display for HairType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HairType {
    type Err = ParamsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        HairType::ALL
            .into_iter()
            .find(|h| h.as_str() == lower)
            .ok_or_else(|| ParamsError::UnknownValue {
                field: "hairType",
                value: s.to_string(),
            })
    }
}

/// Clothing categories offered by the customizer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClothingCategory {
    Shirts,
    Pants,
    Shorts,
    Shoes,
    Jackets,
}

/// Item id meaning "nothing selected" in a category.
pub const NO_CLOTHING: &str = "none";

impl ClothingCategory {
    /// All categories in UI order.
    pub const ALL: [ClothingCategory; 5] = [
        ClothingCategory::Shirts,
        ClothingCategory::Pants,
        ClothingCategory::Shorts,
        ClothingCategory::Shoes,
        ClothingCategory::Jackets,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ClothingCategory::Shirts => "shirts",
            ClothingCategory::Pants => "pants",
            ClothingCategory::Shorts => "shorts",
            ClothingCategory::Shoes => "shoes",
            ClothingCategory::Jackets => "jackets",
        }
    }

    /// Returns the selectable item ids for this category (excluding "none").
    pub fn catalog(&self) -> &'static [&'static str] {
        match self {
            ClothingCategory::Shirts => &["t_shirt", "polo", "button_down", "tank_top"],
            ClothingCategory::Pants => &["jeans", "chinos", "sweatpants"],
            ClothingCategory::Shorts => &["denim_shorts", "athletic_shorts"],
            ClothingCategory::Shoes => &["sneakers", "boots", "sandals"],
            ClothingCategory::Jackets => &["hoodie", "denim_jacket", "blazer"],
        }
    }

    /// Whether `item` is "none" or an entry of this category's catalog.
    pub fn accepts(&self, item: &str) -> bool {
        item == NO_CLOTHING || self.catalog().contains(&item)
    }
}

impl fmt::Display for ClothingCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Selected item per clothing category.
///
/// Categories without an entry read as [`NO_CLOTHING`], so every category
/// always has a value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClothingSelection {
    items: BTreeMap<ClothingCategory, String>,
}

impl ClothingSelection {
    /// Returns the selected item id for a category, or "none".
    pub fn get(&self, category: ClothingCategory) -> &str {
        self.items
            .get(&category)
            .map(String::as_str)
            .unwrap_or(NO_CLOTHING)
    }

    /// Selects an item. Selecting "none" removes the entry.
    pub fn set(&mut self, category: ClothingCategory, item: impl Into<String>) {
        let item = item.into();
        if item == NO_CLOTHING {
            self.items.remove(&category);
        } else {
            self.items.insert(category, item);
        }
    }

    /// Builder-style [`set`](Self::set).
    pub fn with(mut self, category: ClothingCategory, item: impl Into<String>) -> Self {
        self.set(category, item);
        self
    }

    /// Iterates over every category with its (possibly "none") selection.
    pub fn iter(&self) -> impl Iterator<Item = (ClothingCategory, &str)> + '_ {
        ClothingCategory::ALL
            .into_iter()
            .map(move |category| (category, self.get(category)))
    }

    /// Whether nothing is selected in any category.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// The complete user-controlled description of one avatar.
///
/// Immutable per generation cycle: a change produces a new value and
/// triggers exactly one rebuild.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CustomizationParams {
    /// Standing height in centimeters.
    pub height_cm: f64,
    /// Body weight in kilograms.
    pub weight_kg: f64,
    /// Gender; selects the external model path when one is configured.
    #[serde(default)]
    pub gender: Gender,
    /// Skin color applied to all skin-group parts.
    pub skin_color: Rgb,
    /// Hair style.
    #[serde(default)]
    pub hair_type: HairType,
    /// Clothing selection per category.
    #[serde(default, skip_serializing_if = "ClothingSelection::is_empty")]
    pub clothing: ClothingSelection,
}

impl Default for CustomizationParams {
    fn default() -> Self {
        Self {
            height_cm: DEFAULT_HEIGHT_CM,
            weight_kg: DEFAULT_WEIGHT_KG,
            gender: Gender::Male,
            skin_color: SkinTone::Light.color(),
            hair_type: HairType::Short,
            clothing: ClothingSelection::default(),
        }
    }
}

impl CustomizationParams {
    /// Parses params from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, ParamsError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes params to a pretty-printed JSON string.
    pub fn to_json_pretty(&self) -> Result<String, ParamsError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_height(mut self, height_cm: f64) -> Self {
        self.height_cm = height_cm;
        self
    }

    pub fn with_weight(mut self, weight_kg: f64) -> Self {
        self.weight_kg = weight_kg;
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.gender = gender;
        self
    }

    pub fn with_skin_color(mut self, skin_color: Rgb) -> Self {
        self.skin_color = skin_color;
        self
    }

    pub fn with_hair(mut self, hair_type: HairType) -> Self {
        self.hair_type = hair_type;
        self
    }

    pub fn with_clothing(mut self, category: ClothingCategory, item: impl Into<String>) -> Self {
        self.clothing.set(category, item);
        self
    }
}
