//! Flat persistence record and the storage collaborator interface.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::color::Rgb;
use crate::error::{BackendError, ClampNote};
use crate::params::{ClothingSelection, CustomizationParams, Gender, HairType};
use crate::proportions::derive_proportions;
use crate::validation::clamp_params;

/// One saved avatar configuration.
///
/// Field names are camelCase so the record round-trips through account
/// stores that expect `skinColor` / `hairType`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvatarRecord {
    /// Owning account id, filled in by the store.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    #[serde(default)]
    pub gender: Gender,
    pub height: f64,
    pub weight: f64,
    pub skin_color: Rgb,
    #[serde(default)]
    pub hair_type: HairType,
    /// Informational; recomputed from height and weight on import.
    #[serde(default)]
    pub bmi: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clothing: Option<ClothingSelection>,
}

impl AvatarRecord {
    /// Builds a record from params, computing the BMI.
    pub fn from_params(params: &CustomizationParams) -> Self {
        let bmi = derive_proportions(params).bmi;
        Self {
            user: None,
            gender: params.gender,
            height: params.height_cm,
            weight: params.weight_kg,
            skin_color: params.skin_color,
            hair_type: params.hair_type,
            bmi: (bmi * 10.0).round() / 10.0,
            clothing: if params.clothing.is_empty() {
                None
            } else {
                Some(params.clothing.clone())
            },
        }
    }

    /// Converts the record back into params, clamping every field.
    ///
    /// The stored `bmi` is ignored. Returns the clamp notes for any field
    /// that had to be adjusted.
    pub fn into_params(self) -> (CustomizationParams, Vec<ClampNote>) {
        let raw = CustomizationParams {
            height_cm: self.height,
            weight_kg: self.weight,
            gender: self.gender,
            skin_color: self.skin_color,
            hair_type: self.hair_type,
            clothing: self.clothing.unwrap_or_default(),
        };
        let outcome = clamp_params(&raw);
        (outcome.params, outcome.notes)
    }
}

/// Errors raised by an [`AvatarStore`].
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// The store requires an authenticated account.
    #[error("not signed in: {0}")]
    NotAuthenticated(String),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored data could not be decoded.
    #[error("malformed record: {0}")]
    Malformed(#[from] serde_json::Error),

    /// Any other store-specific failure.
    #[error("store error: {0}")]
    Store(String),
}

impl BackendError for PersistenceError {
    fn code(&self) -> &'static str {
        match self {
            PersistenceError::NotAuthenticated(_) => "STORE_001",
            PersistenceError::Io(_) => "STORE_002",
            PersistenceError::Malformed(_) => "STORE_003",
            PersistenceError::Store(_) => "STORE_004",
        }
    }

    fn category(&self) -> &'static str {
        "persistence"
    }
}

/// Result type for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;

/// Storage collaborator for one account's avatar.
///
/// Implementations hold at most one record; `save` replaces it. A failed
/// call never affects the caller's in-memory parameters.
pub trait AvatarStore {
    /// Creates or replaces the stored record.
    fn save(&mut self, record: &AvatarRecord) -> PersistenceResult<()>;

    /// Loads the stored record; `Ok(None)` when nothing has been saved.
    fn load(&self) -> PersistenceResult<Option<AvatarRecord>>;

    /// Deletes the stored record. Deleting a missing record is not an error.
    fn delete(&mut self) -> PersistenceResult<()>;
}

/// In-memory store, useful as a default and in tests.
#[derive(Debug, Default, Clone)]
pub struct MemoryAvatarStore {
    record: Option<AvatarRecord>,
}

impl AvatarStore for MemoryAvatarStore {
    fn save(&mut self, record: &AvatarRecord) -> PersistenceResult<()> {
        self.record = Some(record.clone());
        Ok(())
    }

    fn load(&self) -> PersistenceResult<Option<AvatarRecord>> {
        Ok(self.record.clone())
    }

    fn delete(&mut self) -> PersistenceResult<()> {
        self.record = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ClampCode;
    use crate::params::ClothingCategory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_record_json_shape() {
        let params = CustomizationParams::default().with_hair(HairType::Long);
        let record = AvatarRecord::from_params(&params);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["skinColor"], "#FDBCB4");
        assert_eq!(json["hairType"], "long");
        assert_eq!(json["gender"], "male");
        assert_eq!(json["bmi"], 24.2);
        assert!(json.get("clothing").is_none());
        assert!(json.get("user").is_none());
    }

    #[test]
    fn test_missing_gender_defaults_to_male() {
        let json = r##"{"height":180,"weight":80,"skinColor":"#8B4513","hairType":"bald","bmi":24.7}"##;
        let record: AvatarRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.gender, Gender::Male);
        let (params, notes) = record.into_params();
        assert!(notes.is_empty());
        assert_eq!(params.hair_type, HairType::Bald);
    }

    #[test]
    fn test_import_clamps() {
        let mut record = AvatarRecord::from_params(&CustomizationParams::default());
        record.height = 230.0;
        let (params, notes) = record.into_params();
        assert_eq!(params.height_cm, 200.0);
        assert_eq!(notes[0].code, ClampCode::HeightOutOfRange);
    }

    #[test]
    fn test_round_trip_with_clothing() {
        let params = CustomizationParams::default()
            .with_clothing(ClothingCategory::Shoes, "boots")
            .with_gender(Gender::Female);
        let (back, notes) = AvatarRecord::from_params(&params).into_params();
        assert!(notes.is_empty());
        assert_eq!(back, params);
    }

    #[test]
    fn test_memory_store() {
        let mut store = MemoryAvatarStore::default();
        assert!(store.load().unwrap().is_none());
        let record = AvatarRecord::from_params(&CustomizationParams::default());
        store.save(&record).unwrap();
        assert_eq!(store.load().unwrap(), Some(record));
        store.delete().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_persistence_error_codes() {
        let err = PersistenceError::NotAuthenticated("login required".into());
        assert_eq!(err.code(), "STORE_001");
        assert_eq!(err.category(), "persistence");
    }
}
