//! Public models for the pet store.
//!
//! `Pet` is the record as stored; `PetCreate`, `PetUpdate` and `PetFilter`
//! are the payload shapes the HTTP layer deserializes into. The update model
//! carries every field as an `Option` and applies only the present ones over
//! the existing row (a field-mask merge, no implicit null-overwrite).

use sea_orm::ActiveValue;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::entity;
use crate::validation::{Validatable, ValidationErrors, validators};

/// Maximum length of the free-text notes column.
const NOTES_MAX_LEN: usize = 255;

/// A pet record, uniquely identified by its microchip number.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Pet {
    pub chip_number: i32,
    pub name: String,
    pub species: String,
    pub age: i32,
    pub sex: Option<String>,
    pub notes: Option<String>,
}

impl From<entity::Model> for Pet {
    fn from(model: entity::Model) -> Self {
        Self {
            chip_number: model.chip_number,
            name: model.name,
            species: model.species,
            age: model.age,
            sex: model.sex,
            notes: model.notes,
        }
    }
}

/// Creation payload. The chip number is caller-supplied; nothing is
/// server-generated. A missing `age` defaults to 0.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PetCreate {
    pub chip_number: i32,
    pub name: String,
    pub species: String,
    #[serde(default)]
    pub age: i32,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl From<PetCreate> for entity::ActiveModel {
    fn from(data: PetCreate) -> Self {
        Self {
            chip_number: ActiveValue::Set(data.chip_number),
            name: ActiveValue::Set(data.name),
            species: ActiveValue::Set(data.species),
            age: ActiveValue::Set(data.age),
            sex: ActiveValue::Set(data.sex),
            notes: ActiveValue::Set(data.notes),
        }
    }
}

impl Validatable for PetCreate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Err(e) = validators::validate_length("name", &self.name, Some(2), Some(50)) {
            errors.add(e);
        }
        if let Err(e) = validators::validate_required("species", &self.species) {
            errors.add(e);
        }
        if let Some(notes) = &self.notes {
            if let Err(e) = validators::validate_length("notes", notes, None, Some(NOTES_MAX_LEN)) {
                errors.add(e);
            }
        }
        errors.result()
    }
}

/// Partial-update payload: only present fields overwrite the stored record.
/// The chip number itself is not updatable.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PetUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub age: Option<i32>,
    #[serde(default)]
    pub sex: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl PetUpdate {
    /// Merge the present fields over an existing row, leaving the rest
    /// untouched. Unset fields stay `ActiveValue::Unchanged` so the UPDATE
    /// statement only names the merged columns.
    #[must_use]
    pub fn merge_into(self, mut existing: entity::ActiveModel) -> entity::ActiveModel {
        if let Some(name) = self.name {
            existing.name = ActiveValue::Set(name);
        }
        if let Some(species) = self.species {
            existing.species = ActiveValue::Set(species);
        }
        if let Some(age) = self.age {
            existing.age = ActiveValue::Set(age);
        }
        if let Some(sex) = self.sex {
            existing.sex = ActiveValue::Set(Some(sex));
        }
        if let Some(notes) = self.notes {
            existing.notes = ActiveValue::Set(Some(notes));
        }
        existing
    }
}

impl Validatable for PetUpdate {
    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        if let Some(name) = &self.name {
            if let Err(e) = validators::validate_length("name", name, Some(2), Some(50)) {
                errors.add(e);
            }
        }
        if let Some(species) = &self.species {
            if let Err(e) = validators::validate_required("species", species) {
                errors.add(e);
            }
        }
        if let Some(notes) = &self.notes {
            if let Err(e) = validators::validate_length("notes", notes, None, Some(NOTES_MAX_LEN)) {
                errors.add(e);
            }
        }
        errors.result()
    }
}

/// Search filter: each present field adds one AND-ed exact-match predicate;
/// absent fields impose no constraint. Offset and limit are handed straight
/// to the query.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct PetFilter {
    /// Exact-match filter on the pet's name.
    pub name: Option<String>,
    /// Exact-match filter on the species.
    pub species: Option<String>,
    /// Exact-match filter on the sex.
    pub sex: Option<String>,
    /// Number of rows to skip. Absent means none.
    pub offset: Option<u64>,
    /// Maximum number of rows to return. Absent means no cap.
    pub limit: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_max() -> PetCreate {
        PetCreate {
            chip_number: 1001,
            name: "Max".to_string(),
            species: "Dog".to_string(),
            age: 5,
            sex: Some("Male".to_string()),
            notes: None,
        }
    }

    #[test]
    fn test_create_validates_ok() {
        assert!(create_max().validate().is_ok());
    }

    #[test]
    fn test_create_rejects_short_name() {
        let mut data = create_max();
        data.name = "M".to_string();
        let errors = data.validate().unwrap_err();
        assert_eq!(errors.errors()[0].field, "name");
    }

    #[test]
    fn test_create_rejects_blank_species() {
        let mut data = create_max();
        data.species = "  ".to_string();
        assert!(data.validate().is_err());
    }

    #[test]
    fn test_create_rejects_long_notes() {
        let mut data = create_max();
        data.notes = Some("x".repeat(256));
        assert!(data.validate().is_err());
        data.notes = Some("x".repeat(255));
        assert!(data.validate().is_ok());
    }

    #[test]
    fn test_create_age_defaults_to_zero() {
        let data: PetCreate =
            serde_json::from_str(r#"{"chip_number":7,"name":"Rex","species":"Dog"}"#).unwrap();
        assert_eq!(data.age, 0);
        assert_eq!(data.sex, None);
    }

    #[test]
    fn test_update_empty_payload_is_valid() {
        assert!(PetUpdate::default().validate().is_ok());
    }

    #[test]
    fn test_update_rejects_present_invalid_fields() {
        let update = PetUpdate {
            name: Some("X".to_string()),
            ..Default::default()
        };
        assert!(update.validate().is_err());
    }

    #[test]
    fn test_merge_only_touches_present_fields() {
        use sea_orm::IntoActiveModel;

        let existing = entity::Model {
            chip_number: 1001,
            name: "Max".to_string(),
            species: "Dog".to_string(),
            age: 5,
            sex: Some("Male".to_string()),
            notes: None,
        }
        .into_active_model();

        let update = PetUpdate {
            name: Some("Maximus".to_string()),
            age: Some(6),
            ..Default::default()
        };
        let merged = update.merge_into(existing);

        assert_eq!(merged.name, ActiveValue::Set("Maximus".to_string()));
        assert_eq!(merged.age, ActiveValue::Set(6));
        // Untouched fields must stay out of the UPDATE statement.
        assert!(matches!(merged.species, ActiveValue::Unchanged(_)));
        assert!(matches!(merged.sex, ActiveValue::Unchanged(_)));
    }

    #[test]
    fn test_filter_deserializes_partial_query() {
        let filter: PetFilter = serde_json::from_str(r#"{"species":"Dog"}"#).unwrap();
        assert_eq!(filter.species.as_deref(), Some("Dog"));
        assert_eq!(filter.name, None);
        assert_eq!(filter.limit, None);
    }
}
