//! Shape of a dog record, its input types and the partial-update merge.

use chrono::{DateTime, Utc};
use kennel_schema::{trim_in_place, trim_opt, Normalize, Patch};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

pub const ERROR_MESSAGE: &str = "Dogs schema validation failed";

pub const NAME_MAX: u64 = 255;
pub const COLOR_MAX: u64 = 20;
pub const AGE_MAX: i64 = 30;
pub const DESCRIPTION_MAX: u64 = 255;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DogBreed {
    #[serde(rename = "Labrador Retriever")]
    LabradorRetriever,
    Beagle,
    Bulldog,
    Poodle,
    #[serde(rename = "German Shepherd")]
    GermanShepherd,
}

/// Sex of the dog. The one-letter codes are accepted on input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DogSex {
    #[serde(alias = "m")]
    Male,
    #[serde(alias = "f")]
    Female,
    #[serde(alias = "s")]
    Spayed,
    #[serde(alias = "n")]
    Neutered,
    #[serde(alias = "u")]
    Unknown,
}

/// A stored dog. `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Dog {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,

    #[validate(length(min = 1, max = NAME_MAX, message = "name must be 1 to 255 characters"))]
    pub name: String,

    pub breed: DogBreed,

    #[validate(length(min = 1, max = COLOR_MAX, message = "color must be 1 to 20 characters"))]
    pub color: String,

    #[validate(range(min = 0, max = AGE_MAX, message = "age must be between 0 and 30"))]
    pub age: i64,

    pub sex: DogSex,

    #[validate(length(max = DESCRIPTION_MAX, message = "description must be at most 255 characters"))]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateDog {
    #[validate(length(min = 1, max = NAME_MAX, message = "name must be 1 to 255 characters"))]
    pub name: String,

    pub breed: DogBreed,

    #[validate(length(min = 1, max = COLOR_MAX, message = "color must be 1 to 20 characters"))]
    pub color: String,

    #[validate(range(min = 0, max = AGE_MAX, message = "age must be between 0 and 30"))]
    pub age: i64,

    pub sex: DogSex,

    #[serde(default)]
    #[validate(length(max = DESCRIPTION_MAX, message = "description must be at most 255 characters"))]
    pub description: Option<String>,
}

impl Normalize for CreateDog {
    fn normalize(&mut self) {
        trim_in_place(&mut self.name);
        trim_in_place(&mut self.color);
        trim_opt(&mut self.description);
    }
}

/// Partial update. Every field may be left out, `sex` included. Supplied
/// values are checked on the merged [`Dog`], not here.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields, default)]
pub struct PatchDog {
    pub name: Patch<String>,
    pub breed: Patch<DogBreed>,
    pub color: Patch<String>,
    pub age: Patch<i64>,
    pub sex: Patch<DogSex>,
    pub description: Patch<String>,
}

impl Normalize for PatchDog {
    fn normalize(&mut self) {
        if let Some(name) = self.name.as_set_mut() {
            trim_in_place(name);
        }
        if let Some(color) = self.color.as_set_mut() {
            trim_in_place(color);
        }
        if let Some(description) = self.description.as_set_mut() {
            trim_in_place(description);
        }
    }
}

impl Dog {
    /// Build a record from checked input.
    pub fn from_input(id: Uuid, created_at: DateTime<Utc>, input: CreateDog) -> Self {
        Self {
            id,
            created_at,
            name: input.name,
            breed: input.breed,
            color: input.color,
            age: input.age,
            sex: input.sex,
            description: input.description,
        }
    }

    /// Copy of `self` with every supplied patch field applied. `id` and
    /// `created_at` are untouched; a null patch field keeps the current value.
    pub fn merged(&self, patch: PatchDog) -> Dog {
        let mut dog = self.clone();
        patch.name.apply_to(&mut dog.name);
        patch.breed.apply_to(&mut dog.breed);
        patch.color.apply_to(&mut dog.color);
        patch.age.apply_to(&mut dog.age);
        patch.sex.apply_to(&mut dog.sex);
        if let Patch::Set(description) = patch.description {
            dog.description = Some(description);
        }
        dog
    }
}

#[cfg(test)]
mod tests {
    use kennel_core::errors::{ErrorKind, KennelError};
    use serde_json::{json, Value};

    use super::*;

    fn fido() -> Dog {
        Dog::from_input(
            Uuid::new_v4(),
            Utc::now(),
            CreateDog {
                name: "Fido".to_string(),
                breed: DogBreed::GermanShepherd,
                color: "Black and Brown".to_string(),
                age: 3,
                sex: DogSex::Male,
                description: None,
            },
        )
    }

    fn patch_of(data: Value) -> PatchDog {
        let mut patch = kennel_schema::parse::<PatchDog>(&data, ERROR_MESSAGE).unwrap();
        patch.normalize();
        patch
    }

    fn errors_of(err: &anyhow::Error) -> Value {
        let kennel = KennelError::from_anyhow(err).expect("must be KennelError");
        assert_eq!(kennel.kind, ErrorKind::Unprocessable);
        kennel.errors.clone().unwrap()
    }

    #[test]
    fn enums_use_display_strings_on_the_wire() {
        assert_eq!(serde_json::to_value(DogBreed::GermanShepherd).unwrap(), json!("German Shepherd"));
        assert_eq!(serde_json::to_value(DogSex::Neutered).unwrap(), json!("neutered"));

        let sex: DogSex = serde_json::from_value(json!("s")).unwrap();
        assert_eq!(sex, DogSex::Spayed);
        assert!(serde_json::from_value::<DogBreed>(json!("Chihuahua")).is_err());
    }

    #[test]
    fn create_input_is_trimmed_before_checks() {
        let input = kennel_schema::validate::<CreateDog>(
            &json!({"name": "  Rex ", "breed": "Beagle", "color": " Tan ", "age": 0, "sex": "female", "description": " good boy "}),
            ERROR_MESSAGE,
        )
        .unwrap();
        assert_eq!(input.name, "Rex");
        assert_eq!(input.color, "Tan");
        assert_eq!(input.description.as_deref(), Some("good boy"));

        let err = kennel_schema::validate::<CreateDog>(
            &json!({"name": "Rex", "breed": "Beagle", "color": "   ", "age": 0, "sex": "female"}),
            ERROR_MESSAGE,
        )
        .unwrap_err();
        assert_eq!(errors_of(&err)["color"][0], "color must be 1 to 20 characters");
    }

    #[test]
    fn create_rejects_out_of_range_fields() {
        let base = json!({"name": "Rex", "breed": "Beagle", "color": "Tan", "age": 2, "sex": "male"});

        for (field, value) in [("age", json!(-1)), ("age", json!(31)), ("color", json!("x".repeat(21)))] {
            let mut data = base.clone();
            data[field] = value;
            let err = kennel_schema::validate::<CreateDog>(&data, ERROR_MESSAGE).unwrap_err();
            assert!(errors_of(&err).get(field).is_some(), "{field} should be rejected");
        }

        let mut data = base.clone();
        data["description"] = json!("d".repeat(256));
        let err = kennel_schema::validate::<CreateDog>(&data, ERROR_MESSAGE).unwrap_err();
        assert_eq!(errors_of(&err)["description"][0], "description must be at most 255 characters");
    }

    #[test]
    fn create_rejects_unknown_and_server_assigned_fields() {
        for extra in ["owner", "id", "created_at"] {
            let mut data = json!({"name": "Rex", "breed": "Beagle", "color": "Tan", "age": 2, "sex": "male"});
            data[extra] = json!("x");
            let err = kennel_schema::validate::<CreateDog>(&data, ERROR_MESSAGE).unwrap_err();
            let msg = errors_of(&err)["_schema"][0].as_str().unwrap().to_string();
            assert!(msg.contains(&format!("unknown field `{extra}`")), "{msg}");
        }
    }

    #[test]
    fn empty_patch_merges_to_same_record() {
        let dog = fido();
        assert_eq!(dog.merged(patch_of(json!({}))), dog);
    }

    #[test]
    fn patch_overwrites_only_supplied_fields() {
        let dog = fido();
        let merged = dog.merged(patch_of(json!({"age": 4, "description": "  loves naps ", "color": null})));
        assert_eq!(merged.age, 4);
        assert_eq!(merged.description.as_deref(), Some("loves naps"));
        assert_eq!(merged.color, dog.color);
        assert_eq!(merged.sex, dog.sex);
        assert_eq!(merged.id, dog.id);
        assert_eq!(merged.created_at, dog.created_at);
    }

    #[test]
    fn patch_without_sex_is_accepted() {
        let patch = patch_of(json!({"name": "Rover"}));
        assert_eq!(patch.sex, Patch::Missing);
        assert_eq!(fido().merged(patch).name, "Rover");
    }

    #[test]
    fn merge_applies_the_same_limits_and_rejects_id() {
        let merged = fido().merged(patch_of(json!({"age": 31, "name": " ", "color": "c".repeat(21)})));
        let err = kennel_schema::check(&merged, ERROR_MESSAGE).unwrap_err();
        let errors = errors_of(&err);
        assert_eq!(errors["age"][0], "age must be between 0 and 30");
        assert_eq!(errors["name"][0], "name must be 1 to 255 characters");
        assert_eq!(errors["color"][0], "color must be 1 to 20 characters");

        let err = kennel_schema::parse::<PatchDog>(&json!({"id": Uuid::new_v4()}), ERROR_MESSAGE).unwrap_err();
        assert!(errors_of(&err)["_schema"][0].as_str().unwrap().contains("unknown field `id`"));
    }

    #[test]
    fn create_and_record_share_limits() {
        let at_limit = json!({"name": "n".repeat(255), "breed": "Poodle", "color": "c".repeat(20), "age": 30, "sex": "u", "description": "d".repeat(255)});
        let input = kennel_schema::validate::<CreateDog>(&at_limit, ERROR_MESSAGE).unwrap();
        let dog = Dog::from_input(Uuid::new_v4(), Utc::now(), input);
        kennel_schema::check(&dog, ERROR_MESSAGE).unwrap();

        let mut too_long = at_limit.clone();
        too_long["name"] = json!("n".repeat(256));
        let err = kennel_schema::validate::<CreateDog>(&too_long, ERROR_MESSAGE).unwrap_err();
        assert_eq!(errors_of(&err)["name"][0], "name must be 1 to 255 characters");
    }

    #[test]
    fn merged_record_is_checked_as_a_whole() {
        let mut dog = fido();
        dog.color = String::new();
        let err = kennel_schema::check(&dog, ERROR_MESSAGE).unwrap_err();
        assert_eq!(errors_of(&err)["color"][0], "color must be 1 to 20 characters");
    }
}
