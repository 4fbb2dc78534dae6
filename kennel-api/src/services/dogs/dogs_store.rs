use std::collections::HashMap;

use anyhow::Result;
use chrono::Utc;
use kennel_core::errors::KennelError;
use kennel_schema::Normalize;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::dogs_schema::{CreateDog, Dog, DogBreed, DogSex, PatchDog, ERROR_MESSAGE};

/// In-memory kennel: every dog keyed by id.
///
/// Each operation holds the lock for its whole duration, so a reader never
/// sees half of a write and two writes never interleave.
#[derive(Debug, Default)]
pub struct DogStore {
    dogs: RwLock<HashMap<Uuid, Dog>>,
}

fn not_found(id: Uuid) -> anyhow::Error {
    KennelError::not_found(format!("The dog with id={id} is not found")).into_anyhow()
}

impl DogStore {
    #[cfg(test)]
    fn new() -> Self {
        Self::default()
    }

    /// A store holding the three sample dogs.
    pub fn seeded() -> Self {
        let now = Utc::now();
        let dogs = seed_dogs()
            .into_iter()
            .map(|input| Dog::from_input(Uuid::new_v4(), now, input))
            .map(|dog| (dog.id, dog))
            .collect();

        Self {
            dogs: RwLock::new(dogs),
        }
    }

    pub async fn create(&self, input: CreateDog) -> Result<Dog> {
        let input = kennel_schema::ensure_valid(input, ERROR_MESSAGE)?;

        let mut dogs = self.dogs.write().await;
        let id = loop {
            let id = Uuid::new_v4();
            if !dogs.contains_key(&id) {
                break id;
            }
        };

        let dog = Dog::from_input(id, Utc::now(), input);
        dogs.insert(id, dog.clone());
        Ok(dog)
    }

    pub async fn list(&self) -> Vec<Dog> {
        self.dogs.read().await.values().cloned().collect()
    }

    pub async fn get(&self, id: Uuid) -> Result<Dog> {
        self.dogs.read().await.get(&id).cloned().ok_or_else(|| not_found(id))
    }

    /// Merge `patch` onto the stored dog. Nothing is written unless the
    /// merged record passes validation.
    pub async fn update(&self, id: Uuid, mut patch: PatchDog) -> Result<Dog> {
        patch.normalize();

        let mut dogs = self.dogs.write().await;
        let existing = dogs.get(&id).ok_or_else(|| not_found(id))?;

        let merged = existing.merged(patch);
        kennel_schema::check(&merged, ERROR_MESSAGE)?;

        dogs.insert(id, merged.clone());
        Ok(merged)
    }

    /// Remove the dog if present. Removing an unknown id is not an error.
    pub async fn delete(&self, id: Uuid) -> Uuid {
        self.dogs.write().await.remove(&id);
        id
    }

    #[cfg(test)]
    async fn len(&self) -> usize {
        self.dogs.read().await.len()
    }
}

fn seed_dogs() -> Vec<CreateDog> {
    vec![
        CreateDog {
            name: "Fido".to_string(),
            breed: DogBreed::GermanShepherd,
            color: "Black and Brown".to_string(),
            age: 3,
            sex: DogSex::Male,
            description: None,
        },
        CreateDog {
            name: "Spot".to_string(),
            breed: DogBreed::Bulldog,
            color: "Grey".to_string(),
            age: 7,
            sex: DogSex::Neutered,
            description: Some("Spot is an energetic dog for his age and loves long walks.".to_string()),
        },
        CreateDog {
            name: "Lana".to_string(),
            breed: DogBreed::Poodle,
            color: "White".to_string(),
            age: 2,
            sex: DogSex::Spayed,
            description: Some(
                "It is recommended that Lana does not live in a home with other dogs.".to_string(),
            ),
        },
    ]
}
