pub mod dogs_schema;
pub mod dogs_service;
pub mod dogs_shared;
pub mod dogs_store;

pub use dogs_schema::{CreateDog, Dog, DogBreed, DogSex, PatchDog};
pub use dogs_service::DogsService;
pub use dogs_store::DogStore;
