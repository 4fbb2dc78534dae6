use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use kennel_core::{KennelService, ServiceCapabilities};
use serde_json::{json, Value};
use uuid::Uuid;

use crate::services::KennelParams;

use super::dogs_schema::{CreateDog, PatchDog, ERROR_MESSAGE};
use super::dogs_shared;
use super::DogStore;

/// JSON face of the [`DogStore`]: decodes request bodies and ids, logs,
/// and encodes records.
pub struct DogsService {
    pub store: Arc<DogStore>,
}

impl DogsService {
    pub fn new(store: Arc<DogStore>) -> Self {
        Self { store }
    }
}

fn parse_id(id: &str) -> Result<Uuid> {
    Uuid::parse_str(id.trim()).map_err(|_| {
        tracing::warn!(id, "rejected malformed dog id");
        kennel_schema::unprocessable(ERROR_MESSAGE, json!({"id": ["id must be a valid UUID"]}))
    })
}

fn to_value<T: serde::Serialize>(v: T) -> Result<Value> {
    Ok(serde_json::to_value(v)?)
}

#[async_trait]
impl KennelService<Value, KennelParams> for DogsService {
    fn capabilities(&self) -> ServiceCapabilities {
        dogs_shared::crud_capabilities()
    }

    async fn create(&self, data: Value, params: KennelParams) -> Result<Value> {
        let input = kennel_schema::parse::<CreateDog>(&data, ERROR_MESSAGE).inspect_err(|e| {
            tracing::warn!(request_id = ?params.request_id, error = %e, "rejected dog create input");
        })?;

        let dog = self.store.create(input).await?;
        tracing::info!(request_id = ?params.request_id, id = %dog.id, name = %dog.name, "created dog");
        to_value(dog)
    }

    async fn find(&self, params: KennelParams) -> Result<Vec<Value>> {
        let dogs = self.store.list().await;
        tracing::debug!(request_id = ?params.request_id, count = dogs.len(), "listing dogs");
        dogs.into_iter().map(to_value).collect()
    }

    async fn get(&self, id: &str, params: KennelParams) -> Result<Value> {
        let id = parse_id(id)?;
        let dog = self.store.get(id).await.inspect_err(|_| {
            tracing::warn!(request_id = ?params.request_id, path = %params.path, "dog not found");
        })?;
        tracing::debug!(request_id = ?params.request_id, %id, "fetched dog");
        to_value(dog)
    }

    async fn update(&self, id: &str, data: Value, params: KennelParams) -> Result<Value> {
        let id = parse_id(id)?;
        let patch = kennel_schema::parse::<PatchDog>(&data, ERROR_MESSAGE)?;
        tracing::debug!(request_id = ?params.request_id, %id, fields = %data, "fields to update");

        let dog = self.store.update(id, patch).await.inspect_err(|e| {
            tracing::warn!(request_id = ?params.request_id, path = %params.path, error = %e, "dog update rejected");
        })?;
        tracing::info!(request_id = ?params.request_id, %id, "updated dog");
        to_value(dog)
    }

    async fn remove(&self, id: &str, params: KennelParams) -> Result<Value> {
        let id = parse_id(id)?;
        let id = self.store.delete(id).await;
        tracing::info!(request_id = ?params.request_id, %id, "deleted dog");
        to_value(id)
    }
}
