//! Raid schedule endpoints

use super::{AdminClient, error::ClientError};
use crate::gateway::RequestOptions;
use crate::types::{NewRaid, Raid};
use herald_core::{KeyValueStore, Navigator};
use validator::Validate;

impl<S: KeyValueStore, N: Navigator> AdminClient<S, N> {
    /// List all raids
    pub async fn list_raids(&self) -> Result<Vec<Raid>, ClientError> {
        self.fetch("/raids", RequestOptions::get()).await
    }

    /// Schedule a new raid. Every field must be filled in.
    pub async fn create_raid(&self, raid: &NewRaid) -> Result<(), ClientError> {
        raid.validate()?;
        self.send("/raids", RequestOptions::post().json(raid)?).await
    }

    /// Replace a raid's fields; the id travels in the path only
    pub async fn update_raid(&self, raid: Raid) -> Result<(), ClientError> {
        let (id, body) = raid.into_parts();
        body.validate()?;
        self.send(&format!("/raids/{id}"), RequestOptions::put().json(&body)?)
            .await
    }

    /// Delete a raid
    pub async fn delete_raid(&self, id: &str) -> Result<(), ClientError> {
        self.send(&format!("/raids/{id}"), RequestOptions::delete())
            .await
    }
}
