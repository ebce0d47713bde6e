//! Curated link endpoints

use super::{AdminClient, error::ClientError};
use crate::gateway::RequestOptions;
use crate::types::{Link, NewLink};
use herald_core::{KeyValueStore, Navigator};
use validator::Validate;

impl<S: KeyValueStore, N: Navigator> AdminClient<S, N> {
    /// List all links
    pub async fn list_links(&self) -> Result<Vec<Link>, ClientError> {
        self.fetch("/links", RequestOptions::get()).await
    }

    /// Add a link
    pub async fn create_link(&self, link: &NewLink) -> Result<(), ClientError> {
        link.validate()?;
        self.send("/links", RequestOptions::post().json(link)?).await
    }

    /// Update a link after checking it against the link schema
    pub async fn update_link(&self, link: Link) -> Result<(), ClientError> {
        link.validate()?;
        let (id, body) = link.into_parts();
        self.send(&format!("/links/{id}"), RequestOptions::put().json(&body)?)
            .await
    }

    /// Delete a link
    pub async fn delete_link(&self, id: &str) -> Result<(), ClientError> {
        self.send(&format!("/links/{id}"), RequestOptions::delete())
            .await
    }
}
