//! Art moderation endpoints

use super::{AdminClient, error::ClientError};
use crate::gateway::RequestOptions;
use crate::types::{ArtApproval, ArtsPage};
use herald_core::{KeyValueStore, Navigator};

impl<S: KeyValueStore, N: Navigator> AdminClient<S, N> {
    /// Fetch one page of submitted art. Pages start at 1.
    pub async fn list_arts(&self, page: u32, per_page: u32) -> Result<ArtsPage, ClientError> {
        self.fetch(
            &format!("/arts?page={page}&limit={per_page}"),
            RequestOptions::get(),
        )
        .await
    }

    /// Approve a submission
    pub async fn approve_art(&self, id: &str) -> Result<(), ClientError> {
        let body = ArtApproval { approved: true };
        self.send(&format!("/arts/{id}"), RequestOptions::put().json(&body)?)
            .await
    }

    /// Delete a submission
    pub async fn delete_art(&self, id: &str) -> Result<(), ClientError> {
        self.send(&format!("/arts/{id}"), RequestOptions::delete())
            .await
    }
}
