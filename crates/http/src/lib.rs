//! Herald HTTP layer
//!
//! Every authenticated call to the community API goes through [`Gateway`],
//! which attaches the persisted credential and reacts to credential rejection.
//! The typed clients in [`client`] sit on top of it.

pub mod client;
pub mod error;
pub mod gateway;
pub mod types;

pub use client::{AdminClient, ClientBuilder, PublicClient, error::ClientError};
pub use error::GatewayError;
pub use gateway::{Gateway, RequestOptions};
