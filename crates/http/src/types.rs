//! Records exchanged with the community API

use chrono::{NaiveDate, SecondsFormat};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// `POST /auth` body
#[derive(Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `POST /auth` response
#[derive(Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// Scheduled raid event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Raid {
    #[serde(rename = "_id")]
    pub id: String,
    /// ISO-8601 instant
    pub date: String,
    pub platform: String,
    pub url: String,
    pub share_message: String,
    pub content: String,
}

/// Raid body for create and update requests
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewRaid {
    #[validate(length(min = 1))]
    pub date: String,
    #[validate(length(min = 1))]
    pub platform: String,
    #[validate(length(min = 1))]
    pub url: String,
    #[validate(length(min = 1))]
    pub share_message: String,
    #[validate(length(min = 1))]
    pub content: String,
}

impl Raid {
    /// Reassemble a stored raid from its id and an edited body
    pub fn from_parts(id: String, body: NewRaid) -> Self {
        Self {
            id,
            date: body.date,
            platform: body.platform,
            url: body.url,
            share_message: body.share_message,
            content: body.content,
        }
    }

    /// Split into the id and the body sent on update
    pub fn into_parts(self) -> (String, NewRaid) {
        (
            self.id,
            NewRaid {
                date: self.date,
                platform: self.platform,
                url: self.url,
                share_message: self.share_message,
                content: self.content,
            },
        )
    }
}

/// Convert an operator-entered `dd/mm/yyyy` date to midnight UTC in ISO-8601
pub fn raid_date_from_input(input: &str) -> Option<String> {
    let date = NaiveDate::parse_from_str(input.trim(), "%d/%m/%Y").ok()?;
    let midnight = date.and_hms_opt(0, 0, 0)?.and_utc();
    Some(midnight.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LinkKind {
    #[serde(rename = "community-links")]
    Community,
    #[serde(rename = "official-links")]
    Official,
}

impl LinkKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Community => "community-links",
            Self::Official => "official-links",
        }
    }
}

/// Curated link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Link {
    #[serde(rename = "_id")]
    #[validate(length(min = 1))]
    pub id: String,
    #[validate(length(min = 1))]
    pub label: String,
    #[validate(length(min = 1))]
    pub url: String,
    #[validate(length(min = 1))]
    pub icon: String,
    #[serde(rename = "type")]
    pub kind: LinkKind,
}

/// Link body for create and update requests
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct NewLink {
    #[validate(length(min = 1))]
    pub label: String,
    #[validate(length(min = 1))]
    pub url: String,
    #[validate(length(min = 1))]
    pub icon: String,
    #[serde(rename = "type")]
    pub kind: LinkKind,
}

impl Link {
    pub fn from_parts(id: String, body: NewLink) -> Self {
        Self {
            id,
            label: body.label,
            url: body.url,
            icon: body.icon,
            kind: body.kind,
        }
    }

    pub fn into_parts(self) -> (String, NewLink) {
        (
            self.id,
            NewLink {
                label: self.label,
                url: self.url,
                icon: self.icon,
                kind: self.kind,
            },
        )
    }
}

/// Community-submitted art awaiting or past moderation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Art {
    #[serde(rename = "_id")]
    pub id: String,
    pub url: String,
    pub creator: String,
    pub x_profile: String,
    pub description: String,
    #[serde(default)]
    pub approved: bool,
}

/// One page of `GET /arts`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtsPage {
    pub arts: Vec<Art>,
    #[serde(default)]
    pub next_page: Option<u32>,
}

/// `PUT /arts/:id` body
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ArtApproval {
    pub approved: bool,
}
