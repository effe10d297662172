//! DTOs for the placeholder posts API JSON payloads.
//!
//! The adapter decodes into these transport DTOs first, then maps into domain
//! [`Post`] records in one pass.

use serde::{Deserialize, Serialize};

use crate::domain::posts::{Post, PostDraft};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct PostDto {
    pub(super) id: u64,
    pub(super) user_id: u64,
    #[serde(default)]
    pub(super) title: String,
    #[serde(default)]
    pub(super) body: String,
}

impl From<PostDto> for Post {
    fn from(value: PostDto) -> Self {
        let PostDto {
            id,
            user_id,
            title,
            body,
        } = value;
        Self {
            id,
            user_id,
            title,
            body,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct NewPostDto<'a> {
    pub(super) title: &'a str,
    pub(super) body: &'a str,
    pub(super) user_id: u64,
}

impl<'a> From<&'a PostDraft> for NewPostDto<'a> {
    fn from(value: &'a PostDraft) -> Self {
        Self {
            title: value.title(),
            body: value.body(),
            user_id: value.user_id(),
        }
    }
}
