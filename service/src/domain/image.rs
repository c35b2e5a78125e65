//! Gallery [`Image`] definitions.

use common::Progress;
use derive_more::{Display, From, FromStr, Into};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Image shown in a [`Gallery`].
///
/// [`Gallery`]: crate::gallery::Gallery
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Locally generated ID of this [`Image`].
    pub id: Id,

    /// URL of this [`Image`], empty while it's uploading.
    pub url: String,

    /// Indicator whether this [`Image`] is the hero one.
    pub is_hero: bool,

    /// [`Progress`] of this [`Image`] upload, if it's still uploading.
    #[serde(rename = "uploadProgress", skip_serializing_if = "Option::is_none")]
    pub upload: Option<Progress>,
}

impl Image {
    /// Creates a new already stored [`Image`] located at the provided `url`.
    #[must_use]
    pub fn stored(url: impl Into<String>) -> Self {
        Self {
            id: Id::new(),
            url: url.into(),
            is_hero: false,
            upload: None,
        }
    }

    /// Creates a new placeholder [`Image`] of a just started upload.
    #[must_use]
    pub fn uploading() -> Self {
        Self {
            id: Id::new(),
            url: String::new(),
            is_hero: false,
            upload: Some(Progress::NONE),
        }
    }

    /// Indicates whether this [`Image`] is still uploading.
    #[must_use]
    pub fn is_uploading(&self) -> bool {
        self.upload.is_some()
    }
}

/// ID of an [`Image`].
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    Eq,
    From,
    FromStr,
    Hash,
    Into,
    PartialEq,
    Serialize,
)]
pub struct Id(Uuid);

impl Id {
    /// Creates a new random [`Id`].
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}
