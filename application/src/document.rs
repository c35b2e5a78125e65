//! Property [`Document`] definitions.

use std::{fs, path::Path};

use serde::Deserialize;
use service::{
    domain::{
        property::{self, Listing},
        Property,
    },
    editor::Draft,
};

use crate::Error;

/// Property JSON document, as exported from the property store.
#[derive(Clone, Debug, Deserialize)]
pub struct Document {
    /// ID of the persisted property, if any.
    #[serde(default)]
    pub id: Option<property::Id>,

    /// Content of the property.
    #[serde(flatten)]
    pub listing: Listing,
}

impl Document {
    /// Reads a [`Document`] from the provided `path`.
    ///
    /// # Errors
    ///
    /// If the file cannot be read or is not a [`Document`].
    pub fn load(path: &Path) -> Result<Self, Error> {
        let json = fs::read_to_string(path).map_err(|source| Error::Read {
            path: path.to_owned(),
            source,
        })?;
        Ok(serde_json::from_str(&json)?)
    }

    /// Converts this [`Document`] into a [`Draft`] of the [`Editor`].
    ///
    /// [`Editor`]: service::Editor
    #[must_use]
    pub fn into_draft(self) -> Draft {
        let Self { id, listing } = self;
        let mut draft = Draft::from(Property {
            id: id.unwrap_or_default(),
            listing,
        });
        draft.id = id;
        draft
    }
}
