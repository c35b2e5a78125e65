//! Service contains the rental property editing logic.
//!
//! List of available Cargo features:
#![doc = document_features::document_features!()]
#![deny(
    nonstandard_style,
    rust_2018_idioms,
    rustdoc::all,
    trivial_casts,
    trivial_numeric_casts,
    unsafe_code
)]
#![forbid(non_ascii_idents)]
#![warn(
    clippy::allow_attributes,
    clippy::allow_attributes_without_reason,
    clippy::pedantic,
    clippy::wildcard_enum_match_arm,
    deprecated_in_future,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    unused_crate_dependencies,
    unused_import_braces,
    unused_labels,
    unused_lifetimes,
    unused_qualifications,
    unused_results
)]

pub mod command;
pub mod domain;
pub mod editor;
pub mod gallery;
pub mod infra;
pub mod optimistic;
pub mod special_pricing;

use smart_default::SmartDefault;

#[cfg(doc)]
use infra::{Database, Storage};

use self::{domain::property::Policies, infra::storage::Compression};

pub use self::{
    command::Command, editor::Editor, gallery::Gallery,
    special_pricing::SpecialPricing,
};

/// [`Service`] configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// [`Policies`] filling the unset ones on submit.
    #[default(Policies::boilerplate())]
    pub policies: Policies,

    /// Image uploads configuration.
    pub upload: UploadConfig,
}

/// Image uploads configuration.
#[derive(Clone, Debug, SmartDefault)]
pub struct UploadConfig {
    /// [`Storage`] folder to upload images into.
    #[default("properties".into())]
    pub folder: String,

    /// [`Compression`] applied to images before their transfer.
    #[default(Compression::Balanced)]
    pub compression: Compression,
}

/// Domain service.
#[derive(Clone, Debug)]
pub struct Service<Db, St> {
    /// Configuration of this [`Service`].
    config: Config,

    /// [`Database`] of this [`Service`].
    database: Db,

    /// [`Storage`] of this [`Service`].
    storage: St,
}

impl<Db, St> Service<Db, St> {
    /// Creates a new [`Service`] with the provided parameters.
    #[must_use]
    pub fn new(config: Config, database: Db, storage: St) -> Self {
        Self {
            config,
            database,
            storage,
        }
    }

    /// Returns [`Config`] of this [`Service`].
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns [`Database`] of this [`Service`].
    #[must_use]
    pub fn database(&self) -> &Db {
        &self.database
    }

    /// Returns [`Storage`] of this [`Service`].
    #[must_use]
    pub fn storage(&self) -> &St {
        &self.storage
    }
}

#[cfg(all(test, feature = "memory"))]
pub(crate) mod spec {
    use crate::{infra, Config, Service};

    /// [`Service`] backed by in-memory collaborators.
    pub(crate) type Memory =
        Service<infra::database::Memory, infra::storage::Memory>;

    /// Creates a new [`Service`] backed by in-memory collaborators, returning
    /// them too for inspection.
    pub(crate) fn service(
    ) -> (Memory, infra::database::Memory, infra::storage::Memory) {
        let database = infra::database::Memory::new();
        let storage = infra::storage::Memory::new("https://storage.test");
        let service = Service::new(
            Config::default(),
            database.clone(),
            storage.clone(),
        );
        (service, database, storage)
    }
}
