//! Application provides a command line interface to the [`Editor`].
//!
//! [`Editor`]: service::Editor

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

pub mod args;
pub mod config;
pub mod document;
pub mod error;
pub mod report;

use serde_json::Value;
// Used in binary.
use tokio as _;
use tracing_subscriber as _;

pub use self::{
    args::{Args, Command},
    config::Config,
    document::Document,
    error::Error,
};

/// Runs the provided [`Command`] with the provided [`Config`].
///
/// # Errors
///
/// If the property document cannot be loaded, or the [`Command`] fails over
/// it.
pub async fn run(command: Command, config: Config) -> Result<Value, Error> {
    let Config {
        service, storage, ..
    } = config;
    let document = Document::load(command.path())?;

    Ok(match command {
        Command::Validate { .. } => report::validate(document),
        Command::Normalize { .. } => {
            report::normalize(document, &service.into())?
        }
        Command::Submit { .. } => {
            report::submit(document, service.into(), &storage.base_url).await?
        }
        Command::Quote { date, .. } => report::quote(document, date),
    })
}
