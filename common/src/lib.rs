//! Common definitions shared by the property editor crates.
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

pub mod date;
pub mod handler;
mod kind;
pub mod money;
pub mod operations;
mod progress;
pub mod unit;

pub use self::{
    date::{Date, DateTime, DateTimeOf},
    handler::Handler,
    money::{Currency, Money, Price},
    progress::Progress,
};

#[doc(hidden)]
pub mod private {
    //! Private definitions used by macros.

    pub use serde;
    pub use strum;
}
