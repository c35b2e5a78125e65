//! [`Command`] definition.

pub mod add_special_price;
pub mod remove_image;
pub mod remove_special_price;
pub mod submit_draft;
pub mod upload_images;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    add_special_price::AddSpecialPrice, remove_image::RemoveImage,
    remove_special_price::RemoveSpecialPrice, submit_draft::SubmitDraft,
    upload_images::UploadImages,
};
