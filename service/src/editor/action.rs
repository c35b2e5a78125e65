//! [`Action`]s changing a [`Draft`], grouped by the [`Step`] they belong to.
//!
//! [`Draft`]: super::Draft
//! [`Step`]: super::Step

use common::Price;
use derive_more::From;

use crate::domain::{
    amenity, image,
    pricing::{self, Candidate},
    property::{Attraction, Kind, Policies, Transportation},
    review, UnifiedReview,
};

/// Change of a [`Draft`](super::Draft).
#[derive(Clone, Debug, From)]
pub enum Action {
    /// Change of the [`Basic`] information.
    Basic(Basic),

    /// Change of the [`Pricing`].
    Pricing(Pricing),

    /// Change of the [`Images`].
    Images(Images),

    /// Change of the [`Amenities`].
    Amenities(Amenities),

    /// Change of the [`Content`].
    Content(Content),

    /// Change of the [`Reviews`].
    Reviews(Reviews),
}

/// Change of the basic information.
#[derive(Clone, Debug)]
pub enum Basic {
    /// Sets the title, deriving the slug from it unless the slug was edited
    /// manually.
    Title(String),

    /// Sets the slug manually, detaching it from the title.
    ///
    /// An empty slug attaches it back.
    Slug(String),

    /// Sets the address.
    Address(String),

    /// Sets the [`Kind`].
    Kind(Kind),

    /// Sets the maximum number of guests, as typed.
    MaxGuests(i32),

    /// Sets the number of bedrooms, as typed.
    Bedrooms(i32),

    /// Sets the number of bathrooms, as typed.
    Bathrooms(i32),

    /// Sets the location from either a map URL or a pasted `<iframe>`
    /// snippet.
    LocationUrl(String),
}

/// Change of the pricing.
#[derive(Clone, Debug)]
pub enum Pricing {
    /// Sets the default nightly [`Price`].
    DefaultPrice(Price),

    /// Adds a special price, rejected if it overlaps an existing one.
    AddRule(Candidate),

    /// Removes a special price, if present.
    RemoveRule(pricing::Id),
}

/// Change of the images.
///
/// Uploads and removals go through the [`UploadImages`] and [`RemoveImage`]
/// [`Command`]s, as they involve a [`Storage`].
///
/// [`Command`]: crate::Command
/// [`RemoveImage`]: crate::command::RemoveImage
/// [`Storage`]: crate::infra::Storage
/// [`UploadImages`]: crate::command::UploadImages
#[derive(Clone, Debug)]
pub enum Images {
    /// Reorders the settled images.
    Reorder(Vec<image::Id>),

    /// Makes the image the hero one.
    SetHero(image::Id),
}

/// Change of the amenities and features.
#[derive(Clone, Debug)]
pub enum Amenities {
    /// Selects the amenity if it's not selected, or deselects it otherwise.
    Toggle(amenity::Id),

    /// Appends an empty feature to be filled.
    AddFeature,

    /// Sets the feature at the provided position.
    SetFeature(usize, String),

    /// Removes the feature at the provided position.
    RemoveFeature(usize),
}

/// Change of the descriptive content.
#[derive(Clone, Debug)]
pub enum Content {
    /// Sets the description.
    Description(String),

    /// Sets the description of the surroundings.
    LocationDescription(String),

    /// Appends an empty [`Attraction`] to be filled.
    AddAttraction,

    /// Sets the [`Attraction`] at the provided position.
    SetAttraction(usize, Attraction),

    /// Removes the [`Attraction`] at the provided position.
    RemoveAttraction(usize),

    /// Appends an empty [`Transportation`] to be filled.
    AddTransportation,

    /// Sets the [`Transportation`] at the provided position.
    SetTransportation(usize, Transportation),

    /// Removes the [`Transportation`] at the provided position.
    RemoveTransportation(usize),

    /// Appends an empty house rule to be filled.
    AddHouseRule,

    /// Sets the house rule at the provided position.
    SetHouseRule(usize, String),

    /// Removes the house rule at the provided position.
    RemoveHouseRule(usize),

    /// Sets the rules not fitting into house rules.
    OtherRules(String),

    /// Sets the [`Policies`], blank ones falling back to defaults on submit.
    Policies(Policies),
}

/// Change of the reviews.
#[derive(Clone, Debug)]
pub enum Reviews {
    /// Adds a new [`UnifiedReview`].
    Add(UnifiedReview),

    /// Replaces the [`UnifiedReview`] with the same ID.
    Update(UnifiedReview),

    /// Removes the [`UnifiedReview`], if present.
    Remove(review::Id),
}
