//! Domain definitions.

pub mod amenity;
pub mod image;
pub mod map;
pub mod pricing;
pub mod property;
pub mod review;

pub use self::{
    amenity::Amenity, image::Image, pricing::PricingRule, property::Property,
    review::UnifiedReview,
};
