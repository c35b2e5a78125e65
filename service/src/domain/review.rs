//! [`UnifiedReview`] definitions.

use common::{define_kind, unit, Date, DateTimeOf};
use derive_more::{Display, Error, From, FromStr, Into};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Review of a [`Property`] collected from an external [`Platform`].
///
/// [`Property`]: super::Property
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedReview {
    /// ID of this [`UnifiedReview`].
    pub id: Id,

    /// [`Platform`] this [`UnifiedReview`] comes from.
    pub platform: Platform,

    /// Rating within `0..=max_scale`.
    pub rating: Decimal,

    /// [`Scale`] of the [`UnifiedReview::rating`].
    pub max_scale: Scale,

    /// Name of the reviewer, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewer_name: Option<String>,

    /// Day the review was written, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_date: Option<Date>,

    /// Text of the review, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_text: Option<String>,

    /// Link to the review on its [`Platform`], if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_source_url: Option<String>,

    /// When this [`UnifiedReview`] was last edited.
    pub last_updated: LastUpdateDateTime,
}

impl UnifiedReview {
    /// Checks that the [`UnifiedReview::rating`] fits its [`Scale`].
    ///
    /// # Errors
    ///
    /// With a [`RatingOutOfScale`] if it doesn't.
    pub fn check(&self) -> Result<(), RatingOutOfScale> {
        let max = Decimal::from(self.max_scale.u8());
        if self.rating < Decimal::ZERO || self.rating > max {
            return Err(RatingOutOfScale {
                rating: self.rating,
                scale: self.max_scale,
            });
        }
        Ok(())
    }
}

/// ID of a [`UnifiedReview`].
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

define_kind! {
    #[doc = "Platform a [`UnifiedReview`] is collected from."]
    enum Platform as "lowercase" {
        #[doc = "Google Maps."]
        Google = 1,

        #[doc = "Booking.com."]
        Booking = 2,

        #[doc = "Airbnb."]
        Airbnb = 3,

        #[doc = "Tripadvisor."]
        Tripadvisor = 4,

        #[doc = "Any other platform."]
        Other = 5,
    }
}

/// Maximum rating of a [`UnifiedReview`].
#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq, Serialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum Scale {
    /// Ratings from `0` to `5`.
    #[display("5")]
    Five = 5,

    /// Ratings from `0` to `10`.
    #[display("10")]
    Ten = 10,
}

impl Scale {
    /// Converts this into its [`u8`] representation.
    #[must_use]
    pub const fn u8(self) -> u8 {
        self as u8
    }
}

impl TryFrom<u8> for Scale {
    type Error = &'static str;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            5 => Ok(Self::Five),
            10 => Ok(Self::Ten),
            _ => Err("`Scale` must be either 5 or 10"),
        }
    }
}

impl From<Scale> for u8 {
    fn from(s: Scale) -> Self {
        s.u8()
    }
}

/// [`DateTimeOf`] a [`UnifiedReview`] last update.
pub type LastUpdateDateTime = DateTimeOf<(UnifiedReview, unit::LastUpdate)>;

/// Error of a [`UnifiedReview::rating`] not fitting its [`Scale`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
#[display("rating {rating} is out of the 0..={scale} scale")]
pub struct RatingOutOfScale {
    /// Offending rating.
    pub rating: Decimal,

    /// [`Scale`] the rating should fit.
    pub scale: Scale,
}
