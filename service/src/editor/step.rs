//! [`Step`]s of an [`Editor`] and their validity.
//!
//! [`Editor`]: super::Editor

use common::define_kind;
use derive_more::{Display, Error};
use serde::Serialize;

use crate::domain::map::EmbedUrl;

use super::Draft;

define_kind! {
    #[doc = "Step of an [`Editor`](super::Editor), in the order of passing."]
    enum Step as "camelCase" {
        #[doc = "Title, address, kind, capacity and location."]
        BasicInfo = 0,

        #[doc = "Default nightly price and special prices."]
        Pricing = 1,

        #[doc = "Hero image and gallery."]
        Images = 2,

        #[doc = "Amenities and freeform features."]
        Amenities = 3,

        #[doc = "Description, location content, rules and policies."]
        Content = 4,

        #[doc = "Reviews collected from external platforms."]
        Reviews = 5,
    }
}

impl Step {
    /// First [`Step`] of an [`Editor`](super::Editor).
    pub const FIRST: Self = Self::BasicInfo;

    /// Last [`Step`] of an [`Editor`](super::Editor), the only one to submit
    /// from.
    pub const LAST: Self = Self::Reviews;

    /// Returns the position of this [`Step`], starting from `0`.
    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.u8())
    }

    /// Returns the [`Step`] at the provided position, if any.
    #[must_use]
    pub fn at(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Returns the [`Step`] following this one, if any.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::at(self.index() + 1)
    }

    /// Returns the [`Step`] preceding this one, if any.
    #[must_use]
    pub fn previous(self) -> Option<Self> {
        self.index().checked_sub(1).and_then(Self::at)
    }

    /// Checks whether the provided [`Draft`] passes this [`Step`].
    ///
    /// # Errors
    ///
    /// With [`Invalid`] listing every failed field.
    pub fn check(self, draft: &Draft) -> Result<(), Invalid> {
        let mut fields = Vec::new();
        let mut require = |ok: bool, field: &'static str, message| {
            if !ok {
                fields.push(FieldError { field, message });
            }
        };

        match self {
            Self::BasicInfo => {
                require(
                    !draft.title.trim().is_empty(),
                    "title",
                    "Title is required",
                );
                require(
                    !draft.address.trim().is_empty(),
                    "address",
                    "Address is required",
                );
                require(draft.kind.is_some(), "type", "Type is required");
                require(
                    draft.location_url.trim().is_empty()
                        || EmbedUrl::parse(&draft.location_url).is_some(),
                    "locationUrl",
                    "Location must be an embeddable map URL",
                );
            }
            Self::Pricing => require(
                draft.pricing.default_price().is_positive(),
                "defaultPrice",
                "Default price must be greater than zero",
            ),
            Self::Images => require(
                draft.gallery.hero().is_some_and(|i| !i.url.trim().is_empty()),
                "hero",
                "Hero image is required",
            ),
            Self::Content => require(
                !draft.description.trim().is_empty(),
                "description",
                "Description is required",
            ),
            Self::Amenities | Self::Reviews => {}
        }

        if fields.is_empty() {
            Ok(())
        } else {
            Err(Invalid { step: self, fields })
        }
    }
}

/// Error of a single field failing its [`Step`].
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq, Serialize)]
#[display("{field}: {message}")]
pub struct FieldError {
    /// Name of the failed field, as persisted.
    pub field: &'static str,

    /// Human-readable message.
    pub message: &'static str,
}

/// Error of a [`Draft`] failing a [`Step`].
#[derive(Clone, Debug, Display, Error, Eq, PartialEq, Serialize)]
#[display("`{step}` step is incomplete")]
pub struct Invalid {
    /// Failed [`Step`].
    pub step: Step,

    /// Failed fields.
    pub fields: Vec<FieldError>,
}

impl Invalid {
    /// Indicates whether the provided `field` failed.
    #[must_use]
    pub fn has(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f.field == field)
    }
}

#[cfg(test)]
mod spec {
    use super::Step;

    #[test]
    fn walks_in_order() {
        assert_eq!(Step::FIRST.index(), 0);
        assert_eq!(Step::LAST.index(), Step::ALL.len() - 1);
        assert_eq!(Step::BasicInfo.next(), Some(Step::Pricing));
        assert_eq!(Step::Reviews.next(), None);
        assert_eq!(Step::Pricing.previous(), Some(Step::BasicInfo));
        assert_eq!(Step::BasicInfo.previous(), None);
        assert_eq!(Step::BasicInfo.to_string(), "basicInfo");
    }
}
