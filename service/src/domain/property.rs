//! [`Property`] definitions.

use std::sync::LazyLock;

use common::{define_kind, Currency, Price};
use derive_more::{AsRef, Display, From, FromStr, Into};
use regex::Regex;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{amenity, pricing::PricingRule, review::UnifiedReview};

/// Rental property, as persisted in the property store.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct Property {
    /// ID of this [`Property`].
    pub id: Id,

    /// Content of this [`Property`].
    #[serde(flatten)]
    pub listing: Listing,
}

/// Normalized content of a [`Property`], ready to be persisted.
///
/// This is everything a [`Property`] consists of, except its [`Id`], which
/// is assigned by the property store on creation.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Listing {
    /// URL-friendly identifier derived from the [`Listing::title`].
    pub slug: Slug,

    /// Title of the [`Property`].
    pub title: String,

    /// Address of the [`Property`].
    pub address: String,

    /// [`Kind`] of the [`Property`].
    #[serde(rename = "type")]
    pub kind: Kind,

    /// Maximum number of guests, at least `1`.
    pub max_guests: u16,

    /// Number of bedrooms, at least `1`.
    pub bedrooms: u16,

    /// Number of bathrooms, at least `1`.
    pub bathrooms: u16,

    /// Description of the [`Property`].
    pub description: String,

    /// [`Pricing`] of the [`Property`].
    pub pricing: Pricing,

    /// [`Images`] of the [`Property`].
    pub images: Images,

    /// [`amenity::Id`]s from the [`amenity::CATALOG`].
    pub amenities: Vec<amenity::Id>,

    /// Freeform features.
    pub features: Vec<String>,

    /// Embeddable map URL, or empty.
    ///
    /// See [`map::EmbedUrl`](super::map::EmbedUrl) for the accepted shape.
    pub location_url: String,

    /// [`LocationContent`] of the [`Property`].
    pub location_content: LocationContent,

    /// House rules.
    #[serde(rename = "rules")]
    pub house_rules: Vec<String>,

    /// Rules not fitting into [`Listing::house_rules`].
    pub other_rules: String,

    /// [`Policies`] of the [`Property`].
    pub policies: Policies,

    /// [`UnifiedReview`]s collected from external platforms.
    pub unified_reviews: Vec<UnifiedReview>,

    /// Number of [`Listing::unified_reviews`].
    pub review_count: usize,
}

/// ID of a [`Property`].
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

/// URL-friendly identifier of a [`Property`].
///
/// Consists of `[a-z0-9-]` only, and never starts or ends with `-`.
#[derive(
    AsRef, Clone, Debug, Default, Display, Eq, Hash, PartialEq, Serialize,
)]
#[as_ref(str)]
pub struct Slug(String);

impl Slug {
    /// Derives a new [`Slug`] from the provided `title`.
    ///
    /// Runs of characters outside `[a-z0-9]` (after lowercasing) collapse
    /// into a single `-`. The result is empty if the `title` has no ASCII
    /// alphanumerics at all.
    #[must_use]
    pub fn derive(title: impl AsRef<str>) -> Self {
        static SEPARATORS: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r"[^a-z0-9]+").expect("valid regex")
        });

        let lowercase = title.as_ref().to_lowercase();
        let slug = SEPARATORS.replace_all(&lowercase, "-");
        Self(slug.trim_matches('-').to_owned())
    }

    /// Creates a new [`Slug`] if the given `slug` is valid.
    #[must_use]
    pub fn new(slug: impl Into<String>) -> Option<Self> {
        let slug = slug.into();
        Self::check(&slug).then_some(Self(slug))
    }

    /// Indicates whether this [`Slug`] is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Checks whether the given `slug` is a valid [`Slug`].
    fn check(slug: impl AsRef<str>) -> bool {
        let slug = slug.as_ref();
        slug.bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
            && !slug.starts_with('-')
            && !slug.ends_with('-')
    }
}

impl FromStr for Slug {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s).ok_or("invalid `Slug`")
    }
}

impl<'de> Deserialize<'de> for Slug {
    fn deserialize<D: serde::Deserializer<'de>>(
        d: D,
    ) -> Result<Self, D::Error> {
        use serde::de::Error as _;

        let raw = String::deserialize(d)?;
        Self::new(raw).ok_or_else(|| D::Error::custom("invalid `Slug`"))
    }
}

define_kind! {
    #[doc = "Kind of a [`Property`]."]
    enum Kind as "lowercase" {
        #[doc = "A standalone villa."]
        Villa = 1,

        #[doc = "An apartment in a building."]
        Apartment = 2,

        #[doc = "A house."]
        House = 3,

        #[doc = "A resort."]
        Resort = 4,
    }
}

/// Pricing of a [`Property`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pricing {
    /// [`Currency`] every price is expressed in.
    pub currency: Currency,

    /// Nightly price applied outside of any [`PricingRule`].
    pub default_price: Price,

    /// Date-range overrides of the [`Pricing::default_price`], persisted
    /// oldest first.
    pub rules: Vec<PricingRule>,
}

/// Images of a [`Property`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct Images {
    /// URL of the hero image.
    pub hero: String,

    /// URLs of the gallery images, in display order.
    pub gallery: Vec<String>,
}

/// Location description of a [`Property`].
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationContent {
    /// Freeform description of the surroundings.
    pub description: String,

    /// [`Attraction`]s nearby.
    pub nearby_attractions: Vec<Attraction>,

    /// [`Transportation`] options.
    pub transportation: Vec<Transportation>,
}

/// Attraction near a [`Property`].
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Attraction {
    /// Name of this [`Attraction`].
    pub name: String,

    /// Human-readable distance to this [`Attraction`].
    pub distance: String,
}

impl Attraction {
    /// Indicates whether both fields of this [`Attraction`] are filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.distance.trim().is_empty()
    }
}

/// Transportation option of a [`Property`].
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct Transportation {
    /// Name of this [`Transportation`].
    pub name: String,

    /// Details of this [`Transportation`].
    pub details: String,
}

impl Transportation {
    /// Indicates whether both fields of this [`Transportation`] are filled.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.details.trim().is_empty()
    }
}

/// Policies of a [`Property`].
#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Policies {
    /// Check-in policy.
    pub check_in: String,

    /// Check-out policy.
    pub check_out: String,

    /// Cancellation and prepayment policy.
    pub cancellation_prepayment: String,
}

impl Policies {
    /// Returns [`Policies`] filled with the standard boilerplate text.
    #[must_use]
    pub fn boilerplate() -> Self {
        Self {
            check_in: "Check-in from 15:00. Please provide your expected \
                       arrival time in advance."
                .into(),
            check_out: "Check-out until 11:00.".into(),
            cancellation_prepayment: "Cancellation and prepayment policies \
                                      vary according to the booking \
                                      conditions."
                .into(),
        }
    }

    /// Fills every blank field of these [`Policies`] from the provided
    /// `defaults`, trimming the rest.
    #[must_use]
    pub fn or(self, defaults: &Self) -> Self {
        let pick = |own: String, default: &String| {
            let own = own.trim();
            if own.is_empty() {
                default.clone()
            } else {
                own.to_owned()
            }
        };
        Self {
            check_in: pick(self.check_in, &defaults.check_in),
            check_out: pick(self.check_out, &defaults.check_out),
            cancellation_prepayment: pick(
                self.cancellation_prepayment,
                &defaults.cancellation_prepayment,
            ),
        }
    }
}

#[cfg(test)]
pub(crate) mod spec {
    use std::str::FromStr as _;

    use common::{Currency, Price};

    use super::{
        Images, Kind, Listing, LocationContent, Policies, Pricing, Slug,
    };

    /// Returns a complete [`Listing`] passing every editor step.
    pub(crate) fn listing() -> Listing {
        Listing {
            slug: Slug::derive("Ocean View Villa"),
            title: "Ocean View Villa".into(),
            address: "1 Beach Road".into(),
            kind: Kind::Villa,
            max_guests: 6,
            bedrooms: 3,
            bathrooms: 2,
            description: "Right on the beach.".into(),
            pricing: Pricing {
                currency: Currency::Usd,
                default_price: Price::from_str("100").unwrap(),
                rules: vec![],
            },
            images: Images {
                hero: "https://storage.test/properties/hero.jpg".into(),
                gallery: vec![],
            },
            amenities: vec![],
            features: vec![],
            location_url: String::new(),
            location_content: LocationContent::default(),
            house_rules: vec![],
            other_rules: String::new(),
            policies: Policies::boilerplate(),
            unified_reviews: vec![],
            review_count: 0,
        }
    }

    #[test]
    fn derives_slug_from_title() {
        assert_eq!(
            Slug::derive("Ocean View Villa!").as_ref(),
            "ocean-view-villa",
        );
        assert_eq!(
            Slug::derive("  --Sunset  Bay 2-- ").as_ref(),
            "sunset-bay-2",
        );
        assert_eq!(Slug::derive("Café Résidence").as_ref(), "caf-r-sidence");
        assert!(Slug::derive("!!!").is_empty());
    }

    #[test]
    fn derived_slugs_are_always_valid() {
        for title in [
            "Ocean View Villa!",
            "A",
            "___x___",
            "Villa #12 (Beachfront)",
            "ÜBER villa",
        ] {
            let slug = Slug::derive(title);
            assert!(
                Slug::new(slug.as_ref()).is_some(),
                "`{slug}` derived from `{title}` is invalid",
            );
        }
    }

    #[test]
    fn rejects_malformed_slugs() {
        assert!(Slug::new("ocean-view").is_some());
        assert!(Slug::new("-ocean").is_none());
        assert!(Slug::new("ocean-").is_none());
        assert!(Slug::new("Ocean").is_none());
        assert!(Slug::new("ocean view").is_none());

        assert_eq!(
            "ocean-view".parse::<Slug>().unwrap().to_string(),
            "ocean-view",
        );
        assert!("ocean view".parse::<Slug>().is_err());
    }
}
