//! [`Amenity`] catalog.

use common::define_kind;
use derive_more::{AsRef, Display};
use serde::{Deserialize, Serialize};

/// Amenity a [`Property`] may offer.
///
/// [`Property`]: super::Property
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Amenity {
    /// Stable identifier of this [`Amenity`].
    pub id: &'static str,

    /// Human-readable label of this [`Amenity`].
    pub label: &'static str,

    /// [`Category`] this [`Amenity`] is listed under.
    pub category: Category,
}

define_kind! {
    #[doc = "Category of an [`Amenity`]."]
    enum Category as "lowercase" {
        #[doc = "Basics every guest expects."]
        Essentials = 1,

        #[doc = "Cooking and dining."]
        Kitchen = 2,

        #[doc = "Pools, gardens and the like."]
        Outdoor = 3,

        #[doc = "Spa and fitness."]
        Wellness = 4,

        #[doc = "Services provided by the host."]
        Services = 5,
    }
}

/// Identifier of an [`Amenity`] as stored in a [`Listing`].
///
/// Opaque to the editor: it is not checked against the [`CATALOG`], so that
/// identifiers retired from the catalog survive an edit.
///
/// [`Listing`]: super::property::Listing
#[derive(
    AsRef,
    Clone,
    Debug,
    Deserialize,
    Display,
    Eq,
    Hash,
    PartialEq,
    Serialize,
)]
#[as_ref(str)]
pub struct Id(String);

impl From<String> for Id {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for Id {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl Id {
    /// Indicates whether this [`Id`] is blank.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }

    /// Looks up the [`Amenity`] this [`Id`] refers to.
    #[must_use]
    pub fn amenity(&self) -> Option<&'static Amenity> {
        lookup(&self.0)
    }
}

/// Every [`Amenity`] the editor offers, grouped by [`Category`].
pub static CATALOG: &[Amenity] = &[
    amenity("wifi", "Free Wi-Fi", Category::Essentials),
    amenity("air-conditioning", "Air conditioning", Category::Essentials),
    amenity("hot-water", "Hot water", Category::Essentials),
    amenity("parking", "Free parking", Category::Essentials),
    amenity("tv", "TV", Category::Essentials),
    amenity("washer", "Washing machine", Category::Essentials),
    amenity("kitchen", "Fully equipped kitchen", Category::Kitchen),
    amenity("bbq", "BBQ facilities", Category::Kitchen),
    amenity("breakfast", "Breakfast available", Category::Kitchen),
    amenity("pool", "Swimming pool", Category::Outdoor),
    amenity("garden", "Garden", Category::Outdoor),
    amenity("beach-access", "Beach access", Category::Outdoor),
    amenity("terrace", "Terrace", Category::Outdoor),
    amenity("spa", "Spa", Category::Wellness),
    amenity("gym", "Fitness center", Category::Wellness),
    amenity("airport-shuttle", "Airport shuttle", Category::Services),
    amenity("housekeeping", "Daily housekeeping", Category::Services),
    amenity("concierge", "Concierge", Category::Services),
];

/// Shortcut for defining [`CATALOG`] entries.
const fn amenity(
    id: &'static str,
    label: &'static str,
    category: Category,
) -> Amenity {
    Amenity {
        id,
        label,
        category,
    }
}

/// Looks up an [`Amenity`] in the [`CATALOG`] by its `id`.
#[must_use]
pub fn lookup(id: &str) -> Option<&'static Amenity> {
    CATALOG.iter().find(|a| a.id == id)
}

/// Iterates over the [`CATALOG`] entries of the provided [`Category`].
pub fn in_category(
    category: Category,
) -> impl Iterator<Item = &'static Amenity> {
    CATALOG.iter().filter(move |a| a.category == category)
}

#[cfg(test)]
mod spec {
    use std::collections::HashSet;

    use super::{in_category, lookup, Category, Id, CATALOG};

    #[test]
    fn catalog_ids_are_unique() {
        let ids = CATALOG.iter().map(|a| a.id).collect::<HashSet<_>>();
        assert_eq!(ids.len(), CATALOG.len());
    }

    #[test]
    fn every_category_is_populated() {
        for &category in Category::ALL {
            assert!(in_category(category).next().is_some(), "{category}");
        }
    }

    #[test]
    fn looks_up_amenities() {
        assert_eq!(lookup("pool").unwrap().label, "Swimming pool");
        assert!(lookup("helipad").is_none());
        assert!(Id::from("helipad").amenity().is_none());
        assert!(Id::from("  ").is_blank());
    }
}
