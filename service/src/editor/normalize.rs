//! Normalization of a [`Draft`] into a persistable [`Listing`].

use crate::domain::property::{
    Listing, LocationContent, Policies, Pricing, Slug,
};

use super::{step, Draft, Step};

impl Draft {
    /// Normalizes this [`Draft`] into a [`Listing`] ready to be persisted.
    ///
    /// Text is trimmed, blank list entries are dropped, counts are clamped to
    /// at least `1`, special prices that are not positive are dropped, and
    /// unset [`Policies`] are taken from the provided `defaults`.
    ///
    /// # Errors
    ///
    /// With [`step::Invalid`] if the kind of the property is not chosen.
    pub fn normalize(
        &self,
        defaults: &Policies,
    ) -> Result<Listing, step::Invalid> {
        let kind = self.kind.ok_or_else(|| step::Invalid {
            step: Step::BasicInfo,
            fields: vec![step::FieldError {
                field: "type",
                message: "Type is required",
            }],
        })?;

        let title = self.title.trim().to_owned();
        let slug = match self.slug.trim() {
            "" => Slug::derive(&title),
            typed => Slug::derive(typed),
        };

        let location = &self.location_content;
        let unified_reviews = self.unified_reviews.clone();

        Ok(Listing {
            slug,
            address: self.address.trim().to_owned(),
            kind,
            max_guests: at_least_one(self.max_guests),
            bedrooms: at_least_one(self.bedrooms),
            bathrooms: at_least_one(self.bathrooms),
            description: self.description.trim().to_owned(),
            pricing: Pricing {
                currency: self.currency,
                default_price: self.pricing.default_price(),
                rules: self
                    .pricing
                    .rules()
                    .iter()
                    .filter(|r| r.price.is_positive())
                    .cloned()
                    .collect(),
            },
            images: self.gallery.to_images(),
            amenities: self
                .amenities
                .iter()
                .filter(|a| !a.is_blank())
                .cloned()
                .collect(),
            features: non_blank(&self.features),
            location_url: self.location_url.trim().to_owned(),
            location_content: LocationContent {
                description: location.description.trim().to_owned(),
                nearby_attractions: location
                    .nearby_attractions
                    .iter()
                    .filter(|a| a.is_complete())
                    .cloned()
                    .collect(),
                transportation: location
                    .transportation
                    .iter()
                    .filter(|t| t.is_complete())
                    .cloned()
                    .collect(),
            },
            house_rules: non_blank(&self.house_rules),
            other_rules: self.other_rules.trim().to_owned(),
            policies: self.policies.clone().or(defaults),
            review_count: unified_reviews.len(),
            unified_reviews,
            title,
        })
    }
}

/// Clamps the provided typed count into `1..=u16::MAX`.
fn at_least_one(count: i32) -> u16 {
    u16::try_from(count.max(1)).unwrap_or(u16::MAX)
}

/// Trims the provided entries, dropping the blank ones.
fn non_blank(entries: &[String]) -> Vec<String> {
    entries
        .iter()
        .map(|e| e.trim())
        .filter(|e| !e.is_empty())
        .map(str::to_owned)
        .collect()
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use common::Price;

    use crate::{
        domain::{
            amenity,
            property::{Attraction, Kind, Policies},
            review, UnifiedReview,
        },
        editor::{
            action::{Amenities, Basic, Content, Pricing, Reviews},
            Draft, Step,
        },
    };

    fn draft() -> Draft {
        let mut draft = Draft::default();
        draft.apply(Basic::Title(" My Villa ".into())).unwrap();
        draft.apply(Basic::Kind(Kind::Villa)).unwrap();
        draft.apply(Basic::MaxGuests(0)).unwrap();
        for feature in ["Pool", "", ""] {
            draft.apply(Amenities::AddFeature).unwrap();
            let last = draft.features.len() - 1;
            draft
                .apply(Amenities::SetFeature(last, feature.into()))
                .unwrap();
        }
        draft
    }

    #[test]
    fn normalizes_typed_values() {
        let listing = draft().normalize(&Policies::boilerplate()).unwrap();

        assert_eq!(listing.title, "My Villa");
        assert_eq!(listing.features, ["Pool"]);
        assert_eq!(listing.max_guests, 1);
        assert_eq!(listing.slug.as_ref(), "my-villa");
    }

    #[test]
    fn regenerates_blank_slug_and_sanitizes_typed_one() {
        let mut draft = draft();
        draft.slug = "  ".into();
        let listing = draft.normalize(&Policies::boilerplate()).unwrap();
        assert_eq!(listing.slug.as_ref(), "my-villa");

        draft.apply(Basic::Slug("My Own Slug!".into())).unwrap();
        let listing = draft.normalize(&Policies::boilerplate()).unwrap();
        assert_eq!(listing.slug.as_ref(), "my-own-slug");
    }

    #[test]
    fn drops_incomplete_entries() {
        let mut draft = draft();
        draft.apply(Content::AddAttraction).unwrap();
        draft.apply(Content::AddAttraction).unwrap();
        draft
            .apply(Content::SetAttraction(
                0,
                Attraction {
                    name: "Old Town".into(),
                    distance: "2 km".into(),
                },
            ))
            .unwrap();
        draft
            .apply(Content::SetAttraction(
                1,
                Attraction {
                    name: "Beach".into(),
                    distance: " ".into(),
                },
            ))
            .unwrap();
        draft.apply(Content::AddHouseRule).unwrap();
        draft.apply(Amenities::Toggle(amenity::Id::from("wifi"))).unwrap();
        draft.amenities.push(amenity::Id::from(""));

        let listing = draft.normalize(&Policies::boilerplate()).unwrap();

        let attractions = &listing.location_content.nearby_attractions;
        assert_eq!(attractions.len(), 1);
        assert_eq!(attractions[0].name, "Old Town");
        assert!(listing.house_rules.is_empty());
        assert_eq!(listing.amenities, [amenity::Id::from("wifi")]);
    }

    #[test]
    fn drops_free_special_prices() {
        let mut draft = draft();
        draft
            .apply(Pricing::DefaultPrice(Price::from_str("100").unwrap()))
            .unwrap();
        draft
            .apply(Pricing::AddRule(crate::domain::pricing::Candidate::new(
                "2024-12-20",
                "2024-12-25",
                "300",
            )))
            .unwrap();
        let mut free = draft.pricing.rules()[0];
        free.id = crate::domain::pricing::Id::new();
        free.price = Price::ZERO;
        free.start_date = free.end_date.next_day().unwrap();
        free.end_date = free.start_date;
        draft.pricing = draft.pricing.clone().add_rule(free).unwrap();

        let listing = draft.normalize(&Policies::boilerplate()).unwrap();
        assert_eq!(listing.pricing.rules.len(), 1);
        assert_eq!(
            listing.pricing.rules[0].price,
            Price::from_str("300").unwrap(),
        );
    }

    #[test]
    fn fills_unset_policies() {
        let mut draft = draft();
        draft
            .apply(Content::Policies(Policies {
                check_in: " After 14:00 ".into(),
                ..Policies::default()
            }))
            .unwrap();

        let defaults = Policies::boilerplate();
        let listing = draft.normalize(&defaults).unwrap();

        assert_eq!(listing.policies.check_in, "After 14:00");
        assert_eq!(listing.policies.check_out, defaults.check_out);
        assert_eq!(
            listing.policies.cancellation_prepayment,
            defaults.cancellation_prepayment,
        );
    }

    #[test]
    fn counts_reviews() {
        let mut draft = draft();
        for rating in ["4.5", "9"] {
            draft
                .apply(Reviews::Add(UnifiedReview {
                    id: review::Id::new(),
                    platform: review::Platform::Google,
                    rating: rating.parse().unwrap(),
                    max_scale: review::Scale::Ten,
                    reviewer_name: None,
                    review_date: None,
                    review_text: None,
                    review_source_url: None,
                    last_updated: review::LastUpdateDateTime::now(),
                }))
                .unwrap();
        }

        let listing = draft.normalize(&Policies::boilerplate()).unwrap();
        assert_eq!(listing.review_count, 2);
        assert_eq!(listing.unified_reviews.len(), 2);
    }

    #[test]
    fn requires_kind() {
        let err = Draft::default()
            .normalize(&Policies::boilerplate())
            .unwrap_err();
        assert_eq!(err.step, Step::BasicInfo);
        assert!(err.has("type"));
    }
}
