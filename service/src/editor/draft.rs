//! [`Draft`] of a [`Property`] and its reducer.

use common::Currency;
use derive_more::{Display, Error, From};

use crate::{
    domain::{
        amenity, map::EmbedUrl, pricing, property, review::RatingOutOfScale,
        Property, UnifiedReview,
    },
    gallery::{Gallery, HeroError, ReorderError},
};

use super::action::{self, Action};

/// In-memory [`Property`] under construction, holding the form values as
/// typed.
#[derive(Clone, Debug, PartialEq)]
pub struct Draft {
    /// ID of the persisted [`Property`] this [`Draft`] edits, if any.
    pub id: Option<property::Id>,

    /// Slug as shown, derived from the [`Draft::title`] unless edited.
    pub slug: String,

    /// Indicator whether the [`Draft::slug`] was edited manually.
    pub slug_edited: bool,

    /// Title.
    pub title: String,

    /// Address.
    pub address: String,

    /// Kind, if chosen.
    pub kind: Option<property::Kind>,

    /// Maximum number of guests, as typed.
    pub max_guests: i32,

    /// Number of bedrooms, as typed.
    pub bedrooms: i32,

    /// Number of bathrooms, as typed.
    pub bathrooms: i32,

    /// Description.
    pub description: String,

    /// [`Currency`] of every price.
    pub currency: Currency,

    /// Default nightly price and special prices.
    pub pricing: pricing::RuleSet,

    /// Hero image and gallery.
    pub gallery: Gallery,

    /// Selected amenities.
    pub amenities: Vec<amenity::Id>,

    /// Freeform features.
    pub features: Vec<String>,

    /// Location as typed, or the recognized map URL.
    pub location_url: String,

    /// Location content.
    pub location_content: property::LocationContent,

    /// House rules.
    pub house_rules: Vec<String>,

    /// Rules not fitting into [`Draft::house_rules`].
    pub other_rules: String,

    /// Policies, blank ones being unset.
    pub policies: property::Policies,

    /// Reviews collected from external platforms.
    pub unified_reviews: Vec<UnifiedReview>,
}

impl Default for Draft {
    fn default() -> Self {
        Self {
            id: None,
            slug: String::new(),
            slug_edited: false,
            title: String::new(),
            address: String::new(),
            kind: None,
            max_guests: 1,
            bedrooms: 1,
            bathrooms: 1,
            description: String::new(),
            currency: Currency::default(),
            pricing: pricing::RuleSet::default(),
            gallery: Gallery::new(true),
            amenities: Vec::new(),
            features: Vec::new(),
            location_url: String::new(),
            location_content: property::LocationContent::default(),
            house_rules: Vec::new(),
            other_rules: String::new(),
            policies: property::Policies::default(),
            unified_reviews: Vec::new(),
        }
    }
}

impl From<Property> for Draft {
    fn from(property: Property) -> Self {
        let Property { id, listing } = property;
        let property::Listing {
            slug,
            title,
            address,
            kind,
            max_guests,
            bedrooms,
            bathrooms,
            description,
            pricing: rates,
            images,
            amenities,
            features,
            location_url,
            location_content,
            house_rules,
            other_rules,
            policies,
            unified_reviews,
            review_count: _,
        } = listing;

        Self {
            id: Some(id),
            slug_edited: slug != property::Slug::derive(&title),
            slug: slug.to_string(),
            title,
            address,
            kind: Some(kind),
            max_guests: i32::from(max_guests),
            bedrooms: i32::from(bedrooms),
            bathrooms: i32::from(bathrooms),
            description,
            currency: rates.currency,
            pricing: pricing::RuleSet::new(rates.default_price, rates.rules),
            gallery: Gallery::from_images(&images),
            amenities,
            features,
            location_url,
            location_content,
            house_rules,
            other_rules,
            policies,
            unified_reviews,
        }
    }
}

impl Draft {
    /// Applies the provided [`Action`] to this [`Draft`].
    ///
    /// # Errors
    ///
    /// With a [`Rejection`] if the [`Action`] cannot be applied, in which
    /// case this [`Draft`] stays untouched.
    pub fn apply(
        &mut self,
        action: impl Into<Action>,
    ) -> Result<(), Rejection> {
        match action.into() {
            Action::Basic(a) => {
                self.apply_basic(a);
                Ok(())
            }
            Action::Pricing(a) => self.apply_pricing(a),
            Action::Images(a) => self.apply_images(a),
            Action::Amenities(a) => self.apply_amenities(a),
            Action::Content(a) => self.apply_content(a),
            Action::Reviews(a) => self.apply_reviews(a),
        }
    }

    /// Applies the provided [`action::Basic`].
    fn apply_basic(&mut self, action: action::Basic) {
        use action::Basic as A;

        match action {
            A::Title(title) => {
                if !self.slug_edited {
                    self.slug = property::Slug::derive(&title).to_string();
                }
                self.title = title;
            }
            A::Slug(slug) => {
                self.slug_edited = !slug.trim().is_empty();
                self.slug = if self.slug_edited {
                    slug
                } else {
                    property::Slug::derive(&self.title).to_string()
                };
            }
            A::Address(address) => self.address = address,
            A::Kind(kind) => self.kind = Some(kind),
            A::MaxGuests(n) => self.max_guests = n,
            A::Bedrooms(n) => self.bedrooms = n,
            A::Bathrooms(n) => self.bathrooms = n,
            A::LocationUrl(input) => {
                self.location_url = EmbedUrl::parse(&input)
                    .map_or(input, |url| url.as_ref().to_owned());
            }
        }
    }

    /// Applies the provided [`action::Pricing`].
    fn apply_pricing(
        &mut self,
        action: action::Pricing,
    ) -> Result<(), Rejection> {
        use action::Pricing as A;

        match action {
            A::DefaultPrice(price) => self.pricing.set_default_price(price),
            A::AddRule(candidate) => {
                let rule = candidate.validate()?.into_rule();
                self.pricing = self.pricing.clone().add_rule(rule)?;
            }
            A::RemoveRule(id) => {
                self.pricing = self.pricing.clone().remove_rule(id);
            }
        }
        Ok(())
    }

    /// Applies the provided [`action::Images`].
    fn apply_images(
        &mut self,
        action: action::Images,
    ) -> Result<(), Rejection> {
        use action::Images as A;

        match action {
            A::Reorder(order) => self.gallery.reorder(&order)?,
            A::SetHero(id) => self.gallery.set_hero(id)?,
        }
        Ok(())
    }

    /// Applies the provided [`action::Amenities`].
    fn apply_amenities(
        &mut self,
        action: action::Amenities,
    ) -> Result<(), Rejection> {
        use action::Amenities as A;

        match action {
            A::Toggle(id) => {
                if id.is_blank() {
                    return Err(Rejection::BlankAmenity);
                }
                if let Some(pos) = self.amenities.iter().position(|a| *a == id)
                {
                    _ = self.amenities.remove(pos);
                } else {
                    self.amenities.push(id);
                }
            }
            A::AddFeature => self.features.push(String::new()),
            A::SetFeature(i, feature) => *at(&mut self.features, i)? = feature,
            A::RemoveFeature(i) => {
                _ = remove_at(&mut self.features, i)?;
            }
        }
        Ok(())
    }

    /// Applies the provided [`action::Content`].
    fn apply_content(
        &mut self,
        action: action::Content,
    ) -> Result<(), Rejection> {
        use action::Content as A;

        let location = &mut self.location_content;
        match action {
            A::Description(text) => self.description = text,
            A::LocationDescription(text) => location.description = text,
            A::AddAttraction => {
                location
                    .nearby_attractions
                    .push(property::Attraction::default());
            }
            A::SetAttraction(i, attraction) => {
                *at(&mut location.nearby_attractions, i)? = attraction;
            }
            A::RemoveAttraction(i) => {
                _ = remove_at(&mut location.nearby_attractions, i)?;
            }
            A::AddTransportation => {
                location
                    .transportation
                    .push(property::Transportation::default());
            }
            A::SetTransportation(i, transportation) => {
                *at(&mut location.transportation, i)? = transportation;
            }
            A::RemoveTransportation(i) => {
                _ = remove_at(&mut location.transportation, i)?;
            }
            A::AddHouseRule => self.house_rules.push(String::new()),
            A::SetHouseRule(i, rule) => *at(&mut self.house_rules, i)? = rule,
            A::RemoveHouseRule(i) => {
                _ = remove_at(&mut self.house_rules, i)?;
            }
            A::OtherRules(text) => self.other_rules = text,
            A::Policies(policies) => self.policies = policies,
        }
        Ok(())
    }

    /// Applies the provided [`action::Reviews`].
    fn apply_reviews(
        &mut self,
        action: action::Reviews,
    ) -> Result<(), Rejection> {
        use action::Reviews as A;

        match action {
            A::Add(review) => {
                review.check()?;
                self.unified_reviews.push(review);
            }
            A::Update(review) => {
                review.check()?;
                let existing = self
                    .unified_reviews
                    .iter_mut()
                    .find(|r| r.id == review.id)
                    .ok_or(Rejection::UnknownReview(review.id))?;
                *existing = review;
            }
            A::Remove(id) => self.unified_reviews.retain(|r| r.id != id),
        }
        Ok(())
    }
}

/// Returns the element of the provided `list` at the provided `index`.
fn at<T>(list: &mut [T], index: usize) -> Result<&mut T, Rejection> {
    list.get_mut(index).ok_or(Rejection::OutOfBounds(index))
}

/// Removes the element of the provided `list` at the provided `index`.
fn remove_at<T>(list: &mut Vec<T>, index: usize) -> Result<T, Rejection> {
    if index < list.len() {
        Ok(list.remove(index))
    } else {
        Err(Rejection::OutOfBounds(index))
    }
}

/// Reason of an [`Action`] being rejected.
#[derive(Clone, Debug, Display, Error, From, PartialEq)]
pub enum Rejection {
    /// Special price is not valid on its own.
    #[display("invalid special price")]
    InvalidRule(#[error(not(source))] pricing::Invalid),

    /// Special price overlaps an existing one.
    #[display("special price {_0}")]
    Overlap(pricing::OverlapError),

    /// [`Gallery`] cannot be reordered so.
    #[display("cannot reorder images: {_0}")]
    Reorder(ReorderError),

    /// Hero image cannot be changed so.
    #[display("cannot change hero image: {_0}")]
    Hero(HeroError),

    /// Amenity ID is blank.
    #[display("amenity ID is blank")]
    #[from(ignore)]
    BlankAmenity,

    /// List has no element at the index.
    #[display("no element at index {_0}")]
    #[from(ignore)]
    OutOfBounds(#[error(not(source))] usize),

    /// Review rating doesn't fit its scale.
    #[display("invalid review: {_0}")]
    Review(RatingOutOfScale),

    /// Review doesn't exist.
    #[display("`UnifiedReview(id: {_0})` does not exist")]
    #[from(ignore)]
    UnknownReview(#[error(not(source))] crate::domain::review::Id),
}
