//! [`Gallery`] reconciling stored images, in-flight uploads and manual
//! reordering.

use common::Progress;
use derive_more::{Display, Error};

use crate::domain::{image, property::Images, Image};

/// Ordered sequence of [`Image`]s shown to a user.
///
/// Uploading [`Image`]s occupy their place in the sequence, but are never
/// reordered and never reach [`Gallery::persisted()`] until their upload
/// completes.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Gallery {
    /// [`Image`]s in display order.
    images: Vec<Image>,

    /// Indicator whether exactly one [`Image`] is kept as the hero.
    hero_selection: bool,
}

impl Gallery {
    /// Creates a new empty [`Gallery`].
    #[must_use]
    pub fn new(hero_selection: bool) -> Self {
        Self {
            images: Vec::new(),
            hero_selection,
        }
    }

    /// Creates a new [`Gallery`] with hero selection out of the persisted
    /// [`Images`].
    ///
    /// The hero goes first, followed by the gallery URLs. Blank URLs and
    /// repetitions of the hero are skipped.
    #[must_use]
    pub fn from_images(images: &Images) -> Self {
        let hero = images.hero.trim();

        let mut gallery = Self::new(true);
        if !hero.is_empty() {
            gallery.images.push(Image {
                is_hero: true,
                ..Image::stored(hero)
            });
        }
        gallery.images.extend(
            images
                .gallery
                .iter()
                .map(|url| url.trim())
                .filter(|url| !url.is_empty() && *url != hero)
                .map(Image::stored),
        );
        gallery
    }

    /// Returns the [`Image`]s of this [`Gallery`] in display order.
    #[must_use]
    pub fn images(&self) -> &[Image] {
        &self.images
    }

    /// Returns the [`Image`] with the provided `id`, if any.
    #[must_use]
    pub fn get(&self, id: image::Id) -> Option<&Image> {
        self.images.iter().find(|i| i.id == id)
    }

    /// Returns the hero [`Image`], if any.
    #[must_use]
    pub fn hero(&self) -> Option<&Image> {
        self.images.iter().find(|i| i.is_hero)
    }

    /// Indicates whether any [`Image`] is still uploading.
    #[must_use]
    pub fn is_uploading(&self) -> bool {
        self.images.iter().any(Image::is_uploading)
    }

    /// Reorders the settled [`Image`]s to follow the provided `order`.
    ///
    /// Uploading [`Image`]s keep their positions, the settled ones fill the
    /// remaining positions in the provided `order`.
    ///
    /// # Errors
    ///
    /// With a [`ReorderError`] if the `order` is not a permutation of the
    /// settled [`Image`]s.
    pub fn reorder(&mut self, order: &[image::Id]) -> Result<(), ReorderError> {
        let settled = self.images.iter().filter(|i| !i.is_uploading()).count();

        let mut reordered = Vec::with_capacity(order.len());
        for &id in order {
            let image = self.get(id).ok_or(ReorderError::Unknown(id))?;
            if image.is_uploading() {
                return Err(ReorderError::Uploading(id));
            }
            if reordered.iter().any(|i: &Image| i.id == id) {
                return Err(ReorderError::Repeated(id));
            }
            reordered.push(image.clone());
        }
        if reordered.len() != settled {
            return Err(ReorderError::Incomplete);
        }

        let mut reordered = reordered.into_iter();
        for slot in self.images.iter_mut().filter(|i| !i.is_uploading()) {
            if let Some(image) = reordered.next() {
                *slot = image;
            }
        }
        Ok(())
    }

    /// Makes the [`Image`] with the provided `id` the only hero one.
    ///
    /// # Errors
    ///
    /// With a [`HeroError`] if hero selection is disabled, or the [`Image`]
    /// is unknown or still uploading.
    pub fn set_hero(&mut self, id: image::Id) -> Result<(), HeroError> {
        if !self.hero_selection {
            return Err(HeroError::Disabled);
        }
        match self.get(id) {
            None => return Err(HeroError::Unknown(id)),
            Some(i) if i.is_uploading() => {
                return Err(HeroError::Uploading(id));
            }
            Some(_) => {}
        }
        for image in &mut self.images {
            image.is_hero = image.id == id;
        }
        Ok(())
    }

    /// Appends a new placeholder [`Image`] of a just started upload, and
    /// returns its ID to report the upload [`Progress`] with.
    pub fn begin_upload(&mut self) -> image::Id {
        let placeholder = Image::uploading();
        let id = placeholder.id;
        self.images.push(placeholder);
        id
    }

    /// Records the overall [`Progress`] of the upload with the provided `id`.
    ///
    /// [`Progress`] never goes backwards. Returns `false` if there is no
    /// such upload in flight.
    pub fn report_progress(
        &mut self,
        id: image::Id,
        progress: Progress,
    ) -> bool {
        let Some(current) = self
            .images
            .iter_mut()
            .find(|i| i.id == id)
            .and_then(|i| i.upload.as_mut())
        else {
            return false;
        };
        *current = (*current).max(progress);
        true
    }

    /// Settles the upload with the provided `id` at the same position,
    /// pointing its [`Image`] to the stored `url`.
    ///
    /// The first settled [`Image`] becomes the hero one if there is none yet.
    /// Returns `false` if there is no such upload in flight.
    pub fn complete_upload(
        &mut self,
        id: image::Id,
        url: impl Into<String>,
    ) -> bool {
        let promote = self.hero_selection && self.hero().is_none();
        let Some(image) = self
            .images
            .iter_mut()
            .find(|i| i.id == id && i.is_uploading())
        else {
            return false;
        };
        image.url = url.into();
        image.upload = None;
        image.is_hero = promote;
        true
    }

    /// Drops the placeholder of the failed upload with the provided `id`.
    pub fn fail_upload(&mut self, id: image::Id) -> Option<Image> {
        let pos = self
            .images
            .iter()
            .position(|i| i.id == id && i.is_uploading())?;
        Some(self.images.remove(pos))
    }

    /// Removes the [`Image`] with the provided `id`.
    ///
    /// Removing the hero promotes the first remaining settled [`Image`].
    pub fn remove(&mut self, id: image::Id) -> Option<Image> {
        let pos = self.images.iter().position(|i| i.id == id)?;
        let removed = self.images.remove(pos);
        if removed.is_hero {
            if let Some(next) =
                self.images.iter_mut().find(|i| !i.is_uploading())
            {
                next.is_hero = true;
            }
        }
        Some(removed)
    }

    /// Returns the URLs to persist, in display order.
    ///
    /// Uploading [`Image`]s and blank URLs are excluded.
    #[must_use]
    pub fn persisted(&self) -> Vec<&str> {
        self.images
            .iter()
            .filter(|i| !i.is_uploading())
            .map(|i| i.url.trim())
            .filter(|url| !url.is_empty())
            .collect()
    }

    /// Projects this [`Gallery`] onto the persisted [`Images`], keeping the
    /// hero apart from the rest.
    #[must_use]
    pub fn to_images(&self) -> Images {
        let hero = self
            .hero()
            .filter(|i| !i.is_uploading())
            .map(|i| i.url.trim().to_owned())
            .unwrap_or_default();
        Images {
            gallery: self
                .persisted()
                .into_iter()
                .filter(|url| *url != hero)
                .map(str::to_owned)
                .collect(),
            hero,
        }
    }
}

impl Default for Gallery {
    fn default() -> Self {
        Self::new(true)
    }
}

impl AsMut<Self> for Gallery {
    fn as_mut(&mut self) -> &mut Self {
        self
    }
}

/// Error of [`Gallery::reorder()`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum ReorderError {
    /// [`Image`] is not in the [`Gallery`].
    #[display("`Image(id: {_0})` is not in the gallery")]
    Unknown(#[error(not(source))] image::Id),

    /// [`Image`] is still uploading.
    #[display("`Image(id: {_0})` is still uploading")]
    Uploading(#[error(not(source))] image::Id),

    /// [`Image`] is listed more than once.
    #[display("`Image(id: {_0})` is listed more than once")]
    Repeated(#[error(not(source))] image::Id),

    /// Not every settled [`Image`] is listed.
    #[display("every settled image must be listed")]
    Incomplete,
}

/// Error of [`Gallery::set_hero()`].
#[derive(Clone, Copy, Debug, Display, Eq, Error, PartialEq)]
pub enum HeroError {
    /// [`Gallery`] has no hero selection.
    #[display("gallery has no hero selection")]
    Disabled,

    /// [`Image`] is not in the [`Gallery`].
    #[display("`Image(id: {_0})` is not in the gallery")]
    Unknown(#[error(not(source))] image::Id),

    /// [`Image`] is still uploading.
    #[display("`Image(id: {_0})` is still uploading")]
    Uploading(#[error(not(source))] image::Id),
}

#[cfg(test)]
mod spec {
    use common::Progress;

    use super::{Gallery, HeroError, ReorderError};
    use crate::domain::{image, property::Images};

    fn gallery(urls: &[&str]) -> Gallery {
        Gallery::from_images(&Images {
            hero: urls.first().copied().unwrap_or_default().into(),
            gallery: urls.iter().skip(1).map(|&u| u.into()).collect(),
        })
    }

    fn ids(g: &Gallery) -> Vec<image::Id> {
        g.images().iter().map(|i| i.id).collect()
    }

    fn p(v: u8) -> Progress {
        Progress::new(v).unwrap()
    }

    #[test]
    fn seeds_from_persisted_images() {
        let g = Gallery::from_images(&Images {
            hero: "https://cdn/a.jpg".into(),
            gallery: vec![
                "https://cdn/b.jpg".into(),
                " ".into(),
                "https://cdn/a.jpg".into(),
                "https://cdn/c.jpg".into(),
            ],
        });

        assert_eq!(
            g.persisted(),
            ["https://cdn/a.jpg", "https://cdn/b.jpg", "https://cdn/c.jpg"],
        );
        assert_eq!(g.hero().unwrap().url, "https://cdn/a.jpg");
        assert_eq!(g.images().iter().filter(|i| i.is_hero).count(), 1);
    }

    #[test]
    fn reorder_only_permutes_settled_images() {
        let mut g = gallery(&["a"]);
        let uploading = g.begin_upload();
        let c = g.begin_upload();
        assert!(g.complete_upload(c, "c"));
        let [a, b, c] = ids(&g)[..] else { panic!("three images") };
        assert_eq!(b, uploading);

        assert_eq!(g.reorder(&[c, b, a]), Err(ReorderError::Uploading(b)));
        assert_eq!(g.reorder(&[c]), Err(ReorderError::Incomplete));
        assert_eq!(g.reorder(&[c, c]), Err(ReorderError::Repeated(c)));
        assert!(matches!(
            g.reorder(&[c, image::Id::new()]),
            Err(ReorderError::Unknown(_)),
        ));

        g.reorder(&[c, a]).unwrap();
        assert_eq!(ids(&g), [c, b, a]);
        assert_eq!(g.persisted(), ["c", "a"]);
    }

    #[test]
    fn uploading_image_is_excluded_until_resolved() {
        let mut g = gallery(&["a", "c"]);
        let b = g.begin_upload();
        let [a, _, c] = ids(&g)[..] else { panic!("three images") };

        g.reorder(&[c, a]).unwrap();
        assert_eq!(g.persisted(), ["c", "a"]);
        assert_eq!(g.images().last().unwrap().id, b);

        assert!(g.complete_upload(b, "b"));
        assert_eq!(g.persisted(), ["c", "a", "b"]);
    }

    #[test]
    fn tracks_progress_per_upload() {
        let mut g = Gallery::new(true);
        let first = g.begin_upload();
        let second = g.begin_upload();

        assert!(g.report_progress(first, p(40)));
        assert!(g.report_progress(second, p(10)));
        assert!(g.report_progress(first, p(20)));

        assert_eq!(g.get(first).unwrap().upload, Some(p(40)));
        assert_eq!(g.get(second).unwrap().upload, Some(p(10)));

        assert!(g.complete_upload(second, "second"));
        assert!(!g.report_progress(second, p(90)));
        assert!(!g.report_progress(image::Id::new(), p(90)));
    }

    #[test]
    fn first_settled_upload_becomes_hero() {
        let mut g = Gallery::new(true);
        let first = g.begin_upload();
        let second = g.begin_upload();

        assert!(g.complete_upload(second, "second"));
        assert!(g.complete_upload(first, "first"));

        assert_eq!(g.hero().unwrap().id, second);
        assert_eq!(g.images()[0].id, first);
        assert!(!g.images()[0].is_hero);
    }

    #[test]
    fn failed_upload_leaves_no_phantom() {
        let mut g = gallery(&["a"]);
        let failed = g.begin_upload();
        let ok = g.begin_upload();

        assert!(g.fail_upload(failed).is_some());
        assert!(g.get(failed).is_none());
        assert!(g.get(ok).unwrap().is_uploading());
        assert!(g.fail_upload(failed).is_none());
    }

    #[test]
    fn keeps_single_hero() {
        let mut g = gallery(&["a", "b", "c"]);
        let [a, b, c] = ids(&g)[..] else { panic!("three images") };

        g.set_hero(c).unwrap();
        assert_eq!(g.hero().unwrap().id, c);
        assert_eq!(g.images().iter().filter(|i| i.is_hero).count(), 1);

        let pending = g.begin_upload();
        assert_eq!(g.set_hero(pending), Err(HeroError::Uploading(pending)));

        _ = g.remove(c).unwrap();
        assert_eq!(g.hero().unwrap().id, a);

        let mut plain = Gallery::new(false);
        assert_eq!(plain.set_hero(b), Err(HeroError::Disabled));
        let only = plain.begin_upload();
        assert!(plain.complete_upload(only, "only"));
        assert!(plain.hero().is_none());
    }

    #[test]
    fn projects_hero_apart_from_gallery() {
        let mut g = gallery(&["a", "b", "c"]);
        let [_, b, _] = ids(&g)[..] else { panic!("three images") };
        g.set_hero(b).unwrap();
        _ = g.begin_upload();

        let images = g.to_images();
        assert_eq!(images.hero, "b");
        assert_eq!(images.gallery, ["a", "c"]);
    }
}
