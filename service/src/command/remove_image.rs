//! [`Command`] for removing an [`Image`] from a [`Gallery`].

use std::{cell::RefCell, convert::Infallible};

use common::operations::{By, Delete};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{image, Image},
    gallery::Gallery,
    infra::{
        storage::{self, File},
        Storage,
    },
    Service,
};

use super::Command;

/// [`Command`] for removing an [`Image`] from a [`Gallery`].
///
/// The [`Image`] leaves the [`Gallery`] at once. Its stored file is deleted
/// afterwards on a best-effort basis: a [`Storage`] failure is only logged.
#[derive(Debug)]
pub struct RemoveImage<'g, G> {
    /// Holder of the [`Gallery`] to remove the [`Image`] from.
    pub target: &'g RefCell<G>,

    /// ID of the [`Image`] to remove.
    pub id: image::Id,
}

impl<'g, G, Db, St> Command<RemoveImage<'g, G>> for Service<Db, St>
where
    G: AsMut<Gallery>,
    St: Storage<
        Delete<By<File, String>>,
        Ok = (),
        Err = Traced<storage::Error>,
    >,
{
    /// Removed [`Image`], if there was one.
    type Ok = Option<Image>;
    type Err = Infallible;

    async fn execute(
        &self,
        cmd: RemoveImage<'g, G>,
    ) -> Result<Self::Ok, Self::Err> {
        let RemoveImage { target, id } = cmd;

        let Some(removed) = target.borrow_mut().as_mut().remove(id) else {
            return Ok(None);
        };

        let url = removed.url.trim();
        if !removed.is_uploading() && !url.is_empty() {
            if let Err(e) = self
                .storage()
                .execute(Delete(By::new(url.to_owned())))
                .await
            {
                log::warn!("failed to delete stored `{url}`: {e}");
            }
        }

        Ok(Some(removed))
    }
}

#[cfg(test)]
mod spec {
    use std::cell::RefCell;

    use crate::{
        domain::{image, property::Images},
        gallery::Gallery,
        spec::service,
        Command as _,
    };

    use super::RemoveImage;

    #[tokio::test]
    async fn keeps_removal_when_delete_fails() {
        let (svc, _, storage) = service();
        let gallery = RefCell::new(Gallery::from_images(&Images {
            hero: "https://storage.test/properties/a.jpg".into(),
            gallery: vec!["https://storage.test/properties/b.jpg".into()],
        }));
        let hero = gallery.borrow().images()[0].id;
        storage.fail_deletes(true);

        let removed = svc
            .execute(RemoveImage {
                target: &gallery,
                id: hero,
            })
            .await
            .unwrap();

        assert_eq!(removed.unwrap().id, hero);
        let gallery = gallery.into_inner();
        assert_eq!(
            gallery.persisted(),
            ["https://storage.test/properties/b.jpg"],
        );
        assert_eq!(
            gallery.hero().map(|i| i.url.as_str()),
            Some("https://storage.test/properties/b.jpg"),
        );
    }

    #[tokio::test]
    async fn ignores_unknown_image() {
        let (svc, _, _) = service();
        let gallery = RefCell::new(Gallery::from_images(&Images {
            hero: "https://cdn.elsewhere.test/a.jpg".into(),
            gallery: vec![],
        }));

        let removed = svc
            .execute(RemoveImage {
                target: &gallery,
                id: image::Id::new(),
            })
            .await
            .unwrap();

        assert!(removed.is_none());
        assert_eq!(gallery.borrow().images().len(), 1);
    }

    #[tokio::test]
    async fn removes_foreign_image_locally() {
        let (svc, _, storage) = service();
        let gallery = RefCell::new(Gallery::from_images(&Images {
            hero: "https://cdn.elsewhere.test/a.jpg".into(),
            gallery: vec![],
        }));
        let id = gallery.borrow().images()[0].id;
        storage.fail_deletes(true);

        let removed = svc
            .execute(RemoveImage {
                target: &gallery,
                id,
            })
            .await
            .unwrap();

        assert!(removed.is_some());
        assert!(gallery.borrow().images().is_empty());
        assert!(!storage.owns("https://cdn.elsewhere.test/a.jpg"));
    }
}
