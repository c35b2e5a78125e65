//! [`Command`] for uploading images into a [`Gallery`].

use std::{cell::RefCell, convert::Infallible};

use common::{
    operations::{By, Delete, Upload},
    Progress,
};
use futures::future;
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{image, property::Slug},
    gallery::Gallery,
    infra::{
        storage::{self, Blob, File, Phase},
        Storage,
    },
    Service, UploadConfig,
};

use super::Command;

/// Base name of stored images whose names have no usable characters.
const FALLBACK_BASE_NAME: &str = "image";

/// [`Command`] for uploading images into a [`Gallery`].
///
/// Every [`File`] gets a placeholder appended to the [`Gallery`] at once, and
/// all of them are uploaded concurrently. A failed upload drops only its own
/// placeholder. An upload whose placeholder is removed meanwhile is discarded,
/// and its stored file is deleted on a best-effort basis.
#[derive(Debug)]
pub struct UploadImages<'g, G> {
    /// Holder of the [`Gallery`] to upload into.
    pub target: &'g RefCell<G>,

    /// [`File`]s to upload.
    pub files: Vec<File>,
}

impl<'g, G, Db, St> Command<UploadImages<'g, G>> for Service<Db, St>
where
    G: AsMut<Gallery>,
    St: for<'p> Storage<
        Upload<Blob<'p>>,
        Ok = String,
        Err = Traced<storage::Error>,
    >,
    St: Storage<
        Delete<By<File, String>>,
        Ok = (),
        Err = Traced<storage::Error>,
    >,
{
    type Ok = Report;
    type Err = Infallible;

    async fn execute(
        &self,
        cmd: UploadImages<'g, G>,
    ) -> Result<Self::Ok, Self::Err> {
        let UploadImages { target, files } = cmd;
        let UploadConfig {
            folder,
            compression,
        } = &self.config().upload;
        let compressing = compression.is_enabled();

        let uploads = files
            .into_iter()
            .map(|file| {
                let id = target.borrow_mut().as_mut().begin_upload();
                async move {
                    let on_progress = |phase: Phase, progress: Progress| {
                        let overall = phase.overall(progress, compressing);
                        _ = target
                            .borrow_mut()
                            .as_mut()
                            .report_progress(id, overall);
                    };

                    let name = file.name.clone();
                    let base_name = match Slug::derive(file.stem()) {
                        s if s.is_empty() => FALLBACK_BASE_NAME.to_owned(),
                        s => s.to_string(),
                    };
                    let res = self
                        .storage()
                        .execute(Upload(Blob {
                            file,
                            folder: folder.clone(),
                            base_name,
                            compression: *compression,
                            on_progress: &on_progress,
                        }))
                        .await;

                    let url = match res {
                        Ok(url) => url,
                        Err(e) => {
                            log::warn!("failed to upload `{name}`: {e}");
                            _ = target.borrow_mut().as_mut().fail_upload(id);
                            return Outcome::Failed(Failure { name, error: e });
                        }
                    };

                    let settled = target
                        .borrow_mut()
                        .as_mut()
                        .complete_upload(id, url.clone());
                    if settled {
                        return Outcome::Uploaded(id);
                    }

                    log::warn!(
                        "discarding `{name}` stored at `{url}`: its image was \
                         removed while uploading",
                    );
                    if let Err(e) = self
                        .storage()
                        .execute(Delete(By::new(url.clone())))
                        .await
                    {
                        log::warn!("failed to delete stored `{url}`: {e}");
                    }
                    Outcome::Discarded(name)
                }
            })
            .collect::<Vec<_>>();

        let mut report = Report::default();
        for outcome in future::join_all(uploads).await {
            match outcome {
                Outcome::Uploaded(id) => report.uploaded.push(id),
                Outcome::Discarded(name) => report.discarded.push(name),
                Outcome::Failed(failure) => report.failed.push(failure),
            }
        }
        Ok(report)
    }
}

/// Outcome of an [`UploadImages`] [`Command`].
#[derive(Debug, Default)]
pub struct Report {
    /// IDs of the uploaded [`image::Image`]s, in the order of their
    /// [`File`]s.
    pub uploaded: Vec<image::Id>,

    /// Names of the [`File`]s whose [`image::Image`]s were removed from the
    /// [`Gallery`] before their uploads completed.
    pub discarded: Vec<String>,

    /// [`Failure`]s of the rest.
    pub failed: Vec<Failure>,
}

/// Outcome of uploading a single [`File`].
enum Outcome {
    /// [`File`] is uploaded into its [`image::Image`].
    Uploaded(image::Id),

    /// [`File`] is uploaded, but its [`image::Image`] is gone.
    Discarded(String),

    /// [`File`] cannot be uploaded.
    Failed(Failure),
}

/// Failed upload of a single [`File`].
#[derive(Debug)]
pub struct Failure {
    /// Name of the [`File`].
    pub name: String,

    /// [`Storage`] error.
    pub error: Traced<storage::Error>,
}
