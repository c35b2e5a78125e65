//! In-memory [`Storage`] implementation.

use std::{
    collections::{HashMap, HashSet},
    sync::{
        atomic::{AtomicBool, Ordering},
        Arc,
    },
};

use common::{
    operations::{By, Delete, Upload},
    Progress,
};
use tokio::{sync::Mutex, task};
use tracerr::Traced;
use tracing as log;
use uuid::Uuid;

use crate::infra::{
    storage::{self, Blob, File, Phase},
    Storage,
};

/// Steps every upload [`Phase`] reports its [`Progress`] in.
const STEPS: [u8; 3] = [0, 50, 100];

/// In-memory image storage serving files under a base URL.
#[derive(Clone, Debug)]
pub struct Memory {
    /// URL prefix of every stored file.
    base_url: String,

    /// Stored [`File`]s by their URLs.
    files: Arc<Mutex<HashMap<String, File>>>,

    /// Names of [`File`]s whose uploads are rejected.
    rejected: Arc<Mutex<HashSet<String>>>,

    /// Indicator whether deletions fail.
    unreachable_on_delete: Arc<AtomicBool>,
}

impl Memory {
    /// Creates a new empty [`Memory`] storage serving files under the
    /// provided `base_url`.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_owned(),
            files: Arc::default(),
            rejected: Arc::default(),
            unreachable_on_delete: Arc::default(),
        }
    }

    /// Makes uploads of [`File`]s with the provided `name` fail.
    pub async fn reject(&self, name: impl Into<String>) {
        _ = self.rejected.lock().await.insert(name.into());
    }

    /// Makes every following deletion fail (or succeed again).
    pub fn fail_deletes(&self, fail: bool) {
        self.unreachable_on_delete.store(fail, Ordering::SeqCst);
    }

    /// Indicates whether a file is stored at the provided `url`.
    pub async fn contains(&self, url: &str) -> bool {
        self.files.lock().await.contains_key(url)
    }

    /// Indicates whether no files are stored.
    pub async fn is_empty(&self) -> bool {
        self.files.lock().await.is_empty()
    }

    /// Indicates whether the provided `url` belongs to this [`Memory`]
    /// storage.
    #[must_use]
    pub fn owns(&self, url: &str) -> bool {
        url.strip_prefix(&self.base_url)
            .is_some_and(|path| path.starts_with('/'))
    }
}

impl<'p> Storage<Upload<Blob<'p>>> for Memory {
    type Ok = String;
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Upload(blob): Upload<Blob<'p>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Blob {
            file,
            folder,
            base_name,
            compression,
            on_progress,
        } = blob;

        if compression.is_enabled() {
            for step in STEPS.into_iter().filter_map(Progress::new) {
                task::yield_now().await;
                on_progress(Phase::Compression, step);
            }
        }
        for step in STEPS.into_iter().filter_map(Progress::new) {
            task::yield_now().await;
            if step.is_done() && self.rejected.lock().await.contains(&file.name)
            {
                return Err(tracerr::new!(storage::Error::Rejected(file.name)));
            }
            on_progress(Phase::Transfer, step);
        }

        let url = format!(
            "{}/{folder}/{base_name}-{}{}",
            self.base_url,
            Uuid::new_v4().simple(),
            file.extension().map(|e| format!(".{e}")).unwrap_or_default(),
        );
        log::debug!("stored `{}` at `{url}`", file.name);
        _ = self.files.lock().await.insert(url.clone(), file);

        Ok(url)
    }
}

impl Storage<Delete<By<File, String>>> for Memory {
    type Ok = ();
    type Err = Traced<storage::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<File, String>>,
    ) -> Result<Self::Ok, Self::Err> {
        let url = by.into_inner();
        if !self.owns(&url) {
            log::debug!("skipping deletion of foreign `{url}`");
            return Ok(());
        }

        task::yield_now().await;
        if self.unreachable_on_delete.load(Ordering::SeqCst) {
            return Err(tracerr::new!(storage::Error::Unreachable(format!(
                "cannot delete `{url}`",
            ))));
        }

        _ = self.files.lock().await.remove(&url);
        Ok(())
    }
}
