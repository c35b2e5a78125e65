//! [`Storage`] of image files.

#[cfg(feature = "memory")]
pub mod memory;

use common::{define_kind, Progress};
use derive_more::{Debug, Display, Error as StdError};

#[cfg(feature = "memory")]
pub use self::memory::Memory;

/// Image storage operation.
pub use common::Handler as Storage;

/// File picked by a user for uploading.
#[derive(Clone, Debug)]
pub struct File {
    /// Original name of this [`File`].
    pub name: String,

    /// MIME type of this [`File`].
    pub content_type: String,

    /// Contents of this [`File`].
    #[debug("{} bytes", data.len())]
    pub data: Vec<u8>,
}

impl File {
    /// Returns the name of this [`File`] without its extension.
    #[must_use]
    pub fn stem(&self) -> &str {
        self.name
            .rsplit_once('.')
            .map_or(self.name.as_str(), |(stem, _)| stem)
    }

    /// Returns the extension of this [`File`], if any.
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        self.name
            .rsplit_once('.')
            .map(|(_, ext)| ext)
            .filter(|ext| !ext.is_empty())
    }
}

/// [`File`] to be uploaded into a [`Storage`].
#[derive(Debug)]
pub struct Blob<'p> {
    /// [`File`] to upload.
    pub file: File,

    /// Folder of the [`Storage`] to upload into.
    pub folder: String,

    /// Base name of the stored file, without an extension.
    pub base_name: String,

    /// [`Compression`] to apply before the transfer.
    pub compression: Compression,

    /// Callback receiving [`Progress`] of every upload [`Phase`].
    #[debug(skip)]
    pub on_progress: &'p dyn Fn(Phase, Progress),
}

define_kind! {
    #[doc = "Compression applied to an image before its transfer."]
    enum Compression as "lowercase" {
        #[doc = "Image is transferred as-is."]
        Disabled = 0,

        #[doc = "Image is re-encoded with a moderate quality loss."]
        Balanced = 1,

        #[doc = "Image is downscaled and re-encoded aggressively."]
        Aggressive = 2,
    }
}

impl Compression {
    /// Indicates whether this [`Compression`] runs before the transfer.
    #[must_use]
    pub fn is_enabled(self) -> bool {
        !matches!(self, Self::Disabled)
    }
}

/// Phase of a [`Blob`] upload.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Phase {
    /// Image is being compressed locally.
    Compression,

    /// Image is being transferred to the [`Storage`].
    Transfer,
}

impl Phase {
    /// Share of the overall [`Progress`] the [`Phase::Compression`] takes
    /// when enabled.
    pub const COMPRESSION_SHARE: Progress = match Progress::new(70) {
        Some(p) => p,
        None => Progress::DONE,
    };

    /// Projects the [`Progress`] of this [`Phase`] onto the overall upload
    /// [`Progress`].
    ///
    /// With `compressing` the [`Phase::Compression`] covers `0..=70` and the
    /// [`Phase::Transfer`] covers `70..=100`, otherwise the transfer covers
    /// everything.
    #[must_use]
    pub fn overall(self, progress: Progress, compressing: bool) -> Progress {
        match (self, compressing) {
            (Self::Compression, _) => {
                progress.scale_into(Progress::NONE, Self::COMPRESSION_SHARE)
            }
            (Self::Transfer, true) => {
                progress.scale_into(Self::COMPRESSION_SHARE, Progress::DONE)
            }
            (Self::Transfer, false) => progress,
        }
    }
}

/// [`Storage`] error.
#[derive(Clone, Debug, Display, StdError)]
pub enum Error {
    /// [`File`] was rejected by the [`Storage`].
    #[display("`{_0}` was rejected by the storage")]
    Rejected(#[error(not(source))] String),

    /// [`Storage`] is unreachable.
    #[display("storage is unreachable: {_0}")]
    Unreachable(#[error(not(source))] String),
}

#[cfg(test)]
mod spec {
    use common::Progress;

    use super::{File, Phase};

    fn p(v: u8) -> Progress {
        Progress::new(v).unwrap()
    }

    #[test]
    fn maps_phases_onto_overall_progress() {
        assert_eq!(Phase::Compression.overall(p(0), true), p(0));
        assert_eq!(Phase::Compression.overall(p(100), true), p(70));
        assert_eq!(Phase::Transfer.overall(p(0), true), p(70));
        assert_eq!(Phase::Transfer.overall(p(100), true), p(100));
        assert_eq!(Phase::Transfer.overall(p(40), false), p(40));
    }

    #[test]
    fn splits_file_name() {
        let file = |name: &str| File {
            name: name.into(),
            content_type: "image/jpeg".into(),
            data: vec![],
        };

        assert_eq!(file("pool.view.jpg").stem(), "pool.view");
        assert_eq!(file("pool.view.jpg").extension(), Some("jpg"));
        assert_eq!(file("pool").stem(), "pool");
        assert_eq!(file("pool").extension(), None);
        assert_eq!(file("pool.").extension(), None);
    }
}
