//! Embeddable map [`EmbedUrl`] recognition.

use std::{borrow::Cow, sync::LazyLock};

use derive_more::{AsRef, Display};
use regex::Regex;
use url::Url;

/// Host serving embeddable maps.
pub const EMBED_HOST: &str = "www.google.com";

/// Path of embeddable maps on the [`EMBED_HOST`].
pub const EMBED_PATH: &str = "/maps/embed";

/// Query parameter carrying the map definition blob.
pub const EMBED_PARAM: &str = "pb";

/// URL of a map meant to be embedded into an `<iframe>`.
#[derive(AsRef, Clone, Debug, Display, Eq, PartialEq)]
#[as_ref(str)]
pub struct EmbedUrl(String);

impl EmbedUrl {
    /// Recognizes an [`EmbedUrl`] in the provided `input`, which is either a
    /// bare URL or a whole pasted `<iframe>` snippet.
    ///
    /// [`None`] is returned if the candidate URL doesn't point to an
    /// embeddable map.
    #[must_use]
    pub fn parse(input: &str) -> Option<Self> {
        let candidate = Self::candidate(input);
        let url = Url::parse(&candidate).ok()?;

        let embeds = matches!(url.scheme(), "https" | "http")
            && url.host_str() == Some(EMBED_HOST)
            && url.path() == EMBED_PATH
            && url
                .query_pairs()
                .any(|(k, v)| k == EMBED_PARAM && !v.is_empty());
        embeds.then(|| Self(candidate.into_owned()))
    }

    /// Extracts the candidate URL out of the provided `input`.
    ///
    /// For an `<iframe>` snippet this is the value of its `src` attribute,
    /// otherwise the trimmed `input` itself.
    #[must_use]
    pub fn candidate(input: &str) -> Cow<'_, str> {
        static SRC: LazyLock<Regex> = LazyLock::new(|| {
            Regex::new(r#"(?i)\bsrc\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
                .expect("valid regex")
        });

        let input = input.trim();
        if !input.to_ascii_lowercase().contains("<iframe") {
            return Cow::Borrowed(input);
        }
        SRC.captures(input)
            .and_then(|c| c.get(1).or_else(|| c.get(2)))
            .map_or(Cow::Borrowed(input), |src| {
                Cow::Owned(src.as_str().trim().replace("&amp;", "&"))
            })
    }
}
