use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;

/// URL prefix under which local video assets are served.
pub const LOCAL_VIDEO_ROOT: &str = "/videos";

/// Characters escaped when building a local asset path.
///
/// Matches `encodeURIComponent`: everything except ASCII alphanumerics and
/// `- _ . ! ~ * ' ( )` is percent-encoded, so `"Star Wars.mp4"` becomes
/// `Star%20Wars.mp4`.
const FILENAME_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A single entry in the video catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VideoRecord {
    /// Stable, unique identifier. Used as the detail-page route key.
    pub id: String,
    pub title: String,
    pub description: String,
    /// Local asset name under the video root. Used when `hosted_url` is None.
    pub filename: String,
    /// Precomputed preview image URL. When present no frame capture is attempted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    /// Display-only date string; never parsed or sorted.
    pub date: String,
    /// Externally served playback URL. Takes precedence over `filename`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hosted_url: Option<String>,
}

impl VideoRecord {
    /// Build a record for a locally bundled asset.
    pub fn local(id: &str, title: &str, description: &str, filename: &str, date: &str) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            filename: filename.to_string(),
            thumbnail: None,
            date: date.to_string(),
            hosted_url: None,
        }
    }

    pub fn with_hosted_url(mut self, url: impl Into<String>) -> Self {
        self.hosted_url = Some(url.into());
        self
    }

    pub fn with_thumbnail(mut self, url: impl Into<String>) -> Self {
        self.thumbnail = Some(url.into());
        self
    }

    /// Playback URL for this record. See [`resolve_video_url`].
    pub fn video_url(&self) -> String {
        resolve_video_url(self)
    }
}

/// Resolve the URL a player or card should load for `record`.
///
/// Returns `hosted_url` unmodified when present, otherwise the local asset
/// path `/videos/<percent-encoded filename>`. The result is not checked for
/// existence; a missing resource surfaces later as a playback error.
pub fn resolve_video_url(record: &VideoRecord) -> String {
    if let Some(url) = &record.hosted_url {
        return url.clone();
    }
    local_asset_path(&record.filename)
}

/// Build `/videos/<encoded>` for a local filename.
pub fn local_asset_path(filename: &str) -> String {
    format!(
        "{}/{}",
        LOCAL_VIDEO_ROOT,
        utf8_percent_encode(filename, FILENAME_ENCODE_SET)
    )
}
