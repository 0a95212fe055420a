use crate::catalog::record::VideoRecord;
use crate::gallery::style::CardStyle;
use crate::player::thumbnail::{capture_thumbnail, Frame, FrameSnapshotter};

/// Route of the detail page for `id`.
pub fn detail_href(id: &str) -> String {
    format!("/video/{}", id)
}

/// What the card shows in its media slot.
#[derive(Debug, Clone, PartialEq)]
pub enum CardPreview<'a> {
    /// A still image: either the record's precomputed thumbnail or a captured frame.
    Image { src: &'a str },
    /// The muted video itself, played while hovered.
    Live { src: &'a str, playing: bool },
}

/// Effect of a hover change, for the host to apply.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HoverEffect {
    Emphasize { scale: f64 },
    Relax,
    StartPreview,
    StopPreview,
    Unchanged,
}

/// One catalog entry rendered as a clickable preview tile.
///
/// Owns its ephemeral state (loading, thumbnail, hover). The first-frame
/// capture listener is attached on [`VideoCard::mount`] and detached after the
/// first decoded frame or on [`VideoCard::unmount`].
#[derive(Debug)]
pub struct VideoCard {
    record: VideoRecord,
    src: String,
    style: CardStyle,
    thumbnail: Option<String>,
    loading: bool,
    hovered: bool,
    capture_attached: bool,
}

impl VideoCard {
    pub fn mount(record: &VideoRecord, style: CardStyle) -> Self {
        let thumbnail = record.thumbnail.clone();
        let needs_capture = thumbnail.is_none();
        Self {
            src: record.video_url(),
            record: record.clone(),
            style,
            thumbnail,
            loading: needs_capture,
            hovered: false,
            capture_attached: needs_capture,
        }
    }

    pub fn record(&self) -> &VideoRecord {
        &self.record
    }

    pub fn href(&self) -> String {
        detail_href(&self.record.id)
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn capture_attached(&self) -> bool {
        self.capture_attached
    }

    pub fn thumbnail(&self) -> Option<&str> {
        self.thumbnail.as_deref()
    }

    pub fn preview(&self) -> CardPreview<'_> {
        match &self.thumbnail {
            Some(src) => CardPreview::Image { src },
            None => CardPreview::Live { src: &self.src, playing: self.hovered && !self.loading },
        }
    }

    /// First decoded frame of the underlying video.
    ///
    /// Captures a thumbnail once; a failed capture leaves the live preview in
    /// place. Frames after the first, or after detach, are ignored.
    pub fn on_frame_decoded(&mut self, frame: &Frame, snapshotter: &dyn FrameSnapshotter) {
        if !self.capture_attached {
            return;
        }
        self.capture_attached = false;
        self.thumbnail = capture_thumbnail(snapshotter, frame);
        self.loading = false;
        if self.thumbnail.is_none() {
            tracing::debug!("card {}: falling back to live preview", self.record.id);
        }
    }

    pub fn set_hovered(&mut self, hovered: bool) -> HoverEffect {
        if self.hovered == hovered {
            return HoverEffect::Unchanged;
        }
        self.hovered = hovered;
        match (self.thumbnail.is_some(), hovered) {
            (true, true) => HoverEffect::Emphasize { scale: self.style.hover_scale() },
            (true, false) => HoverEffect::Relax,
            (false, true) => HoverEffect::StartPreview,
            (false, false) => HoverEffect::StopPreview,
        }
    }

    /// Tear down the card, detaching the capture listener.
    pub fn unmount(mut self) {
        if self.capture_attached {
            tracing::debug!("card {}: detaching frame capture listener", self.record.id);
            self.capture_attached = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::thumbnail::{JpegSnapshotter, NoopSnapshotter};

    fn record() -> VideoRecord {
        VideoRecord::local("2", "Star Wars", "Star Wars themed video", "Star Wars.mp4", "2025-03-30")
    }

    fn frame() -> Frame {
        Frame::new(2, 2, vec![10; 16])
    }

    #[test]
    fn new_card_shows_live_preview_and_waits_for_frame() {
        let card = VideoCard::mount(&record(), CardStyle::default());
        assert!(card.is_loading());
        assert!(card.capture_attached());
        assert_eq!(card.href(), "/video/2");
        assert_eq!(
            card.preview(),
            CardPreview::Live { src: "/videos/Star%20Wars.mp4", playing: false }
        );
    }

    #[test]
    fn first_frame_becomes_thumbnail_and_detaches() {
        let mut card = VideoCard::mount(&record(), CardStyle::default());
        card.on_frame_decoded(&frame(), &JpegSnapshotter::default());
        assert!(!card.is_loading());
        assert!(!card.capture_attached());
        let thumb = card.thumbnail().unwrap().to_string();
        assert!(thumb.starts_with("data:image/jpeg;base64,"));

        // Later frames do not re-capture.
        card.on_frame_decoded(&Frame::new(4, 4, vec![0; 64]), &JpegSnapshotter::default());
        assert_eq!(card.thumbnail(), Some(thumb.as_str()));
    }

    #[test]
    fn failed_capture_falls_back_to_live_preview() {
        let mut card = VideoCard::mount(&record(), CardStyle::default());
        card.on_frame_decoded(&frame(), &NoopSnapshotter);
        assert!(!card.is_loading());
        assert!(card.thumbnail().is_none());
        assert_eq!(card.set_hovered(true), HoverEffect::StartPreview);
        assert!(matches!(card.preview(), CardPreview::Live { playing: true, .. }));
        assert_eq!(card.set_hovered(false), HoverEffect::StopPreview);
    }

    #[test]
    fn precomputed_thumbnail_skips_capture() {
        let rec = record().with_thumbnail("/thumbs/star-wars.jpg");
        let card = VideoCard::mount(&rec, CardStyle::default());
        assert!(!card.is_loading());
        assert!(!card.capture_attached());
        assert_eq!(card.preview(), CardPreview::Image { src: "/thumbs/star-wars.jpg" });
    }

    #[test]
    fn hover_emphasis_follows_style() {
        let rec = record().with_thumbnail("/t.jpg");
        let mut card = VideoCard::mount(&rec, CardStyle::default());
        assert_eq!(card.set_hovered(true), HoverEffect::Emphasize { scale: 1.05 });
        assert_eq!(card.set_hovered(true), HoverEffect::Unchanged);
        assert_eq!(card.set_hovered(false), HoverEffect::Relax);
    }

    #[test]
    fn hosted_record_previews_hosted_url() {
        let rec = record().with_hosted_url("https://cdn.example.com/sw.mp4");
        let card = VideoCard::mount(&rec, CardStyle::default());
        assert!(matches!(
            card.preview(),
            CardPreview::Live { src: "https://cdn.example.com/sw.mp4", .. }
        ));
        card.unmount();
    }
}
