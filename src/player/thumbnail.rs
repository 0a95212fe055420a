use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use image::codecs::jpeg::JpegEncoder;

/// A decoded video frame at the media's native resolution, RGBA8.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
    /// Set when the frame came from a cross-origin source the host refuses
    /// to read back (a "tainted" canvas in browser terms).
    pub tainted: bool,
}

impl Frame {
    pub fn new(width: u32, height: u32, rgba: Vec<u8>) -> Self {
        Self { width, height, rgba, tainted: false }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("frame is cross-origin and cannot be read back")]
    Tainted,
    #[error("frame has no pixels ({width}x{height})")]
    EmptyFrame { width: u32, height: u32 },
    #[error("frame buffer is {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
    #[error("frame snapshots are not supported in this context")]
    Unsupported,
    #[error("failed to encode frame: {0}")]
    Encode(#[from] image::ImageError),
}

/// Capability to turn the current video frame into an embeddable image.
pub trait FrameSnapshotter: Send + Sync {
    /// Encode `frame` as a `data:` URI.
    fn capture(&self, frame: &Frame) -> Result<String, SnapshotError>;
}

/// Encodes frames as JPEG data URIs.
#[derive(Debug, Clone, Copy)]
pub struct JpegSnapshotter {
    pub quality: u8,
}

impl Default for JpegSnapshotter {
    fn default() -> Self {
        Self { quality: 85 }
    }
}

impl FrameSnapshotter for JpegSnapshotter {
    fn capture(&self, frame: &Frame) -> Result<String, SnapshotError> {
        if frame.tainted {
            return Err(SnapshotError::Tainted);
        }
        if frame.width == 0 || frame.height == 0 {
            return Err(SnapshotError::EmptyFrame { width: frame.width, height: frame.height });
        }
        let expected = frame.width as usize * frame.height as usize * 4;
        if frame.rgba.len() != expected {
            return Err(SnapshotError::BufferSize { expected, actual: frame.rgba.len() });
        }

        // JPEG has no alpha channel.
        let rgb: Vec<u8> = frame
            .rgba
            .chunks_exact(4)
            .flat_map(|px| [px[0], px[1], px[2]])
            .collect();

        let mut jpeg = Vec::new();
        let mut encoder = JpegEncoder::new_with_quality(&mut jpeg, self.quality);
        encoder.encode(&rgb, frame.width, frame.height, image::ColorType::Rgb8.into())?;

        Ok(format!("data:image/jpeg;base64,{}", BASE64.encode(&jpeg)))
    }
}

/// Snapshotter for contexts that cannot render frames.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSnapshotter;

impl FrameSnapshotter for NoopSnapshotter {
    fn capture(&self, _frame: &Frame) -> Result<String, SnapshotError> {
        Err(SnapshotError::Unsupported)
    }
}

/// Best-effort capture: failures are logged and reported as `None`.
pub fn capture_thumbnail(snapshotter: &dyn FrameSnapshotter, frame: &Frame) -> Option<String> {
    match snapshotter.capture(frame) {
        Ok(uri) => Some(uri),
        Err(e) => {
            tracing::warn!("Error generating thumbnail: {}", e);
            None
        }
    }
}
