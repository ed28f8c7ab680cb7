//! Pixel sampler: reads the center pixel of a live video source or an image.
//!
//! The camera is reached through [`CameraDevice`] / [`VideoSource`] so the
//! sampler runs against a fake in tests. In the terminal build the "camera" is
//! a frame file that an external capture tool keeps overwriting.

use std::path::{Path, PathBuf};
use std::time::Duration;

use image::RgbImage;
use thiserror::Error;
use tokio::runtime::Handle;
use tokio::sync::watch;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use crate::color::{encode, Color};

/// Live polling cadence.
pub const SAMPLE_INTERVAL: Duration = Duration::from_millis(100);

#[derive(Debug, Error)]
pub enum SamplerError {
    #[error("camera unavailable: {0}")]
    DeviceUnavailable(String),

    #[error("could not decode image: {0}")]
    ImageDecode(String),

    #[error("could not read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Something that can hand out a video source. One attempt per screen entry.
pub trait CameraDevice: Send + Sync {
    fn acquire(&self) -> Result<Box<dyn VideoSource>, SamplerError>;
}

/// An acquired video stream.
pub trait VideoSource: Send {
    /// Latest frame, or `None` while the stream has no data yet.
    fn current_frame(&mut self) -> Result<Option<RgbImage>, SamplerError>;
    /// Stop the stream. Called exactly once by [`DeviceGuard`].
    fn release(&mut self);
}

/// Owns an acquired source and releases it when dropped.
struct DeviceGuard(Box<dyn VideoSource>);

impl DeviceGuard {
    fn frame(&mut self) -> Result<Option<RgbImage>, SamplerError> {
        self.0.current_frame()
    }
}

impl Drop for DeviceGuard {
    fn drop(&mut self) {
        self.0.release();
        tracing::debug!("camera released");
    }
}

/// Color at `(floor(w/2), floor(h/2))`, or `None` for an empty frame.
pub fn sample_center_pixel(frame: &RgbImage) -> Option<Color> {
    let (w, h) = frame.dimensions();
    if w == 0 || h == 0 {
        return None;
    }
    let px = frame.get_pixel(w / 2, h / 2);
    Some(encode(px[0], px[1], px[2]))
}

/// Fully decode an encoded image (PNG, JPEG, ...) into RGB.
pub fn decode_image_file(bytes: &[u8]) -> Result<RgbImage, SamplerError> {
    let img = image::load_from_memory(bytes)
        .map_err(|e| SamplerError::ImageDecode(e.to_string()))?
        .to_rgb8();
    if img.width() == 0 || img.height() == 0 {
        return Err(SamplerError::ImageDecode("image has no pixels".into()));
    }
    Ok(img)
}

/// Still-image mode: one extraction at the image's own center.
pub fn sample_image_file(path: &Path) -> Result<Color, SamplerError> {
    let bytes = std::fs::read(path).map_err(|source| SamplerError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let img = decode_image_file(&bytes)?;
    let color = sample_center_pixel(&img)
        .ok_or_else(|| SamplerError::ImageDecode("image has no pixels".into()))?;
    tracing::info!(path = %path.display(), %color, "sampled image file");
    Ok(color)
}

/// Live mode: polls the source and publishes the center color.
///
/// The device is released when the sampler is stopped or dropped.
pub struct LiveSampler {
    cancel: CancellationToken,
    current: watch::Receiver<Option<Color>>,
}

impl LiveSampler {
    pub fn start(device: &dyn CameraDevice, runtime: &Handle) -> Result<Self, SamplerError> {
        let source = device.acquire()?;
        tracing::info!("camera acquired");
        let (tx, rx) = watch::channel(None);
        let cancel = CancellationToken::new();
        runtime.spawn(poll_frames(DeviceGuard(source), tx, cancel.clone()));
        Ok(Self { cancel, current: rx })
    }

    /// Most recent sample, `None` until the first frame arrives.
    pub fn current(&self) -> Option<Color> {
        *self.current.borrow()
    }

    /// Stop polling. The device is released once the in-flight read returns.
    pub fn stop(self) {}
}

impl Drop for LiveSampler {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

async fn poll_frames(
    mut guard: DeviceGuard,
    tx: watch::Sender<Option<Color>>,
    cancel: CancellationToken,
) {
    let mut ticker = tokio::time::interval(SAMPLE_INTERVAL);
    // A slow read delays the next tick instead of stacking them up.
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = ticker.tick() => {}
        }

        let read = tokio::task::spawn_blocking(move || {
            let frame = guard.frame();
            (guard, frame)
        })
        .await;
        let frame = match read {
            Ok((g, frame)) => {
                guard = g;
                frame
            }
            Err(e) => {
                tracing::error!(error = %e, "frame read task failed");
                return;
            }
        };

        match frame {
            Ok(Some(frame)) => {
                if let Some(color) = sample_center_pixel(&frame) {
                    tx.send_if_modified(|cur| {
                        let changed = *cur != Some(color);
                        *cur = Some(color);
                        changed
                    });
                }
            }
            Ok(None) => {}
            Err(e) => tracing::debug!(error = %e, "skipping unreadable frame"),
        }
    }
    tracing::debug!("live sampler stopped");
}

/// Treats an image file, refreshed by an external capture tool, as a camera.
pub struct FrameFileCamera {
    path: PathBuf,
}

impl FrameFileCamera {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CameraDevice for FrameFileCamera {
    fn acquire(&self) -> Result<Box<dyn VideoSource>, SamplerError> {
        if !self.path.exists() {
            return Err(SamplerError::DeviceUnavailable(format!(
                "no camera frame at {}",
                self.path.display()
            )));
        }
        Ok(Box::new(FrameFile { path: self.path.clone(), released: false }))
    }
}

struct FrameFile {
    path: PathBuf,
    released: bool,
}

impl VideoSource for FrameFile {
    fn current_frame(&mut self) -> Result<Option<RgbImage>, SamplerError> {
        if self.released {
            return Ok(None);
        }
        match std::fs::read(&self.path) {
            Ok(bytes) if bytes.is_empty() => Ok(None),
            Ok(bytes) => decode_image_file(&bytes).map(Some),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SamplerError::Io { path: self.path.clone(), source }),
        }
    }

    fn release(&mut self) {
        self.released = true;
    }
}

/// Used when no camera is configured.
pub struct NoCamera;

impl CameraDevice for NoCamera {
    fn acquire(&self) -> Result<Box<dyn VideoSource>, SamplerError> {
        Err(SamplerError::DeviceUnavailable(
            "no camera configured (pass --camera-frame)".into(),
        ))
    }
}


#[cfg(test)]
mod tests {
    use super::fakes::*;
    use super::*;
    use std::io::Cursor;

    fn png_bytes(img: &RgbImage) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, image::ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn center_pixel_uses_floor_of_half_dimensions() {
        let mut img = solid(4, 2, [0, 0, 0]);
        img.put_pixel(2, 1, image::Rgb([0x63, 0x66, 0xF1]));
        assert_eq!(sample_center_pixel(&img).unwrap().to_string(), "#6366F1");

        let mut odd = solid(3, 3, [9, 9, 9]);
        odd.put_pixel(1, 1, image::Rgb([255, 0, 0]));
        assert_eq!(sample_center_pixel(&odd).unwrap().to_string(), "#FF0000");
    }

    #[test]
    fn empty_frame_has_no_sample() {
        assert_eq!(sample_center_pixel(&RgbImage::new(0, 0)), None);
    }

    #[test]
    fn decodes_png_and_rejects_garbage() {
        let img = solid(5, 7, [1, 2, 3]);
        let decoded = decode_image_file(&png_bytes(&img)).unwrap();
        assert_eq!(decoded.dimensions(), (5, 7));
        assert!(matches!(
            decode_image_file(b"not an image"),
            Err(SamplerError::ImageDecode(_))
        ));
    }

    #[test]
    fn image_file_is_sampled_at_its_center() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("shot.png");
        let mut img = solid(10, 6, [0, 0, 0]);
        img.put_pixel(5, 3, image::Rgb([0x12, 0x34, 0x56]));
        std::fs::write(&path, png_bytes(&img)).unwrap();
        assert_eq!(sample_image_file(&path).unwrap().to_string(), "#123456");

        let missing = dir.path().join("missing.png");
        assert!(matches!(sample_image_file(&missing), Err(SamplerError::Io { .. })));
    }

    #[test]
    fn unavailable_devices_report_device_unavailable() {
        assert!(matches!(NoCamera.acquire(), Err(SamplerError::DeviceUnavailable(_))));
        let cam = FrameFileCamera::new("/definitely/not/here.png");
        assert!(matches!(cam.acquire(), Err(SamplerError::DeviceUnavailable(_))));
    }

    #[tokio::test]
    async fn live_sampler_publishes_center_color_and_releases_on_drop() {
        let camera = FakeCamera::showing(solid(8, 8, [0x63, 0x66, 0xF1]));
        let sampler = LiveSampler::start(&camera, &Handle::current()).unwrap();
        assert!(eventually(|| sampler.current().is_some()).await);
        assert_eq!(sampler.current().unwrap().to_string(), "#6366F1");
        assert_eq!(camera.acquired(), 1);
        assert_eq!(camera.released(), 0);

        drop(sampler);
        assert!(eventually(|| camera.released() == 1).await);
    }

    #[tokio::test]
    async fn frame_file_camera_follows_the_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.png");
        std::fs::write(&path, png_bytes(&solid(4, 4, [10, 20, 30]))).unwrap();

        let sampler = LiveSampler::start(&FrameFileCamera::new(&path), &Handle::current()).unwrap();
        assert!(eventually(|| sampler.current().is_some()).await);
        assert_eq!(sampler.current().unwrap().to_string(), "#0A141E");

        std::fs::write(&path, png_bytes(&solid(4, 4, [255, 255, 255]))).unwrap();
        let white: Color = "#FFFFFF".parse().unwrap();
        assert!(eventually(|| sampler.current() == Some(white)).await);
        sampler.stop();
    }
}
