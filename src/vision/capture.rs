use async_trait::async_trait;
use image::RgbaImage;

use crate::errors::VdResult;
#[cfg(not(windows))]
use crate::errors::VoiceDeskError;

/// Produces raw frames for the streamer. Substitutable so the capture loop
/// can be driven without a display in tests.
#[async_trait]
pub trait FrameSource: Send + Sync {
    async fn capture(&self) -> VdResult<RgbaImage>;
}

/// Primary-monitor capture.
#[derive(Default)]
pub struct ScreenSource;

impl ScreenSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl FrameSource for ScreenSource {
    async fn capture(&self) -> VdResult<RgbaImage> {
        #[cfg(windows)]
        {
            use crate::errors::VoiceDeskError;
            // Grabbing the monitor blocks; keep it off the cooperative
            // scheduler.
            tokio::task::spawn_blocking(|| {
                let monitors = xcap::Monitor::all()
                    .map_err(|e| VoiceDeskError::Vision(format!("monitor enumeration failed: {e}")))?;
                let monitor = monitors
                    .into_iter()
                    .next()
                    .ok_or_else(|| VoiceDeskError::Vision("no monitor available".into()))?;
                monitor
                    .capture_image()
                    .map_err(|e| VoiceDeskError::Vision(format!("screen capture failed: {e}")))
            })
            .await
            .map_err(|e| VoiceDeskError::Vision(format!("capture task failed: {e}")))?
        }
        #[cfg(not(windows))]
        {
            Err(VoiceDeskError::Vision(
                "screen capture is not supported on this platform".into(),
            ))
        }
    }
}
