use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use super::{frame, FrameSink, FrameSource};
use crate::config::VisionConfig;

struct CaptureTask {
    handle: JoinHandle<()>,
    cancel: CancellationToken,
}

/// Periodic screen-frame streamer. Owns at most one supervised capture task;
/// `enable` always cancels the previous task before starting a new one, and
/// cancellation takes effect at the loop's next suspension point.
pub struct VisionStreamer {
    source: Arc<dyn FrameSource>,
    sink: Arc<dyn FrameSink>,
    config: VisionConfig,
    active: Mutex<Option<CaptureTask>>,
}

impl VisionStreamer {
    pub fn new(source: Arc<dyn FrameSource>, sink: Arc<dyn FrameSink>, config: VisionConfig) -> Self {
        Self {
            source,
            sink,
            config,
            active: Mutex::new(None),
        }
    }

    pub async fn enable(&self, duration: Duration) -> String {
        self.cancel_current().await;

        let cancel = CancellationToken::new();
        let handle = tokio::spawn(capture_loop(
            self.source.clone(),
            self.sink.clone(),
            self.config.clone(),
            duration,
            cancel.clone(),
        ));
        *self.active.lock().unwrap() = Some(CaptureTask { handle, cancel });

        tracing::info!(seconds = duration.as_secs(), "vision streaming enabled");
        format!("Screen sharing enabled for {} seconds.", duration.as_secs())
    }

    pub async fn disable(&self) -> String {
        if self.cancel_current().await {
            tracing::info!("vision streaming disabled");
            "Screen sharing stopped.".to_string()
        } else {
            "Screen sharing was not active.".to_string()
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
            .lock()
            .unwrap()
            .as_ref()
            .map(|t| !t.handle.is_finished())
            .unwrap_or(false)
    }

    async fn cancel_current(&self) -> bool {
        let task = self.active.lock().unwrap().take();
        match task {
            Some(task) => {
                let was_running = !task.handle.is_finished();
                task.cancel.cancel();
                if let Err(e) = task.handle.await {
                    tracing::warn!(error = %e, "capture task join failed");
                }
                was_running
            }
            None => false,
        }
    }
}

async fn capture_loop(
    source: Arc<dyn FrameSource>,
    sink: Arc<dyn FrameSink>,
    config: VisionConfig,
    duration: Duration,
    cancel: CancellationToken,
) {
    let deadline = Instant::now() + duration;
    let mut ticker = tokio::time::interval(Duration::from_millis(config.capture_interval_ms));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("capture loop cancelled");
                break;
            }
            tick = ticker.tick() => {
                if tick >= deadline {
                    tracing::info!("capture duration elapsed");
                    break;
                }
                stream_one_frame(source.as_ref(), sink.as_ref(), &config).await;
            }
        }
    }
}

/// One capture/encode/push pass. Every failure is logged and swallowed — a
/// bad frame or a missing session must not kill the loop.
async fn stream_one_frame(source: &dyn FrameSource, sink: &dyn FrameSink, config: &VisionConfig) {
    let image = match source.capture().await {
        Ok(image) => image,
        Err(e) => {
            tracing::error!(error = %e, "frame capture failed");
            return;
        }
    };
    let jpeg = match frame::encode_frame(image, config.max_dimension, config.jpeg_quality) {
        Ok(jpeg) => jpeg,
        Err(e) => {
            tracing::error!(error = %e, "frame encode failed");
            return;
        }
    };
    if let Err(reason) = sink.push_frame(jpeg).await {
        tracing::debug!(reason = %reason, "frame push skipped");
    }
}
