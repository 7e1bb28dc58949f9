use std::sync::Mutex;

use async_trait::async_trait;
use tokio::sync::mpsc;

/// Destination for encoded frames. Pushes are best-effort by contract: the
/// capture loop keeps running whether or not anyone is listening.
#[async_trait]
pub trait FrameSink: Send + Sync {
    async fn push_frame(&self, jpeg: Vec<u8>) -> Result<(), String>;
}

/// Forwards frames into whichever conversational session is currently
/// active. The session loop attaches its frame channel on start and detaches
/// on teardown; with no session attached, pushes report a miss.
#[derive(Default)]
pub struct ActiveSessionSink {
    slot: Mutex<Option<mpsc::Sender<Vec<u8>>>>,
}

impl ActiveSessionSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&self, sender: mpsc::Sender<Vec<u8>>) {
        *self.slot.lock().unwrap() = Some(sender);
        tracing::debug!("frame sink attached to session");
    }

    pub fn detach(&self) {
        *self.slot.lock().unwrap() = None;
        tracing::debug!("frame sink detached");
    }
}

#[async_trait]
impl FrameSink for ActiveSessionSink {
    async fn push_frame(&self, jpeg: Vec<u8>) -> Result<(), String> {
        let sender = self.slot.lock().unwrap().clone();
        match sender {
            Some(tx) => tx
                .send(jpeg)
                .await
                .map_err(|_| "session frame channel closed".to_string()),
            None => Err("no active session".to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn push_without_session_reports_miss() {
        let sink = ActiveSessionSink::new();
        assert!(sink.push_frame(vec![1, 2, 3]).await.is_err());
    }

    #[tokio::test]
    async fn attached_session_receives_frames() {
        let sink = ActiveSessionSink::new();
        let (tx, mut rx) = mpsc::channel(4);
        sink.attach(tx);

        sink.push_frame(vec![9]).await.unwrap();
        assert_eq!(rx.recv().await.unwrap(), vec![9]);

        sink.detach();
        assert!(sink.push_frame(vec![9]).await.is_err());
    }
}
