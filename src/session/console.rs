use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use super::{SessionDriver, SessionEnd, SessionError};
use crate::desktop::{Desktop, WindowDirectory};
use crate::planner::PlannerBridge;
use crate::vision::ActiveSessionSink;

/// Text-mode session: reads requests line by line from stdin and routes each
/// through the planner, printing the spoken reply. Useful for development
/// without a microphone; it authenticates through the planner key, so the
/// rotating session credential is accepted but unused.
pub struct ConsoleDriver {
    bridge: Arc<PlannerBridge>,
    directory: WindowDirectory,
    sink: Arc<ActiveSessionSink>,
}

impl ConsoleDriver {
    pub fn new(
        bridge: Arc<PlannerBridge>,
        desktop: Arc<dyn Desktop>,
        sink: Arc<ActiveSessionSink>,
    ) -> Self {
        Self {
            bridge,
            directory: WindowDirectory::new(desktop),
            sink,
        }
    }
}

#[async_trait]
impl SessionDriver for ConsoleDriver {
    async fn run(&self, _credential: &str) -> Result<SessionEnd, SessionError> {
        // Console has no video surface; frames still need a consumer so a
        // running screen share sees an attached session.
        let (tx, mut rx) = mpsc::channel::<Vec<u8>>(4);
        self.sink.attach(tx);
        let drain = tokio::spawn(async move {
            while let Some(frame) = rx.recv().await {
                tracing::trace!(bytes = frame.len(), "frame received in console session");
            }
        });

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut was_active = false;
        println!("Console session ready. Type a request, or 'exit' to quit.");

        let end = loop {
            print!("> ");
            let _ = std::io::stdout().flush();
            match lines.next_line().await {
                Ok(Some(line)) => {
                    let query = line.trim();
                    if query.is_empty() {
                        continue;
                    }
                    if query.eq_ignore_ascii_case("exit") || query.eq_ignore_ascii_case("quit") {
                        break Ok(SessionEnd::Disconnected);
                    }
                    let titles = self.directory.titles();
                    let reply = self.bridge.plan_and_execute(query, None, &titles).await;
                    println!("{reply}");
                    was_active = true;
                }
                Ok(None) => break Ok(SessionEnd::Disconnected),
                Err(e) => {
                    break Err(SessionError {
                        message: format!("console input failed: {e}"),
                        was_active,
                    })
                }
            }
        };

        self.sink.detach();
        drain.abort();
        end
    }
}
