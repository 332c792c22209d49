use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use ranking_core::{Category, RequestToken};
use ranking_logging::rank_debug;
use tokio::sync::mpsc as async_mpsc;

use crate::fetch::{FetchSettings, RankingFetcher, ReqwestRankingFetcher};
use crate::{EngineEvent, FailureKind, FetchError};

enum EngineCommand {
    Fetch {
        token: RequestToken,
        category: Category,
    },
}

/// Runs fetches on a current-thread tokio runtime owned by a background thread.
///
/// Completions come back in the order they finish, tagged with the token they were issued under.
pub struct EngineHandle {
    cmd_tx: async_mpsc::UnboundedSender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> io::Result<Self> {
        Self::with_fetcher(Arc::new(ReqwestRankingFetcher::new(settings)))
    }

    pub fn with_fetcher(fetcher: Arc<dyn RankingFetcher>) -> io::Result<Self> {
        let (cmd_tx, mut cmd_rx) = async_mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        thread::Builder::new()
            .name("ranking-engine".to_string())
            .spawn(move || {
                runtime.block_on(async move {
                    while let Some(command) = cmd_rx.recv().await {
                        let fetcher = fetcher.clone();
                        let event_tx = event_tx.clone();
                        tokio::spawn(handle_command(fetcher, command, event_tx));
                    }
                });
                rank_debug!("ranking engine stopped");
            })?;

        Ok(Self { cmd_tx, event_rx })
    }

    /// A handle whose engine thread has already exited.
    #[cfg(test)]
    pub(crate) fn disconnected() -> Self {
        let (cmd_tx, _) = async_mpsc::unbounded_channel();
        let (_, event_rx) = mpsc::channel();
        Self { cmd_tx, event_rx }
    }

    /// Queues a fetch. Returns `false` if the engine thread is gone.
    pub fn request(&self, token: RequestToken, category: Category) -> bool {
        self.cmd_tx
            .send(EngineCommand::Fetch { token, category })
            .is_ok()
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    fetcher: Arc<dyn RankingFetcher>,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Fetch { token, category } => {
            // A panicking fetcher must still resolve its token.
            let task = tokio::spawn(async move { fetcher.fetch(category).await });
            let result = match task.await {
                Ok(result) => result,
                Err(err) => Err(FetchError::new(
                    FailureKind::Network,
                    format!("fetch task aborted: {err}"),
                )),
            };
            let _ = event_tx.send(EngineEvent::FetchCompleted {
                token,
                category,
                result,
            });
        }
    }
}
