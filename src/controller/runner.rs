use std::sync::Arc;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

use crate::app::Result;
use crate::controller::PendingQuery;
use crate::domain::ArticlesPage;
use crate::fetcher::NewsSource;

/// The outcome of one spawned fetch.
#[derive(Debug)]
pub struct FetchCompletion {
    pub generation: u64,
    pub result: Result<ArticlesPage>,
}

/// Runs queries in the background, one at a time.
///
/// Starting a query aborts the one still in flight. Completions arrive on the
/// receiver returned by [`QueryRunner::new`] and are meant to be fed to
/// [`NewsController::complete`](crate::controller::NewsController::complete),
/// which also drops anything that slipped through before the abort.
pub struct QueryRunner {
    source: Arc<dyn NewsSource + Send + Sync>,
    tx: UnboundedSender<FetchCompletion>,
    in_flight: Option<JoinHandle<()>>,
}

impl QueryRunner {
    pub fn new(
        source: Arc<dyn NewsSource + Send + Sync>,
    ) -> (Self, UnboundedReceiver<FetchCompletion>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let runner = Self {
            source,
            tx,
            in_flight: None,
        };
        (runner, rx)
    }

    pub fn run(&mut self, pending: PendingQuery) {
        if let Some(previous) = self.in_flight.take() {
            if !previous.is_finished() {
                tracing::debug!("Aborting superseded request");
            }
            previous.abort();
        }

        let source = self.source.clone();
        let tx = self.tx.clone();
        self.in_flight = Some(tokio::spawn(async move {
            let result = source.fetch(&pending.query).await;
            let _ = tx.send(FetchCompletion {
                generation: pending.generation,
                result,
            });
        }));
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}
