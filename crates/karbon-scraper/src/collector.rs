//! The shared result queue and its single consumer.
//!
//! The queue is unbounded so producers never wait. There is no explicit
//! close: it closes when the last [`RecordSink`] is dropped, and only task
//! workers hold sinks once a run is under way. [`Collector::drain`] therefore
//! returns exactly when every worker has finished.

use karbon_core::ProductRecord;
use tokio::sync::mpsc;

/// Creates a connected producer/consumer pair.
#[must_use]
pub fn result_queue() -> (RecordSink, Collector) {
    let (tx, rx) = mpsc::unbounded_channel();
    (RecordSink { tx }, Collector { rx })
}

/// Producer handle, cloned into every task worker.
#[derive(Clone)]
pub struct RecordSink {
    tx: mpsc::UnboundedSender<ProductRecord>,
}

impl RecordSink {
    /// Enqueues a record without blocking. Returns `false` if the collector
    /// is gone, in which case the record is dropped.
    pub fn emit(&self, record: ProductRecord) -> bool {
        self.tx.send(record).is_ok()
    }
}

/// Single consumer of the result queue.
pub struct Collector {
    rx: mpsc::UnboundedReceiver<ProductRecord>,
}

impl Collector {
    /// Receives until every [`RecordSink`] has been dropped, then returns
    /// everything received, in arrival order.
    pub async fn drain(mut self) -> Vec<ProductRecord> {
        let mut records = Vec::new();
        while let Some(record) = self.rx.recv().await {
            records.push(record);
        }
        records
    }
}
