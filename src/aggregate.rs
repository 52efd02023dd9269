//! Fan-out fragment aggregation
//!
//! Consumes N independent fragment streams concurrently and accumulates each
//! into its own named slot. Each task's consumer runs as its own spawned
//! future and forwards fragments into a task-private channel; the join drains
//! every channel into the outcome once all consumers have terminated.
//!
//! Within one task, fragments are appended strictly in production order.
//! Across tasks no ordering exists. The join settles only after every task
//! has finished; a failing task fails the join as a whole, but partial
//! accumulation already produced by any task stays visible in the outcome.
//! Running siblings are not cancelled; they are awaited to termination.

use crate::error::StreamError;
use crate::types::TaskKind;
use futures::stream::StreamExt;
use std::collections::BTreeMap;
use std::pin::Pin;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// A lazy, finite, non-restartable sequence of text fragments.
pub type FragmentStream = Pin<Box<dyn futures::Stream<Item = Result<String, StreamError>> + Send>>;

/// Result of joining all fragment streams of one build cycle.
#[derive(Debug)]
pub struct FanOutOutcome {
    /// Accumulated text per task, in task order. Present for every task that
    /// produced at least zero fragments, including failed ones (partial).
    pub accumulated: BTreeMap<TaskKind, String>,
    /// First failure across all tasks, if any. `None` means the join
    /// completed cleanly.
    pub failure: Option<StreamError>,
}

impl FanOutOutcome {
    /// Collapse into a result, keeping failure-over-success semantics.
    pub fn into_result(self) -> Result<BTreeMap<TaskKind, String>, StreamError> {
        match self.failure {
            Some(err) => Err(err),
            None => Ok(self.accumulated),
        }
    }
}

/// Consume all given streams concurrently and join on their termination.
///
/// The returned outcome carries one accumulation slot per input task. When
/// several tasks fail, the reported failure is the first failing task in
/// input order; the others are logged and dropped (a single error surfaces
/// per cycle).
pub async fn join_fragment_streams(streams: Vec<(TaskKind, FragmentStream)>) -> FanOutOutcome {
    let mut consumers = Vec::with_capacity(streams.len());
    let mut tasks = Vec::with_capacity(streams.len());
    let mut channels = Vec::with_capacity(streams.len());

    for (task, stream) in streams {
        let (sender, receiver) = mpsc::unbounded_channel::<String>();
        tasks.push(task);
        channels.push((task, receiver));
        consumers.push(tokio::spawn(consume_stream(task, stream, sender)));
    }

    let results = futures::future::join_all(consumers).await;

    let mut failure: Option<StreamError> = None;
    for (task, result) in tasks.into_iter().zip(results) {
        let task_result = match result {
            Ok(r) => r,
            // A panicking consumer is reported as an interruption of its
            // stream rather than poisoning the whole join.
            Err(join_err) => Err(StreamError::Interrupted {
                task,
                message: format!("consumer task panicked: {}", join_err),
            }),
        };
        if let Err(err) = task_result {
            if failure.is_none() {
                failure = Some(err);
            } else {
                warn!(task = %err.task(), error = %err, "Additional stream failure after join already failed");
            }
        }
    }

    // All consumers have terminated and dropped their senders, so draining
    // each channel is non-blocking and complete.
    let mut accumulated = BTreeMap::new();
    for (task, mut receiver) in channels {
        let mut text = String::new();
        while let Ok(fragment) = receiver.try_recv() {
            text.push_str(&fragment);
        }
        debug!(task = %task, bytes = text.len(), "Drained task channel");
        accumulated.insert(task, text);
    }

    FanOutOutcome {
        accumulated,
        failure,
    }
}

/// Drain a single task's stream into a local buffer.
///
/// Used for tasks that produce a structured artifact from the full text
/// instead of forwarding fragments into a shared slot.
pub async fn drain_stream(mut stream: FragmentStream) -> Result<String, StreamError> {
    let mut text = String::new();
    while let Some(fragment) = stream.next().await {
        text.push_str(&fragment?);
    }
    Ok(text)
}

async fn consume_stream(
    task: TaskKind,
    mut stream: FragmentStream,
    sender: mpsc::UnboundedSender<String>,
) -> Result<(), StreamError> {
    let mut fragments = 0usize;
    while let Some(item) = stream.next().await {
        match item {
            Ok(fragment) => {
                fragments += 1;
                // Receiver outlives all consumers; a send can only fail if
                // the join itself was dropped, in which case the fragment is
                // unobservable anyway.
                let _ = sender.send(fragment);
            }
            Err(err) => {
                warn!(task = %task, error = %err, "Fragment stream failed");
                return Err(err);
            }
        }
    }
    debug!(task = %task, fragments, "Fragment stream exhausted");
    Ok(())
}
