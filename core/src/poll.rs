//! Self-re-arming process status polling.
//!
//! Each watch owns one tokio task that re-fetches its process 2 seconds
//! after the previous fetch settles (so a slow backend naturally slows
//! the cadence down instead of piling up overlapping requests) and stops
//! on a terminal status. Dropping the handle aborts the task; there are
//! no orphaned pollers.

use std::time::Duration;

use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::bus::{AppEvent, EventBus};
use crate::client::ProcessesRest;
use crate::model::ProcessInfo;

const POLL_INTERVAL: Duration = Duration::from_secs(2);

pub struct ProcessWatch;

impl ProcessWatch {
    /// Starts watching the given process. Every settled fetch publishes
    /// `ProcessChanged`; a fetch error publishes an error status and ends
    /// the watch (no retries).
    pub fn spawn(rest: ProcessesRest, bus: EventBus, uuid: Uuid) -> WatchHandle {
        let task = tokio::spawn(async move {
            loop {
                let info = match rest.get(uuid).await {
                    Ok(info) => info,
                    Err(err) => {
                        tracing::warn!(target: "harvester.poll", process = %uuid, error = %err, "poll failed");
                        bus.error(format!("failed to poll process {}: {}", uuid, err));
                        return None;
                    }
                };
                let status = info.status;
                bus.publish(AppEvent::ProcessChanged(info.clone()));
                if status.is_terminal() {
                    tracing::debug!(target: "harvester.poll", process = %uuid, "watch finished");
                    return Some(info);
                }
                tokio::time::sleep(POLL_INTERVAL).await;
            }
        });
        WatchHandle { task: Some(task) }
    }
}

/// Owning handle of a running watch.
pub struct WatchHandle {
    task: Option<JoinHandle<Option<ProcessInfo>>>,
}

impl WatchHandle {
    /// Cancels the watch immediately.
    pub fn stop(mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }

    /// Waits for the watch to end and returns the terminal process state,
    /// `None` when the watch failed or was cancelled. Dropping the future
    /// mid-wait still aborts the underlying task.
    pub async fn join(mut self) -> Option<ProcessInfo> {
        let result = match self.task.as_mut() {
            Some(task) => task.await.ok().flatten(),
            None => None,
        };
        self.task = None;
        result
    }
}

impl Drop for WatchHandle {
    fn drop(&mut self) {
        if let Some(task) = &self.task {
            task.abort();
        }
    }
}
