//! Activity context handed to activity implementations.

use chrono::Utc;
use greetflow_core::ActivityInfo;
use std::time::Duration;
use tokio::sync::watch;

/// Activity context for executing activity logic
#[derive(Debug, Clone)]
pub struct ActivityContext {
    activity_info: ActivityInfo,
    worker_stop_channel: Option<watch::Receiver<bool>>,
}

impl ActivityContext {
    pub fn new(activity_info: ActivityInfo) -> Self {
        Self {
            activity_info,
            worker_stop_channel: None,
        }
    }

    /// Set the worker stop channel
    pub fn with_worker_stop_channel(mut self, channel: watch::Receiver<bool>) -> Self {
        self.worker_stop_channel = Some(channel);
        self
    }

    /// Get activity information
    pub fn get_info(&self) -> &ActivityInfo {
        &self.activity_info
    }

    /// True once the hosting worker has begun shutting down.
    pub fn is_cancelled(&self) -> bool {
        self.worker_stop_channel
            .as_ref()
            .map(|rx| *rx.borrow())
            .unwrap_or(false)
    }

    /// Resolves when the hosting worker begins shutting down; never resolves
    /// for contexts without a worker.
    pub async fn cancelled(&self) {
        let Some(mut rx) = self.worker_stop_channel.clone() else {
            return std::future::pending().await;
        };
        loop {
            if *rx.borrow_and_update() {
                return;
            }
            if rx.changed().await.is_err() {
                return std::future::pending().await;
            }
        }
    }

    /// Get the remaining time before deadline
    pub fn get_remaining_time(&self) -> Option<Duration> {
        self.activity_info.deadline.map(|deadline| {
            (deadline - Utc::now())
                .to_std()
                .unwrap_or(Duration::ZERO)
        })
    }
}
