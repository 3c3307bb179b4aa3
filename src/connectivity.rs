use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use gloo_timers::callback::Interval;
use wasm_bindgen_futures::spawn_local;
use yew::Callback;

use crate::models::ConnectivityStatus;
use crate::services::api::{ApiClient, ApiError};

pub const PROBE_INTERVAL_MS: u32 = 30_000;

/// Probe outcomes reduce to a binary; Checking only exists before the
/// first probe resolves.
pub fn reduce_probe(outcome: Result<bool, ApiError>) -> ConnectivityStatus {
    match outcome {
        Ok(true) => ConnectivityStatus::Online,
        Ok(false) | Err(_) => ConnectivityStatus::Offline,
    }
}

/// Polls the backend health endpoint while started. stop() guarantees
/// nothing is published afterwards, including from a probe already in
/// flight.
pub struct ConnectivityMonitor {
    client: ApiClient,
    active: Arc<AtomicBool>,
    interval: Option<Interval>,
}

impl ConnectivityMonitor {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            active: Arc::new(AtomicBool::new(false)),
            interval: None,
        }
    }

    pub fn start(&mut self, on_status: Callback<ConnectivityStatus>) {
        self.active.store(true, Ordering::Relaxed);
        probe(self.client.clone(), self.active.clone(), on_status.clone());

        let client = self.client.clone();
        let active = self.active.clone();
        self.interval = Some(Interval::new(PROBE_INTERVAL_MS, move || {
            probe(client.clone(), active.clone(), on_status.clone());
        }));
    }

    pub fn stop(&mut self) {
        self.active.store(false, Ordering::Relaxed);
        // Dropping the interval cancels the underlying timer.
        self.interval = None;
    }
}

impl Drop for ConnectivityMonitor {
    fn drop(&mut self) {
        self.stop();
    }
}

fn probe(client: ApiClient, active: Arc<AtomicBool>, on_status: Callback<ConnectivityStatus>) {
    spawn_local(async move {
        let status = reduce_probe(client.health().await);
        tracing::debug!(?status, "connectivity probe resolved");
        if active.load(Ordering::Relaxed) {
            on_status.emit(status);
        }
    });
}
