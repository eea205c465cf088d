//! Application state controller.
//!
//! Owns the four state axes and is the only writer to them:
//!
//! - backend status: `checking -> online | offline`, decided once per
//!   [`Controller::initialize`]
//! - active view: `predict <-> info`, user toggled, forced to `predict` when a
//!   prediction lands
//! - submission lifecycle: `idle -> loading -> succeeded | failed`, restarted by
//!   the next submission
//! - metrics: `unknown -> present | absent`, settled once by the metadata fetch
//!
//! Execution is single-threaded and cooperative, so state sits in a `RefCell`
//! and no borrow is held across an await point. Single-flight submission is a
//! guard on the lifecycle transition, not a lock.

use std::cell::RefCell;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::GatewayError;
use crate::gateway::PredictionGateway;
use crate::model::{ModelMetrics, PredictionResult, StudentProfile};

/// Generic message shown when the backend rejects a prediction request.
pub const PREDICTION_FAILED: &str = "Prediction failed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendStatus {
    Checking,
    Online,
    Offline,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveView {
    #[default]
    Predict,
    Info,
}

impl ActiveView {
    pub fn toggled(self) -> Self {
        match self {
            ActiveView::Predict => ActiveView::Info,
            ActiveView::Info => ActiveView::Predict,
        }
    }
}

/// Progress of the current submission. The result and the error live inside
/// the terminal states, so a failed submission can never sit next to a stale
/// result.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Lifecycle {
    #[default]
    Idle,
    Loading,
    Succeeded(PredictionResult),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum MetricsState {
    #[default]
    Unknown,
    Present(ModelMetrics),
    Absent,
}

/// A fully settled view of every state axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub backend_status: BackendStatus,
    pub active_view: ActiveView,
    pub lifecycle: Lifecycle,
    pub metrics: MetricsState,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            backend_status: BackendStatus::Checking,
            active_view: ActiveView::Predict,
            lifecycle: Lifecycle::Idle,
            metrics: MetricsState::Unknown,
        }
    }
}

impl AppState {
    /// Submission is only reachable while the backend is known to be online.
    pub fn is_disabled(&self) -> bool {
        self.backend_status != BackendStatus::Online
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.lifecycle, Lifecycle::Loading)
    }

    pub fn prediction(&self) -> Option<&PredictionResult> {
        match &self.lifecycle {
            Lifecycle::Succeeded(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.lifecycle {
            Lifecycle::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn metrics(&self) -> Option<&ModelMetrics> {
        match &self.metrics {
            MetricsState::Present(metrics) => Some(metrics),
            _ => None,
        }
    }
}

/// What happened to a submit request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Suppressed because the backend is not online
    Disabled,
    /// Suppressed because a prediction is already in flight
    AlreadyLoading,
    Succeeded,
    Failed,
}

pub struct Controller<G> {
    gateway: G,
    state: RefCell<AppState>,
}

impl<G: PredictionGateway> Controller<G> {
    pub fn new(gateway: G) -> Self {
        Self {
            gateway,
            state: RefCell::new(AppState::default()),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    pub fn is_disabled(&self) -> bool {
        self.state.borrow().is_disabled()
    }

    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading()
    }

    pub fn set_view(&self, view: ActiveView) {
        self.state.borrow_mut().active_view = view;
    }

    pub fn toggle_view(&self) -> ActiveView {
        let mut state = self.state.borrow_mut();
        state.active_view = state.active_view.toggled();
        state.active_view
    }

    /// Runs the health check and the metadata fetch concurrently. Each call
    /// writes its own axis as soon as it settles; neither waits on the other.
    pub async fn initialize(&self) {
        {
            let mut state = self.state.borrow_mut();
            state.backend_status = BackendStatus::Checking;
            state.metrics = MetricsState::Unknown;
        }
        tokio::join!(self.check_backend(), self.load_metrics());
    }

    pub async fn check_backend(&self) -> BackendStatus {
        let status = match self.gateway.check_health().await {
            Ok(()) => BackendStatus::Online,
            Err(e) => {
                warn!(error = %e, "backend is offline");
                BackendStatus::Offline
            }
        };
        info!(?status, "backend status settled");
        self.state.borrow_mut().backend_status = status;
        status
    }

    /// Metrics are optional enrichment: a failed fetch is logged and the
    /// axis settles to `Absent`. It never touches any other axis.
    pub async fn load_metrics(&self) {
        let metrics = match self.gateway.fetch_metadata().await {
            Ok(metrics) => MetricsState::Present(metrics),
            Err(e) => {
                warn!(error = %e, "model metrics unavailable");
                MetricsState::Absent
            }
        };
        self.state.borrow_mut().metrics = metrics;
    }

    /// Issues one prediction. A submit arriving while another is in flight is
    /// a no-op, since in-flight requests cannot be cancelled.
    pub async fn submit(&self, profile: StudentProfile) -> SubmitOutcome {
        {
            let mut state = self.state.borrow_mut();
            if state.is_loading() {
                debug!("submission ignored, prediction already in flight");
                return SubmitOutcome::AlreadyLoading;
            }
            state.lifecycle = Lifecycle::Loading;
        }

        let result = self.gateway.predict(&profile).await;

        let mut state = self.state.borrow_mut();
        match result {
            Ok(prediction) => {
                info!(grade = prediction.predicted_grade, "prediction succeeded");
                state.lifecycle = Lifecycle::Succeeded(prediction);
                state.active_view = ActiveView::Predict;
                SubmitOutcome::Succeeded
            }
            Err(e) => {
                warn!(error = %e, "prediction failed");
                state.lifecycle = Lifecycle::Failed(failure_message(&e));
                SubmitOutcome::Failed
            }
        }
    }
}

/// Bad statuses get the generic message; transport and decode failures keep
/// their detail so the user can tell "backend said no" from "never got there".
pub fn failure_message(err: &GatewayError) -> String {
    if err.is_status() {
        PREDICTION_FAILED.to_string()
    } else {
        format!("{PREDICTION_FAILED}: {err}")
    }
}
