//! Output formatting for a rendered [`Screen`].
//!
//! Human-readable terminal text, or JSON for scripting.

use std::fmt::Write;

use crate::controller::{ActiveView, BackendStatus};
use crate::render::{Body, MetricsView, PredictPanel, PredictionView, Screen};

/// Width of the grade and confidence bars, in cells
const BAR_WIDTH: usize = 20;

/// Formats a screen as pretty-printed JSON.
pub fn format_json(screen: &Screen) -> String {
    serde_json::to_string_pretty(screen).unwrap_or_else(|_| "{}".to_string())
}

/// Formats a screen for the terminal.
pub fn format_human(screen: &Screen) -> String {
    let mut out = String::new();

    let status = match screen.backend_status {
        BackendStatus::Checking => "Checking backend...",
        BackendStatus::Online => "Backend Online",
        BackendStatus::Offline => "Backend Offline",
    };
    let _ = writeln!(out, "Student Performance Prediction  [{status}]");

    if let Some(metrics) = &screen.metrics {
        let _ = writeln!(
            out,
            "R² {}  |  Model {}  |  Training data {}  |  RMSE {}",
            metrics.r2_short, metrics.model_name, metrics.training_samples, metrics.rmse
        );
    }

    let tab = match screen.active_view {
        ActiveView::Predict => "Make Prediction",
        ActiveView::Info => "Model Information",
    };
    let _ = writeln!(out, "\n== {tab} ==");

    match &screen.body {
        Body::Predict(panel) => write_predict_panel(&mut out, panel),
        Body::Info { metrics: Some(metrics) } => write_metrics(&mut out, metrics),
        Body::Info { metrics: None } => {}
    }

    out
}

fn write_predict_panel(out: &mut String, panel: &PredictPanel) {
    match panel {
        PredictPanel::Offline => {
            let _ = writeln!(out, "! Backend not running. Predictions are disabled.");
        }
        PredictPanel::Ready { disabled: true } => {
            let _ = writeln!(out, "Waiting for backend...");
        }
        PredictPanel::Ready { disabled: false } => {
            let _ = writeln!(out, "Ready to predict.");
        }
        PredictPanel::Loading => {
            let _ = writeln!(out, "Predicting...");
        }
        PredictPanel::Error { message } => {
            let _ = writeln!(out, "! {message}");
        }
        PredictPanel::Prediction(view) => write_prediction(out, view),
    }
}

fn write_prediction(out: &mut String, view: &PredictionView) {
    let _ = writeln!(out, "Prediction Results");
    let _ = writeln!(
        out,
        "  Predicted grade:   {:>5}  {}  ({})",
        view.grade,
        bar(view.grade_bar_percent),
        view.grade_tone.as_str()
    );
    let _ = writeln!(
        out,
        "  Performance level: {} ({})",
        view.performance_level,
        view.performance_tone.as_str()
    );
    let _ = writeln!(
        out,
        "  Confidence:        {:>5}  {}",
        view.confidence,
        bar(f64::from(view.confidence_percent))
    );
    let _ = writeln!(out, "  Model:             {}", view.model_used);

    if !view.recommendations.is_empty() {
        let _ = writeln!(out, "\nPersonalized Recommendations");
        for recommendation in &view.recommendations {
            let _ = writeln!(out, "  {}. {}", recommendation.position, recommendation.text);
        }
    }
}

fn write_metrics(out: &mut String, metrics: &MetricsView) {
    let _ = writeln!(out, "Model type:  {}", metrics.model_name);
    let _ = writeln!(out, "             {}", metrics.description);
    let _ = writeln!(out, "R² score:    {}", metrics.r2_long);
    let _ = writeln!(out, "RMSE:        {}", metrics.rmse);
    let _ = writeln!(out, "MAE:         {}  (average error {})", metrics.mae, metrics.average_error);
    let _ = writeln!(
        out,
        "Samples:     {} training / {} testing ({} total)",
        metrics.training_samples, metrics.test_samples, metrics.total_samples
    );
}

fn bar(percent: f64) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * BAR_WIDTH as f64).round() as usize;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}
