//! Result renderer.
//!
//! Pure mapping from an [`AppState`] snapshot to display data. No network,
//! no mutation: the same snapshot always renders the same [`Screen`].

use serde::Serialize;

use crate::controller::{ActiveView, AppState, BackendStatus, Lifecycle};
use crate::model::{ModelMetrics, PredictionResult};

/// Visual category, ordered from best to lowest tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Green,
    Blue,
    Yellow,
    Orange,
    Red,
}

impl Tone {
    pub fn as_str(self) -> &'static str {
        match self {
            Tone::Green => "green",
            Tone::Blue => "blue",
            Tone::Yellow => "yellow",
            Tone::Orange => "orange",
            Tone::Red => "red",
        }
    }
}

pub fn grade_tone(grade: f64) -> Tone {
    if grade >= 90.0 {
        Tone::Green
    } else if grade >= 80.0 {
        Tone::Blue
    } else if grade >= 70.0 {
        Tone::Yellow
    } else if grade >= 60.0 {
        Tone::Orange
    } else {
        Tone::Red
    }
}

/// Unrecognized levels (e.g. "At Risk") land in the lowest tier.
pub fn performance_tone(level: &str) -> Tone {
    match level {
        "Excellent" => Tone::Green,
        "Very Good" => Tone::Blue,
        "Good" => Tone::Yellow,
        "Satisfactory" => Tone::Orange,
        _ => Tone::Red,
    }
}

pub fn model_description(model_name: &str) -> &'static str {
    match model_name {
        "Random Forest" => "Ensemble method using multiple decision trees for robust predictions",
        "Gradient Boosting" => "Sequential ensemble technique building models iteratively",
        _ => "Machine learning model trained on historical student records",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub position: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionView {
    /// One decimal place, e.g. "78.4"
    pub grade: String,
    pub grade_tone: Tone,
    /// Fill of the grade bar, clamped to 0..=100
    pub grade_bar_percent: f64,
    pub performance_level: String,
    pub performance_tone: Tone,
    pub model_used: String,
    /// Integer percentage, e.g. "82%"
    pub confidence: String,
    pub confidence_percent: u8,
    pub recommendations: Vec<Recommendation>,
}

impl PredictionView {
    pub fn from_result(result: &PredictionResult) -> Self {
        let confidence_percent = (result.confidence_score * 100.0).round().clamp(0.0, 100.0) as u8;

        Self {
            grade: format!("{:.1}", result.predicted_grade),
            grade_tone: grade_tone(result.predicted_grade),
            grade_bar_percent: result.predicted_grade.clamp(0.0, 100.0),
            performance_level: result.performance_level.clone(),
            performance_tone: performance_tone(&result.performance_level),
            model_used: result.model_used.clone(),
            confidence: format!("{confidence_percent}%"),
            confidence_percent,
            recommendations: result
                .recommendations
                .iter()
                .enumerate()
                .map(|(index, text)| Recommendation {
                    position: index + 1,
                    text: text.clone(),
                })
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsView {
    pub model_name: String,
    pub description: &'static str,
    /// R² as a percentage with one decimal, for the summary strip
    pub r2_short: String,
    /// R² as a percentage with two decimals, for the info view
    pub r2_long: String,
    pub rmse: String,
    pub mae: String,
    /// e.g. "±3.1 points"
    pub average_error: String,
    pub training_samples: u64,
    pub test_samples: u64,
    pub total_samples: u64,
}

impl MetricsView {
    pub fn from_metrics(metrics: &ModelMetrics) -> Self {
        let r2_percent = metrics.r2_score * 100.0;
        Self {
            model_name: metrics.model_name.clone(),
            description: model_description(&metrics.model_name),
            r2_short: format!("{r2_percent:.1}%"),
            r2_long: format!("{r2_percent:.2}%"),
            rmse: format!("{:.2}", metrics.rmse),
            mae: format!("{:.2}", metrics.mae),
            average_error: format!("±{:.1} points", metrics.mae),
            training_samples: metrics.training_samples,
            test_samples: metrics.test_samples,
            total_samples: metrics.total_samples(),
        }
    }
}

/// Body of the predict view. Exactly one of these is shown at a time.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PredictPanel {
    /// Backend unreachable: disabled form plus offline banner
    Offline,
    /// Form shown; `disabled` while the backend status is still unknown
    Ready { disabled: bool },
    Loading,
    Error { message: String },
    Prediction(PredictionView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Body {
    Predict(PredictPanel),
    /// Nothing to show until metrics arrive
    Info { metrics: Option<MetricsView> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Screen {
    pub backend_status: BackendStatus,
    pub active_view: ActiveView,
    pub metrics: Option<MetricsView>,
    pub body: Body,
}

pub fn predict_panel(state: &AppState) -> PredictPanel {
    if state.backend_status == BackendStatus::Offline {
        return PredictPanel::Offline;
    }
    match &state.lifecycle {
        Lifecycle::Idle => PredictPanel::Ready {
            disabled: state.is_disabled(),
        },
        Lifecycle::Loading => PredictPanel::Loading,
        Lifecycle::Failed(message) => PredictPanel::Error {
            message: message.clone(),
        },
        Lifecycle::Succeeded(result) => PredictPanel::Prediction(PredictionView::from_result(result)),
    }
}

pub fn render(state: &AppState) -> Screen {
    let metrics = state.metrics().map(MetricsView::from_metrics);
    let body = match state.active_view {
        ActiveView::Predict => Body::Predict(predict_panel(state)),
        ActiveView::Info => Body::Info {
            metrics: metrics.clone(),
        },
    };

    Screen {
        backend_status: state.backend_status,
        active_view: state.active_view,
        metrics,
        body,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controller::MetricsState;

    fn sample_result() -> PredictionResult {
        PredictionResult {
            predicted_grade: 78.4,
            performance_level: "Good".to_string(),
            confidence_score: 0.82,
            model_used: "Random Forest".to_string(),
            recommendations: vec!["Increase study time".to_string()],
        }
    }

    #[test]
    fn grade_thresholds_are_inclusive() {
        assert_eq!(grade_tone(100.0), Tone::Green);
        assert_eq!(grade_tone(90.0), Tone::Green);
        assert_eq!(grade_tone(89.99), Tone::Blue);
        assert_eq!(grade_tone(80.0), Tone::Blue);
        assert_eq!(grade_tone(70.0), Tone::Yellow);
        assert_eq!(grade_tone(60.0), Tone::Orange);
        assert_eq!(grade_tone(59.9), Tone::Red);
        assert_eq!(grade_tone(0.0), Tone::Red);
    }

    #[test]
    fn unknown_levels_fall_to_lowest_tier() {
        assert_eq!(performance_tone("Excellent"), Tone::Green);
        assert_eq!(performance_tone("Very Good"), Tone::Blue);
        assert_eq!(performance_tone("Good"), Tone::Yellow);
        assert_eq!(performance_tone("Satisfactory"), Tone::Orange);
        assert_eq!(performance_tone("At Risk"), Tone::Red);
        assert_eq!(performance_tone("good"), Tone::Red);
    }

    #[test]
    fn only_two_models_have_specific_descriptions() {
        assert!(model_description("Random Forest").contains("decision trees"));
        assert!(model_description("Gradient Boosting").contains("iteratively"));
        assert_eq!(
            model_description("Linear Regression"),
            model_description("")
        );
    }

    #[test]
    fn prediction_view_formats_grade_and_confidence() {
        let view = PredictionView::from_result(&sample_result());
        assert_eq!(view.grade, "78.4");
        assert_eq!(view.grade_tone, Tone::Yellow);
        assert_eq!(view.performance_tone, Tone::Yellow);
        assert_eq!(view.confidence, "82%");
        assert_eq!(view.confidence_percent, 82);
        assert_eq!(
            view.recommendations,
            vec![Recommendation {
                position: 1,
                text: "Increase study time".to_string()
            }]
        );
    }

    #[test]
    fn confidence_is_clamped_to_percentage_range() {
        let mut result = sample_result();
        result.confidence_score = 1.3;
        assert_eq!(PredictionView::from_result(&result).confidence, "100%");
        result.confidence_score = -0.2;
        assert_eq!(PredictionView::from_result(&result).confidence, "0%");
        result.confidence_score = 0.0;
        assert_eq!(PredictionView::from_result(&result).confidence, "0%");
    }

    #[test]
    fn rendering_is_idempotent() {
        let result = sample_result();
        assert_eq!(
            PredictionView::from_result(&result),
            PredictionView::from_result(&result)
        );
    }

    #[test]
    fn metrics_view_formats_values() {
        let view = MetricsView::from_metrics(&ModelMetrics {
            model_name: "Gradient Boosting".to_string(),
            r2_score: 0.8712,
            rmse: 4.216,
            mae: 3.14,
            training_samples: 800,
            test_samples: 200,
        });
        assert_eq!(view.r2_short, "87.1%");
        assert_eq!(view.r2_long, "87.12%");
        assert_eq!(view.rmse, "4.22");
        assert_eq!(view.mae, "3.14");
        assert_eq!(view.average_error, "±3.1 points");
        assert_eq!(view.total_samples, 1000);
    }

    #[test]
    fn offline_banner_takes_precedence() {
        let state = AppState {
            backend_status: BackendStatus::Offline,
            ..AppState::default()
        };
        assert_eq!(predict_panel(&state), PredictPanel::Offline);
    }

    #[test]
    fn error_and_result_are_mutually_exclusive() {
        let mut state = AppState {
            backend_status: BackendStatus::Online,
            lifecycle: Lifecycle::Failed("Prediction failed".to_string()),
            ..AppState::default()
        };
        assert_eq!(
            predict_panel(&state),
            PredictPanel::Error {
                message: "Prediction failed".to_string()
            }
        );

        state.lifecycle = Lifecycle::Succeeded(sample_result());
        assert!(matches!(predict_panel(&state), PredictPanel::Prediction(_)));
    }

    #[test]
    fn checking_backend_shows_disabled_form() {
        assert_eq!(
            predict_panel(&AppState::default()),
            PredictPanel::Ready { disabled: true }
        );
    }

    #[test]
    fn info_view_waits_for_metrics() {
        let mut state = AppState {
            active_view: ActiveView::Info,
            metrics: MetricsState::Absent,
            ..AppState::default()
        };
        assert_eq!(render(&state).body, Body::Info { metrics: None });

        state.metrics = MetricsState::Present(ModelMetrics {
            model_name: "Random Forest".to_string(),
            r2_score: 0.9,
            rmse: 1.0,
            mae: 1.0,
            training_samples: 1,
            test_samples: 1,
        });
        let screen = render(&state);
        assert!(matches!(screen.body, Body::Info { metrics: Some(_) }));
        assert!(screen.metrics.is_some());
    }
}
