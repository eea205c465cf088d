#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use tokio::sync::Notify;

use student_predictor::error::GatewayError;
use student_predictor::gateway::PredictionGateway;
use student_predictor::model::{ModelMetrics, PredictionResult, StudentProfile};

/// Scripted in-process gateway with call counters.
pub struct FakeGateway {
    pub health: Result<(), GatewayError>,
    pub metadata: Result<ModelMetrics, GatewayError>,
    pub prediction: RefCell<Result<PredictionResult, GatewayError>>,
    pub predict_delay: Option<Duration>,
    pub health_gate: Option<Rc<Notify>>,
    pub health_calls: Cell<usize>,
    pub metadata_calls: Cell<usize>,
    pub predict_calls: Cell<usize>,
    pub last_profile: RefCell<Option<StudentProfile>>,
}

impl FakeGateway {
    pub fn online() -> Self {
        Self {
            health: Ok(()),
            metadata: Ok(sample_metrics()),
            prediction: RefCell::new(Ok(scenario_a_result())),
            predict_delay: None,
            health_gate: None,
            health_calls: Cell::new(0),
            metadata_calls: Cell::new(0),
            predict_calls: Cell::new(0),
            last_profile: RefCell::new(None),
        }
    }

    pub fn with_health(mut self, health: Result<(), GatewayError>) -> Self {
        self.health = health;
        self
    }

    pub fn with_metadata(mut self, metadata: Result<ModelMetrics, GatewayError>) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn with_prediction(self, prediction: Result<PredictionResult, GatewayError>) -> Self {
        self.set_prediction(prediction);
        self
    }

    /// Changes what the next predict call returns.
    pub fn set_prediction(&self, prediction: Result<PredictionResult, GatewayError>) {
        *self.prediction.borrow_mut() = prediction;
    }

    pub fn with_predict_delay(mut self, delay: Duration) -> Self {
        self.predict_delay = Some(delay);
        self
    }

    pub fn with_health_gate(mut self, gate: Rc<Notify>) -> Self {
        self.health_gate = Some(gate);
        self
    }
}

impl PredictionGateway for FakeGateway {
    async fn check_health(&self) -> Result<(), GatewayError> {
        self.health_calls.set(self.health_calls.get() + 1);
        if let Some(gate) = &self.health_gate {
            gate.notified().await;
        }
        self.health.clone()
    }

    async fn fetch_metadata(&self) -> Result<ModelMetrics, GatewayError> {
        self.metadata_calls.set(self.metadata_calls.get() + 1);
        self.metadata.clone()
    }

    async fn predict(&self, profile: &StudentProfile) -> Result<PredictionResult, GatewayError> {
        self.predict_calls.set(self.predict_calls.get() + 1);
        *self.last_profile.borrow_mut() = Some(profile.clone());
        if let Some(delay) = self.predict_delay {
            tokio::time::sleep(delay).await;
        }
        self.prediction.borrow().clone()
    }
}

pub fn sample_metrics() -> ModelMetrics {
    ModelMetrics {
        model_name: "Random Forest".to_string(),
        r2_score: 0.87,
        rmse: 4.21,
        mae: 3.1,
        training_samples: 800,
        test_samples: 200,
    }
}

pub fn scenario_a_result() -> PredictionResult {
    PredictionResult {
        predicted_grade: 78.4,
        performance_level: "Good".to_string(),
        confidence_score: 0.82,
        model_used: "Random Forest".to_string(),
        recommendations: vec!["Increase study time".to_string()],
    }
}

pub fn offline_error() -> GatewayError {
    GatewayError::Status {
        url: "http://backend.test/".to_string(),
        status: 503,
    }
}

pub fn network_error() -> GatewayError {
    GatewayError::Unreachable {
        url: "http://backend.test/predict".to_string(),
        reason: "connection refused".to_string(),
    }
}
