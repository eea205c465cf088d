//! Client for a student grade prediction service.
//!
//! The pieces, leaves first:
//! - [`form`] collects and coerces the eight predictor fields
//! - [`gateway`] speaks the backend's HTTP/JSON contract
//! - [`controller`] owns application state and sequences the other two
//! - [`render`] turns a state snapshot into display data
//!
//! ```no_run
//! use student_predictor::{config::ClientConfig, controller::Controller, form::FormCollector};
//! use student_predictor::gateway::HttpGateway;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let gateway = HttpGateway::new(ClientConfig::resolve(None)?)?;
//! let controller = Controller::new(gateway);
//! controller.initialize().await;
//!
//! FormCollector::new().submit(&controller).await;
//! let screen = student_predictor::render::render(&controller.snapshot());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod controller;
pub mod error;
pub mod form;
pub mod gateway;
pub mod model;
pub mod output;
pub mod render;
