//! Take-Home Simulator
//!
//! Estimates a contractor's net take-home pay from declared business figures:
//! - Validates raw form values, collecting every field error at once
//! - Computes the salary breakdown with a fixed, deterministic formula
//! - Formats results and masks amount inputs for the hosting UI
//! - Serves the pipeline over HTTP
//!
//! PIPELINE:
//! RAW FORM → VALIDATE → COMPUTE → RENDER

pub mod api;
pub mod audit;
pub mod config;
pub mod engine;
pub mod error;
pub mod masking;
pub mod models;
pub mod report;
pub mod session;
pub mod validation;

pub use error::Result;

// Re-export common types
pub use engine::CalculationEngine;
pub use error::{Field, FieldError, FieldErrorKind, FieldErrors, SimulationError};
pub use models::*;
pub use session::SimulationSession;
pub use validation::{create_default_validator, InputValidator};
