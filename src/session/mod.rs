//! Form session state
//!
//! Holds the values of one simulation form between edits.
//! Owned by a single caller; nothing here is shared or persisted.

use crate::engine::CalculationEngine;
use crate::error::FieldErrors;
use crate::models::{CalculationResult, Ownership, PaymentField, RawFormValues, VehicleType};
use crate::validation::{create_default_validator, normalize_amount, InputValidator};
use tracing::{debug, info};

/// One user's simulation form and its latest result
pub struct SimulationSession {
    form: RawFormValues,
    result: Option<CalculationResult>,
    validator: InputValidator,
    engine: CalculationEngine,
}

impl SimulationSession {
    pub fn new() -> Self {
        Self::with_validator(create_default_validator())
    }

    pub fn with_validator(validator: InputValidator) -> Self {
        Self {
            form: RawFormValues::default(),
            result: None,
            validator,
            engine: CalculationEngine::new(),
        }
    }

    pub fn form(&self) -> &RawFormValues {
        &self.form
    }

    pub fn result(&self) -> Option<&CalculationResult> {
        self.result.as_ref()
    }

    /// Amount fields keep digits only, as the UI stores them on blur
    pub fn set_turnover(&mut self, value: &str) {
        self.form.turnover = normalize_amount(value);
    }

    pub fn set_expenses(&mut self, value: &str) {
        self.form.expenses = normalize_amount(value);
    }

    pub fn set_monthly_payment(&mut self, value: &str) {
        self.form.monthly_payment = normalize_amount(value);
    }

    pub fn set_email(&mut self, value: &str) {
        self.form.email = value.to_string();
    }

    pub fn select_vehicle(&mut self, vehicle_type: VehicleType) {
        self.form.vehicle_type = vehicle_type.as_str().to_string();
    }

    /// Select the ownership mode and return the payment field to show.
    ///
    /// Choosing `owner` hides the payment field and clears its value.
    pub fn select_ownership(&mut self, ownership: Ownership) -> Option<PaymentField> {
        self.form.ownership = ownership.as_str().to_string();

        let field = ownership.payment_field();
        if field.is_none() {
            self.form.monthly_payment.clear();
        }

        debug!(ownership = ownership.as_str(), payment_shown = field.is_some(), "Ownership selected");
        field
    }

    /// Validate the current form and compute a fresh result.
    ///
    /// Any previous result is discarded, including on failure.
    pub fn submit(&mut self) -> Result<&CalculationResult, FieldErrors> {
        self.result = None;

        let input = self.validator.validate(&self.form)?;
        let result = self.engine.compute(&input);

        info!(
            restitution_percentage = result.restitution_percentage,
            "Simulation submitted"
        );

        Ok(&*self.result.insert(result))
    }

    /// Back to a blank form with the default vehicle
    pub fn restart(&mut self) {
        self.form = RawFormValues::default();
        self.result = None;
        debug!("Simulation restarted");
    }
}

impl Default for SimulationSession {
    fn default() -> Self {
        Self::new()
    }
}
