//! Input validation for submitted forms
//!
//! Rules-based checks run before any calculation.
//! Every rule is evaluated; violations are collected, never short-circuited.

use crate::error::{Field, FieldError, FieldErrorKind, FieldErrors};
use crate::models::{FinancialInput, Ownership, RawFormValues, VehicleFinancing, VehicleType};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info};

lazy_static! {
    /// local@domain.tld, no whitespace and a single '@'
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid regex pattern");
}

pub const TURNOVER_REQUIRED: &str = "Le chiffre d'affaires est requis";
pub const TURNOVER_POSITIVE: &str = "Le chiffre d'affaires doit être supérieur à zéro";
pub const OWNERSHIP_REQUIRED: &str = "Veuillez sélectionner la titularité du véhicule";
pub const MONTHLY_PAYMENT_REQUIRED: &str = "Le montant mensuel est requis";
pub const EXPENSES_REQUIRED: &str = "Le montant des frais professionnels est requis";
pub const EMAIL_INVALID: &str = "Veuillez saisir une adresse email valide";
pub const AMOUNT_TOO_LARGE: &str = "Le montant saisi est trop élevé";

/// Strip every non-digit character from a formatted amount ("12 500 €" → "12500")
pub fn normalize_amount(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}

/// Parse normalized digits. `None` when blank, `Err` when the value overflows.
fn parse_amount(digits: &str) -> Option<Result<u64, std::num::ParseIntError>> {
    if digits.is_empty() {
        None
    } else {
        Some(digits.parse::<u64>())
    }
}

/// Form values after amount normalization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedForm {
    pub turnover: String,
    pub expenses: String,
    pub vehicle_type: VehicleType,
    pub ownership: Option<Ownership>,
    pub monthly_payment: String,
    pub email: String,
}

impl NormalizedForm {
    pub fn from_raw(raw: &RawFormValues) -> Self {
        Self {
            turnover: normalize_amount(&raw.turnover),
            expenses: normalize_amount(&raw.expenses),
            vehicle_type: VehicleType::parse(&raw.vehicle_type).unwrap_or_default(),
            ownership: Ownership::parse(&raw.ownership),
            monthly_payment: normalize_amount(&raw.monthly_payment),
            email: raw.email.clone(),
        }
    }
}

/// Trait for a single field rule
pub trait FieldRule: Send + Sync {
    fn name(&self) -> &'static str;

    fn field(&self) -> Field;

    fn check(&self, form: &NormalizedForm) -> Option<FieldError>;
}

/// Validator that runs every registered rule
pub struct InputValidator {
    rules: Vec<Box<dyn FieldRule>>,
}

impl InputValidator {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn add_rule(&mut self, rule: Box<dyn FieldRule>) {
        self.rules.push(rule);
    }

    pub fn validate(&self, raw: &RawFormValues) -> Result<FinancialInput, FieldErrors> {
        let form = NormalizedForm::from_raw(raw);
        let mut errors = FieldErrors::new();

        for rule in &self.rules {
            if let Some(error) = rule.check(&form) {
                debug!(rule = rule.name(), field = %error.field, "Rule failed");
                errors.push(error);
            }
        }

        info!(
            rule_count = self.rules.len(),
            error_count = errors.len(),
            "Validation completed"
        );

        if !errors.is_empty() {
            return Err(errors);
        }

        assemble(&form)
    }
}

impl Default for InputValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Build the typed input from a form that passed the rule set.
///
/// Re-checks presence and range so a validator with a partial rule set
/// still cannot produce an unusable input.
fn assemble(form: &NormalizedForm) -> Result<FinancialInput, FieldErrors> {
    let mut errors = FieldErrors::new();

    let mut amount = |field: Field, digits: &str, required: &'static str| -> u64 {
        match parse_amount(digits) {
            Some(Ok(value)) => value,
            Some(Err(_)) => {
                errors.push(FieldError::new(field, FieldErrorKind::OutOfRange, AMOUNT_TOO_LARGE));
                0
            }
            None => {
                errors.push(FieldError::new(field, FieldErrorKind::Required, required));
                0
            }
        }
    };

    let turnover = amount(Field::Turnover, &form.turnover, TURNOVER_REQUIRED);
    let expenses = amount(Field::Expenses, &form.expenses, EXPENSES_REQUIRED);
    let monthly_payment = match form.ownership {
        Some(ownership) if ownership.requires_monthly_payment() => {
            amount(Field::MonthlyPayment, &form.monthly_payment, MONTHLY_PAYMENT_REQUIRED)
        }
        _ => 0,
    };

    if matches!(parse_amount(&form.turnover), Some(Ok(0))) {
        errors.push(FieldError::new(
            Field::Turnover,
            FieldErrorKind::OutOfRange,
            TURNOVER_POSITIVE,
        ));
    }

    if form.ownership.is_none() {
        errors.push(FieldError::new(
            Field::Ownership,
            FieldErrorKind::Required,
            OWNERSHIP_REQUIRED,
        ));
    }

    if !is_valid_email(&form.email) {
        errors.push(FieldError::new(Field::Email, FieldErrorKind::InvalidFormat, EMAIL_INVALID));
    }

    let ownership = match form.ownership {
        Some(ownership) if errors.is_empty() => ownership,
        _ => return Err(errors),
    };

    Ok(FinancialInput::from_parts(
        turnover as f64,
        expenses as f64,
        form.vehicle_type,
        VehicleFinancing::new(ownership, monthly_payment as f64),
        form.email.clone(),
    ))
}

//
// ========== Field Rules ==========
//

/// Rule: turnover present and strictly positive
pub struct TurnoverRule;

impl FieldRule for TurnoverRule {
    fn name(&self) -> &'static str {
        "turnover_required"
    }

    fn field(&self) -> Field {
        Field::Turnover
    }

    fn check(&self, form: &NormalizedForm) -> Option<FieldError> {
        match parse_amount(&form.turnover) {
            None => Some(FieldError::new(self.field(), FieldErrorKind::Required, TURNOVER_REQUIRED)),
            Some(Ok(0)) => Some(FieldError::new(
                self.field(),
                FieldErrorKind::OutOfRange,
                TURNOVER_POSITIVE,
            )),
            Some(Ok(_)) => None,
            Some(Err(_)) => Some(FieldError::new(
                self.field(),
                FieldErrorKind::OutOfRange,
                AMOUNT_TOO_LARGE,
            )),
        }
    }
}

/// Rule: an ownership category is chosen
pub struct OwnershipRule;

impl FieldRule for OwnershipRule {
    fn name(&self) -> &'static str {
        "ownership_required"
    }

    fn field(&self) -> Field {
        Field::Ownership
    }

    fn check(&self, form: &NormalizedForm) -> Option<FieldError> {
        form.ownership
            .is_none()
            .then(|| FieldError::new(self.field(), FieldErrorKind::Required, OWNERSHIP_REQUIRED))
    }
}

/// Rule: financed vehicles need a monthly payment
pub struct MonthlyPaymentRule;

impl FieldRule for MonthlyPaymentRule {
    fn name(&self) -> &'static str {
        "monthly_payment_required"
    }

    fn field(&self) -> Field {
        Field::MonthlyPayment
    }

    fn check(&self, form: &NormalizedForm) -> Option<FieldError> {
        let financed = form
            .ownership
            .map(|o| o.requires_monthly_payment())
            .unwrap_or(false);

        if !financed {
            return None;
        }

        match parse_amount(&form.monthly_payment) {
            None => Some(FieldError::new(
                self.field(),
                FieldErrorKind::Required,
                MONTHLY_PAYMENT_REQUIRED,
            )),
            Some(Ok(_)) => None,
            Some(Err(_)) => Some(FieldError::new(
                self.field(),
                FieldErrorKind::OutOfRange,
                AMOUNT_TOO_LARGE,
            )),
        }
    }
}

/// Rule: professional expenses present (zero is allowed)
pub struct ExpensesRule;

impl FieldRule for ExpensesRule {
    fn name(&self) -> &'static str {
        "expenses_required"
    }

    fn field(&self) -> Field {
        Field::Expenses
    }

    fn check(&self, form: &NormalizedForm) -> Option<FieldError> {
        match parse_amount(&form.expenses) {
            None => Some(FieldError::new(self.field(), FieldErrorKind::Required, EXPENSES_REQUIRED)),
            Some(Ok(_)) => None,
            Some(Err(_)) => Some(FieldError::new(
                self.field(),
                FieldErrorKind::OutOfRange,
                AMOUNT_TOO_LARGE,
            )),
        }
    }
}

/// Rule: email matches local@domain.tld
pub struct EmailRule;

impl FieldRule for EmailRule {
    fn name(&self) -> &'static str {
        "email_format"
    }

    fn field(&self) -> Field {
        Field::Email
    }

    fn check(&self, form: &NormalizedForm) -> Option<FieldError> {
        (!is_valid_email(&form.email))
            .then(|| FieldError::new(self.field(), FieldErrorKind::InvalidFormat, EMAIL_INVALID))
    }
}

/// Create a validator with the standard form rules
pub fn create_default_validator() -> InputValidator {
    let mut validator = InputValidator::new();
    validator.add_rule(Box::new(TurnoverRule));
    validator.add_rule(Box::new(OwnershipRule));
    validator.add_rule(Box::new(MonthlyPaymentRule));
    validator.add_rule(Box::new(ExpensesRule));
    validator.add_rule(Box::new(EmailRule));
    validator
}

//
// ================= Tests =================
//
