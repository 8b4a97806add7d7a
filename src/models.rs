//! Core data models for the take-home simulator

use serde::{Deserialize, Serialize};
use std::fmt;

//
// ================= Enums =================
//

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
pub enum VehicleType {
    #[serde(rename = "electrique", alias = "electric")]
    Electrique,
    #[default]
    #[serde(rename = "hybride", alias = "hybrid")]
    Hybride,
    #[serde(rename = "thermique", alias = "thermal")]
    Thermique,
}

impl VehicleType {
    pub const ALL: [VehicleType; 3] = [
        VehicleType::Electrique,
        VehicleType::Hybride,
        VehicleType::Thermique,
    ];

    /// Parse a form value; accepts the French form values and English aliases
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "electrique" | "électrique" | "electric" => Some(VehicleType::Electrique),
            "hybride" | "hybrid" => Some(VehicleType::Hybride),
            "thermique" | "thermal" => Some(VehicleType::Thermique),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleType::Electrique => "electrique",
            VehicleType::Hybride => "hybride",
            VehicleType::Thermique => "thermique",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            VehicleType::Electrique => "Électrique",
            VehicleType::Hybride => "Hybride",
            VehicleType::Thermique => "Thermique",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Ownership {
    Owner,
    Credit,
    Leasing,
}

impl Ownership {
    pub const ALL: [Ownership; 3] = [Ownership::Owner, Ownership::Credit, Ownership::Leasing];

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "owner" => Some(Ownership::Owner),
            "credit" => Some(Ownership::Credit),
            "leasing" => Some(Ownership::Leasing),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Ownership::Owner => "owner",
            Ownership::Credit => "credit",
            Ownership::Leasing => "leasing",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Ownership::Owner => "Propriétaire",
            Ownership::Credit => "Crédit véhicule (financement)",
            Ownership::Leasing => "Leasing / Location longue durée",
        }
    }

    /// Whether the monthly payment field is shown and mandatory
    pub fn requires_monthly_payment(&self) -> bool {
        matches!(self, Ownership::Credit | Ownership::Leasing)
    }

    /// Label and placeholder of the conditional payment field, if shown
    pub fn payment_field(&self) -> Option<PaymentField> {
        match self {
            Ownership::Owner => None,
            Ownership::Credit => Some(PaymentField {
                label: "Montant mensuel du crédit",
                placeholder: "300",
            }),
            Ownership::Leasing => Some(PaymentField {
                label: "Montant mensuel du leasing",
                placeholder: "450",
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct PaymentField {
    pub label: &'static str,
    pub placeholder: &'static str,
}

/// How the vehicle is held. Only financed vehicles carry a monthly payment.
#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(tag = "ownership", rename_all = "lowercase")]
pub enum VehicleFinancing {
    Owner,
    Credit {
        #[serde(rename = "monthlyPayment")]
        monthly_payment: f64,
    },
    Leasing {
        #[serde(rename = "monthlyPayment")]
        monthly_payment: f64,
    },
}

impl VehicleFinancing {
    pub fn new(ownership: Ownership, monthly_payment: f64) -> Self {
        match ownership {
            Ownership::Owner => VehicleFinancing::Owner,
            Ownership::Credit => VehicleFinancing::Credit { monthly_payment },
            Ownership::Leasing => VehicleFinancing::Leasing { monthly_payment },
        }
    }

    pub fn ownership(&self) -> Ownership {
        match self {
            VehicleFinancing::Owner => Ownership::Owner,
            VehicleFinancing::Credit { .. } => Ownership::Credit,
            VehicleFinancing::Leasing { .. } => Ownership::Leasing,
        }
    }

    pub fn monthly_payment(&self) -> f64 {
        match self {
            VehicleFinancing::Owner => 0.0,
            VehicleFinancing::Credit { monthly_payment }
            | VehicleFinancing::Leasing { monthly_payment } => *monthly_payment,
        }
    }
}

//
// ================= Form input =================
//

/// Field values exactly as the hosting UI collected them.
///
/// Amounts may still carry thousands separators or a currency sign.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFormValues {
    pub turnover: String,
    pub expenses: String,
    pub vehicle_type: String,
    pub ownership: String,
    pub monthly_payment: String,
    pub email: String,
}

impl Default for RawFormValues {
    fn default() -> Self {
        Self {
            turnover: String::new(),
            expenses: String::new(),
            vehicle_type: VehicleType::default().as_str().to_string(),
            ownership: String::new(),
            monthly_payment: String::new(),
            email: String::new(),
        }
    }
}

/// A validated submission. Only obtainable through the validator.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FinancialInput {
    turnover: f64,
    expenses: f64,
    vehicle_type: VehicleType,
    #[serde(flatten)]
    financing: VehicleFinancing,
    email: String,
}

impl FinancialInput {
    pub(crate) fn from_parts(
        turnover: f64,
        expenses: f64,
        vehicle_type: VehicleType,
        financing: VehicleFinancing,
        email: String,
    ) -> Self {
        Self {
            turnover,
            expenses,
            vehicle_type,
            financing,
            email,
        }
    }

    pub fn turnover(&self) -> f64 {
        self.turnover
    }

    pub fn expenses(&self) -> f64 {
        self.expenses
    }

    pub fn vehicle_type(&self) -> VehicleType {
        self.vehicle_type
    }

    pub fn financing(&self) -> VehicleFinancing {
        self.financing
    }

    pub fn ownership(&self) -> Ownership {
        self.financing.ownership()
    }

    /// Monthly vehicle payment; always zero for owners
    pub fn monthly_payment(&self) -> f64 {
        self.financing.monthly_payment()
    }

    pub fn email(&self) -> &str {
        &self.email
    }
}

//
// ================= Calculation output =================
//

/// Every intermediate quantity of the calculation, kept for audit
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalculationBreakdown {
    pub gross_revenue_incl_vat: f64,
    pub vat_due: f64,
    pub net_revenue_excl_vat: f64,
    pub mileage_coefficient: f64,
    pub vehicle_vat: f64,
    pub expenses_vat: f64,
    pub recoverable_vat_cap: f64,
    pub deductible_vat: f64,
    pub meal_ratio: f64,
    pub work_unit_equivalent: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CalculationResult {
    pub turnover: f64,
    pub net_salary: f64,
    pub net_salary_before_tax: f64,
    pub mileage_allowance: f64,
    pub meal_allowance: f64,
    pub paid_leave_allowance: f64,
    pub severance_allowance: f64,
    pub gross_salary_before_tax: f64,
    pub restitution_percentage: i64,
    pub breakdown: CalculationBreakdown,
}

impl fmt::Display for VehicleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl fmt::Display for Ownership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vehicle_type_wire_names() {
        let parsed: VehicleType = serde_json::from_str("\"electrique\"").unwrap();
        assert_eq!(parsed, VehicleType::Electrique);

        let alias: VehicleType = serde_json::from_str("\"thermal\"").unwrap();
        assert_eq!(alias, VehicleType::Thermique);

        assert_eq!(serde_json::to_string(&VehicleType::Hybride).unwrap(), "\"hybride\"");
        assert_eq!(VehicleType::default(), VehicleType::Hybride);
    }

    #[test]
    fn test_owner_carries_no_payment() {
        let financing = VehicleFinancing::new(Ownership::Owner, 450.0);
        assert_eq!(financing, VehicleFinancing::Owner);
        assert_eq!(financing.monthly_payment(), 0.0);

        let leasing = VehicleFinancing::new(Ownership::Leasing, 450.0);
        assert_eq!(leasing.ownership(), Ownership::Leasing);
        assert_eq!(leasing.monthly_payment(), 450.0);
    }

    #[test]
    fn test_payment_field_labels() {
        assert!(Ownership::Owner.payment_field().is_none());
        assert_eq!(
            Ownership::Credit.payment_field().map(|p| p.placeholder),
            Some("300")
        );
        assert_eq!(
            Ownership::Leasing.payment_field().map(|p| p.label),
            Some("Montant mensuel du leasing")
        );
    }

    #[test]
    fn test_raw_form_defaults_to_hybrid() {
        let raw: RawFormValues = serde_json::from_str(r#"{"turnover": "10 000"}"#).unwrap();
        assert_eq!(raw.turnover, "10 000");
        assert_eq!(raw.vehicle_type, "hybride");
        assert!(raw.ownership.is_empty());
    }
}
