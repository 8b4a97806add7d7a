//! Calculation engine for take-home pay
//!
//! Single-pass, deterministic transformation of a validated input.
//! No I/O, no shared state.

use crate::models::{
    CalculationBreakdown, CalculationResult, FinancialInput, Ownership, VehicleType,
};
use tracing::debug;

/// Declared turnover is this share of the VAT-inclusive gross revenue
pub const GROSS_REVENUE_DIVISOR: f64 = 0.7;
pub const VAT_DUE_RATE: f64 = 0.10;
pub const DEDUCTIBLE_VAT_RATE: f64 = 0.20;
pub const RECOVERABLE_VAT_CAP_RATE: f64 = 0.20;

pub const ELECTRIC_MILEAGE_COEFFICIENT: f64 = 0.51240;
pub const DEFAULT_MILEAGE_COEFFICIENT: f64 = 0.427;

pub const MEAL_RATIO_DIVISOR: f64 = 100.0;
pub const MEAL_DAY_CAP: f64 = 23.0;
pub const MEAL_DAY_RATE: f64 = 21.1;

pub const WORK_UNIT_DIVISOR: f64 = 13.84;
pub const NET_SALARY_PER_WORK_UNIT: f64 = 9.40;
pub const PAID_LEAVE_PER_WORK_UNIT: f64 = 1.19;
pub const SEVERANCE_PER_WORK_UNIT: f64 = 0.25;

/// Mileage coefficient by vehicle type
const MILEAGE_COEFFICIENTS: &[(VehicleType, f64)] = &[
    (VehicleType::Electrique, ELECTRIC_MILEAGE_COEFFICIENT),
    (VehicleType::Hybride, DEFAULT_MILEAGE_COEFFICIENT),
    (VehicleType::Thermique, DEFAULT_MILEAGE_COEFFICIENT),
];

pub fn mileage_coefficient(vehicle_type: VehicleType) -> f64 {
    MILEAGE_COEFFICIENTS
        .iter()
        .find(|(kind, _)| *kind == vehicle_type)
        .map(|(_, coefficient)| *coefficient)
        .unwrap_or(DEFAULT_MILEAGE_COEFFICIENT)
}

/// VAT recoverable on the vehicle's monthly payment.
///
/// Credit-financed vehicles recover nothing; only leasing does.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum VatRule {
    None,
    Rate(f64),
}

const VAT_RULES: &[(Ownership, VatRule)] = &[
    (Ownership::Owner, VatRule::None),
    (Ownership::Credit, VatRule::None),
    (Ownership::Leasing, VatRule::Rate(DEDUCTIBLE_VAT_RATE)),
];

impl VatRule {
    pub fn for_ownership(ownership: Ownership) -> Self {
        VAT_RULES
            .iter()
            .find(|(kind, _)| *kind == ownership)
            .map(|(_, rule)| *rule)
            .unwrap_or(VatRule::None)
    }

    pub fn apply(&self, monthly_payment: f64) -> f64 {
        match self {
            VatRule::None => 0.0,
            VatRule::Rate(rate) => monthly_payment * rate,
        }
    }
}

/// Round to the nearest integer, halves towards positive infinity
pub fn round_half_up(value: f64) -> i64 {
    (value + 0.5).floor() as i64
}

/// Computes take-home pay from a validated input
#[derive(Debug, Clone, Copy, Default)]
pub struct CalculationEngine;

impl CalculationEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn compute(&self, input: &FinancialInput) -> CalculationResult {
        let turnover = input.turnover();

        // 1. Gross / VAT decomposition
        let gross_revenue_incl_vat = turnover / GROSS_REVENUE_DIVISOR;
        let vat_due = -(gross_revenue_incl_vat * VAT_DUE_RATE);
        let net_revenue_excl_vat = turnover + vat_due;

        debug!(
            turnover,
            gross_revenue_incl_vat, vat_due, net_revenue_excl_vat, "Revenue decomposed"
        );

        // 2. Mileage allowance (deduction)
        let coefficient = mileage_coefficient(input.vehicle_type());
        let mileage_allowance = -(coefficient * turnover);

        debug!(
            vehicle_type = %input.vehicle_type(),
            coefficient, mileage_allowance, "Mileage allowance"
        );

        // 3. Deductible VAT
        let vehicle_vat = VatRule::for_ownership(input.ownership()).apply(input.monthly_payment());
        let expenses_vat = input.expenses() * DEDUCTIBLE_VAT_RATE;
        let recoverable_vat_cap = gross_revenue_incl_vat * RECOVERABLE_VAT_CAP_RATE;
        let deductible_vat = (vehicle_vat + expenses_vat).min(recoverable_vat_cap);

        debug!(
            ownership = input.ownership().as_str(),
            vehicle_vat, expenses_vat, recoverable_vat_cap, deductible_vat, "Deductible VAT"
        );

        // 4. Meal allowance (deduction), capped at MEAL_DAY_CAP days
        let meal_ratio = turnover / MEAL_RATIO_DIVISOR;
        let meal_allowance = if meal_ratio < MEAL_DAY_CAP {
            -(meal_ratio * MEAL_DAY_RATE)
        } else {
            -(MEAL_DAY_CAP * MEAL_DAY_RATE)
        };

        debug!(meal_ratio, meal_allowance, "Meal allowance");

        // 5. Gross salary before tax
        let gross_salary_before_tax =
            net_revenue_excl_vat + mileage_allowance + deductible_vat + meal_allowance;

        // 6. Work-unit equivalent
        let work_unit_equivalent = gross_salary_before_tax / WORK_UNIT_DIVISOR;
        let net_salary_before_tax = work_unit_equivalent * NET_SALARY_PER_WORK_UNIT;

        // 7. Allowances; the step 5 deductions come back as benefits
        let paid_leave_allowance = work_unit_equivalent * PAID_LEAVE_PER_WORK_UNIT;
        let severance_allowance = work_unit_equivalent * SEVERANCE_PER_WORK_UNIT;
        let net_salary = net_salary_before_tax
            + mileage_allowance.abs()
            + meal_allowance.abs()
            + paid_leave_allowance
            + severance_allowance;

        // 8. Restitution percentage; zero turnover has nothing to restitute
        let restitution_percentage = if turnover == 0.0 {
            0
        } else {
            round_half_up(net_salary / turnover * 100.0)
        };

        debug!(
            gross_salary_before_tax,
            work_unit_equivalent,
            net_salary_before_tax,
            paid_leave_allowance,
            severance_allowance,
            net_salary,
            restitution_percentage,
            "Net salary computed"
        );

        CalculationResult {
            turnover,
            net_salary,
            net_salary_before_tax,
            mileage_allowance,
            meal_allowance,
            paid_leave_allowance,
            severance_allowance,
            gross_salary_before_tax,
            restitution_percentage,
            breakdown: CalculationBreakdown {
                gross_revenue_incl_vat,
                vat_due,
                net_revenue_excl_vat,
                mileage_coefficient: coefficient,
                vehicle_vat,
                expenses_vat,
                recoverable_vat_cap,
                deductible_vat,
                meal_ratio,
                work_unit_equivalent,
            },
        }
    }
}

//
// ================= Tests =================
//
