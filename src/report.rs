//! Presentation of calculation results
//!
//! Turns the numeric result into the strings the results screen shows.
//! The engine never formats; only this module does.

use crate::masking::group_thousands;
use crate::models::CalculationResult;
use serde::{Deserialize, Serialize};

/// fr-FR currency: "12 345,68 €" (narrow no-break group separator,
/// no-break space before the symbol)
pub fn format_euro(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let negative = value < 0.0 && fixed.chars().any(|c| c.is_ascii_digit() && c != '0');
    let sign = if negative { "-" } else { "" };

    format!("{sign}{},{frac_part}\u{a0}€", group_thousands(int_part))
}

/// Human-readable percentage line under the headline amount
pub fn format_restitution(percentage: i64) -> String {
    format!("{percentage}\u{a0}% de restitution")
}

/// Formatted result as rendered on the results screen.
///
/// Deductions are shown as positive amounts.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResultView {
    pub net_salary: String,
    pub restitution: String,
    pub net_salary_before_tax: String,
    pub mileage_allowance: String,
    pub meal_allowance: String,
    pub paid_leave_allowance: String,
    pub severance_allowance: String,
}

impl From<&CalculationResult> for ResultView {
    fn from(result: &CalculationResult) -> Self {
        Self {
            net_salary: format_euro(result.net_salary),
            restitution: format_restitution(result.restitution_percentage),
            net_salary_before_tax: format_euro(result.net_salary_before_tax),
            mileage_allowance: format_euro(result.mileage_allowance.abs()),
            meal_allowance: format_euro(result.meal_allowance.abs()),
            paid_leave_allowance: format_euro(result.paid_leave_allowance),
            severance_allowance: format_euro(result.severance_allowance),
        }
    }
}

impl ResultView {
    /// Label/value rows in display order
    pub fn rows(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("Salaire net avant impôts", self.net_salary_before_tax.as_str()),
            ("Indemnités kilométriques", self.mileage_allowance.as_str()),
            ("Indemnités repas", self.meal_allowance.as_str()),
            ("Indemnités congés payés", self.paid_leave_allowance.as_str()),
            ("Indemnités rupture conventionnelle", self.severance_allowance.as_str()),
            ("Salaire net", self.net_salary.as_str()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::masking::GROUP_SEPARATOR;
    use crate::models::CalculationBreakdown;

    fn plain_amount(formatted: &str) -> String {
        formatted
            .chars()
            .filter(|c| *c != GROUP_SEPARATOR && *c != '\u{a0}')
            .collect()
    }

    #[test]
    fn test_format_euro() {
        assert_eq!(plain_amount(&format_euro(7744.233071841454)), "7744,23€");
        assert_eq!(plain_amount(&format_euro(1234567.0)), "1234567,00€");
        assert_eq!(plain_amount(&format_euro(-485.3)), "-485,30€");
        assert_eq!(plain_amount(&format_euro(0.0)), "0,00€");
        assert_eq!(plain_amount(&format_euro(-0.001)), "0,00€");
        assert_eq!(format_euro(12500.0), "12\u{202f}500,00\u{a0}€");
    }

    #[test]
    fn test_view_shows_deductions_as_positive() {
        let result = CalculationResult {
            turnover: 10000.0,
            net_salary: 7744.233071841454,
            net_salary_before_tax: 2591.8792320396365,
            mileage_allowance: -4270.0,
            meal_allowance: -485.3,
            paid_leave_allowance: 328.1208815028901,
            severance_allowance: 68.9329582989265,
            gross_salary_before_tax: 3816.1285714285705,
            restitution_percentage: 77,
            breakdown: CalculationBreakdown {
                gross_revenue_incl_vat: 0.0,
                vat_due: 0.0,
                net_revenue_excl_vat: 0.0,
                mileage_coefficient: 0.427,
                vehicle_vat: 0.0,
                expenses_vat: 0.0,
                recoverable_vat_cap: 0.0,
                deductible_vat: 0.0,
                meal_ratio: 100.0,
                work_unit_equivalent: 0.0,
            },
        };

        let view = ResultView::from(&result);
        assert_eq!(plain_amount(&view.mileage_allowance), "4270,00€");
        assert_eq!(plain_amount(&view.meal_allowance), "485,30€");
        assert_eq!(plain_amount(&view.net_salary), "7744,23€");
        assert_eq!(view.restitution, "77\u{a0}% de restitution");
        assert_eq!(view.rows().len(), 6);
    }
}
