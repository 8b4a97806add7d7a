use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;

use take_home_simulator::{
    audit::short_fingerprint, create_default_validator, report::ResultView, CalculationEngine,
    RawFormValues, SimulationError,
};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Form used when no JSON file is given
fn sample_form() -> RawFormValues {
    RawFormValues {
        turnover: "10 000".to_string(),
        expenses: "1 200".to_string(),
        vehicle_type: "hybride".to_string(),
        ownership: "leasing".to_string(),
        monthly_payment: "450".to_string(),
        email: "demo@example.com".to_string(),
    }
}

fn load_form(path: Option<String>) -> Result<RawFormValues, SimulationError> {
    match path {
        Some(path) => {
            let reader = BufReader::new(File::open(path)?);
            Ok(serde_json::from_reader(reader)?)
        }
        None => Ok(sample_form()),
    }
}

fn main() -> ExitCode {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let form = match load_form(std::env::args().nth(1)) {
        Ok(form) => form,
        Err(e) => {
            eprintln!("Could not read form: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let input = match create_default_validator().validate(&form) {
        Ok(input) => input,
        Err(errors) => {
            eprintln!("\n=== INVALID FORM ===");
            for error in errors.iter() {
                eprintln!("  {}: {}", error.field, error.message);
            }
            return ExitCode::FAILURE;
        }
    };

    info!(submission = %short_fingerprint(&input), "Running simulation");

    let result = CalculationEngine::new().compute(&input);
    let view = ResultView::from(&result);
    let b = &result.breakdown;

    println!("\n=== BREAKDOWN ===");
    println!("Gross revenue incl. VAT:  {:.2}", b.gross_revenue_incl_vat);
    println!("VAT due:                  {:.2}", b.vat_due);
    println!("Net revenue excl. VAT:    {:.2}", b.net_revenue_excl_vat);
    println!("Mileage allowance:        {:.2}", result.mileage_allowance);
    println!("Deductible VAT:           {:.2}", b.deductible_vat);
    println!("Meal allowance:           {:.2}", result.meal_allowance);
    println!("Gross salary before tax:  {:.2}", result.gross_salary_before_tax);
    println!("Work-unit equivalent:     {:.4}", b.work_unit_equivalent);

    println!("\n=== RESULT ===");
    for (label, value) in view.rows() {
        println!("  {}: {}", label, value);
    }
    println!("  {}", view.restitution);

    ExitCode::SUCCESS
}
