//! REST API Server for the take-home simulator
//!
//! Exposes validation and calculation via HTTP endpoints
//! Integrates with the simulator form UI

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::audit::short_fingerprint;
use crate::config::ServerConfig;
use crate::engine::CalculationEngine;
use crate::error::FieldErrors;
use crate::masking::{apply_mask, MaskedInput};
use crate::models::{CalculationResult, RawFormValues};
use crate::report::ResultView;
use crate::validation::{create_default_validator, InputValidator};

/// =============================
/// Request / Response Models
/// =============================

#[derive(Debug, Deserialize)]
pub struct MaskRequest {
    pub value: String,
    pub caret: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SimulationResponse {
    pub result: CalculationResult,
    pub view: ResultView,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse {
    pub success: bool,
    pub data: Option<serde_json::Value>,
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    pub timestamp: String,
}

impl ApiResponse {
    pub fn success<T: Serialize>(data: T) -> Self {
        Self {
            success: true,
            data: serde_json::to_value(data).ok(),
            error: None,
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
            errors: None,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn invalid(errors: FieldErrors) -> Self {
        Self {
            success: false,
            data: None,
            error: Some("Validation failed".to_string()),
            errors: Some(errors),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

/// =============================
/// API State
/// =============================

#[derive(Clone)]
pub struct ApiState {
    pub validator: Arc<InputValidator>,
    pub engine: CalculationEngine,
}

impl Default for ApiState {
    fn default() -> Self {
        Self {
            validator: Arc::new(create_default_validator()),
            engine: CalculationEngine::new(),
        }
    }
}

/// =============================
/// Health Endpoint
/// =============================

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// =============================
/// Simulation Endpoint
/// =============================

async fn simulate(
    State(state): State<ApiState>,
    Json(form): Json<RawFormValues>,
) -> (StatusCode, Json<ApiResponse>) {
    let request_id = uuid::Uuid::new_v4();

    let input = match state.validator.validate(&form) {
        Ok(input) => input,
        Err(errors) => {
            warn!(
                %request_id,
                error_count = errors.len(),
                first_field = ?errors.first().map(|e| e.field),
                "Simulation rejected"
            );
            return (StatusCode::UNPROCESSABLE_ENTITY, Json(ApiResponse::invalid(errors)));
        }
    };

    let result = state.engine.compute(&input);

    info!(
        %request_id,
        submission = %short_fingerprint(&input),
        vehicle_type = input.vehicle_type().as_str(),
        ownership = input.ownership().as_str(),
        restitution_percentage = result.restitution_percentage,
        "Simulation computed"
    );

    let view = ResultView::from(&result);
    (
        StatusCode::OK,
        Json(ApiResponse::success(SimulationResponse { result, view })),
    )
}

/// =============================
/// Mask Endpoint
/// =============================

async fn mask(Json(req): Json<MaskRequest>) -> Json<MaskedInput> {
    let caret = req.caret.unwrap_or_else(|| req.value.chars().count());
    Json(apply_mask(&req.value, caret))
}

/// =============================
/// Router
/// =============================

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health))
        .route("/api/simulate", post(simulate))
        .route("/api/mask", post(mask))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// =============================
/// Server Startup
/// =============================

pub async fn start_server(config: &ServerConfig) -> crate::Result<()> {
    let router = create_router(ApiState::default());
    let address = config.listen_address();

    let listener = tokio::net::TcpListener::bind(&address).await?;

    info!("API Server listening on http://{}", address);
    info!("Local: http://127.0.0.1:{}", config.port);

    axum::serve(listener, router).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    async fn post_json(uri: &str, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let router = create_router(ApiState::default());
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let router = create_router(ApiState::default());
        let request = Request::builder().uri("/health").body(Body::empty()).unwrap();

        let response = router.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_simulate_success() {
        let (status, body) = post_json(
            "/api/simulate",
            serde_json::json!({
                "turnover": "10 000",
                "expenses": "0",
                "vehicleType": "hybride",
                "ownership": "owner",
                "monthlyPayment": "",
                "email": "jane@example.com"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["data"]["result"]["restitutionPercentage"], 77);
        assert_eq!(body["data"]["result"]["mileageAllowance"], -4270.0);
        assert!(body["data"]["view"]["netSalary"].as_str().unwrap().ends_with('€'));
        assert!(body.get("errors").is_none());
    }

    #[tokio::test]
    async fn test_simulate_reports_field_errors() {
        let (status, body) = post_json(
            "/api/simulate",
            serde_json::json!({
                "turnover": "",
                "expenses": "500",
                "ownership": "leasing",
                "email": "jane@example.com"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["success"], false);

        let errors = body["errors"].as_array().unwrap();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0]["field"], "turnover");
        assert_eq!(errors[1]["field"], "monthlyPayment");
        assert_eq!(errors[1]["kind"], "required");
    }

    #[tokio::test]
    async fn test_mask_endpoint() {
        let (status, body) =
            post_json("/api/mask", serde_json::json!({ "value": "1234567" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["value"], "1\u{202f}234\u{202f}567");
        assert_eq!(body["caret"], 9);
    }
}
