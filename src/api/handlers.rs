use std::future::Future;
use std::time::Duration;

use actix_web::http::header::{HeaderValue, CONTENT_DISPOSITION, CONTENT_TYPE};
use actix_web::{web, HttpRequest, HttpResponse};

use crate::generators::attachment_filename;
use crate::models::{EnhanceRequest, EnhanceResponse, ExportRequest, GenerateRequest, DOCX_MIME_TYPE};
use super::error::{ApiError, ApiResult};
use super::state::ApiState;

/// Export report text as a `.docx` download
pub async fn export_docx(
    data: web::Json<ExportRequest>,
    state: web::Data<ApiState>,
) -> ApiResult<HttpResponse> {
    let ExportRequest { report, title } = data.into_inner();
    let filename = attachment_filename(&title);

    let bytes = state.exporter.generate(report).await.map_err(|e| {
        tracing::error!("Failed to generate document: {:?}", e);
        ApiError::internal_server_error(format!("Failed to generate document: {}", e))
    })?;

    let disposition = HeaderValue::from_bytes(format!("attachment; filename=\"{}\"", filename).as_bytes())
        .map_err(|e| ApiError::internal_server_error(format!("Failed to generate document: {}", e)))?;

    tracing::info!(%filename, size = bytes.len(), "Document exported");

    Ok(HttpResponse::Ok()
        .insert_header((CONTENT_TYPE, DOCX_MIME_TYPE))
        .insert_header((CONTENT_DISPOSITION, disposition))
        .body(bytes))
}

/// Enhance a short idea into a detailed prompt for a template
pub async fn enhance_prompt(
    req: HttpRequest,
    data: web::Json<EnhanceRequest>,
    state: web::Data<ApiState>,
) -> ApiResult<HttpResponse> {
    check_rate_limit(&req, &state)?;

    let enhancer = state.enhancer.clone();
    let request = data.into_inner();
    let enhanced_prompt = with_deadline("Prompt enhancement", state.config.enhancer.timeout, async move {
        enhancer.enhance(&request).await.map_err(ApiError::from)
    })
    .await?;

    Ok(HttpResponse::Ok().json(EnhanceResponse { enhanced_prompt }))
}

/// Generate a full report, falling back across models
pub async fn generate_report(
    req: HttpRequest,
    data: web::Json<GenerateRequest>,
    state: web::Data<ApiState>,
) -> ApiResult<HttpResponse> {
    check_rate_limit(&req, &state)?;

    // Reject bad input before spending any of the deadline.
    let spec = data.validate()?;

    let generator = state.generator.clone();
    let result = with_deadline("Report generation", state.config.generator.timeout, async move {
        generator.generate_spec(&spec).await.map_err(ApiError::from)
    })
    .await?;

    tracing::info!(model = %result.model, pages = result.pages, words = result.word_count, "Report generated");

    Ok(HttpResponse::Ok().json(result))
}

pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy"
    }))
}

pub async fn metrics_endpoint() -> ApiResult<HttpResponse> {
    let buffer = crate::metrics::render()
        .map_err(|e| ApiError::internal_server_error(format!("Failed to encode metrics: {}", e)))?;

    Ok(HttpResponse::Ok()
        .content_type("text/plain; version=0.0.4")
        .body(buffer))
}

// Helper functions

/// Keyed on the socket peer address; forwarding headers are client supplied
/// and not trusted here.
fn check_rate_limit(req: &HttpRequest, state: &ApiState) -> ApiResult<()> {
    let key = req
        .peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    state.rate_limiter.retain_recent();
    if state.rate_limiter.check_key(&key).is_err() {
        tracing::warn!(client = %key, "Rate limit exceeded");
        return Err(ApiError::too_many_requests());
    }
    Ok(())
}

async fn with_deadline<T, F>(operation: &str, limit: Duration, fut: F) -> ApiResult<T>
where
    F: Future<Output = ApiResult<T>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::error!(operation, ?limit, "Handling time ceiling reached");
            Err(ApiError::internal_server_error(format!(
                "{} timed out after {:?}",
                operation, limit
            )))
        }
    }
}
