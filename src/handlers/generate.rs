use actix_web::{HttpResponse, web};

use crate::error::AppError;
use crate::models::GenerateRequest;
use crate::services::ContentService;

/// POST /api/content/generate
///
/// Runs the full generation flow for one event description. Validation
/// failures come back as 400s before any provider call; provider faults are
/// reported per half inside a 200 response so the surviving half still
/// renders.
pub async fn generate_content(
    service: web::Data<ContentService>,
    payload: web::Json<GenerateRequest>,
) -> Result<HttpResponse, AppError> {
    let response = service.generate(payload.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}
