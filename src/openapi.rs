use utoipa::OpenApi;

use crate::dto::analysis::{AnalyzeForm, AnalyzeResponse};
use crate::errors::ErrorResponse;
use crate::routes::health::HealthResponse;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Resume Analyzer API",
        version = "0.1.0",
        description = "Keyword match scoring and rewrite suggestions for a resume against a job description."
    ),
    paths(
        crate::routes::health::health_check,
        crate::routes::analyze::analyze,
    ),
    components(
        schemas(
            AnalyzeForm, AnalyzeResponse,
            HealthResponse,
            // Errors
            ErrorResponse,
        )
    ),
    tags(
        (name = "Health", description = "Health check"),
        (name = "Analyze", description = "Resume analysis against a job description"),
    )
)]
pub struct ApiDoc;
