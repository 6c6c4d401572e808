use axum::{
    body::Bytes,
    extract::{
        multipart::{MultipartError, MultipartRejection},
        Multipart, State,
    },
    http::StatusCode,
    Json,
};

use crate::dto::analysis::AnalyzeResponse;
use crate::errors::AppError;
use crate::services::keywords;
use crate::services::text_extract::{self, OCTET_STREAM_MIME};
use crate::state::AppState;

const RESUME_FIELD: &str = "resume";
const JOB_DESCRIPTION_FIELD: &str = "jobDescription";

const NO_RESUME: &str = "No resume file uploaded.";

/// The resume part of the upload. Lives in memory for the duration of the request.
#[derive(Debug)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: String,
    pub bytes: Bytes,
}

#[derive(Debug, Default)]
struct UploadForm {
    resume: Option<UploadedFile>,
    job_description: Option<String>,
}

#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/api/analyze",
    tag = "Analyze",
    request_body(content = crate::dto::analysis::AnalyzeForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, body = AnalyzeResponse),
        (status = 400, body = crate::errors::ErrorResponse),
        (status = 500, body = crate::errors::ErrorResponse),
    )
))]
pub async fn analyze(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalyzeResponse>, AppError> {
    // A body that is not multipart at all carries no resume.
    let multipart = multipart.map_err(|rejection| {
        tracing::debug!("Rejected non-multipart body: {}", rejection.body_text());
        AppError::Validation(NO_RESUME.to_string())
    })?;

    let max_upload_mb = state.config.server.max_upload_mb;
    let form = read_form(multipart, max_upload_mb).await?;

    let resume = form
        .resume
        .ok_or_else(|| AppError::Validation(NO_RESUME.to_string()))?;

    let job_description = form
        .job_description
        .filter(|jd| !jd.is_empty())
        .ok_or_else(|| AppError::Validation("No job description provided.".to_string()))?;

    let resume_text =
        text_extract::extract_text(resume.bytes.to_vec(), &resume.content_type, &resume.filename)
            .await?;

    let analysis = keywords::analyze(&resume_text, &job_description);
    tracing::info!(
        "Analyzed '{}': score {}, {} matching, {} missing keywords",
        resume.filename,
        analysis.score,
        analysis.matching_keywords.len(),
        analysis.missing_keywords.len()
    );

    let suggestions = state
        .suggestions
        .suggest(&resume_text, &job_description, &analysis.missing_keywords)
        .await?;

    Ok(Json(AnalyzeResponse::new(analysis, suggestions)))
}

async fn read_form(mut multipart: Multipart, max_upload_mb: usize) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| multipart_error(e, max_upload_mb))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            // Only a part sent as a file counts; a plain text `resume` value is ignored.
            Some(RESUME_FIELD) if form.resume.is_none() && field.file_name().is_some() => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or(OCTET_STREAM_MIME)
                    .to_string();

                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| multipart_error(e, max_upload_mb))?;

                form.resume = Some(UploadedFile {
                    filename,
                    content_type,
                    bytes,
                });
            }
            Some(JOB_DESCRIPTION_FIELD) => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| multipart_error(e, max_upload_mb))?;
                form.job_description = Some(text);
            }
            _ => {}
        }
    }

    Ok(form)
}

fn multipart_error(err: MultipartError, max_upload_mb: usize) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::Validation(format!(
            "File too large. Maximum size is {max_upload_mb} MB"
        ))
    } else {
        AppError::Validation(format!("Invalid multipart data: {}", err.body_text()))
    }
}
