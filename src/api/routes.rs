//! HTTP route handlers for Axum.

use askama::Template;
use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};
use indexmap::IndexMap;
use serde_json::Value;
use tracing::{info, instrument, warn};

use super::{
    error::ApiError,
    types::{AnalysisDto, AnalysisQuery, EmailForm, MessageBody, SubmitResponse},
    views::{EmailFormPage, EmailSentPage, IndexPage, ResultsPage},
    AppState,
};
use crate::{
    model::{OverallStatus, Submission},
    nlp::split_sentences,
    report::{self, render_pdf},
};

type ApiResult<T> = Result<T, ApiError>;

const NOT_COMPLETE: &str = "Analysis not yet complete.";
const PROCESSING_ERROR: &str = "Processing error.";

pub async fn index() -> ApiResult<Html<String>> {
    Ok(Html(IndexPage.render()?))
}

/// Extract the `sentence` field from a loosely typed JSON body.
pub fn submitted_text(payload: Result<Json<Value>, JsonRejection>) -> ApiResult<String> {
    let Json(body) = payload.map_err(|_| ApiError::InvalidInput)?;
    let object = body.as_object().filter(|o| !o.is_empty()).ok_or(ApiError::InvalidInput)?;
    match object.get("sentence") {
        None | Some(Value::Null) => Err(ApiError::EmptyText),
        Some(Value::String(text)) if text.trim().is_empty() => Err(ApiError::EmptyText),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(_) => Err(ApiError::InvalidInput),
    }
}

#[instrument(skip_all)]
pub async fn submit_sentence(
    State(state): State<AppState>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Json<SubmitResponse>> {
    let text = submitted_text(payload)?;
    let doc = Submission::pending(split_sentences(&text));
    let request_id = doc.request_id.clone();
    let sentences = doc.sentences.len();
    state.store.insert(&doc).await.map_err(ApiError::Insert)?;
    info!(%request_id, sentences, "submission stored");
    Ok(Json(SubmitResponse { request_id }))
}

#[instrument(skip(state))]
pub async fn get_analysis(
    State(state): State<AppState>,
    Query(query): Query<AnalysisQuery>,
) -> ApiResult<Response> {
    let Some(request_id) = query.request_id else {
        return Err(ApiError::AnalysisNotFound);
    };
    let doc = state
        .store
        .find_by_request_id(&request_id)
        .await
        .map_err(ApiError::Query)?
        .ok_or(ApiError::AnalysisNotFound)?;

    match doc.overall_status {
        OverallStatus::Pending => Ok((
            StatusCode::ACCEPTED,
            Json(MessageBody {
                message: NOT_COMPLETE.to_string(),
            }),
        )
            .into_response()),
        OverallStatus::Error => Err(ApiError::ProcessingFailed(
            doc.error_message
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| PROCESSING_ERROR.to_string()),
        )),
        OverallStatus::Processed => Ok(Json(AnalysisDto::from(doc)).into_response()),
    }
}

#[instrument(skip(state))]
pub async fn emotion_intensity(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> ApiResult<Json<IndexMap<String, f64>>> {
    let doc = state
        .store
        .find_by_request_id(&request_id)
        .await
        .map_err(ApiError::Query)?
        .ok_or(ApiError::DocumentNotFound)?;
    Ok(Json(report::emotion_intensity(&doc)))
}

/// Fetch a processed submission for the page endpoints.
async fn processed(state: &AppState, request_id: &str) -> ApiResult<Submission> {
    state
        .store
        .find_by_request_id(request_id)
        .await
        .map_err(ApiError::Query)?
        .filter(Submission::is_processed)
        .ok_or(ApiError::ResultsUnavailable)
}

#[instrument(skip(state))]
pub async fn view_results(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> ApiResult<Html<String>> {
    let doc = processed(&state, &request_id).await?;
    Ok(Html(ResultsPage::from_submission(&doc).render()?))
}

#[instrument(skip(state))]
pub async fn email_form(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
) -> ApiResult<Html<String>> {
    let doc = processed(&state, &request_id).await?;
    Ok(Html(
        EmailFormPage {
            request_id: doc.request_id,
        }
        .render()?,
    ))
}

#[instrument(skip(state, form))]
pub async fn send_pdf(
    State(state): State<AppState>,
    Path(request_id): Path<String>,
    form: Result<Form<EmailForm>, FormRejection>,
) -> ApiResult<Html<String>> {
    let doc = processed(&state, &request_id).await?;
    let email = form
        .ok()
        .and_then(|Form(form)| form.email)
        .map(|e| e.trim().to_string())
        .filter(|e| !e.is_empty())
        .ok_or(ApiError::EmailRequired)?;

    let pdf = render_pdf(&doc)?;
    if let Err(err) = state.mailer.send_report(&email, pdf).await {
        warn!(%request_id, %err, "report email failed");
        return Err(err.into());
    }
    info!(%request_id, "report sent");
    Ok(Html(
        EmailSentPage {
            request_id: doc.request_id,
            email,
        }
        .render()?,
    ))
}
