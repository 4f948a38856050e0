//! Route handlers for the exercise page and JSON endpoints.

use std::io::Write;

use axum::extract::{Multipart, State};
use axum::response::Html;
use axum::Json;
use axum_extra::extract::Form;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use cloze_exercise::{filter_recognized, judge, mask, AnswerKey, Verdict};

use crate::error::ApiError;
use crate::page::{self, PageView};
use crate::state::AppState;

/// Fields of the exercise creation form.
///
/// `pos_checkbox` repeats once per checked box, which is why these handlers
/// use `axum_extra`'s Form extractor instead of axum's.
#[derive(Debug, Deserialize)]
pub struct ExerciseForm {
    #[serde(default)]
    pub input_text: String,
    #[serde(default)]
    pub pos_checkbox: Vec<String>,
    pub transcription_text: Option<String>,
}

/// Fields posted by the recorder script after a transcription.
#[derive(Debug, Deserialize)]
pub struct JudgeForm {
    #[serde(default)]
    pub input_text: String,
    #[serde(default)]
    pub transcription_text: String,
    /// Serialized answer key from the page. Accepted for forward
    /// compatibility; judgment compares full texts and does not consult it.
    #[serde(default)]
    pub answer_key: String,
    #[serde(default)]
    pub pos_checkbox: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TranscribeResponse {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct JudgeResponse {
    pub is_correct: bool,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub uptime_secs: u64,
}

/// GET / - the empty exercise page.
pub async fn index() -> Html<String> {
    Html(page::render(&PageView::default()))
}

/// POST / - run the masking pipeline and re-render the page.
///
/// Submitting with no text or no checked tags is not an error; the page
/// comes back with the input preserved and no exercise.
pub async fn exercise(
    State(state): State<AppState>,
    Form(form): Form<ExerciseForm>,
) -> Result<Html<String>, ApiError> {
    let mut view = PageView {
        input_text: form.input_text.clone(),
        transcription: form.transcription_text.clone(),
        ..PageView::default()
    };

    let mask_set = filter_recognized(form.pos_checkbox.iter());
    if form.input_text.trim().is_empty() || mask_set.is_empty() {
        return Ok(Html(page::render(&view)));
    }

    let document = state.annotator.annotate(&form.input_text).await?;
    let exercise = mask(
        &document,
        &mask_set,
        state.config.masking.mask_contractions,
    );
    info!(
        tags = mask_set.len(),
        masked = exercise.answer_key.len(),
        "created exercise"
    );

    view.tagged_words = document
        .words()
        .map(|w| (w.text.clone(), w.tag.to_string()))
        .collect();
    view.dependencies = document.dependencies();
    view.masked_text = Some(exercise.text);
    view.answer_key = exercise.answer_key;
    view.verdict = Verdict::evaluate(&form.input_text, form.transcription_text.as_deref());

    Ok(Html(page::render(&view)))
}

/// POST /transcribe - accept a recorded audio file and return its
/// transcription.
///
/// The upload is spooled to a temp file for the speech engine and removed
/// when the handler returns, success or not.
pub async fn transcribe(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<TranscribeResponse>, ApiError> {
    let mut audio: Option<Vec<u8>> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        if field.name() == Some("audio") {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| ApiError::BadRequest(format!("failed to read audio field: {e}")))?;
            audio = Some(bytes.to_vec());
            break;
        }
    }

    let audio = audio.ok_or_else(|| ApiError::BadRequest("No audio file provided".to_string()))?;
    debug!(bytes = audio.len(), "received audio upload");

    let mut tmp = NamedTempFile::new()
        .map_err(|e| ApiError::Internal(format!("failed to create temp file: {e}")))?;
    tmp.write_all(&audio)
        .map_err(|e| ApiError::Internal(format!("failed to write temp file: {e}")))?;

    let transcription = state.speech.transcribe(tmp.path()).await.map_err(|e| {
        warn!(error = %e, "transcription failed");
        ApiError::Internal(e.to_string())
    })?;

    Ok(Json(TranscribeResponse {
        text: transcription.text,
    }))
}

/// POST /judge - compare the transcription against the original text.
pub async fn judge_answer(Form(form): Form<JudgeForm>) -> Json<JudgeResponse> {
    if !form.answer_key.is_empty() {
        match serde_json::from_str::<AnswerKey>(&form.answer_key) {
            Ok(key) => debug!(entries = key.len(), "answer key received"),
            Err(e) => debug!(error = %e, "ignoring malformed answer key"),
        }
    }

    let is_correct = judge(&form.input_text, &form.transcription_text);
    info!(is_correct, tags = form.pos_checkbox.len(), "judged answer");
    Json(JudgeResponse { is_correct })
}

/// GET /health - liveness probe.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
        uptime_secs: state.start_time.elapsed().as_secs(),
    })
}
