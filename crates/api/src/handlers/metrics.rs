//! Handlers for derived metrics and the AI insight summary.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use trener_ai::{ChatMessage, ChatRequest};
use trener_core::coach::{insight_prompt, INSIGHT_FALLBACK, INSIGHT_SYSTEM_PROMPT};
use trener_core::stats::{one_rep_maxes, weekly_comparison, WeeklyComparison};

use crate::coach::history::{chronological, last_two_weeks, user_context};
use crate::coach::today;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

const INSIGHT_TEMPERATURE: f32 = 0.8;
const INSIGHT_MAX_TOKENS: u32 = 200;

#[derive(Debug, Serialize)]
pub struct Insight {
    pub insight: String,
    /// False when the fallback text was returned.
    pub generated: bool,
    pub comparison: WeeklyComparison,
}

/// GET /metrics/one-rep-max
pub async fn get_one_rep_max(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let workouts = chronological(&state.pool).await?;
    Ok(Json(DataResponse {
        data: one_rep_maxes(&workouts),
    }))
}

/// GET /metrics/weekly-comparison
pub async fn get_weekly_comparison(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let today = today();
    let workouts = last_two_weeks(&state.pool, today).await?;
    Ok(Json(DataResponse {
        data: weekly_comparison(&workouts, today),
    }))
}

/// GET /metrics/insights
///
/// Model failures are answered with a fixed encouragement, never an error.
pub async fn get_insights(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let today = today();
    let workouts = last_two_weeks(&state.pool, today).await?;
    let comparison = weekly_comparison(&workouts, today);
    let context = user_context(&state.pool, today).await?;

    let request = ChatRequest::new(vec![
        ChatMessage::system(INSIGHT_SYSTEM_PROMPT),
        ChatMessage::user(insight_prompt(&context, &comparison)),
    ])
    .with_temperature(INSIGHT_TEMPERATURE)
    .with_max_tokens(INSIGHT_MAX_TOKENS);

    let generated = match state.llm.complete(&request).await {
        Ok(completion) => completion.text().map(str::to_string).ok(),
        Err(e) => {
            tracing::warn!(error = %e, "Insight generation failed");
            None
        }
    };

    Ok(Json(DataResponse {
        data: Insight {
            generated: generated.is_some(),
            insight: generated.unwrap_or_else(|| INSIGHT_FALLBACK.to_string()),
            comparison,
        },
    }))
}
