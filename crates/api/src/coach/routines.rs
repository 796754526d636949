//! AI routine generation.

use trener_ai::{AiError, ChatMessage, ChatRequest, LlmClient};
use trener_core::routine::{
    build_prompt, parse_routine, GenerateRoutineRequest, CONTEXT_WORKOUTS, SYSTEM_PROMPT,
};
use trener_core::types::TrainingDate;
use trener_core::workout::Workout;
use trener_db::DbPool;

use crate::coach::history::{suggester, suggestion_history};
use crate::error::{AppError, AppResult};

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 1500;

/// Ask the model for a routine and fill its weights from history. The
/// routine is returned, not stored.
pub async fn generate(
    pool: &DbPool,
    llm: &dyn LlmClient,
    req: &GenerateRoutineRequest,
    today: TrainingDate,
) -> AppResult<Workout> {
    let history = suggestion_history(pool).await?;
    let context_len = usize::try_from(CONTEXT_WORKOUTS).unwrap_or(0).min(history.len());
    let prompt = build_prompt(req, &history[..context_len], today);

    let request = ChatRequest::new(vec![
        ChatMessage::system(SYSTEM_PROMPT),
        ChatMessage::user(prompt),
    ])
    .with_temperature(TEMPERATURE)
    .with_max_tokens(MAX_TOKENS);
    let completion = llm.complete(&request).await?;

    // Undecodable routines surface as upstream failures (502).
    let routine = parse_routine(completion.text()?, req, today, suggester(&history))
        .map_err(|e| AppError::Ai(AiError::InvalidResponse(e.to_string())))?;
    tracing::info!(
        kind = %routine.kind,
        exercises = routine.exercises.len(),
        "Routine generated"
    );
    Ok(routine)
}
