//! Handlers for the LLM chat and the free-text set log.
//!
//! Neither surfaces model failures: the chat answers with a fallback reply
//! and the set log asks the user to rephrase.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use trener_ai::{ChatMessage, ChatRequest};
use trener_core::coach::CHAT_FALLBACK;
use trener_core::error::CoreError;
use trener_core::intent::detect_routine_request;
use trener_core::routine::{describe_routine, GenerateRoutineRequest};
use trener_core::set_parser::{
    logged_reply, parse_sets_reply, ChatWorkout, PARSER_PROMPT, REPHRASE_REPLY,
};
use trener_core::types::TrainingDate;
use trener_core::workout::Workout;
use trener_db::models::chat_workout::StoredChatWorkout;
use trener_db::models::workout::StoredWorkout;
use trener_db::repositories::{ChatWorkoutRepo, WorkoutRepo};

use crate::coach::conversation::{self, HistoryMessage};
use crate::coach::{routines, today};
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

const PARSER_TEMPERATURE: f32 = 0.1;
const PARSER_MAX_TOKENS: u32 = 300;

// ---------------------------------------------------------------------------
// POST /chat
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ChatInput {
    pub message: String,
    #[serde(default)]
    pub history: Vec<HistoryMessage>,
}

#[derive(Debug, Serialize)]
pub struct ChatReply {
    pub reply: String,
    /// Suggested client action, `start_workout` after a routine.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub action: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub routine: Option<Workout>,
}

impl ChatReply {
    fn text(reply: String) -> Self {
        Self {
            reply,
            action: None,
            routine: None,
        }
    }
}

async fn converse(state: &AppState, input: &ChatInput, today: TrainingDate) -> AppResult<ChatReply> {
    if let Some(ask) = detect_routine_request(&input.message) {
        tracing::info!(kind = ask.kind, duration_min = ask.duration_min, "Routine requested from chat");
        let req = GenerateRoutineRequest::from_chat(ask.kind, ask.duration_min, ask.level);
        let routine = routines::generate(&state.pool, state.llm.as_ref(), &req, today).await?;
        return Ok(ChatReply {
            reply: describe_routine(&routine),
            action: Some("start_workout"),
            routine: Some(routine),
        });
    }

    let reply = conversation::answer(state, &input.message, &input.history, today).await?;
    Ok(ChatReply::text(reply))
}

pub async fn chat(State(state): State<AppState>, Json(input): Json<ChatInput>) -> impl IntoResponse {
    let reply = match converse(&state, &input, today()).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!(error = %e, "Chat failed");
            ChatReply::text(CHAT_FALLBACK.to_string())
        }
    };
    Json(DataResponse { data: reply })
}

// ---------------------------------------------------------------------------
// /chat/log
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct LogInput {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct LogReply {
    pub reply: String,
    pub logged: bool,
    /// The chat-logged workout after this message, when something was logged.
    pub workout: Option<StoredChatWorkout>,
}

impl LogReply {
    fn not_logged(reply: &str) -> Self {
        Self {
            reply: reply.to_string(),
            logged: false,
            workout: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct CurrentChatWorkout {
    pub active: bool,
    pub workout: Option<StoredChatWorkout>,
}

#[derive(Debug, Serialize)]
pub struct DiscardResult {
    pub deleted: u64,
}

/// POST /chat/log
pub async fn log_sets(
    State(state): State<AppState>,
    Json(input): Json<LogInput>,
) -> AppResult<impl IntoResponse> {
    let request = ChatRequest::new(vec![
        ChatMessage::system(PARSER_PROMPT),
        ChatMessage::user(&input.message),
    ])
    .with_temperature(PARSER_TEMPERATURE)
    .with_max_tokens(PARSER_MAX_TOKENS);

    let raw = match state.llm.complete(&request).await {
        Ok(completion) => completion.content.unwrap_or_default(),
        Err(e) => {
            tracing::error!(error = %e, "Set parser request failed");
            return Ok(Json(DataResponse {
                data: LogReply::not_logged(CHAT_FALLBACK),
            }));
        }
    };

    let parsed = match parse_sets_reply(&raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            tracing::info!(error = %e, "Set parser reply not understood");
            return Ok(Json(DataResponse {
                data: LogReply::not_logged(REPHRASE_REPLY),
            }));
        }
    };

    let open = ChatWorkoutRepo::find_open(&state.pool).await?;
    let (id, mut workout) = match open {
        Some(stored) => (Some(stored.id), stored.workout),
        None => (None, ChatWorkout::new(Utc::now())),
    };
    let total = workout.add(&parsed).sets;

    let stored = match id {
        Some(id) => ChatWorkoutRepo::save(&state.pool, id, &workout).await?,
        None => ChatWorkoutRepo::create(&state.pool, &workout).await?,
    };
    tracing::info!(
        id = stored.id,
        exercise = %parsed.exercise,
        sets = parsed.sets.len(),
        "Sets logged from chat"
    );

    Ok(Json(DataResponse {
        data: LogReply {
            reply: logged_reply(&parsed, total),
            logged: true,
            workout: Some(stored),
        },
    }))
}

/// GET /chat/log
pub async fn get_chat_workout(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let workout = ChatWorkoutRepo::find_open(&state.pool).await?;
    Ok(Json(DataResponse {
        data: CurrentChatWorkout {
            active: workout.is_some(),
            workout,
        },
    }))
}

/// POST /chat/log/finish
///
/// Persists the chat-logged workout as a regular workout and closes it.
pub async fn finish_chat_workout(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let mut open = ChatWorkoutRepo::find_open(&state.pool)
        .await?
        .ok_or_else(|| CoreError::Missing("No workout is being logged from chat".into()))?;

    let workout = open.workout.to_workout(Utc::now());
    open.workout.completed = true;
    ChatWorkoutRepo::save(&state.pool, open.id, &open.workout).await?;
    let record: StoredWorkout = WorkoutRepo::create(&state.pool, &workout).await?;
    tracing::info!(
        chat_id = open.id,
        workout_id = record.id,
        sets = open.workout.total_sets(),
        "Chat workout finished"
    );
    Ok(Json(DataResponse { data: record }))
}

/// DELETE /chat/log
pub async fn discard_chat_workout(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let deleted = ChatWorkoutRepo::delete_open(&state.pool).await?;
    tracing::info!(deleted, "Chat workout discarded");
    Ok(Json(DataResponse {
        data: DiscardResult { deleted },
    }))
}
