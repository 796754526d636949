//! POST /bot/query: the keyword bot.
//!
//! Intents are matched on keywords with no model involved. Failures are
//! answered as a reply with intent `error` and HTTP 200.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use trener_core::intent::{detect_bot_intent, suggested_type, BotIntent};
use trener_core::messages;
use trener_core::stats::{general_stats, personal_records, week_summary, TOP_RECORDS};
use trener_core::types::TrainingDate;
use trener_db::repositories::WorkoutRepo;

use crate::coach::history::{chronological, current_streak, evaluate_profile, last_two_weeks};
use crate::coach::today;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

const ERROR_REPLY: &str = "Sorry, I had a problem processing your question. Please try again.";

#[derive(Debug, Deserialize)]
pub struct BotQuery {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct BotReply {
    pub reply: String,
    pub intent: &'static str,
    pub data: Value,
}

async fn respond(state: &AppState, message: &str, today: TrainingDate) -> AppResult<BotReply> {
    let intent = detect_bot_intent(message);
    let (reply, data) = match intent {
        BotIntent::WeekSummary => {
            let workouts = last_two_weeks(&state.pool, today).await?;
            let week = week_summary(&workouts, today);
            (messages::week_summary_reply(&week), json!(week))
        }
        BotIntent::Streak => {
            let streak = current_streak(&state.pool, today).await?;
            (messages::streak_reply(&streak), json!(streak))
        }
        BotIntent::PersonalRecords => {
            let workouts = chronological(&state.pool).await?;
            let records = personal_records(&workouts, TOP_RECORDS);
            (messages::records_reply(&records), json!(records))
        }
        BotIntent::LastWorkout => {
            let last = WorkoutRepo::latest(&state.pool).await?;
            (
                messages::last_workout_reply(last.as_ref().map(|s| &s.workout)),
                json!(last),
            )
        }
        BotIntent::Stats => {
            let workouts = chronological(&state.pool).await?;
            let stats = general_stats(&workouts);
            (messages::stats_reply(&stats), json!(stats))
        }
        BotIntent::GenerateRoutine => {
            let kind = suggested_type(message);
            (
                messages::generate_hint_reply(kind),
                json!({ "suggested_type": kind }),
            )
        }
        BotIntent::Gamification => {
            let profile = evaluate_profile(&state.pool, today).await?;
            (messages::gamification_reply(&profile), json!(profile))
        }
        BotIntent::Help => (messages::HELP_REPLY.to_string(), Value::Null),
    };

    Ok(BotReply {
        reply,
        intent: intent.as_str(),
        data,
    })
}

pub async fn query_bot(
    State(state): State<AppState>,
    Json(input): Json<BotQuery>,
) -> impl IntoResponse {
    let answer = match respond(&state, &input.message, today()).await {
        Ok(reply) => {
            tracing::debug!(intent = reply.intent, "Bot query answered");
            reply
        }
        Err(e) => {
            tracing::error!(error = %e, "Bot query failed");
            BotReply {
                reply: ERROR_REPLY.to_string(),
                intent: "error",
                data: Value::Null,
            }
        }
    };
    Json(DataResponse { data: answer })
}
