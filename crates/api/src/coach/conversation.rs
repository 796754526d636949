//! The tool-calling chat loop.

use serde::Deserialize;
use trener_ai::{AiError, ChatMessage, ChatRequest};
use trener_core::coach::{chat_system_prompt, MAX_HISTORY_MESSAGES, MAX_TOOL_ROUNDS};
use trener_core::types::TrainingDate;

use crate::coach::history::user_context;
use crate::coach::tools;
use crate::error::AppResult;
use crate::state::AppState;

const TEMPERATURE: f32 = 0.7;
const MAX_TOKENS: u32 = 800;

/// A previous turn sent by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryMessage {
    pub role: String,
    pub content: String,
}

/// Only user and assistant turns are forwarded, at most the last
/// [`MAX_HISTORY_MESSAGES`].
fn forwarded_history(history: &[HistoryMessage]) -> Vec<ChatMessage> {
    let turns: Vec<ChatMessage> = history
        .iter()
        .filter_map(|m| match m.role.as_str() {
            "user" => Some(ChatMessage::user(&m.content)),
            "assistant" => Some(ChatMessage::assistant(&m.content)),
            _ => None,
        })
        .collect();
    let start = turns.len().saturating_sub(MAX_HISTORY_MESSAGES);
    turns[start..].to_vec()
}

/// Answer `message`, letting the model call tools for up to
/// [`MAX_TOOL_ROUNDS`] rounds. The last round offers no tools so the model
/// has to answer in text.
pub async fn answer(
    state: &AppState,
    message: &str,
    history: &[HistoryMessage],
    today: TrainingDate,
) -> AppResult<String> {
    let context = user_context(&state.pool, today).await?;

    let mut messages = vec![ChatMessage::system(chat_system_prompt(&context, today))];
    messages.extend(forwarded_history(history));
    messages.push(ChatMessage::user(message));

    for round in 1..=MAX_TOOL_ROUNDS {
        let mut request = ChatRequest::new(messages.clone())
            .with_temperature(TEMPERATURE)
            .with_max_tokens(MAX_TOKENS);
        if round < MAX_TOOL_ROUNDS {
            request = request.with_tools(tools::definitions());
        }

        let completion = state.llm.complete(&request).await?;
        if completion.tool_calls.is_empty() {
            return Ok(completion.text()?.to_string());
        }

        tracing::debug!(round, calls = completion.tool_calls.len(), "Model requested tools");
        let mut results = Vec::with_capacity(completion.tool_calls.len());
        for call in &completion.tool_calls {
            let result = tools::execute(&state.pool, call, today).await;
            results.push(ChatMessage::tool_result(&call.id, result.to_string()));
        }
        messages.push(ChatMessage::assistant_tool_calls(
            completion.content.unwrap_or_default(),
            completion.tool_calls,
        ));
        messages.extend(results);
    }

    Err(AiError::EmptyResponse.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use trener_ai::MessageRole;

    fn turn(role: &str, content: &str) -> HistoryMessage {
        HistoryMessage {
            role: role.to_string(),
            content: content.to_string(),
        }
    }

    #[test]
    fn history_keeps_last_turns_only() {
        let history: Vec<HistoryMessage> = (0..10)
            .map(|i| turn(if i % 2 == 0 { "user" } else { "assistant" }, &i.to_string()))
            .collect();
        let forwarded = forwarded_history(&history);
        assert_eq!(forwarded.len(), MAX_HISTORY_MESSAGES);
        assert_eq!(forwarded[0].content, "4");
        assert_eq!(forwarded.last().unwrap().content, "9");
    }

    #[test]
    fn history_drops_unknown_roles() {
        let forwarded = forwarded_history(&[turn("system", "ignore me"), turn("user", "hi")]);
        assert_eq!(forwarded.len(), 1);
        assert_eq!(forwarded[0].role, MessageRole::User);
    }
}
