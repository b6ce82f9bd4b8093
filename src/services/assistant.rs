//! Advisory chat assistant
//!
//! The assistant sees a snapshot of the simulation and answers free-text
//! questions about it. It has no way to write back into the simulation.

use anyhow::Result;
use log::{debug, warn};

use crate::simulation::{DrivingMode, SimState};

pub const GREETING: &str = "Hello! I am your ACC Simulation Assistant. Ask me anything about the current vehicle state or road logic.";
pub const EMPTY_QUESTION_REPLY: &str = "Please enter a question.";
pub const NO_DIAGNOSTICS_REPLY: &str = "Diagnostic data unavailable.";
pub const SERVICE_ERROR_REPLY: &str = "Error communicating with the central logic unit.";

const GUIDELINES: &str = "\
Guidelines:
1. Provide concise, professional, and technically accurate responses.
2. Reference the live state data, safety status, and fuel levels in your answers.
3. If the user asks why the speed is changing, explain based on the adaptive logic or fuel status.
4. Keep the tone academic and professional, suitable for an engineering demonstration.";

/// Text generation service behind the assistant
pub trait AssistantBackend {
    /// `Ok(None)` means the service answered without any text
    fn generate(&self, system_prompt: &str, user_message: &str) -> Result<Option<String>>;
}

/// Context handed to the backend describing the live state
pub fn system_prompt(state: &SimState) -> String {
    let acc_status = match state.mode {
        DrivingMode::Automatic => "ACTIVE",
        DrivingMode::Manual => "MANUAL",
    };
    let emergency = if state.emergency { "ACTIVE" } else { "INACTIVE" };

    format!(
        "You are the \"ACC Simulation Assistant\", an AI expert specialized in Adaptive Cruise Control systems.\n\
         Current System State:\n\
         - Speed: {:.1} km/h\n\
         - Distance to vehicle ahead: {:.1} meters\n\
         - Fuel Level: {:.1}%\n\
         - ACC Status: {}\n\
         - Road Type: {}\n\
         - IMU Status: {}\n\
         - Safety Level: {}\n\
         - Emergency Mode: {}\n\n{}",
        state.speed,
        state.distance,
        state.fuel,
        acc_status,
        state.road.to_string().to_uppercase(),
        state.motion_state,
        state.safety.to_string().to_uppercase(),
        emergency,
        GUIDELINES
    )
}

pub struct Assistant<B> {
    backend: B,
}

impl<B: AssistantBackend> Assistant<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    /// Answer a question about `state`. Never fails: backend problems come
    /// back as fixed replies.
    pub fn ask(&self, state: &SimState, message: &str) -> String {
        let message = message.trim();
        if message.is_empty() {
            return EMPTY_QUESTION_REPLY.to_string();
        }

        debug!("Assistant query: {}", message);
        match self.backend.generate(&system_prompt(state), message) {
            Ok(Some(text)) if !text.trim().is_empty() => text,
            Ok(_) => NO_DIAGNOSTICS_REPLY.to_string(),
            Err(err) => {
                warn!("Assistant backend error: {:#}", err);
                SERVICE_ERROR_REPLY.to_string()
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

/// Chat transcript, opened by the assistant's greeting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Default for Conversation {
    fn default() -> Self {
        Self::new()
    }
}

impl Conversation {
    pub fn new() -> Self {
        Self {
            messages: vec![ChatMessage {
                role: ChatRole::Assistant,
                content: GREETING.to_string(),
            }],
        }
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Ask and record both turns. Blank input is dropped without a reply.
    pub fn ask<B: AssistantBackend>(
        &mut self,
        assistant: &Assistant<B>,
        state: &SimState,
        message: &str,
    ) -> Option<&str> {
        let message = message.trim();
        if message.is_empty() {
            return None;
        }

        self.messages.push(ChatMessage {
            role: ChatRole::User,
            content: message.to_string(),
        });
        let reply = assistant.ask(state, message);
        self.messages.push(ChatMessage {
            role: ChatRole::Assistant,
            content: reply,
        });
        self.messages.last().map(|m| m.content.as_str())
    }
}
