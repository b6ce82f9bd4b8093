//! Collaborators at the edge of the simulation
//!
//! Weather and the assistant are external and may fail. Failures are turned
//! into fixed fallback values here and never reach the simulation state.

mod assistant;
mod weather;

pub use assistant::{
    system_prompt, Assistant, AssistantBackend, ChatMessage, ChatRole, Conversation,
    EMPTY_QUESTION_REPLY, GREETING, NO_DIAGNOSTICS_REPLY, SERVICE_ERROR_REPLY,
};
pub use weather::{
    default_weather, resolve_weather, FixedWeather, GeoPoint, OfflineWeather, WeatherCondition,
    WeatherData, WeatherProvider, DEFAULT_LOCATION,
};
