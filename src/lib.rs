// Library root
// -----------
// This crate exposes the pieces behind the Kisan question screen. The binary
// (`main.rs`) wires them into an interactive terminal flow.
//
// Module responsibilities:
// - `language`: guesses Gujarati vs. English from the script of the input.
// - `api`: HTTP calls to the question-answering backend (health check, ask).
// - `config`: where the backend lives and how long to wait for it.
// - `screen`: the Idle / Submitting / ShowingAnswer state machine.
// - `ui`: terminal rendering of the screen, delegating requests to `api`.
pub mod api;
pub mod config;
pub mod language;
pub mod screen;
pub mod ui;

pub use api::{AnswerRequest, AnswerResponse, AnswerService, ApiClient, ApiError};
pub use config::ClientConfig;
pub use language::{detect, LanguageTag};
pub use screen::{Screen, ScreenError, ScreenState};
