// Screen state: the question/answer flow as an explicit state machine, kept
// apart from the terminal so it can be driven by tests with a fake backend.
//
//   Idle --submit--> Submitting --ok--> ShowingAnswer --acknowledge--> Idle
//                         \--err--> Idle (question kept)

use thiserror::Error;

use crate::api::{AnswerRequest, AnswerResponse, AnswerService, ApiError};
use crate::language::detect;

/// Message shown when a submission fails.
pub const ASK_FAILED_MESSAGE: &str = "Could not get response. Make sure backend is running.";

/// Sample questions offered under "Try these questions".
pub const SAMPLE_QUESTIONS: [&str; 3] = [
    "મારા કપાસમાં સફેદ માખી છે શું કરું?",
    "What is the best fertilizer for groundnut in Gujarat?",
    "કપાસ ક્યારે વાવવો જોઈએ?",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenState {
    /// Waiting for input. `draft` holds a question kept after a failure.
    Idle { draft: String },
    Submitting { question: String },
    ShowingAnswer { question: String, answer: AnswerResponse },
}

#[derive(Debug, Error)]
pub enum ScreenError {
    #[error("Please type your question first")]
    EmptyQuestion,
    #[error("a question is already being answered")]
    Busy,
    #[error("no question is being submitted")]
    NotSubmitting,
    #[error("an answer is still on screen")]
    AnswerShowing,
    #[error("{}", ASK_FAILED_MESSAGE)]
    Failed(#[source] ApiError),
}

/// The question screen plus the last known connection status.
#[derive(Debug, Clone)]
pub struct Screen {
    state: ScreenState,
    connected: bool,
}

impl Default for Screen {
    fn default() -> Self {
        Screen::new()
    }
}

impl Screen {
    pub fn new() -> Self {
        Screen {
            state: ScreenState::Idle {
                draft: String::new(),
            },
            connected: false,
        }
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Question preserved for resubmission, if any.
    pub fn draft(&self) -> &str {
        match &self.state {
            ScreenState::Idle { draft } => draft,
            _ => "",
        }
    }

    /// Replace the pending question, e.g. with a picked sample. Only
    /// possible while Idle.
    pub fn set_draft(&mut self, text: &str) -> Result<(), ScreenError> {
        match &mut self.state {
            ScreenState::Idle { draft } => {
                *draft = text.to_string();
                Ok(())
            }
            ScreenState::Submitting { .. } => Err(ScreenError::Busy),
            ScreenState::ShowingAnswer { .. } => Err(ScreenError::AnswerShowing),
        }
    }

    /// Run a health check and remember its outcome.
    pub fn refresh_connection<S: AnswerService + ?Sized>(&mut self, service: &S) -> bool {
        self.connected = service.health_check();
        self.connected
    }

    /// Idle -> Submitting. Trims the input and tags its language; the
    /// returned request is what should be sent to the backend.
    pub fn submit(&mut self, input: &str) -> Result<AnswerRequest, ScreenError> {
        match &self.state {
            ScreenState::Idle { .. } => {}
            ScreenState::Submitting { .. } => return Err(ScreenError::Busy),
            ScreenState::ShowingAnswer { .. } => return Err(ScreenError::AnswerShowing),
        }
        let question = input.trim();
        if question.is_empty() {
            return Err(ScreenError::EmptyQuestion);
        }
        let request = AnswerRequest::new(question, Some(detect(question)));
        self.state = ScreenState::Submitting {
            question: question.to_string(),
        };
        Ok(request)
    }

    /// Submitting -> ShowingAnswer on success, Submitting -> Idle on failure
    /// with the question kept as the draft.
    pub fn complete(&mut self, outcome: Result<AnswerResponse, ApiError>) -> Result<(), ScreenError> {
        let question = match &mut self.state {
            ScreenState::Submitting { question } => std::mem::take(question),
            ScreenState::Idle { .. } => return Err(ScreenError::NotSubmitting),
            ScreenState::ShowingAnswer { .. } => return Err(ScreenError::AnswerShowing),
        };
        match outcome {
            Ok(answer) => {
                self.state = ScreenState::ShowingAnswer { question, answer };
                Ok(())
            }
            Err(e) => {
                self.state = ScreenState::Idle { draft: question };
                Err(ScreenError::Failed(e))
            }
        }
    }

    /// Submit, ask the backend and complete in one go.
    pub fn ask<S: AnswerService + ?Sized>(&mut self, service: &S, input: &str) -> Result<(), ScreenError> {
        let request = self.submit(input)?;
        let outcome = service.ask(&request);
        self.complete(outcome)
    }

    /// Answer currently on screen.
    pub fn answer(&self) -> Option<&AnswerResponse> {
        match &self.state {
            ScreenState::ShowingAnswer { answer, .. } => Some(answer),
            _ => None,
        }
    }

    /// ShowingAnswer -> Idle with question and answer cleared. Back and
    /// "ask another" both land here. A no-op in any other state.
    pub fn acknowledge(&mut self) {
        if let ScreenState::ShowingAnswer { .. } = self.state {
            self.state = ScreenState::Idle {
                draft: String::new(),
            };
        }
    }
}
