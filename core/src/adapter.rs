//! Input adapter: turns what a user typed into one request and renders the
//! outcome.
//!
//! # Design
//! The adapter knows nothing about any UI toolkit. A host forwards input
//! events to `handle_event` (or calls `handle_input` directly) and supplies
//! a `DisplaySink`. Every completed request renders exactly once, success
//! and failure alike. A line that does not parse never reaches the network
//! and its error is returned to the caller instead of being rendered.
//!
//! Nothing is serialized between calls: two submissions in flight both
//! render, in completion order.

use tracing::debug;

use crate::client::RequestIssuer;
use crate::command::Command;
use crate::display::DisplaySink;
use crate::error::CommandError;
use crate::http::Transport;
use crate::types::{display_string, Outcome, Payload};

/// Key code of the Enter key.
pub const ENTER_KEY_CODE: u32 = 13;

/// An event on the text input surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was released in the text field.
    KeyUp(u32),
    /// The submit button was clicked.
    Click,
}

impl InputEvent {
    pub fn is_submit(&self) -> bool {
        match self {
            InputEvent::KeyUp(code) => *code == ENTER_KEY_CODE,
            InputEvent::Click => true,
        }
    }
}

/// Parses command lines, issues them, and renders outcomes.
#[derive(Debug)]
pub struct InputAdapter<T, S> {
    issuer: RequestIssuer<T>,
    sink: S,
}

impl<T: Transport, S: DisplaySink> InputAdapter<T, S> {
    pub fn new(transport: T, sink: S) -> Self {
        Self {
            issuer: RequestIssuer::new(transport),
            sink,
        }
    }

    pub fn issuer(&self) -> &RequestIssuer<T> {
        &self.issuer
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// React to an input event carrying the field's current text. Returns
    /// whether the event triggered a submission.
    pub async fn handle_event(&self, event: InputEvent, raw: &str) -> Result<bool, CommandError> {
        if !event.is_submit() {
            return Ok(false);
        }
        self.handle_input(raw).await?;
        Ok(true)
    }

    /// Parse `raw`, issue the request and render its outcome.
    pub async fn handle_input(&self, raw: &str) -> Result<(), CommandError> {
        let command = Command::parse(raw)?;
        debug!(?command, "dispatching command");
        let outcome = self.dispatch(command).await;
        self.sink.render(&display_string(&outcome));
        Ok(())
    }

    /// Issue a parsed command without rendering.
    pub async fn dispatch(&self, command: Command) -> Outcome {
        let url = command.url();
        match command {
            Command::Request {
                method, payload, ..
            } => {
                self.issuer
                    .issue(&method, &url, payload.map(Payload::Text))
                    .await
            }
            Command::Query { .. } => self.issuer.issue("GET", &url, None).await,
        }
    }
}
