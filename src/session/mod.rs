//! Append-only session state for the assistant front-end.
//!
//! While an invocation streams, each rationale appends a placeholder entry
//! plus a parallel "pending" marker; the completed answer lands as one
//! final entry with a "ready" marker. Entries are never reordered or
//! removed, so display order always matches trace emission order.

use crate::agent::RationaleObserver;
use crate::types::Answer;

/// One entry in the session's answer list.
#[derive(Debug, Clone, PartialEq)]
pub enum AnswerEntry {
    /// Placeholder shown while the agent is still working.
    PartialRationale { rationale_text: String },
    /// A completed answer.
    Answer(Box<Answer>),
}

/// Marker kept index-aligned with the answer list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlMarker {
    Pending,
    Ready,
}

/// Conversation state for one chat session.
#[derive(Debug, Default)]
pub struct Session {
    id: String,
    answers: Vec<AnswerEntry>,
    controls: Vec<ControlMarker>,
}

impl Session {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            answers: Vec::new(),
            controls: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Append a completed answer.
    pub fn push_answer(&mut self, answer: Answer) {
        self.answers.push(AnswerEntry::Answer(Box::new(answer)));
        self.controls.push(ControlMarker::Ready);
    }

    pub fn answers(&self) -> &[AnswerEntry] {
        &self.answers
    }

    pub fn controls(&self) -> &[ControlMarker] {
        &self.controls
    }
}

impl RationaleObserver for Session {
    fn rationale(&mut self, text: &str) {
        self.answers.push(AnswerEntry::PartialRationale {
            rationale_text: text.to_string(),
        });
        self.controls.push(ControlMarker::Pending);
    }
}
