//! Wire events exchanged over the relay.
//!
//! Every frame is a JSON text frame of the form
//! `{"event": "<channel>", "data": <payload>}`.

use std::fmt;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Opaque quiz payload. The relay never looks inside it.
pub type Payload = serde_json::Map<String, serde_json::Value>;

/// Identifier assigned to a connection when it is accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Body of a `student_joined` notification. The id is taken as sent, whatever its type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub userid: Option<serde_json::Value>,
}

impl fmt::Display for Participant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.userid {
            Some(serde_json::Value::String(id)) => f.write_str(id),
            Some(other) => write!(f, "{}", other),
            None => f.write_str("<unknown>"),
        }
    }
}

/// Events a client may emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientEvent {
    /// A teacher published a quiz.
    TeacherCreateQuiz(Payload),

    /// A teacher pushed the next question.
    SendQuestion(Payload),

    /// A student answered.
    SubmitAnswer(Payload),

    /// A student announced itself. Logged, never relayed.
    StudentJoined(Participant),
}

impl ClientEvent {
    pub fn channel(&self) -> &'static str {
        match self {
            ClientEvent::TeacherCreateQuiz(_) => "teacher_create_quiz",
            ClientEvent::SendQuestion(_) => "send_question",
            ClientEvent::SubmitAnswer(_) => "submit_answer",
            ClientEvent::StudentJoined(_) => "student_joined",
        }
    }
}

/// Events the relay delivers to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// Sent once to a new session, carrying its identifier.
    Connected { sid: SessionId },

    SendQuizToStudents(Payload),

    ReceiveQuestion(Payload),

    NewAnswer(Payload),
}
