//! Broadcast hub.
//!
//! [`Relay`] owns the set of live sessions. It is driven by exactly one task,
//! so connect, dispatch and disconnect are applied in the order they arrive
//! and every session sees broadcasts in that same order.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};

use super::events::{ClientEvent, ServerEvent, SessionId};

/// Item queued for a session's writer.
pub type Outbound = Arc<ServerEvent>;

/// Receiving end of a session's outbound queue.
pub type Outbox = mpsc::UnboundedReceiver<Outbound>;

#[derive(Default)]
pub struct Relay {
    sessions: HashMap<SessionId, mpsc::UnboundedSender<Outbound>>,
}

impl Relay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    pub fn connect(&mut self, session: SessionId, outbox: mpsc::UnboundedSender<Outbound>) {
        log::info!("A user connected: {}", session);
        let _ = outbox.send(Arc::new(ServerEvent::Connected { sid: session }));
        self.sessions.insert(session, outbox);
    }

    pub fn disconnect(&mut self, session: SessionId) {
        if self.sessions.remove(&session).is_some() {
            log::info!("User disconnected: {}", session);
        }
    }

    /// Routes one event. Returns how many sessions it was queued for.
    pub fn dispatch(&self, from: SessionId, event: ClientEvent) -> usize {
        match event {
            ClientEvent::TeacherCreateQuiz(quiz) => {
                log::info!(
                    "Quiz created by {}: {}",
                    from,
                    serde_json::Value::Object(quiz.clone())
                );
                self.broadcast(ServerEvent::SendQuizToStudents(quiz))
            }
            ClientEvent::SendQuestion(question) => {
                self.broadcast(ServerEvent::ReceiveQuestion(question))
            }
            ClientEvent::SubmitAnswer(answer) => {
                log::info!(
                    "Student answer from {}: {}",
                    from,
                    serde_json::Value::Object(answer.clone())
                );
                self.broadcast(ServerEvent::NewAnswer(answer))
            }
            ClientEvent::StudentJoined(participant) => {
                log::info!("Student joined: {}", participant);
                0
            }
        }
    }

    fn broadcast(&self, event: ServerEvent) -> usize {
        let event = Arc::new(event);
        // A closed outbox means the writer is gone and a disconnect is on its way
        self.sessions
            .values()
            .filter(|outbox| outbox.send(Arc::clone(&event)).is_ok())
            .count()
    }
}

enum Command {
    Connect {
        session: SessionId,
        outbox: mpsc::UnboundedSender<Outbound>,
    },
    Dispatch {
        from: SessionId,
        event: ClientEvent,
    },
    Disconnect {
        session: SessionId,
    },
    SessionCount {
        reply: oneshot::Sender<usize>,
    },
}

/// Cloneable entry point to the dispatcher task.
#[derive(Clone)]
pub struct RelayHandle {
    commands: mpsc::UnboundedSender<Command>,
}

impl RelayHandle {
    /// Starts the dispatcher on the current tokio runtime.
    pub fn spawn() -> Self {
        let (commands, receiver) = mpsc::unbounded_channel();
        tokio::spawn(run_dispatcher(Relay::new(), receiver));
        Self { commands }
    }

    /// Registers a new session and returns its id and outbound queue.
    pub fn connect(&self) -> (SessionId, Outbox) {
        let session = SessionId::new();
        let (outbox, receiver) = mpsc::unbounded_channel();
        self.send(Command::Connect { session, outbox });
        (session, receiver)
    }

    pub fn dispatch(&self, from: SessionId, event: ClientEvent) {
        self.send(Command::Dispatch { from, event });
    }

    pub fn disconnect(&self, session: SessionId) {
        self.send(Command::Disconnect { session });
    }

    /// Number of live sessions, or 0 if the dispatcher has stopped.
    pub async fn session_count(&self) -> usize {
        let (reply, answer) = oneshot::channel();
        self.send(Command::SessionCount { reply });
        answer.await.unwrap_or(0)
    }

    fn send(&self, command: Command) {
        if self.commands.send(command).is_err() {
            log::warn!("Relay dispatcher is not running; command dropped");
        }
    }
}

async fn run_dispatcher(mut relay: Relay, mut commands: mpsc::UnboundedReceiver<Command>) {
    while let Some(command) = commands.recv().await {
        match command {
            Command::Connect { session, outbox } => relay.connect(session, outbox),
            Command::Dispatch { from, event } => {
                let channel = event.channel();
                let delivered = relay.dispatch(from, event);
                log::debug!("{} from {} queued for {} sessions", channel, from, delivered);
            }
            Command::Disconnect { session } => relay.disconnect(session),
            Command::SessionCount { reply } => {
                let _ = reply.send(relay.session_count());
            }
        }
    }
    log::info!("Relay dispatcher stopped");
}
