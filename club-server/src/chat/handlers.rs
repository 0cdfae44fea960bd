use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

use crate::auth::AuthService;
use crate::chat::connection::{ConnectionId, ConnectionManager};
use club_core::{ConversationEngine, ConversationTimings, StreamStep, scripts};
use club_types::{ChatSurface, ClientMessage, ConversationError, ConversationPhase, ServerMessage};

#[derive(Clone)]
pub struct MessageHandler {
    connection_id: ConnectionId,
    connection_manager: Arc<ConnectionManager>,
    auth_service: Arc<AuthService>,
    timings: ConversationTimings,
}

impl MessageHandler {
    pub fn new(
        connection_id: ConnectionId,
        connection_manager: Arc<ConnectionManager>,
        auth_service: Arc<AuthService>,
        timings: ConversationTimings,
    ) -> Self {
        Self {
            connection_id,
            connection_manager,
            auth_service,
            timings,
        }
    }

    pub async fn handle_message(&self, message: ClientMessage) -> Result<(), String> {
        self.connection_manager
            .update_activity(self.connection_id)
            .await;

        match message {
            ClientMessage::Authenticate { token } => self.handle_authenticate(token).await,
            ClientMessage::StartConversation { surface } => {
                self.handle_start_conversation(surface).await
            }
            ClientMessage::SendMessage { content } => self.handle_send_message(content).await,
            ClientMessage::EndConversation => self.handle_end_conversation().await,
            ClientMessage::Heartbeat => Ok(()),
        }
    }

    pub async fn handle_disconnect(&self) {
        info!("Handling disconnect for connection {}", self.connection_id);
        self.connection_manager
            .end_conversation(self.connection_id)
            .await;
    }

    async fn send_message(&self, message: ServerMessage) -> Result<(), String> {
        self.connection_manager
            .send_to_connection(self.connection_id, message)
            .await
    }

    async fn send_error(&self, message: &str) -> Result<(), String> {
        self.send_message(ServerMessage::Error {
            message: message.to_string(),
        })
        .await
    }

    async fn handle_authenticate(&self, token: String) -> Result<(), String> {
        info!("Authenticating connection {}", self.connection_id);

        match self.auth_service.validate_token(&token).await {
            Ok(user) => {
                self.connection_manager
                    .set_connection_user(self.connection_id, user.clone())
                    .await;
                self.send_message(ServerMessage::AuthenticationSuccess { user })
                    .await
            }
            Err(e) => {
                warn!(
                    "Authentication failed for connection {}: {}",
                    self.connection_id, e
                );
                self.send_message(ServerMessage::AuthenticationFailed {
                    reason: e.to_string(),
                })
                .await
            }
        }
    }

    async fn handle_start_conversation(&self, surface: ChatSurface) -> Result<(), String> {
        if !self
            .connection_manager
            .is_authenticated(self.connection_id)
            .await
        {
            return self
                .send_error("Authentication required to start a conversation")
                .await;
        }

        let script = scripts::script_for(surface);
        let party_name = script.party_name.clone();
        let engine = ConversationEngine::new(script, self.timings.clone());

        let conversation_id = self
            .connection_manager
            .start_conversation(self.connection_id, engine)
            .await
            .ok_or("Connection not found")?;

        self.send_message(ServerMessage::ConversationStarted {
            conversation_id,
            surface,
            party_name,
        })
        .await?;

        // The scripted party speaks first, after a short warm-up.
        let manager = self.connection_manager.clone();
        let connection_id = self.connection_id;
        let timings = self.timings.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(timings.warmup_ms)).await;
            run_scripted_turn(manager, connection_id, conversation_id, timings).await;
        });

        Ok(())
    }

    async fn handle_send_message(&self, content: String) -> Result<(), String> {
        let Some(conversation_id) = self
            .connection_manager
            .conversation_id(self.connection_id)
            .await
        else {
            return self.send_error("No active conversation").await;
        };

        let result = self
            .connection_manager
            .with_engine(self.connection_id, conversation_id, |engine| {
                engine.submit_user_message(&content)
            })
            .await;

        match result {
            None => self.send_error("No active conversation").await,
            Some(Err(ConversationError::InputDisabled)) => {
                self.send_error("Please wait for the reply to finish").await
            }
            Some(Err(ConversationError::EmptyMessage)) => {
                self.send_error("Message cannot be empty").await
            }
            Some(Err(ConversationError::NoActiveConversation)) => {
                self.send_error("No active conversation").await
            }
            Some(Ok(turn)) => {
                self.send_message(ServerMessage::MessageAppended {
                    message: turn.message,
                })
                .await?;

                if turn.reply_follows {
                    let manager = self.connection_manager.clone();
                    let connection_id = self.connection_id;
                    let timings = self.timings.clone();
                    tokio::spawn(async move {
                        tokio::time::sleep(Duration::from_millis(timings.user_reply_delay_ms))
                            .await;
                        run_scripted_turn(manager, connection_id, conversation_id, timings).await;
                    });
                }
                Ok(())
            }
        }
    }

    async fn handle_end_conversation(&self) -> Result<(), String> {
        self.connection_manager
            .end_conversation(self.connection_id)
            .await;
        self.send_message(ServerMessage::ConversationEnded).await
    }
}

/// Drives one scripted turn to completion, sleeping between ticks. Every
/// step re-checks that the conversation is still the live one; a None from
/// the manager means the view is gone and the turn is silently dropped.
pub async fn run_scripted_turn(
    manager: Arc<ConnectionManager>,
    connection_id: ConnectionId,
    conversation_id: Uuid,
    timings: ConversationTimings,
) {
    let began = manager
        .with_engine(connection_id, conversation_id, |engine| {
            engine.begin_scripted_turn()
        })
        .await;
    if began != Some(true) {
        return;
    }

    let _ = manager
        .send_to_connection(
            connection_id,
            ServerMessage::PhaseChanged {
                phase: ConversationPhase::Thinking,
            },
        )
        .await;

    tokio::time::sleep(Duration::from_millis(timings.thinking_ms)).await;

    let Some(phase) = manager
        .with_engine(connection_id, conversation_id, |engine| {
            engine.finish_thinking(&mut rand::thread_rng())
        })
        .await
    else {
        return;
    };

    match phase {
        ConversationPhase::ToolUse { tool, progress } => {
            let _ = manager
                .send_to_connection(
                    connection_id,
                    ServerMessage::ToolUseProgress { tool, progress },
                )
                .await;

            loop {
                tokio::time::sleep(Duration::from_millis(timings.tool_tick_ms)).await;

                let Some(next) = manager
                    .with_engine(connection_id, conversation_id, |engine| engine.advance_tool())
                    .await
                else {
                    return;
                };

                match next {
                    Some(ConversationPhase::ToolUse { tool, progress }) => {
                        let _ = manager
                            .send_to_connection(
                                connection_id,
                                ServerMessage::ToolUseProgress { tool, progress },
                            )
                            .await;
                    }
                    Some(ConversationPhase::Streaming) => {
                        let _ = manager
                            .send_to_connection(
                                connection_id,
                                ServerMessage::PhaseChanged {
                                    phase: ConversationPhase::Streaming,
                                },
                            )
                            .await;
                        break;
                    }
                    _ => return,
                }
            }
        }
        ConversationPhase::Streaming => {
            let _ = manager
                .send_to_connection(
                    connection_id,
                    ServerMessage::PhaseChanged {
                        phase: ConversationPhase::Streaming,
                    },
                )
                .await;
        }
        _ => return,
    }

    loop {
        tokio::time::sleep(Duration::from_millis(timings.word_reveal_ms)).await;

        let Some(step) = manager
            .with_engine(connection_id, conversation_id, |engine| {
                engine.advance_stream()
            })
            .await
        else {
            return;
        };

        match step {
            Some(StreamStep::Chunk { message_id, partial }) => {
                let _ = manager
                    .send_to_connection(
                        connection_id,
                        ServerMessage::StreamChunk { message_id, partial },
                    )
                    .await;
            }
            Some(StreamStep::Finished(message)) => {
                let _ = manager
                    .send_to_connection(connection_id, ServerMessage::MessageAppended { message })
                    .await;
                let _ = manager
                    .send_to_connection(
                        connection_id,
                        ServerMessage::PhaseChanged {
                            phase: ConversationPhase::Idle,
                        },
                    )
                    .await;
                return;
            }
            None => return,
        }
    }
}
