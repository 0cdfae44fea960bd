use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::{ChatMessage, ChatSurface, ConversationPhase, ToolKind};

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ClientMessage {
    Authenticate { token: String },
    StartConversation { surface: ChatSurface },
    SendMessage { content: String },
    EndConversation,
    Heartbeat,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ServerMessage {
    AuthenticationSuccess { user: crate::User },
    AuthenticationFailed { reason: String },
    ConversationStarted {
        conversation_id: Uuid,
        surface: ChatSurface,
        party_name: String,
    },
    MessageAppended { message: ChatMessage },
    PhaseChanged { phase: ConversationPhase },
    ToolUseProgress { tool: ToolKind, progress: u8 },
    StreamChunk { message_id: u64, partial: String },
    ConversationEnded,
    Error { message: String },
}
