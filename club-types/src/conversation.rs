use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Which chat surface a conversation belongs to. The script played back is
/// fixed per surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ChatSurface {
    Interview,
    ContractNegotiation,
    AssistantManager,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum Sender {
    User,
    ScriptedParty,
}

/// A finalized chat message. Immutable once created; never edited or
/// deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ChatMessage {
    pub id: u64,
    pub sender: Sender,
    pub content: String,
    pub timestamp: String, // display string, e.g. "14:05"
    pub avatar: String,
}

/// Cosmetic automated task shown before some assistant-manager replies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ToolKind {
    ScoutingTask,
    DraftingTactic,
}

impl ToolKind {
    pub fn description(&self) -> &'static str {
        match self {
            ToolKind::ScoutingTask => {
                "Creating comprehensive scouting assignments for our target positions..."
            }
            ToolKind::DraftingTactic => {
                "Analyzing opponent weaknesses and drafting tactical adjustments..."
            }
        }
    }
}

/// Conversation activity state. `ToolUse` is a cosmetic sub-phase that only
/// the assistant-manager surface enters, between thinking and streaming.
/// User input is accepted only while `Idle`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum ConversationPhase {
    Idle,
    Thinking,
    ToolUse { tool: ToolKind, progress: u8 },
    Streaming,
}

impl ConversationPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, ConversationPhase::Idle)
    }
}
