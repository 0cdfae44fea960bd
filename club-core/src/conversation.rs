use club_types::{
    ChatMessage, ChatSurface, ConversationError, ConversationPhase, Sender, ToolKind,
};
use rand::Rng;

/// Fixed delays driving a scripted conversation. The defaults match the
/// pacing of the demo screens; tests swap in [`ConversationTimings::instant`]
/// so turns can be driven tick-by-tick without sleeping.
#[derive(Debug, Clone, PartialEq)]
pub struct ConversationTimings {
    /// Delay before the scripted party's opening turn auto-starts.
    pub warmup_ms: u64,
    /// How long the Thinking phase holds before text starts revealing.
    pub thinking_ms: u64,
    /// Inter-word delay during the Streaming reveal.
    pub word_reveal_ms: u64,
    /// Pause between a user message landing and the scripted reply starting.
    pub user_reply_delay_ms: u64,
    /// Interval between tool-use progress increments.
    pub tool_tick_ms: u64,
}

impl Default for ConversationTimings {
    fn default() -> Self {
        Self {
            warmup_ms: 1000,
            thinking_ms: 1500,
            word_reveal_ms: 80,
            user_reply_delay_ms: 800,
            tool_tick_ms: 100,
        }
    }
}

impl ConversationTimings {
    pub fn instant() -> Self {
        Self {
            warmup_ms: 0,
            thinking_ms: 0,
            word_reveal_ms: 0,
            user_reply_delay_ms: 0,
            tool_tick_ms: 0,
        }
    }
}

/// The fixed content of one chat surface: who the scripted party is and
/// what it says, turn by turn.
#[derive(Debug, Clone)]
pub struct ConversationScript {
    pub surface: ChatSurface,
    pub party_name: String,
    pub party_avatar: String,
    pub user_avatar: String,
    pub replies: Vec<String>,
    /// Probability that a scripted turn runs a tool interlude first.
    /// Zero disables tools entirely for this surface.
    pub tool_use_probability: f64,
    pub tools: Vec<ToolKind>,
}

#[derive(Debug)]
struct StreamState {
    message_id: u64,
    words: Vec<String>,
    revealed: usize,
}

/// Outcome of a user submitting a message.
#[derive(Debug, Clone, PartialEq)]
pub struct UserTurn {
    pub message: ChatMessage,
    /// False once the script is exhausted; the message is still appended
    /// but no scripted reply will follow.
    pub reply_follows: bool,
}

/// One increment of the word-by-word reveal.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamStep {
    Chunk { message_id: u64, partial: String },
    Finished(ChatMessage),
}

/// Replays a fixed script one turn at a time. The engine itself is
/// tick-driven and does no waiting; callers schedule the delays from
/// [`ConversationTimings`] between calls.
#[derive(Debug)]
pub struct ConversationEngine {
    script: ConversationScript,
    pub timings: ConversationTimings,
    messages: Vec<ChatMessage>,
    phase: ConversationPhase,
    next_message_id: u64,
    next_turn_index: usize,
    completed_turns: u32,
    stream: Option<StreamState>,
}

impl ConversationEngine {
    pub fn new(script: ConversationScript, timings: ConversationTimings) -> Self {
        Self {
            script,
            timings,
            messages: Vec::new(),
            phase: ConversationPhase::Idle,
            next_message_id: 1,
            next_turn_index: 0,
            completed_turns: 0,
            stream: None,
        }
    }

    pub fn surface(&self) -> ChatSurface {
        self.script.surface
    }

    pub fn party_name(&self) -> &str {
        &self.script.party_name
    }

    pub fn phase(&self) -> &ConversationPhase {
        &self.phase
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// User input is only accepted while no scripted turn is in flight.
    pub fn input_enabled(&self) -> bool {
        self.phase.is_idle()
    }

    fn timestamp() -> String {
        chrono::Local::now().format("%H:%M").to_string()
    }

    fn allocate_message_id(&mut self) -> u64 {
        let id = self.next_message_id;
        self.next_message_id += 1;
        id
    }

    /// Appends the user's message immediately. Rejected outside Idle and
    /// for whitespace-only input. An exhausted script still absorbs the
    /// message; `reply_follows` tells the caller whether to schedule a
    /// scripted turn afterwards.
    pub fn submit_user_message(&mut self, content: &str) -> Result<UserTurn, ConversationError> {
        if !self.phase.is_idle() {
            return Err(ConversationError::InputDisabled);
        }
        let trimmed = content.trim();
        if trimmed.is_empty() {
            return Err(ConversationError::EmptyMessage);
        }

        let message = ChatMessage {
            id: self.allocate_message_id(),
            sender: Sender::User,
            content: trimmed.to_string(),
            timestamp: Self::timestamp(),
            avatar: self.script.user_avatar.clone(),
        };
        self.messages.push(message.clone());

        Ok(UserTurn {
            message,
            reply_follows: self.next_turn_index < self.script.replies.len(),
        })
    }

    /// Starts the next scripted turn, entering Thinking. Returns false
    /// without changing state when the script is exhausted or another
    /// turn is already in flight.
    pub fn begin_scripted_turn(&mut self) -> bool {
        if !self.phase.is_idle() || self.next_turn_index >= self.script.replies.len() {
            return false;
        }
        self.phase = ConversationPhase::Thinking;
        true
    }

    /// Leaves Thinking, branching into a tool interlude or straight into
    /// the streaming reveal. The opening turn never runs a tool, matching
    /// the demo behavior. Randomness is injected so tests can force
    /// either branch with a probability of 0.0 or 1.0.
    pub fn finish_thinking<R: Rng>(&mut self, rng: &mut R) -> ConversationPhase {
        debug_assert_eq!(self.phase, ConversationPhase::Thinking);

        let uses_tool = self.completed_turns > 0
            && !self.script.tools.is_empty()
            && rng.gen_bool(self.script.tool_use_probability);

        if uses_tool {
            let tool = self.script.tools[rng.gen_range(0..self.script.tools.len())];
            self.phase = ConversationPhase::ToolUse { tool, progress: 0 };
        } else {
            self.start_streaming();
        }
        self.phase
    }

    /// Bumps tool progress by one fixed increment. The full bar is shown
    /// at 100 before the next tick rolls into Streaming. Returns None when
    /// no tool interlude is active.
    pub fn advance_tool(&mut self) -> Option<ConversationPhase> {
        let ConversationPhase::ToolUse { tool, progress } = self.phase else {
            return None;
        };
        if progress >= 100 {
            self.start_streaming();
        } else {
            let next = progress.saturating_add(5).min(100);
            self.phase = ConversationPhase::ToolUse { tool, progress: next };
        }
        Some(self.phase)
    }

    fn start_streaming(&mut self) {
        let reply = &self.script.replies[self.next_turn_index];
        let words = reply.split_whitespace().map(str::to_string).collect();
        self.stream = Some(StreamState {
            message_id: self.next_message_id,
            words,
            revealed: 0,
        });
        self.next_message_id += 1;
        self.phase = ConversationPhase::Streaming;
    }

    /// Reveals the next word of the in-flight reply. On the final word the
    /// completed message is appended, the turn counter advances, and the
    /// engine returns to Idle. An empty reply finalizes on the first call.
    pub fn advance_stream(&mut self) -> Option<StreamStep> {
        if self.phase != ConversationPhase::Streaming {
            return None;
        }
        let stream = self.stream.as_mut()?;

        if stream.revealed < stream.words.len() {
            stream.revealed += 1;
        }
        let partial = stream.words[..stream.revealed].join(" ");

        if stream.revealed < stream.words.len() {
            let message_id = stream.message_id;
            return Some(StreamStep::Chunk { message_id, partial });
        }

        let message_id = stream.message_id;
        self.stream = None;
        let message = ChatMessage {
            id: message_id,
            sender: Sender::ScriptedParty,
            content: partial,
            timestamp: Self::timestamp(),
            avatar: self.script.party_avatar.clone(),
        };
        self.messages.push(message.clone());
        self.next_turn_index += 1;
        self.completed_turns += 1;
        self.phase = ConversationPhase::Idle;
        Some(StreamStep::Finished(message))
    }
}
