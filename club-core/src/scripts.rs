use club_types::{ChatSurface, ToolKind};

use crate::ConversationScript;

const INTERVIEW_REPLIES: &[&str] = &[
    "Welcome, and thank you for coming in today. The board has reviewed your application with great interest. Before we get into specifics, tell me about your footballing philosophy and how you see this club developing under your leadership.",
    "That's an encouraging vision. Of course, ambition needs to be matched by results. The board expects us to be competing at the top end of the table within two seasons. How would you handle the pressure if results don't come immediately?",
    "A measured answer. Let's talk about the squad. We have some promising young players coming through the academy, but the senior dressing room has strong personalities. How do you plan to win over a group that has seen three managers in four years?",
    "Well said. I think we've heard everything we need. The board will be in touch shortly with our decision, but between us, you've made a very strong impression today. Welcome aboard, and good luck.",
];

const NEGOTIATION_REPLIES: &[&str] = &[
    "Good morning! I'm here representing my client regarding his potential contract with your club. He's very interested in joining, but we need to discuss terms that reflect his market value and ambitions. What's your initial offer?",
    "That's a reasonable starting point, but we were hoping for something more competitive. My client has offers from other top clubs. Can we discuss the wage structure and any performance bonuses you might include?",
    "The wages are getting closer to what we had in mind. Now, let's talk about contract length and release clauses. My client wants security but also flexibility for future opportunities. What are your thoughts on a 4-year deal?",
    "Excellent! I think we have the framework for a deal that works for everyone. My client is excited about this opportunity and your ambitions for the club. Let's get the paperwork started!",
];

const ASSISTANT_REPLIES: &[&str] = &[
    "Hello Coach! I'm your assistant manager, ready to help with whatever you need. Whether it's analyzing our squad, preparing tactics, or managing scouting operations, I'm here to support your decisions. What would you like to work on today?",
    "Excellent point, Coach. Let me analyze our current squad situation and identify some key areas where we can improve. I'll also set up some scouting tasks to find players that fit our tactical system.",
    "I understand your tactical concerns. Let me draft a new formation that addresses those weaknesses while maximizing our players' strengths. I'll also prepare a detailed tactical briefing for the next match.",
    "That's a great strategic approach, Coach. I'll coordinate with our scouting network to identify players who match those criteria. I'll also analyze our upcoming fixtures to determine the best tactical approach for each match.",
];

fn build(
    surface: ChatSurface,
    party_name: &str,
    party_avatar: &str,
    replies: &[&str],
    tool_use_probability: f64,
    tools: Vec<ToolKind>,
) -> ConversationScript {
    ConversationScript {
        surface,
        party_name: party_name.to_string(),
        party_avatar: party_avatar.to_string(),
        user_avatar: "avatars/manager.png".to_string(),
        replies: replies.iter().map(|s| s.to_string()).collect(),
        tool_use_probability,
        tools,
    }
}

/// The canned script for each chat surface. Only the assistant manager
/// surface runs tool interludes, roughly 70% of its turns.
pub fn script_for(surface: ChatSurface) -> ConversationScript {
    match surface {
        ChatSurface::Interview => build(
            ChatSurface::Interview,
            "Club Chairman",
            "avatars/chairman.png",
            INTERVIEW_REPLIES,
            0.0,
            Vec::new(),
        ),
        ChatSurface::ContractNegotiation => build(
            ChatSurface::ContractNegotiation,
            "Player Agent",
            "avatars/agent.png",
            NEGOTIATION_REPLIES,
            0.0,
            Vec::new(),
        ),
        ChatSurface::AssistantManager => build(
            ChatSurface::AssistantManager,
            "Assistant Manager",
            "avatars/assistant.png",
            ASSISTANT_REPLIES,
            0.70,
            vec![ToolKind::ScoutingTask, ToolKind::DraftingTactic],
        ),
    }
}
