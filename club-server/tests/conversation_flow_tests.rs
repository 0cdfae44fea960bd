use std::sync::Arc;

use tokio::sync::mpsc::UnboundedReceiver;
use uuid::Uuid;

use club_core::{ConversationEngine, ConversationScript, ConversationTimings, scripts};
use club_server::chat::connection::{ConnectionId, ConnectionManager};
use club_server::chat::handlers::run_scripted_turn;
use club_types::{ChatSurface, ConversationPhase, Sender, ServerMessage, ToolKind};

fn drain(receiver: &mut UnboundedReceiver<ServerMessage>) -> Vec<ServerMessage> {
    let mut messages = Vec::new();
    while let Ok(message) = receiver.try_recv() {
        messages.push(message);
    }
    messages
}

async fn setup_conversation(
    manager: &Arc<ConnectionManager>,
    script: ConversationScript,
) -> (ConnectionId, Uuid, UnboundedReceiver<ServerMessage>) {
    let connection_id = ConnectionId::new();
    let receiver = manager.create_connection(connection_id).await;
    let engine = ConversationEngine::new(script, ConversationTimings::instant());
    let conversation_id = manager
        .start_conversation(connection_id, engine)
        .await
        .unwrap();
    (connection_id, conversation_id, receiver)
}

#[tokio::test]
async fn test_scripted_turn_emits_full_sequence() {
    let manager = Arc::new(ConnectionManager::new());
    let (connection_id, conversation_id, mut receiver) =
        setup_conversation(&manager, scripts::script_for(ChatSurface::Interview)).await;

    run_scripted_turn(
        manager.clone(),
        connection_id,
        conversation_id,
        ConversationTimings::instant(),
    )
    .await;

    let messages = drain(&mut receiver);
    assert!(matches!(
        messages.first(),
        Some(ServerMessage::PhaseChanged {
            phase: ConversationPhase::Thinking
        })
    ));
    assert!(matches!(
        messages.get(1),
        Some(ServerMessage::PhaseChanged {
            phase: ConversationPhase::Streaming
        })
    ));
    assert!(matches!(
        messages.last(),
        Some(ServerMessage::PhaseChanged {
            phase: ConversationPhase::Idle
        })
    ));

    // One finalized scripted message, preceded by at least one partial.
    let finalized: Vec<_> = messages
        .iter()
        .filter_map(|m| match m {
            ServerMessage::MessageAppended { message } => Some(message),
            _ => None,
        })
        .collect();
    assert_eq!(finalized.len(), 1);
    assert_eq!(finalized[0].sender, Sender::ScriptedParty);
    assert!(
        messages
            .iter()
            .any(|m| matches!(m, ServerMessage::StreamChunk { .. }))
    );
}

#[tokio::test]
async fn test_turn_for_ended_conversation_is_dropped() {
    let manager = Arc::new(ConnectionManager::new());
    let (connection_id, conversation_id, mut receiver) =
        setup_conversation(&manager, scripts::script_for(ChatSurface::Interview)).await;

    manager.end_conversation(connection_id).await;

    run_scripted_turn(
        manager.clone(),
        connection_id,
        conversation_id,
        ConversationTimings::instant(),
    )
    .await;

    assert!(drain(&mut receiver).is_empty());
}

#[tokio::test]
async fn test_turn_for_replaced_conversation_is_dropped() {
    let manager = Arc::new(ConnectionManager::new());
    let (connection_id, old_conversation_id, mut receiver) =
        setup_conversation(&manager, scripts::script_for(ChatSurface::Interview)).await;

    // Starting a new conversation invalidates continuations of the old one.
    let engine = ConversationEngine::new(
        scripts::script_for(ChatSurface::ContractNegotiation),
        ConversationTimings::instant(),
    );
    manager
        .start_conversation(connection_id, engine)
        .await
        .unwrap();

    run_scripted_turn(
        manager.clone(),
        connection_id,
        old_conversation_id,
        ConversationTimings::instant(),
    )
    .await;

    assert!(drain(&mut receiver).is_empty());
}

#[tokio::test]
async fn test_tool_interlude_progress_reaches_streaming() {
    let manager = Arc::new(ConnectionManager::new());

    // Certain tool use so the branch is exercised deterministically.
    let mut script = scripts::script_for(ChatSurface::AssistantManager);
    script.tool_use_probability = 1.0;
    let (connection_id, conversation_id, mut receiver) =
        setup_conversation(&manager, script).await;

    // The opening turn never runs a tool.
    run_scripted_turn(
        manager.clone(),
        connection_id,
        conversation_id,
        ConversationTimings::instant(),
    )
    .await;
    let opening = drain(&mut receiver);
    assert!(
        !opening
            .iter()
            .any(|m| matches!(m, ServerMessage::ToolUseProgress { .. }))
    );

    manager
        .with_engine(connection_id, conversation_id, |engine| {
            engine.submit_user_message("Let's review the squad").unwrap()
        })
        .await
        .unwrap();

    run_scripted_turn(
        manager.clone(),
        connection_id,
        conversation_id,
        ConversationTimings::instant(),
    )
    .await;

    let messages = drain(&mut receiver);
    let progress: Vec<u8> = messages
        .iter()
        .filter_map(|m| match m {
            ServerMessage::ToolUseProgress { progress, .. } => Some(*progress),
            _ => None,
        })
        .collect();

    assert!(!progress.is_empty());
    assert_eq!(progress[0], 0);
    assert!(progress.windows(2).all(|pair| pair[0] < pair[1]));
    // The full bar is shown before the reply streams.
    assert_eq!(*progress.last().unwrap(), 100);

    let tools: Vec<ToolKind> = messages
        .iter()
        .filter_map(|m| match m {
            ServerMessage::ToolUseProgress { tool, .. } => Some(*tool),
            _ => None,
        })
        .collect();
    // One tool per interlude.
    assert!(tools.windows(2).all(|pair| pair[0] == pair[1]));

    // The interlude is cosmetic; the reply still streams and finalizes.
    assert!(
        messages
            .iter()
            .any(|m| matches!(m, ServerMessage::MessageAppended { .. }))
    );
    assert!(matches!(
        messages.last(),
        Some(ServerMessage::PhaseChanged {
            phase: ConversationPhase::Idle
        })
    ));
}
