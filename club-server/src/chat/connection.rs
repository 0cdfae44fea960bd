use std::collections::HashMap;
use std::fmt;
use std::time::{Duration, Instant};
use tokio::sync::{RwLock, mpsc};
use uuid::Uuid;

use club_core::ConversationEngine;
use club_types::{ServerMessage, User};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(Uuid);

impl ConnectionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

pub struct ActiveConversation {
    pub id: Uuid,
    pub engine: ConversationEngine,
}

pub struct Connection {
    pub id: ConnectionId,
    pub user: Option<User>,
    pub connected_at: Instant,
    pub last_activity: Instant,
    pub conversation: Option<ActiveConversation>,
    pub sender: mpsc::UnboundedSender<ServerMessage>,
}

impl Connection {
    pub fn new(id: ConnectionId) -> (Self, mpsc::UnboundedReceiver<ServerMessage>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let now = Instant::now();

        let connection = Self {
            id,
            user: None,
            connected_at: now,
            last_activity: now,
            conversation: None,
            sender,
        };

        (connection, receiver)
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn update_activity(&mut self) {
        self.last_activity = Instant::now();
    }

    pub fn send_message(&self, message: ServerMessage) -> Result<(), String> {
        self.sender
            .send(message)
            .map_err(|_| "Connection closed".to_string())
    }

    pub fn is_inactive(&self, timeout: Duration) -> bool {
        self.last_activity.elapsed() > timeout
    }
}

pub struct ConnectionManager {
    connections: RwLock<HashMap<ConnectionId, Connection>>,
}

impl ConnectionManager {
    pub fn new() -> Self {
        Self {
            connections: RwLock::new(HashMap::new()),
        }
    }

    pub async fn create_connection(
        &self,
        id: ConnectionId,
    ) -> mpsc::UnboundedReceiver<ServerMessage> {
        let (conn, receiver) = Connection::new(id);

        let mut connections = self.connections.write().await;
        connections.insert(id, conn);

        receiver
    }

    pub async fn remove_connection(&self, id: ConnectionId) {
        let mut connections = self.connections.write().await;
        connections.remove(&id);
    }

    pub async fn update_activity(&self, id: ConnectionId) {
        let mut connections = self.connections.write().await;
        if let Some(connection) = connections.get_mut(&id) {
            connection.update_activity();
        }
    }

    pub async fn set_connection_user(&self, id: ConnectionId, user: User) {
        let mut connections = self.connections.write().await;
        if let Some(connection) = connections.get_mut(&id) {
            connection.user = Some(user);
        }
    }

    pub async fn connection_user(&self, id: ConnectionId) -> Option<User> {
        let connections = self.connections.read().await;
        connections.get(&id).and_then(|c| c.user.clone())
    }

    pub async fn is_authenticated(&self, id: ConnectionId) -> bool {
        let connections = self.connections.read().await;
        connections.get(&id).is_some_and(|c| c.is_authenticated())
    }

    pub async fn send_to_connection(
        &self,
        id: ConnectionId,
        message: ServerMessage,
    ) -> Result<(), String> {
        let connections = self.connections.read().await;
        if let Some(connection) = connections.get(&id) {
            connection.send_message(message)
        } else {
            Err("Connection not found".to_string())
        }
    }

    /// Installs a fresh conversation on the connection, replacing any
    /// previous one, and returns its id. Timed continuations belonging to
    /// the replaced conversation become stale and are dropped by
    /// [`ConnectionManager::with_engine`].
    pub async fn start_conversation(
        &self,
        id: ConnectionId,
        engine: ConversationEngine,
    ) -> Option<Uuid> {
        let mut connections = self.connections.write().await;
        let connection = connections.get_mut(&id)?;
        let conversation_id = Uuid::new_v4();
        connection.conversation = Some(ActiveConversation {
            id: conversation_id,
            engine,
        });
        Some(conversation_id)
    }

    pub async fn conversation_id(&self, id: ConnectionId) -> Option<Uuid> {
        let connections = self.connections.read().await;
        connections
            .get(&id)
            .and_then(|c| c.conversation.as_ref())
            .map(|c| c.id)
    }

    pub async fn end_conversation(&self, id: ConnectionId) {
        let mut connections = self.connections.write().await;
        if let Some(connection) = connections.get_mut(&id) {
            connection.conversation = None;
        }
    }

    /// Runs a closure against the engine, but only while the same
    /// conversation is still installed on a live connection. Late timer
    /// continuations from a closed or replaced conversation get None and
    /// must not apply their update.
    pub async fn with_engine<R>(
        &self,
        id: ConnectionId,
        conversation_id: Uuid,
        f: impl FnOnce(&mut ConversationEngine) -> R,
    ) -> Option<R> {
        let mut connections = self.connections.write().await;
        let connection = connections.get_mut(&id)?;
        let conversation = connection.conversation.as_mut()?;
        if conversation.id != conversation_id {
            return None;
        }
        Some(f(&mut conversation.engine))
    }

    pub async fn cleanup_inactive_connections(&self, timeout: Duration) {
        let inactive_connections: Vec<ConnectionId> = {
            let connections = self.connections.read().await;
            connections
                .values()
                .filter(|conn| conn.is_inactive(timeout))
                .map(|conn| conn.id)
                .collect()
        };

        for connection_id in inactive_connections {
            tracing::info!("Removing inactive connection: {}", connection_id);
            self.remove_connection(connection_id).await;
        }
    }

    pub async fn connection_count(&self) -> usize {
        let connections = self.connections.read().await;
        connections.len()
    }
}

impl Default for ConnectionManager {
    fn default() -> Self {
        Self::new()
    }
}
