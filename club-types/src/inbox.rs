use serde::{Deserialize, Serialize};
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InboxAttachment {
    pub name: String,
    pub size: String,
    pub kind: String,
}

/// One message in the club inbox. Read-only demo data; the view layer
/// derives filtered lists and unread counts without mutating it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct InboxMessage {
    pub id: String,
    pub from: String,
    pub from_email: String,
    pub avatar: String,
    pub subject: String,
    pub preview: String,
    pub content: String,
    pub timestamp: String,
    pub is_read: bool,
    pub is_starred: bool,
    pub attachments: Vec<InboxAttachment>,
}
