use chrono::Utc;
use uuid::Uuid;

use wellness_types::api::{ChatReply, SendMessageRequest};
use wellness_types::events::SliceName;
use wellness_types::models::{ChatMessage, Conversation, MessageRole};

use crate::scope::ViewScope;
use crate::slice::Settled;
use crate::store::Store;

const DRAFT_TITLE: &str = "New conversation";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChatState {
    pub conversations: Vec<Conversation>,
    pub active_conversation: Option<Uuid>,
    /// An assistant reply is on its way.
    pub is_typing: bool,
}

impl ChatState {
    pub fn active(&self) -> Option<&Conversation> {
        let id = self.active_conversation?;
        self.conversations.iter().find(|c| c.id == id)
    }

    fn conversation_mut(&mut self, id: Uuid) -> Option<&mut Conversation> {
        self.conversations.iter_mut().find(|c| c.id == id)
    }

    /// Local conversation with no messages yet; the backend creates its copy
    /// on the first message.
    fn open_draft(&mut self, user_id: Uuid) -> Uuid {
        let now = Utc::now();
        let id = Uuid::new_v4();
        self.conversations.insert(
            0,
            Conversation {
                id,
                user_id,
                title: DRAFT_TITLE.to_string(),
                messages: vec![],
                created_at: now,
                updated_at: now,
            },
        );
        self.active_conversation = Some(id);
        id
    }

    fn apply_reply(&mut self, reply: ChatReply, optimistic_id: Uuid, user_id: Uuid) {
        match self.conversation_mut(reply.conversation_id) {
            Some(conversation) => {
                conversation.title = reply.title;
                match conversation.messages.iter_mut().find(|m| m.id == optimistic_id) {
                    Some(message) => *message = reply.user_message,
                    None => conversation.messages.push(reply.user_message),
                }
                conversation.updated_at = reply.assistant_message.timestamp;
                conversation.messages.push(reply.assistant_message);
            }
            None => {
                // Dropped locally (e.g. by a refetch) while the reply was in flight.
                self.conversations.insert(
                    0,
                    Conversation {
                        id: reply.conversation_id,
                        user_id,
                        title: reply.title,
                        created_at: reply.user_message.timestamp,
                        updated_at: reply.assistant_message.timestamp,
                        messages: vec![reply.user_message, reply.assistant_message],
                    },
                );
            }
        }
    }
}

impl Store {
    pub async fn fetch_conversations(&self, scope: &ViewScope, user_id: Uuid) -> Settled {
        let api = self.inner.api.clone();
        self.dispatch(
            &self.inner.chat,
            SliceName::Chat,
            "fetch_conversations",
            scope,
            async move { api.conversations(user_id).await },
            |state: &mut ChatState, conversations: Vec<Conversation>| {
                state.conversations = conversations;
                if state.active().is_none() {
                    state.active_conversation = None;
                }
            },
        )
        .await
    }

    /// Returns false when no loaded conversation has this id.
    pub async fn select_conversation(&self, id: Uuid) -> bool {
        self.update(&self.inner.chat, SliceName::Chat, "select_conversation", |slice| {
            let exists = slice.data.conversations.iter().any(|c| c.id == id);
            if exists {
                slice.data.active_conversation = Some(id);
            }
            exists
        })
        .await
    }

    pub async fn start_new_conversation(&self, user_id: Uuid) -> Uuid {
        self.update(&self.inner.chat, SliceName::Chat, "start_new_conversation", |slice| {
            slice.data.open_draft(user_id)
        })
        .await
    }

    /// Optimistically append the user's message to the active conversation
    /// (opening a draft if there is none), then append the assistant reply
    /// once the backend answers. A failed or abandoned send keeps the user's
    /// message; a scope cancelled beforehand sends nothing.
    pub async fn send_chat_message(
        &self,
        scope: &ViewScope,
        user_id: Uuid,
        content: impl Into<String>,
    ) -> Settled {
        if scope.is_cancelled() {
            return Settled::Cancelled;
        }
        let content = content.into();

        let (conversation_id, optimistic_id) =
            self.update(&self.inner.chat, SliceName::Chat, "send_message", |slice| {
                let state = &mut slice.data;
                let active = state.active().map(|c| c.id);
                let conversation_id = match active {
                    Some(id) => id,
                    None => state.open_draft(user_id),
                };

                let now = Utc::now();
                let message = ChatMessage {
                    id: Uuid::new_v4(),
                    role: MessageRole::User,
                    content: content.clone(),
                    timestamp: now,
                };
                let optimistic_id = message.id;
                if let Some(conversation) = state.conversation_mut(conversation_id) {
                    conversation.messages.push(message);
                    conversation.updated_at = now;
                }
                state.is_typing = true;
                (conversation_id, optimistic_id)
            })
            .await;

        let api = self.inner.api.clone();
        let req = SendMessageRequest {
            conversation_id,
            content,
        };
        self.dispatch_with(
            &self.inner.chat,
            SliceName::Chat,
            "send_message",
            scope,
            async move { api.send_message(user_id, req).await },
            move |state: &mut ChatState, reply: ChatReply| {
                state.apply_reply(reply, optimistic_id, user_id)
            },
            |state: &mut ChatState| state.is_typing = false,
        )
        .await
    }

    pub async fn clear_chat_error(&self) {
        self.update(&self.inner.chat, SliceName::Chat, "clear_error", |slice| {
            slice.clear_error()
        })
        .await;
    }
}
