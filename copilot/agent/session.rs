use thiserror::Error;

use crate::{
    chat::{ChatMessage, ChatResponder, GREETING},
    listing::ValidatedListing,
};

/// Whether the chat accepts messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversationState {
    /// No validated listing yet.
    Idle,
    /// A validated listing is attached.
    Enabled,
}

/// Reasons a chat message is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChatError {
    /// Sent before a listing validated.
    #[error("chat unlocks once a listing passes validation")]
    Locked,
    /// Message was blank after trimming.
    #[error("message is empty")]
    EmptyMessage,
}

/// Chat history bound to the most recently validated listing.
#[derive(Debug, Clone, Default)]
pub struct ConversationSession {
    responder: ChatResponder,
    listing: Option<ValidatedListing>,
    messages: Vec<ChatMessage>,
}

impl ConversationSession {
    /// Idle session answering through `responder`.
    #[must_use]
    pub const fn new(responder: ChatResponder) -> Self {
        Self {
            responder,
            listing: None,
            messages: Vec::new(),
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> ConversationState {
        if self.listing.is_some() {
            ConversationState::Enabled
        } else {
            ConversationState::Idle
        }
    }

    /// Attached listing, if any.
    #[must_use]
    pub const fn listing(&self) -> Option<&ValidatedListing> {
        self.listing.as_ref()
    }

    /// Full history, oldest first.
    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Binds a listing and restarts the history with the greeting.
    pub fn attach_listing(&mut self, listing: ValidatedListing) {
        self.listing = Some(listing);
        self.messages.clear();
        self.messages.push(ChatMessage::assistant(GREETING));
    }

    /// Back to idle; history is dropped.
    pub fn detach(&mut self) {
        self.listing = None;
        self.messages.clear();
    }

    /// Appends the trimmed message and its reply, returning the reply.
    pub fn send(&mut self, text: &str) -> Result<&ChatMessage, ChatError> {
        let listing = self.listing.as_ref().ok_or(ChatError::Locked)?;
        let text = text.trim();
        if text.is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let reply = self.responder.reply(listing, &self.messages, text);
        self.messages.push(ChatMessage::user(text));
        self.messages.push(reply);
        self.messages.last().ok_or(ChatError::EmptyMessage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{chat::ChatRole, listing::validated_with};

    #[test]
    fn idle_session_rejects_messages() {
        let mut session = ConversationSession::default();
        assert_eq!(session.state(), ConversationState::Idle);
        assert_eq!(session.send("hello").unwrap_err(), ChatError::Locked);
        assert!(session.messages().is_empty());
    }

    #[test]
    fn attaching_resets_to_greeting() {
        let mut session = ConversationSession::default();
        session.attach_listing(validated_with(|_| {}));
        session.send("price?").unwrap();
        assert_eq!(session.messages().len(), 3);

        session.attach_listing(validated_with(|raw| raw.location = Some("Pune".into())));
        assert_eq!(session.state(), ConversationState::Enabled);
        assert_eq!(session.messages().len(), 1);
        assert_eq!(session.messages()[0].content, GREETING);
        assert_eq!(session.listing().unwrap().location, "Pune");
    }

    #[test]
    fn send_appends_user_then_reply() {
        let mut session = ConversationSession::default();
        session.attach_listing(validated_with(|_| {}));
        let reply = session.send("  Can you deliver?  ").unwrap().clone();
        let messages = session.messages();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[1].role, ChatRole::User);
        assert_eq!(messages[1].content, "Can you deliver?");
        assert_eq!(messages[2], reply);
        assert_eq!(reply.role, ChatRole::Assistant);
    }

    #[test]
    fn blank_messages_are_refused() {
        let mut session = ConversationSession::default();
        session.attach_listing(validated_with(|_| {}));
        assert_eq!(session.send("   ").unwrap_err(), ChatError::EmptyMessage);
        assert_eq!(session.messages().len(), 1);
    }

    #[test]
    fn detach_locks_again() {
        let mut session = ConversationSession::default();
        session.attach_listing(validated_with(|_| {}));
        session.detach();
        assert_eq!(session.state(), ConversationState::Idle);
        assert!(session.messages().is_empty());
    }
}
