use chrono::{ DateTime, Local, Utc };
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rendered transcript line. Never mutated once created.
#[derive(Clone, Debug, PartialEq)]
pub struct Message {
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Local>,
}

impl Message {
    pub fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            text: text.into(),
            sender,
            timestamp: Local::now(),
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User)
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Bot)
    }

    pub fn display_time(&self, format: &str) -> String {
        self.timestamp.format(format).to_string()
    }
}

const CONVERSATION_PREFIX: &str = "chat_";

/// Client-generated conversation token, `chat_<unix millis>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ConversationId(String);

impl ConversationId {
    pub fn generate() -> Self {
        Self::at(Utc::now())
    }

    pub fn at(instant: DateTime<Utc>) -> Self {
        Self(format!("{}{}", CONVERSATION_PREFIX, instant.timestamp_millis()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn conversation_id_is_prefixed_millis() {
        let instant = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
        assert_eq!(ConversationId::at(instant).as_str(), "chat_1700000000123");
    }

    #[test]
    fn ids_one_millisecond_apart_differ() {
        let first = Utc.timestamp_millis_opt(1_700_000_000_000).unwrap();
        let second = first + chrono::Duration::milliseconds(1);
        assert_ne!(ConversationId::at(first), ConversationId::at(second));
    }

    #[test]
    fn message_time_uses_given_format() {
        let mut msg = Message::bot("hi");
        msg.timestamp = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 0).unwrap();
        assert_eq!(msg.display_time("%H:%M"), "07:05");
        assert_eq!(msg.sender.to_string(), "bot");
    }
}
