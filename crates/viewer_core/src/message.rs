use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Thread position of a message, 1-based. Exported snapshots carry it as a
/// decimal string; it is compared numerically everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct MessageId(pub u64);

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for MessageId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(MessageId)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TextOrNumber {
    Text(String),
    Number(u64),
}

impl<'de> Deserialize<'de> for MessageId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match TextOrNumber::deserialize(deserializer)? {
            TextOrNumber::Text(text) => text
                .parse()
                .map_err(|err| D::Error::custom(format!("invalid msg_num {text:?}: {err}"))),
            TextOrNumber::Number(n) => Ok(MessageId(n)),
        }
    }
}

impl Serialize for MessageId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Gender {
    #[serde(rename = "M")]
    Male,
    #[serde(rename = "F")]
    Female,
    #[default]
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct User {
    pub user_id: String,
    #[serde(default)]
    pub level: String,
}

impl User {
    pub const ADMIN_LEVEL: &'static str = "999";

    pub fn is_admin(&self) -> bool {
        self.level == Self::ADMIN_LEVEL
    }
}

/// Minimal identity of the message a reply quotes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRef {
    pub msg_num: MessageId,
    #[serde(default)]
    pub status: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Message {
    pub msg_num: MessageId,
    pub msg: String,
    #[serde(default)]
    pub user_nickname: String,
    #[serde(default)]
    pub user_gender: Gender,
    #[serde(default)]
    pub user: User,
    #[serde(default)]
    pub reply_time: i64,
    #[serde(default, deserialize_with = "counter")]
    pub like_count: String,
    #[serde(default, deserialize_with = "counter")]
    pub dislike_count: String,
    #[serde(default)]
    pub status: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<Box<QuoteRef>>,
}

/// Highest `status` that still renders; anything above is suppressed.
pub const MAX_VISIBLE_STATUS: u8 = 1;

impl Message {
    pub fn is_suppressed(&self) -> bool {
        self.status > MAX_VISIBLE_STATUS
    }

    /// Navigable quote target, if any. A quote of a suppressed message is
    /// shown as text only.
    pub fn quote_target(&self) -> Option<MessageId> {
        self.quote
            .as_deref()
            .filter(|quote| quote.status <= MAX_VISIBLE_STATUS)
            .map(|quote| quote.msg_num)
    }

    pub fn is_by(&self, user_id: &str) -> bool {
        self.user.user_id == user_id
    }
}

fn counter<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(match TextOrNumber::deserialize(deserializer)? {
        TextOrNumber::Text(text) => text,
        TextOrNumber::Number(n) => n.to_string(),
    })
}

/// Local image substituted into message bodies in place of its original URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle {
    /// Decoded original `src` URL.
    pub source: String,
    /// Locally-resolvable handle written into the body.
    pub handle: String,
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn msg_num_accepts_strings_and_numbers() {
        let from_text: MessageId = serde_json::from_str("\"57\"").unwrap();
        let from_number: MessageId = serde_json::from_str("57").unwrap();
        assert_eq!(from_text, MessageId(57));
        assert_eq!(from_number, MessageId(57));
        assert!(serde_json::from_str::<MessageId>("\"abc\"").is_err());
        assert_eq!(serde_json::to_string(&MessageId(9)).unwrap(), "\"9\"");
    }

    #[test]
    fn ids_order_numerically_not_lexically() {
        assert!(MessageId(9) < MessageId(10));
        assert_eq!(MessageId(137).to_string(), "137");
    }

    #[test]
    fn quote_of_suppressed_message_is_not_navigable() {
        let mut message = Message {
            msg_num: MessageId(57),
            quote: Some(Box::new(QuoteRef {
                msg_num: MessageId(52),
                status: 1,
            })),
            ..Message::default()
        };
        assert_eq!(message.quote_target(), Some(MessageId(52)));

        message.quote.as_mut().unwrap().status = 2;
        assert_eq!(message.quote_target(), None);
    }

    #[test]
    fn unknown_gender_and_extra_fields_are_tolerated() {
        let json = r#"{
            "msg_num": "3",
            "msg": "<p>hi</p>",
            "user_nickname": "anon",
            "user_gender": "X",
            "user": {"user_id": "8", "level": "999"},
            "reply_time": 1625079600,
            "like_count": 4,
            "dislike_count": "0",
            "status": 1,
            "quote": {"msg_num": "1", "status": 1, "msg": "quoted body", "user_nickname": "op"},
            "extra": true
        }"#;
        let message: Message = serde_json::from_str(json).unwrap();
        assert_eq!(message.user_gender, Gender::Unknown);
        assert!(message.user.is_admin());
        assert_eq!(message.like_count, "4");
        assert_eq!(message.quote_target(), Some(MessageId(1)));
        assert!(!message.is_suppressed());
    }
}
