//! Message node normalization.
//!
//! Export versions disagree on where a message keeps its author, text and
//! time. This module turns any of those shapes into a [`Message`], or into
//! nothing when the node carries no usable text.

use serde_json::{Map, Value};

use crate::{Message, Role};

/// Borrowed view of a raw message node.
///
/// Every field is optional and loosely typed; `null` counts as absent. The
/// resolution rules live in [`parse_raw_message`].
#[derive(Debug, Clone, Copy, Default)]
pub struct RawMessage<'a> {
    /// Direct role (`"user"`, `"assistant"`, ...)
    pub role: Option<&'a Value>,
    /// Author object, usually `{"role": "..."}`
    pub author: Option<&'a Value>,
    /// Message body
    pub content: Option<&'a Value>,
    /// Primary timestamp field
    pub timestamp: Option<&'a Value>,
    /// Secondary timestamp field
    pub create_time: Option<&'a Value>,
    /// Inline attachment references
    pub attachments: Option<&'a Value>,
}

impl<'a> RawMessage<'a> {
    /// Builds a view over a JSON object. Returns `None` for any other value.
    pub fn from_node(node: &'a Value) -> Option<Self> {
        let obj = node.as_object()?;
        Some(Self {
            role: present(obj, "role"),
            author: present(obj, "author"),
            content: present(obj, "content"),
            timestamp: present(obj, "timestamp"),
            create_time: present(obj, "create_time"),
            attachments: present(obj, "attachments"),
        })
    }
}

fn present<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

/// The shapes a message body can take, in order of precedence.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawContent<'a> {
    /// `"content": "Hello"`
    Text(&'a str),
    /// `"content": {"parts": ["Hello", "world"]}`
    Parts(&'a [Value]),
    /// `"content": {"text": "Hello"}`
    TextField(&'a str),
    /// Anything else, which resolves to empty text
    Other,
}

impl<'a> RawContent<'a> {
    /// Classifies a content value. The match arms are the precedence order.
    pub fn from_value(value: &'a Value) -> Self {
        match value {
            Value::String(text) => RawContent::Text(text),
            Value::Object(obj) => {
                if let Some(parts) = obj.get("parts").and_then(Value::as_array) {
                    RawContent::Parts(parts)
                } else if let Some(text) = obj.get("text").and_then(Value::as_str) {
                    RawContent::TextField(text)
                } else {
                    RawContent::Other
                }
            }
            _ => RawContent::Other,
        }
    }

    /// Resolves the body to text, before trimming.
    ///
    /// # Example
    ///
    /// ```rust
    /// use convopack::parsing::message::RawContent;
    /// use serde_json::json;
    ///
    /// let value = json!({"parts": ["Hi", 1, "there"]});
    /// assert_eq!(RawContent::from_value(&value).resolve(), "Hi there");
    ///
    /// let value = json!(42);
    /// assert_eq!(RawContent::from_value(&value).resolve(), "");
    /// ```
    pub fn resolve(&self) -> String {
        match self {
            RawContent::Text(text) | RawContent::TextField(text) => (*text).to_string(),
            RawContent::Parts(parts) => parts
                .iter()
                .filter_map(Value::as_str)
                .collect::<Vec<_>>()
                .join(" "),
            RawContent::Other => String::new(),
        }
    }
}

/// Normalizes one message node of unknown shape.
///
/// Returns `None` if the node is not an object, has no `content`, or its
/// content resolves to whitespace.
pub fn normalize_message(node: &Value) -> Option<Message> {
    RawMessage::from_node(node).and_then(|raw| parse_raw_message(&raw))
}

/// Applies the resolution rules to a raw message view.
pub fn parse_raw_message(raw: &RawMessage<'_>) -> Option<Message> {
    let body = RawContent::from_value(raw.content?).resolve();

    let content = body.trim();
    if content.is_empty() {
        return None;
    }

    Some(Message {
        role: resolve_role(raw),
        content: content.to_string(),
        timestamp: resolve_timestamp(raw),
        attachments: resolve_attachments(raw),
    })
}

/// Direct `role`, then `author.role`, then [`Role::User`].
///
/// Only canonical names count at either level; a non-canonical direct role
/// still lets a canonical `author.role` win.
pub fn resolve_role(raw: &RawMessage<'_>) -> Role {
    let direct = raw.role.and_then(Value::as_str);
    let nested = raw
        .author
        .and_then(|author| author.get("role"))
        .and_then(Value::as_str);

    if let Some(role) = direct.and_then(Role::from_canonical) {
        return role;
    }
    if let Some(role) = nested.and_then(Role::from_canonical) {
        return role;
    }

    if let Some(unknown) = direct.or(nested) {
        tracing::debug!(role = unknown, "unrecognized message role, defaulting to user");
    }
    Role::default()
}

fn resolve_timestamp(raw: &RawMessage<'_>) -> Option<String> {
    [raw.timestamp, raw.create_time]
        .into_iter()
        .flatten()
        .find_map(Value::as_str)
        .map(ToString::to_string)
}

fn resolve_attachments(raw: &RawMessage<'_>) -> Vec<String> {
    raw.attachments
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(ToString::to_string)
                .collect()
        })
        .unwrap_or_default()
}
