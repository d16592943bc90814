//! Conversation document normalization.
//!
//! Two historical shapes are reconciled here:
//!
//! - **Flat**: `{"id", "title", "messages": [node, node, ...]}`
//! - **Mapping graph**: `{"id", "title", "mapping": {key: {"message": node}, ...}}`
//!
//! Older exports additionally wrap the whole document under a
//! `"conversation"` key.
//!
//! Mapping values are visited in document order (serde_json is built with
//! `preserve_order`). That order is not guaranteed to be the conversational
//! order; the graph's parent/children links are not followed.

use serde_json::{Map, Value};

use super::classify::file_stem;
use super::message::normalize_message;
use crate::conversation::{Conversation, ConversationMetadata, UNTITLED_CONVERSATION};
use crate::Message;

/// Normalizes one document read from `entry_name`.
///
/// Returns `None` if the document is not an object or yields no usable
/// messages.
///
/// # Example
///
/// ```rust
/// use convopack::parsing::conversation::normalize_conversation;
/// use serde_json::json;
///
/// let doc = json!({
///     "title": "Greeting",
///     "messages": [
///         {"role": "user", "content": "Hello"},
///         {"role": "assistant", "content": {"parts": ["Hi", "there"]}}
///     ]
/// });
///
/// let conversation = normalize_conversation(&doc, "greeting.json").unwrap();
/// assert_eq!(conversation.id, "greeting");
/// assert_eq!(conversation.messages.len(), 2);
/// assert_eq!(conversation.messages[1].content, "Hi there");
/// ```
pub fn normalize_conversation(document: &Value, entry_name: &str) -> Option<Conversation> {
    normalize_conversation_at(document, entry_name, None)
}

/// Like [`normalize_conversation`], for the `index`-th document of an entry
/// that holds an array of documents.
///
/// The index only matters when the id has to be derived: it becomes
/// `"{stem}-{index}"` so sibling documents stay distinct.
pub fn normalize_conversation_at(
    document: &Value,
    entry_name: &str,
    index: Option<usize>,
) -> Option<Conversation> {
    let doc = unwrap_document(document.as_object()?);

    let messages = collect_messages(doc);
    if messages.is_empty() {
        tracing::debug!(entry = entry_name, ?index, "document has no usable messages");
        return None;
    }

    let id = identifier_field(doc, "id")
        .or_else(|| identifier_field(doc, "conversation_id"))
        .unwrap_or_else(|| derive_id(entry_name, index));

    let title = text_field(doc, "title")
        .or_else(|| text_field(doc, "name"))
        .unwrap_or_else(|| UNTITLED_CONVERSATION.to_string());

    let created_at = timestamp_field(doc, &["create_time", "created_at"]);
    let updated_at = timestamp_field(doc, &["update_time", "updated_at"]);

    Some(Conversation {
        id,
        title,
        created_at,
        updated_at,
        metadata: ConversationMetadata {
            source_entry: entry_name.to_string(),
            message_count: messages.len(),
            source_index: index,
        },
        messages,
    })
}

/// Normalizes a flat list of message nodes, preserving order.
pub fn normalize_message_list(nodes: &[Value]) -> Vec<Message> {
    nodes.iter().filter_map(normalize_message).collect()
}

/// Normalizes mapping-graph nodes in the order given.
///
/// Each node may wrap its message under a `"message"` key; a node without
/// one is treated as the message itself.
///
/// ```rust
/// use convopack::parsing::conversation::normalize_mapping_nodes;
/// use serde_json::json;
///
/// let first = json!({"message": {"content": {"parts": ["one"]}}});
/// let second = json!({"message": {"content": {"parts": ["two"]}}});
///
/// // Order is whatever the caller supplies.
/// let messages = normalize_mapping_nodes([("b", &second), ("a", &first)]);
/// assert_eq!(messages[0].content, "two");
/// assert_eq!(messages[1].content, "one");
/// ```
pub fn normalize_mapping_nodes<'a, I>(nodes: I) -> Vec<Message>
where
    I: IntoIterator<Item = (&'a str, &'a Value)>,
{
    nodes
        .into_iter()
        .filter_map(|(key, node)| {
            let message = normalize_message(unwrap_mapping_node(node));
            if message.is_none() {
                tracing::trace!(node = key, "mapping node has no usable message");
            }
            message
        })
        .collect()
}

fn collect_messages(doc: &Map<String, Value>) -> Vec<Message> {
    if let Some(list) = doc.get("messages").and_then(Value::as_array) {
        normalize_message_list(list)
    } else if let Some(mapping) = doc.get("mapping").and_then(Value::as_object) {
        normalize_mapping_nodes(mapping.iter().map(|(key, node)| (key.as_str(), node)))
    } else {
        Vec::new()
    }
}

fn unwrap_document(doc: &Map<String, Value>) -> &Map<String, Value> {
    doc.get("conversation")
        .and_then(Value::as_object)
        .unwrap_or(doc)
}

fn unwrap_mapping_node(node: &Value) -> &Value {
    node.get("message")
        .filter(|inner| !inner.is_null())
        .unwrap_or(node)
}

fn derive_id(entry_name: &str, index: Option<usize>) -> String {
    let stem = file_stem(entry_name);
    match index {
        Some(index) => format!("{stem}-{index}"),
        None => stem.to_string(),
    }
}

// Ids may be numeric in some exports.
fn identifier_field(doc: &Map<String, Value>, key: &str) -> Option<String> {
    match doc.get(key)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn text_field(doc: &Map<String, Value>, key: &str) -> Option<String> {
    doc.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(ToString::to_string)
}

fn timestamp_field(doc: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| match doc.get(*key)? {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
