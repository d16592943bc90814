//! Entry classification by name.
//!
//! Exports put primary conversation documents at the archive root and keep
//! attachment payloads in subdirectories, so the decision is made from the
//! entry name alone. No entry bytes are read here.

/// Extension of structured conversation documents.
pub const DOCUMENT_EXTENSION: &str = "json";

/// Path components that mark vendor or system metadata.
const SYSTEM_MARKERS: &[&str] = &["__MACOSX"];

/// Built-in attachment extensions (lowercase, no dot).
pub const ATTACHMENT_EXTENSIONS: &[&str] = &[
    // documents
    "pdf", "doc", "docx", "txt", "md", "rtf", "odt", "html", "htm", "xml", "json",
    // images
    "png", "jpg", "jpeg", "gif", "webp", "bmp", "svg", "tif", "tiff", "heic", "ico",
    // audio
    "mp3", "wav", "ogg", "m4a", "flac", "aac",
    // video
    "mp4", "mov", "avi", "mkv", "webm", "m4v",
    // archives
    "zip", "tar", "gz", "tgz", "7z", "rar",
    // spreadsheets and presentations
    "csv", "xls", "xlsx", "ods", "ppt", "pptx",
];

/// What the archive parser should do with an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// Root-level JSON document that may hold a conversation.
    StructuredDocument,
    /// Binary payload to extract.
    Attachment,
    /// System noise or an unsupported file type.
    Discard,
}

/// Classifies an entry using only the built-in attachment extensions.
///
/// # Example
///
/// ```rust
/// use convopack::parsing::classify::{EntryKind, classify_entry};
///
/// assert_eq!(classify_entry("chat.json"), EntryKind::StructuredDocument);
/// assert_eq!(classify_entry("sub/chat.json"), EntryKind::Attachment);
/// assert_eq!(classify_entry("images/pic.png"), EntryKind::Attachment);
/// assert_eq!(classify_entry("__MACOSX/._pic.png"), EntryKind::Discard);
/// assert_eq!(classify_entry("setup.exe"), EntryKind::Discard);
/// ```
pub fn classify_entry(name: &str) -> EntryKind {
    classify_entry_with(name, &[])
}

/// Classifies an entry, accepting `extra_extensions` as attachments too.
///
/// `extra_extensions` match case-insensitively, with or without a leading
/// dot (`".KEY"` matches `deck.key`).
pub fn classify_entry_with(name: &str, extra_extensions: &[String]) -> EntryKind {
    if is_noise(name) {
        return EntryKind::Discard;
    }

    let Some(ext) = extension(name) else {
        return EntryKind::Discard;
    };

    if is_root_level(name) && ext.eq_ignore_ascii_case(DOCUMENT_EXTENSION) {
        return EntryKind::StructuredDocument;
    }

    let ext = ext.to_ascii_lowercase();
    let is_extra = extra_extensions
        .iter()
        .any(|extra| extra.trim_start_matches('.').eq_ignore_ascii_case(&ext));
    if ATTACHMENT_EXTENSIONS.contains(&ext.as_str()) || is_extra {
        EntryKind::Attachment
    } else {
        EntryKind::Discard
    }
}

/// Returns `true` for hidden files and anything under a system marker directory.
pub fn is_noise(name: &str) -> bool {
    if base_name(name).starts_with('.') {
        return true;
    }
    name.split(is_separator)
        .any(|component| SYSTEM_MARKERS.contains(&component))
}

/// Returns `true` if the name has no directory component.
pub fn is_root_level(name: &str) -> bool {
    !name.contains(is_separator)
}

/// Returns the last path component of an entry name.
pub fn base_name(name: &str) -> &str {
    name.rsplit(is_separator).next().unwrap_or(name)
}

/// Returns the base name without its final extension.
///
/// `"chat.json"` → `"chat"`, `"a.b.json"` → `"a.b"`, `".json"` → `".json"`.
pub fn file_stem(name: &str) -> &str {
    let base = base_name(name);
    match base.rfind('.') {
        Some(0) | None => base,
        Some(idx) => &base[..idx],
    }
}

/// Returns the extension of the base name, without the dot.
///
/// Names ending in a dot, or hidden names without a second dot, have none.
pub fn extension(name: &str) -> Option<&str> {
    let base = base_name(name);
    match base.rfind('.') {
        Some(0) | None => None,
        Some(idx) if idx + 1 == base.len() => None,
        Some(idx) => Some(&base[idx + 1..]),
    }
}

fn is_separator(c: char) -> bool {
    c == '/' || c == '\\'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_root_json_is_document() {
        assert_eq!(classify_entry("conversation.json"), EntryKind::StructuredDocument);
        assert_eq!(classify_entry("CHAT.JSON"), EntryKind::StructuredDocument);
    }

    #[test]
    fn test_nested_json_is_not_document() {
        assert_eq!(classify_entry("sub/doc.json"), EntryKind::Attachment);
        assert_eq!(classify_entry("a/b/c/doc.json"), EntryKind::Attachment);
        assert_eq!(classify_entry("sub\\doc.json"), EntryKind::Attachment);
    }

    #[test]
    fn test_attachments_by_extension() {
        assert_eq!(classify_entry("images/pic.png"), EntryKind::Attachment);
        assert_eq!(classify_entry("pic.JPG"), EntryKind::Attachment);
        assert_eq!(classify_entry("files/report.pdf"), EntryKind::Attachment);
        assert_eq!(classify_entry("audio/voice.m4a"), EntryKind::Attachment);
        assert_eq!(classify_entry("video/clip.mp4"), EntryKind::Attachment);
        assert_eq!(classify_entry("data/sheet.xlsx"), EntryKind::Attachment);
        assert_eq!(classify_entry("bundle.tar"), EntryKind::Attachment);
    }

    #[test]
    fn test_unsupported_extensions_discarded() {
        assert_eq!(classify_entry("setup.exe"), EntryKind::Discard);
        assert_eq!(classify_entry("lib/thing.so"), EntryKind::Discard);
        assert_eq!(classify_entry("README"), EntryKind::Discard);
        assert_eq!(classify_entry("trailing."), EntryKind::Discard);
    }

    #[test]
    fn test_noise_discarded() {
        assert_eq!(classify_entry(".DS_Store"), EntryKind::Discard);
        assert_eq!(classify_entry("images/.hidden.png"), EntryKind::Discard);
        assert_eq!(classify_entry("._chat.json"), EntryKind::Discard);
        assert_eq!(classify_entry("__MACOSX/images/pic.png"), EntryKind::Discard);
        assert_eq!(classify_entry("export/__MACOSX/pic.png"), EntryKind::Discard);
    }

    #[test]
    fn test_extra_extensions() {
        let extra = vec!["dat".to_string()];
        assert_eq!(classify_entry("blob.DAT"), EntryKind::Discard);
        assert_eq!(classify_entry_with("blob.DAT", &extra), EntryKind::Attachment);
        assert_eq!(classify_entry_with("nested/blob.dat", &extra), EntryKind::Attachment);
    }

    #[test]
    fn test_extra_extensions_unnormalized() {
        let extra = vec![".KEY".to_string(), "Dat".to_string()];
        assert_eq!(classify_entry_with("files/deck.key", &extra), EntryKind::Attachment);
        assert_eq!(classify_entry_with("files/blob.DAT", &extra), EntryKind::Attachment);
        assert_eq!(classify_entry_with("files/deck.keys", &extra), EntryKind::Discard);
    }

    #[test]
    fn test_base_name_and_stem() {
        assert_eq!(base_name("a/b/c.png"), "c.png");
        assert_eq!(base_name("a\\b\\c.png"), "c.png");
        assert_eq!(base_name("c.png"), "c.png");
        assert_eq!(file_stem("chat.json"), "chat");
        assert_eq!(file_stem("my.chat.json"), "my.chat");
        assert_eq!(file_stem("noext"), "noext");
        assert_eq!(file_stem(".json"), ".json");
    }

    #[test]
    fn test_extension() {
        assert_eq!(extension("a.tar.gz"), Some("gz"));
        assert_eq!(extension("dir.d/file"), None);
        assert_eq!(extension(".bashrc"), None);
        assert_eq!(extension("x."), None);
    }
}
