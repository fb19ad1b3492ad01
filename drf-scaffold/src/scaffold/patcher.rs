//! Idempotent text patching
//!
//! Target files are never parsed. Every edit is a literal marker lookup
//! followed by an insertion, and every insertion is guarded by a presence
//! check so re-running an edit does not duplicate imports or registrations.
//!
//! Edits are recorded in an [`EditLog`] and applied to an in-memory buffer,
//! so the whole transformation of a file can be computed and inspected
//! before anything touches the disk.

/// Strategy for finding anchors and fragments in a target file
///
/// [`SubstringMatcher`] is the stock strategy. A syntax-aware matcher can be
/// swapped in without touching the edits that use it.
pub trait TextMatcher {
    /// Byte offset just past the first occurrence of `anchor`
    fn locate_anchor(&self, content: &str, anchor: &str) -> Option<usize>;

    /// Whether `fragment` is already present
    fn contains_fragment(&self, content: &str, fragment: &str) -> bool;

    /// Insert `fragment` right after the first `anchor`, `None` if the anchor is missing
    fn insert_after_anchor(&self, content: &str, anchor: &str, fragment: &str) -> Option<String> {
        let at = self.locate_anchor(content, anchor)?;
        let mut patched = String::with_capacity(content.len() + fragment.len());
        patched.push_str(&content[..at]);
        patched.push_str(fragment);
        patched.push_str(&content[at..]);
        Some(patched)
    }
}

/// Exact, case-sensitive substring matching
#[derive(Debug, Clone, Copy, Default)]
pub struct SubstringMatcher;

impl TextMatcher for SubstringMatcher {
    fn locate_anchor(&self, content: &str, anchor: &str) -> Option<usize> {
        if anchor.is_empty() {
            return None;
        }
        content.find(anchor).map(|start| start + anchor.len())
    }

    fn contains_fragment(&self, content: &str, fragment: &str) -> bool {
        content.contains(fragment)
    }
}

/// One edit against a text buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEdit {
    /// Put `line` and a newline in front of the content unless `line` is present
    PrependIfAbsent {
        /// Line to prepend
        line: String,
    },
    /// Append `text` unless `needle` is present
    AppendIfAbsent {
        /// Presence check
        needle: String,
        /// Text appended when the needle is missing
        text: String,
    },
    /// Append `text` unconditionally
    Append {
        /// Text to append
        text: String,
    },
    /// Insert `fragment` after `anchor` unless `needle` is present
    ///
    /// When the anchor is missing, `fallback` is appended instead, or the
    /// content is left alone if there is no fallback.
    InsertAfterAnchor {
        /// Marker the fragment goes after
        anchor: String,
        /// Presence check
        needle: String,
        /// Text inserted after the anchor
        fragment: String,
        /// Text appended when the anchor is missing
        fallback: Option<String>,
    },
    /// Replace the whole content
    Overwrite {
        /// New content
        content: String,
    },
}

impl TextEdit {
    /// Guarded import line: `\n<line>\n` appended unless the line is present
    #[must_use]
    pub fn ensure_import(line: &str) -> Self {
        Self::AppendIfAbsent {
            needle: line.to_string(),
            text: format!("\n{line}\n"),
        }
    }

    /// Apply this edit with `matcher`, returning the new content
    #[must_use]
    pub fn apply(&self, matcher: &dyn TextMatcher, content: &str) -> String {
        match self {
            Self::PrependIfAbsent { line } => {
                if matcher.contains_fragment(content, line) {
                    tracing::debug!(line = %line, "line already present, not prepending");
                    content.to_string()
                } else {
                    format!("{line}\n{content}")
                }
            }
            Self::AppendIfAbsent { needle, text } => {
                if matcher.contains_fragment(content, needle) {
                    tracing::debug!(needle = %needle, "already present, not appending");
                    content.to_string()
                } else {
                    format!("{content}{text}")
                }
            }
            Self::Append { text } => format!("{content}{text}"),
            Self::InsertAfterAnchor {
                anchor,
                needle,
                fragment,
                fallback,
            } => {
                if matcher.contains_fragment(content, needle) {
                    tracing::debug!(needle = %needle, "fragment already present, skipping");
                    return content.to_string();
                }
                match matcher.insert_after_anchor(content, anchor, fragment) {
                    Some(patched) => patched,
                    None => {
                        tracing::debug!(anchor = %anchor, "anchor not found");
                        fallback.as_ref().map_or_else(
                            || content.to_string(),
                            |fallback| format!("{content}{fallback}"),
                        )
                    }
                }
            }
            Self::Overwrite { content } => content.clone(),
        }
    }
}

/// Insert `fragment` after `anchor` unless `fragment` is already present
///
/// The content is returned unchanged when the anchor is missing.
#[must_use]
pub fn insert_if_absent(
    matcher: &dyn TextMatcher,
    content: &str,
    anchor: &str,
    fragment: &str,
) -> String {
    TextEdit::InsertAfterAnchor {
        anchor: anchor.to_string(),
        needle: fragment.to_string(),
        fragment: fragment.to_string(),
        fallback: None,
    }
    .apply(matcher, content)
}

/// Ordered, append-only list of edits for one target file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditLog {
    edits: Vec<TextEdit>,
}

impl EditLog {
    /// Empty log
    #[must_use]
    pub const fn new() -> Self {
        Self { edits: Vec::new() }
    }

    /// Record an edit
    #[must_use]
    pub fn with(mut self, edit: TextEdit) -> Self {
        self.edits.push(edit);
        self
    }

    /// Record an edit in place
    pub fn push(&mut self, edit: TextEdit) {
        self.edits.push(edit);
    }

    /// Recorded edits, in application order
    #[must_use]
    pub fn edits(&self) -> &[TextEdit] {
        &self.edits
    }

    /// Whether nothing has been recorded
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Apply every edit in order with `matcher`
    #[must_use]
    pub fn apply_with(&self, matcher: &dyn TextMatcher, content: &str) -> String {
        self.edits
            .iter()
            .fold(content.to_string(), |acc, edit| edit.apply(matcher, &acc))
    }

    /// Apply every edit in order with [`SubstringMatcher`]
    #[must_use]
    pub fn apply(&self, content: &str) -> String {
        self.apply_with(&SubstringMatcher, content)
    }
}
