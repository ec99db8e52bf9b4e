//! Styled text runs, in the shape of a Yjs text delta.

use serde::{Deserialize, Serialize};

/// Boolean style flags carried by a run. Passed to renderers as-is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RunAttributes {
    #[serde(default, skip_serializing_if = "is_false")]
    pub bold: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub italic: bool,
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

impl RunAttributes {
    pub const BOLD: Self = Self {
        bold: true,
        italic: false,
    };

    pub const ITALIC: Self = Self {
        bold: false,
        italic: true,
    };

    /// True when no flag is set.
    pub fn is_plain(&self) -> bool {
        !self.bold && !self.italic
    }
}

/// One contiguous span of text sharing the same attributes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Run {
    pub insert: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attributes: Option<RunAttributes>,
}

impl Run {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            insert: text.into(),
            attributes: None,
        }
    }

    pub fn styled(text: impl Into<String>, attributes: RunAttributes) -> Self {
        Self {
            insert: text.into(),
            attributes: Some(attributes),
        }
    }

    /// Length of the payload in UTF-16 code units.
    pub fn len(&self) -> usize {
        utf16_len(&self.insert)
    }

    pub fn is_empty(&self) -> bool {
        self.insert.is_empty()
    }

    /// Attributes with `None` read as all flags off.
    pub fn style(&self) -> RunAttributes {
        self.attributes.unwrap_or_default()
    }
}

/// Number of UTF-16 code units needed to encode `text`.
pub fn utf16_len(text: &str) -> usize {
    text.chars().map(char::len_utf16).sum()
}
