//! Host-supplied description of DOM nodes.

use serde::{Deserialize, Serialize};

const NON_TEXT_INPUT_TYPES: &[&str] = &[
    "checkbox", "radio", "button", "submit", "reset", "file", "image", "hidden", "range", "color",
];

/// What the host knows about one element at the time a signal fired.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementInfo {
    /// Lowercase local name (`button`, `input`, ...).
    pub tag: String,
    pub id: Option<String>,
    pub classes: Vec<String>,
    /// Value of the `data-testid` attribute.
    pub test_id: Option<String>,
    /// `type` attribute for `input` elements.
    pub input_type: Option<String>,
    pub name: Option<String>,
    /// 1-based position among the parent's element children.
    pub sibling_index: usize,
    pub sibling_count: usize,
}

impl ElementInfo {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into().to_ascii_lowercase(),
            sibling_index: 1,
            sibling_count: 1,
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_classes<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.classes = classes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_test_id(mut self, test_id: impl Into<String>) -> Self {
        self.test_id = Some(test_id.into());
        self
    }

    pub fn with_input_type(mut self, input_type: impl Into<String>) -> Self {
        self.input_type = Some(input_type.into().to_ascii_lowercase());
        self
    }

    pub fn with_position(mut self, index: usize, count: usize) -> Self {
        self.sibling_index = index;
        self.sibling_count = count;
        self
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn test_id(&self) -> Option<&str> {
        self.test_id.as_deref().filter(|id| !id.is_empty())
    }

    pub fn is_tag(&self, tag: &str) -> bool {
        self.tag.eq_ignore_ascii_case(tag)
    }

    /// `input` or `textarea`, regardless of input type.
    pub fn is_input_or_textarea(&self) -> bool {
        self.is_tag("input") || self.is_tag("textarea")
    }

    /// Fields whose value is typed rather than toggled or picked.
    pub fn is_text_like(&self) -> bool {
        if self.is_tag("textarea") {
            return true;
        }
        if !self.is_tag("input") {
            return false;
        }
        !NON_TEXT_INPUT_TYPES
            .iter()
            .any(|kind| self.has_input_type(kind))
    }

    /// Hosts may report the `type` attribute as written in the markup, so
    /// the comparison ignores case.
    pub fn has_input_type(&self, kind: &str) -> bool {
        self.input_type
            .as_deref()
            .map_or(false, |input_type| input_type.trim().eq_ignore_ascii_case(kind))
    }
}

/// One entry of an event's composed path, target first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "node", rename_all = "snake_case")]
pub enum DomNode {
    Element(ElementInfo),
    Document,
    Window,
}

impl DomNode {
    pub fn as_element(&self) -> Option<&ElementInfo> {
        match self {
            DomNode::Element(info) => Some(info),
            _ => None,
        }
    }
}

impl From<ElementInfo> for DomNode {
    fn from(info: ElementInfo) -> Self {
        DomNode::Element(info)
    }
}
