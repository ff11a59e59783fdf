//! Signals a host delivers to the recorder.

use playscribe_core_types::UserInfo;
use playscribe_selector::{DomNode, ElementInfo};
use serde::{Deserialize, Serialize};

/// Host-assigned identity of a DOM node, stable for the page's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeKey(pub u64);

/// An element together with its subtree, as reported on load or insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomElement {
    pub key: NodeKey,
    #[serde(flatten)]
    pub info: ElementInfo,
    #[serde(default)]
    pub children: Vec<DomElement>,
}

impl DomElement {
    pub fn new(key: u64, info: ElementInfo) -> Self {
        Self {
            key: NodeKey(key),
            info,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<DomElement>) -> Self {
        self.children = children;
        self
    }

    /// This element and every descendant, depth first.
    pub fn walk(&self) -> Vec<&DomElement> {
        let mut out = Vec::new();
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            out.push(node);
            stack.extend(node.children.iter().rev());
        }
        out
    }
}

/// What the host knows about the page when recording starts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PageEnvironment {
    pub user_info: UserInfo,
    /// Top-level elements of the document body.
    pub document: Vec<DomElement>,
}

/// One observed page signal. Paths are composed event paths, target first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PageSignal {
    Click {
        x: f64,
        y: f64,
        path: Vec<DomNode>,
    },
    Input {
        path: Vec<DomNode>,
        value: String,
    },
    Focus {
        path: Vec<DomNode>,
    },
    Blur {
        path: Vec<DomNode>,
        #[serde(default)]
        value: String,
    },
    /// `change` on a checkbox, radio button or select.
    FormControl {
        path: Vec<DomNode>,
        #[serde(default)]
        value: String,
        #[serde(default)]
        checked: Option<bool>,
        #[serde(default)]
        option_text: Option<String>,
    },
    KeyDown {
        key: String,
        #[serde(default)]
        target: Option<ElementInfo>,
    },
    Navigation {
        url: String,
    },
    FormSubmit {
        form: NodeKey,
        #[serde(default)]
        name: Option<String>,
    },
    MediaPlay {
        element: NodeKey,
        #[serde(default)]
        source: String,
    },
    NodesInserted {
        nodes: Vec<DomElement>,
    },
    TouchStart {
        x: f64,
        y: f64,
    },
    Resize {
        width: u32,
        height: u32,
    },
    VisibilityChange {
        state: String,
    },
    Scroll {
        x: f64,
        y: f64,
    },
    MouseMove {
        x: f64,
        y: f64,
    },
    Custom {
        name: String,
        #[serde(default)]
        detail: Option<String>,
    },
}

impl PageSignal {
    pub fn name(&self) -> &'static str {
        match self {
            PageSignal::Click { .. } => "click",
            PageSignal::Input { .. } => "input",
            PageSignal::Focus { .. } => "focus",
            PageSignal::Blur { .. } => "blur",
            PageSignal::FormControl { .. } => "form_control",
            PageSignal::KeyDown { .. } => "key_down",
            PageSignal::Navigation { .. } => "navigation",
            PageSignal::FormSubmit { .. } => "form_submit",
            PageSignal::MediaPlay { .. } => "media_play",
            PageSignal::NodesInserted { .. } => "nodes_inserted",
            PageSignal::TouchStart { .. } => "touch_start",
            PageSignal::Resize { .. } => "resize",
            PageSignal::VisibilityChange { .. } => "visibility_change",
            PageSignal::Scroll { .. } => "scroll",
            PageSignal::MouseMove { .. } => "mouse_move",
            PageSignal::Custom { .. } => "custom",
        }
    }
}
