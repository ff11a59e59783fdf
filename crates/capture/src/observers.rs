//! Which page elements currently have capture listeners wired.
//!
//! Forms and media elements present at start are wired on attach; ones that
//! appear later are wired when their insertion is observed. Signals from
//! elements that were never wired are not recorded, matching a page where no
//! listener would have fired.

use std::collections::BTreeSet;

use tracing::debug;

use crate::config::CaptureConfig;
use crate::signals::{DomElement, NodeKey};

#[derive(Debug, Clone, Default)]
pub struct ObserverRegistry {
    attached: bool,
    forms: BTreeSet<NodeKey>,
    media: BTreeSet<NodeKey>,
    custom_events: BTreeSet<String>,
}

/// Elements wired by one attach or insertion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WiredCount {
    pub forms: usize,
    pub media: usize,
}

impl ObserverRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attach(&mut self, document: &[DomElement], cfg: &CaptureConfig) -> WiredCount {
        self.attached = true;
        self.forms.clear();
        self.media.clear();
        self.wire(document, cfg)
    }

    /// Subtree-insertion observation. Ignored while detached.
    pub fn observe_inserted(&mut self, nodes: &[DomElement], cfg: &CaptureConfig) -> WiredCount {
        if !self.attached {
            return WiredCount::default();
        }
        let wired = self.wire(nodes, cfg);
        if wired.forms + wired.media > 0 {
            debug!(forms = wired.forms, media = wired.media, "wired inserted elements");
        }
        wired
    }

    pub fn detach(&mut self) {
        self.attached = false;
        self.forms.clear();
        self.media.clear();
    }

    pub fn is_form_wired(&self, key: NodeKey) -> bool {
        self.forms.contains(&key)
    }

    pub fn is_media_wired(&self, key: NodeKey) -> bool {
        self.media.contains(&key)
    }

    /// Custom event names survive detach; they are part of the page setup,
    /// not of one session.
    pub fn register_custom_event(&mut self, name: &str) -> bool {
        self.custom_events.insert(name.to_string())
    }

    pub fn is_custom_event_registered(&self, name: &str) -> bool {
        self.custom_events.contains(name)
    }

    fn wire(&mut self, roots: &[DomElement], cfg: &CaptureConfig) -> WiredCount {
        let mut count = WiredCount::default();
        for node in roots.iter().flat_map(DomElement::walk) {
            if cfg.form_interactions && node.info.is_tag("form") && self.forms.insert(node.key) {
                count.forms += 1;
            }
            if cfg.audio_video_interaction
                && (node.info.is_tag("video") || node.info.is_tag("audio"))
                && self.media.insert(node.key)
            {
                count.media += 1;
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use playscribe_selector::ElementInfo;

    fn page() -> Vec<DomElement> {
        vec![
            DomElement::new(1, ElementInfo::new("main")).with_children(vec![
                DomElement::new(2, ElementInfo::new("form")),
                DomElement::new(3, ElementInfo::new("video")),
            ]),
        ]
    }

    #[test]
    fn attach_wires_static_elements() {
        let mut registry = ObserverRegistry::new();
        let wired = registry.attach(&page(), &CaptureConfig::default());
        assert_eq!(wired, WiredCount { forms: 1, media: 1 });
        assert!(registry.is_form_wired(NodeKey(2)));
        assert!(registry.is_media_wired(NodeKey(3)));
    }

    #[test]
    fn inserted_subtrees_are_wired_like_static_ones() {
        let mut registry = ObserverRegistry::new();
        registry.attach(&page(), &CaptureConfig::default());
        let inserted = vec![DomElement::new(10, ElementInfo::new("section")).with_children(vec![
            DomElement::new(11, ElementInfo::new("form")),
            DomElement::new(12, ElementInfo::new("audio")),
        ])];
        let wired = registry.observe_inserted(&inserted, &CaptureConfig::default());
        assert_eq!(wired, WiredCount { forms: 1, media: 1 });
        assert!(registry.is_form_wired(NodeKey(11)));
        assert!(registry.is_media_wired(NodeKey(12)));
    }

    #[test]
    fn disabled_families_are_not_wired() {
        let cfg = CaptureConfig {
            form_interactions: false,
            audio_video_interaction: false,
            ..CaptureConfig::default()
        };
        let mut registry = ObserverRegistry::new();
        assert_eq!(registry.attach(&page(), &cfg), WiredCount::default());
    }

    #[test]
    fn detached_registry_ignores_insertions() {
        let mut registry = ObserverRegistry::new();
        registry.attach(&page(), &CaptureConfig::default());
        registry.register_custom_event("cart:add");
        registry.detach();
        let inserted = vec![DomElement::new(20, ElementInfo::new("form"))];
        registry.observe_inserted(&inserted, &CaptureConfig::default());
        assert!(!registry.is_form_wired(NodeKey(20)));
        assert!(!registry.is_form_wired(NodeKey(2)));
        assert!(registry.is_custom_event_registered("cart:add"));
    }
}
