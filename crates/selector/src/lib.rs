//! Selector handling for recorded interactions
//!
//! - Structural selectors built from a DOM ancestor chain at capture time
//! - Canonicalization into stable automation selectors
//! - Approximate "same element" heuristics used when reconciling signals

pub mod build;
pub mod canonical;
pub mod dom;
pub mod overlap;

pub use build::{click_selector, field_selector, render_node};
pub use canonical::{canonicalize, CanonicalSelector, TEST_ID_ATTRIBUTE};
pub use dom::{DomNode, ElementInfo};
pub use overlap::{contains_either, leading_token, same_element};
