//! Playwright script synthesis.
//!
//! [`generate_script`] is pure: the same timeline, metadata and options always
//! render byte-identical text.

pub mod errors;
pub mod escape;
pub mod options;
pub mod render;

pub use errors::{write_script, CodegenError};
pub use options::{ScriptMeta, ScriptOptions};
pub use render::generate_script;
