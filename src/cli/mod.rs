pub mod app;
pub mod commands;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod env;
pub mod generate;
pub mod info;
pub mod output;
pub mod record;
pub mod runtime;
pub mod selector;
pub mod timeline;

pub use app::run;
pub use generate::{cmd_generate, GenerateArgs};
pub use record::{cmd_record, RecordArgs};
pub use selector::{cmd_selector, SelectorArgs};
pub use timeline::{cmd_timeline, TimelineArgs};
