use clap::Subcommand;

use super::config::ConfigArgs;
use super::generate::GenerateArgs;
use super::record::RecordArgs;
use super::selector::SelectorArgs;
use super::timeline::TimelineArgs;

#[derive(Subcommand, Clone)]
pub enum Commands {
    /// Generate a Playwright test from a recorded trace
    Generate(GenerateArgs),

    /// Preprocess a recorded trace and export its canonical timeline
    Timeline(TimelineArgs),

    /// Print the canonical form of one or more selectors
    Selector(SelectorArgs),

    /// Replay a page signal log through the recorder and save the trace
    Record(RecordArgs),

    /// Manage playscribe configuration
    Config(ConfigArgs),

    /// Show build information and effective settings
    Info,
}
