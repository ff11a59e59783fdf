use super::config::cmd_config;
use super::env::CliArgs;
use super::generate::cmd_generate;
use super::info::cmd_info;
use super::record::cmd_record;
use super::selector::cmd_selector;
use super::timeline::cmd_timeline;
use crate::cli::commands::Commands;
use crate::cli::context::CliContext;
use anyhow::Result;

pub async fn dispatch(cli: &CliArgs, ctx: &CliContext) -> Result<()> {
    match cli.command.clone() {
        Commands::Generate(args) => cmd_generate(args, ctx).await,
        Commands::Timeline(args) => cmd_timeline(args, ctx).await,
        Commands::Selector(args) => cmd_selector(args).await,
        Commands::Record(args) => cmd_record(args, ctx).await,
        Commands::Config(args) => cmd_config(args, ctx).await,
        Commands::Info => cmd_info(ctx).await,
    }
}
