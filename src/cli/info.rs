use anyhow::Result;

use crate::cli::context::CliContext;

pub async fn cmd_info(ctx: &CliContext) -> Result<()> {
    let config = ctx.config();

    println!("Playscribe Information");
    println!("======================");
    println!("Version: {}", env!("CARGO_PKG_VERSION"));
    println!("Build Date: {}", option_env!("BUILD_DATE").unwrap_or("unknown"));
    println!("Git Commit: {}", option_env!("GIT_HASH").unwrap_or("unknown"));
    println!();

    println!("Configuration:");
    println!("- Config Path: {}", ctx.config_path().display());
    println!("- Output Directory: {}", config.output_dir.display());
    println!(
        "- Input Debounce: {}ms",
        config.capture.input_debounce_delay_ms
    );
    println!(
        "- Windows: assertion {}ms, multi-click {}ms, form overlap {}ms",
        config.preprocess.assertion_window_ms,
        config.preprocess.multi_click_window_ms,
        config.preprocess.form_overlap_window_ms
    );
    println!(
        "- Channels: assertions={}, form controls={}",
        config.preprocess.channels.assertions, config.preprocess.channels.form_controls
    );
    println!(
        "- Script: title {:?}, settle wait {}ms, pacing over {}ms ({})",
        config.script.title,
        config.script.settle_wait_ms,
        config.script.pacing_threshold_ms,
        if config.script.render_pacing {
            "enabled"
        } else {
            "disabled"
        }
    );
    Ok(())
}
