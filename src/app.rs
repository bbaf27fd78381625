//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - loads and normalizes the transaction sheet
//! - recomputes the price statistics
//! - prints reports/plots
//! - writes optional exports

use clap::Parser;

use crate::cli::{Command, StatsArgs, TuiArgs};
use crate::domain::WeightConfig;
use crate::error::AppError;
use crate::session::Session;

/// Entry point for the `lotdash` binary.
pub fn run() -> Result<(), AppError> {
    // We want `lotdash` and `lotdash -f data.csv` to behave like
    // `lotdash tui ...`.
    //
    // Clap requires a subcommand name, so we do a small, explicit rewrite of
    // the argv list before parsing. This preserves a clean clap structure
    // while retaining the requested UX.
    let argv = rewrite_args(std::env::args().collect());
    let cli = crate::cli::Cli::parse_from(argv);

    match cli.command {
        Command::Stats(args) => handle_stats(args),
        Command::Tui(args) => handle_tui(args),
    }
}

fn handle_stats(args: StatsArgs) -> Result<(), AppError> {
    let path = match &args.file {
        Some(path) => crate::cli::picker::validate_sheet_path(path)?,
        None => crate::cli::picker::prompt_for_sheet_path()?,
    };

    let mut session = Session::new();
    session.set_weights(WeightConfig::new(args.w_recent, args.w_mid, args.w_old));
    session.load_file(&path)?;

    let summary = session.summary();
    println!("{}", crate::report::format_report(&session, &summary));

    if args.plot && !args.no_plot {
        let plot = crate::plot::render_ascii_trend(&summary.yearly_medians, args.width, args.height);
        println!("{plot}");
    }

    // Optional exports.
    if let Some(out) = &args.export {
        crate::io::export::write_yearly_csv(out, &summary.yearly_medians)?;
    }
    if let Some(out) = &args.export_summary {
        crate::io::export::write_summary_json(
            out,
            &path,
            session.dataset().len(),
            &session.weights(),
            &summary,
        )?;
    }

    Ok(())
}

fn handle_tui(args: TuiArgs) -> Result<(), AppError> {
    crate::tui::run(args)
}

/// Rewrite argv so `lotdash` defaults to `lotdash tui`.
///
/// Rules:
/// - `lotdash`                       -> `lotdash tui`
/// - `lotdash -f data.csv ...`       -> `lotdash tui -f data.csv ...`
/// - `lotdash --help/--version/-h`   -> unchanged (top-level help/version)
fn rewrite_args(mut argv: Vec<String>) -> Vec<String> {
    let Some(arg1) = argv.get(1).cloned() else {
        argv.push("tui".to_string());
        return argv;
    };

    let is_top_level_help_or_version =
        matches!(arg1.as_str(), "-h" | "--help" | "-V" | "--version" | "help");
    if is_top_level_help_or_version {
        return argv;
    }

    let is_subcommand = matches!(arg1.as_str(), "stats" | "tui");
    if is_subcommand {
        return argv;
    }

    // If the first token is a flag, treat it as "tui flags".
    if arg1.starts_with('-') {
        argv.insert(1, "tui".to_string());
        return argv;
    }

    // Otherwise, leave as-is.
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn bare_invocation_defaults_to_tui() {
        assert_eq!(rewrite_args(args(&["lotdash"])), args(&["lotdash", "tui"]));
    }

    #[test]
    fn leading_flag_is_rewritten_to_tui() {
        assert_eq!(
            rewrite_args(args(&["lotdash", "-f", "data.csv"])),
            args(&["lotdash", "tui", "-f", "data.csv"])
        );
    }

    #[test]
    fn subcommands_and_help_pass_through() {
        assert_eq!(
            rewrite_args(args(&["lotdash", "stats", "-f", "x.csv"])),
            args(&["lotdash", "stats", "-f", "x.csv"])
        );
        assert_eq!(rewrite_args(args(&["lotdash", "--help"])), args(&["lotdash", "--help"]));
    }
}
