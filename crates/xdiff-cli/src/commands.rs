use std::io::IsTerminal;

use anyhow::{bail, Context};
use colored::Colorize;
use xdiff_engine::{DiffConfig, DiffRecord};
use xdiff_policy::{diff_and_classify, normalize_path, Ruleset, RulesetSource};
use xdiff_render::{Format, Summary};
use xdiff_tree::parse_file;

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Diff(args) => cmd_diff(args, cli.format),
        Command::Normalize(args) => {
            println!("{}", normalize_path(&args.path));
            Ok(())
        }
        Command::CheckPolicy(args) => cmd_check_policy(args, cli.format),
    }
}

/// Configuration for a diff run: the config file (if any) with command-line
/// overrides applied.
fn load_config(args: &DiffArgs) -> anyhow::Result<DiffConfig> {
    let mut config = match &args.config {
        Some(path) => DiffConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DiffConfig::default(),
    };
    if let Some(dir) = &args.policy_dir {
        config.policy_dir = Some(dir.clone());
    }
    if args.no_policy {
        config.classify = false;
    }
    if args.suppress_positional_after_move {
        config.suppress_positional_after_move = true;
    }
    Ok(config)
}

fn run_diff(args: &DiffArgs) -> anyhow::Result<Vec<DiffRecord>> {
    let config = load_config(args)?;
    let old = parse_file(&args.old).with_context(|| format!("parsing {}", args.old.display()))?;
    let new = parse_file(&args.new).with_context(|| format!("parsing {}", args.new.display()))?;
    let source = RulesetSource::from_config(&config, args.policy.clone());
    tracing::debug!(?source, "ruleset source");
    Ok(diff_and_classify(&old, &new, &config, source)?)
}

fn render_format(format: OutputFormat, to_terminal: bool) -> Format {
    match format {
        OutputFormat::Text => Format::Text { color: to_terminal },
        OutputFormat::Json => Format::Json,
        OutputFormat::Html => Format::Html,
    }
}

fn cmd_diff(args: DiffArgs, format: OutputFormat) -> anyhow::Result<()> {
    let records = run_diff(&args)?;
    let summary = Summary::from_records(&records);

    match &args.output {
        Some(path) => {
            let report = render_format(format, false).render(&records)?;
            std::fs::write(path, report)
                .with_context(|| format!("writing {}", path.display()))?;
            println!("{} {} written to {}", "✓".green(), summary, path.display().to_string().bold());
        }
        None => {
            let to_terminal = std::io::stdout().is_terminal();
            let report = render_format(format, to_terminal).render(&records)?;
            if !report.is_empty() {
                println!("{report}");
            }
            if matches!(format, OutputFormat::Text) {
                println!("{}", summary.to_string().bold());
            }
        }
    }

    if args.fail_on_error && summary.has_errors() {
        bail!(
            "{} record(s) classified as error",
            summary.verdict_count(xdiff_engine::Verdict::Error)
        );
    }
    Ok(())
}

fn cmd_check_policy(args: CheckPolicyArgs, format: OutputFormat) -> anyhow::Result<()> {
    let ruleset = Ruleset::load(&args.file)?
        .with_context(|| format!("ruleset {} not found or unreadable", args.file.display()))?;

    if matches!(format, OutputFormat::Json) {
        println!("{}", serde_json::to_string_pretty(&ruleset)?);
        return Ok(());
    }
    println!("{} {} rules in {}", "✓".green().bold(), ruleset.len(), args.file.display());
    for rule in ruleset.iter() {
        let mut line = format!("  {:<5} {}", rule.verdict.to_string(), rule.key());
        if !rule.note.is_empty() {
            line.push_str(&format!("  // {}", rule.note));
        }
        println!("{line}");
    }
    Ok(())
}
