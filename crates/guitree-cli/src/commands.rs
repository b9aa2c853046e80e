use anyhow::Context;
use colored::Colorize;
use guitree_merge::{CommandSet, MergeConfig, MergeEngine, Restricted};
use guitree_types::{Element, UiTree};
use tracing::info;

use crate::cli::*;
use crate::load;
use crate::outline;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Merge(args) => cmd_merge(args, &cli.format),
        Command::Check(args) => cmd_check(args),
        Command::Show(args) => cmd_show(args, &cli.format),
    }
}

fn cmd_merge(args: MergeArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let base = load::read_document(&args.base)?;
    let overlays = args
        .overlays
        .iter()
        .map(|path| load::read_document(path).map(UiTree::from))
        .collect::<anyhow::Result<Vec<_>>>()?;

    let mut commands = match &args.commands_file {
        Some(path) => load::read_command_file(path)?,
        None => CommandSet::new(),
    };
    commands.extend(args.commands.iter().cloned());
    let registry = Restricted::new(commands).deny_all(args.deny.iter().cloned());

    let mut config = match &args.config {
        Some(path) => load::read_config(path)?,
        None => MergeConfig::default(),
    };
    config.drop_leading_separators |= args.drop_leading_separators;
    config.drop_trailing_weak_separator |= args.drop_trailing_separator;

    info!(
        overlays = overlays.len(),
        commands = registry.inner().len(),
        "merging"
    );
    let engine = MergeEngine::with_config(registry, config);
    let mut tree = UiTree::from(&base);
    let outcome = engine.merge_all(&mut tree, &overlays);
    let merged = tree.to_element();

    print_element(&merged, format)?;
    if outcome.prunable {
        eprintln!("{} merged root holds nothing live", "note:".yellow().bold());
    }
    if args.stats {
        eprintln!("{} {}", "stats:".cyan().bold(), outcome.stats);
    }
    Ok(())
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let mut failures = 0;
    for path in &args.files {
        match load::read_document(path) {
            Ok(element) => println!(
                "{} {} ({} elements)",
                "✓".green().bold(),
                path.display(),
                element.count()
            ),
            Err(err) => {
                failures += 1;
                println!("{} {}: {:#}", "✗".red().bold(), path.display(), err);
            }
        }
    }
    if failures > 0 {
        anyhow::bail!("{failures} of {} documents failed validation", args.files.len());
    }
    Ok(())
}

fn cmd_show(args: ShowArgs, format: &OutputFormat) -> anyhow::Result<()> {
    let element = load::read_document(&args.file)?;
    print_element(&element, format)
}

fn print_element(element: &Element, format: &OutputFormat) -> anyhow::Result<()> {
    match format {
        OutputFormat::Text => print!("{}", outline::render(element)),
        OutputFormat::Json => println!(
            "{}",
            serde_json::to_string_pretty(element).context("failed to serialize document")?
        ),
    }
    Ok(())
}
