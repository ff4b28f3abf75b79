use anyhow::{Result, bail};
use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use kira_consensus::background::{self, BackgroundCounts};
use kira_consensus::cli::{BackgroundArgs, Cli, Commands};
use kira_consensus::ctx::Ctx;
use kira_consensus::io;
use kira_consensus::pipeline::Pipeline;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => {
            let mut ctx = Ctx::new(
                args.config,
                args.out,
                args.json,
                args.tsv,
                env!("CARGO_PKG_VERSION"),
            );
            ctx.threads = args.threads;
            Pipeline::benchmark().run(&mut ctx)?;
            print_summary(&ctx)?;
        }
        Commands::Background(args) => handle_background(args)?,
        Commands::Validate(args) => {
            let mut ctx = Ctx::new(
                args.config,
                PathBuf::from("."),
                false,
                false,
                env!("CARGO_PKG_VERSION"),
            );
            Pipeline::validation().run(&mut ctx)?;
            print!("{}", io::summary::format_validation(&ctx)?);
            print_warnings(&ctx);
            let empty = io::summary::methods_without_trials(&ctx)?;
            if !empty.is_empty() {
                bail!("no usable trials for {}", empty.join(", "));
            }
        }
    }

    Ok(())
}

fn print_summary(ctx: &Ctx) -> Result<()> {
    let summary = io::summary::format_summary(ctx)?;
    print!("{}", summary);
    print_warnings(ctx);
    Ok(())
}

fn print_warnings(ctx: &Ctx) {
    if !ctx.warnings.is_empty() {
        println!("warnings:");
        for warning in &ctx.warnings {
            println!("- {}", warning);
        }
    }
}

fn handle_background(args: BackgroundArgs) -> Result<()> {
    let mut merged = BackgroundCounts::default();
    for path in &args.gmt {
        merged.accumulate(background::counts_from_gmt(path)?);
    }
    background::write_counts_json(&args.out, &merged)?;
    println!("entities: {}", merged.len());
    println!("written: {}", args.out.display());
    Ok(())
}
