use clap::Parser;
use kira_consensus::cli::{Cli, Commands};

#[test]
fn run_threads_default_to_config() {
    let cli = Cli::parse_from([
        "kira-consensus",
        "run",
        "--config",
        "bench.json",
        "--out",
        "out",
    ]);
    match cli.command {
        Commands::Run(args) => {
            assert_eq!(args.threads, None);
            assert!(!args.json);
            assert!(!args.tsv);
        }
        _ => panic!("expected run command"),
    }
}

#[test]
fn run_flags_are_accepted() {
    let cli = Cli::parse_from([
        "kira-consensus",
        "run",
        "--config",
        "bench.json",
        "--out",
        "out",
        "--threads",
        "4",
        "--json",
        "--tsv",
    ]);
    match cli.command {
        Commands::Run(args) => {
            assert_eq!(args.threads, Some(4));
            assert!(args.json);
            assert!(args.tsv);
        }
        _ => panic!("expected run command"),
    }
}

#[test]
fn background_takes_several_gmt_files() {
    let cli = Cli::parse_from([
        "kira-consensus",
        "background",
        "--gmt",
        "a.gmt",
        "b.gmt",
        "--out",
        "counts.json",
    ]);
    match cli.command {
        Commands::Background(args) => assert_eq!(args.gmt.len(), 2),
        _ => panic!("expected background command"),
    }
}

#[test]
fn background_requires_gmt() {
    assert!(Cli::try_parse_from(["kira-consensus", "background", "--out", "c.json"]).is_err());
}
