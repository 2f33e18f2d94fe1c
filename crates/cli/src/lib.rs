pub mod commands;

use clap::{Parser, Subcommand};
use std::process::ExitCode;

use commands::recommend::RecommendArgs;

#[derive(Debug, Parser)]
#[command(
    name = "weddy",
    about = "Weddy operator CLI",
    long_about = "Operate the Weddy venue recommender: migrations, seed data, config inspection, readiness checks, and one-off recommendations.",
    after_help = "Examples:\n  weddy doctor --json\n  weddy config\n  weddy recommend --guest-count 중규모 --budget 고 --region 서울 --style 모던 --season 가을"
)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    #[command(about = "Apply pending database migrations and return structured status output")]
    Migrate,
    #[command(about = "Load the deterministic wedding hall catalogue and verify it")]
    Seed,
    #[command(about = "Inspect effective configuration values with source attribution")]
    Config,
    #[command(about = "Validate config, database connectivity, and the image directory")]
    Doctor {
        #[arg(long, help = "Emit machine-readable JSON output")]
        json: bool,
    },
    #[command(about = "Answer the questionnaire from the command line and print recommendations")]
    Recommend(RecommendArgs),
}

pub fn run() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Migrate => commands::migrate::run(),
        Command::Seed => commands::seed::run(),
        Command::Config => {
            commands::CommandResult { exit_code: 0, output: commands::config::run() }
        }
        Command::Doctor { json } => commands::doctor::run(json),
        Command::Recommend(args) => commands::recommend::run(args),
    };

    println!("{}", result.output);
    ExitCode::from(result.exit_code)
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn recommend_arguments_parse_with_defaults() {
        let cli = Cli::try_parse_from([
            "weddy",
            "recommend",
            "--guest-count",
            "중규모",
            "--region",
            "서울",
            "--explain",
        ])
        .expect("parse");

        match cli.command {
            Command::Recommend(args) => {
                assert_eq!(args.guest_count, "중규모");
                assert_eq!(args.region, "서울");
                assert_eq!(args.budget, "");
                assert_eq!(args.limit, None);
                assert!(args.explain);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn doctor_json_flag_parses() {
        let cli = Cli::try_parse_from(["weddy", "doctor", "--json"]).expect("parse");
        assert!(matches!(cli.command, Command::Doctor { json: true }));
    }
}
