use clap::Parser;
use log::{LevelFilter, info};
use log4rs::{
    append::console::{ConsoleAppender, Target},
    config::{Appender, Config as LogConfig, Logger, Root},
    encode::pattern::PatternEncoder,
};
use penalty_box::config::Config;
use std::path::PathBuf;

mod driver;
use driver::Summary;

mod script;
use script::GameScript;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// TOML game script to replay
    script: PathBuf,

    #[clap(long, short)]
    /// TOML file with the penalty rules and team strength to use
    config: Option<PathBuf>,

    #[clap(long)]
    /// Print the summary as JSON
    json: bool,

    #[clap(long, short, action(clap::ArgAction::Count))]
    /// Increase the log verbosity
    verbose: u8,
}

const APP_NAME: &str = "penalty_sim";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };

    #[cfg(not(target_os = "windows"))]
    let console_target = Target::Stderr;
    #[cfg(target_os = "windows")]
    let console_target = Target::Stdout; // Windows apps don't get a stderr handle
    let console = ConsoleAppender::builder()
        .target(console_target)
        .encoder(Box::new(PatternEncoder::new("[{d} {h({l:5})} {M}] {m}{n}")))
        .build();

    // Setup the logging from all locations to use `LevelFilter::Error`
    let root = Root::builder().appender("console");
    let root = root.build(LevelFilter::Error);

    // Setup the top level logging config
    let log_config =
        LogConfig::builder().appender(Appender::builder().build("console", Box::new(console)));

    let log_config = log_config
        .logger(Logger::builder().build(APP_NAME, log_level)) // Setup the logging from this app to use `log_level`
        .logger(Logger::builder().build("penalty_box", log_level))
        .build(root)?;

    log4rs::init_config(log_config)?;
    log_panics::init();

    let config = match args.config {
        Some(path) => {
            info!("Loading config from {}", path.display());
            Config::new_from_file(path)?
        }
        None => Config::default(),
    };

    info!("Replaying {}", args.script.display());
    let script = GameScript::new_from_file(&args.script)?;
    let summary = driver::run(&script, &config);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        print_summary(&summary);
    }

    Ok(())
}

fn print_summary(summary: &Summary) {
    println!(
        "Final score after {} minutes: Home {}, Away {}",
        summary.length, summary.scores.home, summary.scores.away
    );

    println!("Goals:");
    for goal in summary.goals.iter() {
        let player = goal
            .player
            .map(|num| format!(" #{num}"))
            .unwrap_or_default();
        println!("  {:>6.2}  {}{player} ({})", goal.at, goal.team, goal.situation);
    }

    println!("Penalties served:");
    for release in summary.releases.iter() {
        println!(
            "  {:>6.2}  {} #{} ({})",
            release.at, release.team, release.player, release.infraction
        );
    }

    for (team, serving) in summary.still_serving.iter() {
        for pen in serving.iter() {
            println!(
                "Still serving: {team} #{} {} ({}), {:.2} left",
                pen.participant, pen.kind, pen.infraction, pen.minutes_left
            );
        }
    }
}
