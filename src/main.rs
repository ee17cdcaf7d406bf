use anyhow::Context;
use clap::{Arg, Command};
use log::LevelFilter;
use phish_scout::{EmailPayload, RiskEngine, ScannerConfig};
use std::io::Read;
use std::path::Path;

fn main() -> anyhow::Result<()> {
    let matches = Command::new("phish-scout")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Composite phishing-risk scoring for inbound email")
        .arg(
            Arg::new("payload")
                .short('p')
                .long("payload")
                .value_name("FILE")
                .help("Email payload JSON file (reads stdin when omitted)"),
        )
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Scanner configuration YAML file (falls back to PHISH_* environment)"),
        )
        .arg(
            Arg::new("pretty")
                .long("pretty")
                .help("Pretty-print the verdict JSON")
                .action(clap::ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Enable verbose logging")
                .action(clap::ArgAction::SetTrue),
        )
        .get_matches();

    let log_level = if matches.get_flag("verbose") {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::from_default_env()
        .filter_level(log_level)
        .init();

    let config = match matches.get_one::<String>("config") {
        Some(path) => ScannerConfig::from_file(Path::new(path))?,
        None => ScannerConfig::from_env(),
    };

    let raw = match matches.get_one::<String>("payload") {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("reading payload file {}", path))?,
        None => {
            let mut buffer = String::new();
            std::io::stdin()
                .read_to_string(&mut buffer)
                .context("reading payload from stdin")?;
            buffer
        }
    };
    let payload: EmailPayload =
        serde_json::from_str(&raw).context("parsing email payload JSON")?;

    let engine = RiskEngine::new(config);
    let verdict = engine.evaluate(&payload);

    log::info!(
        "analyzed email sender={} risk_score={} risk_level={}",
        payload.sender_email,
        verdict.risk_score,
        verdict.risk_level
    );

    let output = if matches.get_flag("pretty") {
        serde_json::to_string_pretty(&verdict)?
    } else {
        serde_json::to_string(&verdict)?
    };
    println!("{}", output);

    Ok(())
}
