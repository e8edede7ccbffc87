// cli.rs - Command-line flags layered over the optional config file

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use conway::LifeConfig;

pub fn command() -> Command<'static> {
    Command::new("conway")
        .about("Conway's Game of Life")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .takes_value(true)
                .value_parser(value_parser!(PathBuf))
                .help("JSON settings file"),
        )
        .arg(
            Arg::new("width")
                .long("width")
                .takes_value(true)
                .value_parser(value_parser!(usize))
                .help("Board width in cells"),
        )
        .arg(
            Arg::new("height")
                .long("height")
                .takes_value(true)
                .value_parser(value_parser!(usize))
                .help("Board height in cells"),
        )
        .arg(
            Arg::new("interval-ms")
                .long("interval-ms")
                .takes_value(true)
                .value_parser(value_parser!(u64))
                .help("Milliseconds between generations"),
        )
        .arg(
            Arg::new("seed")
                .long("seed")
                .takes_value(true)
                .value_parser(value_parser!(u64))
                .help("Fixed seed for the random fill"),
        )
        .arg(
            Arg::new("no-stop-on-cycle")
                .long("no-stop-on-cycle")
                .action(ArgAction::SetTrue)
                .help("Keep running when the board repeats itself"),
        )
}

/// Builds the effective settings: defaults, then the config file, then flags.
pub fn resolve(matches: &ArgMatches) -> Result<LifeConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => LifeConfig::from_json_file(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => LifeConfig::default(),
    };

    if let Some(&width) = matches.get_one::<usize>("width") {
        config.width = width;
    }
    if let Some(&height) = matches.get_one::<usize>("height") {
        config.height = height;
    }
    if let Some(&interval) = matches.get_one::<u64>("interval-ms") {
        config.tick_interval_ms = interval;
    }
    if let Some(&seed) = matches.get_one::<u64>("seed") {
        config.rng_seed = Some(seed);
    }
    if matches.get_one::<bool>("no-stop-on-cycle").copied().unwrap_or(false) {
        config.stop_on_cycle = false;
    }

    config.validate().context("invalid command-line settings")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve_args(args: &[&str]) -> Result<LifeConfig> {
        let matches = command().try_get_matches_from(args)?;
        resolve(&matches)
    }

    #[test]
    fn no_flags_gives_defaults() {
        assert_eq!(resolve_args(&["conway"]).unwrap(), LifeConfig::default());
    }

    #[test]
    fn flags_override_defaults() {
        let config = resolve_args(&[
            "conway",
            "--width", "80",
            "--height", "24",
            "--interval-ms", "50",
            "--seed", "9",
            "--no-stop-on-cycle",
        ])
        .unwrap();
        assert_eq!((config.width, config.height), (80, 24));
        assert_eq!(config.tick_interval_ms, 50);
        assert_eq!(config.rng_seed, Some(9));
        assert!(!config.stop_on_cycle);
    }

    #[test]
    fn zero_width_is_rejected() {
        assert!(resolve_args(&["conway", "--width", "0"]).is_err());
    }

    #[test]
    fn non_numeric_height_is_rejected() {
        assert!(resolve_args(&["conway", "--height", "tall"]).is_err());
    }

    #[test]
    fn missing_config_file_is_reported() {
        let err = resolve_args(&["conway", "--config", "/nonexistent/conway.json"]).unwrap_err();
        assert!(err.to_string().contains("loading settings"));
    }
}
