use clap::{CommandFactory, FromArgMatches, Parser};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use warcalc::config::{Config, DEFAULT_ENGINE_URL, DEFAULT_POINTS_LIMIT, DEFAULT_STORAGE_KEY};
use warcalc::error::WarcalcError;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    settings: Config,
}

fn parse(args: &[&str]) -> (Config, clap::ArgMatches) {
    let matches = TestCli::command().get_matches_from(
        std::iter::once("warcalc").chain(args.iter().copied()),
    );
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli.settings, matches)
}

fn file_config() -> Config {
    Config {
        engine_url: "http://engine.local/api/calculate".to_string(),
        data_dir: PathBuf::from("/srv/rosters"),
        storage_key: "tournament".to_string(),
        points_limit: 1000,
        request_timeout_secs: 30,
    }
}

#[test]
fn test_defaults_match_clap_defaults() {
    let (parsed, _) = parse(&[]);
    let default = Config::default();

    assert_eq!(parsed.engine_url, default.engine_url);
    assert_eq!(parsed.data_dir, default.data_dir);
    assert_eq!(parsed.storage_key, default.storage_key);
    assert_eq!(parsed.points_limit, default.points_limit);
    assert_eq!(parsed.request_timeout_secs, default.request_timeout_secs);

    assert_eq!(default.engine_url, DEFAULT_ENGINE_URL);
    assert_eq!(default.storage_key, DEFAULT_STORAGE_KEY);
    assert_eq!(default.points_limit, DEFAULT_POINTS_LIMIT);
    assert_eq!(default.request_timeout(), None);
}

#[test]
fn test_load_from_file_fills_missing_fields() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("warcalc.json");
    fs::write(&path, r#"{ "points_limit": 1500, "request_timeout_secs": 5 }"#).unwrap();

    let config = Config::load_from_file(&path).unwrap();
    assert_eq!(config.points_limit, 1500);
    assert_eq!(config.request_timeout(), Some(Duration::from_secs(5)));
    assert_eq!(config.engine_url, DEFAULT_ENGINE_URL);
    assert_eq!(config.storage_key, DEFAULT_STORAGE_KEY);
}

#[test]
fn test_load_from_file_errors() {
    let dir = tempfile::tempdir().unwrap();

    let missing = Config::load_from_file(dir.path().join("absent.json"));
    assert!(matches!(missing, Err(WarcalcError::Config(_))));

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ points_limit: ").unwrap();
    assert!(matches!(
        Config::load_from_file(&broken),
        Err(WarcalcError::Config(_))
    ));
}

#[test]
fn test_cli_defaults_do_not_override_file() {
    let (cli, matches) = parse(&[]);
    let mut config = file_config();
    config.merge_from_cli(&cli, &matches);

    assert_eq!(config.engine_url, "http://engine.local/api/calculate");
    assert_eq!(config.points_limit, 1000);
    assert_eq!(config.request_timeout_secs, 30);
}

#[test]
fn test_explicit_flags_override_file() {
    let (cli, matches) = parse(&[
        "--points-limit",
        "2500",
        "--engine-url",
        "http://127.0.0.1:9000/api/calculate",
    ]);
    let mut config = file_config();
    config.merge_from_cli(&cli, &matches);

    assert_eq!(config.points_limit, 2500);
    assert_eq!(config.engine_url, "http://127.0.0.1:9000/api/calculate");
    // untouched
    assert_eq!(config.storage_key, "tournament");
    assert_eq!(config.data_dir, PathBuf::from("/srv/rosters"));
}
