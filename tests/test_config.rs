use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use space_shooter::config::*;

fn parse(args: &[&str]) -> Args {
    Args::try_parse_from(std::iter::once("space_shooter").chain(args.iter().copied()))
        .expect("arguments should parse")
}

#[test]
fn defaults_follow_terminal_size() {
    let config = GameConfig::resolve(parse(&[]), 80, 30).unwrap();
    assert_eq!(config.width, 800.0);
    assert_eq!(config.height, 600.0);
    assert_eq!(config.fps, DEFAULT_FPS);
    assert_eq!(config.seed, None);
    assert_eq!(config.log_file, None);
}

#[test]
fn explicit_flags_override_defaults() {
    let args = parse(&[
        "--width", "1024", "--height", "768", "--fps", "30", "--seed", "9", "--log-file",
        "game.log",
    ]);
    let config = GameConfig::resolve(args, 80, 30).unwrap();
    assert_eq!(config.width, 1024.0);
    assert_eq!(config.height, 768.0);
    assert_eq!(config.fps, 30);
    assert_eq!(config.seed, Some(9));
    assert_eq!(config.log_file, Some(PathBuf::from("game.log")));
}

#[test]
fn tiny_terminal_is_rejected() {
    let err = GameConfig::resolve(parse(&[]), 8, 4).unwrap_err();
    assert_eq!(
        err,
        ConfigError::CanvasTooSmall {
            width: 80.0,
            height: 80.0
        }
    );
    assert!(err.to_string().contains("too small"));
}

#[test]
fn fps_must_be_in_range() {
    let err = GameConfig::resolve(parse(&["--fps", "0"]), 80, 30).unwrap_err();
    assert_eq!(err, ConfigError::FpsOutOfRange { fps: 0 });
    let err = GameConfig::resolve(parse(&["--fps", "500"]), 80, 30).unwrap_err();
    assert_eq!(err, ConfigError::FpsOutOfRange { fps: 500 });
}

#[test]
fn frame_duration_matches_fps() {
    let config = GameConfig::resolve(parse(&["--fps", "50"]), 80, 30).unwrap();
    assert_eq!(config.frame_duration(), Duration::from_millis(20));
}
