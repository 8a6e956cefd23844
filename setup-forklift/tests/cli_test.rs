use clap::Parser;
use setup_forklift::cli::Args;
use std::path::PathBuf;

#[test]
fn test_parse_version_and_token() {
    let args = Args::try_parse_from([
        "setup-forklift",
        "--version-spec",
        "^0.5.0",
        "--github-token",
        "ghp_example",
    ])
    .unwrap();

    assert_eq!(args.version_spec, "^0.5.0");
    assert_eq!(args.github_token(), Some("ghp_example".to_string()));
}

#[test]
fn test_blank_token_is_absent() {
    let args = Args::try_parse_from([
        "setup-forklift",
        "--version-spec",
        "latest",
        "--github-token",
        "   ",
    ])
    .unwrap();

    assert_eq!(args.github_token(), None);
}

#[test]
fn test_flags() {
    let args = Args::try_parse_from([
        "setup-forklift",
        "--version-spec",
        "edge",
        "--strict",
        "--verbose",
        "--config",
        "ci/setup-forklift.toml",
    ])
    .unwrap();

    assert!(args.strict);
    assert!(args.verbose);
    assert_eq!(args.config, Some(PathBuf::from("ci/setup-forklift.toml")));
}

#[test]
fn test_temp_dir_override() {
    let args = Args::try_parse_from([
        "setup-forklift",
        "--version-spec",
        "0.5.0",
        "--temp-dir",
        "/runner/_temp",
    ])
    .unwrap();

    assert_eq!(args.temp_dir(), PathBuf::from("/runner/_temp"));
}

#[test]
fn test_temp_dir_default() {
    let mut args = Args::try_parse_from(["setup-forklift", "--version-spec", "0.5.0"]).unwrap();
    args.temp_dir = None;

    assert_eq!(args.temp_dir(), std::env::temp_dir());
}

#[test]
fn test_command_is_well_formed() {
    use clap::CommandFactory;
    Args::command().debug_assert();
}

#[test]
fn test_strict_input_from_environment() {
    // The runner passes unset inputs as empty strings
    for (value, expected) in [("", false), ("false", false), ("true", true)] {
        std::env::set_var("INPUT_STRICT", value);
        let args = Args::try_parse_from(["setup-forklift", "--version-spec", "1.0.0"]).unwrap();
        assert_eq!(args.strict, expected, "INPUT_STRICT={value:?}");
    }
    std::env::remove_var("INPUT_STRICT");
}

#[test]
fn test_version_input_is_trimmed() {
    std::env::set_var("INPUT_VERSION", " latest ");
    let args = Args::try_parse_from(["setup-forklift"]).unwrap();
    std::env::remove_var("INPUT_VERSION");

    assert_eq!(args.version_spec(), "latest");
}

#[test]
fn test_version_flag_is_trimmed() {
    let args =
        Args::try_parse_from(["setup-forklift", "--version-spec", "  ^0.5.0\n"]).unwrap();
    assert_eq!(args.version_spec(), "^0.5.0");
}
