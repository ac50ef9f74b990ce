use super::*;


pub(super) fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

#[test]
fn cli_parse_generate() {
    match parse(&["scriptgen", "generate", "the history of the bicycle"]) {
        CliCommand::Generate {
            topic,
            policy,
            history,
        } => {
            assert_eq!(topic, "the history of the bicycle");
            assert!(policy.mode.is_none());
            assert!(policy.max_retries.is_none());
            assert!(!history);
        }
        _ => panic!("expected Generate"),
    }
}

#[test]
fn cli_parse_generate_with_flags() {
    match parse(&[
        "scriptgen",
        "generate",
        "bees",
        "--mode",
        "direct",
        "--max-retries",
        "3",
        "--backoff-factor",
        "0.5",
        "--history",
    ]) {
        CliCommand::Generate {
            topic,
            policy,
            history,
        } => {
            assert_eq!(topic, "bees");
            assert_eq!(policy.mode, Some(CallMode::Direct));
            assert_eq!(policy.max_retries, Some(3));
            assert_eq!(policy.backoff_factor, Some(0.5));
            assert!(history);
        }
        _ => panic!("expected Generate"),
    }
}

#[test]
fn cli_parse_generate_bad_mode() {
    assert!(Cli::try_parse_from(["scriptgen", "generate", "x", "--mode", "sometimes"]).is_err());
}

#[test]
fn cli_parse_generate_requires_topic() {
    assert!(Cli::try_parse_from(["scriptgen", "generate"]).is_err());
}

#[test]
fn cli_parse_session() {
    match parse(&["scriptgen", "session", "--history"]) {
        CliCommand::Session { policy, history } => {
            assert!(history);
            assert!(policy.mode.is_none());
        }
        _ => panic!("expected Session"),
    }
}

#[test]
fn cli_parse_research() {
    match parse(&["scriptgen", "research", "honey bee", "--mode", "retry"]) {
        CliCommand::Research { query, policy } => {
            assert_eq!(query, "honey bee");
            assert_eq!(policy.mode, Some(CallMode::Retry));
        }
        _ => panic!("expected Research"),
    }
}

#[test]
fn cli_parse_config() {
    match parse(&["scriptgen", "config"]) {
        CliCommand::Config => {}
        _ => panic!("expected Config"),
    }
}
