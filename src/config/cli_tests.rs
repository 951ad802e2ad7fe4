//! Tests for CLI argument parsing.

use std::path::PathBuf;

use super::cli::{Cli, Command, EnvironmentArg};

mod parsing {
    use super::*;

    #[test]
    fn parse_get_with_queries() {
        let cli = Cli::parse_from_iter([
            "pingen2",
            "get",
            "/organisations",
            "--query",
            "page[number]=2",
            "-q",
            "page[limit]=10",
        ]);

        match cli.command {
            Command::Get { path, query } => {
                assert_eq!(path, "/organisations");
                assert_eq!(query, vec!["page[number]=2", "page[limit]=10"]);
            }
            other => panic!("Expected get command, got {other:?}"),
        }
    }

    #[test]
    fn parse_global_options_after_subcommand() {
        let cli = Cli::parse_from_iter([
            "pingen2",
            "token",
            "--client-id",
            "id",
            "--client-secret",
            "secret",
            "--environment",
            "staging",
            "--timeout",
            "5",
            "--verbose",
        ]);

        assert_eq!(cli.client_id.as_deref(), Some("id"));
        assert_eq!(cli.client_secret.as_deref(), Some("secret"));
        assert_eq!(cli.environment, Some(EnvironmentArg::Staging));
        assert_eq!(cli.timeout, Some(5));
        assert!(cli.verbose);
    }

    #[test]
    fn token_has_default_scope() {
        let cli = Cli::parse_from_iter(["pingen2", "token"]);

        match cli.command {
            Command::Token { scope } => assert!(scope.contains("letter")),
            other => panic!("Expected token command, got {other:?}"),
        }
    }

    #[test]
    fn parse_download() {
        let cli = Cli::parse_from_iter([
            "pingen2",
            "download",
            "/letters/1/file",
            "--output",
            "letter.pdf",
        ]);

        match cli.command {
            Command::Download { path, output } => {
                assert_eq!(path, "/letters/1/file");
                assert_eq!(output, PathBuf::from("letter.pdf"));
            }
            other => panic!("Expected download command, got {other:?}"),
        }
    }

    #[test]
    fn parse_verify_webhook() {
        let cli = Cli::parse_from_iter([
            "pingen2",
            "verify-webhook",
            "--secret",
            "s3cret",
            "--signature",
            "abc",
        ]);

        match cli.command {
            Command::VerifyWebhook {
                secret,
                signature,
                payload_file,
            } => {
                assert_eq!(secret, "s3cret");
                assert_eq!(signature.as_deref(), Some("abc"));
                assert!(payload_file.is_none());
            }
            other => panic!("Expected verify-webhook command, got {other:?}"),
        }
    }

    #[test]
    fn init_has_default_output() {
        let cli = Cli::parse_from_iter(["pingen2", "init"]);

        assert!(
            matches!(cli.command, Command::Init { ref output } if output == &PathBuf::from("pingen2.toml"))
        );
    }

    #[test]
    fn missing_subcommand_is_rejected() {
        use clap::Parser;

        assert!(Cli::try_parse_from(["pingen2"]).is_err());
    }

    #[test]
    fn unknown_environment_is_rejected() {
        use clap::Parser;

        assert!(Cli::try_parse_from(["pingen2", "token", "--environment", "dev"]).is_err());
    }
}

mod needs_config {
    use super::*;

    #[test]
    fn api_commands_need_config() {
        assert!(Cli::parse_from_iter(["pingen2", "token"]).needs_config());
        assert!(Cli::parse_from_iter(["pingen2", "get", "/x"]).needs_config());
    }

    #[test]
    fn local_commands_do_not_need_config() {
        assert!(!Cli::parse_from_iter(["pingen2", "init"]).needs_config());
        assert!(
            !Cli::parse_from_iter(["pingen2", "verify-webhook", "--secret", "s"]).needs_config()
        );
    }
}
