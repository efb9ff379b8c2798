mod cmd;
mod exit;
mod logging;
mod output;

use std::path::PathBuf;

use clap::Parser;
use ffbmidi_transport::DEFAULT_BAUD;

use crate::cmd::{Command, Context};
use crate::logging::{init_logging, LogFormat, LogLevel};
use crate::output::OutputFormat;

#[derive(Parser, Debug)]
#[command(
    name = "ffbmidi",
    version,
    about = "Encode and send force-feedback commands over a MIDI-framed serial link"
)]
struct Cli {
    /// Output format for dry runs.
    #[arg(long, value_name = "FORMAT", global = true)]
    format: Option<OutputFormat>,

    /// Log output format (stderr).
    #[arg(long, value_name = "FORMAT", default_value = "text", global = true)]
    log_format: LogFormat,

    /// Minimum log level (stderr).
    #[arg(long, value_name = "LEVEL", default_value = "warn", global = true)]
    log_level: LogLevel,

    /// Serial device node to send to. Without it, frames are only printed.
    #[arg(long, value_name = "PATH", env = "FFBMIDI_PORT", global = true)]
    port: Option<PathBuf>,

    /// Line rate used when opening the port.
    #[arg(
        long,
        value_name = "RATE",
        env = "FFBMIDI_BAUD",
        default_value_t = DEFAULT_BAUD,
        value_parser = clap::value_parser!(u32).range(1..),
        global = true
    )]
    baud: u32,

    /// Reject out-of-range fields instead of truncating them.
    #[arg(long, global = true)]
    strict: bool,

    #[command(subcommand)]
    command: Command,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.log_format, cli.log_level);

    let ctx = Context {
        format: cli.format.unwrap_or_else(OutputFormat::default_for_stdout),
        port: cli.port,
        baud: cli.baud,
        strict: cli.strict,
    };

    match cmd::run(cli.command, &ctx) {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(err.code);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modify_with_named_param() {
        let cli = Cli::try_parse_from(["ffbmidi", "modify", "5", "attack-level", "300"])
            .expect("modify args should parse");

        match cli.command {
            Command::Modify(args) => {
                assert_eq!(args.effect_id, 5);
                assert_eq!(args.param, 0x64);
                assert_eq!(args.value, 300);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_hex_values() {
        let cli = Cli::try_parse_from(["ffbmidi", "modify", "0x7f", "0x40", "0x3fff"])
            .expect("hex args should parse");
        assert!(matches!(
            cli.command,
            Command::Modify(ref args) if args.effect_id == 0x7f && args.param == 0x40 && args.value == 0x3fff
        ));
    }

    #[test]
    fn rejects_conflicting_effect_sources() {
        let err = Cli::try_parse_from([
            "ffbmidi",
            "effect",
            "--json",
            "{\"type\":\"sine\"}",
            "--file",
            "effect.json",
        ])
        .expect_err("conflicting args should fail");

        assert_eq!(err.kind(), clap::error::ErrorKind::ArgumentConflict);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["ffbmidi", "play", "2", "--strict", "--port", "/dev/null"])
            .expect("global flags should parse");
        assert!(cli.strict);
        assert_eq!(cli.port, Some(PathBuf::from("/dev/null")));
        assert_eq!(cli.baud, DEFAULT_BAUD);
    }

    #[test]
    fn baud_override_and_zero_rejected() {
        let cli = Cli::try_parse_from(["ffbmidi", "--baud", "38400", "init"])
            .expect("baud should parse");
        assert_eq!(cli.baud, 38_400);
        assert!(Cli::try_parse_from(["ffbmidi", "--baud", "0", "init"]).is_err());
    }

    #[test]
    fn autocenter_requires_state() {
        assert!(Cli::try_parse_from(["ffbmidi", "autocenter"]).is_err());
        let cli = Cli::try_parse_from(["ffbmidi", "autocenter", "off"]).expect("should parse");
        assert!(matches!(cli.command, Command::Autocenter(_)));
    }
}
