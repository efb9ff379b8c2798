use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};
use ffbmidi_frame::{param, Encoder, FrameConfig, Sequence, ALL_EFFECTS};
use tracing::info;

use crate::exit::{frame_error, CliResult, SUCCESS};
use crate::output::{print_sequence, OutputFormat};

pub mod autocenter;
pub mod control;
pub mod effect;
pub mod init;
pub mod version;

/// Settings shared by every subcommand.
#[derive(Debug)]
pub struct Context {
    pub format: OutputFormat,
    pub port: Option<PathBuf>,
    pub baud: u32,
    pub strict: bool,
}

impl Context {
    pub fn config(&self) -> FrameConfig {
        FrameConfig {
            strict: self.strict,
        }
    }

    pub fn encoder(&self) -> Encoder {
        Encoder::new(self.config())
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the startup handshake.
    Init,
    /// Turn the built-in centering spring on or off.
    Autocenter(AutocenterArgs),
    /// Upload an effect definition from a JSON descriptor.
    Effect(EffectArgs),
    /// Start a defined effect.
    Play(EffectIdArgs),
    /// Stop a defined effect, or all of them.
    Stop(EffectIdArgs),
    /// Change one parameter of a defined effect.
    Modify(ModifyArgs),
    /// Show version information.
    Version(VersionArgs),
}

pub fn run(command: Command, ctx: &Context) -> CliResult<i32> {
    match command {
        Command::Init => init::run(ctx),
        Command::Autocenter(args) => autocenter::run(args, ctx),
        Command::Effect(args) => effect::run(args, ctx),
        Command::Play(args) => control::play(args, ctx),
        Command::Stop(args) => control::stop(args, ctx),
        Command::Modify(args) => control::modify(args, ctx),
        Command::Version(args) => version::run(args),
    }
}

/// Send `sequence` to the configured port, or print it when there is none.
pub fn emit(command: &str, sequence: &Sequence, ctx: &Context) -> CliResult<i32> {
    let Some(port) = &ctx.port else {
        print_sequence(command, sequence, ctx.format);
        return Ok(SUCCESS);
    };

    let mut device = ffbmidi_device::open_with_config(port, ctx.baud, ctx.config())
        .map_err(|err| frame_error("open port", err))?;
    device
        .send(sequence)
        .map_err(|err| frame_error(command, err))?;

    info!(
        command,
        messages = sequence.message_count(),
        port = %port.display(),
        baud = ctx.baud,
        "sent"
    );
    Ok(SUCCESS)
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

#[derive(Args, Debug)]
pub struct AutocenterArgs {
    pub state: Switch,
}

#[derive(Args, Debug)]
pub struct EffectArgs {
    /// Inline JSON descriptor.
    #[arg(long, conflicts_with = "file", required_unless_present = "file")]
    pub json: Option<String>,
    /// Read the JSON descriptor from a file.
    #[arg(long)]
    pub file: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct EffectIdArgs {
    /// Effect slot (decimal or 0x-hex), or `all`.
    #[arg(value_parser = parse_effect_id)]
    pub effect_id: u8,
}

#[derive(Args, Debug)]
pub struct ModifyArgs {
    /// Effect slot (decimal or 0x-hex).
    #[arg(value_parser = parse_effect_id)]
    pub effect_id: u8,
    /// Parameter name (e.g. `attack-level`) or code.
    #[arg(value_parser = parse_param)]
    pub param: u8,
    /// New value (decimal or 0x-hex).
    #[arg(value_parser = parse_u16)]
    pub value: u16,
}

#[derive(Args, Debug)]
pub struct VersionArgs {
    /// Show extended build provenance.
    #[arg(long)]
    pub extended: bool,
}

fn parse_number(raw: &str) -> Result<u32, String> {
    let parsed = match raw.strip_prefix("0x").or_else(|| raw.strip_prefix("0X")) {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => raw.parse::<u32>(),
    };
    parsed.map_err(|err| format!("invalid number '{raw}': {err}"))
}

fn parse_u8(raw: &str) -> Result<u8, String> {
    let value = parse_number(raw)?;
    u8::try_from(value).map_err(|_| format!("{raw} does not fit in a byte"))
}

fn parse_u16(raw: &str) -> Result<u16, String> {
    let value = parse_number(raw)?;
    u16::try_from(value).map_err(|_| format!("{raw} does not fit in 16 bits"))
}

fn parse_effect_id(raw: &str) -> Result<u8, String> {
    if raw.eq_ignore_ascii_case("all") {
        return Ok(ALL_EFFECTS);
    }
    parse_u8(raw)
}

fn parse_param(raw: &str) -> Result<u8, String> {
    param::by_name(raw).map_or_else(|| parse_u8(raw), Ok)
}
