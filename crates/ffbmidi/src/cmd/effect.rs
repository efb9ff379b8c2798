use ffbmidi_frame::{EffectDescriptor, Sequence};
use tracing::debug;

use crate::cmd::{emit, Context, EffectArgs};
use crate::exit::{frame_error, io_error, json_error, CliError, CliResult, USAGE};

pub fn run(args: EffectArgs, ctx: &Context) -> CliResult<i32> {
    let text = match (args.json, args.file) {
        (Some(json), _) => json,
        (None, Some(path)) => std::fs::read_to_string(&path)
            .map_err(|err| io_error(&format!("read {}", path.display()), err))?,
        (None, None) => return Err(CliError::new(USAGE, "provide --json or --file")),
    };

    let desc: EffectDescriptor =
        serde_json::from_str(&text).map_err(|err| json_error("parse descriptor", err))?;
    debug!(effect_type = %desc.effect_type, "descriptor parsed");

    let frame = ctx
        .encoder()
        .descriptor(&desc)
        .map_err(|err| frame_error("effect", err))?;
    emit("effect", &Sequence::from(frame), ctx)
}
