use ffbmidi_frame::Sequence;

use crate::cmd::{emit, Context, EffectIdArgs, ModifyArgs};
use crate::exit::{frame_error, CliResult};

pub fn play(args: EffectIdArgs, ctx: &Context) -> CliResult<i32> {
    let frame = ctx
        .encoder()
        .play(args.effect_id)
        .map_err(|err| frame_error("play", err))?;
    emit("play", &Sequence::from(frame), ctx)
}

pub fn stop(args: EffectIdArgs, ctx: &Context) -> CliResult<i32> {
    let frame = ctx
        .encoder()
        .stop(args.effect_id)
        .map_err(|err| frame_error("stop", err))?;
    emit("stop", &Sequence::from(frame), ctx)
}

pub fn modify(args: ModifyArgs, ctx: &Context) -> CliResult<i32> {
    let frame = ctx
        .encoder()
        .modify(args.effect_id, args.param, args.value)
        .map_err(|err| frame_error("modify", err))?;
    emit("modify", &Sequence::from(frame), ctx)
}
