use crate::cmd::{emit, Context};
use crate::exit::CliResult;

pub fn run(ctx: &Context) -> CliResult<i32> {
    emit("init", &ctx.encoder().init(), ctx)
}
