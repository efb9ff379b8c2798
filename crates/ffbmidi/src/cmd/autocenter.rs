use crate::cmd::{emit, AutocenterArgs, Context, Switch};
use crate::exit::CliResult;

pub fn run(args: AutocenterArgs, ctx: &Context) -> CliResult<i32> {
    let sequence = ctx.encoder().autocenter(args.state == Switch::On);
    emit("autocenter", &sequence, ctx)
}
