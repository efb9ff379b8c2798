use crate::cmd::VersionArgs;
use crate::exit::{CliResult, SUCCESS};

pub fn run(args: VersionArgs) -> CliResult<i32> {
    if !args.extended {
        println!("ffbmidi {}", env!("CARGO_PKG_VERSION"));
        return Ok(SUCCESS);
    }

    println!("name: ffbmidi");
    println!("version: {}", env!("CARGO_PKG_VERSION"));
    println!("target: {}", option_env!("FFBMIDI_BUILD_TARGET").unwrap_or("unknown"));
    println!("profile: {}", option_env!("FFBMIDI_BUILD_PROFILE").unwrap_or("unknown"));
    println!(
        "rustc: {}",
        option_env!("RUSTC_VERSION").unwrap_or("unknown")
    );
    println!("features: device={}, cli=true", cfg!(feature = "device"));

    Ok(SUCCESS)
}
