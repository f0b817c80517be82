//! `devices` subcommand — raw USB enumeration output.

use super::{CommandRunner, DevicesOutput, HostContext, Result, print_json};

pub(super) fn cmd_devices<R: CommandRunner>(ctx: &HostContext<R>, json: bool) -> Result<()> {
    let output = ctx.list_usb_devices();

    if json {
        return print_json(&DevicesOutput {
            platform: ctx.platform.name().to_string(),
            output,
        });
    }

    print!("{output}");
    if !output.ends_with('\n') {
        println!();
    }
    Ok(())
}
