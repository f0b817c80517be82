//! `check` and `install` subcommands — the quadcastrgb dependency.

use super::{CommandRunner, HostContext, Result, print_json};

pub(super) fn cmd_check<R: CommandRunner>(ctx: &HostContext<R>, json: bool) -> Result<()> {
    let status = ctx.dependency_status();
    if json {
        return print_json(&status);
    }

    let mark = if status.installed { "ok" } else { "missing" };
    println!("[{mark}] {}", status.message);
    Ok(())
}

pub(super) fn cmd_install<R: CommandRunner>(ctx: &HostContext<R>) -> Result<()> {
    let status = ctx.dependency_status();
    if status.installed {
        println!("{}", status.message);
        println!("Nothing to do.");
        return Ok(());
    }

    println!("Installing quadcastrgb with Homebrew...");
    let path = ctx.install_tool()?;
    println!("Installed: {}", path.display());
    Ok(())
}
