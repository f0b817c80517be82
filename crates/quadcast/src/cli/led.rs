//! `color`, `off` and `apply` subcommands — drive the LED through a session.

use super::{CommandRunner, HostContext, Result, SettingsStore, color};

pub(super) fn cmd_color<R: CommandRunner>(
    ctx: &HostContext<R>,
    store: &SettingsStore,
    input: &str,
    save: bool,
) -> Result<()> {
    // Reject bad input before touching the device.
    let rgb = color::parse_color(input)?;

    let session = ctx.open_session()?;
    session.set_rgb(rgb)?;
    println!("LED set to {rgb}");

    if save {
        // The LED already changed; a failed save is reported, not fatal.
        match store.save_color(&rgb.to_hex()) {
            Ok(_) => log::debug!("saved lastColor {} to {}", rgb.to_hex(), store.path().display()),
            Err(e) => log::warn!("could not save color: {e}"),
        }
    }
    Ok(())
}

pub(super) fn cmd_off<R: CommandRunner>(ctx: &HostContext<R>) -> Result<()> {
    let session = ctx.open_session()?;
    session.off()?;
    println!("LED off");
    Ok(())
}

pub(super) fn cmd_apply<R: CommandRunner>(
    ctx: &HostContext<R>,
    store: &SettingsStore,
    auto: bool,
) -> Result<()> {
    let settings = store.load()?;
    if auto && !settings.auto_apply {
        log::info!("autoApply is off; not applying");
        return Ok(());
    }

    let rgb = color::parse_color(&settings.last_color)?;
    let session = ctx.open_session()?;
    session.set_rgb(rgb)?;
    println!("LED set to {rgb}");
    Ok(())
}
