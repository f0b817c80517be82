//! `status` subcommand — dependency, device and settings summary.

use super::{
    CommandRunner, DeviceStatusJson, HostContext, Result, SettingsStore, StatusOutput, kv,
    kv_indent, kv_width, print_json,
};

fn collect_device_status<R: CommandRunner>(ctx: &HostContext<R>) -> DeviceStatusJson {
    match ctx.probe_device() {
        Ok(()) => DeviceStatusJson {
            present: true,
            message: None,
        },
        Err(e) => DeviceStatusJson {
            present: false,
            message: Some(e.to_string()),
        },
    }
}

pub(super) fn cmd_status<R: CommandRunner>(
    ctx: &HostContext<R>,
    store: &SettingsStore,
    json: bool,
) -> Result<()> {
    let dependencies = ctx.dependency_status();
    let device = collect_device_status(ctx);
    let (settings, settings_err) = store.load_or_default();
    if let Some(e) = &settings_err {
        log::warn!("{e}; showing defaults");
    }

    if json {
        return print_json(&StatusOutput {
            version: env!("CARGO_PKG_VERSION").to_string(),
            platform: ctx.platform.name().to_string(),
            dependencies,
            device,
            settings,
        });
    }

    let w = kv_width(
        &["Version:", "Platform:", "quadcastrgb:", "Device:"],
        &["Last color:", "Auto apply:", "Launch at login:"],
    );

    kv("Version:", env!("CARGO_PKG_VERSION"), w);
    kv("Platform:", ctx.platform, w);
    kv("quadcastrgb:", &dependencies.message, w);
    match &device.message {
        None => kv("Device:", "connected", w),
        Some(msg) => kv("Device:", msg, w),
    }
    println!();

    println!("Settings:");
    kv_indent("Last color:", format_args!("#{}", settings.last_color), w);
    kv_indent("Auto apply:", settings.auto_apply, w);
    kv_indent("Launch at login:", settings.launch_at_login, w);
    Ok(())
}
