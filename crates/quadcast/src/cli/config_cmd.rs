//! `config` subcommand — show the settings file, optionally update flags.

use super::{ConfigOutput, Result, Settings, SettingsStore, kv, kv_indent, kv_width, print_json};

/// Apply flag updates. Returns whether anything changed.
fn apply_updates(
    settings: &mut Settings,
    auto_apply: Option<bool>,
    launch_at_login: Option<bool>,
) -> bool {
    let before = settings.clone();
    if let Some(v) = auto_apply {
        settings.auto_apply = v;
    }
    if let Some(v) = launch_at_login {
        settings.launch_at_login = v;
    }
    *settings != before
}

pub(super) fn cmd_config(
    store: &SettingsStore,
    auto_apply: Option<bool>,
    launch_at_login: Option<bool>,
    json: bool,
) -> Result<()> {
    let updating = auto_apply.is_some() || launch_at_login.is_some();

    let (mut settings, load_err) = if updating {
        // Updates are written back wholesale; never overwrite a file we
        // could not read.
        (store.load()?, None)
    } else {
        store.load_or_default()
    };

    if apply_updates(&mut settings, auto_apply, launch_at_login) {
        store.save(&settings)?;
        log::info!("settings saved to {}", store.path().display());
    }

    let exists = store.exists();
    if json {
        return print_json(&ConfigOutput {
            settings_file: store.path().display().to_string(),
            settings_file_exists: exists,
            settings,
            error: load_err.map(|e| e.to_string()),
        });
    }

    let w = kv_width(
        &["Settings file:"],
        &["lastColor:", "autoApply:", "launchAtLogin:"],
    );

    let path = store.path().display();
    match (&load_err, exists) {
        (Some(e), _) => kv("Settings file:", format_args!("{path} ({e}, using defaults)"), w),
        (None, true) => kv("Settings file:", format_args!("{path} (loaded)"), w),
        (None, false) => kv(
            "Settings file:",
            format_args!("{path} (not found, using defaults)"),
            w,
        ),
    }
    println!();

    println!("Settings:");
    kv_indent("lastColor:", format_args!("#{}", settings.last_color), w);
    kv_indent("autoApply:", settings.auto_apply, w);
    kv_indent("launchAtLogin:", settings.launch_at_login, w);
    Ok(())
}
