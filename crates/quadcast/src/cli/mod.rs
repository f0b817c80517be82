//! CLI subcommands — dependency checks, LED control, settings.

mod check;
mod config_cmd;
mod devices;
mod led;
mod presets;
mod status;

use clap::Subcommand;
use serde::Serialize;

pub(super) use quadcast_lib::color;
pub(super) use quadcast_lib::context::HostContext;
pub(super) use quadcast_lib::error::Result;
pub(super) use quadcast_lib::locate::DependencyStatus;
pub(super) use quadcast_lib::process::CommandRunner;
pub(super) use quadcast_lib::settings::{Settings, SettingsStore};

const PADDING: usize = 2;

/// Alignment width for key-value output: the longest key plus padding.
/// Indented keys need two extra columns for the `"  "` prefix.
pub(super) fn kv_width(top: &[&str], indent: &[&str]) -> usize {
    let longest = |keys: &[&str], extra: usize| {
        keys.iter()
            .map(|k| k.len() + PADDING + extra)
            .max()
            .unwrap_or(0)
    };
    longest(top, 0).max(longest(indent, 2))
}

pub(super) fn format_kv(key: &str, value: impl std::fmt::Display, w: usize) -> String {
    format!("{key:<w$}{value}")
}

pub(super) fn kv(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("{}", format_kv(key, value, w));
}

pub(super) fn kv_indent(key: &str, value: impl std::fmt::Display, w: usize) {
    println!("  {}", format_kv(key, value, w - 2));
}

/// Pretty-print `value` as JSON on stdout.
pub(super) fn print_json(value: &impl Serialize) -> Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::from)?;
    println!("{json}");
    Ok(())
}

// ── JSON output structs ──

#[derive(Serialize)]
pub(super) struct StatusOutput {
    pub version: String,
    pub platform: String,
    pub dependencies: DependencyStatus,
    pub device: DeviceStatusJson,
    pub settings: Settings,
}

#[derive(Serialize)]
pub(super) struct DeviceStatusJson {
    pub present: bool,
    pub message: Option<String>,
}

#[derive(Serialize)]
pub(super) struct DevicesOutput {
    pub platform: String,
    pub output: String,
}

#[derive(Serialize)]
pub(super) struct PresetJson {
    pub name: String,
    pub hex: String,
}

#[derive(Serialize)]
pub(super) struct ConfigOutput {
    pub settings_file: String,
    pub settings_file_exists: bool,
    pub settings: Settings,
    pub error: Option<String>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Check whether quadcastrgb (and Homebrew) are installed
    Check,

    /// Install quadcastrgb with Homebrew (macOS only)
    Install,

    /// Dump raw USB enumeration output for troubleshooting
    Devices,

    /// Show dependency, device and settings status
    Status,

    /// Set the LED to a solid color and remember it
    Color {
        /// Color as #RRGGBB, RRGGBB, or a preset name (see `presets`)
        color: String,
        /// Do not save the color as the last used color
        #[arg(long)]
        no_save: bool,
    },

    /// Turn the LED off
    Off,

    /// Apply the saved color
    Apply {
        /// Only apply if autoApply is enabled in the settings
        #[arg(long)]
        auto: bool,
    },

    /// List the named preset colors
    Presets,

    /// Show settings, optionally updating flags
    Config {
        /// Re-apply the saved color when `apply --auto` runs
        #[arg(long, value_name = "BOOL")]
        auto_apply: Option<bool>,
        /// Remember whether to start at login
        #[arg(long, value_name = "BOOL")]
        launch_at_login: Option<bool>,
    },
}

/// Warn if `--json` was passed to a command that doesn't support it.
fn warn_json_unsupported(cmd_name: &str) {
    log::warn!("--json is not supported for `{cmd_name}` (ignored)");
}

pub fn run(cmd: Command, json: bool) -> Result<()> {
    let ctx = HostContext::system();
    let store = SettingsStore::new();

    match cmd {
        Command::Check => check::cmd_check(&ctx, json),
        Command::Install => {
            if json {
                warn_json_unsupported("install");
            }
            check::cmd_install(&ctx)
        }
        Command::Devices => devices::cmd_devices(&ctx, json),
        Command::Status => status::cmd_status(&ctx, &store, json),
        Command::Color { color, no_save } => {
            if json {
                warn_json_unsupported("color");
            }
            led::cmd_color(&ctx, &store, &color, !no_save)
        }
        Command::Off => {
            if json {
                warn_json_unsupported("off");
            }
            led::cmd_off(&ctx)
        }
        Command::Apply { auto } => {
            if json {
                warn_json_unsupported("apply");
            }
            led::cmd_apply(&ctx, &store, auto)
        }
        Command::Presets => presets::cmd_presets(json),
        Command::Config {
            auto_apply,
            launch_at_login,
        } => config_cmd::cmd_config(&store, auto_apply, launch_at_login, json),
    }
}
