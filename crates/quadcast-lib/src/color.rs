//! Color parsing and formatting for the microphone LED.
//!
//! The external tool takes colors as six lowercase hex digits (`ff0080`).

use std::fmt;

use serde::Serialize;

use crate::error::{QuadcastError, Result};

/// An 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Six lowercase hex digits, leading zeros preserved: `(255, 0, 128)` → `"ff0080"`.
    pub fn to_hex(self) -> String {
        format!("{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.to_hex())
    }
}

/// A named color offered as a quick pick.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Preset {
    pub name: &'static str,
    pub color: Rgb,
}

/// The quick-pick palette, in display order.
pub const PRESETS: &[Preset] = &[
    Preset {
        name: "red",
        color: Rgb::new(0xff, 0x00, 0x00),
    },
    Preset {
        name: "orange",
        color: Rgb::new(0xff, 0x6b, 0x00),
    },
    Preset {
        name: "yellow",
        color: Rgb::new(0xff, 0xd0, 0x00),
    },
    Preset {
        name: "green",
        color: Rgb::new(0x00, 0xff, 0x00),
    },
    Preset {
        name: "cyan",
        color: Rgb::new(0x00, 0xff, 0xff),
    },
    Preset {
        name: "blue",
        color: Rgb::new(0x00, 0x66, 0xff),
    },
    Preset {
        name: "purple",
        color: Rgb::new(0x8b, 0x00, 0xff),
    },
    Preset {
        name: "magenta",
        color: Rgb::new(0xff, 0x00, 0xff),
    },
    Preset {
        name: "white",
        color: Rgb::new(0xff, 0xff, 0xff),
    },
];

/// Parse a color string.
///
/// Accepts:
/// - Hex: `"#FF0000"`, `"FF0000"`, `"#ff0000"`
/// - Preset names from [`PRESETS`], case-insensitive
pub fn parse_color(s: &str) -> Result<Rgb> {
    let s = s.trim();

    if let Some(preset) = PRESETS.iter().find(|p| p.name.eq_ignore_ascii_case(s)) {
        return Ok(preset.color);
    }

    let hex = s.strip_prefix('#').unwrap_or(s);
    if !is_hex_color(hex) {
        return Err(QuadcastError::Color(format!(
            "Invalid color: {s} (use #RRGGBB or a preset name)"
        )));
    }
    let val = u32::from_str_radix(hex, 16)
        .map_err(|_| QuadcastError::Color(format!("Invalid hex color: {s}")))?;
    Ok(Rgb::new((val >> 16) as u8, (val >> 8) as u8, val as u8))
}

/// Whether `s` is exactly six hex digits (no `#`, any case).
pub fn is_hex_color(s: &str) -> bool {
    s.len() == 6 && s.chars().all(|c| c.is_ascii_hexdigit())
}
