//! `presets` subcommand — list the named colors.

use super::{PresetJson, Result, color, kv, kv_width, print_json};

fn preset_rows() -> Vec<PresetJson> {
    color::PRESETS
        .iter()
        .map(|p| PresetJson {
            name: p.name.to_string(),
            hex: p.color.to_hex(),
        })
        .collect()
}

pub(super) fn cmd_presets(json: bool) -> Result<()> {
    let rows = preset_rows();
    if json {
        return print_json(&rows);
    }

    let names: Vec<&str> = rows.iter().map(|r| r.name.as_str()).collect();
    let w = kv_width(&names, &[]);
    for row in &rows {
        kv(&row.name, format_args!("#{}", row.hex), w);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_follow_preset_table() {
        let rows = preset_rows();
        assert_eq!(rows.len(), color::PRESETS.len());
        assert_eq!(rows[0].name, "red");
        assert_eq!(rows[0].hex, "ff0000");
    }

    #[test]
    fn every_row_parses_back() {
        for row in preset_rows() {
            assert_eq!(color::parse_color(&row.name).unwrap().to_hex(), row.hex);
        }
    }
}
