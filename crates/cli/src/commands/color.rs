use clap::Args;
use richfind_colors::{DecodedColor, NativeColor, decode as decode_native};

use super::query::parse_color;

#[derive(Debug, Clone, Args)]
pub struct DecodeArgs {
    /// Native color value, decimal or 0x-prefixed hex
    #[arg(allow_hyphen_values = true, value_parser = parse_native)]
    pub value: NativeColor,
}

#[derive(Debug, Clone, Args)]
pub struct EncodeArgs {
    /// RRGGBB, #RRGGBB, a theme color name, or name:adjust (e.g. accent1:-0.25)
    pub color: String,
}

pub fn decode(args: DecodeArgs) -> anyhow::Result<()> {
    println!("{}", describe(args.value)?);
    Ok(())
}

pub fn encode(args: EncodeArgs) -> anyhow::Result<()> {
    let color = parse_color(&args.color)?;
    println!("{}", color.raw());
    println!("{}", describe(color)?);
    Ok(())
}

fn describe(color: NativeColor) -> anyhow::Result<String> {
    let kind = if color.is_theme() { "theme" } else { "direct" };
    Ok(match decode_native(color)? {
        DecodedColor::Automatic => "automatic".to_string(),
        DecodedColor::Rgb(rgb) => format!("#{} ({})", rgb.to_hex(), kind),
    })
}

fn parse_native(value: &str) -> Result<NativeColor, String> {
    let trimmed = value.trim();
    let parsed = match trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
    {
        // Hex input is the raw bit pattern, so 0xFF000000 is allowed.
        Some(hex) => u32::from_str_radix(hex, 16).map(|bits| bits as i32),
        None => trimmed.parse::<i32>(),
    };
    parsed
        .map(NativeColor::from_raw)
        .map_err(|e| format!("'{}' is not a color value: {}", value, e))
}
