use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use tagtrace::Size;

/// Command line interface definition.
#[derive(Parser, Debug)]
#[command(author, version, about, propagate_version = true)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug)]
pub struct GlobalOptions {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,
    /// Maximum tracer steps per contour (defaults to a bound derived from the image size)
    #[arg(long, global = true)]
    pub step_limit: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Trace a raster image into a pixel-exact SVG
    Trace(TraceCommand),
    /// Render tags of one or more families
    Render(RenderCommand),
    /// Print the polygons extracted from a raster image
    Inspect(InspectCommand),
}

#[derive(Args, Debug)]
pub struct ThresholdArgs {
    /// Gray level at or below which pixels are foreground (0-255)
    #[arg(long, default_value_t = 127)]
    pub threshold: u8,
    /// Treat light pixels as foreground
    #[arg(long)]
    pub invert: bool,
}

#[derive(Args, Debug)]
pub struct TraceCommand {
    /// Input image path
    pub input: PathBuf,
    /// Output SVG path (defaults to input name with `.svg`)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[command(flatten)]
    pub threshold: ThresholdArgs,
    /// Output pixels per source pixel
    #[arg(long, default_value_t = 1)]
    pub scale: u32,
    /// Physical document size in millimetres, as `<width>x<height>`
    #[arg(long = "size-mm")]
    pub size_mm: Option<Size>,
    /// Paint a white background rectangle below the outline
    #[arg(long)]
    pub background: bool,
    /// Fill color of the outline, as `#rrggbb` or `#rrggbbaa`
    #[arg(long, default_value = "#000000", value_parser = parse_hex_color)]
    pub foreground: [u8; 4],
    /// Also save the thresholded bitmap as a PNG
    #[arg(long = "export-bitmap", value_name = "PATH")]
    pub export_bitmap: Option<PathBuf>,
    /// Check that the outline fills back into the thresholded image
    #[arg(long)]
    pub verify: bool,
}

#[derive(Args, Debug)]
pub struct RenderCommand {
    /// Tags to render, as `<family>:<size-mm>[:<ranges>]` (e.g. `36h11:1.6:0-10;42`)
    #[arg(required = true)]
    pub blocks: Vec<String>,
    /// Directory holding `<family>.json` files
    #[arg(long, env = tagtrace::ENV_FAMILY_DIR, default_value = ".")]
    pub family_dir: PathBuf,
    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub output: PathBuf,
    /// File formats to write
    #[arg(long, value_enum, default_value_t = OutputFormat::Svg)]
    pub format: OutputFormat,
    /// Output pixels per tag pixel for PNG files
    #[arg(long, default_value_t = 1)]
    pub scale: u32,
    /// Printer resolution; sizes PNG files from the block size instead of --scale
    #[arg(long)]
    pub dpi: Option<u32>,
}

#[derive(Args, Debug)]
pub struct InspectCommand {
    /// Input image path
    pub input: PathBuf,
    #[command(flatten)]
    pub threshold: ThresholdArgs,
}

fn parse_hex_color(value: &str) -> Result<[u8; 4], String> {
    let digits = value.strip_prefix('#').unwrap_or(value);
    if !matches!(digits.len(), 6 | 8) || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(format!("color must be #rrggbb or #rrggbbaa, got `{value}`"));
    }
    let mut rgba = [0xff; 4];
    for (channel, i) in rgba.iter_mut().zip((0..digits.len()).step_by(2)) {
        *channel = u8::from_str_radix(&digits[i..i + 2], 16)
            .map_err(|e| format!("invalid color `{value}`: {e}"))?;
    }
    Ok(rgba)
}

/// The file formats written by `render`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Svg,
    Png,
    Both,
}

impl OutputFormat {
    pub fn svg(self) -> bool {
        matches!(self, OutputFormat::Svg | OutputFormat::Both)
    }

    pub fn png(self) -> bool {
        matches!(self, OutputFormat::Png | OutputFormat::Both)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_parse_with_optional_alpha() {
        assert_eq!(parse_hex_color("#000000"), Ok([0, 0, 0, 255]));
        assert_eq!(parse_hex_color("ff8000"), Ok([255, 128, 0, 255]));
        assert_eq!(parse_hex_color("#ff000080"), Ok([255, 0, 0, 128]));
    }

    #[test]
    fn malformed_hex_colors_are_rejected() {
        for value in ["", "#fff", "#gggggg", "#1234567", "#+fffff", "#ééé"] {
            assert!(parse_hex_color(value).is_err(), "{value}");
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
