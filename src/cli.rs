use clap::{Args, Parser, ValueEnum};
use std::ffi::OsString;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Command line arguments, minus a bare `--` directly after the program name.
pub fn os_args() -> Vec<OsString> {
    strip_leading_dashes(std::env::args_os())
}

fn strip_leading_dashes(args: impl IntoIterator<Item = OsString>) -> Vec<OsString> {
    let mut args: Vec<OsString> = args.into_iter().collect();
    if args.get(1).is_some_and(|a| a == "--") {
        args.remove(1);
    }
    args
}

#[derive(Args, Debug, Clone)]
pub struct DirArgs {
    /// The source directory containing the images you want to enhance
    #[arg(short, long, value_name = "SOURCE_DIR", default_value = ".")]
    pub source: PathBuf,

    /// The nonexistent path to the target directory to save the new files
    #[arg(short, long, value_name = "TARGET_DIR")]
    pub target: PathBuf,

    /// The background color to use for enlargements and alpha-channel sources
    #[arg(long, default_value = "None")]
    pub background: String,

    /// Print the convert commands without creating anything
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

#[derive(Parser, Debug)]
#[command(name = "image-numberer")]
#[command(about = "Slideshow image numberer: stamp each image with its position in the deck")]
pub struct NumbererArgs {
    #[command(flatten)]
    pub dirs: DirArgs,

    /// The path to the font file (OTF, TTF, etc.) to use
    #[arg(short, long, value_name = "FONT_PATH")]
    pub font: Option<PathBuf>,

    /// The font style used to render text
    #[arg(long, value_enum, ignore_case = true, default_value_t = FontStyle::Normal)]
    pub style: FontStyle,

    /// The font weight, either a name like "bold" or a number like 500
    #[arg(long, default_value = "normal")]
    pub weight: FontWeight,

    /// The font size, or, as convert calls it, -pointsize
    #[arg(short = 'S', long, value_name = "POINTSIZE", default_value_t = 20)]
    pub font_size: u32,

    /// The font fill, e.g. "blue", "#0000ff" or "rgb(0,0,255)"
    #[arg(long, default_value = "black")]
    pub fill: String,

    /// The font stroke (outline) color
    #[arg(long, default_value = "None")]
    pub stroke: String,

    /// From whence to calculate the x,y offset of the text
    #[arg(long, value_enum, ignore_case = true, default_value_t = Gravity::NorthWest)]
    pub gravity: Gravity,

    /// The x-offset of the text
    #[arg(short = 'x', long, default_value_t = 1, allow_negative_numbers = true)]
    pub x_offset: i32,

    /// The y-offset of the text
    #[arg(short = 'y', long, default_value_t = 1, allow_negative_numbers = true)]
    pub y_offset: i32,
}

/// Every per-label flag may be repeated: the n-th value belongs to the n-th `--label`.
#[derive(Parser, Debug)]
#[command(name = "mdm2")]
#[command(about = "Many Doge Meme Maker: write templated labels on every image")]
pub struct LabelerArgs {
    #[command(flatten)]
    pub dirs: DirArgs,

    /// Label text, may include {filename}, {slide_number} and {slide_count}
    #[arg(short, long = "label", value_name = "LABEL", required = true)]
    pub labels: Vec<String>,

    /// The path to the font file (OTF, TTF, etc.) to use
    #[arg(short, long = "font", value_name = "FONT_PATH")]
    pub fonts: Vec<PathBuf>,

    /// The font style used to render text
    #[arg(long = "style", value_enum, ignore_case = true)]
    pub styles: Vec<FontStyle>,

    /// The font weight, either a name like "bold" or a number like 500
    #[arg(long = "weight")]
    pub weights: Vec<FontWeight>,

    /// The font size, or, as convert calls it, -pointsize
    #[arg(short = 'S', long = "size", value_name = "POINTSIZE")]
    pub sizes: Vec<u32>,

    /// The font fill, e.g. "blue", "#0000ff" or "rgb(0,0,255)"
    #[arg(long = "fill")]
    pub fills: Vec<String>,

    /// The font stroke (outline) color
    #[arg(long = "stroke")]
    pub strokes: Vec<String>,

    /// From whence to calculate the x,y offset of the text
    #[arg(long = "gravity", value_enum, ignore_case = true)]
    pub gravities: Vec<Gravity>,

    /// The x-offset of the text
    #[arg(short = 'x', long = "x-offset", allow_negative_numbers = true)]
    pub x_offsets: Vec<i32>,

    /// The y-offset of the text
    #[arg(short = 'y', long = "y-offset", allow_negative_numbers = true)]
    pub y_offsets: Vec<i32>,

    /// Set the new image size without scaling
    #[arg(long, value_name = "EXTENT_GEOM", default_value = "100%")]
    pub extent: String,

    /// If resizing, where to fix the original image
    #[arg(long, value_enum, ignore_case = true, default_value_t = Gravity::Center)]
    pub extent_gravity: Gravity,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontStyle {
    Any,
    Italic,
    Normal,
    Oblique,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
#[value(rename_all = "lower")]
pub enum Gravity {
    None,
    Center,
    East,
    Forget,
    NorthEast,
    North,
    NorthWest,
    SouthEast,
    South,
    SouthWest,
    West,
}

macro_rules! display_value_enum {
    ($($ty:ty),*) => {$(
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(
                    self.to_possible_value()
                        .expect("no values are skipped")
                        .get_name(),
                )
            }
        }
    )*};
}

display_value_enum!(FontStyle, Gravity);

const WEIGHT_NAMES: &[&str] = &[
    "thin",
    "extralight",
    "light",
    "normal",
    "medium",
    "demibold",
    "bold",
    "extrabold",
    "heavy",
];

/// A named weight or a positive numeric one (100 is thin, 900 heavy).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontWeight(String);

impl Default for FontWeight {
    fn default() -> Self {
        Self("normal".to_string())
    }
}

impl FromStr for FontWeight {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.to_ascii_lowercase();
        if WEIGHT_NAMES.contains(&lower.as_str()) {
            return Ok(Self(lower));
        }
        match lower.parse::<u16>() {
            Ok(n) if n > 0 => Ok(Self(n.to_string())),
            _ => Err(format!(
                "expected a positive number or one of: {}",
                WEIGHT_NAMES.join(", ")
            )),
        }
    }
}

impl fmt::Display for FontWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
