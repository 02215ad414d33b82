use anyhow::{bail, Result};
use std::path::PathBuf;
use std::str::FromStr;

use crate::cli::{FontStyle, FontWeight, Gravity, LabelerArgs};
use crate::validate::Problems;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    FileName,
    SlideNumber,
    SlideCount,
}

impl Field {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "filename" => Some(Self::FileName),
            "slide_number" => Some(Self::SlideNumber),
            "slide_count" => Some(Self::SlideCount),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Piece {
    Literal(String),
    Field(Field),
}

/// Label text with `{filename}`, `{slide_number}` and `{slide_count}`
/// placeholders. `{{` and `}}` stand for literal braces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelTemplate {
    pieces: Vec<Piece>,
}

/// Values substituted into a template for one image.
#[derive(Debug, Clone, Copy)]
pub struct SlideFields<'a> {
    pub file_name: &'a str,
    pub slide_number: &'a str,
    pub slide_count: usize,
}

impl FromStr for LabelTemplate {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut pieces = Vec::new();
        let mut literal = String::new();
        let mut chars = s.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '{' if chars.peek() == Some(&'{') => {
                    chars.next();
                    literal.push('{');
                }
                '}' if chars.peek() == Some(&'}') => {
                    chars.next();
                    literal.push('}');
                }
                '{' => {
                    let mut name = String::new();
                    loop {
                        match chars.next() {
                            Some('}') => break,
                            Some(c) => name.push(c),
                            None => bail!("unclosed '{{' in label \"{s}\""),
                        }
                    }
                    if name.contains(':') {
                        bail!("format specs are not supported: {{{name}}} in label \"{s}\"");
                    }
                    let Some(field) = Field::from_name(&name) else {
                        bail!("unknown placeholder {{{name}}} in label \"{s}\"");
                    };
                    if !literal.is_empty() {
                        pieces.push(Piece::Literal(std::mem::take(&mut literal)));
                    }
                    pieces.push(Piece::Field(field));
                }
                '}' => bail!("single '}}' in label \"{s}\""),
                c => literal.push(c),
            }
        }
        if !literal.is_empty() {
            pieces.push(Piece::Literal(literal));
        }

        Ok(Self { pieces })
    }
}

impl LabelTemplate {
    pub fn render(&self, fields: &SlideFields<'_>) -> String {
        let mut out = String::new();
        for piece in &self.pieces {
            match piece {
                Piece::Literal(text) => out.push_str(text),
                Piece::Field(Field::FileName) => out.push_str(fields.file_name),
                Piece::Field(Field::SlideNumber) => out.push_str(fields.slide_number),
                Piece::Field(Field::SlideCount) => out.push_str(&fields.slide_count.to_string()),
            }
        }
        out
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextStyle {
    pub font: PathBuf,
    pub style: FontStyle,
    pub weight: FontWeight,
    pub size: u32,
    pub fill: String,
    pub stroke: String,
    pub gravity: Gravity,
    pub x_offset: i32,
    pub y_offset: i32,
}

impl TextStyle {
    /// Defaults for a label whose flags were not given on the command line.
    pub fn label_default(font: PathBuf) -> Self {
        Self {
            font,
            style: FontStyle::Normal,
            weight: FontWeight::default(),
            size: 20,
            fill: "black".to_string(),
            stroke: "none".to_string(),
            gravity: Gravity::Center,
            x_offset: 0,
            y_offset: 0,
        }
    }

    /// The `-annotate` geometry, e.g. "+10+20" or "-5+0".
    pub fn offset_geometry(&self) -> String {
        format!("{:+}{:+}", self.x_offset, self.y_offset)
    }
}

#[derive(Debug, Clone)]
pub struct Label {
    pub template: LabelTemplate,
    pub style: TextStyle,
}

/// Pair every `--label` with the flag values at the same position, falling
/// back to [`TextStyle::label_default`] for positions without one.
///
/// `default_font` is the discovered system font; without one the first
/// `--font` takes its place.
pub fn resolve_labels(
    args: &LabelerArgs,
    default_font: Option<PathBuf>,
    problems: &mut Problems,
) -> Vec<Label> {
    let label_count = args.labels.len();
    let counts = [
        ("font", args.fonts.len()),
        ("style", args.styles.len()),
        ("weight", args.weights.len()),
        ("size", args.sizes.len()),
        ("fill", args.fills.len()),
        ("stroke", args.strokes.len()),
        ("gravity", args.gravities.len()),
        ("x-offset", args.x_offsets.len()),
        ("y-offset", args.y_offsets.len()),
    ];
    for (flag, count) in counts {
        if count > label_count {
            problems.push(format!(
                "there are more values for --{flag} than there are labels"
            ));
        }
    }

    let Some(default_font) = default_font.or_else(|| args.fonts.first().cloned()) else {
        problems.push("specify at least one font face: -f/--font");
        return Vec::new();
    };

    let mut labels = Vec::with_capacity(label_count);
    for (i, text) in args.labels.iter().enumerate() {
        let template = match text.parse::<LabelTemplate>() {
            Ok(template) => template,
            Err(e) => {
                problems.push(e.to_string());
                continue;
            }
        };

        let defaults = TextStyle::label_default(default_font.clone());
        let style = TextStyle {
            font: args.fonts.get(i).cloned().unwrap_or(defaults.font),
            style: args.styles.get(i).copied().unwrap_or(defaults.style),
            weight: args.weights.get(i).cloned().unwrap_or(defaults.weight),
            size: args.sizes.get(i).copied().unwrap_or(defaults.size),
            fill: args.fills.get(i).cloned().unwrap_or(defaults.fill),
            stroke: args.strokes.get(i).cloned().unwrap_or(defaults.stroke),
            gravity: args.gravities.get(i).copied().unwrap_or(defaults.gravity),
            x_offset: args.x_offsets.get(i).copied().unwrap_or(defaults.x_offset),
            y_offset: args.y_offsets.get(i).copied().unwrap_or(defaults.y_offset),
        };
        labels.push(Label { template, style });
    }
    labels
}
