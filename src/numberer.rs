use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

use crate::batch;
use crate::cli::NumbererArgs;
use crate::convert::ConvertCommand;
use crate::fonts;
use crate::label::TextStyle;
use crate::scanner::{Deck, Slide};
use crate::validate::{self, Problems};

pub fn run(args: &NumbererArgs, started: DateTime<Utc>) -> Result<()> {
    let mut problems = Problems::default();
    validate::check_environment(&args.dirs, &mut problems);

    let font = args.font.clone().or_else(fonts::default_font);
    match &font {
        Some(font) => validate::check_font(font, &mut problems),
        None => problems.push("the following argument is required: -f/--font"),
    }
    problems.into_result()?;

    let style = text_style(args, font.context("no font available")?);
    batch::run_batch(&args.dirs, started, |slide, deck, target| {
        slide_command(&args.dirs.background, &style, slide, deck, target)
    })
}

fn text_style(args: &NumbererArgs, font: PathBuf) -> TextStyle {
    TextStyle {
        font,
        style: args.style,
        weight: args.weight.clone(),
        size: args.font_size,
        fill: args.fill.clone(),
        stroke: args.stroke.clone(),
        gravity: args.gravity,
        x_offset: args.x_offset,
        y_offset: args.y_offset,
    }
}

/// Slides are numbered from zero.
fn slide_command(
    background: &str,
    style: &TextStyle,
    slide: &Slide,
    deck: &Deck,
    target: &Path,
) -> ConvertCommand {
    let mut cmd = ConvertCommand::new();
    cmd.option("background", background)
        .annotate(style, &deck.number(slide.index))
        .arg(&slide.path)
        .arg(target);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner;
    use clap::Parser;
    use std::fs;

    #[test]
    fn test_slide_command() {
        let tmp = tempfile::tempdir().unwrap();
        for i in 0..10 {
            fs::write(tmp.path().join(format!("{i}.png")), b"").unwrap();
        }
        let deck = scanner::scan_deck(tmp.path()).unwrap();

        let args = NumbererArgs::try_parse_from([
            "image-numberer",
            "-t",
            "out",
            "--fill",
            "white",
            "-S",
            "32",
        ])
        .unwrap();
        let style = text_style(&args, PathBuf::from("Sans.ttf"));
        let cmd = slide_command(
            &args.dirs.background,
            &style,
            &deck.slides[3],
            &deck,
            Path::new("out/3.png"),
        );

        let args: Vec<String> = cmd
            .args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        let source = tmp.path().join("3.png").to_string_lossy().into_owned();
        assert_eq!(
            args,
            [
                "-background",
                "None",
                "-font",
                "Sans.ttf",
                "-style",
                "normal",
                "-weight",
                "normal",
                "-fill",
                "white",
                "-stroke",
                "None",
                "-pointsize",
                "32",
                "-gravity",
                "northwest",
                "-annotate",
                "+1+1",
                "03",
                source.as_str(),
                "out/3.png",
            ]
        );
    }
}
