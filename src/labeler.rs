use anyhow::Result;
use chrono::{DateTime, Utc};
use std::path::Path;

use crate::batch;
use crate::cli::LabelerArgs;
use crate::convert::ConvertCommand;
use crate::fonts;
use crate::label::{self, Label, SlideFields};
use crate::scanner::{Deck, Slide};
use crate::validate::{self, Problems};

pub fn run(args: &LabelerArgs, started: DateTime<Utc>) -> Result<()> {
    let mut problems = Problems::default();
    validate::check_environment(&args.dirs, &mut problems);
    for font in &args.fonts {
        validate::check_font(font, &mut problems);
    }
    let labels = label::resolve_labels(args, fonts::default_font(), &mut problems);
    problems.into_result()?;

    batch::run_batch(&args.dirs, started, |slide, deck, target| {
        slide_command(args, &labels, slide, deck, target)
    })
}

/// The canvas is extended before it is resized so the image is not stretched.
/// Slides are numbered from one.
fn slide_command(
    args: &LabelerArgs,
    labels: &[Label],
    slide: &Slide,
    deck: &Deck,
    target: &Path,
) -> ConvertCommand {
    let slide_number = deck.number(slide.index + 1);
    let fields = SlideFields {
        file_name: &slide.file_name,
        slide_number: &slide_number,
        slide_count: deck.len(),
    };

    let mut cmd = ConvertCommand::new();
    cmd.option("background", &args.dirs.background)
        .option("size", &args.extent)
        .option("gravity", args.extent_gravity.to_string())
        .option("extent", &args.extent)
        .option("resize", &args.extent);
    for label in labels {
        cmd.annotate(&label.style, &label.template.render(&fields));
    }
    cmd.arg(&slide.path).arg(target);
    cmd
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scanner;
    use clap::Parser;
    use std::fs;
    use std::path::PathBuf;

    #[test]
    fn test_slide_command_with_two_labels() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["doge.png", "cat.png"] {
            fs::write(tmp.path().join(name), b"").unwrap();
        }
        let deck = scanner::scan_deck(tmp.path()).unwrap();

        let args = LabelerArgs::try_parse_from([
            "mdm2",
            "-t",
            "out",
            "-l",
            "such {filename}",
            "-l",
            "{slide_number} of {slide_count}",
            "--gravity",
            "north",
            "-y",
            "-10",
            "--extent",
            "800x600",
        ])
        .unwrap();
        let mut problems = Problems::default();
        let labels = label::resolve_labels(&args, Some(PathBuf::from("Sans.ttf")), &mut problems);
        assert!(problems.is_empty());

        let cmd = slide_command(&args, &labels, &deck.slides[1], &deck, Path::new("out/doge.png"));
        let argv: Vec<String> = cmd
            .args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        let source = tmp.path().join("doge.png").to_string_lossy().into_owned();

        assert_eq!(
            argv[..10],
            [
                "-background",
                "None",
                "-size",
                "800x600",
                "-gravity",
                "center",
                "-extent",
                "800x600",
                "-resize",
                "800x600",
            ]
        );
        let label_args = |start: usize| argv[start..start + 17].to_vec();
        assert_eq!(label_args(10)[13], "north");
        assert_eq!(label_args(10)[15], "+0-10");
        assert_eq!(label_args(10)[16], "such doge.png");
        assert_eq!(label_args(27)[13], "center");
        assert_eq!(label_args(27)[15], "+0+0");
        assert_eq!(label_args(27)[16], "2 of 2");
        assert_eq!(argv[44..], [source.as_str(), "out/doge.png"]);
    }
}
