use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;

use crate::cli::DirArgs;
use crate::convert::ConvertCommand;
use crate::duration;
use crate::scanner::{self, Deck, Slide};

/// Run one `convert` per source file, in sorted order, stopping at the first failure.
///
/// `build` receives the slide, the whole deck and the target path for that slide.
pub fn run_batch<F>(dirs: &DirArgs, started: DateTime<Utc>, build: F) -> Result<()>
where
    F: Fn(&Slide, &Deck, &Path) -> ConvertCommand,
{
    let deck = scanner::scan_deck(&dirs.source)?;

    if dirs.dry_run {
        println!("[dry-run] Nothing will be written.");
    } else {
        create_target_dir(&dirs.target)?;
    }

    let pb = ProgressBar::new(deck.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("Labeling {pos}/{len} {wide_bar} {msg}")?
            .progress_chars("=> "),
    );

    for slide in &deck.slides {
        let target = dirs.target.join(&slide.name);
        let cmd = build(slide, &deck, &target);
        pb.set_message(slide.file_name.clone());
        log::debug!("{cmd}");

        if dirs.dry_run {
            pb.suspend(|| println!("[dry-run] {cmd}"));
        } else {
            cmd.run()
                .with_context(|| format!("on file \"{}\"", slide.file_name))?;
        }
        pb.inc(1);
    }
    pb.finish_and_clear();

    println!(
        "Finished. Your task ran in {}",
        duration::format_elapsed(started)
    );
    Ok(())
}

fn create_target_dir(path: &Path) -> Result<()> {
    let mut builder = fs::DirBuilder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o775);
    }
    builder
        .create(path)
        .with_context(|| format!("could not create {}", path.display()))
}
