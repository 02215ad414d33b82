use anyhow::{bail, Result};
use std::path::Path;

use crate::cli::DirArgs;
use crate::convert;

/// Validation failures, gathered so the user sees all of them at once.
#[derive(Debug, Default)]
pub struct Problems(Vec<String>);

impl Problems {
    pub fn push(&mut self, problem: impl Into<String>) {
        self.0.push(problem.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn into_result(self) -> Result<()> {
        if self.0.is_empty() {
            return Ok(());
        }
        bail!("{}", self.0.join("\n"))
    }
}

/// Checks shared by both tools. A dry run does not need `convert`.
pub fn check_environment(dirs: &DirArgs, problems: &mut Problems) {
    if !dirs.dry_run {
        if let Err(e) = convert::check_installed() {
            problems.push(e.to_string());
        }
    }
    check_dirs(dirs, problems);
}

pub fn check_dirs(dirs: &DirArgs, problems: &mut Problems) {
    if !dirs.source.is_dir() {
        problems.push(format!(
            "the source path does not exist or is not a directory: \"{}\"",
            dirs.source.display()
        ));
    }

    if dirs.target.exists() {
        problems.push(format!(
            "the target path already exists: please rename (move) or remove: \"{}\"",
            dirs.target.display()
        ));
    }

    if let (Ok(source), Ok(target)) = (
        std::path::absolute(&dirs.source),
        std::path::absolute(&dirs.target),
    ) {
        if source == target {
            problems.push(format!(
                "the source and target path should not be the same directory: \"{}\"",
                dirs.source.display()
            ));
        }
    }
}

pub fn check_font(font: &Path, problems: &mut Problems) {
    if !font.is_file() {
        problems.push(format!(
            "a font path does not exist or is not a file: \"{}\"",
            font.display()
        ));
    }
}
