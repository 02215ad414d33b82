use anyhow::{bail, Context, Result};
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

#[derive(Debug, Clone)]
pub struct Slide {
    /// Position after sorting, from 0.
    pub index: usize,
    /// The name as stored on disk, used for the target path.
    pub name: OsString,
    /// Lossy UTF-8 form of `name` for labels and messages.
    pub file_name: String,
    pub path: PathBuf,
}

/// The sorted contents of a source directory.
#[derive(Debug)]
pub struct Deck {
    pub slides: Vec<Slide>,
    width: usize,
}

impl Deck {
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// `n` zero-padded to as many digits as the slide count has.
    pub fn number(&self, n: usize) -> String {
        format!("{n:0width$}", width = self.width)
    }
}

/// List the top level of `source_dir` in lexicographic file name order.
/// Subdirectories are skipped.
pub fn scan_deck(source_dir: &Path) -> Result<Deck> {
    let mut slides = Vec::new();

    for entry in WalkDir::new(source_dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = entry
            .with_context(|| format!("could not list {}", source_dir.display()))?;
        if entry.file_type().is_dir() {
            log::warn!("skipping directory {}", entry.path().display());
            continue;
        }

        slides.push(Slide {
            index: slides.len(),
            name: entry.file_name().to_os_string(),
            file_name: entry.file_name().to_string_lossy().into_owned(),
            path: entry.path().to_path_buf(),
        });
    }

    if slides.is_empty() {
        bail!(
            "the source directory does not contain any files: \"{}\"",
            source_dir.display()
        );
    }

    let width = digit_count(slides.len());
    Ok(Deck { slides, width })
}

fn digit_count(n: usize) -> usize {
    n.checked_ilog10().map_or(0, |d| d as usize + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_digit_count() {
        assert_eq!(digit_count(0), 0);
        assert_eq!(digit_count(9), 1);
        assert_eq!(digit_count(10), 2);
        assert_eq!(digit_count(99), 2);
        assert_eq!(digit_count(100), 3);
    }

    #[test]
    fn test_scan_sorts_and_skips_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        for name in ["b.png", "a.png", "C.png", "10.png", "2.png"] {
            fs::write(tmp.path().join(name), b"").unwrap();
        }
        fs::create_dir(tmp.path().join("nested")).unwrap();

        let deck = scan_deck(tmp.path()).unwrap();
        let names: Vec<&str> = deck.slides.iter().map(|s| s.file_name.as_str()).collect();
        assert_eq!(names, ["10.png", "2.png", "C.png", "a.png", "b.png"]);
        assert_eq!(deck.slides[3].index, 3);
        assert_eq!(deck.slides[3].path, tmp.path().join("a.png"));
        assert_eq!(deck.slides[3].name, OsString::from("a.png"));
        assert_eq!(deck.number(0), "0");
        assert_eq!(deck.number(5), "5");
    }

    #[test]
    fn test_number_padding() {
        let tmp = tempfile::tempdir().unwrap();
        for i in 0..12 {
            fs::write(tmp.path().join(format!("{i:03}.png")), b"").unwrap();
        }
        let deck = scan_deck(tmp.path()).unwrap();
        assert_eq!(deck.len(), 12);
        assert_eq!(deck.number(3), "03");
        assert_eq!(deck.number(12), "12");
    }

    #[test]
    fn test_empty_source_is_error() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("only-a-dir")).unwrap();
        assert!(scan_deck(tmp.path()).is_err());
    }
}
