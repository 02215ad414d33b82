use anyhow::{bail, Context, Result};
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::io::ErrorKind;
use std::process::Command;

use crate::label::TextStyle;

const CONVERT: &str = "convert";

/// Fails when ImageMagick's `convert` cannot be launched.
pub fn check_installed() -> Result<()> {
    match Command::new(CONVERT).arg("-version").output() {
        Ok(_) => Ok(()),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            bail!("Have you installed imagemagick? try: `sudo apt-get install imagemagick`")
        }
        Err(e) => Err(e).context("could not run `convert -version`"),
    }
}

/// Arguments for one `convert` invocation, in the order they are given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConvertCommand {
    args: Vec<OsString>,
}

impl ConvertCommand {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn arg(&mut self, arg: impl AsRef<OsStr>) -> &mut Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    /// Push `-name value`.
    pub fn option(&mut self, name: &str, value: impl AsRef<OsStr>) -> &mut Self {
        self.arg(format!("-{name}")).arg(value)
    }

    /// Select the text settings of `style` and draw `text` at its offset.
    pub fn annotate(&mut self, style: &TextStyle, text: &str) -> &mut Self {
        self.option("font", &style.font)
            .option("style", style.style.to_string())
            .option("weight", style.weight.to_string())
            .option("fill", &style.fill)
            .option("stroke", &style.stroke)
            .option("pointsize", style.size.to_string())
            .option("gravity", style.gravity.to_string())
            .arg("-annotate")
            .arg(style.offset_geometry())
            .arg(text)
    }

    pub fn args(&self) -> &[OsString] {
        &self.args
    }

    /// Run to completion. A non-zero exit is an error carrying convert's output.
    pub fn run(&self) -> Result<()> {
        let output = Command::new(CONVERT)
            .args(&self.args)
            .output()
            .context("failed to launch convert")?;

        if !output.status.success() {
            let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
            text.push_str(&String::from_utf8_lossy(&output.stderr));
            bail!(
                "the \"convert\" command failed ({}): \"{}\"",
                output.status,
                text.trim()
            );
        }
        Ok(())
    }
}

impl fmt::Display for ConvertCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(CONVERT)?;
        for arg in &self.args {
            let arg = arg.to_string_lossy();
            if arg.is_empty() || arg.contains(|c: char| c.is_whitespace() || c == '"') {
                write!(f, " {arg:?}")?;
            } else {
                write!(f, " {arg}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Gravity;
    use std::path::PathBuf;

    fn strings(cmd: &ConvertCommand) -> Vec<String> {
        cmd.args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_option_and_arg() {
        let mut cmd = ConvertCommand::new();
        cmd.option("background", "None").arg("in.png").arg("out.png");
        assert_eq!(strings(&cmd), ["-background", "None", "in.png", "out.png"]);
    }

    #[test]
    fn test_annotate() {
        let mut style = TextStyle::label_default(PathBuf::from("/fonts/Sans.ttf"));
        style.gravity = Gravity::NorthWest;
        style.x_offset = 3;
        let mut cmd = ConvertCommand::new();
        cmd.annotate(&style, "007");
        assert_eq!(
            strings(&cmd),
            [
                "-font",
                "/fonts/Sans.ttf",
                "-style",
                "normal",
                "-weight",
                "normal",
                "-fill",
                "black",
                "-stroke",
                "none",
                "-pointsize",
                "20",
                "-gravity",
                "northwest",
                "-annotate",
                "+3+0",
                "007",
            ]
        );
    }

    #[test]
    fn test_display_quotes_spaces() {
        let mut cmd = ConvertCommand::new();
        cmd.option("annotate", "+0+0").arg("such wow").arg("a.png");
        assert_eq!(cmd.to_string(), r#"convert -annotate +0+0 "such wow" a.png"#);
    }
}
