use std::path::PathBuf;

const SYSTEM_SANS: &str = "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf";

/// Open Sans from the user's ~/.fonts, else the DejaVu system sans.
pub fn default_font() -> Option<PathBuf> {
    candidates().into_iter().find(|p| p.is_file())
}

fn candidates() -> Vec<PathBuf> {
    let mut fonts = Vec::new();
    if let Some(home) = home::home_dir() {
        fonts.push(
            home.join(".fonts")
                .join("open-sans")
                .join("OpenSans-Regular.ttf"),
        );
    }
    fonts.push(PathBuf::from(SYSTEM_SANS));
    fonts
}
