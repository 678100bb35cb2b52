//! Icon files written next to the site.
//!
//! Extracted icons are written as `<stem>.png`, then re-encoded to a
//! 120x120 `<stem>.jpg` which replaces the original. Icons the decoder
//! rejects (Apple-optimized PNGs among them) stay as `.png`.

use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageError};
use thiserror::Error;
use tracing::{debug, warn};

use crate::paths::ICONS_URL_DIR;

/// Extensions looked up for an icon asset, preferred first.
const ICON_EXTENSIONS: [&str; 2] = ["jpg", "png"];

/// Edge length of re-encoded icons, in pixels.
pub const ICON_SIZE: u32 = 120;

/// JPEG quality of re-encoded icons.
const JPEG_QUALITY: u8 = 85;

#[derive(Error, Debug)]
enum ReencodeError {
    #[error("image error: {0}")]
    Image(#[from] ImageError),

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Write an icon for `stem` into `dir` and return the asset path.
///
/// The raw bytes land in `<stem>.png` first. When they decode as an image
/// the icon is resized, written as `<stem>.jpg`, and the `.png` removed.
/// A failed re-encode keeps the `.png`.
///
/// # Errors
///
/// Returns an error if the directory or the raw `.png` cannot be written.
pub fn save_icon(dir: &Path, stem: &str, bytes: &[u8]) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    let png = dir.join(format!("{stem}.png"));
    fs::write(&png, bytes)?;

    let jpg = dir.join(format!("{stem}.jpg"));
    match reencode(bytes, &jpg) {
        Ok(()) => {
            if let Err(e) = fs::remove_file(&png) {
                warn!(path = %png.display(), error = %e, "Failed to remove original icon");
            }
            Ok(jpg)
        }
        Err(e) => {
            debug!(%stem, error = %e, "Keeping icon as PNG");
            if jpg.exists() {
                let _ = fs::remove_file(&jpg);
            }
            Ok(png)
        }
    }
}

fn reencode(bytes: &[u8], dest: &Path) -> Result<(), ReencodeError> {
    let icon = image::load_from_memory(bytes)?
        .resize_exact(ICON_SIZE, ICON_SIZE, FilterType::Lanczos3)
        .to_rgb8();

    let mut out = BufWriter::new(File::create(dest)?);
    DynamicImage::ImageRgb8(icon)
        .write_with_encoder(JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY))?;
    out.flush()?;
    Ok(())
}

/// Site-relative path of the icon for `stem`, if one exists in `dir`.
pub fn find_icon_asset(dir: &Path, stem: &str) -> Option<String> {
    ICON_EXTENSIONS
        .iter()
        .map(|ext| format!("{stem}.{ext}"))
        .find(|name| dir.join(name).is_file())
        .map(|name| format!("{ICONS_URL_DIR}/{name}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::png_bytes;

    #[test]
    fn test_undecodable_icon_stays_png() {
        let dir = tempfile::tempdir().unwrap();
        let icons = dir.path().join("icons");

        assert_eq!(find_icon_asset(&icons, "Demo"), None);

        let path = save_icon(&icons, "Demo", b"png").unwrap();
        assert_eq!(path, icons.join("Demo.png"));
        assert_eq!(std::fs::read(path).unwrap(), b"png");
        assert!(!icons.join("Demo.jpg").exists());
        assert_eq!(
            find_icon_asset(&icons, "Demo").as_deref(),
            Some("assets/app-icons/Demo.png")
        );
    }

    #[test]
    fn test_decodable_icon_is_reencoded() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_icon(dir.path(), "Demo", &png_bytes(180, 180)).unwrap();

        assert_eq!(path, dir.path().join("Demo.jpg"));
        assert!(!dir.path().join("Demo.png").exists());

        let jpg = image::open(&path).unwrap();
        assert_eq!((jpg.width(), jpg.height()), (ICON_SIZE, ICON_SIZE));
        assert_eq!(
            find_icon_asset(dir.path(), "Demo").as_deref(),
            Some("assets/app-icons/Demo.jpg")
        );
    }

    #[test]
    fn test_unwritable_dir_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("icons");
        std::fs::write(&blocker, b"not a directory").unwrap();
        assert!(save_icon(&blocker, "Demo", b"png").is_err());
    }

    #[test]
    fn test_prefers_reencoded_form() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Demo.png"), b"png").unwrap();
        std::fs::write(dir.path().join("Demo.jpg"), b"jpg").unwrap();
        assert_eq!(
            find_icon_asset(dir.path(), "Demo").as_deref(),
            Some("assets/app-icons/Demo.jpg")
        );
    }
}
