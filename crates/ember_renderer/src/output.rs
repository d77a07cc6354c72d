//! Image serialization.
//!
//! Plain-text PPM (`P3`) is the reference format: a three line header
//! (`P3`, `"<width> <height>"`, `255`) followed by one `"<r> <g> <b>"` line
//! per pixel, row-major from the top row. PNG is written through the
//! `image` crate with identical quantization.

use crate::{color_to_rgb8, ImageBuffer};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use thiserror::Error;

/// Errors that can occur while writing a rendered image.
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("image encoding error: {0}")]
    Image(#[from] image::ImageError),

    #[error("unsupported output format '{0}' (expected .ppm or .png)")]
    UnsupportedFormat(String),

    #[error("pixel buffer holds {actual} bytes, expected {expected}")]
    BufferSize { expected: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, OutputError>;

/// Write `image` as plain PPM to any writer.
pub fn write_ppm<W: Write>(image: &ImageBuffer, gamma: f32, writer: &mut W) -> Result<()> {
    writeln!(writer, "P3")?;
    writeln!(writer, "{} {}", image.width, image.height)?;
    writeln!(writer, "255")?;

    for color in &image.pixels {
        let [r, g, b] = color_to_rgb8(*color, gamma);
        writeln!(writer, "{} {} {}", r, g, b)?;
    }

    writer.flush()?;
    Ok(())
}

/// Save `image` to `path`, choosing the format from the file extension.
pub fn save_image(image: &ImageBuffer, gamma: f32, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    match extension.as_str() {
        "ppm" => {
            let mut writer = BufWriter::new(File::create(path)?);
            write_ppm(image, gamma, &mut writer)?;
        }
        "png" => {
            let bytes = image.to_rgb8(gamma);
            let expected = image.pixels.len() * 3;
            let actual = bytes.len();
            let buffer = image::RgbImage::from_raw(image.width, image.height, bytes)
                .ok_or(OutputError::BufferSize { expected, actual })?;
            buffer.save_with_format(path, image::ImageFormat::Png)?;
        }
        _ => return Err(OutputError::UnsupportedFormat(extension)),
    }

    log::info!("Saved {}x{} image to {}", image.width, image.height, path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Color;

    #[test]
    fn test_write_ppm_format() {
        let mut image = ImageBuffer::new(2, 2).expect("small image");
        image.set(0, 0, Color::new(1.0, 0.0, 0.0));
        image.set(1, 0, Color::new(0.0, 1.0, 0.0));
        image.set(0, 1, Color::new(0.0, 0.0, 1.0));
        image.set(1, 1, Color::new(0.5, 0.5, 0.5));

        let mut out = Vec::new();
        write_ppm(&image, 1.0, &mut out).expect("write to vec");
        let text = String::from_utf8(out).expect("ascii output");

        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(
            lines,
            vec!["P3", "2 2", "255", "255 0 0", "0 255 0", "0 0 255", "127 127 127"]
        );
    }

    #[test]
    fn test_write_ppm_applies_gamma() {
        let mut image = ImageBuffer::new(1, 1).expect("small image");
        image.set(0, 0, Color::splat(0.25));

        let mut out = Vec::new();
        write_ppm(&image, 2.0, &mut out).expect("write to vec");
        let text = String::from_utf8(out).expect("ascii output");
        assert_eq!(text.lines().last(), Some("127 127 127"));
    }

    #[test]
    fn test_unsupported_extension() {
        let image = ImageBuffer::new(1, 1).expect("small image");
        let path = std::env::temp_dir().join("ember_output_test.bmp");
        match save_image(&image, 1.0, &path) {
            Err(OutputError::UnsupportedFormat(ext)) => assert_eq!(ext, "bmp"),
            other => panic!("expected UnsupportedFormat, got {:?}", other),
        }
    }

    #[test]
    fn test_save_ppm_file() {
        let image = ImageBuffer::new(3, 1).expect("small image");
        let path = std::env::temp_dir().join(format!("ember_output_test_{}.ppm", std::process::id()));
        save_image(&image, 1.0, &path).expect("save ppm");

        let text = std::fs::read_to_string(&path).expect("read back");
        assert!(text.starts_with("P3\n3 1\n255\n"));
        assert_eq!(text.lines().count(), 3 + 3);
        let _ = std::fs::remove_file(&path);
    }
}
