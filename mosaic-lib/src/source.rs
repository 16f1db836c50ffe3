use crate::*;
use ::image::{io::Reader as ImageReader, ImageFormat};
use log::debug;
use std::path::Path;

/// Decodes the image at `path` into an RGB buffer, dropping any alpha.
pub fn load(path: impl AsRef<Path>) -> Result<RgbImage> {
    let path = path.as_ref();

    let image = ImageReader::open(path)
        .map_err(|source| Error::Open {
            path: path.to_owned(),
            source,
        })?
        .with_guessed_format()
        .map_err(|source| Error::Open {
            path: path.to_owned(),
            source,
        })?
        .decode()
        .map_err(|source| Error::Input {
            path: path.to_owned(),
            source,
        })?;

    let image = image.to_rgb8();
    let (width, height) = image.dimensions();

    if width == 0 || height == 0 {
        return Err(Error::EmptyImage(width, height));
    }

    debug!("Loaded {} ({}x{})", path.display(), width, height);

    Ok(image)
}

/// Encodes `img` as JPEG at `path`.
pub fn save(img: &RgbImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();

    img.save_with_format(path, ImageFormat::Jpeg)
        .map_err(|source| Error::Output {
            path: path.to_owned(),
            source,
        })?;

    debug!("Saved {}", path.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::image::{ImageBuffer, Rgb};
    use std::env;

    fn scratch(name: &str) -> std::path::PathBuf {
        env::temp_dir().join(format!("mosaic-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_missing_file_is_reported() {
        let err = load(scratch("missing.png")).unwrap_err();
        assert!(matches!(err, Error::Open { .. }), "{}", err);
    }

    #[test]
    fn test_garbage_is_reported() {
        let path = scratch("garbage.jpg");
        std::fs::write(&path, b"definitely not an image").unwrap();

        let err = load(&path).unwrap_err();
        let _ = std::fs::remove_file(&path);

        assert!(matches!(err, Error::Input { .. }), "{}", err);
    }

    #[test]
    fn test_saved_jpeg_loads_back() {
        let path = scratch("result.jpg");
        let img: RgbImage = ImageBuffer::from_pixel(16, 8, Rgb([200, 10, 10]));

        save(&img, &path).unwrap();
        let loaded = load(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(loaded.dimensions(), (16, 8));
    }
}
