//! Textures and decoded image data

use std::path::Path;

use crate::assets::AssetError;

/// GPU texture name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TextureHandle(pub u32);

/// A loaded texture
///
/// `handle` is `None` when no render thread was available to upload it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    handle: Option<TextureHandle>,
    width: u32,
    height: u32,
}

impl Texture {
    /// Create a texture record
    pub fn new(handle: Option<TextureHandle>, width: u32, height: u32) -> Self {
        Self { handle, width, height }
    }

    /// GPU handle, if uploaded
    pub fn handle(&self) -> Option<TextureHandle> {
        self.handle
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }
}

/// RGBA8 pixels ready for upload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedImage {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Row-major RGBA8 data
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Decode any format the `image` crate was built with
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AssetError> {
        let rgba = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }

    /// Read and decode an image file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let bytes = std::fs::read(path)?;
        let image = Self::from_bytes(&bytes)?;
        log::debug!("Decoded {}x{} image from {:?}", image.width, image.height, path);
        Ok(image)
    }

    /// Single-colour image
    pub fn solid(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixel_count = width as usize * height as usize;
        Self {
            width,
            height,
            pixels: rgba.repeat(pixel_count),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid() {
        let image = DecodedImage::solid(2, 3, [255, 0, 0, 255]);
        assert_eq!(image.pixels.len(), 2 * 3 * 4);
        assert_eq!(&image.pixels[20..24], &[255, 0, 0, 255]);
    }

    #[test]
    fn test_decode_png_round_trip_through_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("red.png");
        image::RgbaImage::from_pixel(3, 2, image::Rgba([255, 0, 0, 255]))
            .save(&path)
            .unwrap();

        let decoded = DecodedImage::from_file(&path).unwrap();
        assert_eq!((decoded.width, decoded.height), (3, 2));
        assert_eq!(decoded, DecodedImage::solid(3, 2, [255, 0, 0, 255]));
    }

    #[test]
    fn test_decode_garbage_fails() {
        assert!(matches!(
            DecodedImage::from_bytes(b"not an image"),
            Err(AssetError::Image(_))
        ));
    }
}
