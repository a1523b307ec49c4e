use std::path::Path;

use image::imageops::FilterType;
use image::RgbaImage;

use crate::error::RenderError;

/// Turns a profile-picture reference into a square image cropped to a
/// circle, transparent outside it.
pub trait AvatarLoader {
    fn load_and_mask(&self, source: &Path, size: u32) -> Result<RgbaImage, RenderError>;
}

/// Reads avatars from image files on disk.
#[derive(Clone, Copy, Debug, Default)]
pub struct FileAvatarLoader;

impl AvatarLoader for FileAvatarLoader {
    fn load_and_mask(&self, source: &Path, size: u32) -> Result<RgbaImage, RenderError> {
        let image = image::open(source).map_err(|source_err| {
            log::warn!("cannot open profile picture {}: {source_err}", source.display());
            RenderError::ProfilePictureUnavailable {
                path: source.to_path_buf(),
                source: source_err,
            }
        })?;

        log::debug!(
            "profile picture {} is {}x{}, resizing to {size}",
            source.display(),
            image.width(),
            image.height()
        );

        let mut square = image
            .resize_to_fill(size, size, FilterType::Lanczos3)
            .into_rgba8();
        mask_circle(&mut square);
        Ok(square)
    }
}

/// Scales the alpha of every pixel by how much of it lies inside the circle
/// inscribed in the image. The edge is antialiased over one pixel.
pub fn mask_circle(image: &mut RgbaImage) {
    let radius = image.width().min(image.height()) as f32 / 2.0;
    let center_x = image.width() as f32 / 2.0;
    let center_y = image.height() as f32 / 2.0;

    for (x, y, pixel) in image.enumerate_pixels_mut() {
        let dx = x as f32 + 0.5 - center_x;
        let dy = y as f32 + 0.5 - center_y;
        let distance = (dx * dx + dy * dy).sqrt();
        let coverage = (radius - distance + 0.5).clamp(0.0, 1.0);
        pixel[3] = (pixel[3] as f32 * coverage).round() as u8;
    }
}
