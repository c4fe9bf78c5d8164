//! Stacked interpolation previews, one strip per colorspace

use std::path::Path;

use image::{ImageBuffer, ImageFormat, Rgb, RgbImage};

use super::{interpolate, InterpolationStrip};
use crate::color::Color;
use crate::colorspace::ColorSpace;
use crate::{CmapError, Result};

/// A column of interpolation strips sharing the same endpoints, sample count and height.
#[derive(Debug, Clone, PartialEq)]
pub struct PreviewImage {
    start: Color,
    end: Color,
    strips: Vec<InterpolationStrip>,
}

impl PreviewImage {
    pub fn start(&self) -> Color {
        self.start
    }

    pub fn end(&self) -> Color {
        self.end
    }

    /// Strips in the order their colorspaces were requested.
    pub fn strips(&self) -> &[InterpolationStrip] {
        &self.strips
    }

    /// The colorspace name heading each strip.
    pub fn captions(&self) -> Vec<String> {
        self.strips.iter().map(|s| s.space().name()).collect()
    }

    pub fn width(&self) -> usize {
        self.strips.first().map_or(0, InterpolationStrip::width)
    }

    /// Total height of all strips stacked top to bottom.
    pub fn height(&self) -> usize {
        self.strips.iter().map(InterpolationStrip::height).sum()
    }

    /// Render the stacked strips into a single RGB image.
    pub fn to_rgb_image(&self) -> Result<RgbImage> {
        let width = dimension(self.width())?;
        let height = dimension(self.height())?;
        let data: Vec<u8> = self
            .strips
            .iter()
            .flat_map(|s| s.as_bytes().iter().copied())
            .collect();

        let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_raw(width, height, data)
            .ok_or_else(|| {
                CmapError::WriterError("Failed to create RGB image buffer".to_string())
            })?;
        Ok(img)
    }

    /// Write the preview as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let img = self.to_rgb_image()?;
        img.save_with_format(path, ImageFormat::Png).map_err(|e| {
            CmapError::WriterError(format!("Failed to save {}: {}", path.display(), e))
        })?;
        tracing::info!(
            "Wrote {}x{} preview to {}",
            img.width(),
            img.height(),
            path.display()
        );
        Ok(())
    }
}

fn dimension(value: usize) -> Result<u32> {
    u32::try_from(value)
        .map_err(|_| CmapError::WriterError(format!("image dimension {} is too large", value)))
}

/// Interpolate `start` to `end` through each of `spaces`, stacking the strips in order.
///
/// Every strip is `samples` wide and `height` rows tall. An empty `spaces` list yields an
/// empty preview.
pub fn compose_preview(
    start: Color,
    end: Color,
    spaces: &[ColorSpace],
    samples: usize,
    height: usize,
) -> Result<PreviewImage> {
    let strips = spaces
        .iter()
        .map(|&space| interpolate(start, end, space, samples, height))
        .collect::<Result<Vec<_>>>()?;

    Ok(PreviewImage { start, end, strips })
}
