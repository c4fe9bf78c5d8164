//! Two-color interpolation through a colorspace
//!
//! Both endpoints are converted into the target space, `N` points are placed on the
//! straight line between them in that space's native coordinates, and every point is
//! converted back to sRGB, clamped to `[0, 1]` and quantized to 8 bits (ties to even).
//! The resulting row is repeated to give the strip some height.

mod preview;

pub use preview::{compose_preview, PreviewImage};

use crate::color::{lerp, Color};
use crate::colorspace::ColorSpace;
use crate::Result;

/// Sample count of the reference sidebar preview.
pub const DEFAULT_SAMPLES: usize = 256;

/// Row count of each strip in the reference sidebar preview.
pub const DEFAULT_STRIP_HEIGHT: usize = 30;

/// A `height x width` block of 8-bit RGB pixels, row-major, every row identical.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpolationStrip {
    space: ColorSpace,
    width: usize,
    height: usize,
    pixels: Vec<u8>,
}

impl InterpolationStrip {
    pub fn space(&self) -> ColorSpace {
        self.space
    }

    /// Number of samples per row.
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// The interpolated colors, left to right. Empty when the strip has no rows.
    pub fn row(&self) -> Vec<[u8; 3]> {
        if self.height == 0 {
            return Vec::new();
        }
        self.pixels[..self.width * 3]
            .chunks_exact(3)
            .map(|px| [px[0], px[1], px[2]])
            .collect()
    }

    /// Pixel at column `x`, row `y`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinates are outside the strip.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 3] {
        assert!(x < self.width && y < self.height, "pixel ({}, {}) out of bounds", x, y);
        let i = (y * self.width + x) * 3;
        [self.pixels[i], self.pixels[i + 1], self.pixels[i + 2]]
    }

    /// Raw row-major RGB bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels
    }
}

/// Interpolate from `start` to `end` through `space`.
///
/// Column 0 is always the 8-bit quantization of `start` and column `samples - 1` that of
/// `end`. One sample yields `start` alone.
///
/// # Errors
///
/// - `MalformedColor` if either endpoint has a channel outside `[0, 1]`
/// - `ConversionFailure` if a transform produces a non-finite value
pub fn interpolate(
    start: Color,
    end: Color,
    space: ColorSpace,
    samples: usize,
    height: usize,
) -> Result<InterpolationStrip> {
    start.validate()?;
    end.validate()?;

    let converter = space.converter();
    let from = converter.from_srgb(start)?;
    let to = converter.from_srgb(end)?;

    let mut row = Vec::with_capacity(samples * 3);
    for i in 0..samples {
        // Endpoints skip the round trip so float drift cannot flip a rounding tie
        let px = if i == 0 {
            start.to_rgb8()
        } else if i == samples - 1 {
            end.to_rgb8()
        } else {
            let t = i as f64 / (samples - 1) as f64;
            let point = [
                lerp(from[0], to[0], t),
                lerp(from[1], to[1], t),
                lerp(from[2], to[2], t),
            ];
            Color::from_array(converter.to_srgb(point)?).to_rgb8()
        };
        row.extend_from_slice(&px);
    }

    tracing::debug!(
        "Interpolated {} -> {} in {} ({} samples)",
        start,
        end,
        space,
        samples
    );

    Ok(InterpolationStrip {
        space,
        width: samples,
        height,
        pixels: row.repeat(height),
    })
}

/// [`interpolate`] with the colorspace given by name.
///
/// # Errors
///
/// `UnknownColorspace` if `space` is not a supported identifier, plus the errors of
/// [`interpolate`].
pub fn interpolate_named(
    start: Color,
    end: Color,
    space: &str,
    samples: usize,
    height: usize,
) -> Result<InterpolationStrip> {
    let space: ColorSpace = space.parse()?;
    interpolate(start, end, space, samples, height)
}

/// Parse two CSS colors (`"red"`, `"#f00"`, `"hsl(0, 100%, 50%)"`, ...) and interpolate
/// between them, returning a single row.
pub fn gradient(
    start: &str,
    end: &str,
    space: ColorSpace,
    samples: usize,
) -> Result<Vec<[u8; 3]>> {
    let start = Color::parse(start)?;
    let end = Color::parse(end)?;
    Ok(interpolate(start, end, space, samples, 1)?.row())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::CmapError;
    use proptest::prelude::*;

    fn hex(s: &str) -> Color {
        Color::from_hex(s).unwrap()
    }

    #[test]
    fn test_red_blue_cielab() {
        let strip = interpolate_named(hex("#ff0000"), hex("#0000ff"), "CIELab", 3, 1).unwrap();
        assert_eq!(strip.width(), 3);
        assert_eq!(strip.height(), 1);
        assert_eq!(strip.pixel(0, 0), [255, 0, 0]);
        assert_eq!(strip.pixel(2, 0), [0, 0, 255]);

        // The Lab midpoint differs from the plain sRGB midpoint
        let srgb = interpolate(hex("#ff0000"), hex("#0000ff"), ColorSpace::Srgb1, 3, 1).unwrap();
        assert_eq!(srgb.pixel(1, 0), [128, 0, 128]);
        assert_ne!(strip.pixel(1, 0), srgb.pixel(1, 0));
    }

    #[test]
    fn test_unknown_colorspace() {
        let err =
            interpolate_named(hex("#ff0000"), hex("#0000ff"), "NOT_A_SPACE", 3, 1).unwrap_err();
        assert!(matches!(err, CmapError::UnknownColorspace(ref n) if n == "NOT_A_SPACE"));
    }

    #[test]
    fn test_out_of_range_endpoint() {
        let bad = Color {
            red: 0.0,
            green: 1.5,
            blue: 0.0,
        };
        let err = interpolate(bad, hex("#000000"), ColorSpace::CieLab, 4, 1).unwrap_err();
        match err {
            CmapError::MalformedColor(msg) => assert!(msg.contains("out of range")),
            other => panic!("unexpected error: {}", other),
        }
    }

    #[test]
    fn test_rows_are_replicated() {
        let strip = interpolate(hex("#000000"), hex("#ffffff"), ColorSpace::Cam02Ucs, 16, 30)
            .unwrap();
        assert_eq!(strip.as_bytes().len(), 16 * 30 * 3);
        let first = strip.row();
        for y in 0..30 {
            for (x, px) in first.iter().enumerate() {
                assert_eq!(strip.pixel(x, y), *px);
            }
        }
    }

    #[test]
    fn test_default_sample_count() {
        let strip = interpolate(
            hex("#440154"),
            hex("#fde725"),
            ColorSpace::Cam02Ucs,
            DEFAULT_SAMPLES,
            DEFAULT_STRIP_HEIGHT,
        )
        .unwrap();
        assert_eq!(strip.width(), 256);
        assert_eq!(strip.height(), 30);
        assert_eq!(strip.pixel(0, 29), [0x44, 0x01, 0x54]);
        assert_eq!(strip.pixel(255, 29), [0xfd, 0xe7, 0x25]);
    }

    #[test]
    fn test_degenerate_sizes() {
        let one = interpolate(hex("#123456"), hex("#abcdef"), ColorSpace::CieLab, 1, 2).unwrap();
        assert_eq!(one.row(), vec![[0x12, 0x34, 0x56]]);
        assert_eq!(one.as_bytes().len(), 6);

        let empty = interpolate(hex("#123456"), hex("#abcdef"), ColorSpace::CieLab, 0, 5).unwrap();
        assert!(empty.as_bytes().is_empty());

        let flat = interpolate(hex("#123456"), hex("#abcdef"), ColorSpace::CieLab, 8, 0).unwrap();
        assert!(flat.as_bytes().is_empty());
        assert_eq!(flat.width(), 8);
        assert!(flat.row().is_empty());
    }

    #[test]
    fn test_linear_srgb_gray_midpoint() {
        // Halfway in linear light is brighter than halfway in encoded sRGB
        let strip = interpolate(hex("#000000"), hex("#ffffff"), ColorSpace::LinearSrgb, 3, 1)
            .unwrap();
        assert_eq!(strip.pixel(1, 0), [188, 188, 188]);
    }

    #[test]
    fn test_gradient_css() {
        let row = gradient("red", "blue", ColorSpace::Oklab, 5).unwrap();
        assert_eq!(row.len(), 5);
        assert_eq!(row[0], [255, 0, 0]);
        assert_eq!(row[4], [0, 0, 255]);
        assert!(gradient("red", "notacolor", ColorSpace::Oklab, 5).is_err());
        assert!(gradient("red", "blue", ColorSpace::Oklab, 0).unwrap().is_empty());
    }

    #[test]
    fn test_endpoints_on_rounding_ties() {
        // (k + 0.5) / 255 sits exactly between two 8-bit codes
        for k in [0u8, 1, 2, 63, 127, 200, 254] {
            let v = (k as f64 + 0.5) / 255.0;
            let a = Color::new(v, v / 2.0, 0.0).unwrap();
            let b = Color::new(1.0 - v, 0.0, v).unwrap();
            for space in ColorSpace::all() {
                let strip = interpolate(a, b, space, 5, 1).unwrap();
                assert_eq!(strip.pixel(0, 0), a.to_rgb8(), "{} k={}", space, k);
                assert_eq!(strip.pixel(4, 0), b.to_rgb8(), "{} k={}", space, k);
            }
        }
    }

    fn color_strategy() -> impl Strategy<Value = Color> {
        any::<[u8; 3]>().prop_map(Color::from_rgb8)
    }

    fn channel_strategy() -> impl Strategy<Value = f64> {
        prop_oneof![
            0.0f64..=1.0,
            (0u8..255).prop_map(|k| (k as f64 + 0.5) / 255.0),
        ]
    }

    fn float_color_strategy() -> impl Strategy<Value = Color> {
        (channel_strategy(), channel_strategy(), channel_strategy())
            .prop_map(|(r, g, b)| Color { red: r, green: g, blue: b })
    }

    proptest! {
        #[test]
        fn prop_endpoint_fidelity(
            a in float_color_strategy(),
            b in float_color_strategy(),
            n in 2usize..40,
            space_index in 0usize..26,
        ) {
            let space = ColorSpace::all()[space_index];
            let strip = interpolate(a, b, space, n, 2).unwrap();
            prop_assert_eq!(strip.pixel(0, 0), a.to_rgb8());
            prop_assert_eq!(strip.pixel(n - 1, 0), b.to_rgb8());
            prop_assert_eq!(strip.pixel(0, 1), a.to_rgb8());
            prop_assert_eq!(strip.pixel(n - 1, 1), b.to_rgb8());
        }

        #[test]
        fn prop_deterministic(
            a in color_strategy(),
            b in color_strategy(),
            space_index in 0usize..26,
        ) {
            let space = ColorSpace::all()[space_index];
            let first = interpolate(a, b, space, 17, 3).unwrap();
            let second = interpolate(a, b, space, 17, 3).unwrap();
            prop_assert_eq!(first.as_bytes(), second.as_bytes());
        }
    }
}
