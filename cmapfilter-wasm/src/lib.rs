//! WebAssembly bindings for cmapfilter
//!
//! Colormaps cross the boundary in catalogue form: a string of concatenated 6-digit hex
//! colors without `#`. Preview pixels come back as raw row-major RGB bytes ready for an
//! `ImageData` copy.

use js_sys::Array;
use wasm_bindgen::prelude::*;

use cmapfilter::writer::DEFAULT_FILTER_ID;
use cmapfilter::{Catalogue, Color, ColorSpace, Colormap, SvgFilterWriter, Writer};

fn to_js(err: cmapfilter::CmapError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn string_array<I, S>(items: I) -> Array
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| JsValue::from_str(s.as_ref()))
        .collect()
}

// ============================================================================
// Transfer tables
// ============================================================================

fn filter_markup_inner(colors: &str, samples: usize, id: &str) -> cmapfilter::Result<String> {
    let id = if id.is_empty() { DEFAULT_FILTER_ID } else { id };
    let tables = Colormap::from_hex_string(colors)?.sample(samples);
    SvgFilterWriter::new(id).write(&tables)
}

fn table_values_inner(colors: &str, samples: usize) -> cmapfilter::Result<[String; 3]> {
    let tables = Colormap::from_hex_string(colors)?.sample(samples);
    Ok([
        tables.red_values(),
        tables.green_values(),
        tables.blue_values(),
    ])
}

/// SVG `<filter>` markup for a colormap. An empty `id` uses the default.
#[wasm_bindgen]
pub fn filter_markup(colors: &str, samples: usize, id: &str) -> Result<String, JsValue> {
    filter_markup_inner(colors, samples, id).map_err(to_js)
}

/// The red, green and blue `tableValues` strings of a colormap.
#[wasm_bindgen]
pub fn table_values(colors: &str, samples: usize) -> Result<Array, JsValue> {
    table_values_inner(colors, samples)
        .map(string_array)
        .map_err(to_js)
}

/// Hex strings of the colors at positions 0 and 1, used as default preview endpoints.
#[wasm_bindgen]
pub fn colormap_endpoints(colors: &str) -> Result<Array, JsValue> {
    let cmap = Colormap::from_hex_string(colors).map_err(to_js)?;
    Ok(string_array([cmap.start().to_hex(), cmap.end().to_hex()]))
}

// ============================================================================
// Interpolation previews
// ============================================================================

fn parse_spaces(spaces: &str) -> cmapfilter::Result<Vec<ColorSpace>> {
    if spaces.trim().is_empty() {
        return Ok(cmapfilter::colorspace::DEFAULT_PREVIEW_SPACES.to_vec());
    }
    spaces.split(',').map(|s| s.trim().parse()).collect()
}

fn preview_inner(
    start: &str,
    end: &str,
    spaces: &str,
    samples: usize,
    height: usize,
) -> cmapfilter::Result<Vec<u8>> {
    let start = Color::parse(start)?;
    let end = Color::parse(end)?;
    let spaces = parse_spaces(spaces)?;
    let preview = cmapfilter::compose_preview(start, end, &spaces, samples, height)?;
    Ok(preview
        .strips()
        .iter()
        .flat_map(|s| s.as_bytes().iter().copied())
        .collect())
}

/// RGB bytes of stacked interpolation strips, `samples` wide and `height` rows per space.
///
/// `spaces` is a comma-separated list of colorspace names; empty selects the defaults.
#[wasm_bindgen]
pub fn interpolation_preview(
    start: &str,
    end: &str,
    spaces: &str,
    samples: usize,
    height: usize,
) -> Result<Vec<u8>, JsValue> {
    preview_inner(start, end, spaces, samples, height).map_err(to_js)
}

/// Names of the default preview colorspaces, in display order.
#[wasm_bindgen]
pub fn default_spaces() -> Array {
    string_array(
        cmapfilter::colorspace::DEFAULT_PREVIEW_SPACES
            .iter()
            .map(|s| s.name()),
    )
}

// ============================================================================
// Catalogue
// ============================================================================

/// Names of the compiled-in colormaps.
#[wasm_bindgen]
pub fn builtin_names() -> Array {
    string_array(Catalogue::builtin().names())
}

/// Concatenated hex colors of a compiled-in colormap.
#[wasm_bindgen]
pub fn builtin_colors(name: &str) -> Option<String> {
    Catalogue::builtin().get(name).map(|e| e.colors.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_markup() {
        let svg = filter_markup_inner("000000ffffff", 3, "").unwrap();
        assert!(svg.starts_with("<filter id=\"scale1\""));
        assert!(svg.contains("tableValues=\"0.00000 0.50000 1.00000\""));
        assert!(filter_markup_inner("000000", 3, "").is_err());
    }

    #[test]
    fn test_table_values() {
        let [r, g, b] = table_values_inner("ff000000ff00", 2).unwrap();
        assert_eq!(r, "1.00000 0.00000");
        assert_eq!(g, "0.00000 1.00000");
        assert_eq!(b, "0.00000 0.00000");
    }

    #[test]
    fn test_preview_bytes() {
        let bytes = preview_inner("#000000", "white", "sRGB1, CIELab", 4, 2).unwrap();
        assert_eq!(bytes.len(), 2 * 4 * 2 * 3);
        assert_eq!(&bytes[..3], &[0, 0, 0]);

        let defaults = preview_inner("#000000", "#ffffff", "", 4, 1).unwrap();
        assert_eq!(defaults.len(), 10 * 4 * 3);

        assert!(preview_inner("#000000", "#ffffff", "nope", 4, 1).is_err());
    }
}
