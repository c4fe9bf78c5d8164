/*!
# cmapfilter - colormaps as SVG transfer filters

cmapfilter turns a named colormap into the per-channel lookup tables of an SVG
`feComponentTransfer` filter, and previews two-color gradients interpolated through
a range of perceptual colorspaces.

## Example

```rust
use cmapfilter::{Color, ColorSpace, Colormap};

let cmap = Colormap::from_hex(&["#000000", "#ffffff"]).unwrap();
let tables = cmap.sample(3);
assert_eq!(tables.red_values(), "0.00000 0.50000 1.00000");

let strip = cmapfilter::interpolate(
    Color::from_hex("#ff0000").unwrap(),
    Color::from_hex("#0000ff").unwrap(),
    ColorSpace::CieLab,
    3,
    1,
)
.unwrap();
assert_eq!(strip.pixel(0, 0), [255, 0, 0]);
assert_eq!(strip.pixel(2, 0), [0, 0, 255]);
```

## Architecture

- `color` - Color model, hex parsing and 8-bit quantization
- `colormap` - Piecewise-linear colormaps and transfer tables
- `colorspace` - Forward/inverse sRGB conversions for every supported colorspace
- `interpolate` - Two-color interpolation strips and stacked previews
- `catalogue` - Named colormap records and the built-in collection
- `writer` - SVG filter and JSON output
- `config` - Tunable sample counts, strip height and preview spaces
*/

pub mod catalogue;
pub mod color;
pub mod colormap;
pub mod colorspace;
pub mod config;
pub mod interpolate;
pub mod writer;

pub use catalogue::{Catalogue, CatalogueEntry};
pub use color::Color;
pub use colormap::{Channel, ChannelTables, Colormap};
pub use colorspace::ColorSpace;
pub use config::Config;
pub use interpolate::{
    compose_preview, interpolate, interpolate_named, InterpolationStrip, PreviewImage,
};
pub use writer::{JsonWriter, SvgFilterWriter, Writer};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Main library error type
#[derive(thiserror::Error, Debug)]
pub enum CmapError {
    #[error("Insufficient color stops: a colormap needs at least 2, got {0}")]
    InsufficientStops(usize),

    #[error("Malformed color: {0}")]
    MalformedColor(String),

    #[error("Unknown colorspace: {0}")]
    UnknownColorspace(String),

    #[error("Conversion failure: {0}")]
    ConversionFailure(String),

    #[error("Catalogue error: {0}")]
    CatalogueError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Output generation error: {0}")]
    WriterError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, CmapError>;
