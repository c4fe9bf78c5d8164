//! Compiled-in colormaps
//!
//! Stops are stored in the same concatenated form as catalogue files.

// =============================================================================
// Sequential
// =============================================================================

/// Viridis
pub const VIRIDIS: &str = "4401544828783e4a8931688e26828e1f9e8935b7796ece58b5de2bfde725";

/// Plasma
pub const PLASMA: &str = "0d088746039f7201a89c179ebd3786d8576bed7953fb9f3afdca26f0f921";

/// Magma
pub const MAGMA: &str = "000004180f3d440f76721f819e2f7fcd4071f1605dfd9668feca8dfcfdbf";

/// Inferno
pub const INFERNO: &str = "0000041b0c414a0c6b781c6da52c60cf4446ed6925fb9b06f7d13dfcffa4";

/// Cividis
pub const CIVIDIS: &str = "00224e1235703b496c575d6d7071738a8678a59c74c3b369e1cc55fdea45";

/// ColorBrewer Blues
pub const BLUES: &str = "f7fbffdeebf7c6dbef9ecae16baed64292c62171b508519c08306b";

/// ColorBrewer Greens
pub const GREENS: &str = "f7fcf5e5f5e0c7e9c0a1d99b74c47641ab5d238b45006d2c00441b";

/// ColorBrewer Oranges
pub const ORANGES: &str = "fff5ebfee6cefdd0a2fdae6bfd8d3cf16913d94801a636037f2704";

/// ColorBrewer Reds
pub const REDS: &str = "fff5f0fee0d2fcbba1fc9272fb6a4aef3b2ccb181da50f1567000d";

/// ColorBrewer Purples
pub const PURPLES: &str = "fcfbfdefedf5dadaebbcbddc9e9ac8807dba6a51a354278f3f007d";

/// Grayscale ramp
pub const GRAYS: &str = "000000ffffff";

// =============================================================================
// Diverging
// =============================================================================

/// Red-Blue
pub const RDBU: &str = "67001fb2182bd6604df4a582fddbc7\
f7f7f7d1e5f092c5de4393c32166ac053061";

/// Red-Yellow-Blue
pub const RDYLBU: &str = "a50026d73027f46d43fdae61fee090\
ffffbfe0f3f8abd9e974add14575b4313695";

/// Red-Yellow-Green
pub const RDYLGN: &str = "a50026d73027f46d43fdae61fee08b\
ffffbfd9ef8ba6d96a66bd631a9850006837";

/// Spectral
pub const SPECTRAL: &str = "9e0142d53e4ff46d43fdae61fee08b\
ffffbfe6f598abdda466c2a53288bd5e4fa2";

/// Brown-Blue-Green
pub const BRBG: &str = "5430058c510abf812ddfc27df6e8c3\
f5f5f5c7eae580cdc135978f01665e003c30";

/// Purple-Green
pub const PRGN: &str = "40004b762a839970abc2a5cfe7d4e8\
f7f7f7d9f0d3a6dba05aae611b783700441b";

/// Pink-Yellow-Green
pub const PIYG: &str = "8e0152c51b7dde77aef1b6dafde0ef\
f7f7f7e6f5d0b8e1867fbc414d9221276419";

/// Every compiled-in colormap, in listing order.
pub const BUILTIN: &[(&str, &str)] = &[
    ("viridis", VIRIDIS),
    ("plasma", PLASMA),
    ("magma", MAGMA),
    ("inferno", INFERNO),
    ("cividis", CIVIDIS),
    ("blues", BLUES),
    ("greens", GREENS),
    ("oranges", ORANGES),
    ("reds", REDS),
    ("purples", PURPLES),
    ("grays", GRAYS),
    ("rdbu", RDBU),
    ("rdylbu", RDYLBU),
    ("rdylgn", RDYLGN),
    ("spectral", SPECTRAL),
    ("brbg", BRBG),
    ("prgn", PRGN),
    ("piyg", PIYG),
];
