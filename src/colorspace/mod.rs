//! Colorspaces available for gradient interpolation
//!
//! Each [`ColorSpace`] is a forward/inverse pair between sRGB (channels in `[0, 1]`) and
//! the space's native three coordinates. Names follow the common scientific
//! identifiers (`sRGB1`, `CIELab`, `CAM02-UCS`, `JCh`, ...).
//!
//! The standard spaces go through `palette` (sRGB transfer curve, D65 XYZ, Lab, LCh, xyY,
//! Oklab). CIECAM02 and the CAM02 uniform spaces sit on top of palette's XYZ.
//!
//! Hue coordinates are plain numbers: interpolating between 350 and 10 degrees walks the
//! long way round, through 180.

mod ciecam02;
mod uniform;

pub use ciecam02::{
    Appearance, Cam02Subset, ChromaAxis, Ciecam02, HueAxis, LightnessAxis, Surround,
    ViewingConditions, D65_XYZ100,
};
pub use uniform::UniformSpace;

use std::fmt;
use std::str::FromStr;

use palette::convert::FromColorUnclamped;
use palette::white_point::D65;
use palette::{Lab, Lch, LinSrgb, Oklab, Srgb, Xyz, Yxy};
use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::{CmapError, Result};

/// A supported interpolation colorspace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ColorSpace {
    /// sRGB, channels in `[0, 1]`
    Srgb1,
    /// sRGB, channels in `[0, 100]`
    Srgb100,
    /// sRGB, channels in `[0, 255]`
    Srgb255,
    /// sRGB with the transfer curve removed
    LinearSrgb,
    /// CIE XYZ, white Y = 1
    Xyz1,
    /// CIE XYZ, white Y = 100
    Xyz100,
    /// CIE xyY, white Y = 1
    XyY1,
    /// CIE xyY, white Y = 100
    XyY100,
    /// CIE L*a*b*, D65
    CieLab,
    /// Cylindrical CIE L*a*b* (L, C, h)
    CieLch,
    /// CAM02 uniform colour space
    Cam02Ucs,
    /// CAM02 large color difference space
    Cam02Lcd,
    /// CAM02 small color difference space
    Cam02Scd,
    /// A three-correlate slice of CIECAM02
    Ciecam02(Cam02Subset),
    /// Oklab
    Oklab,
}

const fn cam02(lightness: LightnessAxis, chroma: ChromaAxis, hue: HueAxis) -> ColorSpace {
    ColorSpace::Ciecam02(Cam02Subset::new(lightness, chroma, hue))
}

/// Spaces shown in the gradient preview, top to bottom.
pub const DEFAULT_PREVIEW_SPACES: [ColorSpace; 10] = [
    ColorSpace::Cam02Ucs,
    ColorSpace::Srgb1,
    ColorSpace::CieLab,
    ColorSpace::LinearSrgb,
    ColorSpace::XyY1,
    cam02(LightnessAxis::J, ChromaAxis::C, HueAxis::Angle),
    cam02(LightnessAxis::J, ChromaAxis::M, HueAxis::Quadrature),
    cam02(LightnessAxis::Q, ChromaAxis::C, HueAxis::Quadrature),
    cam02(LightnessAxis::Q, ChromaAxis::S, HueAxis::Angle),
    ColorSpace::CieLch,
];

const FIXED_SPACES: [ColorSpace; 14] = [
    ColorSpace::Srgb1,
    ColorSpace::Srgb100,
    ColorSpace::Srgb255,
    ColorSpace::LinearSrgb,
    ColorSpace::Xyz1,
    ColorSpace::Xyz100,
    ColorSpace::XyY1,
    ColorSpace::XyY100,
    ColorSpace::CieLab,
    ColorSpace::CieLch,
    ColorSpace::Cam02Ucs,
    ColorSpace::Cam02Lcd,
    ColorSpace::Cam02Scd,
    ColorSpace::Oklab,
];

impl ColorSpace {
    /// Every supported colorspace, CIECAM02 subsets last.
    pub fn all() -> Vec<ColorSpace> {
        FIXED_SPACES
            .iter()
            .copied()
            .chain(Cam02Subset::all().into_iter().map(ColorSpace::Ciecam02))
            .collect()
    }

    /// Canonical identifier, as accepted by [`FromStr`].
    pub fn name(&self) -> String {
        match self {
            ColorSpace::Srgb1 => "sRGB1".to_string(),
            ColorSpace::Srgb100 => "sRGB100".to_string(),
            ColorSpace::Srgb255 => "sRGB255".to_string(),
            ColorSpace::LinearSrgb => "sRGB1-linear".to_string(),
            ColorSpace::Xyz1 => "XYZ1".to_string(),
            ColorSpace::Xyz100 => "XYZ100".to_string(),
            ColorSpace::XyY1 => "xyY1".to_string(),
            ColorSpace::XyY100 => "xyY100".to_string(),
            ColorSpace::CieLab => "CIELab".to_string(),
            ColorSpace::CieLch => "CIELCh".to_string(),
            ColorSpace::Cam02Ucs => "CAM02-UCS".to_string(),
            ColorSpace::Cam02Lcd => "CAM02-LCD".to_string(),
            ColorSpace::Cam02Scd => "CAM02-SCD".to_string(),
            ColorSpace::Ciecam02(subset) => subset.name(),
            ColorSpace::Oklab => "Oklab".to_string(),
        }
    }

    /// Build a converter with any model state precomputed.
    pub fn converter(self) -> Converter {
        let cam = match self {
            ColorSpace::Cam02Ucs
            | ColorSpace::Cam02Lcd
            | ColorSpace::Cam02Scd
            | ColorSpace::Ciecam02(_) => Some(Ciecam02::default()),
            _ => None,
        };
        Converter { space: self, cam }
    }

    /// Convert an sRGB color to this space's coordinates.
    pub fn from_srgb(self, color: Color) -> Result<[f64; 3]> {
        self.converter().from_srgb(color)
    }

    /// Convert coordinates in this space back to (unclamped) sRGB.
    pub fn to_srgb(self, coords: [f64; 3]) -> Result<[f64; 3]> {
        self.converter().to_srgb(coords)
    }
}

impl fmt::Display for ColorSpace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for ColorSpace {
    type Err = CmapError;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(space) = FIXED_SPACES.iter().find(|space| space.name() == s) {
            return Ok(*space);
        }
        Cam02Subset::parse(s)
            .map(ColorSpace::Ciecam02)
            .ok_or_else(|| CmapError::UnknownColorspace(s.to_string()))
    }
}

impl TryFrom<String> for ColorSpace {
    type Error = CmapError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ColorSpace> for String {
    fn from(space: ColorSpace) -> Self {
        space.name()
    }
}

/// Forward/inverse transform pair for one colorspace.
#[derive(Debug, Clone)]
pub struct Converter {
    space: ColorSpace,
    cam: Option<Ciecam02>,
}

impl Converter {
    pub fn space(&self) -> ColorSpace {
        self.space
    }

    /// sRGB to native coordinates.
    pub fn from_srgb(&self, color: Color) -> Result<[f64; 3]> {
        let rgb = color.to_array();
        let coords = match self.space {
            ColorSpace::Srgb1 => rgb,
            ColorSpace::Srgb100 => rgb.map(|v| v * 100.0),
            ColorSpace::Srgb255 => rgb.map(|v| v * 255.0),
            ColorSpace::LinearSrgb => {
                let lin = linearize(rgb);
                [lin.red, lin.green, lin.blue]
            }
            ColorSpace::Xyz1 => xyz_array(srgb_to_xyz(rgb)),
            ColorSpace::Xyz100 => xyz_array(srgb_to_xyz(rgb)).map(|v| v * 100.0),
            ColorSpace::XyY1 | ColorSpace::XyY100 => {
                let yxy = xyy_from_xyz(srgb_to_xyz(rgb));
                let scale = if self.space == ColorSpace::XyY100 { 100.0 } else { 1.0 };
                [yxy.x, yxy.y, yxy.luma * scale]
            }
            ColorSpace::CieLab => {
                let lab = Lab::<D65, f64>::from_color_unclamped(srgb_to_xyz(rgb));
                [lab.l, lab.a, lab.b]
            }
            ColorSpace::CieLch => {
                let lch = Lch::<D65, f64>::from_color_unclamped(srgb_to_xyz(rgb));
                [lch.l, lch.chroma, lch.hue.into_positive_degrees()]
            }
            ColorSpace::Oklab => {
                let lab = Oklab::<f64>::from_color_unclamped(srgb_to_xyz(rgb));
                [lab.l, lab.a, lab.b]
            }
            ColorSpace::Cam02Ucs | ColorSpace::Cam02Lcd | ColorSpace::Cam02Scd => {
                let app = self.appearance(rgb)?;
                self.uniform_space().from_jmh([app.j, app.m, app.h])
            }
            ColorSpace::Ciecam02(subset) => subset.select(&self.appearance(rgb)?),
        };
        self.check_finite(coords, "forward", rgb)
    }

    /// Native coordinates to sRGB, without clamping.
    pub fn to_srgb(&self, coords: [f64; 3]) -> Result<[f64; 3]> {
        let [c0, c1, c2] = coords;
        let rgb = match self.space {
            ColorSpace::Srgb1 => coords,
            ColorSpace::Srgb100 => coords.map(|v| v / 100.0),
            ColorSpace::Srgb255 => coords.map(|v| v / 255.0),
            ColorSpace::LinearSrgb => encode(LinSrgb::new(c0, c1, c2)),
            ColorSpace::Xyz1 => xyz_to_srgb(Xyz::new(c0, c1, c2)),
            ColorSpace::Xyz100 => xyz_to_srgb(Xyz::new(c0 / 100.0, c1 / 100.0, c2 / 100.0)),
            ColorSpace::XyY1 => xyz_to_srgb(Xyz::from_color_unclamped(Yxy::<D65, f64>::new(
                c0, c1, c2,
            ))),
            ColorSpace::XyY100 => xyz_to_srgb(Xyz::from_color_unclamped(
                Yxy::<D65, f64>::new(c0, c1, c2 / 100.0),
            )),
            ColorSpace::CieLab => {
                xyz_to_srgb(Xyz::from_color_unclamped(Lab::<D65, f64>::new(c0, c1, c2)))
            }
            ColorSpace::CieLch => {
                xyz_to_srgb(Xyz::from_color_unclamped(Lch::<D65, f64>::new(c0, c1, c2)))
            }
            ColorSpace::Oklab => xyz_to_srgb(Xyz::from_color_unclamped(Oklab::new(c0, c1, c2))),
            ColorSpace::Cam02Ucs | ColorSpace::Cam02Lcd | ColorSpace::Cam02Scd => {
                let jmh = self.uniform_space().to_jmh(coords);
                let jmh_subset = Cam02Subset::new(LightnessAxis::J, ChromaAxis::M, HueAxis::Angle);
                self.cam_to_srgb(jmh_subset, jmh)?
            }
            ColorSpace::Ciecam02(subset) => self.cam_to_srgb(subset, coords)?,
        };
        self.check_finite(rgb, "inverse", coords)
    }

    fn model(&self) -> Result<&Ciecam02> {
        self.cam.as_ref().ok_or_else(|| {
            CmapError::ConversionFailure(format!("{} has no appearance model", self.space))
        })
    }

    fn appearance(&self, rgb: [f64; 3]) -> Result<Appearance> {
        let xyz100 = xyz_array(srgb_to_xyz(rgb)).map(|v| v * 100.0);
        Ok(self.model()?.from_xyz100(xyz100))
    }

    fn cam_to_srgb(&self, subset: Cam02Subset, coords: [f64; 3]) -> Result<[f64; 3]> {
        let [x, y, z] = self.model()?.to_xyz100(subset, coords);
        Ok(xyz_to_srgb(Xyz::new(x / 100.0, y / 100.0, z / 100.0)))
    }

    fn uniform_space(&self) -> UniformSpace {
        match self.space {
            ColorSpace::Cam02Lcd => UniformSpace::LCD,
            ColorSpace::Cam02Scd => UniformSpace::SCD,
            _ => UniformSpace::UCS,
        }
    }

    fn check_finite(&self, out: [f64; 3], direction: &str, input: [f64; 3]) -> Result<[f64; 3]> {
        if out.iter().all(|v| v.is_finite()) {
            Ok(out)
        } else {
            Err(CmapError::ConversionFailure(format!(
                "{} {} transform produced {:?} from {:?}",
                self.space, direction, out, input
            )))
        }
    }
}

fn linearize(rgb: [f64; 3]) -> LinSrgb<f64> {
    Srgb::new(rgb[0], rgb[1], rgb[2]).into_linear()
}

fn encode(lin: LinSrgb<f64>) -> [f64; 3] {
    let srgb = Srgb::<f64>::from_linear(lin);
    [srgb.red, srgb.green, srgb.blue]
}

fn srgb_to_xyz(rgb: [f64; 3]) -> Xyz<D65, f64> {
    Xyz::from_color_unclamped(linearize(rgb))
}

fn xyz_to_srgb(xyz: Xyz<D65, f64>) -> [f64; 3] {
    encode(LinSrgb::from_color_unclamped(xyz))
}

/// Black has no chromaticity of its own; it takes the white point's so that
/// gradients out of black stay neutral.
fn xyy_from_xyz(xyz: Xyz<D65, f64>) -> Yxy<D65, f64> {
    if xyz.x + xyz.y + xyz.z > 0.0 {
        return Yxy::from_color_unclamped(xyz);
    }
    let [wx, wy, wz] = D65_XYZ100;
    let sum = wx + wy + wz;
    Yxy::new(wx / sum, wy / sum, xyz.y)
}

fn xyz_array(xyz: Xyz<D65, f64>) -> [f64; 3] {
    [xyz.x, xyz.y, xyz.z]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hex(s: &str) -> Color {
        Color::from_hex(s).unwrap()
    }

    #[test]
    fn test_parse_names() {
        for space in ColorSpace::all() {
            assert_eq!(space.name().parse::<ColorSpace>().unwrap(), space);
        }
        assert_eq!("CAM02-UCS".parse::<ColorSpace>().unwrap(), ColorSpace::Cam02Ucs);
        assert_eq!(
            "sRGB1-linear".parse::<ColorSpace>().unwrap(),
            ColorSpace::LinearSrgb
        );
        assert!(matches!(
            "JMH".parse::<ColorSpace>().unwrap(),
            ColorSpace::Ciecam02(_)
        ));
    }

    #[test]
    fn test_unknown_names() {
        for name in ["NOT_A_SPACE", "cielab", "", "sRGB", "JChh"] {
            match name.parse::<ColorSpace>() {
                Err(CmapError::UnknownColorspace(n)) => assert_eq!(n, name),
                other => panic!("expected UnknownColorspace for {:?}, got {:?}", name, other),
            }
        }
    }

    #[test]
    fn test_default_preview_names() {
        let names: Vec<String> = DEFAULT_PREVIEW_SPACES.iter().map(|s| s.name()).collect();
        assert_eq!(
            names,
            [
                "CAM02-UCS",
                "sRGB1",
                "CIELab",
                "sRGB1-linear",
                "xyY1",
                "JCh",
                "JMH",
                "QCH",
                "Qsh",
                "CIELCh"
            ]
        );
    }

    #[test]
    fn test_all_is_unique() {
        let all = ColorSpace::all();
        assert_eq!(all.len(), 26);
        let mut names: Vec<String> = all.iter().map(|s| s.name()).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), 26);
    }

    #[test]
    fn test_round_trip_all_spaces() {
        let colors = ["#000000", "#ffffff", "#ff0000", "#00ff00", "#0000ff", "#440154", "#fde725"];
        for space in ColorSpace::all() {
            let conv = space.converter();
            for c in colors {
                let color = hex(c);
                let coords = conv.from_srgb(color).unwrap();
                let back = conv.to_srgb(coords).unwrap();
                for (a, b) in back.iter().zip(color.to_array()) {
                    assert!((a - b).abs() < 1e-5, "{} {}: {:?}", space, c, back);
                }
            }
        }
    }

    #[test]
    fn test_known_coordinates() {
        let white = hex("#ffffff");
        let lab = ColorSpace::CieLab.from_srgb(white).unwrap();
        assert!((lab[0] - 100.0).abs() < 1e-5);
        assert!(lab[1].abs() < 1e-3 && lab[2].abs() < 1e-3);

        let lin = ColorSpace::LinearSrgb.from_srgb(hex("#808080")).unwrap();
        assert!((lin[0] - 0.2158605).abs() < 1e-6);

        let srgb255 = ColorSpace::Srgb255.from_srgb(hex("#80ff00")).unwrap();
        for (a, b) in srgb255.iter().zip([128.0, 255.0, 0.0]) {
            assert!((a - b).abs() < 1e-9);
        }

        let xyz = ColorSpace::Xyz100.from_srgb(white).unwrap();
        assert!((xyz[1] - 100.0).abs() < 1e-6);

        let ucs = ColorSpace::Cam02Ucs.from_srgb(white).unwrap();
        assert!((ucs[0] - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_black_xyy_is_neutral() {
        let black = ColorSpace::XyY1.from_srgb(hex("#000000")).unwrap();
        let white = ColorSpace::XyY1.from_srgb(hex("#ffffff")).unwrap();
        assert!((black[0] - white[0]).abs() < 1e-4, "{:?} vs {:?}", black, white);
        assert!((black[1] - white[1]).abs() < 1e-4, "{:?} vs {:?}", black, white);
        assert_eq!(black[2], 0.0);

        let back = ColorSpace::XyY1.to_srgb(black).unwrap();
        assert!(back.iter().all(|v| v.abs() < 1e-9), "{:?}", back);

        // Black to red must not pass through blue on the way
        let conv = ColorSpace::XyY1.converter();
        let red = conv.from_srgb(hex("#ff0000")).unwrap();
        let quarter = [0, 1, 2].map(|i| black[i] + (red[i] - black[i]) * 0.25);
        let rgb = conv.to_srgb(quarter).unwrap();
        assert!(rgb[2] <= rgb[0], "{:?}", rgb);
    }

    #[test]
    fn test_lch_hue_positive() {
        // Blue sits around 306 degrees in CIELCh
        let lch = ColorSpace::CieLch.from_srgb(hex("#0000ff")).unwrap();
        assert!((0.0..360.0).contains(&lch[2]));
        assert!((lch[2] - 306.3).abs() < 1.0, "h = {}", lch[2]);
    }

    #[test]
    fn test_non_finite_is_conversion_failure() {
        let err = ColorSpace::CieLab.to_srgb([f64::NAN, 0.0, 0.0]).unwrap_err();
        assert!(matches!(err, CmapError::ConversionFailure(_)));
    }

    #[test]
    fn test_serde_as_name() {
        let json = serde_json::to_string(&ColorSpace::Cam02Ucs).unwrap();
        assert_eq!(json, "\"CAM02-UCS\"");
        let back: ColorSpace = serde_json::from_str("\"Qsh\"").unwrap();
        assert_eq!(back.name(), "Qsh");
        assert!(serde_json::from_str::<ColorSpace>("\"bogus\"").is_err());
    }
}
