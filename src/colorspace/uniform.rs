//! CAM02-based uniform colour spaces (Luo, Cui & Li, 2006)
//!
//! Maps CIECAM02 `JMh` to rectangular `J'a'b'` coordinates in which Euclidean
//! distance approximates perceived color difference.

/// Parameters of a CAM02 uniform space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UniformSpace {
    pub k_l: f64,
    pub c1: f64,
    pub c2: f64,
}

impl UniformSpace {
    /// General-purpose uniform space.
    pub const UCS: UniformSpace = UniformSpace {
        k_l: 1.0,
        c1: 0.007,
        c2: 0.0228,
    };
    /// Tuned for large color differences.
    pub const LCD: UniformSpace = UniformSpace {
        k_l: 0.77,
        c1: 0.007,
        c2: 0.0053,
    };
    /// Tuned for small color differences.
    pub const SCD: UniformSpace = UniformSpace {
        k_l: 1.24,
        c1: 0.007,
        c2: 0.0363,
    };

    pub fn from_jmh(&self, jmh: [f64; 3]) -> [f64; 3] {
        let [j, m, h] = jmh;
        let j_prime = (1.0 + 100.0 * self.c1) * j / (1.0 + self.c1 * j) / self.k_l;
        let m_prime = (1.0 / self.c2) * (self.c2 * m).ln_1p();
        let (sin_h, cos_h) = h.to_radians().sin_cos();
        [j_prime, m_prime * cos_h, m_prime * sin_h]
    }

    pub fn to_jmh(&self, jab: [f64; 3]) -> [f64; 3] {
        let [j_prime, a, b] = jab;
        let j_prime = j_prime * self.k_l;
        let j = -j_prime / (self.c1 * j_prime - 1.0 - 100.0 * self.c1);
        let m_prime = a.hypot(b);
        let m = (self.c2 * m_prime).exp_m1() / self.c2;
        let h = b.atan2(a).to_degrees().rem_euclid(360.0);
        [j, m, h]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        for space in [UniformSpace::UCS, UniformSpace::LCD, UniformSpace::SCD] {
            for jmh in [[50.0, 20.0, 30.0], [0.0, 0.0, 0.0], [100.0, 2.3, 210.7], [21.0, 65.4, 257.9]] {
                let back = space.to_jmh(space.from_jmh(jmh));
                assert!((back[0] - jmh[0]).abs() < 1e-9);
                assert!((back[1] - jmh[1]).abs() < 1e-9);
                if jmh[1] > 0.0 {
                    assert!((back[2] - jmh[2]).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn test_lightness_endpoints() {
        // J = 100 maps to J' = 100 in UCS
        let jab = UniformSpace::UCS.from_jmh([100.0, 0.0, 0.0]);
        assert!((jab[0] - 100.0).abs() < 1e-9);
        assert_eq!(UniformSpace::UCS.from_jmh([0.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
    }
}
