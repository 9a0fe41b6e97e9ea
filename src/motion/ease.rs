#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Ease {
    Linear,
    QuadOut,
    CubicOut,
    QuartOut,
    ExpoOut,
    CubicInOut,
    QuartInOut,
}

impl Ease {
    /// Maps linear progress in [0, 1] onto the curve. Input is clamped.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Ease::Linear => t,
            Ease::QuadOut => 1.0 - (1.0 - t).powi(2),
            Ease::CubicOut => 1.0 - (1.0 - t).powi(3),
            Ease::QuartOut => 1.0 - (1.0 - t).powi(4),
            Ease::ExpoOut => {
                if t >= 1.0 {
                    1.0
                } else {
                    1.0 - 2f64.powf(-10.0 * t)
                }
            }
            Ease::CubicInOut => {
                if t < 0.5 {
                    4.0 * t * t * t
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(3) / 2.0
                }
            }
            Ease::QuartInOut => {
                if t < 0.5 {
                    8.0 * t.powi(4)
                } else {
                    1.0 - (-2.0 * t + 2.0).powi(4) / 2.0
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Ease; 7] = [
        Ease::Linear,
        Ease::QuadOut,
        Ease::CubicOut,
        Ease::QuartOut,
        Ease::ExpoOut,
        Ease::CubicInOut,
        Ease::QuartInOut,
    ];

    #[test]
    fn endpoints_are_fixed() {
        for ease in ALL {
            assert!(ease.apply(0.0).abs() < 1e-9, "{:?} at 0", ease);
            assert!((ease.apply(1.0) - 1.0).abs() < 1e-9, "{:?} at 1", ease);
        }
    }

    #[test]
    fn curves_are_monotonic() {
        for ease in ALL {
            let mut last = 0.0;
            for i in 1..=100 {
                let v = ease.apply(i as f64 / 100.0);
                assert!(v >= last, "{:?} dipped at step {}", ease, i);
                last = v;
            }
        }
    }

    #[test]
    fn input_is_clamped() {
        assert_eq!(Ease::CubicOut.apply(-3.0), 0.0);
        assert_eq!(Ease::CubicOut.apply(7.0), 1.0);
    }
}
