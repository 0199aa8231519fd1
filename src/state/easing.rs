//! Easing Functions - Shape interpolation speed over a step
//!
//! Every curve maps `[0, 1]` onto `[0, 1]`, is monotonic, and satisfies
//! `f(0) = 0` and `f(1) = 1`. Inputs outside the unit range are clamped.

/// Easing curve applied to the linear progress of an animation step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EasingFunction {
    /// Constant speed.
    #[default]
    Linear,
    /// Slow start, fast end: `t^2`.
    QuadraticIn,
    /// Fast start, slow end: `1 - (1 - t)^2`.
    QuadraticOut,
    /// Slow at both ends.
    QuadraticInOut,
    /// Sharper fast start: `1 - (1 - t)^3`.
    CubicOut,
}

impl EasingFunction {
    /// Apply the curve to a progress value.
    pub fn apply(self, t: f32) -> f32 {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::QuadraticIn => t * t,
            Self::QuadraticOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv
            }
            Self::QuadraticInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    let inv = -2.0 * t + 2.0;
                    1.0 - inv * inv / 2.0
                }
            }
            Self::CubicOut => {
                let inv = 1.0 - t;
                1.0 - inv * inv * inv
            }
        }
    }
}
