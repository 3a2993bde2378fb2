//! Piecewise-linear keyframe curve.
//!
//! Stands in for the original tooling's authored animation curves (drag
//! response, magnet falloff). Evaluation clamps outside the key range.

use serde::{Deserialize, Serialize};

/// A single curve keyframe.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveKey {
    pub t: f32,
    pub value: f32,
}

/// Piecewise-linear curve over sorted keyframes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Curve {
    keys: Vec<CurveKey>,
}

impl Curve {
    pub fn new(keys: Vec<CurveKey>) -> Self {
        Self { keys }
    }

    /// Straight line from `(t0, v0)` to `(t1, v1)`.
    pub fn linear(t0: f32, v0: f32, t1: f32, v1: f32) -> Self {
        Self {
            keys: vec![CurveKey { t: t0, value: v0 }, CurveKey { t: t1, value: v1 }],
        }
    }

    /// Quadratic ease-out from 1 at t=0 to 0 at t=1, sampled into
    /// linear segments. The default magnet strength falloff.
    pub fn falloff() -> Self {
        Self {
            keys: vec![
                CurveKey { t: 0.0, value: 1.0 },
                CurveKey { t: 0.25, value: 0.5625 },
                CurveKey { t: 0.5, value: 0.25 },
                CurveKey { t: 0.75, value: 0.0625 },
                CurveKey { t: 1.0, value: 0.0 },
            ],
        }
    }

    pub fn keys(&self) -> &[CurveKey] {
        &self.keys
    }

    /// True when the curve has at least one key and key times never
    /// decrease. Checked once at startup by config validation.
    pub fn is_well_formed(&self) -> bool {
        !self.keys.is_empty() && self.keys.windows(2).all(|w| w[0].t <= w[1].t)
    }

    /// Sample the curve at `t`, clamping outside the key range.
    pub fn evaluate(&self, t: f32) -> f32 {
        let Some(first) = self.keys.first() else {
            return 0.0;
        };
        if t <= first.t {
            return first.value;
        }
        for w in self.keys.windows(2) {
            let (a, b) = (w[0], w[1]);
            if t <= b.t {
                let span = b.t - a.t;
                if span <= f32::EPSILON {
                    return b.value;
                }
                let s = (t - a.t) / span;
                return a.value + (b.value - a.value) * s;
            }
        }
        // Past the last key.
        self.keys[self.keys.len() - 1].value
    }
}
