// Canonical transform state shared by the gesture engine and the rendered output.
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct TransformState {
    /// Translation in CSS pixels, applied before rotation and scale.
    pub trans_xy: [f64; 2],
    pub scale: f64,
    /// Rotation in degrees.
    pub rotate: f64,
}

impl Default for TransformState {
    fn default() -> Self {
        Self {
            trans_xy: [0.0, 0.0],
            scale: 1.0,
            rotate: 0.0,
        }
    }
}

impl TransformState {
    /// Composed CSS transform string. The translate -> rotate -> scale order
    /// is load-bearing: the anchored-zoom offset math assumes it, and
    /// reordering changes the visual result.
    pub fn css_transform(&self) -> String {
        format!(
            "translateX({}px) translateY({}px) rotate({}deg) scale({})",
            self.trans_xy[0], self.trans_xy[1], self.rotate, self.scale
        )
    }
}
