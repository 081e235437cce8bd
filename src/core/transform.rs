use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::error::{ChartError, ChartResult};

/// Current zoom/pan transform applied on top of the base scales.
///
/// `k_y` tracks `k` when vertical zoom is enabled and stays at `1.0`
/// otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    pub k: f64,
    pub x: f64,
    pub y: f64,
    pub k_y: f64,
}

impl Transform {
    pub const IDENTITY: Self = Self {
        k: 1.0,
        x: 0.0,
        y: 0.0,
        k_y: 1.0,
    };

    #[must_use]
    pub fn apply_x(self, pixel: f64) -> f64 {
        self.k * pixel + self.x
    }

    #[must_use]
    pub fn invert_x(self, pixel: f64) -> f64 {
        (pixel - self.x) / self.k
    }

    #[must_use]
    pub fn apply_y(self, pixel: f64) -> f64 {
        self.k_y * pixel + self.y
    }

    #[must_use]
    pub fn invert_y(self, pixel: f64) -> f64 {
        (pixel - self.y) / self.k_y
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Allowed scale-factor bounds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomExtent {
    pub min: f64,
    pub max: f64,
}

impl Default for ZoomExtent {
    fn default() -> Self {
        Self { min: 0.5, max: 5.0 }
    }
}

impl ZoomExtent {
    pub fn new(min: f64, max: f64) -> ChartResult<Self> {
        Self { min, max }.validate()
    }

    pub fn validate(self) -> ChartResult<Self> {
        if !self.min.is_finite() || !self.max.is_finite() || self.min <= 0.0 {
            return Err(ChartError::InvalidData(
                "zoom extent bounds must be finite and > 0".to_owned(),
            ));
        }
        if self.min > self.max {
            return Err(ChartError::InvalidData(
                "zoom extent min must be <= max".to_owned(),
            ));
        }
        Ok(self)
    }

    #[must_use]
    pub fn clamp(self, k: f64) -> f64 {
        k.clamp(self.min, self.max)
    }
}

/// Zoom gesture: multiplicative scale change about a focal pixel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZoomEvent {
    pub delta_scale: f64,
    pub focal_x: f64,
    pub focal_y: f64,
}

impl ZoomEvent {
    #[must_use]
    pub fn new(delta_scale: f64, focal_x: f64, focal_y: f64) -> Self {
        Self {
            delta_scale,
            focal_x,
            focal_y,
        }
    }
}

/// Sole owner of the live [`Transform`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformState {
    transform: Transform,
    extent: ZoomExtent,
    vertical: bool,
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new(ZoomExtent::default(), true)
    }
}

impl TransformState {
    /// Starts at identity; `k = 1` is clamped into the extent if needed.
    #[must_use]
    pub fn new(extent: ZoomExtent, vertical: bool) -> Self {
        let mut state = Self {
            transform: Transform::IDENTITY,
            extent,
            vertical,
        };
        state.reset();
        state
    }

    #[must_use]
    pub fn transform(&self) -> Transform {
        self.transform
    }

    #[must_use]
    pub fn extent(&self) -> ZoomExtent {
        self.extent
    }

    #[must_use]
    pub fn vertical(&self) -> bool {
        self.vertical
    }

    pub fn set_extent(&mut self, extent: ZoomExtent) -> ChartResult<()> {
        self.extent = extent.validate()?;
        self.transform.k = self.extent.clamp(self.transform.k);
        self.sync_vertical_factor();
        Ok(())
    }

    pub fn set_vertical(&mut self, vertical: bool) {
        self.vertical = vertical;
        if !vertical {
            self.transform.y = 0.0;
        }
        self.sync_vertical_factor();
    }

    pub fn reset(&mut self) {
        self.transform = Transform {
            k: self.extent.clamp(1.0),
            ..Transform::IDENTITY
        };
        self.sync_vertical_factor();
    }

    /// Zooms about the focal pixel so the point under it stays fixed.
    ///
    /// Out-of-range scale factors are pinned to the extent bounds; malformed
    /// events leave the transform untouched.
    pub fn apply_zoom(&mut self, event: ZoomEvent) -> Transform {
        if !event.delta_scale.is_finite()
            || event.delta_scale <= 0.0
            || !event.focal_x.is_finite()
            || !event.focal_y.is_finite()
        {
            warn!(?event, "ignoring malformed zoom event");
            return self.transform;
        }
        self.step(event.delta_scale, (event.focal_x, event.focal_y), (0.0, 0.0))
    }

    /// Pan is the `delta_scale = 1` case of the same update plus a shift.
    ///
    /// A pan that would push the translation past `f64` range is dropped.
    pub fn apply_pan(&mut self, dx: f64, dy: f64) -> Transform {
        if !dx.is_finite() || !dy.is_finite() {
            warn!(dx, dy, "ignoring malformed pan event");
            return self.transform;
        }
        self.step(1.0, (0.0, 0.0), (dx, dy))
    }

    fn step(&mut self, delta_scale: f64, focal: (f64, f64), shift: (f64, f64)) -> Transform {
        let current = self.transform;
        let k = self.extent.clamp(current.k * delta_scale);
        let ratio = k / current.k;

        let x = focal.0 - ratio * (focal.0 - current.x) + shift.0;
        let y = if self.vertical {
            focal.1 - ratio * (focal.1 - current.y) + shift.1
        } else {
            current.y
        };
        if !x.is_finite() || !y.is_finite() {
            warn!(x, y, "transform update overflows, keeping previous transform");
            return current;
        }

        self.transform = Transform {
            k,
            x,
            y,
            k_y: current.k_y,
        };
        self.sync_vertical_factor();
        trace!(k, x, y, "transform updated");
        self.transform
    }

    fn sync_vertical_factor(&mut self) {
        self.transform.k_y = if self.vertical { self.transform.k } else { 1.0 };
    }
}
