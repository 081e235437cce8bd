use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Pixel margins between the frame edge and the drawable plot area.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Margins {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Margins {
    #[must_use]
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        [self.top, self.right, self.bottom, self.left]
            .into_iter()
            .all(|value| value.is_finite() && value >= 0.0)
    }
}

impl Default for Margins {
    fn default() -> Self {
        Self::new(20.0, 20.0, 30.0, 40.0)
    }
}

/// Frame size plus margins.
///
/// Passed explicitly to the engine on every resize; the engine never reads
/// host window dimensions on its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    #[serde(default)]
    pub margins: Margins,
}

impl Viewport {
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            margins: Margins::default(),
        }
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Margins) -> Self {
        self.margins = margins;
        self
    }

    #[must_use]
    pub fn is_valid(self) -> bool {
        if self.width == 0 || self.height == 0 || !self.margins.is_valid() {
            return false;
        }
        let plot = self.plot_rect();
        plot.width() > 0.0 && plot.height() > 0.0
    }

    pub fn validate(self) -> ChartResult<Self> {
        if self.is_valid() {
            Ok(self)
        } else {
            Err(ChartError::InvalidViewport {
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Drawable rectangle `[left, width - right] x [top, height - bottom]`.
    #[must_use]
    pub fn plot_rect(self) -> PlotRect {
        PlotRect {
            left: self.margins.left,
            top: self.margins.top,
            right: f64::from(self.width) - self.margins.right,
            bottom: f64::from(self.height) - self.margins.bottom,
        }
    }
}

/// Drawable plot rectangle in absolute frame pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlotRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotRect {
    #[must_use]
    pub fn width(self) -> f64 {
        self.right - self.left
    }

    #[must_use]
    pub fn height(self) -> f64 {
        self.bottom - self.top
    }

    #[must_use]
    pub fn center(self) -> (f64, f64) {
        (
            self.left + self.width() / 2.0,
            self.top + self.height() / 2.0,
        )
    }

    #[must_use]
    pub fn contains(self, x: f64, y: f64) -> bool {
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }

    /// Horizontal overlap test used to cull geometry outside the clip area.
    #[must_use]
    pub fn overlaps_x(self, left: f64, right: f64) -> bool {
        right >= self.left && left <= self.right
    }
}
