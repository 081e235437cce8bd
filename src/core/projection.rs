use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::core::scale::ticks_between;
use crate::core::{BaseScales, LinearScale, OhlcRecord, Transform, XDomainMode};

/// Base scale composed with one axis of the transform: `k * base(v) + t`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveScale {
    base: LinearScale,
    k: f64,
    translate: f64,
}

impl EffectiveScale {
    #[must_use]
    pub fn new(base: LinearScale, k: f64, translate: f64) -> Self {
        Self { base, k, translate }
    }

    #[must_use]
    pub fn base(self) -> LinearScale {
        self.base
    }

    #[must_use]
    pub fn k(self) -> f64 {
        self.k
    }

    #[must_use]
    pub fn translate(self) -> f64 {
        self.translate
    }

    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        self.k * self.base.apply(value) + self.translate
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        self.base.invert((pixel - self.translate) / self.k)
    }

    /// Data-space interval currently shown between two pixel edges, ascending.
    #[must_use]
    pub fn visible_domain(self, pixel_start: f64, pixel_end: f64) -> (f64, f64) {
        let a = self.invert(pixel_start);
        let b = self.invert(pixel_end);
        if a <= b { (a, b) } else { (b, a) }
    }

    /// Round ticks over the data interval visible between two pixel edges.
    #[must_use]
    pub fn ticks(self, pixel_start: f64, pixel_end: f64, count: usize) -> Vec<f64> {
        let (start, end) = self.visible_domain(pixel_start, pixel_end);
        ticks_between(start, end, count)
    }
}

/// Per-frame scales: the only path from data space to pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffectiveScales {
    pub x: EffectiveScale,
    pub y: EffectiveScale,
    pub x_domain_mode: XDomainMode,
    pub unit_step: f64,
}

impl EffectiveScales {
    #[must_use]
    pub fn x_value(&self, record: &OhlcRecord) -> f64 {
        match self.x_domain_mode {
            XDomainMode::Index => record.index as f64,
            XDomainMode::Date => record.date,
        }
    }

    /// Pixel x of a record's centre line.
    #[must_use]
    pub fn record_x(&self, record: &OhlcRecord) -> f64 {
        self.x.apply(self.x_value(record))
    }

    /// Pixel distance between neighbouring records.
    #[must_use]
    pub fn pitch_px(&self) -> f64 {
        let (origin, _) = self.x.base().domain();
        (self.x.apply(origin + self.unit_step) - self.x.apply(origin)).abs()
    }

    /// Resolves a pointer x to the record whose centre is closest.
    #[must_use]
    pub fn nearest_record(&self, records: &[OhlcRecord], pixel_x: f64) -> Option<usize> {
        if records.is_empty() || !pixel_x.is_finite() {
            return None;
        }
        let value = self.x.invert(pixel_x);
        match self.x_domain_mode {
            XDomainMode::Index => {
                let last = (records.len() - 1) as f64;
                let mut candidates: SmallVec<[usize; 2]> = SmallVec::new();
                candidates.push(value.floor().clamp(0.0, last) as usize);
                candidates.push(value.ceil().clamp(0.0, last) as usize);
                candidates
                    .into_iter()
                    .min_by_key(|&idx| OrderedFloat((idx as f64 - value).abs()))
            }
            XDomainMode::Date => records
                .iter()
                .min_by_key(|record| OrderedFloat((record.date - value).abs()))
                .map(|record| record.index),
        }
    }
}

/// Composes base scales with the current transform.
///
/// Pure; callers invoke it fresh for each frame so displayed geometry can
/// never lag behind the stored transform.
#[must_use]
pub fn project(base: &BaseScales, transform: Transform) -> EffectiveScales {
    EffectiveScales {
        x: EffectiveScale::new(base.x, transform.k, transform.x),
        y: EffectiveScale::new(base.y, transform.k_y, transform.y),
        x_domain_mode: base.x_domain_mode,
        unit_step: base.unit_step,
    }
}
