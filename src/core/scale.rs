use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

const E10: f64 = 7.071_067_811_865_476; // sqrt(50)
const E5: f64 = 3.162_277_660_168_379_5; // sqrt(10)
const E2: f64 = std::f64::consts::SQRT_2;

/// Affine mapping from a data domain onto a pixel range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LinearScale {
    domain_start: f64,
    domain_end: f64,
    range_start: f64,
    range_end: f64,
}

impl LinearScale {
    pub fn new(domain: (f64, f64), range: (f64, f64)) -> ChartResult<Self> {
        let (domain_start, domain_end) = domain;
        let (range_start, range_end) = range;
        if !domain_start.is_finite() || !domain_end.is_finite() || domain_start == domain_end {
            return Err(ChartError::InvalidData(
                "scale domain must be finite and non-zero".to_owned(),
            ));
        }
        if !range_start.is_finite() || !range_end.is_finite() || range_start == range_end {
            return Err(ChartError::InvalidData(
                "scale range must be finite and non-zero".to_owned(),
            ));
        }

        Ok(Self {
            domain_start,
            domain_end,
            range_start,
            range_end,
        })
    }

    #[must_use]
    pub fn domain(self) -> (f64, f64) {
        (self.domain_start, self.domain_end)
    }

    #[must_use]
    pub fn range(self) -> (f64, f64) {
        (self.range_start, self.range_end)
    }

    #[must_use]
    pub fn apply(self, value: f64) -> f64 {
        let normalized = (value - self.domain_start) / (self.domain_end - self.domain_start);
        self.range_start + normalized * (self.range_end - self.range_start)
    }

    #[must_use]
    pub fn invert(self, pixel: f64) -> f64 {
        let normalized = (pixel - self.range_start) / (self.range_end - self.range_start);
        self.domain_start + normalized * (self.domain_end - self.domain_start)
    }

    /// Extends the domain outward to round tick boundaries.
    ///
    /// Iterates until the tick step is stable (at most ten passes), so the
    /// resulting bounds are multiples of the final step.
    #[must_use]
    pub fn nice(self, count: usize) -> Self {
        let reversed = self.domain_end < self.domain_start;
        let (mut start, mut stop) = if reversed {
            (self.domain_end, self.domain_start)
        } else {
            (self.domain_start, self.domain_end)
        };

        let mut previous: Option<f64> = None;
        for _ in 0..10 {
            let Some(step) = tick_increment(start, stop, count) else {
                break;
            };
            if previous == Some(step) {
                break;
            }
            if step > 0.0 {
                start = (start / step).floor() * step;
                stop = (stop / step).ceil() * step;
            } else {
                let inc = -step;
                start = (start * inc).floor() / inc;
                stop = (stop * inc).ceil() / inc;
            }
            previous = Some(step);
        }

        let (domain_start, domain_end) = if reversed {
            (stop, start)
        } else {
            (start, stop)
        };
        Self {
            domain_start,
            domain_end,
            ..self
        }
    }

    /// Round tick values covering the scale's domain.
    #[must_use]
    pub fn ticks(self, count: usize) -> Vec<f64> {
        ticks_between(self.domain_start, self.domain_end, count)
    }
}

/// Round tick values inside `[start, stop]` (either order), ascending.
#[must_use]
pub fn ticks_between(start: f64, stop: f64, count: usize) -> Vec<f64> {
    if !start.is_finite() || !stop.is_finite() || count == 0 {
        return Vec::new();
    }
    let (low, high) = if start <= stop {
        (start, stop)
    } else {
        (stop, start)
    };
    if low == high {
        return vec![low];
    }

    let Some(spec) = tick_spec(low, high, count as f64) else {
        return Vec::new();
    };
    if spec.last < spec.first {
        return Vec::new();
    }
    (spec.first..=spec.last)
        .map(|i| {
            if spec.inverted {
                i as f64 / spec.inc
            } else {
                i as f64 * spec.inc
            }
        })
        .collect()
}

/// Distance between adjacent round ticks for `count` ticks over the domain.
#[must_use]
pub fn tick_step(start: f64, stop: f64, count: usize) -> Option<f64> {
    let (low, high) = if start <= stop {
        (start, stop)
    } else {
        (stop, start)
    };
    tick_spec(low, high, count as f64).map(|spec| {
        if spec.inverted {
            1.0 / spec.inc
        } else {
            spec.inc
        }
    })
}

/// Signed increment: positive is the step itself, negative is `-1/step`
/// (kept inverted so sub-unit steps stay exact).
fn tick_increment(start: f64, stop: f64, count: usize) -> Option<f64> {
    tick_spec(start, stop, count as f64).map(|spec| if spec.inverted { -spec.inc } else { spec.inc })
}

#[derive(Debug, Clone, Copy)]
struct TickSpec {
    first: i64,
    last: i64,
    inc: f64,
    inverted: bool,
}

fn tick_spec(start: f64, stop: f64, count: f64) -> Option<TickSpec> {
    if count <= 0.0 || stop <= start {
        return None;
    }
    let step = (stop - start) / count;
    let power = step.log10().floor();
    let error = step / 10f64.powf(power);
    let factor = if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    };

    let spec = if power < 0.0 {
        let inc = 10f64.powf(-power) / factor;
        let mut first = (start * inc).round();
        let mut last = (stop * inc).round();
        if first / inc < start {
            first += 1.0;
        }
        if last / inc > stop {
            last -= 1.0;
        }
        TickSpec {
            first: first as i64,
            last: last as i64,
            inc,
            inverted: true,
        }
    } else {
        let inc = 10f64.powf(power) * factor;
        let mut first = (start / inc).round();
        let mut last = (stop / inc).round();
        if first * inc < start {
            first += 1.0;
        }
        if last * inc > stop {
            last -= 1.0;
        }
        TickSpec {
            first: first as i64,
            last: last as i64,
            inc,
            inverted: false,
        }
    };

    if spec.last < spec.first && (0.5..2.0).contains(&count) {
        return tick_spec(start, stop, count * 2.0);
    }
    if !spec.inc.is_finite() || spec.inc <= 0.0 {
        return None;
    }
    Some(spec)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nice_extends_price_range_to_round_bounds() {
        let scale = LinearScale::new((85.0, 115.0), (370.0, 20.0))
            .expect("valid")
            .nice(10);
        assert_eq!(scale.domain(), (80.0, 120.0));
    }

    #[test]
    fn nice_keeps_fractional_domains_exact() {
        let scale = LinearScale::new((0.13, 0.97), (0.0, 100.0))
            .expect("valid")
            .nice(10);
        assert_eq!(scale.domain(), (0.1, 1.0));
    }

    #[test]
    fn ticks_cover_domain_with_round_values() {
        let ticks = ticks_between(80.0, 120.0, 10);
        assert_eq!(ticks.first().copied(), Some(80.0));
        assert_eq!(ticks.last().copied(), Some(120.0));
        assert_eq!(ticks.len(), 9);
    }

    #[test]
    fn tick_step_reports_positive_sub_unit_step() {
        let step = tick_step(0.0, 1.0, 10).expect("step");
        assert!((step - 0.1).abs() < 1e-12);
    }
}
