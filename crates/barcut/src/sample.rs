//! Synthetic systems for tests, benchmarks and demos.
//!
//! Model
//! - A system of random width and staff height, tilted by a small random
//!   angle, starting at `origin`.
//! - `n` bars: `n - 1` interior break points at sorted random positions along
//!   the top edge (kept clear of the far end), plus a final break point at
//!   the far edge so a replay through `Session` finishes the system.
//! - Break points sit at a random depth inside the staff, like real clicks.
//! - Determinism uses a replay token `(seed, index)` mixed into one RNG.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::barbox::{try_make_bar_boxes, BarBox, SystemFrame};
use crate::cutting::Event;
use crate::geom::{GeomError, Point2D};

/// Sampler configuration. Lengths in canvas pixels.
#[derive(Clone, Copy, Debug)]
pub struct SystemCfg {
    pub origin: Point2D,
    pub width: (f64, f64),
    pub staff_height: (f64, f64),
    /// Maximum absolute tilt of the top edge, in radians.
    pub max_tilt: f64,
    pub bars: (usize, usize),
}

impl Default for SystemCfg {
    fn default() -> Self {
        Self {
            origin: Vector2::new(60.0, 120.0),
            width: (600.0, 900.0),
            staff_height: (60.0, 140.0),
            max_tilt: 0.02,
            bars: (3, 8),
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Calibration and break points of one synthetic system.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SampledSystem {
    pub top_left: Point2D,
    pub top_right: Point2D,
    pub staff_height: Point2D,
    pub break_points: Vec<Point2D>,
}

impl SampledSystem {
    pub fn frame(&self) -> Result<SystemFrame, GeomError> {
        SystemFrame::from_calibration(self.top_left, self.top_right, self.staff_height)
    }

    pub fn bar_boxes(
        &self,
        first_bar_index_in_page: usize,
        first_bar_index_in_document: usize,
    ) -> Result<Vec<BarBox>, GeomError> {
        try_make_bar_boxes(
            Some(self.top_left),
            Some(self.top_right),
            Some(self.staff_height),
            &self.break_points,
            first_bar_index_in_page,
            first_bar_index_in_document,
        )
    }

    /// Clicks a user would make to cut this system, with a pointer move
    /// ahead of each click.
    pub fn events(&self) -> Vec<Event> {
        [self.top_left, self.top_right, self.staff_height]
            .iter()
            .chain(self.break_points.iter())
            .flat_map(|&p| [Event::PointerMove(p), Event::Click(p)])
            .collect()
    }
}

fn sample_range<R: Rng>(rng: &mut R, (lo, hi): (f64, f64)) -> f64 {
    if hi > lo {
        rng.gen_range(lo..hi)
    } else {
        lo
    }
}

/// Draw a random system.
pub fn draw_system(cfg: &SystemCfg, tok: ReplayToken) -> SampledSystem {
    let mut rng = tok.to_std_rng();
    let width = sample_range(&mut rng, cfg.width).max(1.0);
    let height = sample_range(&mut rng, cfg.staff_height).max(1.0);
    let tilt = sample_range(&mut rng, (-cfg.max_tilt.abs(), cfg.max_tilt.abs()));
    let n = {
        let lo = cfg.bars.0.max(1);
        let hi = cfg.bars.1.max(lo);
        rng.gen_range(lo..=hi)
    };

    let dir = Vector2::new(tilt.cos(), tilt.sin());
    let normal = Vector2::new(-dir.y, dir.x);
    let top_left = cfg.origin;
    let top_right = top_left + dir * width;
    let staff_height = top_left + dir * (width * rng.gen_range(0.2..0.8)) + normal * height;

    let mut ts: Vec<f64> = (1..n).map(|_| rng.gen_range(0.02..0.95)).collect();
    ts.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    ts.push(1.0);
    let break_points = ts
        .into_iter()
        .map(|t| top_left + dir * (width * t) + normal * (height * rng.gen_range(0.1..0.9)))
        .collect();

    SampledSystem {
        top_left,
        top_right,
        staff_height,
        break_points,
    }
}
