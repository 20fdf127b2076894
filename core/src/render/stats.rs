//! Per-run rendering statistics.
//!
//! Every primitive submitted to the pipeline ends up either drawn or
//! discarded at exactly one stage, and every rasterized fragment is either
//! written or occluded. The counters below record where things went, so
//! that a frame drawing less than expected can be diagnosed from its log.

use core::fmt::{self, Display, Formatter};
use core::time::Duration;
#[cfg(feature = "std")]
use std::time::Instant;

/// Statistics of one [`Engine::run`][crate::scene::Engine::run].
#[derive(Clone, Debug, Default)]
pub struct Stats {
    /// Wall-clock time of the run. Always zero without the `std` feature.
    pub time: Duration,
    /// Number of scene commands executed.
    pub cmds: usize,
    pub prims: Prims,
    pub frags: Frags,

    #[cfg(feature = "std")]
    start: Option<Instant>,
}

/// What happened to the lines and polygons submitted for drawing.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Prims {
    pub submitted: usize,
    /// Polygons with fewer than three vertices.
    pub degenerate: usize,
    /// Primitives with a vertex nearer than the near plane or farther
    /// than the far plane.
    pub out_of_depth: usize,
    /// Polygons facing away from the camera.
    pub culled: usize,
    /// Primitives passed on to the rasterizer.
    pub drawn: usize,
}

/// What happened to the fragments produced by the rasterizer.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct Frags {
    pub rasterized: usize,
    /// Written or blended into the surface.
    pub written: usize,
    /// Rejected by the depth test.
    pub occluded: usize,
}

impl Stats {
    /// Returns zeroed stats.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns zeroed stats with a running timer; see [`finish`].
    ///
    /// [`finish`]: Self::finish
    pub fn start() -> Self {
        Self {
            #[cfg(feature = "std")]
            start: Some(Instant::now()),
            ..Self::default()
        }
    }

    /// Stops the timer, if running, and stores the elapsed time.
    pub fn finish(&mut self) {
        #[cfg(feature = "std")]
        if let Some(st) = self.start.take() {
            self.time = st.elapsed();
        }
    }
}

impl Prims {
    /// Returns the number of primitives discarded before rasterization.
    pub fn discarded(&self) -> usize {
        self.degenerate + self.out_of_depth + self.culled
    }
}

impl Display for Stats {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self { time, cmds, prims, frags, .. } = self;
        writeln!(f, "{} commands in {time:.1?}", Count(*cmds))?;
        writeln!(f, "prims: {prims}")?;
        write!(f, "frags: {frags}")
    }
}

impl Display for Prims {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} submitted, {} drawn, {} culled, {} out of depth, \
             {} degenerate",
            Count(self.submitted),
            Count(self.drawn),
            Count(self.culled),
            Count(self.out_of_depth),
            Count(self.degenerate),
        )
    }
}

impl Display for Frags {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} rasterized, {} written, {} occluded",
            Count(self.rasterized),
            Count(self.written),
            Count(self.occluded),
        )
    }
}

/// A count abbreviated with a metric suffix.
struct Count(usize);

impl Display for Count {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let n = self.0;
        if n < 1_000 {
            write!(f, "{n}")
        } else if n < 1_000_000 {
            write!(f, "{:.1}k", n as f32 / 1e3)
        } else {
            write!(f, "{:.1}M", n as f32 / 1e6)
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;

    use super::*;

    #[test]
    fn counts_are_abbreviated() {
        assert_eq!(format!("{}", Count(0)), "0");
        assert_eq!(format!("{}", Count(999)), "999");
        assert_eq!(format!("{}", Count(12_345)), "12.3k");
        assert_eq!(format!("{}", Count(2_500_000)), "2.5M");
    }

    #[test]
    fn discarded_sums_the_reject_stages() {
        let p = Prims {
            submitted: 10,
            degenerate: 1,
            out_of_depth: 2,
            culled: 3,
            drawn: 4,
        };
        assert_eq!(p.discarded(), 6);
        assert_eq!(p.discarded() + p.drawn, p.submitted);
    }

    #[test]
    fn stats_display() {
        let stats = Stats {
            time: Duration::from_millis(4321),
            cmds: 1234,
            prims: Prims {
                submitted: 40,
                degenerate: 1,
                out_of_depth: 2,
                culled: 17,
                drawn: 20,
            },
            frags: Frags {
                rasterized: 12_345,
                written: 9_000,
                occluded: 3_345,
            },
            ..Stats::new()
        };
        assert_eq!(
            format!("{stats}"),
            "1.2k commands in 4.3s\n\
             prims: 40 submitted, 20 drawn, 17 culled, 2 out of depth, \
             1 degenerate\n\
             frags: 12.3k rasterized, 9.0k written, 3.3k occluded"
        );
    }

    #[test]
    fn finish_is_idempotent() {
        let mut stats = Stats::start();
        stats.finish();
        let t = stats.time;
        stats.finish();
        assert_eq!(stats.time, t);
    }
}
