/// Call and pixel counters for the clip/raster hot paths.
/// Counting compiles away unless the `profiling` feature is enabled.
use std::sync::atomic::{AtomicU64, Ordering};

/// Thread-safe performance counters
pub struct FunctionCounters {
    // Geometry
    pub triangles_submitted: AtomicU64,
    pub triangles_clipped_away: AtomicU64,
    pub clip_fan_triangles: AtomicU64,

    // Rasterization
    pub triangles_culled: AtomicU64,
    pub triangles_rasterized: AtomicU64,
    pub bounds_clamped: AtomicU64,
    pub pixels_tested: AtomicU64,
    pub pixels_inside: AtomicU64,
    pub depth_passed: AtomicU64,
    pub depth_failed: AtomicU64,

    // Framebuffer
    pub framebuffer_clear_calls: AtomicU64,
}

impl FunctionCounters {
    pub const fn new() -> Self {
        Self {
            triangles_submitted: AtomicU64::new(0),
            triangles_clipped_away: AtomicU64::new(0),
            clip_fan_triangles: AtomicU64::new(0),
            triangles_culled: AtomicU64::new(0),
            triangles_rasterized: AtomicU64::new(0),
            bounds_clamped: AtomicU64::new(0),
            pixels_tested: AtomicU64::new(0),
            pixels_inside: AtomicU64::new(0),
            depth_passed: AtomicU64::new(0),
            depth_failed: AtomicU64::new(0),
            framebuffer_clear_calls: AtomicU64::new(0),
        }
    }

    /// Reset all counters to zero
    pub fn reset(&self) {
        for counter in self.all() {
            counter.store(0, Ordering::Relaxed);
        }
    }

    /// Get snapshot of all counters
    pub fn snapshot(&self) -> CounterSnapshot {
        CounterSnapshot {
            triangles_submitted: self.triangles_submitted.load(Ordering::Relaxed),
            triangles_clipped_away: self.triangles_clipped_away.load(Ordering::Relaxed),
            clip_fan_triangles: self.clip_fan_triangles.load(Ordering::Relaxed),
            triangles_culled: self.triangles_culled.load(Ordering::Relaxed),
            triangles_rasterized: self.triangles_rasterized.load(Ordering::Relaxed),
            bounds_clamped: self.bounds_clamped.load(Ordering::Relaxed),
            pixels_tested: self.pixels_tested.load(Ordering::Relaxed),
            pixels_inside: self.pixels_inside.load(Ordering::Relaxed),
            depth_passed: self.depth_passed.load(Ordering::Relaxed),
            depth_failed: self.depth_failed.load(Ordering::Relaxed),
            framebuffer_clear_calls: self.framebuffer_clear_calls.load(Ordering::Relaxed),
        }
    }

    fn all(&self) -> [&AtomicU64; 11] {
        [
            &self.triangles_submitted,
            &self.triangles_clipped_away,
            &self.clip_fan_triangles,
            &self.triangles_culled,
            &self.triangles_rasterized,
            &self.bounds_clamped,
            &self.pixels_tested,
            &self.pixels_inside,
            &self.depth_passed,
            &self.depth_failed,
            &self.framebuffer_clear_calls,
        ]
    }
}

/// Snapshot of counter values at a point in time
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CounterSnapshot {
    pub triangles_submitted: u64,
    pub triangles_clipped_away: u64,
    pub clip_fan_triangles: u64,
    pub triangles_culled: u64,
    pub triangles_rasterized: u64,
    pub bounds_clamped: u64,
    pub pixels_tested: u64,
    pub pixels_inside: u64,
    pub depth_passed: u64,
    pub depth_failed: u64,
    pub framebuffer_clear_calls: u64,
}

impl CounterSnapshot {
    /// Print formatted report
    pub fn print_report(&self) {
        println!("\n=== Performance Counters Report ===");
        println!("\nGeometry:");
        println!("  triangles submitted:        {:12}", self.triangles_submitted);
        println!("  triangles clipped away:     {:12}", self.triangles_clipped_away);
        println!("  fan triangles after clip:   {:12}", self.clip_fan_triangles);

        println!("\nRasterization:");
        println!("  triangles culled:           {:12}", self.triangles_culled);
        println!("  triangles rasterized:       {:12}", self.triangles_rasterized);
        println!("  bounding boxes clamped:     {:12}", self.bounds_clamped);

        println!("\nPixels:");
        println!("  pixels tested:              {:12}", self.pixels_tested);
        println!("  pixels inside:              {:12}", self.pixels_inside);
        println!("  depth test passed:          {:12}", self.depth_passed);
        println!("  depth test failed:          {:12}", self.depth_failed);
        let depth_tests = self.depth_passed + self.depth_failed;
        if depth_tests > 0 {
            let pass_rate = (self.depth_passed as f64 / depth_tests as f64) * 100.0;
            println!("  depth test pass rate:       {:11.2}%", pass_rate);
        }

        println!("\nFramebuffer:");
        println!("  clear calls:                {:12}", self.framebuffer_clear_calls);

        println!();
    }
}

/// Global function counters instance
pub static FUNCTION_COUNTERS: FunctionCounters = FunctionCounters::new();

/// Macro for incrementing a counter (only when profiling feature is enabled)
#[macro_export]
macro_rules! count_call {
    ($counter:expr) => {
        #[cfg(feature = "profiling")]
        {
            $counter.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        }
    };
}

/// Macro for adding to a counter (only when profiling feature is enabled)
#[macro_export]
macro_rules! count_add {
    ($counter:expr, $value:expr) => {
        #[cfg(feature = "profiling")]
        {
            $counter.fetch_add($value, std::sync::atomic::Ordering::Relaxed);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_zeroes_every_counter() {
        let counters = FunctionCounters::new();
        counters.pixels_tested.fetch_add(12, Ordering::Relaxed);
        counters.framebuffer_clear_calls.fetch_add(1, Ordering::Relaxed);
        assert_eq!(counters.snapshot().pixels_tested, 12);

        counters.reset();
        assert_eq!(counters.snapshot(), CounterSnapshot::default());
    }
}
