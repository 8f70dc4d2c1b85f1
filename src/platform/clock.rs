//! Frame pacing
//!
//! With no tick rate configured, every animation frame runs exactly one
//! tick. With a rate, a fixed-timestep accumulator decides how many ticks a
//! frame owes, capped to avoid a spiral of death after a long stall.

use crate::consts::MAX_SUBSTEPS;

#[derive(Debug, Clone)]
pub struct FrameClock {
    /// Seconds per tick, `None` for one tick per frame
    step: Option<f32>,
    accumulator: f32,
    last_time: f64,
}

impl FrameClock {
    pub fn new(tick_rate_hz: Option<f32>) -> Self {
        Self {
            step: tick_rate_hz.filter(|hz| *hz > 0.0).map(|hz| 1.0 / hz),
            accumulator: 0.0,
            last_time: 0.0,
        }
    }

    /// Record a frame timestamp (ms, from `requestAnimationFrame`) and
    /// return how many ticks to run
    pub fn advance(&mut self, time_ms: f64) -> u32 {
        let dt = if self.last_time > 0.0 {
            ((time_ms - self.last_time) / 1000.0) as f32
        } else {
            0.0
        };
        self.last_time = time_ms;

        let Some(step) = self.step else {
            return 1;
        };

        self.accumulator += dt.clamp(0.0, 0.1);

        let mut ticks = 0;
        while self.accumulator >= step && ticks < MAX_SUBSTEPS {
            self.accumulator -= step;
            ticks += 1;
        }
        if ticks == MAX_SUBSTEPS {
            self.accumulator = 0.0;
        }
        ticks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_tick_per_frame_by_default() {
        let mut clock = FrameClock::new(None);
        assert_eq!(clock.advance(16.0), 1);
        assert_eq!(clock.advance(20.0), 1);
        assert_eq!(clock.advance(500.0), 1);
    }

    #[test]
    fn test_fixed_rate_on_fast_display() {
        // 120 Hz display, 60 Hz ticks: one tick every other frame
        let mut clock = FrameClock::new(Some(60.0));
        assert_eq!(clock.advance(1000.0), 0);
        let mut total = 0;
        for i in 1..=120 {
            total += clock.advance(1000.0 + i as f64 * (1000.0 / 120.0));
        }
        assert!((59..=61).contains(&total), "ran {total} ticks");
    }

    #[test]
    fn test_stall_is_capped() {
        let mut clock = FrameClock::new(Some(240.0));
        clock.advance(1000.0);
        assert_eq!(clock.advance(6000.0), MAX_SUBSTEPS);
        assert_eq!(clock.advance(6001.0), 0);
    }
}
