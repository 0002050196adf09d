/// Number of frames the exponential FPS filter averages over.
pub const FPS_FILTER: f64 = 50.0;

/// Smoothed frames-per-second estimate.
#[derive(Debug, Clone, Default)]
pub struct FpsMeter {
    fps: f64,
}

impl FpsMeter {
    pub fn new() -> Self {
        Self { fps: 0.0 }
    }

    /// Feeds the wall-clock duration of the last frame, in seconds.
    ///
    /// Non-positive or non-finite durations carry no information and are
    /// skipped.
    pub fn record_frame(&mut self, dt: f64) {
        if !(dt.is_finite() && dt > 0.0) {
            return;
        }
        let this_frame = 1.0 / dt;
        self.fps += (this_frame - self.fps) / FPS_FILTER;
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    pub fn reset(&mut self) {
        self.fps = 0.0;
    }
}

/// Text readout refreshed once per `period` seconds, independent of how
/// often frames are rendered.
#[derive(Debug, Clone)]
pub struct FpsReadout {
    period: f64,
    elapsed: f64,
    text: String,
}

impl Default for FpsReadout {
    fn default() -> Self {
        Self::new(1.0)
    }
}

impl FpsReadout {
    pub fn new(period: f64) -> Self {
        Self {
            period,
            elapsed: 0.0,
            text: format_fps(0.0),
        }
    }

    /// Accumulates `dt` and refreshes the text from `meter` once a full
    /// period has passed. Returns `true` when the text changed.
    pub fn update(&mut self, dt: f64, meter: &FpsMeter) -> bool {
        if dt.is_finite() && dt > 0.0 {
            self.elapsed += dt;
        }
        if self.elapsed < self.period {
            return false;
        }
        self.elapsed %= self.period;
        self.text = format_fps(meter.fps());
        true
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

pub fn format_fps(fps: f64) -> String {
    format!("{fps:.1} fps")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converges_to_constant_frame_rate() {
        let mut meter = FpsMeter::new();
        let dt = 1.0 / 60.0;

        // One time constant gets within 1/e of the target.
        for _ in 0..FPS_FILTER as usize {
            meter.record_frame(dt);
        }
        assert!(meter.fps() > 60.0 * (1.0 - 1.0 / std::f64::consts::E) - 1e-9);

        for _ in 0..1000 {
            meter.record_frame(dt);
        }
        assert!((meter.fps() - 60.0).abs() < 1e-3, "fps = {}", meter.fps());
    }

    #[test]
    fn single_frame_moves_by_one_fiftieth() {
        let mut meter = FpsMeter::new();
        meter.record_frame(0.01);
        assert!((meter.fps() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn ignores_zero_and_negative_deltas() {
        let mut meter = FpsMeter::new();
        meter.record_frame(0.0);
        meter.record_frame(-1.0);
        meter.record_frame(f64::NAN);
        assert_eq!(meter.fps(), 0.0);
    }

    #[test]
    fn readout_refreshes_once_per_period() {
        let mut meter = FpsMeter::new();
        let mut readout = FpsReadout::default();
        assert_eq!(readout.text(), "0.0 fps");

        for _ in 0..59 {
            meter.record_frame(1.0 / 60.0);
            assert!(!readout.update(1.0 / 60.0, &meter));
        }
        meter.record_frame(1.0 / 60.0);
        assert!(readout.update(1.0 / 60.0 + 1e-9, &meter));
        assert_eq!(readout.text(), format_fps(meter.fps()));
    }

    #[test]
    fn formats_with_one_decimal() {
        assert_eq!(format_fps(59.84), "59.8 fps");
        assert_eq!(format_fps(60.0), "60.0 fps");
    }
}
