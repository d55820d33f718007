/// One `devicemotion` reading of acceleration including gravity. `None`
/// axes read as zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct AccelSample {
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub timestamp_ms: f64,
}

impl AccelSample {
    pub fn new(x: f64, y: f64, z: f64, timestamp_ms: f64) -> Self {
        Self {
            x: Some(x),
            y: Some(y),
            z: Some(z),
            timestamp_ms,
        }
    }

    fn axes(&self) -> [f64; 3] {
        [
            self.x.unwrap_or(0.0),
            self.y.unwrap_or(0.0),
            self.z.unwrap_or(0.0),
        ]
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShakeParams {
    pub threshold: f64,
    pub cooldown_ms: f64,
}

#[derive(Clone, Debug)]
pub struct ShakeDetector {
    params: ShakeParams,
    last: Option<[f64; 3]>,
    last_shake_ms: f64,
}

impl ShakeDetector {
    pub fn new(params: ShakeParams) -> Self {
        Self {
            params,
            last: None,
            last_shake_ms: 0.0,
        }
    }

    /// Feeds a sample and reports whether it completes a shake. The previous
    /// reading is tracked even while `armed` is false so that arming does not
    /// fire on a stale delta.
    pub fn sample(&mut self, sample: AccelSample, armed: bool) -> bool {
        let current = sample.axes();
        let Some(previous) = self.last.replace(current) else {
            return false;
        };
        if !armed {
            return false;
        }
        let delta: f64 = current
            .iter()
            .zip(previous.iter())
            .map(|(now, before)| (now - before).abs())
            .sum();
        let now = sample.timestamp_ms;
        if delta > self.params.threshold && now - self.last_shake_ms > self.params.cooldown_ms {
            self.last_shake_ms = now;
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PARAMS: ShakeParams = ShakeParams {
        threshold: 18.0,
        cooldown_ms: 350.0,
    };

    #[test]
    fn first_sample_only_primes() {
        let mut detector = ShakeDetector::new(PARAMS);
        assert!(!detector.sample(AccelSample::new(50.0, 50.0, 50.0, 1000.0), true));
    }

    #[test]
    fn disarmed_samples_still_update_history() {
        let mut detector = ShakeDetector::new(PARAMS);
        detector.sample(AccelSample::new(0.0, 0.0, 0.0, 1000.0), false);
        detector.sample(AccelSample::new(30.0, 0.0, 0.0, 1100.0), false);
        // Delta against the disarmed reading is small.
        assert!(!detector.sample(AccelSample::new(31.0, 0.0, 0.0, 1200.0), true));
    }

    #[test]
    fn missing_axes_read_as_zero() {
        let mut detector = ShakeDetector::new(PARAMS);
        detector.sample(AccelSample::new(0.0, 0.0, 9.8, 1000.0), true);
        let sparse = AccelSample {
            x: Some(20.0),
            y: None,
            z: None,
            timestamp_ms: 2000.0,
        };
        assert!(detector.sample(sparse, true));
    }

    #[test]
    fn cooldown_suppresses_rapid_repeats() {
        let mut detector = ShakeDetector::new(PARAMS);
        detector.sample(AccelSample::new(0.0, 0.0, 0.0, 1000.0), true);
        assert!(detector.sample(AccelSample::new(20.0, 0.0, 0.0, 1400.0), true));
        assert!(!detector.sample(AccelSample::new(0.0, 0.0, 0.0, 1600.0), true));
        assert!(detector.sample(AccelSample::new(20.0, 0.0, 0.0, 1800.0), true));
    }
}
