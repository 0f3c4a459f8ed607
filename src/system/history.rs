use std::collections::HashMap;
use std::time::Instant;

/// Cumulative CPU seconds per pid as of the last sample.
#[derive(Debug, Default, Clone)]
pub struct CpuHistory {
    entries: HashMap<u32, f64>,
    last_sample: Option<Instant>,
}

impl CpuHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, pid: u32) -> Option<f64> {
        self.entries.get(&pid).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, pid: u32) -> bool {
        self.entries.contains_key(&pid)
    }

    pub fn pids(&self) -> impl Iterator<Item = u32> + '_ {
        self.entries.keys().copied()
    }

    pub fn last_sample(&self) -> Option<Instant> {
        self.last_sample
    }

    /// Seconds since the previous sample, never below one millisecond.
    pub fn elapsed_secs(&self, now: Instant) -> f64 {
        let secs = self
            .last_sample
            .map(|last| now.saturating_duration_since(last).as_secs_f64())
            .unwrap_or(0.0);
        secs.max(0.001)
    }

    /// Replaces every entry with the current set. Pids missing from `current`
    /// are forgotten.
    pub fn replace(&mut self, current: HashMap<u32, f64>, now: Instant) {
        self.entries = current;
        self.last_sample = Some(now);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn replace_drops_stale_pids() {
        let t0 = Instant::now();
        let mut history = CpuHistory::new();
        history.replace(HashMap::from([(1, 1.0), (2, 2.0), (3, 3.0)]), t0);
        history.replace(HashMap::from([(1, 1.5), (3, 3.5)]), t0 + Duration::from_secs(1));

        assert_eq!(history.len(), 2);
        assert_eq!(history.get(1), Some(1.5));
        assert!(!history.contains(2));
        assert_eq!(history.get(3), Some(3.5));
    }

    #[test]
    fn elapsed_has_millisecond_floor() {
        let t0 = Instant::now();
        let mut history = CpuHistory::new();
        assert!((history.elapsed_secs(t0) - 0.001).abs() < 1e-12);

        history.replace(HashMap::new(), t0);
        assert!((history.elapsed_secs(t0) - 0.001).abs() < 1e-12);
        let later = t0 + Duration::from_millis(1500);
        assert!((history.elapsed_secs(later) - 1.5).abs() < 1e-9);
    }
}
