//! Linear power estimate.
//!
//! This is a heuristic, not a measurement: CPU draw scales linearly with
//! utilization up to the configured TDP and memory draw scales with resident
//! gigabytes. Idle floor, per-core scaling, I/O and GPU draw are ignored.

const BYTES_PER_GB: f64 = 1024.0 * 1024.0 * 1024.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PowerModel {
    pub cpu_tdp_watts: f64,
    pub mem_watts_per_gb: f64,
}

impl Default for PowerModel {
    fn default() -> Self {
        PowerModel {
            cpu_tdp_watts: 15.0,
            mem_watts_per_gb: 1.5,
        }
    }
}

impl PowerModel {
    pub fn new(cpu_tdp_watts: f64, mem_watts_per_gb: f64) -> Self {
        PowerModel {
            cpu_tdp_watts: non_negative(cpu_tdp_watts),
            mem_watts_per_gb: non_negative(mem_watts_per_gb),
        }
    }

    pub fn cpu_watts(&self, cpu_percent: f64) -> f64 {
        let pct = if cpu_percent.is_finite() {
            cpu_percent.clamp(0.0, 100.0)
        } else {
            0.0
        };
        pct / 100.0 * self.cpu_tdp_watts
    }

    pub fn mem_watts(&self, mem_gb: f64) -> f64 {
        non_negative(mem_gb) * self.mem_watts_per_gb
    }

    pub fn watts(&self, cpu_percent: f64, mem_gb: f64) -> f64 {
        self.cpu_watts(cpu_percent) + self.mem_watts(mem_gb)
    }

    pub fn watts_for_bytes(&self, cpu_percent: f64, mem_bytes: u64) -> f64 {
        self.watts(cpu_percent, bytes_to_gb(mem_bytes))
    }
}

pub fn bytes_to_gb(bytes: u64) -> f64 {
    bytes as f64 / BYTES_PER_GB
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() { value.max(0.0) } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn half_load_with_two_gigabytes() {
        let model = PowerModel::new(15.0, 1.5);
        assert!((model.watts(50.0, 2.0) - 10.5).abs() < 1e-9);
    }

    #[test]
    fn cpu_percent_is_clamped() {
        let model = PowerModel::default();
        assert!((model.cpu_watts(250.0) - 15.0).abs() < 1e-9);
        assert_eq!(model.cpu_watts(-10.0), 0.0);
        assert_eq!(model.cpu_watts(f64::NAN), 0.0);
    }

    #[test]
    fn negative_memory_contributes_nothing() {
        let model = PowerModel::default();
        assert_eq!(model.mem_watts(-4.0), 0.0);
    }

    #[test]
    fn bytes_convert_with_binary_gigabytes() {
        let model = PowerModel::new(0.0, 2.0);
        let watts = model.watts_for_bytes(0.0, 3 * 1024 * 1024 * 1024);
        assert!((watts - 6.0).abs() < 1e-9);
    }

    #[test]
    fn negative_constants_are_floored() {
        let model = PowerModel::new(-5.0, -1.0);
        assert_eq!(model.watts(100.0, 8.0), 0.0);
    }
}
