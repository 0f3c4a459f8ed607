pub const UNKNOWN_UPTIME: &str = "N/A";
pub const UNKNOWN_CPU_MODEL: &str = "Unknown CPU";

#[derive(Clone, Debug, PartialEq)]
pub struct SystemSnapshot {
    /// Raw value as reported; may fall outside [0, 100] on noisy sources.
    pub cpu_percent: f64,
    pub total_mem_bytes: u64,
    pub used_mem_bytes: u64,
    pub process_count: u32,
    pub uptime: String,
    pub cpu_watts: f64,
    pub mem_watts: f64,
    pub est_total_watts: f64,
}

impl SystemSnapshot {
    pub fn empty() -> Self {
        SystemSnapshot {
            cpu_percent: 0.0,
            total_mem_bytes: 0,
            used_mem_bytes: 0,
            process_count: 0,
            uptime: UNKNOWN_UPTIME.to_string(),
            cpu_watts: 0.0,
            mem_watts: 0.0,
            est_total_watts: 0.0,
        }
    }

    pub fn cpu_percent_clamped(&self) -> f64 {
        clamp_percent(self.cpu_percent)
    }

    pub fn mem_percent(&self) -> f64 {
        if self.total_mem_bytes == 0 {
            return 0.0;
        }
        clamp_percent(self.used_mem_bytes as f64 / self.total_mem_bytes as f64 * 100.0)
    }
}

/// Detected once at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HostInfo {
    pub cpu_model: String,
    pub logical_cores: usize,
}

impl Default for HostInfo {
    fn default() -> Self {
        HostInfo {
            cpu_model: UNKNOWN_CPU_MODEL.to_string(),
            logical_cores: 1,
        }
    }
}

pub fn clamp_percent(value: f64) -> f64 {
    if value.is_finite() {
        value.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percentages_are_clamped_for_display() {
        let mut snap = SystemSnapshot::empty();
        snap.cpu_percent = 130.0;
        snap.total_mem_bytes = 100;
        snap.used_mem_bytes = 150;
        assert_eq!(snap.cpu_percent_clamped(), 100.0);
        assert_eq!(snap.mem_percent(), 100.0);
        // Raw value is preserved
        assert_eq!(snap.cpu_percent, 130.0);
    }

    #[test]
    fn zero_total_memory_is_zero_percent() {
        assert_eq!(SystemSnapshot::empty().mem_percent(), 0.0);
    }
}
