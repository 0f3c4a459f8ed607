use std::fmt;
use std::time::Duration;

use super::kill::KillResult;

/// CPU time is reported in 100-nanosecond units.
pub const TICKS_PER_SECOND: f64 = 10_000_000.0;

#[derive(Debug)]
pub enum SourceError {
    Unavailable(&'static str),
    Io(std::io::Error),
    Parse(String),
    Task(String),
    Poisoned,
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Unavailable(what) => write!(f, "{what} is not available on this host"),
            SourceError::Io(err) => write!(f, "i/o error: {err}"),
            SourceError::Parse(msg) => write!(f, "malformed data: {msg}"),
            SourceError::Task(msg) => write!(f, "query task failed: {msg}"),
            SourceError::Poisoned => write!(f, "metric state lock poisoned"),
        }
    }
}

impl std::error::Error for SourceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SourceError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for SourceError {
    fn from(err: std::io::Error) -> Self {
        SourceError::Io(err)
    }
}

pub type SourceResult<T> = Result<T, SourceError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MemoryCounters {
    pub total_bytes: u64,
    pub free_bytes: u64,
}

/// One process as reported by the OS, before any rate computation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProcess {
    pub pid: u32,
    pub name: String,
    pub command_line: String,
    pub kernel_ticks: u64,
    pub user_ticks: u64,
    pub working_set_bytes: u64,
}

impl RawProcess {
    pub fn cpu_seconds(&self) -> f64 {
        self.kernel_ticks.saturating_add(self.user_ticks) as f64 / TICKS_PER_SECOND
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatteryStatus {
    Discharging,
    AcOnline,
    FullyCharged,
    Low,
    Critical,
    Charging,
    ChargingHigh,
    ChargingLow,
    ChargingCritical,
    PartiallyCharged,
    Undefined,
    Unknown,
}

impl BatteryStatus {
    /// Maps the numeric battery status codes (1..=11) used by firmware
    /// battery reporting.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => BatteryStatus::Discharging,
            2 => BatteryStatus::AcOnline,
            3 => BatteryStatus::FullyCharged,
            4 => BatteryStatus::Low,
            5 => BatteryStatus::Critical,
            6 => BatteryStatus::Charging,
            7 => BatteryStatus::ChargingHigh,
            8 => BatteryStatus::ChargingLow,
            9 => BatteryStatus::ChargingCritical,
            10 => BatteryStatus::Undefined,
            11 => BatteryStatus::PartiallyCharged,
            _ => BatteryStatus::Unknown,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BatteryStatus::Discharging => "Discharging",
            BatteryStatus::AcOnline => "AC online",
            BatteryStatus::FullyCharged => "Fully charged",
            BatteryStatus::Low => "Low",
            BatteryStatus::Critical => "Critical",
            BatteryStatus::Charging => "Charging",
            BatteryStatus::ChargingHigh => "Charging (high)",
            BatteryStatus::ChargingLow => "Charging (low)",
            BatteryStatus::ChargingCritical => "Charging (critical)",
            BatteryStatus::PartiallyCharged => "Partially charged",
            BatteryStatus::Undefined => "Undefined",
            BatteryStatus::Unknown => "Unknown",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatteryInfo {
    pub charge_percent: Option<u8>,
    pub status: BatteryStatus,
}

/// Asynchronous, independently failable OS metric queries.
///
/// Every query may fail on its own; callers decide the fallback.
#[allow(async_fn_in_trait)]
pub trait MetricSource {
    async fn system_cpu_percent(&self) -> SourceResult<f64>;
    async fn system_memory(&self) -> SourceResult<MemoryCounters>;
    async fn processes(&self) -> SourceResult<Vec<RawProcess>>;
    /// `Ok(None)` means the host has no battery.
    async fn battery(&self) -> SourceResult<Option<BatteryInfo>>;
    async fn power_profile(&self) -> SourceResult<String>;
    async fn process_count(&self) -> SourceResult<u32>;
    async fn uptime(&self) -> SourceResult<Duration>;
    async fn logical_core_count(&self) -> SourceResult<usize>;
    async fn cpu_model(&self) -> SourceResult<String>;
}

#[allow(async_fn_in_trait)]
pub trait ProcessKiller {
    async fn kill(&self, pid: u32) -> KillResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_map_in_firmware_order() {
        assert_eq!(BatteryStatus::from_code(1), BatteryStatus::Discharging);
        assert_eq!(BatteryStatus::from_code(2), BatteryStatus::AcOnline);
        assert_eq!(BatteryStatus::from_code(9), BatteryStatus::ChargingCritical);
        assert_eq!(BatteryStatus::from_code(10), BatteryStatus::Undefined);
        assert_eq!(BatteryStatus::from_code(11), BatteryStatus::PartiallyCharged);
        assert_eq!(BatteryStatus::from_code(0), BatteryStatus::Unknown);
        assert_eq!(BatteryStatus::from_code(42), BatteryStatus::Unknown);
    }

    #[test]
    fn cpu_seconds_sums_kernel_and_user() {
        let raw = RawProcess {
            pid: 1,
            name: "init".into(),
            command_line: String::new(),
            kernel_ticks: 5_000_000,
            user_ticks: 10_000_000,
            working_set_bytes: 0,
        };
        assert!((raw.cpu_seconds() - 1.5).abs() < 1e-9);
    }
}
