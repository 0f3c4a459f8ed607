use super::{CpuTimes, PlatformExtensions};
use crate::system::source::{BatteryInfo, MemoryCounters};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn process_cpu_times(_pid: u32) -> Option<CpuTimes> {
        // No kernel/user split here; callers use sysinfo's accumulated time
        None
    }

    fn battery() -> Option<BatteryInfo> {
        None
    }

    fn power_profile() -> Option<String> {
        None
    }

    fn host_memory() -> Option<MemoryCounters> {
        None
    }
}
