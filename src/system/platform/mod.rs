use super::source::{BatteryInfo, MemoryCounters};

/// Kernel and user CPU time, in 100-nanosecond units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CpuTimes {
    pub kernel_ticks: u64,
    pub user_ticks: u64,
}

pub trait PlatformExtensions {
    fn process_cpu_times(pid: u32) -> Option<CpuTimes>;
    /// `None` when the host has no battery or it cannot be read.
    fn battery() -> Option<BatteryInfo>;
    fn power_profile() -> Option<String>;
    fn host_memory() -> Option<MemoryCounters>;
}

#[cfg(target_os = "linux")]
mod linux;
#[cfg(target_os = "macos")]
mod macos;
#[cfg(target_os = "windows")]
mod windows;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(target_os = "macos")]
use macos as platform_impl;
#[cfg(target_os = "windows")]
use windows as platform_impl;

pub fn process_cpu_times(pid: u32) -> Option<CpuTimes> {
    platform_impl::Platform::process_cpu_times(pid)
}

pub fn battery() -> Option<BatteryInfo> {
    platform_impl::Platform::battery()
}

pub fn power_profile() -> Option<String> {
    platform_impl::Platform::power_profile()
}

pub fn host_memory() -> Option<MemoryCounters> {
    platform_impl::Platform::host_memory()
}
