use std::fs;
use std::path::Path;

use super::{CpuTimes, PlatformExtensions};
use crate::system::source::{BatteryInfo, BatteryStatus, MemoryCounters};

const POWER_SUPPLY_DIR: &str = "/sys/class/power_supply";
const PLATFORM_PROFILE: &str = "/sys/firmware/acpi/platform_profile";
const SCALING_GOVERNOR: &str = "/sys/devices/system/cpu/cpu0/cpufreq/scaling_governor";

pub struct Platform;

impl PlatformExtensions for Platform {
    fn process_cpu_times(pid: u32) -> Option<CpuTimes> {
        let contents = fs::read_to_string(format!("/proc/{pid}/stat")).ok()?;
        let (utime, stime) = parse_stat_times(&contents)?;
        let per_tick = ticks_per_clock_tick();
        Some(CpuTimes {
            kernel_ticks: stime.saturating_mul(per_tick),
            user_ticks: utime.saturating_mul(per_tick),
        })
    }

    fn battery() -> Option<BatteryInfo> {
        let entries = fs::read_dir(POWER_SUPPLY_DIR).ok()?;
        for entry in entries.flatten() {
            let path = entry.path();
            if read_trimmed(&path.join("type")).as_deref() != Some("Battery") {
                continue;
            }
            let status = read_trimmed(&path.join("status")).unwrap_or_default();
            let level = read_trimmed(&path.join("capacity_level")).unwrap_or_default();
            let charge_percent = read_trimmed(&path.join("capacity"))
                .and_then(|s| s.parse::<u8>().ok())
                .map(|pct| pct.min(100));
            return Some(BatteryInfo {
                charge_percent,
                status: status_from_sysfs(&status, &level),
            });
        }
        None
    }

    fn power_profile() -> Option<String> {
        read_trimmed(Path::new(PLATFORM_PROFILE))
            .or_else(|| read_trimmed(Path::new(SCALING_GOVERNOR)))
            .filter(|s| !s.is_empty())
    }

    fn host_memory() -> Option<MemoryCounters> {
        let contents = fs::read_to_string("/proc/meminfo").ok()?;
        parse_meminfo(&contents)
    }
}

fn read_trimmed(path: &Path) -> Option<String> {
    fs::read_to_string(path).ok().map(|s| s.trim().to_string())
}

/// 100 ns units per kernel clock tick (`USER_HZ`).
fn ticks_per_clock_tick() -> u64 {
    let hz = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
    let hz = if hz > 0 { hz as u64 } else { 100 };
    10_000_000 / hz
}

/// Returns `(utime, stime)` in clock ticks.
fn parse_stat_times(contents: &str) -> Option<(u64, u64)> {
    // comm may contain spaces and parens, so skip past the last ')'
    let after_comm = contents.rfind(')')? + 1;
    let fields: Vec<&str> = contents[after_comm..].split_whitespace().collect();
    // state(0) ppid(1) pgrp(2) session(3) tty_nr(4) tpgid(5) flags(6)
    // minflt(7) cminflt(8) majflt(9) cmajflt(10) utime(11) stime(12)
    let utime = fields.get(11)?.parse().ok()?;
    let stime = fields.get(12)?.parse().ok()?;
    Some((utime, stime))
}

fn parse_meminfo(contents: &str) -> Option<MemoryCounters> {
    let mut total_kb = None;
    let mut available_kb = None;
    let mut free_kb = None;
    for line in contents.lines() {
        let mut parts = line.split_whitespace();
        let key = parts.next();
        let value = parts.next().and_then(|v| v.parse::<u64>().ok());
        match key {
            Some("MemTotal:") => total_kb = value,
            Some("MemAvailable:") => available_kb = value,
            Some("MemFree:") => free_kb = value,
            _ => {}
        }
    }
    let total_kb = total_kb?;
    let free_kb = available_kb.or(free_kb)?;
    Some(MemoryCounters {
        total_bytes: total_kb * 1024,
        free_bytes: free_kb.min(total_kb) * 1024,
    })
}

fn status_from_sysfs(status: &str, level: &str) -> BatteryStatus {
    let low = level.eq_ignore_ascii_case("low");
    let critical = level.eq_ignore_ascii_case("critical");
    let high = level.eq_ignore_ascii_case("high");
    match status.to_ascii_lowercase().as_str() {
        "charging" if critical => BatteryStatus::ChargingCritical,
        "charging" if low => BatteryStatus::ChargingLow,
        "charging" if high => BatteryStatus::ChargingHigh,
        "charging" => BatteryStatus::Charging,
        "discharging" if critical => BatteryStatus::Critical,
        "discharging" if low => BatteryStatus::Low,
        "discharging" => BatteryStatus::Discharging,
        "full" => BatteryStatus::FullyCharged,
        "not charging" => BatteryStatus::AcOnline,
        "unknown" | "" => BatteryStatus::Unknown,
        _ => BatteryStatus::Undefined,
    }
}
