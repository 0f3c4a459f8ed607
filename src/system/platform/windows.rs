use super::{CpuTimes, PlatformExtensions};
use crate::system::source::{BatteryInfo, BatteryStatus, MemoryCounters};

pub struct Platform;

#[cfg(target_os = "windows")]
use windows_sys::Win32::{
    Foundation::{CloseHandle, FILETIME},
    System::Power::{GetSystemPowerStatus, SYSTEM_POWER_STATUS},
    System::Threading::{GetProcessTimes, OpenProcess, PROCESS_QUERY_LIMITED_INFORMATION},
};

const NO_BATTERY: u8 = 128;
const UNKNOWN_STATUS: u8 = 255;
const FLAG_HIGH: u8 = 1;
const FLAG_LOW: u8 = 2;
const FLAG_CRITICAL: u8 = 4;
const FLAG_CHARGING: u8 = 8;

impl PlatformExtensions for Platform {
    #[cfg(target_os = "windows")]
    fn process_cpu_times(pid: u32) -> Option<CpuTimes> {
        unsafe {
            let handle = OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, 0, pid);
            if handle.is_null() {
                return None;
            }
            let mut creation = std::mem::zeroed::<FILETIME>();
            let mut exit = std::mem::zeroed::<FILETIME>();
            let mut kernel = std::mem::zeroed::<FILETIME>();
            let mut user = std::mem::zeroed::<FILETIME>();
            let ok = GetProcessTimes(handle, &mut creation, &mut exit, &mut kernel, &mut user);
            CloseHandle(handle);
            if ok == 0 {
                return None;
            }
            Some(CpuTimes {
                kernel_ticks: filetime_to_u64(&kernel),
                user_ticks: filetime_to_u64(&user),
            })
        }
    }

    #[cfg(not(target_os = "windows"))]
    fn process_cpu_times(_pid: u32) -> Option<CpuTimes> {
        None
    }

    #[cfg(target_os = "windows")]
    fn battery() -> Option<BatteryInfo> {
        let mut status = unsafe { std::mem::zeroed::<SYSTEM_POWER_STATUS>() };
        let ok = unsafe { GetSystemPowerStatus(&mut status) };
        if ok == 0 {
            return None;
        }
        battery_from_flags(status.ACLineStatus, status.BatteryFlag, status.BatteryLifePercent)
    }

    #[cfg(not(target_os = "windows"))]
    fn battery() -> Option<BatteryInfo> {
        None
    }

    fn power_profile() -> Option<String> {
        let output = std::process::Command::new("powercfg")
            .arg("/getactivescheme")
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        parse_active_scheme(&String::from_utf8_lossy(&output.stdout))
    }

    fn host_memory() -> Option<MemoryCounters> {
        None
    }
}

#[cfg(target_os = "windows")]
fn filetime_to_u64(ft: &FILETIME) -> u64 {
    ((ft.dwHighDateTime as u64) << 32) | (ft.dwLowDateTime as u64)
}

fn battery_from_flags(ac_line: u8, flag: u8, life_percent: u8) -> Option<BatteryInfo> {
    if flag == NO_BATTERY {
        return None;
    }
    let charge_percent = (life_percent <= 100).then_some(life_percent);
    let charging = flag != UNKNOWN_STATUS && flag & FLAG_CHARGING != 0;
    let status = if flag == UNKNOWN_STATUS {
        BatteryStatus::Unknown
    } else if charging && flag & FLAG_CRITICAL != 0 {
        BatteryStatus::ChargingCritical
    } else if charging && flag & FLAG_LOW != 0 {
        BatteryStatus::ChargingLow
    } else if charging && flag & FLAG_HIGH != 0 {
        BatteryStatus::ChargingHigh
    } else if charging {
        BatteryStatus::Charging
    } else if ac_line == 1 && charge_percent == Some(100) {
        BatteryStatus::FullyCharged
    } else if ac_line == 1 {
        BatteryStatus::AcOnline
    } else if flag & FLAG_CRITICAL != 0 {
        BatteryStatus::Critical
    } else if flag & FLAG_LOW != 0 {
        BatteryStatus::Low
    } else {
        BatteryStatus::Discharging
    };
    Some(BatteryInfo {
        charge_percent,
        status,
    })
}

/// `Power Scheme GUID: 381b4222-...  (Balanced)` -> `Balanced`
fn parse_active_scheme(output: &str) -> Option<String> {
    let start = output.rfind('(')? + 1;
    let end = output[start..].find(')')? + start;
    let name = output[start..end].trim();
    (!name.is_empty()).then(|| name.to_string())
}
