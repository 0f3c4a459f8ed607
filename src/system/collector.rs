use std::sync::{Arc, Mutex};
use std::time::Duration;

use sysinfo::{Process, ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};

use super::kill::{self, KillResult};
use super::platform::{self, CpuTimes};
use super::source::{
    BatteryInfo, MemoryCounters, MetricSource, ProcessKiller, RawProcess, SourceError,
    SourceResult,
};

/// `MetricSource` backed by `sysinfo` and the platform extensions.
///
/// Host counters and the process table live behind separate locks so their
/// queries do not serialize against each other.
pub struct Collector {
    host: Arc<Mutex<System>>,
    procs: Arc<Mutex<System>>,
}

impl Default for Collector {
    fn default() -> Self {
        Self::new()
    }
}

impl Collector {
    pub fn new() -> Self {
        let mut host = System::new();
        host.refresh_memory();
        host.refresh_cpu_all();

        let mut procs = System::new();
        procs.refresh_processes_specifics(
            ProcessesToUpdate::All,
            true,
            ProcessRefreshKind::everything(),
        );

        Collector {
            host: Arc::new(Mutex::new(host)),
            procs: Arc::new(Mutex::new(procs)),
        }
    }
}

async fn with_system<T, F>(system: &Arc<Mutex<System>>, query: F) -> SourceResult<T>
where
    T: Send + 'static,
    F: FnOnce(&mut System) -> SourceResult<T> + Send + 'static,
{
    let system = Arc::clone(system);
    tokio::task::spawn_blocking(move || {
        let mut sys = system.lock().map_err(|_| SourceError::Poisoned)?;
        query(&mut sys)
    })
    .await
    .map_err(|e| SourceError::Task(e.to_string()))?
}

async fn blocking<T, F>(query: F) -> SourceResult<T>
where
    T: Send + 'static,
    F: FnOnce() -> SourceResult<T> + Send + 'static,
{
    tokio::task::spawn_blocking(query)
        .await
        .map_err(|e| SourceError::Task(e.to_string()))?
}

fn raw_process(pid: u32, process: &Process) -> RawProcess {
    let name = process.name().to_string_lossy().to_string();
    let command_line = process
        .cmd()
        .iter()
        .map(|s| s.to_string_lossy().to_string())
        .collect::<Vec<_>>()
        .join(" ");

    // sysinfo reports accumulated CPU time in milliseconds, without a
    // kernel/user split
    let times = platform::process_cpu_times(pid).unwrap_or(CpuTimes {
        kernel_ticks: 0,
        user_ticks: process.accumulated_cpu_time().saturating_mul(10_000),
    });

    RawProcess {
        pid,
        name,
        command_line,
        kernel_ticks: times.kernel_ticks,
        user_ticks: times.user_ticks,
        working_set_bytes: process.memory(),
    }
}

impl MetricSource for Collector {
    async fn system_cpu_percent(&self) -> SourceResult<f64> {
        with_system(&self.host, |sys| {
            sys.refresh_cpu_usage();
            Ok(sys.global_cpu_usage() as f64)
        })
        .await
    }

    async fn system_memory(&self) -> SourceResult<MemoryCounters> {
        with_system(&self.host, |sys| {
            sys.refresh_memory();
            let total_bytes = sys.total_memory();
            if total_bytes == 0 {
                return Err(SourceError::Unavailable("memory counters"));
            }
            Ok(MemoryCounters {
                total_bytes,
                free_bytes: sys.available_memory().min(total_bytes),
            })
        })
        .await
    }

    async fn processes(&self) -> SourceResult<Vec<RawProcess>> {
        with_system(&self.procs, |sys| {
            sys.refresh_processes_specifics(
                ProcessesToUpdate::All,
                true,
                ProcessRefreshKind::nothing()
                    .with_memory()
                    .with_cpu()
                    .with_cmd(UpdateKind::OnlyIfNotSet),
            );
            let mut list: Vec<RawProcess> = sys
                .processes()
                .iter()
                .map(|(pid, process)| raw_process(pid.as_u32(), process))
                .collect();
            // HashMap iteration order is arbitrary; give ties a stable order
            list.sort_by_key(|p| p.pid);
            Ok(list)
        })
        .await
    }

    async fn battery(&self) -> SourceResult<Option<BatteryInfo>> {
        blocking(|| Ok(platform::battery())).await
    }

    async fn power_profile(&self) -> SourceResult<String> {
        blocking(|| platform::power_profile().ok_or(SourceError::Unavailable("power profile")))
            .await
    }

    async fn process_count(&self) -> SourceResult<u32> {
        with_system(&self.host, |sys| {
            sys.refresh_processes_specifics(
                ProcessesToUpdate::All,
                true,
                ProcessRefreshKind::nothing(),
            );
            Ok(sys.processes().len() as u32)
        })
        .await
    }

    async fn uptime(&self) -> SourceResult<Duration> {
        match System::uptime() {
            0 => Err(SourceError::Unavailable("uptime")),
            secs => Ok(Duration::from_secs(secs)),
        }
    }

    async fn logical_core_count(&self) -> SourceResult<usize> {
        with_system(&self.host, |sys| match sys.cpus().len() {
            0 => Err(SourceError::Unavailable("cpu list")),
            n => Ok(n),
        })
        .await
    }

    async fn cpu_model(&self) -> SourceResult<String> {
        with_system(&self.host, |sys| {
            sys.cpus()
                .first()
                .map(|cpu| cpu.brand().trim().to_string())
                .filter(|brand| !brand.is_empty())
                .ok_or(SourceError::Unavailable("cpu model"))
        })
        .await
    }
}

impl ProcessKiller for Collector {
    async fn kill(&self, pid: u32) -> KillResult {
        tokio::task::spawn_blocking(move || kill::terminate(pid))
            .await
            .unwrap_or_else(|e| KillResult::Failed(pid, format!("Kill task failed: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(flavor = "current_thread")]
    async fn own_process_is_listed() {
        let collector = Collector::new();
        let list = collector.processes().await.expect("process list");
        let me = std::process::id();
        assert!(list.iter().any(|p| p.pid == me));
    }

    #[tokio::test(flavor = "current_thread")]
    async fn host_queries_do_not_panic() {
        let collector = Collector::new();
        let _ = collector.system_cpu_percent().await;
        let _ = collector.system_memory().await;
        let _ = collector.battery().await;
        let _ = collector.power_profile().await;
        let _ = collector.uptime().await;
        assert!(collector.logical_core_count().await.unwrap_or(1) >= 1);
    }
}
