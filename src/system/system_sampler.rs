use std::time::Duration;

use super::platform;
use super::snapshot::{HostInfo, SystemSnapshot, UNKNOWN_CPU_MODEL, UNKNOWN_UPTIME};
use super::source::{MemoryCounters, MetricSource, SourceResult};
use crate::format::format_uptime;
use crate::power::PowerModel;

/// Builds one `SystemSnapshot` per tick from independently failable queries.
#[derive(Debug, Clone)]
pub struct SystemSampler {
    power: PowerModel,
}

impl SystemSampler {
    pub fn new(power: PowerModel) -> Self {
        SystemSampler { power }
    }

    pub async fn sample<S: MetricSource>(&self, source: &S) -> SystemSnapshot {
        let (cpu, memory, count, uptime) = tokio::join!(
            source.system_cpu_percent(),
            source.system_memory(),
            source.process_count(),
            source.uptime(),
        );
        self.build(cpu, memory, count, uptime)
    }

    pub fn build(
        &self,
        cpu: SourceResult<f64>,
        memory: SourceResult<MemoryCounters>,
        count: SourceResult<u32>,
        uptime: SourceResult<Duration>,
    ) -> SystemSnapshot {
        let cpu_percent = match cpu {
            Ok(pct) if pct.is_finite() => pct,
            Ok(pct) => {
                tracing::debug!(pct, "non-finite cpu percent; using 0");
                0.0
            }
            Err(err) => {
                tracing::debug!(%err, "cpu query failed; using 0");
                0.0
            }
        };

        let memory = match memory {
            Ok(mem) => mem,
            Err(err) => {
                tracing::debug!(%err, "memory query failed; using host counters");
                platform::host_memory().unwrap_or_default()
            }
        };
        let total_mem_bytes = memory.total_bytes;
        let used_mem_bytes = total_mem_bytes.saturating_sub(memory.free_bytes);

        let process_count = count.unwrap_or_else(|err| {
            tracing::debug!(%err, "process count failed; using 0");
            0
        });

        let uptime = match uptime {
            Ok(duration) => format_uptime(duration),
            Err(err) => {
                tracing::debug!(%err, "uptime query failed");
                UNKNOWN_UPTIME.to_string()
            }
        };

        let cpu_watts = self.power.cpu_watts(cpu_percent);
        let mem_watts = self.power.mem_watts(crate::power::bytes_to_gb(used_mem_bytes));

        SystemSnapshot {
            cpu_percent,
            total_mem_bytes,
            used_mem_bytes,
            process_count,
            uptime,
            cpu_watts,
            mem_watts,
            est_total_watts: cpu_watts + mem_watts,
        }
    }
}

/// One-time core count and CPU model detection, defaulted when unavailable.
pub async fn detect_host<S: MetricSource>(source: &S) -> HostInfo {
    let (cores, model) = tokio::join!(source.logical_core_count(), source.cpu_model());
    let logical_cores = match cores {
        Ok(n) if n > 0 => n,
        Ok(_) => 1,
        Err(err) => {
            tracing::warn!(%err, "logical core count unavailable; assuming 1");
            1
        }
    };
    let cpu_model = match model {
        Ok(m) if !m.trim().is_empty() => m.trim().to_string(),
        Ok(_) => UNKNOWN_CPU_MODEL.to_string(),
        Err(err) => {
            tracing::warn!(%err, "cpu model unavailable");
            UNKNOWN_CPU_MODEL.to_string()
        }
    };
    HostInfo {
        cpu_model,
        logical_cores,
    }
}
