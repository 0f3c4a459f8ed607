use std::collections::HashMap;
use std::time::Instant;

use super::history::CpuHistory;
use super::process::ProcessSample;
use super::source::{RawProcess, SourceResult};
use crate::power::PowerModel;

/// Turns raw cumulative CPU counters into per-tick CPU rates.
#[derive(Debug)]
pub struct ProcessSampler {
    history: CpuHistory,
    logical_cores: usize,
    power: PowerModel,
}

impl ProcessSampler {
    pub fn new(logical_cores: usize, power: PowerModel) -> Self {
        ProcessSampler {
            history: CpuHistory::new(),
            logical_cores: logical_cores.max(1),
            power,
        }
    }

    pub fn history(&self) -> &CpuHistory {
        &self.history
    }

    /// Records a baseline without producing samples.
    pub fn seed(&mut self, raw: &[RawProcess], now: Instant) {
        let current = raw.iter().map(|p| (p.pid, p.cpu_seconds())).collect();
        self.history.replace(current, now);
    }

    /// Computes samples for one tick and replaces the history.
    ///
    /// A failed query yields an empty list; the timestamp still advances so
    /// the next tick's interval is measured from now.
    pub fn sample(&mut self, raw: SourceResult<Vec<RawProcess>>, now: Instant) -> Vec<ProcessSample> {
        let raw = match raw {
            Ok(raw) => raw,
            Err(err) => {
                tracing::debug!(%err, "process query failed; rendering an empty list");
                Vec::new()
            }
        };

        let dt = self.history.elapsed_secs(now);
        let mut current = HashMap::with_capacity(raw.len());
        let samples: Vec<ProcessSample> = raw
            .into_iter()
            .map(|p| {
                let cpu_seconds = p.cpu_seconds();
                let previous = self.history.get(p.pid).unwrap_or(cpu_seconds);
                let instant = instant_cpu_percent(cpu_seconds - previous, dt, self.logical_cores);
                current.insert(p.pid, cpu_seconds);
                ProcessSample {
                    pid: p.pid,
                    est_watts: self.power.watts_for_bytes(instant, p.working_set_bytes),
                    name: p.name,
                    command_line: p.command_line,
                    cumulative_cpu_seconds: cpu_seconds,
                    instant_cpu_percent: instant,
                    mem_bytes: p.working_set_bytes,
                }
            })
            .collect();

        self.history.replace(current, now);
        samples
    }
}

/// Percentage of one machine's total CPU capacity used over `dt_secs`.
pub fn instant_cpu_percent(delta_secs: f64, dt_secs: f64, logical_cores: usize) -> f64 {
    let delta = delta_secs.max(0.0);
    let pct = delta / dt_secs / logical_cores.max(1) as f64 * 100.0;
    if pct.is_finite() && pct > 0.0 { pct } else { 0.0 }
}
