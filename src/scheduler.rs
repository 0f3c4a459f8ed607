use std::time::Instant;

use crate::power::PowerModel;
use crate::system::process::ProcessSample;
use crate::system::process_sampler::ProcessSampler;
use crate::system::snapshot::{HostInfo, SystemSnapshot};
use crate::system::source::{BatteryInfo, MetricSource};
use crate::system::system_sampler::{SystemSampler, detect_host};

/// Everything one tick fetched, ready to rank and draw.
#[derive(Debug, Clone)]
pub struct TickData {
    pub snapshot: SystemSnapshot,
    pub processes: Vec<ProcessSample>,
    pub battery: Option<BatteryInfo>,
    pub power_profile: Option<String>,
}

impl Default for TickData {
    fn default() -> Self {
        TickData {
            snapshot: SystemSnapshot::empty(),
            processes: Vec::new(),
            battery: None,
            power_profile: None,
        }
    }
}

/// Owns the metric source and both samplers; drives one sampling round per tick.
pub struct Scheduler<S> {
    source: S,
    system: SystemSampler,
    processes: ProcessSampler,
    host: HostInfo,
}

impl<S: MetricSource> Scheduler<S> {
    /// Detects the host and seeds the CPU history so the first tick has a baseline.
    pub async fn start(source: S, power: PowerModel) -> Self {
        let host = detect_host(&source).await;
        tracing::info!(
            cpu_model = %host.cpu_model,
            logical_cores = host.logical_cores,
            "host detected"
        );

        let mut processes = ProcessSampler::new(host.logical_cores, power);
        match source.processes().await {
            Ok(raw) => processes.seed(&raw, Instant::now()),
            Err(err) => tracing::debug!(%err, "initial process sample failed; starting unseeded"),
        }

        Scheduler {
            source,
            system: SystemSampler::new(power),
            processes,
            host,
        }
    }

    pub fn host(&self) -> &HostInfo {
        &self.host
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn process_sampler(&self) -> &ProcessSampler {
        &self.processes
    }

    /// Fetches all four sources concurrently; every failure degrades to a fallback.
    pub async fn tick(&mut self) -> TickData {
        let (snapshot, raw, battery, profile) = tokio::join!(
            self.system.sample(&self.source),
            self.source.processes(),
            self.source.battery(),
            self.source.power_profile(),
        );

        let processes = self.processes.sample(raw, Instant::now());

        let battery = battery.unwrap_or_else(|err| {
            tracing::debug!(%err, "battery query failed");
            None
        });
        let power_profile = match profile {
            Ok(profile) if !profile.trim().is_empty() => Some(profile.trim().to_string()),
            Ok(_) => None,
            Err(err) => {
                tracing::debug!(%err, "power profile query failed");
                None
            }
        };

        TickData {
            snapshot,
            processes,
            battery,
            power_profile,
        }
    }
}
