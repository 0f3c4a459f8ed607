#[derive(Clone, Debug, PartialEq)]
pub struct ProcessSample {
    pub pid: u32,
    pub name: String,
    pub command_line: String,
    pub cumulative_cpu_seconds: f64,
    pub instant_cpu_percent: f64,
    pub mem_bytes: u64,
    pub est_watts: f64,
}
