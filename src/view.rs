use std::time::Duration;

pub const MIN_REFRESH_MS: u64 = 200;
pub const MAX_REFRESH_MS: u64 = 60_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Cpu,
    Mem,
    Pid,
    Name,
    Power,
}

impl SortKey {
    /// Direction applied when the key is first selected.
    pub fn default_descending(self) -> bool {
        match self {
            SortKey::Cpu | SortKey::Mem | SortKey::Power => true,
            SortKey::Pid | SortKey::Name => false,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SortKey::Cpu => "CPU",
            SortKey::Mem => "Memory",
            SortKey::Pid => "PID",
            SortKey::Name => "Name",
            SortKey::Power => "Power",
        }
    }

    pub fn from_str_config(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "mem" | "memory" => SortKey::Mem,
            "pid" => SortKey::Pid,
            "name" => SortKey::Name,
            "power" | "watts" => SortKey::Power,
            _ => SortKey::Cpu,
        }
    }
}

/// User-adjustable presentation state. Written only by key dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    pub sort_key: SortKey,
    pub sort_descending: bool,
    pub filter: String,
    pub top_n: usize,
    refresh_interval_ms: u64,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::new(SortKey::Cpu, 20, 1000)
    }
}

impl ViewState {
    pub fn new(sort_key: SortKey, top_n: usize, refresh_interval_ms: u64) -> Self {
        ViewState {
            sort_key,
            sort_descending: sort_key.default_descending(),
            filter: String::new(),
            top_n: top_n.max(1),
            refresh_interval_ms: clamp_interval(refresh_interval_ms as f64),
        }
    }

    pub fn refresh_interval_ms(&self) -> u64 {
        self.refresh_interval_ms
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_millis(self.refresh_interval_ms)
    }

    pub fn sort_by(&mut self, key: SortKey) {
        self.sort_key = key;
        self.sort_descending = key.default_descending();
    }

    pub fn reverse_sort(&mut self) {
        self.sort_descending = !self.sort_descending;
    }

    /// Shortens the interval by a factor of 0.8.
    pub fn faster(&mut self) {
        self.refresh_interval_ms = clamp_interval(self.refresh_interval_ms as f64 * 0.8);
    }

    /// Lengthens the interval by a factor of 1.25.
    pub fn slower(&mut self) {
        self.refresh_interval_ms = clamp_interval(self.refresh_interval_ms as f64 * 1.25);
    }

    pub fn set_filter(&mut self, text: &str) {
        self.filter = text.trim().to_string();
    }
}

fn clamp_interval(ms: f64) -> u64 {
    if !ms.is_finite() {
        return MAX_REFRESH_MS;
    }
    (ms.round() as u64).clamp(MIN_REFRESH_MS, MAX_REFRESH_MS)
}
