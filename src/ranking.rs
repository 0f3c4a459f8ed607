use std::cmp::Ordering;

use crate::system::process::ProcessSample;
use crate::view::{SortKey, ViewState};

/// Filters, sorts and truncates the sampled processes for display.
///
/// The sort is stable, so equal keys keep the sampler's order in either
/// direction. Truncation to `top_n` happens last.
pub fn rank(processes: &[ProcessSample], view: &ViewState) -> Vec<ProcessSample> {
    let needle = view.filter.to_lowercase();
    let mut ranked: Vec<ProcessSample> = processes
        .iter()
        .filter(|p| matches_filter(p, &needle))
        .cloned()
        .collect();

    let descending = view.sort_descending;
    ranked.sort_by(|a, b| {
        let ord = compare(view.sort_key, a, b);
        if descending { ord.reverse() } else { ord }
    });

    ranked.truncate(view.top_n);
    ranked
}

/// `needle` must already be lowercase. Empty matches everything.
pub fn matches_filter(process: &ProcessSample, needle: &str) -> bool {
    needle.is_empty()
        || process.name.to_lowercase().contains(needle)
        || process.command_line.to_lowercase().contains(needle)
}

fn compare(key: SortKey, a: &ProcessSample, b: &ProcessSample) -> Ordering {
    match key {
        SortKey::Cpu => cmp_f64(a.instant_cpu_percent, b.instant_cpu_percent),
        SortKey::Mem => a.mem_bytes.cmp(&b.mem_bytes),
        SortKey::Pid => a.pid.cmp(&b.pid),
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
        SortKey::Power => cmp_f64(a.est_watts, b.est_watts),
    }
}

fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(pid: u32, name: &str, cpu: f64, mem: u64) -> ProcessSample {
        ProcessSample {
            pid,
            name: name.to_string(),
            command_line: format!("/opt/{name}/bin/{name}"),
            cumulative_cpu_seconds: 0.0,
            instant_cpu_percent: cpu,
            mem_bytes: mem,
            est_watts: cpu / 10.0,
        }
    }

    fn pids(ranked: &[ProcessSample]) -> Vec<u32> {
        ranked.iter().map(|p| p.pid).collect()
    }

    #[test]
    fn descending_sort_keeps_input_order_for_ties() {
        let procs = vec![
            sample(1, "a", 0.0, 100),
            sample(2, "b", 0.0, 300),
            sample(3, "c", 0.0, 100),
        ];
        let mut view = ViewState::default();
        view.sort_by(SortKey::Mem);
        assert_eq!(pids(&rank(&procs, &view)), vec![2, 1, 3]);
    }

    #[test]
    fn ascending_sort_keeps_input_order_for_ties() {
        let procs = vec![
            sample(5, "same", 0.0, 0),
            sample(2, "Same", 0.0, 0),
            sample(9, "abc", 0.0, 0),
        ];
        let mut view = ViewState::default();
        view.sort_by(SortKey::Name);
        assert_eq!(pids(&rank(&procs, &view)), vec![9, 5, 2]);
    }

    #[test]
    fn reverse_flips_direction() {
        let procs = vec![sample(3, "c", 0.0, 0), sample(1, "a", 0.0, 0), sample(2, "b", 0.0, 0)];
        let mut view = ViewState::default();
        view.sort_by(SortKey::Pid);
        assert_eq!(pids(&rank(&procs, &view)), vec![1, 2, 3]);
        view.reverse_sort();
        assert_eq!(pids(&rank(&procs, &view)), vec![3, 2, 1]);
    }

    #[test]
    fn filter_matches_name_or_command_case_insensitively() {
        let procs = vec![
            sample(1, "Chrome Helper", 1.0, 0),
            sample(2, "chromium", 2.0, 0),
            ProcessSample {
                command_line: "/usr/lib/CHROME/renderer".into(),
                ..sample(3, "renderer", 3.0, 0)
            },
        ];
        let mut view = ViewState::default();
        view.set_filter("chrome");
        assert_eq!(pids(&rank(&procs, &view)), vec![3, 1]);

        view.set_filter("chrom");
        assert_eq!(pids(&rank(&procs, &view)), vec![3, 2, 1]);
    }

    #[test]
    fn truncation_happens_after_sort() {
        let procs: Vec<ProcessSample> = (1..=10)
            .map(|i| sample(i, &format!("p{i}"), i as f64, 0))
            .collect();
        let view = ViewState::new(SortKey::Cpu, 3, 1000);
        assert_eq!(pids(&rank(&procs, &view)), vec![10, 9, 8]);
    }

    #[test]
    fn power_sort_is_descending_by_default() {
        let procs = vec![sample(1, "a", 10.0, 0), sample(2, "b", 90.0, 0)];
        let mut view = ViewState::default();
        view.sort_by(SortKey::Power);
        insta::assert_snapshot!(format!("{:?}", pids(&rank(&procs, &view))), @"[2, 1]");
    }
}
