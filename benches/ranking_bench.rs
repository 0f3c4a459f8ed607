use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use ratatui::Terminal;
use ratatui::backend::TestBackend;
use std::hint::black_box;
use wattop::power::PowerModel;
use wattop::ranking::rank;
use wattop::system::process::ProcessSample;
use wattop::system::snapshot::{HostInfo, SystemSnapshot};
use wattop::ui::theme::{ColorSupport, Theme, TierOverrides};
use wattop::ui::{Dashboard, draw};
use wattop::view::{SortKey, ViewState};

fn make_processes(n: usize) -> Vec<ProcessSample> {
    let power = PowerModel::default();
    (0..n)
        .map(|i| {
            let cpu = (i % 100) as f64 * 0.37;
            let mem = ((n - i) as u64 + 1) * 1024 * 1024;
            ProcessSample {
                pid: i as u32 + 1,
                name: format!("proc_{i}"),
                command_line: format!("/usr/bin/proc_{i} --work --id {i}"),
                cumulative_cpu_seconds: i as f64,
                instant_cpu_percent: cpu,
                mem_bytes: mem,
                est_watts: power.watts_for_bytes(cpu, mem),
            }
        })
        .collect()
}

fn make_theme() -> Theme {
    let tiers = TierOverrides {
        low: String::new(),
        mid: String::new(),
        high: String::new(),
    };
    Theme::from_config("dark", &tiers, ColorSupport::Truecolor)
}

fn bench_rank(c: &mut Criterion) {
    let mut group = c.benchmark_group("rank_500_1000_2000");

    for size in [500usize, 1000, 2000] {
        let processes = make_processes(size);
        for key in [SortKey::Cpu, SortKey::Name] {
            let mut view = ViewState::new(key, 50, 1000);
            view.set_filter("proc_1");
            let id = BenchmarkId::new(key.label(), size);
            group.bench_with_input(id, &processes, |b, processes| {
                b.iter(|| black_box(rank(black_box(processes), black_box(&view))))
            });
        }
    }

    group.finish();
}

fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw_500_1000_2000");
    let theme = make_theme();
    let host = HostInfo::default();
    let snapshot = SystemSnapshot::empty();
    let power = PowerModel::default();

    for size in [500usize, 1000, 2000] {
        let view = ViewState::new(SortKey::Cpu, size, 1000);
        let ranked = rank(&make_processes(size), &view);

        group.bench_with_input(BenchmarkId::from_parameter(size), &ranked, |b, ranked| {
            let dash = Dashboard {
                host: &host,
                snapshot: &snapshot,
                processes: ranked,
                battery: None,
                power_profile: None,
                view: &view,
                power: &power,
                prompt: None,
                status: None,
                theme: &theme,
            };
            b.iter(|| {
                let backend = TestBackend::new(160, 50);
                let mut terminal = Terminal::new(backend).expect("bench terminal init failed");
                terminal
                    .draw(|frame| draw(frame, black_box(&dash)))
                    .expect("bench draw failed");
                black_box(terminal.backend());
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_rank, bench_draw);
criterion_main!(benches);
