use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use unicode_width::UnicodeWidthStr;

use crate::format::{fit_left, format_bytes, format_watts, truncate_hard};
use crate::ui::Dashboard;
use crate::ui::theme::{Theme, Tier};

pub const HEIGHT: u16 = 5;

const APP_LABEL: &str = " wattop ";
const GAUGE_WIDTH: usize = 30;
const GAUGE_LABEL_WIDTH: usize = 4;
const FILLED: char = '█';
const EMPTY: char = '░';

pub fn render(frame: &mut Frame, area: Rect, dash: &Dashboard) {
    let width = area.width as usize;
    let theme = dash.theme;
    let snapshot = dash.snapshot;

    let cpu_pct = snapshot.cpu_percent_clamped();
    let mem_pct = snapshot.mem_percent();
    let mem_detail = format!(
        "  {} / {}",
        format_bytes(snapshot.used_mem_bytes),
        format_bytes(snapshot.total_mem_bytes)
    );

    let lines = vec![
        title_line(dash, width),
        gauge_line("CPU", cpu_pct, Tier::for_cpu(cpu_pct), String::new(), width, theme),
        gauge_line("MEM", mem_pct, Tier::for_memory(mem_pct), mem_detail, width, theme),
        power_line(dash),
        view_line(dash),
    ];

    frame.render_widget(Paragraph::new(lines), area);
}

fn title_line<'a>(dash: &Dashboard<'a>, width: usize) -> Line<'a> {
    let theme = dash.theme;
    let suffix = format!(
        "  {} cores  up {}",
        dash.host.logical_cores, dash.snapshot.uptime
    );
    let model_width = width.saturating_sub(APP_LABEL.width() + 1 + suffix.width());
    let model = truncate_hard(&dash.host.cpu_model, model_width);

    Line::from(vec![
        Span::styled(
            APP_LABEL,
            Style::default()
                .fg(theme.header_accent_fg)
                .bg(theme.header_accent_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::styled(model, Style::default().fg(theme.text_primary)),
        Span::styled(suffix, Style::default().fg(theme.text_secondary)),
    ])
}

/// Splits a bar of `width` cells into filled and empty runs.
pub fn meter(percent: f64, width: usize) -> (usize, usize) {
    let pct = crate::system::snapshot::clamp_percent(percent);
    let filled = ((pct / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    (filled, width - filled)
}

fn gauge_line(
    label: &'static str,
    percent: f64,
    tier: Tier,
    detail: String,
    width: usize,
    theme: &Theme,
) -> Line<'static> {
    let pct_text = format!(" {percent:5.1}%");
    let room = width.saturating_sub(GAUGE_LABEL_WIDTH + pct_text.width() + detail.width());
    let bar_width = GAUGE_WIDTH.min(room);
    let (filled, empty) = meter(percent, bar_width);
    let color = theme.tier(tier);

    Line::from(vec![
        Span::styled(
            fit_left(label, GAUGE_LABEL_WIDTH),
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(FILLED.to_string().repeat(filled), Style::default().fg(color)),
        Span::styled(
            EMPTY.to_string().repeat(empty),
            Style::default().fg(theme.gauge_unfilled),
        ),
        Span::styled(pct_text, Style::default().fg(color).add_modifier(Modifier::BOLD)),
        Span::styled(detail, Style::default().fg(theme.text_secondary)),
    ])
}

fn power_line<'a>(dash: &Dashboard<'a>) -> Line<'a> {
    let theme = dash.theme;
    let snapshot = dash.snapshot;

    let battery = match dash.battery {
        Some(info) => match info.charge_percent {
            Some(pct) => format!("{pct}% {}", info.status.label()),
            None => info.status.label().to_string(),
        },
        None => "none".to_string(),
    };
    let profile = dash.power_profile.unwrap_or("N/A");

    Line::from(vec![
        Span::styled(
            "Power ≈ ",
            Style::default()
                .fg(theme.text_secondary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format_watts(snapshot.est_total_watts),
            Style::default()
                .fg(theme.text_primary)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(
                " (CPU {} + MEM {})",
                format_watts(snapshot.cpu_watts),
                format_watts(snapshot.mem_watts)
            ),
            Style::default().fg(theme.text_secondary),
        ),
        Span::styled(
            format!("  Battery: {battery}  Profile: {profile}"),
            Style::default().fg(theme.text_secondary),
        ),
    ])
}

fn view_line<'a>(dash: &Dashboard<'a>) -> Line<'a> {
    let theme = dash.theme;
    let view = dash.view;
    let arrow = if view.sort_descending { '▼' } else { '▲' };
    let filter = if view.filter.is_empty() {
        "none"
    } else {
        view.filter.as_str()
    };

    Line::from(vec![
        Span::styled(
            format!("Procs {}", dash.snapshot.process_count),
            Style::default().fg(theme.text_primary),
        ),
        Span::styled(
            format!("  Sort {} {arrow}", view.sort_key.label()),
            Style::default().fg(theme.text_primary),
        ),
        Span::styled(
            format!("  Filter: {filter}"),
            Style::default().fg(theme.text_secondary),
        ),
        Span::styled(
            format!(
                "  Refresh {} ms  Top {}",
                view.refresh_interval_ms(),
                view.top_n
            ),
            Style::default().fg(theme.text_secondary),
        ),
    ])
}
