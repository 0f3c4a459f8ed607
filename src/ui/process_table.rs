use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::format::{fit_left, fit_right, format_bytes, format_watts};
use crate::system::process::ProcessSample;
use crate::ui::Dashboard;
use crate::ui::theme::{Theme, Tier};

const PID_WIDTH: usize = 7;
const NAME_WIDTH: usize = 24;
const MIN_NAME_WIDTH: usize = 8;
const CPU_WIDTH: usize = 7;
const MEM_WIDTH: usize = 10;
const WATTS_WIDTH: usize = 8;
const MIN_COMMAND_WIDTH: usize = 10;
const SEPARATORS: usize = 5;

/// Column widths for one terminal width. COMMAND takes whatever is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub pid: usize,
    pub name: usize,
    pub cpu: usize,
    pub mem: usize,
    pub watts: usize,
    pub command: usize,
}

impl Columns {
    pub fn for_width(width: usize) -> Self {
        let fixed = PID_WIDTH + CPU_WIDTH + MEM_WIDTH + WATTS_WIDTH + SEPARATORS;
        // NAME gives up space before COMMAND drops below its minimum
        let name = width
            .saturating_sub(fixed + MIN_COMMAND_WIDTH)
            .clamp(MIN_NAME_WIDTH, NAME_WIDTH);
        let command = width.saturating_sub(fixed + name).max(MIN_COMMAND_WIDTH);

        Columns {
            pid: PID_WIDTH,
            name,
            cpu: CPU_WIDTH,
            mem: MEM_WIDTH,
            watts: WATTS_WIDTH,
            command,
        }
    }

    fn cells(&self, pid: &str, name: &str, cpu: &str, mem: &str, watts: &str, command: &str) -> [String; 6] {
        [
            fit_right(pid, self.pid),
            fit_left(name, self.name),
            fit_right(cpu, self.cpu),
            fit_right(mem, self.mem),
            fit_right(watts, self.watts),
            fit_left(command, self.command),
        ]
    }
}

pub fn render(frame: &mut Frame, area: Rect, dash: &Dashboard) {
    let columns = Columns::for_width(area.width as usize);
    let theme = dash.theme;

    let mut lines = Vec::with_capacity(dash.processes.len() + 1);
    lines.push(header_row(&columns, theme));

    if dash.processes.is_empty() {
        let msg = if dash.view.filter.is_empty() {
            " No processes"
        } else {
            " No processes match the filter"
        };
        lines.push(Line::from(Span::styled(
            msg,
            Style::default().fg(theme.text_secondary),
        )));
    }

    lines.extend(
        dash.processes
            .iter()
            .map(|p| process_row(p, &columns, dash.power.cpu_tdp_watts, theme)),
    );

    frame.render_widget(Paragraph::new(lines), area);
}

fn header_row(columns: &Columns, theme: &Theme) -> Line<'static> {
    let text = columns
        .cells("PID", "NAME", "CPU%", "MEM", "WATTS", "COMMAND")
        .join(" ");
    Line::from(Span::styled(
        text,
        Style::default()
            .fg(theme.table_header_fg)
            .bg(theme.table_header_bg)
            .add_modifier(Modifier::BOLD),
    ))
}

fn process_row(p: &ProcessSample, columns: &Columns, cpu_tdp_watts: f64, theme: &Theme) -> Line<'static> {
    let row_style = match Tier::for_process(p.instant_cpu_percent, p.est_watts, cpu_tdp_watts) {
        Tier::Low => Style::default().fg(theme.text_primary),
        tier => Style::default()
            .fg(theme.tier(tier))
            .add_modifier(Modifier::BOLD),
    };
    let cpu_style = Style::default().fg(theme.tier(Tier::for_cpu(p.instant_cpu_percent)));

    let [pid, name, cpu, mem, watts, command] = columns.cells(
        &p.pid.to_string(),
        &p.name,
        &format!("{:.1}", p.instant_cpu_percent),
        &format_bytes(p.mem_bytes),
        &format_watts(p.est_watts),
        &p.command_line,
    );

    Line::from(vec![
        Span::styled(pid, row_style),
        Span::raw(" "),
        Span::styled(name, row_style),
        Span::raw(" "),
        Span::styled(cpu, cpu_style),
        Span::raw(" "),
        Span::styled(mem, row_style),
        Span::raw(" "),
        Span::styled(watts, row_style),
        Span::raw(" "),
        Span::styled(command, Style::default().fg(theme.text_secondary)),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_terminal_gives_command_the_rest() {
        let cols = Columns::for_width(120);
        assert_eq!(cols.name, NAME_WIDTH);
        assert_eq!(
            cols.pid + cols.name + cols.cpu + cols.mem + cols.watts + cols.command + SEPARATORS,
            120
        );
    }

    #[test]
    fn narrow_terminal_keeps_command_minimum() {
        let cols = Columns::for_width(60);
        assert!(cols.command >= MIN_COMMAND_WIDTH);
        assert!(cols.name < NAME_WIDTH);

        let cols = Columns::for_width(20);
        assert_eq!(cols.name, MIN_NAME_WIDTH);
        assert_eq!(cols.command, MIN_COMMAND_WIDTH);
    }

    #[test]
    fn cells_are_hard_cut() {
        let cols = Columns::for_width(80);
        let cells = cols.cells("1", "a-very-long-process-name-indeed", "0.0", "1 B", "0.0 W", "cmd");
        assert_eq!(cells[1].chars().count(), cols.name);
        assert!(!cells[1].contains('…'));
    }
}
