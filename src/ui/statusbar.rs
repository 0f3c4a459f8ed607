use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;

use crate::ui::Dashboard;
use crate::ui::theme::Theme;

const KEY_HINTS: [(&str, &str); 10] = [
    ("q", "Quit"),
    ("c", "CPU"),
    ("m", "Mem"),
    ("p", "PID"),
    ("n", "Name"),
    ("w", "Power"),
    ("r", "Reverse"),
    ("+/-", "Rate"),
    ("/", "Filter"),
    ("k", "Kill"),
];

/// Bottom line: active prompt, else a pending status message, else key hints.
pub fn render(frame: &mut Frame, area: Rect, dash: &Dashboard) {
    let theme = dash.theme;
    let bg_style = Style::default().bg(theme.statusbar_bg);

    let line = if let Some(prompt) = dash.prompt {
        let mut spans = vec![
            Span::styled(
                format!(" {}", prompt.label()),
                Style::default()
                    .fg(theme.pill_key_bg)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled(prompt.buffer.clone(), Style::default().fg(theme.pill_desc_fg)),
            Span::styled("\u{2588}", Style::default().fg(theme.pill_key_bg)),
        ];
        spans.extend(pill_spans("Enter", "Submit", theme));
        spans.extend(pill_spans("Esc", "Cancel", theme));
        Line::from(spans)
    } else if let Some(msg) = dash.status {
        let color = if msg.starts_with("Sent") {
            theme.status_ok
        } else {
            theme.status_err
        };
        Line::from(Span::styled(
            format!(" {msg}"),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ))
    } else {
        Line::from(
            KEY_HINTS
                .iter()
                .flat_map(|(key, desc)| pill_spans(key, desc, theme))
                .collect::<Vec<_>>(),
        )
    };

    frame.render_widget(Paragraph::new(line).style(bg_style), area);
}

fn pill_spans<'a>(key: &'a str, desc: &'a str, theme: &Theme) -> Vec<Span<'a>> {
    vec![
        Span::raw(" "),
        Span::styled(
            format!(" {key} "),
            Style::default()
                .fg(theme.pill_key_fg)
                .bg(theme.pill_key_bg)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!(" {desc}"),
            Style::default().fg(theme.pill_desc_fg).bg(theme.surface_bg),
        ),
    ]
}
