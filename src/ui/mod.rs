pub mod header;
pub mod process_table;
pub mod statusbar;
pub mod theme;

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use crate::power::PowerModel;
use crate::prompt::Prompt;
use crate::system::process::ProcessSample;
use crate::system::snapshot::{HostInfo, SystemSnapshot};
use crate::system::source::BatteryInfo;
use crate::ui::theme::Theme;
use crate::view::ViewState;

/// Everything one frame depends on. Drawing is a pure function of this and
/// the frame size.
#[derive(Clone, Copy)]
pub struct Dashboard<'a> {
    pub host: &'a HostInfo,
    pub snapshot: &'a SystemSnapshot,
    /// Already filtered, sorted and truncated.
    pub processes: &'a [ProcessSample],
    pub battery: Option<&'a BatteryInfo>,
    pub power_profile: Option<&'a str>,
    pub view: &'a ViewState,
    pub power: &'a PowerModel,
    pub prompt: Option<&'a Prompt>,
    pub status: Option<&'a str>,
    pub theme: &'a Theme,
}

pub fn draw(frame: &mut Frame, dash: &Dashboard) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(header::HEIGHT),
            Constraint::Min(1),
            Constraint::Length(1),
        ])
        .split(frame.area());

    header::render(frame, chunks[0], dash);
    process_table::render(frame, chunks[1], dash);
    statusbar::render(frame, chunks[2], dash);
}
