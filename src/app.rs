use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::action::Action;
use crate::config::Config;
use crate::power::PowerModel;
use crate::prompt::{Prompt, PromptKind, PromptOutcome};
use crate::ranking::rank;
use crate::scheduler::TickData;
use crate::system::kill::KillResult;
use crate::system::process::ProcessSample;
use crate::system::snapshot::HostInfo;
use crate::ui::Dashboard;
use crate::ui::theme::{Theme, TierOverrides, resolve_color_support};
use crate::view::{SortKey, ViewState};

pub const STATUS_TTL: Duration = Duration::from_secs(3);

/// Interactive state: what the user asked to see, plus the latest tick.
pub struct App {
    pub running: bool,
    pub view: ViewState,
    pub prompt: Option<Prompt>,
    pub status_message: Option<(String, Instant)>,
    pub theme: Theme,
    pub power: PowerModel,
    pub host: HostInfo,
    pub data: TickData,
    ranked: Vec<ProcessSample>,
    kill_request: Option<u32>,
}

impl App {
    pub fn new(config: &Config, host: HostInfo) -> Self {
        let color_support = resolve_color_support(&config.colors.color_support);
        let tiers = TierOverrides::from_config(&config.colors);
        let theme = Theme::from_config(&config.colors.theme, &tiers, color_support);

        App {
            running: true,
            view: config.view_state(),
            prompt: None,
            status_message: None,
            theme,
            power: config.power_model(),
            host,
            data: TickData::default(),
            ranked: Vec::new(),
            kill_request: None,
        }
    }

    pub fn apply_tick(&mut self, data: TickData) {
        self.data = data;
        self.expire_status(Instant::now());
        self.rerank();
    }

    pub fn ranked(&self) -> &[ProcessSample] {
        &self.ranked
    }

    pub fn dashboard(&self) -> Dashboard<'_> {
        Dashboard {
            host: &self.host,
            snapshot: &self.data.snapshot,
            processes: &self.ranked,
            battery: self.data.battery.as_ref(),
            power_profile: self.data.power_profile.as_deref(),
            view: &self.view,
            power: &self.power,
            prompt: self.prompt.as_ref(),
            status: self.status_message.as_ref().map(|(msg, _)| msg.as_str()),
            theme: &self.theme,
        }
    }

    pub fn map_key(&self, key: KeyEvent) -> Action {
        // Ctrl+C always quits, even mid-prompt
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Action::Quit;
        }

        if self.prompt.is_some() {
            return map_key_prompt(key);
        }

        match key.code {
            KeyCode::Char('q') => Action::Quit,
            KeyCode::Char('c') => Action::SortBy(SortKey::Cpu),
            KeyCode::Char('m') => Action::SortBy(SortKey::Mem),
            KeyCode::Char('p') => Action::SortBy(SortKey::Pid),
            KeyCode::Char('n') => Action::SortBy(SortKey::Name),
            KeyCode::Char('w') => Action::SortBy(SortKey::Power),
            KeyCode::Char('r') => Action::ReverseSort,
            KeyCode::Char('+') => Action::Faster,
            KeyCode::Char('-') => Action::Slower,
            KeyCode::Char('/') => Action::OpenFilterPrompt,
            KeyCode::Char('k') => Action::OpenKillPrompt,
            _ => Action::None,
        }
    }

    pub fn dispatch(&mut self, action: Action) {
        match action {
            Action::Quit => self.running = false,
            Action::SortBy(key) => self.view.sort_by(key),
            Action::ReverseSort => self.view.reverse_sort(),
            Action::Faster => self.view.faster(),
            Action::Slower => self.view.slower(),
            Action::OpenFilterPrompt => self.open_prompt(PromptKind::Filter),
            Action::OpenKillPrompt => self.open_prompt(PromptKind::KillPid),
            Action::PromptInput(c) => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.push(c);
                }
            }
            Action::PromptBackspace => {
                if let Some(prompt) = self.prompt.as_mut() {
                    prompt.backspace();
                }
            }
            Action::PromptSubmit => {
                if let Some(prompt) = self.prompt.take() {
                    self.handle_outcome(prompt.submit());
                }
            }
            Action::PromptCancel => self.prompt = None,
            Action::None => {}
        }
        self.rerank();
    }

    /// Hands a confirmed kill to the caller, which owns the process killer.
    pub fn take_kill_request(&mut self) -> Option<u32> {
        self.kill_request.take()
    }

    pub fn set_kill_status(&mut self, result: KillResult) {
        if result.is_success() {
            tracing::info!(?result, "kill request completed");
        } else {
            tracing::warn!(?result, "kill request failed");
        }
        self.set_status(result.message());
    }

    pub fn set_status(&mut self, message: impl Into<String>) {
        self.status_message = Some((message.into(), Instant::now()));
    }

    pub fn expire_status(&mut self, now: Instant) {
        if let Some((_, created)) = &self.status_message
            && now.saturating_duration_since(*created) >= STATUS_TTL
        {
            self.status_message = None;
        }
    }

    fn open_prompt(&mut self, kind: PromptKind) {
        if self.prompt.is_none() {
            self.prompt = Some(Prompt::new(kind));
        }
    }

    fn handle_outcome(&mut self, outcome: PromptOutcome) {
        match outcome {
            PromptOutcome::SetFilter(text) => self.view.set_filter(&text),
            PromptOutcome::Confirm(pid) => {
                self.prompt = Some(Prompt::new(PromptKind::KillConfirm(pid)));
            }
            PromptOutcome::Kill(pid) => self.kill_request = Some(pid),
            PromptOutcome::Status(message) => self.set_status(message),
        }
    }

    fn rerank(&mut self) {
        self.ranked = rank(&self.data.processes, &self.view);
    }
}

fn map_key_prompt(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc => Action::PromptCancel,
        KeyCode::Enter => Action::PromptSubmit,
        KeyCode::Backspace => Action::PromptBackspace,
        KeyCode::Char(c) => Action::PromptInput(c),
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        App::new(&Config::default(), HostInfo::default())
    }

    fn press(app: &mut App, code: KeyCode) {
        let action = app.map_key(KeyEvent::new(code, KeyModifiers::NONE));
        app.dispatch(action);
    }

    fn type_text(app: &mut App, text: &str) {
        text.chars().for_each(|c| press(app, KeyCode::Char(c)));
    }

    fn sample(pid: u32, name: &str, cpu: f64) -> ProcessSample {
        ProcessSample {
            pid,
            name: name.to_string(),
            command_line: name.to_string(),
            cumulative_cpu_seconds: 0.0,
            instant_cpu_percent: cpu,
            mem_bytes: 0,
            est_watts: 0.0,
        }
    }

    #[test]
    fn default_keys_map_to_actions() {
        let app = test_app();
        let key = |c| app.map_key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE));

        assert_eq!(key('q'), Action::Quit);
        assert_eq!(key('c'), Action::SortBy(SortKey::Cpu));
        assert_eq!(key('m'), Action::SortBy(SortKey::Mem));
        assert_eq!(key('p'), Action::SortBy(SortKey::Pid));
        assert_eq!(key('n'), Action::SortBy(SortKey::Name));
        assert_eq!(key('w'), Action::SortBy(SortKey::Power));
        assert_eq!(key('r'), Action::ReverseSort);
        assert_eq!(key('+'), Action::Faster);
        assert_eq!(key('-'), Action::Slower);
        assert_eq!(key('/'), Action::OpenFilterPrompt);
        assert_eq!(key('k'), Action::OpenKillPrompt);
        assert_eq!(key('x'), Action::None);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.map_key(ctrl_c), Action::Quit);
    }

    #[test]
    fn prompt_captures_every_key() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('k'));
        assert!(app.prompt.is_some());

        // A second 'k' or '/' is text, not a re-entry
        let k = app.map_key(KeyEvent::new(KeyCode::Char('k'), KeyModifiers::NONE));
        assert_eq!(k, Action::PromptInput('k'));
        let q = app.map_key(KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE));
        assert_eq!(q, Action::PromptInput('q'));
        type_text(&mut app, "/k");
        assert_eq!(app.prompt.as_ref().map(|p| p.buffer.as_str()), Some("/k"));
        assert!(app.running);

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(app.map_key(ctrl_c), Action::Quit);
    }

    #[test]
    fn kill_flow_confirms_before_requesting() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('k'));
        type_text(&mut app, "42");
        press(&mut app, KeyCode::Enter);
        assert_eq!(
            app.prompt.as_ref().map(|p| p.kind),
            Some(PromptKind::KillConfirm(42))
        );
        assert_eq!(app.take_kill_request(), None);

        type_text(&mut app, "Yes");
        press(&mut app, KeyCode::Enter);
        assert!(app.prompt.is_none());
        assert_eq!(app.take_kill_request(), Some(42));
        assert_eq!(app.take_kill_request(), None);
    }

    #[test]
    fn declined_or_invalid_kill_only_reports() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('k'));
        type_text(&mut app, "42");
        press(&mut app, KeyCode::Enter);
        type_text(&mut app, "n");
        press(&mut app, KeyCode::Enter);
        assert!(app.prompt.is_none());
        assert_eq!(app.take_kill_request(), None);
        assert!(app.status_message.is_some());

        press(&mut app, KeyCode::Char('k'));
        type_text(&mut app, "abc");
        press(&mut app, KeyCode::Enter);
        assert!(app.prompt.is_none());
        assert_eq!(app.take_kill_request(), None);
        assert_eq!(
            app.status_message.as_ref().map(|(m, _)| m.as_str()),
            Some("Invalid PID: abc")
        );

        // Normal key capture is back
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.view.sort_key, SortKey::Name);
    }

    #[test]
    fn escape_cancels_without_changing_filter() {
        let mut app = test_app();
        app.view.set_filter("ssh");
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "chrome");
        press(&mut app, KeyCode::Esc);
        assert!(app.prompt.is_none());
        assert_eq!(app.view.filter, "ssh");
    }

    #[test]
    fn filter_prompt_reranks() {
        let mut app = test_app();
        app.apply_tick(TickData {
            processes: vec![sample(1, "bash", 1.0), sample(2, "Chrome", 2.0)],
            ..TickData::default()
        });
        assert_eq!(app.ranked().len(), 2);

        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, " chrome ");
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view.filter, "chrome");
        let pids: Vec<u32> = app.ranked().iter().map(|p| p.pid).collect();
        assert_eq!(pids, vec![2]);

        // Empty submission clears
        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Enter);
        assert!(app.view.filter.is_empty());
        assert_eq!(app.ranked().len(), 2);
    }

    #[test]
    fn backspace_edits_prompt_text() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "sshd");
        press(&mut app, KeyCode::Backspace);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.view.filter, "ssh");
    }

    #[test]
    fn kill_status_is_shown_then_expires() {
        let mut app = test_app();
        app.set_kill_status(KillResult::NotFound(99));
        assert_eq!(
            app.status_message.as_ref().map(|(m, _)| m.as_str()),
            Some("Process 99 not found")
        );

        let created = app.status_message.as_ref().map(|(_, at)| *at).unwrap();
        app.expire_status(created + Duration::from_secs(2));
        assert!(app.status_message.is_some());
        app.expire_status(created + STATUS_TTL);
        assert!(app.status_message.is_none());
    }

    #[test]
    fn refresh_keys_respect_bounds() {
        let mut app = test_app();
        for _ in 0..50 {
            press(&mut app, KeyCode::Char('+'));
        }
        assert_eq!(app.view.refresh_interval_ms(), crate::view::MIN_REFRESH_MS);
        for _ in 0..100 {
            press(&mut app, KeyCode::Char('-'));
        }
        assert_eq!(app.view.refresh_interval_ms(), crate::view::MAX_REFRESH_MS);
    }
}
