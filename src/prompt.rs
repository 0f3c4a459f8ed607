/// Which question the bottom line is asking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptKind {
    Filter,
    KillPid,
    KillConfirm(u32),
}

/// A single-line text prompt. At most one is active at a time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub kind: PromptKind,
    pub buffer: String,
}

/// What the app should do once a prompt is submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome {
    SetFilter(String),
    /// Chain into the confirmation prompt for this pid.
    Confirm(u32),
    Kill(u32),
    Status(String),
}

impl Prompt {
    pub fn new(kind: PromptKind) -> Self {
        Prompt {
            kind,
            buffer: String::new(),
        }
    }

    pub fn label(&self) -> String {
        match self.kind {
            PromptKind::Filter => "Filter: ".to_string(),
            PromptKind::KillPid => "Kill PID: ".to_string(),
            PromptKind::KillConfirm(pid) => format!("Kill {pid}? (y/N): "),
        }
    }

    pub fn push(&mut self, c: char) {
        if !c.is_control() {
            self.buffer.push(c);
        }
    }

    pub fn backspace(&mut self) {
        self.buffer.pop();
    }

    pub fn submit(self) -> PromptOutcome {
        let input = self.buffer.trim();
        match self.kind {
            PromptKind::Filter => PromptOutcome::SetFilter(input.to_string()),
            PromptKind::KillPid => match input.parse::<u32>() {
                Ok(pid) if pid > 0 => PromptOutcome::Confirm(pid),
                _ if input.is_empty() => PromptOutcome::Status("Kill cancelled".to_string()),
                _ => PromptOutcome::Status(format!("Invalid PID: {input}")),
            },
            PromptKind::KillConfirm(pid) => {
                if input.to_lowercase().starts_with('y') {
                    PromptOutcome::Kill(pid)
                } else {
                    PromptOutcome::Status(format!("Kill of {pid} cancelled"))
                }
            }
        }
    }
}
