use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, Signal, System};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KillResult {
    Success(u32, &'static str),
    Failed(u32, String),
    NotFound(u32),
}

impl KillResult {
    pub fn is_success(&self) -> bool {
        matches!(self, KillResult::Success(..))
    }

    pub fn message(&self) -> String {
        match self {
            KillResult::Success(pid, signal) => format!("Sent {signal} to PID {pid}"),
            KillResult::Failed(_, err) => err.clone(),
            KillResult::NotFound(pid) => format!("Process {pid} not found"),
        }
    }
}

fn default_signal() -> Signal {
    #[cfg(target_os = "windows")]
    {
        Signal::Kill
    }
    #[cfg(not(target_os = "windows"))]
    {
        Signal::Term
    }
}

/// Looks the pid up in a fresh process table and sends it the platform's
/// default termination signal.
pub fn terminate(pid: u32) -> KillResult {
    let mut sys = System::new();
    let sysinfo_pid = Pid::from_u32(pid);
    sys.refresh_processes_specifics(
        ProcessesToUpdate::Some(&[sysinfo_pid]),
        true,
        ProcessRefreshKind::nothing(),
    );
    kill_process(&sys, pid, default_signal())
}

pub fn kill_process(sys: &System, pid: u32, signal: Signal) -> KillResult {
    let sysinfo_pid = Pid::from_u32(pid);
    match sys.process(sysinfo_pid) {
        Some(process) => {
            let signal_name = match signal {
                Signal::Term => "SIGTERM",
                Signal::Kill => "SIGKILL",
                _ => "signal",
            };
            match process.kill_with(signal) {
                Some(true) => KillResult::Success(pid, signal_name),
                Some(false) => {
                    KillResult::Failed(pid, format!("Failed to send {signal_name} to PID {pid}"))
                }
                None => {
                    // Signal not supported on this platform, fall back to kill()
                    if process.kill() {
                        KillResult::Success(pid, signal_name)
                    } else {
                        KillResult::Failed(
                            pid,
                            format!("Failed to kill PID {pid} (permission denied?)"),
                        )
                    }
                }
            }
        }
        None => KillResult::NotFound(pid),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_describe_outcome() {
        assert_eq!(
            KillResult::Success(7, "SIGTERM").message(),
            "Sent SIGTERM to PID 7"
        );
        assert_eq!(KillResult::NotFound(9).message(), "Process 9 not found");
        assert!(!KillResult::Failed(3, "nope".into()).is_success());
    }
}
