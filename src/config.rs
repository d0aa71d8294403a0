use std::sync::OnceLock;

fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .map(|v| matches!(v.as_str(), "1" | "true" | "TRUE" | "on" | "ON"))
        .unwrap_or(default)
}

pub fn halt_on_unknown() -> bool {
    static ON: OnceLock<bool> = OnceLock::new();
    *ON.get_or_init(|| env_flag("CPU_HALT_ON_UNKNOWN", false))
}

pub fn corrected_rts() -> bool {
    static ON: OnceLock<bool> = OnceLock::new();
    *ON.get_or_init(|| env_flag("CPU_CORRECTED_RTS", false))
}

/// What `run` does when it fetches a byte with no table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownOpcodePolicy {
    /// Report through `log::warn!` and treat the next byte as an opcode.
    #[default]
    LogAndContinue,
    /// Report through `log::error!` and return from `run` immediately.
    Halt,
}

/// Return-from-subroutine behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RtsMode {
    /// Reads the zero-page byte at address SP twice and leaves SP alone.
    /// Reproduces the legacy core bit for bit.
    #[default]
    Legacy,
    /// Pops the two bytes JSR pushed from page 1 and restores SP.
    Corrected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CpuConfig {
    pub unknown_opcode: UnknownOpcodePolicy,
    pub rts: RtsMode,
}

impl CpuConfig {
    pub fn from_env() -> Self {
        CpuConfig {
            unknown_opcode: if halt_on_unknown() {
                UnknownOpcodePolicy::Halt
            } else {
                UnknownOpcodePolicy::LogAndContinue
            },
            rts: if corrected_rts() {
                RtsMode::Corrected
            } else {
                RtsMode::Legacy
            },
        }
    }

    pub fn corrected() -> Self {
        CpuConfig {
            rts: RtsMode::Corrected,
            ..Self::default()
        }
    }
}
