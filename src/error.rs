//! Runtime error kinds: parse errors surfaced from the loader, resolution
//! failures, dispatch failures, and runtime faults raised while executing
//! bytecode.

use std::error::Error;
use std::fmt::Display;

use classfile::ClassFormatError;

#[derive(Debug)]
pub enum VmError {
    /// A class artifact failed to parse while being resolved.
    Parse { class: String, source: ClassFormatError },
    /// No search-path entry yielded the named class, or its super.
    Resolution { class: String, detail: String },
    /// A method couldn't be found, or has neither a `Code` attribute nor a
    /// bound native.
    Dispatch { class: String, member: String, detail: String },
    /// A fault raised while executing bytecode: stack underflow, a typed
    /// pop against the wrong `Value` variant, integer division by zero, an
    /// unhandled opcode on a taken path.
    Runtime { detail: String, opcode: Option<u8> },
}

impl VmError {
    pub fn parse(class: impl Into<String>, source: ClassFormatError) -> VmError {
        VmError::Parse { class: class.into(), source }
    }

    pub fn resolution(class: impl Into<String>, detail: impl Into<String>) -> VmError {
        VmError::Resolution { class: class.into(), detail: detail.into() }
    }

    pub fn dispatch(
        class: impl Into<String>,
        member: impl Into<String>,
        detail: impl Into<String>,
    ) -> VmError {
        VmError::Dispatch { class: class.into(), member: member.into(), detail: detail.into() }
    }

    pub fn runtime(detail: impl Into<String>) -> VmError {
        VmError::Runtime { detail: detail.into(), opcode: None }
    }

    pub fn runtime_at(opcode: u8, detail: impl Into<String>) -> VmError {
        VmError::Runtime { detail: detail.into(), opcode: Some(opcode) }
    }
}

impl Display for VmError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VmError::Parse { class, source } => write!(f, "failed to parse class {class}: {source}"),
            VmError::Resolution { class, detail } => {
                write!(f, "could not resolve class {class}: {detail}")
            }
            VmError::Dispatch { class, member, detail } => {
                write!(f, "dispatch failure for {class}.{member}: {detail}")
            }
            VmError::Runtime { detail, opcode: Some(op) } => {
                write!(f, "runtime error at opcode {op:#04X}: {detail}")
            }
            VmError::Runtime { detail, opcode: None } => write!(f, "runtime error: {detail}"),
        }
    }
}

impl Error for VmError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            VmError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}
