use bitflags::bitflags;

bitflags! {
    /// [Class access flags](https://docs.oracle.com/javase/specs/jvms/se17/jvms17.pdf#page=85)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ClassAccessFlags: u16 {
        const PUBLIC     = 0x0001;
        const FINAL      = 0x0010;
        /// Treat superclass methods specially when invoked by invokespecial.
        const SUPER      = 0x0020;
        const INTERFACE  = 0x0200;
        const ABSTRACT   = 0x0400;
        const SYNTHETIC  = 0x1000;
        const ANNOTATION = 0x2000;
        const ENUM       = 0x4000;
        const MODULE     = 0x8000;
    }
}

bitflags! {
    /// [Field access flags](https://docs.oracle.com/javase/specs/jvms/se17/jvms17.pdf#page=95)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct FieldAccessFlags: u16 {
        const PUBLIC    = 0x0001;
        const PRIVATE   = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC    = 0x0008;
        const FINAL     = 0x0010;
        const VOLATILE  = 0x0040;
        const TRANSIENT = 0x0080;
        const SYNTHETIC = 0x1000;
        const ENUM      = 0x4000;
    }
}

bitflags! {
    /// [Method access flags](https://docs.oracle.com/javase/specs/jvms/se17/jvms17.pdf#page=112)
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct MethodAccessFlags: u16 {
        const PUBLIC       = 0x0001;
        const PRIVATE      = 0x0002;
        const PROTECTED    = 0x0004;
        const STATIC       = 0x0008;
        const FINAL        = 0x0010;
        const SYNCHRONIZED = 0x0020;
        const BRIDGE       = 0x0040;
        const VARARGS      = 0x0080;
        const NATIVE       = 0x0100;
        const ABSTRACT     = 0x0400;
        const STRICT       = 0x0800;
        const SYNTHETIC    = 0x1000;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_combined_flags() {
        let flags = MethodAccessFlags::from_bits_truncate(0x0009);
        assert!(flags.contains(MethodAccessFlags::PUBLIC));
        assert!(flags.contains(MethodAccessFlags::STATIC));
        assert!(!flags.contains(MethodAccessFlags::FINAL));
    }
}
