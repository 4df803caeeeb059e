use std::fmt;

/// Legacy Linux `int 0x80` services, keyed by the value of `eax`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syscall {
    Exit = 1,
    Fork = 2,
    Read = 3,
    Write = 4,
}

impl Syscall {
    pub const VECTOR: u64 = 0x80;

    pub fn from_number(number: u32) -> Option<Self> {
        match number {
            1 => Some(Syscall::Exit),
            2 => Some(Syscall::Fork),
            3 => Some(Syscall::Read),
            4 => Some(Syscall::Write),
            _ => None,
        }
    }

    pub fn number(self) -> u32 {
        self as u32
    }

    pub fn name(self) -> &'static str {
        match self {
            Syscall::Exit => "sys_exit",
            Syscall::Fork => "sys_fork",
            Syscall::Read => "sys_read",
            Syscall::Write => "sys_write",
        }
    }
}

impl fmt::Display for Syscall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
