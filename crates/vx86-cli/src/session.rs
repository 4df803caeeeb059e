use vx86_isa::{Effect, Engine, Outcome, X86Error};

use crate::config::DisplayRadix;

/// Bytes each recorded instruction occupies in the prompt's address counter.
const INSTRUCTION_STRIDE: usize = 4;

/// Everything one input line produced, for the caller to print.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Reply {
    pub output: Vec<String>,
    pub warnings: Vec<String>,
    pub error: Option<X86Error>,
    /// Set by `sys_exit`; carries `ebx`.
    pub exit: Option<u32>,
}

/// One interactive session: an engine plus the listing of instruction lines entered so far.
#[derive(Debug, Default)]
pub struct Session {
    engine: Engine,
    listing: Vec<String>,
    radix: DisplayRadix,
}

impl Session {
    pub fn new(radix: DisplayRadix) -> Self {
        Self {
            radix,
            ..Self::default()
        }
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn listing(&self) -> &[String] {
        &self.listing
    }

    pub fn address(&self) -> usize {
        self.listing.len() * INSTRUCTION_STRIDE
    }

    pub fn prompt(&self) -> String {
        format!("0x{:08X}    ", self.address())
    }

    pub fn handle_line(&mut self, line: &str) -> Reply {
        let code = line.split(';').next().unwrap_or_default();
        let tokens: Vec<&str> = code.split_whitespace().collect();
        let Some((&command, args)) = tokens.split_first() else {
            return Reply::default();
        };

        match command {
            "regs" => {
                let dump = self.engine.registers().to_string();
                return Reply {
                    output: dump.lines().map(str::to_owned).collect(),
                    ..Reply::default()
                };
            }
            "listing" => {
                return Reply {
                    output: self
                        .listing
                        .iter()
                        .enumerate()
                        .map(|(i, line)| format!("0x{:08X}    {line}", i * INSTRUCTION_STRIDE))
                        .collect(),
                    ..Reply::default()
                };
            }
            _ => {}
        }

        // Instruction lines take an address even when they fail.
        if Engine::is_operation(command) {
            self.listing.push(tokens.join(" "));
        }

        match self.engine.execute(command, args) {
            Ok(Outcome::Register { value, .. }) => Reply {
                output: vec![self.radix.format(value)],
                ..Reply::default()
            },
            Ok(Outcome::Executed {
                warnings, effect, ..
            }) => {
                let mut reply = Reply {
                    warnings: warnings.iter().map(ToString::to_string).collect(),
                    ..Reply::default()
                };
                match effect {
                    Some(Effect::Exit { status }) => reply.exit = Some(status),
                    Some(Effect::Write { fd, buf, count }) => {
                        tracing::debug!(fd, buf, count, "sys_write acknowledged");
                    }
                    None => {}
                }
                reply
            }
            Err(err) => {
                tracing::debug!(%err, line = code.trim(), "command failed");
                Reply {
                    error: Some(err),
                    ..Reply::default()
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use vx86_isa::{SyntaxError, X86Error};
    use vx86_regs::Gpr;

    use super::*;

    #[test]
    fn prompt_advances_per_instruction_line() {
        let mut session = Session::default();
        assert_eq!(session.prompt(), "0x00000000    ");

        session.handle_line("mov eax, 1");
        assert_eq!(session.prompt(), "0x00000004    ");

        // Failed instructions are still recorded; reads and blanks are not.
        session.handle_line("mov foo, 1");
        session.handle_line("eax");
        session.handle_line("   ");
        session.handle_line("; just a comment");
        assert_eq!(session.prompt(), "0x00000008    ");
        assert_eq!(session.listing(), ["mov eax, 1", "mov foo, 1"]);
    }

    #[test]
    fn comments_are_stripped() {
        let mut session = Session::default();
        let reply = session.handle_line("mov ecx, 7 ; load the counter");
        assert_eq!(reply, Reply::default());
        assert_eq!(session.engine().registers().read_dword(Gpr::Ecx), 7);
        assert_eq!(session.listing(), ["mov ecx, 7"]);
    }

    #[test]
    fn register_shortcut_prints_in_radix() {
        let mut session = Session::new(DisplayRadix::Hex);
        session.handle_line("mov eax, 0x12345678");
        assert_eq!(session.handle_line("ah").output, ["0x00000056"]);

        let mut session = Session::default();
        session.handle_line("mov eax, 0x12345678");
        assert_eq!(session.handle_line("eax").output, ["305419896"]);
    }

    #[test]
    fn errors_and_warnings_are_reported() {
        let mut session = Session::default();

        let reply = session.handle_line("bogus");
        assert_eq!(reply.error, Some(X86Error::UnknownCommand("bogus".to_owned())));

        let reply = session.handle_line("mov eax");
        assert!(matches!(
            reply.error,
            Some(X86Error::Syntax(SyntaxError::OperandCount { .. }))
        ));

        let reply = session.handle_line("mov edx, 0x100000000");
        assert_eq!(reply.error, None);
        assert_eq!(reply.warnings.len(), 1);
        assert!(reply.warnings[0].contains("edx"), "{:?}", reply.warnings);
    }

    #[test]
    fn sys_exit_requests_exit() {
        let mut session = Session::default();
        session.handle_line("mov eax, 1");
        session.handle_line("mov ebx, 0x2A");
        assert_eq!(session.handle_line("int 0x80").exit, Some(42));
    }

    #[test]
    fn meta_commands() {
        let mut session = Session::default();
        session.handle_line("mov eax, 0x12345678");
        session.handle_line("mov esi, 3");

        let regs = session.handle_line("regs").output;
        assert_eq!(regs.len(), 8);
        assert_eq!(regs[0], "eax = 0x12345678  ax = 0x1234  ah = 0x56  al = 0x78");
        assert_eq!(regs[4], "esi = 0x00000003");

        assert_eq!(
            session.handle_line("listing").output,
            [
                "0x00000000    mov eax, 0x12345678",
                "0x00000004    mov esi, 3"
            ]
        );
        // Meta commands are not instructions.
        assert_eq!(session.address(), 8);
    }
}
