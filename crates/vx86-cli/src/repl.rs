use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::session::{Reply, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplOptions {
    pub prompt: bool,
    pub fail_fast: bool,
}

impl Default for ReplOptions {
    fn default() -> Self {
        Self {
            prompt: true,
            fail_fast: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// Input ran out.
    Eof,
    /// Ctrl-C twice in a row.
    Interrupted,
    /// The program ran `int 0x80` with `eax == 1`; carries `ebx`.
    SysExit(u32),
    /// A command failed while `fail_fast` was set.
    Failed,
}

impl ExitReason {
    pub fn exit_code(self) -> u8 {
        match self {
            ExitReason::Eof | ExitReason::Interrupted => 0,
            ExitReason::SysExit(status) => (status & 0xFF) as u8,
            ExitReason::Failed => 1,
        }
    }
}

/// Reads lines from `input` until EOF, `sys_exit`, or a double Ctrl-C.
///
/// Register values go to `out`; warnings and errors go to `diag`.
pub async fn run<R, W, D>(
    session: &mut Session,
    input: R,
    out: &mut W,
    diag: &mut D,
    opts: ReplOptions,
) -> io::Result<ExitReason>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    D: Write,
{
    let mut lines = input.lines();
    let mut interrupts = Interrupts::default();

    loop {
        if opts.prompt {
            write!(out, "{}", session.prompt())?;
            out.flush()?;
        }

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    if opts.prompt {
                        writeln!(out)?;
                    }
                    return Ok(ExitReason::Eof);
                };
                interrupts.line_entered();

                let reply = session.handle_line(&line);
                let failed = reply.error.is_some();
                let exit = reply.exit;
                print_reply(reply, out, diag)?;

                if let Some(status) = exit {
                    tracing::debug!(status, "sys_exit");
                    return Ok(ExitReason::SysExit(status));
                }
                if failed && opts.fail_fast {
                    return Ok(ExitReason::Failed);
                }
            }
            signal = tokio::signal::ctrl_c() => {
                signal?;
                writeln!(out)?;
                if let Some(reason) = interrupts.interrupt() {
                    writeln!(out, "Goodbye.")?;
                    out.flush()?;
                    return Ok(reason);
                }
                writeln!(out, "Ctrl-c again to exit.")?;
            }
        }
    }
}

/// Double Ctrl-C tracking: the second interrupt in a row ends the loop, any entered line re-arms
/// the first.
#[derive(Debug, Default)]
struct Interrupts {
    pending: bool,
}

impl Interrupts {
    fn line_entered(&mut self) {
        self.pending = false;
    }

    fn interrupt(&mut self) -> Option<ExitReason> {
        std::mem::replace(&mut self.pending, true).then_some(ExitReason::Interrupted)
    }
}

fn print_reply<W: Write, D: Write>(reply: Reply, out: &mut W, diag: &mut D) -> io::Result<()> {
    for line in &reply.output {
        writeln!(out, "{line}")?;
    }
    out.flush()?;
    for warning in &reply.warnings {
        writeln!(diag, "warning: {warning}")?;
    }
    if let Some(err) = &reply.error {
        writeln!(diag, "error: {err}")?;
    }
    diag.flush()
}
