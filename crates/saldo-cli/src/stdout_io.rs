use std::io::{self, Write};

/// Stdout writes tolerate a closed pipe (`saldo summary ... | head`) so the
/// process exits cleanly after the consumer has gone away.
pub fn write_stdout_text(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    ignore_broken_pipe(stdout.write_all(text.as_bytes()))?;
    ignore_broken_pipe(stdout.flush())
}

pub fn write_stdout_line(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    ignore_broken_pipe(stdout.write_all(text.as_bytes()))?;
    ignore_broken_pipe(stdout.write_all(b"\n"))?;
    ignore_broken_pipe(stdout.flush())
}

fn ignore_broken_pipe(result: io::Result<()>) -> io::Result<()> {
    match result {
        Err(error) if error.kind() == io::ErrorKind::BrokenPipe => Ok(()),
        other => other,
    }
}
