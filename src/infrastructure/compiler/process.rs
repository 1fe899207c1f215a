//! Child-process filter: source on stdin, result on stdout

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{BuildError, BuildResult};

/// Run `program args..`, feed `input` on stdin and return stdout.
///
/// A non-zero exit becomes a compile error carrying stderr. stdin is fed
/// from a separate thread so a child that streams output while still
/// reading cannot dead-lock against us.
pub(crate) fn run_filter(
    program: &str,
    args: &[String],
    input: &str,
    file: &Path,
) -> BuildResult<String> {
    let compile_error = |message: String| BuildError::Compile {
        file: file.to_path_buf(),
        message,
    };

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| compile_error(format!("could not start '{}': {}", program, e)))?;

    let writer = child.stdin.take().map(|mut stdin| {
        let input = input.to_string();
        std::thread::spawn(move || stdin.write_all(input.as_bytes()))
    });

    let output = child.wait_with_output()?;

    if let Some(handle) = writer {
        match handle.join() {
            Ok(Ok(())) => {}
            // the child may exit before draining stdin; its status decides
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => return Err(compile_error("stdin writer panicked".to_string())),
        }
    }

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(compile_error(format!(
            "'{}' exited with {}: {}",
            program,
            output.status,
            stderr.trim()
        )));
    }

    String::from_utf8(output.stdout)
        .map_err(|_| compile_error(format!("'{}' produced non UTF-8 output", program)))
}
