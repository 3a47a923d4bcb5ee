//! External summarizer invocation.

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use crate::error::{Error, Result};
use crate::model::DocumentOutline;

use super::body_file::BodyFile;

/// Default bound on one collaborator invocation.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);

/// How often the child is polled while waiting.
const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// How much stderr is carried into an error message.
const STDERR_SNIPPET_CHARS: usize = 400;

/// Invokes the external summarization collaborator.
///
/// The collaborator is an opaque text-in/text-out process. It receives
/// three positional arguments after any configured fixed arguments: the
/// document title, the joined heading titles, and the path of a transient
/// file holding the body text (a handle rather than inline text, to bound
/// argument size for large documents). Success is exit code 0; the summary
/// is stdout trimmed of surrounding whitespace.
#[derive(Debug, Clone)]
pub struct Summarizer {
    program: PathBuf,
    args: Vec<String>,
    timeout: Duration,
    scratch_dir: PathBuf,
}

impl Summarizer {
    /// Create a summarizer for the given program.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            timeout: DEFAULT_TIMEOUT,
            scratch_dir: std::env::temp_dir(),
        }
    }

    /// Append a fixed argument passed before the positional ones,
    /// typically a script path.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Bound the collaborator's run time. Past the deadline the child is
    /// killed and the call fails.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Directory for transient body files. Defaults to the system
    /// temporary directory.
    pub fn with_scratch_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.scratch_dir = dir.into();
        self
    }

    /// Run the collaborator over an extracted outline.
    ///
    /// The transient body file is released on every exit path: success,
    /// non-zero exit, launch error, and timeout.
    pub fn summarize(&self, outline: &DocumentOutline) -> Result<String> {
        let body = BodyFile::create(&self.scratch_dir, &outline.body_text)?;
        self.run(&outline.title, &outline.headings_joined(), body.path())
        // `body` drops here, removing the file whether `run` succeeded or not.
    }

    fn run(&self, title: &str, headings: &str, body_path: &Path) -> Result<String> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(title)
            .arg(headings)
            .arg(body_path)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                Error::Summarization(format!(
                    "failed to launch {}: {}",
                    self.program.display(),
                    e
                ))
            })?;

        // Drain both pipes on background threads so a chatty collaborator
        // can never fill a pipe and stall the deadline loop.
        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = self.wait_with_deadline(&mut child)?;

        let stdout = stdout.join().unwrap_or_default();
        let stderr = stderr.join().unwrap_or_default();

        if !status.success() {
            let detail: String = String::from_utf8_lossy(&stderr)
                .trim()
                .chars()
                .take(STDERR_SNIPPET_CHARS)
                .collect();
            let message = if detail.is_empty() {
                format!("summarizer exited with {}", status)
            } else {
                format!("summarizer exited with {}: {}", status, detail)
            };
            return Err(Error::Summarization(message));
        }

        Ok(String::from_utf8_lossy(&stdout).trim().to_string())
    }

    fn wait_with_deadline(&self, child: &mut Child) -> Result<ExitStatus> {
        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(Error::Summarization(format!(
                            "summarizer timed out after {:?}",
                            self.timeout
                        )));
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(e) => {
                    let _ = child.kill();
                    return Err(Error::Summarization(format!(
                        "failed waiting for summarizer: {}",
                        e
                    )));
                }
            }
        }
    }
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_defaults() {
        let summarizer = Summarizer::new("python3");
        assert_eq!(summarizer.program, PathBuf::from("python3"));
        assert!(summarizer.args.is_empty());
        assert_eq!(summarizer.timeout, DEFAULT_TIMEOUT);
        assert_eq!(summarizer.scratch_dir, std::env::temp_dir());
    }

    #[test]
    fn test_builder_chaining() {
        let summarizer = Summarizer::new("python3")
            .arg("summarizer.py")
            .arg("--quiet")
            .with_timeout(Duration::from_secs(5));

        assert_eq!(summarizer.args, vec!["summarizer.py", "--quiet"]);
        assert_eq!(summarizer.timeout, Duration::from_secs(5));
    }

    #[test]
    fn test_launch_error_is_summarization_failure() {
        let outline = DocumentOutline {
            title: "T".to_string(),
            programs: vec![],
            body_text: "body".to_string(),
        };
        let dir = tempfile::tempdir().unwrap();

        let result = Summarizer::new("pdfbrief-no-such-binary")
            .with_scratch_dir(dir.path())
            .summarize(&outline);

        assert!(matches!(result, Err(Error::Summarization(_))));
        // The transient file was still cleaned up.
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
