use std::io::{ErrorKind, Read};
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use super::GenerationError;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Text source that turns a prompt into a JSON plan draft.
pub trait PlanWriter: Send + Sync {
    fn draft(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Runs an external LLM command line as `<command> -p <prompt>` and returns its stdout.
#[derive(Debug, Clone)]
pub struct CliPlanWriter {
    command: String,
    timeout: Duration,
}

impl CliPlanWriter {
    pub fn new(command: impl Into<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            timeout,
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    fn wait_with_deadline(&self, child: &mut Child) -> Result<bool, GenerationError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            if let Some(status) = child.try_wait()? {
                return Ok(status.success());
            }
            if Instant::now() >= deadline {
                let _ = child.kill();
                let _ = child.wait();
                return Err(GenerationError::Timeout {
                    command: self.command.clone(),
                    timeout_secs: self.timeout.as_secs(),
                });
            }
            thread::sleep(POLL_INTERVAL);
        }
    }
}

impl PlanWriter for CliPlanWriter {
    fn draft(&self, prompt: &str) -> Result<String, GenerationError> {
        let mut child = Command::new(&self.command)
            .arg("-p")
            .arg(prompt)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|err| match err.kind() {
                ErrorKind::NotFound => GenerationError::WriterUnavailable {
                    command: self.command.clone(),
                },
                _ => GenerationError::Io(err),
            })?;

        // drain both pipes off-thread so a chatty child cannot block on a full buffer
        let stdout = child.stdout.take().map(drain);
        let stderr = child.stderr.take().map(drain);

        let success = self.wait_with_deadline(&mut child)?;
        let stdout = collect(stdout);
        let stderr = collect(stderr);

        if success {
            Ok(stdout)
        } else {
            Err(GenerationError::WriterFailed {
                command: self.command.clone(),
                stderr: stderr.trim().to_string(),
            })
        }
    }
}

fn drain<S: Read + Send + 'static>(mut source: S) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buffer = Vec::new();
        let _ = source.read_to_end(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    })
}

fn collect(handle: Option<thread::JoinHandle<String>>) -> String {
    handle
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default()
}
