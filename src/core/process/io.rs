// devkit-rs: Developer Helper Toolkit
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! I/O streaming and output capture for processes.
//!
//! ```text
//! run_child()
//!   stdout/stderr reader tasks
//!     SegmentBuffer splits on \n and \r
//!     -> trace log / forward channel / kept lines
//!   select: wait | deadline | cancel
//!     timeout, cancel --> kill + reap, abort readers
//!   exited --> join readers before the same deadline
//!     pipes still open (background grandchild) --> abort readers, Timeout
//!   --> ProcessOutput { stdout, stderr, exit_code, interrupted }
//! ```

use std::time::Duration;
use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::process::Child;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{trace, warn};

use super::ProcessResult;
use super::builder::{ProcessBuilder, ProcessOutput, StreamFlags};
use crate::error::ProcessError;

/// Splits a byte stream into text segments at `\n` and `\r`.
///
/// Incomplete trailing data is held back until more bytes arrive or
/// [`SegmentBuffer::finish`] is called. Empty segments are dropped, so
/// `\r\n` produces a single segment.
#[derive(Debug, Default)]
pub(crate) struct SegmentBuffer {
    pending: Vec<u8>,
}

impl SegmentBuffer {
    pub(crate) const fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Adds bytes and returns every segment completed by them.
    pub(crate) fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        let mut segments = Vec::new();
        for &byte in bytes {
            if byte == b'\n' || byte == b'\r' {
                if !self.pending.is_empty() {
                    segments.push(String::from_utf8_lossy(&self.pending).into_owned());
                    self.pending.clear();
                }
            } else {
                self.pending.push(byte);
            }
        }
        segments
    }

    /// Returns the trailing segment that was not terminated by a separator.
    pub(crate) fn finish(&mut self) -> Option<String> {
        if self.pending.is_empty() {
            return None;
        }
        let segment = String::from_utf8_lossy(&self.pending).into_owned();
        self.pending.clear();
        Some(segment)
    }
}

/// Per-stream settings handed to a reader task.
struct StreamReader {
    flags: StreamFlags,
    forward: Option<mpsc::Sender<String>>,
    process_name: String,
    stream_name: &'static str,
}

impl StreamReader {
    async fn handle(&self, segment: String, kept: &mut Vec<String>) {
        if self.flags.contains(StreamFlags::FORWARD_TO_LOG) {
            trace!(process = %self.process_name, stream = self.stream_name, line = %segment, "output");
        }
        if let Some(tx) = &self.forward {
            // A dropped receiver only means nobody is watching anymore
            let _ = tx.send(segment.clone()).await;
        }
        if self.flags.contains(StreamFlags::KEEP_IN_STRING) {
            kept.push(segment);
        }
    }

    /// Reads the stream to EOF and returns the kept segments.
    async fn read<R>(self, mut reader: R) -> Vec<String>
    where
        R: AsyncRead + Unpin,
    {
        let mut buffer = SegmentBuffer::new();
        let mut kept = Vec::new();
        let mut chunk = [0u8; 4096];

        loop {
            match reader.read(&mut chunk).await {
                Ok(0) => break,
                Ok(n) => {
                    for segment in buffer.push(&chunk[..n]) {
                        self.handle(segment, &mut kept).await;
                    }
                }
                Err(e) => {
                    warn!(
                        process = %self.process_name,
                        stream = self.stream_name,
                        error = %e,
                        "error reading stream"
                    );
                    break;
                }
            }
        }

        if let Some(segment) = buffer.finish() {
            self.handle(segment, &mut kept).await;
        }
        kept
    }
}

fn spawn_reader<R>(stream: Option<R>, reader: StreamReader) -> Option<JoinHandle<Vec<String>>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    stream.map(|stream| tokio::spawn(reader.read(stream)))
}

async fn join_reader(handle: Option<&mut JoinHandle<Vec<String>>>) -> String {
    match handle {
        Some(handle) => handle.await.unwrap_or_default().join("\n"),
        None => String::new(),
    }
}

fn abort_reader(handle: Option<JoinHandle<Vec<String>>>) {
    if let Some(handle) = handle {
        handle.abort();
    }
}

/// How the wait on the child ended.
enum WaitOutcome {
    Exited(std::process::ExitStatus),
    TimedOut(Duration),
    Cancelled,
}

async fn sleep_until_or_forever(deadline: Option<Instant>) {
    match deadline {
        Some(deadline) => tokio::time::sleep_until(deadline).await,
        None => std::future::pending::<()>().await,
    }
}

fn timeout_error(cmd_line: &str, duration: Duration) -> ProcessError {
    ProcessError::Timeout {
        command: cmd_line.to_string(),
        timeout_ms: u64::try_from(duration.as_millis()).unwrap_or(u64::MAX),
    }
}

impl ProcessBuilder {
    /// Runs the child process, handling I/O streaming, timeout and cancellation.
    ///
    /// On timeout or cancellation the child is killed and reaped before
    /// returning. Reader tasks are aborted in that case because grandchildren
    /// may still hold the pipes open. The timeout also bounds draining the
    /// pipes after a normal exit.
    pub(super) async fn run_child(
        &self,
        name: &str,
        cmd_line: &str,
        child: &mut Child,
        token: &CancellationToken,
    ) -> ProcessResult<ProcessOutput> {
        let timeout = self.timeout_duration();
        let deadline = timeout.map(|duration| Instant::now() + duration);

        let mut stdout_handle = if self.stdout_config().needs_reader() {
            spawn_reader(
                child.stdout.take(),
                StreamReader {
                    flags: self.stdout_config().flags(),
                    forward: self.stdout_config().forward(),
                    process_name: name.to_string(),
                    stream_name: "stdout",
                },
            )
        } else {
            None
        };
        let mut stderr_handle = if self.stderr_config().needs_reader() {
            spawn_reader(
                child.stderr.take(),
                StreamReader {
                    flags: self.stderr_config().flags(),
                    forward: self.stderr_config().forward(),
                    process_name: name.to_string(),
                    stream_name: "stderr",
                },
            )
        } else {
            None
        };

        let outcome = tokio::select! {
            status = child.wait() => WaitOutcome::Exited(status.map_err(|source| ProcessError::Io {
                command: cmd_line.to_string(),
                source,
            })?),
            () = sleep_until_or_forever(deadline) => WaitOutcome::TimedOut(timeout.unwrap_or_default()),
            () = token.cancelled() => WaitOutcome::Cancelled,
        };

        match outcome {
            WaitOutcome::Exited(status) => {
                let drained = tokio::select! {
                    output = async {
                        tokio::join!(
                            join_reader(stdout_handle.as_mut()),
                            join_reader(stderr_handle.as_mut()),
                        )
                    } => Ok(output),
                    () = sleep_until_or_forever(deadline) => Err(WaitOutcome::TimedOut(timeout.unwrap_or_default())),
                    () = token.cancelled() => Err(WaitOutcome::Cancelled),
                };

                let (stdout, stderr) = match drained {
                    Ok(output) => output,
                    Err(outcome) => {
                        warn!(process = %name, "process exited but its output is still open");
                        abort_reader(stdout_handle);
                        abort_reader(stderr_handle);
                        return match outcome {
                            WaitOutcome::TimedOut(duration) => Err(timeout_error(cmd_line, duration)),
                            _ => Ok(ProcessOutput::new(-1, String::new(), String::new(), true)),
                        };
                    }
                };
                Ok(ProcessOutput::new(
                    status.code().unwrap_or(-1),
                    stdout,
                    stderr,
                    false,
                ))
            }
            WaitOutcome::TimedOut(duration) => {
                warn!(process = %name, timeout = ?duration, "process timed out, killing");
                kill_and_reap(cmd_line, child).await?;
                abort_reader(stdout_handle);
                abort_reader(stderr_handle);
                Err(timeout_error(cmd_line, duration))
            }
            WaitOutcome::Cancelled => {
                warn!(process = %name, "cancellation requested, terminating process");
                kill_and_reap(cmd_line, child).await?;
                abort_reader(stdout_handle);
                abort_reader(stderr_handle);
                Ok(ProcessOutput::new(-1, String::new(), String::new(), true))
            }
        }
    }
}

/// Kills the child and waits for it so no zombie is left behind.
async fn kill_and_reap(cmd_line: &str, child: &mut Child) -> ProcessResult<()> {
    child.kill().await.map_err(|source| ProcessError::Io {
        command: cmd_line.to_string(),
        source,
    })
}
