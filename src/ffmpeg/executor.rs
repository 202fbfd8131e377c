use std::ffi::OsString;
use std::fmt::Display;
use std::io::{ErrorKind, Read};
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use human_repr::HumanDuration;

use crate::error::{Result, TranscodeError};

const READ_BUFFER_SIZE: usize = 8 * 1024;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stream {
    Out,
    Err,
}

impl Display for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stream::Out => write!(f, "out"),
            Stream::Err => write!(f, "err"),
        }
    }
}

/// Receives child output as soon as it is read. Chunks from one stream
/// arrive in order; nothing orders them against the other stream.
pub trait OutputSink: Sync {
    fn forward(&self, stream: Stream, chunk: &[u8]);
}

/// Emits each output line as a `tracing` event on the `ffmpeg` target.
pub struct TracingSink;

impl OutputSink for TracingSink {
    fn forward(&self, stream: Stream, chunk: &[u8]) {
        let text = String::from_utf8_lossy(chunk);
        // ffmpeg redraws its status line with '\r'
        for line in text.split(['\n', '\r']).filter(|l| !l.trim().is_empty()) {
            tracing::info!(target: "ffmpeg", stream = %stream, "{}", line);
        }
    }
}

/// Runs `program` to completion, forwarding its stdout and stderr to `sink`.
///
/// Returns the wall-clock time since launch when the process exits with 0.
pub fn execute(program: &Path, args: &[OsString], sink: &dyn OutputSink) -> Result<Duration> {
    let start = Instant::now();
    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| TranscodeError::ProcessLaunch {
            program: program.to_path_buf(),
            source,
        })?;

    tracing::debug!(pid = child.id(), "launched {}", program.display());

    let stdout = child.stdout.take();
    let stderr = child.stderr.take();
    let status = thread::scope(|scope| {
        if let Some(out) = stdout {
            scope.spawn(move || forward_stream(out, Stream::Out, sink));
        }
        if let Some(err) = stderr {
            scope.spawn(move || forward_stream(err, Stream::Err, sink));
        }
        child.wait()
    })?;

    let elapsed = start.elapsed();
    if status.success() {
        tracing::info!("{} executed in {}", program.display(), elapsed.as_secs_f64().human_duration());
        return Ok(elapsed);
    }

    match status.code() {
        Some(code) => Err(TranscodeError::ProcessExit {
            program: program.to_path_buf(),
            code,
        }),
        None => Err(TranscodeError::ProcessTerminated {
            program: program.to_path_buf(),
        }),
    }
}

fn forward_stream<R: Read>(mut reader: R, stream: Stream, sink: &dyn OutputSink) {
    let mut buf = [0u8; READ_BUFFER_SIZE];
    loop {
        match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => sink.forward(stream, &buf[..n]),
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => {
                tracing::warn!(stream = %stream, "stopped reading child output: {}", err);
                break;
            },
        }
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CollectingSink {
        chunks: Mutex<Vec<(Stream, Vec<u8>)>>,
    }

    impl CollectingSink {
        fn text(&self, stream: Stream) -> String {
            let chunks = self.chunks.lock().unwrap();
            let bytes: Vec<u8> = chunks
                .iter()
                .filter(|(s, _)| *s == stream)
                .flat_map(|(_, chunk)| chunk.iter().copied())
                .collect();
            String::from_utf8(bytes).unwrap()
        }
    }

    impl OutputSink for CollectingSink {
        fn forward(&self, stream: Stream, chunk: &[u8]) {
            self.chunks.lock().unwrap().push((stream, chunk.to_vec()));
        }
    }

    fn sh(script: &str) -> Vec<OsString> {
        vec![OsString::from("-c"), OsString::from(script)]
    }

    #[test]
    fn test_exit_zero_is_success() {
        let sink = CollectingSink::default();
        assert!(execute(Path::new("/bin/sh"), &sh("exit 0"), &sink).is_ok());
    }

    #[test]
    fn test_nonzero_exit_carries_code() {
        let sink = CollectingSink::default();
        match execute(Path::new("/bin/sh"), &sh("exit 2"), &sink) {
            Err(TranscodeError::ProcessExit { code, .. }) => assert_eq!(code, 2),
            other => panic!("expected ProcessExit, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_executable_is_a_launch_error() {
        let sink = CollectingSink::default();
        let result = execute(Path::new("/nonexistent/bin/ffmpeg"), &[], &sink);
        assert!(matches!(result, Err(TranscodeError::ProcessLaunch { .. })));
    }

    #[test]
    fn test_non_executable_file_is_a_launch_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let sink = CollectingSink::default();
        let result = execute(file.path(), &[], &sink);
        assert!(matches!(result, Err(TranscodeError::ProcessLaunch { .. })));
    }

    #[test]
    fn test_killed_process_is_terminated() {
        let sink = CollectingSink::default();
        let result = execute(Path::new("/bin/sh"), &sh("kill -9 $$"), &sink);
        assert!(matches!(result, Err(TranscodeError::ProcessTerminated { .. })));
    }

    #[test]
    fn test_both_streams_reach_the_sink() {
        let sink = CollectingSink::default();
        execute(Path::new("/bin/sh"), &sh("echo hello; echo oops >&2; echo world"), &sink).unwrap();
        assert_eq!(sink.text(Stream::Out), "hello\nworld\n");
        assert_eq!(sink.text(Stream::Err), "oops\n");
    }

    #[test]
    fn test_output_is_forwarded_before_a_failing_exit() {
        let sink = CollectingSink::default();
        let result = execute(Path::new("/bin/sh"), &sh("echo 'Unknown encoder' >&2; exit 1"), &sink);
        assert!(matches!(result, Err(TranscodeError::ProcessExit { code: 1, .. })));
        assert_eq!(sink.text(Stream::Err), "Unknown encoder\n");
    }

    #[test]
    fn test_stream_display() {
        assert_eq!(Stream::Out.to_string(), "out");
        assert_eq!(Stream::Err.to_string(), "err");
    }
}
