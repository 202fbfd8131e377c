use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

use crate::codecs::Codec;

pub type Result<T> = std::result::Result<T, TranscodeError>;

#[derive(Debug, thiserror::Error)]
pub enum TranscodeError {
    #[error("Missing required parameter 'input'[input file] and 'codec'[video codec: {{{}}}]", Codec::names())]
    MissingArgument,

    #[error("Invalid codec provided. Valid codecs are: {}", Codec::names())]
    InvalidCodec(String),

    #[error("Unexpected argument '{0}'\nUsage: transcode-mp4 --input <file> --codec <{names}>", names = Codec::names())]
    UnexpectedArgument(String),

    #[error("Argument {0:?} is not valid UTF-8\nUsage: transcode-mp4 --input <file> --codec <{names}>", names = Codec::names())]
    NonUtf8Argument(OsString),

    #[error("Unable to create output folder {} {source}", path.display())]
    OutputDirCreation {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The child never ran: missing executable, permission denied, ...
    #[error("Cannot launch {}: {source}", program.display())]
    ProcessLaunch {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} exited with code {code}", program.display())]
    ProcessExit { program: PathBuf, code: i32 },

    #[error("{} was terminated before it could exit", program.display())]
    ProcessTerminated { program: PathBuf },

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl TranscodeError {
    /// Errors caused by bad command-line input rather than a failed run.
    pub fn is_usage(&self) -> bool {
        matches!(
            self,
            TranscodeError::MissingArgument
                | TranscodeError::InvalidCodec(_)
                | TranscodeError::UnexpectedArgument(_)
                | TranscodeError::NonUtf8Argument(_)
        )
    }
}
