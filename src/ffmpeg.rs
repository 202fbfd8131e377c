use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

pub mod executor;
pub mod invocation;
pub mod probe;

pub const DEFAULT_FFMPEG_PATH: &str = "/usr/local/bin/ffmpeg";
pub const FFMPEG_PATH_ENV: &str = "TRANSCODE_FFMPEG";

/// Location of the ffmpeg executable used for the run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FFmpeg {
    path: PathBuf,
}

impl FFmpeg {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FFmpeg { path: path.into() }
    }

    /// Explicit path, then `$TRANSCODE_FFMPEG`, then the default install
    /// location, then `PATH`.
    pub fn locate(explicit: Option<PathBuf>) -> Self {
        FFmpeg::locate_from(explicit, env::var_os(FFMPEG_PATH_ENV))
    }

    fn locate_from(explicit: Option<PathBuf>, from_env: Option<OsString>) -> Self {
        if let Some(path) = explicit {
            return FFmpeg::new(path);
        }
        if let Some(path) = from_env.filter(|p| !p.is_empty()) {
            return FFmpeg::new(path);
        }

        let default = PathBuf::from(DEFAULT_FFMPEG_PATH);
        if default.exists() {
            return FFmpeg::new(default);
        }
        match which::which("ffmpeg") {
            Ok(found) => FFmpeg::new(found),
            // let the launch fail with a useful path in the message
            Err(_) => FFmpeg::new(default),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// ffprobe is expected to sit next to ffmpeg.
    pub fn ffprobe_path(&self) -> PathBuf {
        self.path.with_file_name("ffprobe")
    }

    pub fn command_line(&self, args: &[OsString]) -> String {
        std::iter::once(self.path.as_os_str())
            .chain(args.iter().map(OsString::as_os_str))
            .map(OsStr::to_string_lossy)
            .collect::<Vec<_>>()
            .join(" ")
    }
}
