use std::fmt::Display;
use std::io;
use std::path::Path;
use std::process::{Command, ExitStatus, Stdio};

use serde::Deserialize;

#[derive(Debug, thiserror::Error)]
pub enum ProbeError {
    #[error("unable to run ffprobe: {0}")]
    Launch(#[from] io::Error),

    #[error("ffprobe did not exit successfully ({0})")]
    Failed(ExitStatus),

    #[error("unexpected ffprobe output: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no video stream found")]
    NoVideoStream,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SourceMetadata {
    pub video_codec: String,
    pub width: u64,
    pub height: u64,
    pub frame_rate: Option<f64>,
}

impl Display for SourceMetadata {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}x{}", self.video_codec, self.width, self.height)?;
        if let Some(fps) = self.frame_rate {
            write!(f, " @ {:.2} fps", fps)?;
        }
        Ok(())
    }
}

#[derive(Deserialize, Debug)]
struct FFProbeJsonOutput {
    #[serde(default)]
    streams: Vec<FFProbeJsonStream>,
}

#[derive(Deserialize, Debug)]
struct FFProbeJsonStream {
    codec_name: Option<String>,
    #[serde(default)]
    width: u64,
    #[serde(default)]
    height: u64,
    avg_frame_rate: Option<String>,
}

/// Reads the first video stream of `path`. Used for reporting only.
pub fn probe_source(ffprobe: &Path, path: &Path) -> Result<SourceMetadata, ProbeError> {
    let output = Command::new(ffprobe)
        .args(["-v", "error", "-of", "json", "-show_streams", "-select_streams", "v:0"])
        .arg(path)
        .stdin(Stdio::null())
        .output()?;
    if !output.status.success() {
        return Err(ProbeError::Failed(output.status));
    }
    parse_probe_output(&output.stdout)
}

fn parse_probe_output(json: &[u8]) -> Result<SourceMetadata, ProbeError> {
    let deserialized = serde_json::from_slice::<FFProbeJsonOutput>(json)?;
    let stream = deserialized.streams.into_iter().next().ok_or(ProbeError::NoVideoStream)?;
    Ok(SourceMetadata {
        video_codec: stream.codec_name.unwrap_or_else(|| String::from("unknown")),
        width: stream.width,
        height: stream.height,
        frame_rate: stream.avg_frame_rate.as_deref().and_then(parse_frame_rate),
    })
}

/// ffprobe reports rates as a fraction, e.g. `24000/1001`.
fn parse_frame_rate(rate: &str) -> Option<f64> {
    let (num, denom) = rate.split_once('/')?;
    let num: f64 = num.trim().parse().ok()?;
    let denom: f64 = denom.trim().parse().ok()?;
    if denom == 0.0 { None } else { Some(num / denom) }
}
