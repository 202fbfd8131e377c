use std::path::{Path, PathBuf};
use std::time::Duration;

use human_repr::HumanCount;

use crate::codecs::Codec;
use crate::error::Result;
use crate::ffmpeg::FFmpeg;
use crate::ffmpeg::executor::{self, OutputSink};
use crate::ffmpeg::invocation::build_args;
use crate::ffmpeg::probe::probe_source;
use crate::fstools::{create_output_folder, file_size, output_file};
use crate::profiles::{CodecProfile, ProfileTable};

/// One conversion job: built once per run and never modified.
#[derive(Clone, Debug, PartialEq)]
pub struct TranscodeRequest {
    pub input: PathBuf,
    pub output: PathBuf,
    pub codec: Codec,
    pub profile: CodecProfile,
}

impl TranscodeRequest {
    pub fn new(input: PathBuf, codec: Codec, profiles: &ProfileTable) -> Self {
        let output = output_file(&input, codec);
        TranscodeRequest {
            input,
            output,
            codec,
            profile: profiles.video(codec).clone(),
        }
    }

    pub fn output_folder(&self) -> &Path {
        self.output.parent().unwrap_or_else(|| Path::new(""))
    }
}

#[derive(Clone, Debug)]
pub struct TranscoderOptions {
    pub dry_run: bool,
    pub ffmpeg: FFmpeg,
}

#[derive(Debug, PartialEq)]
pub enum Outcome {
    /// Nothing was created or launched.
    DryRun { command_line: String },
    Transcoded { output: PathBuf, elapsed: Duration },
}

pub struct Transcoder<'a> {
    options: TranscoderOptions,
    profiles: &'a ProfileTable,
}

impl<'a> Transcoder<'a> {
    pub fn new(options: TranscoderOptions, profiles: &'a ProfileTable) -> Self {
        Transcoder { options, profiles }
    }

    pub fn request(&self, input: PathBuf, codec: Codec) -> TranscodeRequest {
        TranscodeRequest::new(input, codec, self.profiles)
    }

    pub fn transcode(&self, request: &TranscodeRequest, sink: &dyn OutputSink) -> Result<Outcome> {
        let args = build_args(
            &request.input,
            &request.output,
            request.profile.flags(),
            self.profiles.audio().flags(),
            self.profiles.filters().flags(),
        );
        let command_line = self.options.ffmpeg.command_line(&args);

        if self.options.dry_run {
            return Ok(Outcome::DryRun { command_line });
        }

        create_output_folder(request.output_folder())?;
        self.log_source(&request.input);

        tracing::info!(codec = %request.codec, "{}", command_line);
        let elapsed = executor::execute(self.options.ffmpeg.path(), &args, sink).inspect_err(|err| {
            tracing::error!(input = %request.input.display(), "cannot process media: {}", err);
        })?;

        if let Some(size) = file_size(&request.output) {
            tracing::info!("wrote {} ({})", request.output.display(), size.human_count_bytes());
        }

        Ok(Outcome::Transcoded {
            output: request.output.clone(),
            elapsed,
        })
    }

    fn log_source(&self, input: &Path) {
        match probe_source(&self.options.ffmpeg.ffprobe_path(), input) {
            Ok(metadata) => tracing::info!("source: {}", metadata),
            Err(err) => tracing::debug!("skipping source probe: {}", err),
        }
    }
}
