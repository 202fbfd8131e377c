pub mod codecs;
pub mod error;
pub mod ffmpeg;
pub mod fstools;
pub mod logging;
pub mod profiles;
pub mod transcoder;

use std::ffi::OsString;
use std::path::PathBuf;
use std::process::ExitCode;

use human_repr::HumanDuration;
use rustop::opts;

use codecs::Codec;
use error::{Result, TranscodeError};
use ffmpeg::FFmpeg;
use ffmpeg::executor::TracingSink;
use profiles::ProfileTable;
use transcoder::{Outcome, Transcoder, TranscoderOptions};

fn main() -> ExitCode {
    // rustop reads env::args(), which panics on non UTF-8 input
    if let Err(err) = check_utf8(std::env::args_os().skip(1)) {
        println!("{}", err);
        return ExitCode::FAILURE;
    }

    let (args, rest) = opts! {
        synopsis "Transcode a video to mp4, written to <input dir>/out/<codec>/.";
        opt input:Option<String>, short:'i', desc:"Input file.";
        opt codec:Option<String>, short:'c', desc:"Video codec. [av1, h264, hevc]";
        opt ffmpeg:Option<String>, desc:"Path to the ffmpeg executable.";
        opt dry_run:bool=false, desc:"Print the ffmpeg command line, but don't run it.";
        opt verbose:bool=false, short:'v', desc:"Log debug output.";
    }.parse_or_exit();

    logging::init(args.verbose);

    let profiles = ProfileTable::standard();
    let ffmpeg_path = args.ffmpeg.map(PathBuf::from);
    match run(args.input, args.codec, rest, ffmpeg_path, args.dry_run, &profiles) {
        Ok(Outcome::DryRun { command_line }) => {
            println!("{}", command_line);
            ExitCode::SUCCESS
        },
        Ok(Outcome::Transcoded { output, elapsed }) => {
            println!("Success! ^__^ {} ({})", output.display(), elapsed.as_secs_f64().human_duration());
            ExitCode::SUCCESS
        },
        Err(err) if err.is_usage() => {
            println!("{}", err);
            ExitCode::FAILURE
        },
        Err(err) => {
            println!("Failure -__-\n{}", err);
            ExitCode::FAILURE
        },
    }
}

fn check_utf8(args: impl Iterator<Item = OsString>) -> Result<()> {
    for arg in args {
        if arg.to_str().is_none() {
            return Err(TranscodeError::NonUtf8Argument(arg));
        }
    }
    Ok(())
}

fn run(
    input: Option<String>,
    codec: Option<String>,
    rest: Vec<String>,
    ffmpeg_path: Option<PathBuf>,
    dry_run: bool,
    profiles: &ProfileTable,
) -> Result<Outcome> {
    let (Some(input), Some(codec)) = (input, codec) else {
        return Err(TranscodeError::MissingArgument);
    };
    // an unquoted path with spaces ends up here
    if let Some(extra) = rest.into_iter().next() {
        return Err(TranscodeError::UnexpectedArgument(extra));
    }
    let codec: Codec = codec.parse()?;

    let options = TranscoderOptions {
        dry_run,
        ffmpeg: FFmpeg::locate(ffmpeg_path),
    };
    let transcoder = Transcoder::new(options, profiles);
    let request = transcoder.request(PathBuf::from(input), codec);
    tracing::debug!(?request, "transcode request");
    transcoder.transcode(&request, &TracingSink)
}
