use std::ffi::OsString;
use std::path::Path;

const OVERWRITE_FLAG: &str = "-y";
const INPUT_FLAG: &str = "-i";

/// Builds the argument list for ffmpeg:
/// `-y -i <input> <filters...> <codec...> <audio...> <output>`
///
/// Flags are passed through untouched. ffmpeg reads them positionally, so
/// the caller must not supply a filter and a codec flag that target the same
/// stream in conflicting ways.
pub fn build_args(
    input: &Path,
    output: &Path,
    codec_profile: &[String],
    audio_profile: &[String],
    filter_flags: &[String],
) -> Vec<OsString> {
    let mut args = Vec::with_capacity(4 + filter_flags.len() + codec_profile.len() + audio_profile.len());
    args.push(OsString::from(OVERWRITE_FLAG));
    args.push(OsString::from(INPUT_FLAG));
    args.push(input.as_os_str().to_os_string());
    args.extend(filter_flags.iter().map(OsString::from));
    args.extend(codec_profile.iter().map(OsString::from));
    args.extend(audio_profile.iter().map(OsString::from));
    args.push(output.as_os_str().to_os_string());
    args
}
