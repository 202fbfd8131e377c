use std::fs;
use std::path::{Path, PathBuf};

use crate::codecs::Codec;
use crate::error::{Result, TranscodeError};

pub const OUTPUT_FOLDER_NAME: &str = "out";
pub const OUTPUT_FILE_EXT: &str = "mp4";

/// `<input-dir>/out/<codec>`
pub fn output_folder(input: &Path, codec: Codec) -> PathBuf {
    input
        .parent()
        .unwrap_or_else(|| Path::new(""))
        .join(OUTPUT_FOLDER_NAME)
        .join(codec.name())
}

/// `<input-dir>/out/<codec>/<input-stem>.mp4`
pub fn output_file(input: &Path, codec: Codec) -> PathBuf {
    let mut file_name = input
        .file_stem()
        .map(|stem| stem.to_os_string())
        .unwrap_or_default();
    file_name.push(".");
    file_name.push(OUTPUT_FILE_EXT);
    output_folder(input, codec).join(file_name)
}

/// Creates the output folder and any missing parents.
pub fn create_output_folder(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|source| TranscodeError::OutputDirCreation {
        path: path.to_path_buf(),
        source,
    })
}

pub fn file_size(path: &Path) -> Option<u64> {
    fs::metadata(path).ok().map(|metadata| metadata.len())
}
