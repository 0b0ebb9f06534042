//! Output file naming.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use crate::error::AppError;
use crate::models::Packaging;

const PRG_EXTENSION: &str = "prg";

/// Where the converted `input` goes.
///
/// Without `output` the input name gets a `.prg` extension. With one input
/// `output` is the file name; for a batch it is the directory receiving
/// `<input name>.prg`. Executables always end in `.prg`; raw output drops
/// the extension so the part suffixes can be appended.
pub fn output_path(input: &Path, output: Option<&Path>, batch: bool, packaging: Packaging) -> PathBuf {
    let mut path = match output {
        Some(dir) if batch => {
            let name = input.file_name().map(PathBuf::from).unwrap_or_else(|| input.to_path_buf());
            dir.join(name.with_extension(PRG_EXTENSION))
        }
        Some(file) => file.to_path_buf(),
        None => input.with_extension(PRG_EXTENSION),
    };

    match packaging {
        Packaging::Executable if path.extension().is_some_and(|e| e == PRG_EXTENSION) => {}
        Packaging::Executable => {
            path.set_extension(PRG_EXTENSION);
        }
        Packaging::Raw => {
            path.set_extension("");
        }
        Packaging::Native => {}
    }
    path
}

/// Make sure the batch output directory exists.
pub fn prepare_output_dir(dir: &Path) -> Result<(), AppError> {
    if !dir.exists() {
        std::fs::create_dir_all(dir).map_err(|source| AppError::Write {
            path: dir.to_path_buf(),
            source,
        })?;
        tracing::info!("Created output directory `{}'", dir.display());
    }
    if !dir.is_dir() {
        return Err(AppError::NotADirectory(dir.to_path_buf()));
    }
    Ok(())
}

/// `pic.png` → `pic_error.png`, next to the input.
pub fn error_image_path(input: &Path) -> PathBuf {
    let mut name = input.with_extension("").into_os_string();
    name.push("_error.png");
    PathBuf::from(name)
}

/// Output file of one container part.
pub fn part_path(output: &Path, suffix: &str) -> PathBuf {
    let mut name = OsString::from(output.as_os_str());
    name.push(suffix);
    PathBuf::from(name)
}
