use std::path::PathBuf;

use c64_bitmap::{ContainerError, ConvertError};
use thiserror::Error;

/// Failure converting one input file, or setting up the output location.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Cannot open file `{path}': {source}")]
    Load {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("{path}: {source}")]
    Convert {
        path: PathBuf,
        #[source]
        source: ConvertError,
    },

    #[error("{path}: {count} color clash(es) left, nothing written (use --force to write anyway)")]
    Clashes { path: PathBuf, count: usize },

    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error("Path `{0}' is not a directory")]
    NotADirectory(PathBuf),

    #[error("Cannot write `{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PNG encode error: {0}")]
    PngEncode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use c64_bitmap::{Container, Mode};

    #[test]
    fn test_clashes_message() {
        let error = AppError::Clashes {
            path: PathBuf::from("pic.png"),
            count: 3,
        };
        assert_eq!(
            error.to_string(),
            "pic.png: 3 color clash(es) left, nothing written (use --force to write anyway)"
        );
    }

    #[test]
    fn test_not_a_directory_message() {
        let error = AppError::NotADirectory(PathBuf::from("out"));
        assert_eq!(error.to_string(), "Path `out' is not a directory");
    }

    #[test]
    fn test_container_error_is_transparent() {
        let error: AppError = ContainerError::ModeMismatch {
            container: Container::Koala,
            mode: Mode::Hires,
        }
        .into();
        assert_eq!(error.to_string(), "Koala container cannot hold a hires picture");
    }

    #[test]
    fn test_render_error_png_encode() {
        let error = RenderError::PngEncode("bad".to_string());
        assert_eq!(error.to_string(), "PNG encode error: bad");
    }
}
