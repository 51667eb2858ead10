use std::path::PathBuf;
use std::process::Stdio;

use anyhow::{Context, Result, bail};

/// Where the captured frame comes from.
#[derive(Debug, Clone)]
pub enum CaptureSource {
    /// External camera command producing JPEG bytes on stdout.
    Command(Vec<String>),
    /// A file on disk (no camera attached, or testing).
    File(PathBuf),
}

impl CaptureSource {
    pub fn describe(&self) -> String {
        match self {
            Self::Command(cmd) => format!("camera `{}`", cmd.join(" ")),
            Self::File(path) => format!("file {}", path.display()),
        }
    }
}

/// Acquire one captured frame as opaque JPEG bytes.
///
/// Decode, rotation, and re-encode are the camera collaborator's job. On
/// failure no fragment ever reaches the assembler; the caller pushes one
/// error line instead.
pub async fn acquire(source: &CaptureSource) -> Result<Vec<u8>> {
    let bytes = match source {
        CaptureSource::File(path) => tokio::fs::read(path)
            .await
            .with_context(|| format!("failed to read image {}", path.display()))?,
        CaptureSource::Command(command) => {
            let (program, args) = command.split_first().context("camera command is empty")?;
            let output = tokio::process::Command::new(program)
                .args(args)
                .stdin(Stdio::null())
                .stderr(Stdio::null())
                .output()
                .await
                .with_context(|| format!("failed to run camera command `{program}`"))?;
            if !output.status.success() {
                bail!(
                    "camera command `{program}` exited with {}",
                    output.status.code().map_or("signal".to_string(), |c| c.to_string())
                );
            }
            output.stdout
        }
    };
    if bytes.is_empty() {
        bail!("capture produced no image data");
    }
    Ok(bytes)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Write as _;

    use super::*;

    #[tokio::test]
    async fn file_source_reads_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"\xff\xd8\xffjpeg").unwrap();
        let source = CaptureSource::File(file.path().to_path_buf());
        assert_eq!(acquire(&source).await.unwrap(), b"\xff\xd8\xffjpeg");
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let source = CaptureSource::File(PathBuf::from("/nonexistent/photo.jpg"));
        assert!(acquire(&source).await.is_err());
    }

    #[tokio::test]
    async fn empty_capture_is_an_error() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let source = CaptureSource::File(file.path().to_path_buf());
        let err = acquire(&source).await.unwrap_err();
        assert!(err.to_string().contains("no image data"));
    }

    #[test]
    fn describe_names_the_source() {
        let source = CaptureSource::Command(vec!["cam".to_string(), "-o".to_string()]);
        assert_eq!(source.describe(), "camera `cam -o`");
        let source = CaptureSource::File(PathBuf::from("shot.jpg"));
        assert_eq!(source.describe(), "file shot.jpg");
    }
}
