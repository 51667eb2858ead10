use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Write the share bundle: the joined response text, plus the captured
/// image when one exists. Returns the text file's path.
///
/// Handing the bundle to an OS share sheet is a collaborator concern;
/// glint only materializes the files.
pub fn write_bundle(dir: &Path, text: &str, image: Option<&[u8]>) -> Result<PathBuf> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create share directory {}", dir.display()))?;
    let base = dir.join(format!("glint-{:08x}", rand::random::<u32>()));

    let text_path = base.with_extension("txt");
    fs::write(&text_path, text)
        .with_context(|| format!("failed to write {}", text_path.display()))?;

    if let Some(image) = image {
        let image_path = base.with_extension("jpg");
        fs::write(&image_path, image)
            .with_context(|| format!("failed to write {}", image_path.display()))?;
    }
    Ok(text_path)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn bundle_contains_text_and_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_bundle(dir.path(), "a\nb", Some(b"\xff\xd8jpeg")).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "a\nb");
        let image_path = path.with_extension("jpg");
        assert_eq!(fs::read(image_path).unwrap(), b"\xff\xd8jpeg");
    }

    #[test]
    fn text_only_bundle_skips_the_image() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_bundle(dir.path(), "text", None).unwrap();
        assert!(path.exists());
        assert!(!path.with_extension("jpg").exists());
    }

    #[test]
    fn bundles_get_distinct_names() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_bundle(dir.path(), "one", None).unwrap();
        let b = write_bundle(dir.path(), "two", None).unwrap();
        assert_ne!(a, b);
    }
}
