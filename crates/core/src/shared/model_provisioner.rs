use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ModelProvisionError {
    #[error("failed to create model directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("download failed for {url}: {source}")]
    Download {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to write model to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not determine a model cache directory")]
    NoCacheDir,
}

/// Progress callback: `(bytes_downloaded, total_bytes)`.
/// `total_bytes` is 0 if the server didn't provide Content-Length.
pub type ProgressFn = Box<dyn Fn(u64, u64) + Send>;

/// Ensure `<dir>/<name>` exists, fetching it from `url` if absent.
///
/// An existing file is returned as-is with zero network access; there is
/// no integrity check and no re-download. A missing file triggers exactly
/// one download attempt, and any network or filesystem error is returned
/// for the caller to treat as fatal.
pub fn ensure(
    name: &str,
    url: &str,
    dir: &Path,
    progress: Option<ProgressFn>,
) -> Result<PathBuf, ModelProvisionError> {
    let path = dir.join(name);
    if path.exists() {
        return Ok(path);
    }

    fs::create_dir_all(dir).map_err(|source| ModelProvisionError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    log::info!("model {name} missing, downloading from {url}");
    download(url, &path, progress)?;
    Ok(path)
}

/// Per-user model cache directory, e.g. `~/.cache/Facewatch/models/` on
/// Linux.
pub fn default_models_dir() -> Result<PathBuf, ModelProvisionError> {
    dirs::cache_dir()
        .map(|d| d.join("Facewatch").join("models"))
        .ok_or(ModelProvisionError::NoCacheDir)
}

fn download(
    url: &str,
    dest: &Path,
    progress: Option<ProgressFn>,
) -> Result<(), ModelProvisionError> {
    let response = reqwest::blocking::get(url)
        .and_then(|r| r.error_for_status())
        .map_err(|source| ModelProvisionError::Download {
            url: url.to_string(),
            source,
        })?;

    let total = response.content_length().unwrap_or(0);
    let bytes = response
        .bytes()
        .map_err(|source| ModelProvisionError::Download {
            url: url.to_string(),
            source,
        })?;

    // Write to a temp file first, then rename for atomicity
    let temp_path = dest.with_extension("part");
    let write_err = |source| ModelProvisionError::Write {
        path: temp_path.clone(),
        source,
    };
    let mut file = fs::File::create(&temp_path).map_err(write_err)?;

    let mut written: u64 = 0;
    for chunk in bytes.chunks(64 * 1024) {
        file.write_all(chunk).map_err(write_err)?;
        written += chunk.len() as u64;
        if let Some(ref report) = progress {
            report(written, total);
        }
    }
    file.flush().map_err(write_err)?;
    drop(file);

    fs::rename(&temp_path, dest).map_err(|source| ModelProvisionError::Write {
        path: dest.to_path_buf(),
        source,
    })?;
    log::info!("model saved to {}", dest.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    const UNREACHABLE_URL: &str = "http://invalid.nonexistent.example.com/cascade.xml";

    #[test]
    fn test_ensure_existing_file_skips_network() {
        let tmp = TempDir::new().unwrap();
        let existing = tmp.path().join("cascade.xml");
        fs::write(&existing, b"<cascade/>").unwrap();

        // The URL is unreachable, so success proves no network was touched.
        let path = ensure("cascade.xml", UNREACHABLE_URL, tmp.path(), None).unwrap();
        assert_eq!(path, existing);
        assert_eq!(fs::read(&path).unwrap(), b"<cascade/>");
    }

    #[test]
    fn test_ensure_missing_file_attempts_download() {
        let tmp = TempDir::new().unwrap();
        let result = ensure("cascade.xml", UNREACHABLE_URL, tmp.path(), None);
        assert!(matches!(
            result,
            Err(ModelProvisionError::Download { .. })
        ));
    }

    #[test]
    fn test_failed_download_leaves_no_partial_file() {
        let tmp = TempDir::new().unwrap();
        let _ = ensure("cascade.xml", UNREACHABLE_URL, tmp.path(), None);
        let dest = tmp.path().join("cascade.xml");
        assert!(!dest.exists());
        assert!(!dest.with_extension("part").exists());
    }

    #[test]
    fn test_ensure_creates_missing_dir() {
        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("models");
        let _ = ensure("cascade.xml", UNREACHABLE_URL, &dir, None);
        assert!(dir.exists());
    }

    #[test]
    fn test_default_models_dir_under_user_cache() {
        let dir = default_models_dir().unwrap();
        assert!(dir.ends_with("Facewatch/models"));
    }

    #[test]
    fn test_download_then_reuse_without_network() {
        // Skipped in CI: needs network access
        if std::env::var("CI").is_ok() {
            return;
        }
        let tmp = TempDir::new().unwrap();
        let progress_called = Arc::new(AtomicBool::new(false));
        let flag = progress_called.clone();

        let first = ensure(
            "robots.txt",
            "https://www.google.com/robots.txt",
            tmp.path(),
            Some(Box::new(move |_written, _total| {
                flag.store(true, Ordering::Relaxed);
            })),
        );
        assert!(first.is_ok(), "download failed: {:?}", first.err());
        assert!(progress_called.load(Ordering::Relaxed));
        assert!(!fs::read(first.unwrap()).unwrap().is_empty());

        // Second call finds the file; the unreachable URL proves it stays
        // off the network.
        let second = ensure("robots.txt", UNREACHABLE_URL, tmp.path(), None);
        assert!(second.is_ok());
    }
}
