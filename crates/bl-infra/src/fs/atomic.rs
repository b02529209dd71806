//! Private write helper shared by the file adapters.

use std::path::Path;

use tokio::fs;
use tokio::io::AsyncWriteExt;
use tracing::warn;

/// Write `contents` to `path`, creating parent directories.
///
/// Writes a temp file and renames it over the target. If the rename fails
/// (e.g. cross-device link in CI environments), falls back to a direct write.
///
/// With `mode` set, both the temp file and the direct-write target carry
/// that mode before any byte is written (unix only).
pub(crate) async fn write_atomic(
    path: &Path,
    contents: &[u8],
    mode: Option<u32>,
) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).await?;
    }

    let mut tmp_name = path.as_os_str().to_owned();
    tmp_name.push(".tmp");
    let tmp_path = Path::new(&tmp_name).to_path_buf();

    let mut file = open_for_write(&tmp_path, mode).await?;
    file.write_all(contents).await?;
    file.sync_all().await?;
    drop(file);

    match fs::rename(&tmp_path, path).await {
        Ok(()) => Ok(()),
        Err(rename_err) => {
            warn!(
                path = %path.display(),
                error = %rename_err,
                "atomic rename failed, writing directly"
            );
            let mut file = open_for_write(path, mode).await?;
            file.write_all(contents).await?;
            file.sync_all().await?;
            let _ = fs::remove_file(&tmp_path).await;
            Ok(())
        }
    }
}

/// Open `path` truncated for writing. A file that already exists gets its
/// mode tightened through the open handle before it is written.
async fn open_for_write(path: &Path, mode: Option<u32>) -> std::io::Result<fs::File> {
    let mut options = fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        if let Some(mode) = mode {
            options.mode(mode);
        }
    }

    let file = options.open(path).await?;

    #[cfg(unix)]
    {
        if let Some(mode) = mode {
            use std::os::unix::fs::PermissionsExt;
            file.set_permissions(std::fs::Permissions::from_mode(mode))
                .await?;
        }
    }
    #[cfg(not(unix))]
    let _ = mode;

    Ok(file)
}

/// Read a file, returning `None` when it does not exist.
pub(crate) async fn read_optional(path: &Path) -> std::io::Result<Option<String>> {
    match fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(err) => Err(err),
    }
}
