use crate::error::StoreError;
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Name of a project-local data directory
pub const LOCAL_DIR_NAME: &str = ".lif";

/// Name of the JSON data file inside the data directory
pub const DATA_FILE_NAME: &str = "config.json";

/// Resolve the data file: the nearest local `.lif` directory walking up from
/// the current directory, otherwise `<config dir>/lif/config.json`
pub fn default_data_file() -> Result<PathBuf, StoreError> {
    let current_dir = env::current_dir().map_err(|e| StoreError::io(".", e))?;
    if let Some(local_dir) = find_local_dir(&current_dir) {
        return Ok(local_dir.join(DATA_FILE_NAME));
    }

    let config_dir = dirs::config_dir().ok_or(StoreError::NoDataDir)?;
    Ok(config_dir.join("lif").join(DATA_FILE_NAME))
}

/// Find a local `.lif` directory by walking up the directory tree
pub fn find_local_dir(start_dir: &Path) -> Option<PathBuf> {
    start_dir
        .ancestors()
        .map(|dir| dir.join(LOCAL_DIR_NAME))
        .find(|candidate| candidate.is_dir())
}

/// Create a local `.lif` directory inside `dir`
pub fn init_local_dir(dir: &Path) -> Result<PathBuf, StoreError> {
    let local_dir = dir.join(LOCAL_DIR_NAME);
    if local_dir.exists() {
        return Err(StoreError::AlreadyInitialized(local_dir));
    }
    fs::create_dir_all(&local_dir).map_err(|e| StoreError::io(&local_dir, e))?;
    Ok(local_dir)
}

/// Atomically write content to a file using temp file + rename.
/// Missing parent directories are created.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &str) -> Result<(), StoreError> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&dir).map_err(|e| StoreError::io(&dir, e))?;

    let mut temp_file = NamedTempFile::new_in(&dir).map_err(|e| StoreError::io(&dir, e))?;
    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| StoreError::io(temp_file.path(), e))?;
    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| StoreError::io(temp_file.path(), e))?;

    temp_file.persist(path).map_err(|source| StoreError::Persist {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Read file content, `None` if the file doesn't exist
pub fn read_file<P: AsRef<Path>>(path: P) -> Result<Option<String>, StoreError> {
    let path = path.as_ref();
    if !path.exists() {
        return Ok(None);
    }
    fs::read_to_string(path)
        .map(Some)
        .map_err(|e| StoreError::io(path, e))
}
