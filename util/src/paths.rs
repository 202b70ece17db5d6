use crate::config;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

/// Create a directory (and all parents) if it doesn't exist, and return the path.
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> io::Result<PathBuf> {
    let p = path.as_ref();
    fs::create_dir_all(p)?;
    Ok(p.to_path_buf())
}

/// Global storage root (absolute), from `config::storage_root()`.
/// If relative in env, resolve against current_dir().
pub fn storage_root() -> PathBuf {
    let root = config::storage_root();
    let p = PathBuf::from(root);
    if p.is_absolute() {
        p
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| PathBuf::from("."))
            .join(p)
    }
}

/// Folder holding course records: {STORAGE_ROOT}/courses
pub fn courses_dir() -> PathBuf {
    storage_root().join("courses")
}

/// Course record path inside `dir`: {dir}/{course_id}.json
pub fn course_path_in(dir: &Path, course_id: &str) -> PathBuf {
    dir.join(format!("{course_id}.json"))
}

/// Uploaded outlines inside a course folder: {dir}/sources
pub fn sources_dir_in(dir: &Path) -> PathBuf {
    dir.join("sources")
}

/// Temp sibling used for atomic writes: {file}.tmp
pub fn temp_path(final_path: &Path) -> PathBuf {
    let mut tmp = final_path.to_path_buf();
    let fname = final_path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("course.json");
    tmp.set_file_name(format!("{fname}.tmp"));
    tmp
}
