//! Whole-file text I/O for prompt files.
//!
//! Prompt files are small; each is read fully into memory and written
//! back through a same-directory temp file so a crash never leaves a
//! half-written prompt behind.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Read a UTF-8 text file into memory.
pub fn read_text(path: &Path) -> io::Result<String> {
    fs::read_to_string(path)
}

/// Atomic write that keeps the original file's permissions.
pub fn write_atomic(path: &Path, data: &[u8]) -> io::Result<()> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    // Capture permissions before replacing the file
    let perms = fs::metadata(path).map(|m| m.permissions()).ok();

    let tmp = tempfile::NamedTempFile::new_in(dir)?;
    {
        let mut file = tmp.as_file();
        file.write_all(data)?;
        file.sync_all()?;
    }

    if let Some(perms) = perms {
        fs::set_permissions(tmp.path(), perms)?;
    }

    tmp.persist(path).map_err(|e| e.error)?;

    // fsync parent dir for rename durability
    #[cfg(unix)]
    {
        if let Ok(parent) = fs::File::open(dir) {
            let _ = parent.sync_all();
        }
    }

    Ok(())
}
