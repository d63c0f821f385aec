//! Scoped temporary files for external capture tools.

use std::io;
use tempfile::TempPath;

/// Create a uniquely named temporary file and return its path guard. The
/// file is deleted when the guard drops, so cleanup holds on every exit
/// path of a strategy attempt.
pub fn scoped_temp(suffix: &str) -> io::Result<TempPath> {
    let file = tempfile::Builder::new()
        .prefix("vscode-auto-continue-")
        .suffix(suffix)
        .tempfile()?;
    Ok(file.into_temp_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn file_is_deleted_when_guard_drops() {
        let guard = scoped_temp(".png").unwrap();
        let path = PathBuf::from(&*guard);
        assert!(path.exists());
        assert!(path.extension().is_some_and(|ext| ext == "png"));
        drop(guard);
        assert!(!path.exists());
    }

    #[test]
    fn two_temp_files_never_collide() {
        let a = scoped_temp(".xwd").unwrap();
        let b = scoped_temp(".xwd").unwrap();
        assert_ne!(&*a, &*b);
    }
}
