use std::path::{Path, PathBuf};

/// Returns `path` relative to the process working directory when the
/// directory is a prefix of it, and the path unchanged otherwise.
/// Used for diagnostics only; never feeds back into parsing or
/// validation.
pub fn relative_path(path: &Path) -> PathBuf {
    match std::env::current_dir() {
        Ok(root) => path.strip_prefix(&root).unwrap_or(path).to_path_buf(),
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_under_working_directory_is_stripped() {
        let cwd = std::env::current_dir().unwrap();
        let path = cwd.join("mappings").join("sector.yaml");
        assert_eq!(relative_path(&path), PathBuf::from("mappings/sector.yaml"));
    }

    #[test]
    fn test_path_outside_working_directory_is_unchanged() {
        let path = Path::new("/somewhere/else/sector.yaml");
        assert_eq!(relative_path(path), path.to_path_buf());
    }
}
