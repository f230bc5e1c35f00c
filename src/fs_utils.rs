use crate::error::{Result, StackgenError};
use std::fs;
use std::path::{Component, Path, PathBuf};
use walkdir::WalkDir;

/// Joins a template's relative path onto the output root
/// Ensures the path stays inside the output root
///
/// # Errors
///
/// Returns `StackgenError::PathTraversal` for absolute paths, empty paths, or
/// paths containing `..` components.
pub fn resolve_output_path(root: &Path, relative: &str) -> Result<PathBuf> {
    let relative_path = Path::new(relative);
    let mut cleaned = PathBuf::new();

    for component in relative_path.components() {
        match component {
            Component::Normal(part) => cleaned.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(StackgenError::PathTraversal {
                    path: relative_path.to_path_buf(),
                });
            }
        }
    }

    if cleaned.as_os_str().is_empty() {
        return Err(StackgenError::PathTraversal {
            path: relative_path.to_path_buf(),
        });
    }

    Ok(root.join(cleaned))
}

/// Writes `contents` to `path`, creating missing parent directories
///
/// # Errors
///
/// Returns `StackgenError::Io` if a directory or the file cannot be written.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, contents)?;
    Ok(())
}

/// Lists every regular file below `root`, sorted by path
///
/// # Errors
///
/// Returns `StackgenError::WalkDir` if the directory cannot be traversed.
pub fn collect_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry?;
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

/// Archive entry name for `path` relative to `root`, always `/`-separated
pub fn entry_name(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<String> = relative
        .components()
        .filter_map(|c| match c {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect();

    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}

/// Checks whether `path` would land inside `root`, even if neither exists yet
///
/// # Errors
///
/// Returns `StackgenError::Io` if the current directory cannot be read.
pub fn is_inside(path: &Path, root: &Path) -> Result<bool> {
    Ok(absolutize(path)?.starts_with(absolutize(root)?))
}

/// Canonicalizes the longest existing ancestor and re-appends the rest
///
/// # Errors
///
/// Returns `StackgenError::Io` if the current directory cannot be read.
pub fn absolutize(path: &Path) -> Result<PathBuf> {
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()?.join(path)
    };

    let mut existing = absolute.as_path();
    let mut rest = Vec::new();
    loop {
        if let Ok(canonical) = existing.canonicalize() {
            let mut result = canonical;
            for part in rest.iter().rev() {
                result.push(part);
            }
            return Ok(result);
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name.to_os_string());
                existing = parent;
            }
            _ => return Ok(absolute),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_resolve_output_path_basic() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        let result = resolve_output_path(root, "docker-compose.yml").unwrap();
        assert_eq!(result, root.join("docker-compose.yml"));

        let result = resolve_output_path(root, "grafana/provisioning/datasources.yml").unwrap();
        assert_eq!(result, root.join("grafana/provisioning/datasources.yml"));

        let result = resolve_output_path(root, "./prometheus/prometheus.yml").unwrap();
        assert_eq!(result, root.join("prometheus/prometheus.yml"));
    }

    #[test]
    fn test_resolve_output_path_traversal_prevention() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();

        let result = resolve_output_path(root, "../escape.yml");
        assert!(matches!(result, Err(StackgenError::PathTraversal { .. })));

        let result = resolve_output_path(root, "grafana/../../escape.yml");
        assert!(matches!(result, Err(StackgenError::PathTraversal { .. })));

        let result = resolve_output_path(root, "/etc/passwd");
        assert!(matches!(result, Err(StackgenError::PathTraversal { .. })));

        let result = resolve_output_path(root, "");
        assert!(matches!(result, Err(StackgenError::PathTraversal { .. })));

        let result = resolve_output_path(root, ".");
        assert!(matches!(result, Err(StackgenError::PathTraversal { .. })));
    }

    #[test]
    fn test_write_file_creates_parents() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("a/b/c/file.yml");

        write_file(&path, "key: value\n").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "key: value\n");

        // Overwrites existing content
        write_file(&path, "{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_collect_files_sorted_and_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("z/inner")).unwrap();
        fs::create_dir_all(root.join("empty")).unwrap();
        fs::write(root.join("b.txt"), "b").unwrap();
        fs::write(root.join("a.txt"), "a").unwrap();
        fs::write(root.join("z/inner/deep.txt"), "deep").unwrap();

        let files = collect_files(root).unwrap();
        let names: Vec<String> = files.iter().filter_map(|f| entry_name(root, f)).collect();
        assert_eq!(names, vec!["a.txt", "b.txt", "z/inner/deep.txt"]);
    }

    #[test]
    fn test_entry_name() {
        let root = Path::new("/out");
        assert_eq!(
            entry_name(root, Path::new("/out/grafana/dashboards/PostgreSQL.json")),
            Some("grafana/dashboards/PostgreSQL.json".to_string())
        );
        assert_eq!(entry_name(root, Path::new("/out")), None);
        assert_eq!(entry_name(root, Path::new("/elsewhere/file")), None);
    }

    #[test]
    fn test_is_inside() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path().join("bundle");

        // Neither path exists yet
        assert!(is_inside(&root.join("bundle.zip"), &root).unwrap());
        assert!(is_inside(&root.join("nested/dir/bundle.zip"), &root).unwrap());
        assert!(!is_inside(&temp_dir.path().join("bundle.zip"), &root).unwrap());

        // Sibling whose name shares the root's prefix
        assert!(!is_inside(&temp_dir.path().join("bundle2/x.zip"), &root).unwrap());

        fs::create_dir_all(&root).unwrap();
        assert!(is_inside(&root.join("bundle.zip"), &root).unwrap());
    }
}
