use std::path::{Component, Path, PathBuf};

use crate::error::{Error, Result};

/// Normalize an entry path to a relative path inside the extraction root.
///
/// `.` components are dropped. Absolute paths, drive prefixes and `..` are
/// rejected outright rather than resolved.
pub fn sanitize_entry_path(entry: &Path) -> Result<PathBuf> {
    let mut clean = PathBuf::new();
    for component in entry.components() {
        match component {
            Component::Normal(part) => clean.push(part),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => {
                return Err(Error::PathEscape {
                    entry: entry.to_path_buf(),
                });
            }
        }
    }
    Ok(clean)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_path() {
        assert_eq!(
            sanitize_entry_path(Path::new("go/bin/go")).unwrap(),
            PathBuf::from("go/bin/go")
        );
    }

    #[test]
    fn test_cur_dir_components_are_dropped() {
        assert_eq!(
            sanitize_entry_path(Path::new("./go/./src")).unwrap(),
            PathBuf::from("go/src")
        );
        assert_eq!(sanitize_entry_path(Path::new("./")).unwrap(), PathBuf::new());
    }

    #[test]
    fn test_parent_dir_is_rejected() {
        assert!(matches!(
            sanitize_entry_path(Path::new("go/../../etc/passwd")),
            Err(Error::PathEscape { .. })
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_absolute_is_rejected() {
        assert!(matches!(
            sanitize_entry_path(Path::new("/etc/passwd")),
            Err(Error::PathEscape { .. })
        ));
    }
}
