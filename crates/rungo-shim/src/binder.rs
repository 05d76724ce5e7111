use std::env;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

use crate::error::Result;

pub const GOROOT_VAR: &str = "GOROOT";
pub const PATH_VAR: &str = "PATH";

#[cfg(windows)]
fn paths_equal(p1: &Path, p2: &Path) -> bool {
    fn normalize(p: &Path) -> String {
        p.to_string_lossy()
            .trim_end_matches(['/', '\\'])
            .to_lowercase()
    }
    normalize(p1) == normalize(p2)
}

#[cfg(not(windows))]
fn paths_equal(p1: &Path, p2: &Path) -> bool {
    let trim = |p: &Path| p.to_string_lossy().trim_end_matches('/').to_string();
    trim(p1) == trim(p2)
}

/// An editable `PATH` value.
#[derive(Debug, Clone, Default)]
pub struct SearchPath {
    paths: Vec<PathBuf>,
}

impl SearchPath {
    pub fn parse(value: Option<&OsStr>) -> Self {
        Self {
            paths: value
                .map(|value| env::split_paths(value).collect())
                .unwrap_or_default(),
        }
    }

    /// Put `path` first, dropping any later occurrence of it.
    pub fn prepend(mut self, path: PathBuf) -> Self {
        self.paths.retain(|p| !paths_equal(p, &path));
        self.paths.insert(0, path);
        self
    }

    pub fn build(self) -> Result<OsString> {
        Ok(env::join_paths(self.paths)?)
    }
}

/// Environment a delegated toolchain process runs with.
///
/// `GOROOT` is always set, replacing any inherited value, and the
/// toolchain's `bin` directory leads `PATH`.
#[derive(Debug, Clone)]
pub struct ToolchainEnv {
    goroot: PathBuf,
}

impl ToolchainEnv {
    /// Binds the tree extracted under installation `root`.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            goroot: root.as_ref().join("go"),
        }
    }

    pub fn goroot(&self) -> &Path {
        &self.goroot
    }

    pub fn bin_dir(&self) -> PathBuf {
        self.goroot.join("bin")
    }

    /// Variables to set on the child, given the parent's `PATH`.
    pub fn vars(&self, inherited_path: Option<&OsStr>) -> Result<Vec<(OsString, OsString)>> {
        let path = SearchPath::parse(inherited_path)
            .prepend(self.bin_dir())
            .build()?;
        Ok(vec![
            (GOROOT_VAR.into(), self.goroot.clone().into_os_string()),
            (PATH_VAR.into(), path),
        ])
    }

    /// [`Self::vars`] against this process's `PATH`.
    pub fn vars_from_env(&self) -> Result<Vec<(OsString, OsString)>> {
        self.vars(env::var_os(PATH_VAR).as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lookup<'a>(vars: &'a [(OsString, OsString)], key: &str) -> &'a OsStr {
        vars.iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_os_str())
            .unwrap()
    }

    #[test]
    fn test_search_path_prepend_moves_to_front() {
        let inherited = env::join_paths(["/usr/bin", "/opt/go/bin", "/bin"]).unwrap();
        let path = SearchPath::parse(Some(&inherited))
            .prepend(PathBuf::from("/opt/go/bin"))
            .build()
            .unwrap();
        assert_eq!(
            env::split_paths(&path).collect::<Vec<_>>(),
            vec![
                PathBuf::from("/opt/go/bin"),
                PathBuf::from("/usr/bin"),
                PathBuf::from("/bin")
            ]
        );
    }

    #[test]
    fn test_search_path_trailing_separator_is_same_entry() {
        let inherited = env::join_paths(["/opt/go/bin/"]).unwrap();
        let path = SearchPath::parse(Some(&inherited))
            .prepend(PathBuf::from("/opt/go/bin"))
            .build()
            .unwrap();
        assert_eq!(path, OsString::from("/opt/go/bin"));
    }

    #[test]
    fn test_search_path_unset() {
        let path = SearchPath::parse(None).prepend(PathBuf::from("/x"));
        assert_eq!(path.build().unwrap(), OsString::from("/x"));
    }

    #[test]
    fn test_toolchain_env_vars() {
        let root = PathBuf::from("/home/me/.go/1.22.5");
        let bound = ToolchainEnv::new(&root);
        let inherited = env::join_paths(["/usr/bin"]).unwrap();
        let vars = bound.vars(Some(&inherited)).unwrap();

        assert_eq!(lookup(&vars, GOROOT_VAR), root.join("go").as_os_str());
        let path: Vec<PathBuf> = env::split_paths(lookup(&vars, PATH_VAR)).collect();
        assert_eq!(path, vec![root.join("go").join("bin"), PathBuf::from("/usr/bin")]);
    }

    #[cfg(unix)]
    #[test]
    fn test_unjoinable_path_is_an_error() {
        let bound = ToolchainEnv::new("/weird:root");
        assert!(bound.vars(None).is_err());
    }
}
