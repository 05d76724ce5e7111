use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};

use tracing::debug;

use crate::error::{Error, Result};
use crate::resolver::TargetResolver;

/// A fully described child process: program, arguments and the environment
/// entries layered over the inherited environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: PathBuf,
    args: Vec<OsString>,
    envs: Vec<(OsString, OsString)>,
}

impl Invocation {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            envs: Vec::new(),
        }
    }

    /// Resolve `command` through `resolver`.
    pub fn resolve<R: TargetResolver + ?Sized>(resolver: &R, command: &str) -> Result<Self> {
        resolver
            .resolve(command)
            .map(Self::new)
            .ok_or_else(|| Error::CommandNotFound(command.to_string()))
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn envs<I, K, V>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<OsString>,
        V: Into<OsString>,
    {
        self.envs
            .extend(vars.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    pub fn get_args(&self) -> &[OsString] {
        &self.args
    }

    pub fn get_envs(&self) -> &[(OsString, OsString)] {
        &self.envs
    }

    /// The child command with inherited stdio.
    pub fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .envs(self.envs.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());
        command
    }

    /// Run to completion and return the child's status.
    pub fn run(&self) -> Result<ExitStatus> {
        if !self.program.is_file() {
            return Err(Error::TargetNotFound(self.program.clone()));
        }
        debug!(
            "Executing {:?} with arguments {:?}",
            self.program, self.args
        );
        self.command().status().map_err(|source| Error::SpawnFailed {
            path: self.program.clone(),
            source,
        })
    }
}

/// Process exit code mirroring `status`.
///
/// A child killed by a signal yields `128 + signal` on Unix, as shells do.
pub fn exit_code(status: ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return 128 + signal;
        }
    }
    1
}
