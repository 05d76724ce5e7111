//! Hand-off from the wrapper to a toolchain binary.
//!
//! # Architecture
//!
//! A [`TargetResolver`] maps a command name to a binary path: inside an
//! extracted toolchain ([`GoRootResolver`]) or on the host `PATH`
//! ([`PathResolver`]). [`ToolchainEnv`] describes the variables the child
//! needs, and an [`Invocation`] carries program, arguments and those
//! variables to the child without touching this process's environment.
//!
//! # Example
//!
//! ```no_run
//! use rungo_shim::{GoRootResolver, Invocation, ToolchainEnv, exit_code};
//!
//! let root = "/home/me/.go/1.22.5";
//! let status = Invocation::resolve(&GoRootResolver::new(root), "go")?
//!     .args(["version"])
//!     .envs(ToolchainEnv::new(root).vars_from_env()?)
//!     .run()?;
//! std::process::exit(exit_code(status));
//! # Ok::<(), rungo_shim::Error>(())
//! ```

pub use binder::{GOROOT_VAR, PATH_VAR, SearchPath, ToolchainEnv};
pub use delegate::{Invocation, exit_code};
pub use error::{Error, Result};
pub use resolver::{
    DEFAULT_BINARY, GoRootResolver, PathResolver, TOOLCHAIN_BINARIES, TargetResolver, invoked_as,
    select_binary,
};

mod binder;
mod delegate;
mod error;
mod resolver;
