//! Command-line surface.
//!
//! `rungo` is usually reached through a `go` or `gofmt` symlink. Under those
//! names nothing is parsed: every argument belongs to the toolchain and
//! settings come from the environment alone.

use std::ffi::OsString;
use std::path::PathBuf;

use clap::Parser;
use clap::builder::FalseyValueParser;
use rungo_platform::{Arch, DEFAULT_DOWNLOAD_BASE, Os};
use rungo_shim::{invoked_as, select_binary};

#[derive(Clone, Debug, Parser)]
#[command(
    name = "rungo",
    version = env!("CARGO_PKG_VERSION"),
    about = "Run the Go toolchain this project asks for",
    long_about = None,
    after_help = "\
VERSION RESOLUTION:
    1. GO_VERSION environment variable (or --go-version)
    2. The nearest .go-version file, walking up from the current directory
    3. The built-in default

    The version 'system' runs the go binary already on PATH.

ENVIRONMENT VARIABLES:
    GO_VERSION              Go version to run
    RUNGO_HOME              Installation base (default: ~/.go)
    RUNGO_DOWNLOAD_BASE     Distribution server URL
    RUNGO_VERBOSE           Enable debug logging
    RUST_LOG                Log filter, overrides RUNGO_VERBOSE"
)]
pub struct Cli {
    /// Go version to run instead of the resolved one.
    #[arg(long = "go-version", env = "GO_VERSION", value_name = "VERSION")]
    pub go_version: Option<String>,

    /// Target operating system of the downloaded toolchain.
    #[arg(long, value_name = "OS")]
    pub goos: Option<Os>,

    /// Target architecture of the downloaded toolchain.
    #[arg(long, value_name = "ARCH")]
    pub goarch: Option<Arch>,

    /// Directory holding one installation per version.
    #[arg(long, env = "RUNGO_HOME", value_name = "DIR")]
    pub root: Option<PathBuf>,

    /// Base URL that Go release archives are downloaded from.
    #[arg(
        long,
        env = "RUNGO_DOWNLOAD_BASE",
        value_name = "URL",
        default_value = DEFAULT_DOWNLOAD_BASE
    )]
    pub download_base: String,

    /// Log every step to stderr.
    #[arg(long, env = "RUNGO_VERBOSE", value_parser = FalseyValueParser::new())]
    pub verbose: bool,

    /// Install the toolchain, print its GOROOT parent and exit.
    #[arg(long)]
    pub print_root: bool,

    /// Arguments passed to the toolchain binary.
    #[arg(trailing_var_arg = true, allow_hyphen_values = true, value_name = "ARGS")]
    pub args: Vec<OsString>,
}

impl Cli {
    /// Settings from environment variables and defaults only.
    pub fn from_env_only() -> Result<Self, clap::Error> {
        Self::try_parse_from(["rungo"])
    }
}

/// The outcome of reading this process's command line.
#[derive(Clone, Debug)]
pub struct Launch {
    /// Toolchain binary to delegate to.
    pub binary: &'static str,
    pub cli: Cli,
    /// Arguments for `binary`, untouched.
    pub forwarded: Vec<OsString>,
}

impl Launch {
    pub fn parse<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        let mut args = args.into_iter().map(Into::into);
        let argv0 = args.next().unwrap_or_else(|| OsString::from("rungo"));
        let binary = select_binary(&argv0);

        if invoked_as(&argv0).is_some() {
            return Ok(Self {
                binary,
                cli: Cli::from_env_only()?,
                forwarded: args.collect(),
            });
        }

        let mut cli = Cli::try_parse_from(std::iter::once(argv0).chain(args))?;
        let forwarded = std::mem::take(&mut cli.args);
        Ok(Self {
            binary,
            cli,
            forwarded,
        })
    }
}
