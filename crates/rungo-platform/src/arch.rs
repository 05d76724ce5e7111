//! CPU architecture naming, in the form used by Go release archives.

use std::fmt;
use std::str::FromStr;

use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arch {
    X86,
    Amd64,
    Arm,
    Arm64,
    Ppc64le,
    S390x,
    Riscv64,
    Loong64,
}

impl Arch {
    /// The architecture this binary was built for.
    pub fn current() -> Option<Self> {
        std::env::consts::ARCH.parse().ok()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Arch::X86 => "386",
            Arch::Amd64 => "amd64",
            // Go only publishes ARMv6 builds for 32-bit ARM.
            Arch::Arm => "armv6l",
            Arch::Arm64 => "arm64",
            Arch::Ppc64le => "ppc64le",
            Arch::S390x => "s390x",
            Arch::Riscv64 => "riscv64",
            Arch::Loong64 => "loong64",
        }
    }
}

impl FromStr for Arch {
    type Err = Error;

    /// Accepts Go names as well as the names reported by `std::env::consts::ARCH`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "386" | "x86" | "i386" | "i686" => Ok(Arch::X86),
            "amd64" | "x86_64" => Ok(Arch::Amd64),
            "arm" | "armv6l" | "armv7l" => Ok(Arch::Arm),
            "arm64" | "aarch64" => Ok(Arch::Arm64),
            "ppc64le" | "powerpc64le" => Ok(Arch::Ppc64le),
            "s390x" => Ok(Arch::S390x),
            "riscv64" => Ok(Arch::Riscv64),
            "loong64" | "loongarch64" => Ok(Arch::Loong64),
            _ => Err(Error::UnknownArch(s.to_string())),
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
