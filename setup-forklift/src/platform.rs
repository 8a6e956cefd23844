//! Host platform identification.
//!
//! The runner reports its platform in Node-style tokens (`linux`, `darwin`,
//! `win32`; `x64`, `arm64`, ...). Forklift release archives use Go-style
//! tokens instead, so two small mappings sit between them.

/// Map a raw architecture token to the vendor's naming convention.
///
/// `x64` becomes `amd64`; every other token passes through unchanged.
pub fn map_arch(arch: &str) -> &str {
    match arch {
        "x64" => "amd64",
        other => other,
    }
}

/// Map a raw OS token to the vendor's naming convention.
///
/// `win32` becomes `windows`; every other token passes through unchanged.
pub fn map_os(os: &str) -> &str {
    match os {
        "win32" => "windows",
        other => other,
    }
}

/// Raw OS and architecture tokens of the machine being provisioned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Host {
    pub os: String,
    pub arch: String,
}

impl Host {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// Detect the live host and report it in the runner's raw vocabulary.
    pub fn detect() -> Self {
        let os = match std::env::consts::OS {
            "windows" => "win32",
            "macos" => "darwin",
            other => other,
        };
        let arch = match std::env::consts::ARCH {
            "x86_64" => "x64",
            "aarch64" => "arm64",
            "x86" => "ia32",
            other => other,
        };
        Self::new(os, arch)
    }

    pub fn is_windows(&self) -> bool {
        self.os == "win32"
    }

    /// OS token as it appears in release archive names.
    pub fn vendor_os(&self) -> &str {
        map_os(&self.os)
    }

    /// Architecture token as it appears in release archive names.
    pub fn vendor_arch(&self) -> &str {
        map_arch(&self.arch)
    }
}
