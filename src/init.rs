//! Library bootstrap.
//!
//! No operation needs initialization; every type is usable immediately.
//! [`initialize`] exists for applications that want to confirm at startup
//! that the running CPU supports the instruction set the crate was compiled
//! for, and to log which backend is in use.
//!
//! ```
//! use lanemath::{finalize, initialize, Config};
//!
//! let backend = initialize(Config::default()).expect("CPU lacks compiled-in SIMD support");
//! println!("vector math backend: {backend}");
//! finalize();
//! ```

use crate::simd::{ACTIVE, BackendKind};

/// Startup options for [`initialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Config {
    /// Verify that the running CPU supports the compiled-in backend.
    /// Only effective with the `std` feature.
    pub check_cpu: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self { check_cpu: true }
    }
}

/// Errors from [`initialize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitError {
    /// The crate was compiled for an instruction set the running CPU lacks.
    UnsupportedCpu {
        backend: BackendKind,
        feature: &'static str,
    },
}

impl core::fmt::Display for InitError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            InitError::UnsupportedCpu { backend, feature } => write!(
                f,
                "{backend} backend requires CPU feature `{feature}`, which is not available"
            ),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InitError {}

/// Check the CPU against the compiled-in backend and report it.
///
/// Returns the active backend. Calling it more than once is harmless.
pub fn initialize(config: Config) -> Result<BackendKind, InitError> {
    if config.check_cpu {
        verify_cpu(ACTIVE)?;
    }
    #[cfg(feature = "log")]
    log::info!("Using {} implementation", ACTIVE);
    Ok(ACTIVE)
}

/// Counterpart of [`initialize`]. Holds no resources; only logs.
pub fn finalize() {
    #[cfg(feature = "log")]
    log::debug!("{} implementation finalized", ACTIVE);
}

/// CPU feature a backend relies on, as named by the detection macros.
pub const fn required_feature(kind: BackendKind) -> Option<&'static str> {
    match kind {
        BackendKind::Scalar => None,
        BackendKind::Sse2 => Some("sse2"),
        BackendKind::Sse3 => Some("sse3"),
        BackendKind::Sse4 => Some("sse4.1"),
        BackendKind::Neon => Some("neon"),
    }
}

#[cfg(feature = "std")]
fn verify_cpu(kind: BackendKind) -> Result<(), InitError> {
    match required_feature(kind) {
        Some(feature) if !detected(feature) => {
            #[cfg(feature = "log")]
            log::error!("CPU feature `{}` missing for {} backend", feature, kind);
            Err(InitError::UnsupportedCpu { backend: kind, feature })
        }
        _ => Ok(()),
    }
}

#[cfg(not(feature = "std"))]
fn verify_cpu(_kind: BackendKind) -> Result<(), InitError> {
    Ok(())
}

#[cfg(all(feature = "std", target_arch = "x86_64"))]
fn detected(feature: &str) -> bool {
    match feature {
        "sse2" => std::arch::is_x86_feature_detected!("sse2"),
        "sse3" => std::arch::is_x86_feature_detected!("sse3"),
        "sse4.1" => std::arch::is_x86_feature_detected!("sse4.1"),
        _ => false,
    }
}

#[cfg(all(feature = "std", target_arch = "aarch64"))]
fn detected(feature: &str) -> bool {
    match feature {
        "neon" => std::arch::is_aarch64_feature_detected!("neon"),
        _ => false,
    }
}

// Only the scalar backend is compiled on other targets.
#[cfg(all(feature = "std", not(any(target_arch = "x86_64", target_arch = "aarch64"))))]
fn detected(_feature: &str) -> bool {
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_checks_cpu() {
        assert!(Config::default().check_cpu);
    }

    #[test]
    fn initialize_reports_active_backend() {
        assert_eq!(initialize(Config::default()), Ok(ACTIVE));
        assert_eq!(initialize(Config { check_cpu: false }), Ok(ACTIVE));
        finalize();
    }

    #[test]
    fn required_features() {
        assert_eq!(required_feature(BackendKind::Scalar), None);
        assert_eq!(required_feature(BackendKind::Sse4), Some("sse4.1"));
    }

    #[test]
    fn error_display() {
        let e = InitError::UnsupportedCpu {
            backend: BackendKind::Sse3,
            feature: "sse3",
        };
        assert_eq!(
            e.to_string(),
            "SSE3 backend requires CPU feature `sse3`, which is not available"
        );
    }
}
