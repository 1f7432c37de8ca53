use lanemath::{ACTIVE, BackendKind, Config, InitError, active_backend, finalize, initialize, required_feature};

// ── Initialization ───────────────────────────────────────────────────

#[test]
fn initialize_returns_active_backend() {
    let kind = initialize(Config::default()).expect("compiled-in backend should run on the build host");
    assert_eq!(kind, ACTIVE);
    assert_eq!(kind, active_backend());
    finalize();
}

#[test]
fn initialize_is_repeatable() {
    for _ in 0..3 {
        assert_eq!(initialize(Config::default()), Ok(ACTIVE));
    }
    finalize();
    finalize();
}

#[test]
fn skipping_cpu_check_always_succeeds() {
    assert_eq!(initialize(Config { check_cpu: false }), Ok(ACTIVE));
}

// ── Backend reporting ────────────────────────────────────────────────

#[test]
fn active_backend_fits_target() {
    let kind = active_backend();
    if cfg!(feature = "force-scalar") {
        assert_eq!(kind, BackendKind::Scalar);
    } else if cfg!(target_arch = "x86_64") {
        assert!(matches!(kind, BackendKind::Sse2 | BackendKind::Sse3 | BackendKind::Sse4));
    } else if cfg!(all(target_arch = "aarch64", target_feature = "neon")) {
        assert_eq!(kind, BackendKind::Neon);
    } else {
        assert_eq!(kind, BackendKind::Scalar);
    }
}

#[test]
fn every_simd_backend_names_a_cpu_feature() {
    for kind in [BackendKind::Sse2, BackendKind::Sse3, BackendKind::Sse4, BackendKind::Neon] {
        assert!(required_feature(kind).is_some(), "{kind}");
    }
    assert_eq!(required_feature(BackendKind::Scalar), None);
}

#[cfg(feature = "std")]
#[test]
fn unsupported_cpu_error_is_std_error() {
    let err = InitError::UnsupportedCpu {
        backend: BackendKind::Neon,
        feature: "neon",
    };
    let boxed: Box<dyn std::error::Error> = Box::new(err);
    assert_eq!(
        boxed.to_string(),
        "NEON backend requires CPU feature `neon`, which is not available"
    );
}
