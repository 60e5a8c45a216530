//! Build-time information
//!
//! Metadata captured by `build.rs` when the binary was compiled.

/// Build timestamp (when the binary was compiled)
pub const BUILD_TIMESTAMP: &str = env!("VERGEN_BUILD_TIMESTAMP");

/// Target triple (e.g., x86_64-unknown-linux-gnu)
pub const CARGO_TARGET_TRIPLE: &str = env!("VERGEN_CARGO_TARGET_TRIPLE");

/// Rust compiler version (e.g., 1.88.0)
pub const RUSTC_SEMVER: &str = env!("VERGEN_RUSTC_SEMVER");

/// Version string shown by `--version`
///
/// Format: `{pkg_version} ({target_triple}, rustc {rustc_version}, built {timestamp})`
pub const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("VERGEN_CARGO_TARGET_TRIPLE"),
    ", rustc ",
    env!("VERGEN_RUSTC_SEMVER"),
    ", built ",
    env!("VERGEN_BUILD_TIMESTAMP"),
    ")"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_long_version_contains_metadata() {
        assert!(LONG_VERSION.starts_with(env!("CARGO_PKG_VERSION")));
        assert!(LONG_VERSION.contains(CARGO_TARGET_TRIPLE));
        assert!(LONG_VERSION.contains(RUSTC_SEMVER));
        assert!(LONG_VERSION.contains(BUILD_TIMESTAMP));
    }
}
