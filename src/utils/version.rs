//! Version information

/// Crate version from Cargo metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Version string shown in logs and `--version`
pub fn get_version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_is_semver_like() {
        assert_eq!(get_version().split('.').count(), 3);
    }
}
