mod property_strings;

/// Number of quickcheck cases to run, scaled for CI, Miri and `test-fast`.
pub(crate) fn test_count() -> u64 {
    if cfg!(any(miri, feature = "test-fast")) {
        10
    } else if is_ci::cached() {
        10_000
    } else {
        1_000
    }
}
