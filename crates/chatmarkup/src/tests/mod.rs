mod property_escape;
mod property_nodes;

/// Case count for quickcheck properties: larger on CI, tiny under miri.
fn cases() -> u64 {
    #[cfg(not(miri))]
    let tests = if is_ci::cached() { 10_000 } else { 1_000 };
    #[cfg(miri)]
    let tests = 10;
    tests
}
