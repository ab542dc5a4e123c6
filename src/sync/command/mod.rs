//! Command surface.
//!
//! Each submodule holds the clap arguments of one subcommand and the function running it.
//! Commands validate their arguments and configuration before any I/O, print progress
//! lines to standard output, and return an error for the binary to report.

pub mod backfill;
pub mod logs;
pub mod progress;
pub mod sync_cache;
pub mod sync_warehouse;
pub mod sync_window;

/// Date used by the window sync and the backfill when none is given.
pub const DEFAULT_CUTOFF_DATE: &str = "2025-10-31";

/// `0` on the command line means no limit.
fn non_zero<T: Default + PartialEq>(value: T) -> Option<T> {
    (value != T::default()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_means_unset() {
        assert_eq!(non_zero(0u64), None);
        assert_eq!(non_zero(25u64), Some(25));
        assert_eq!(non_zero(0usize), None);
    }
}
