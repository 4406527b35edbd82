/// Tuning parameters consumed by the node table and operation caches.
///
/// `Config` is a plain data record: the distilled specification treats the configuration record
/// itself as an external collaborator, but the node table (§4.2) needs concrete values for every
/// field listed here, so the record is still part of this crate.
#[derive(Debug, Clone)]
pub struct Config {
    /// Initial slot count of the node table (including the two reserved terminal slots).
    pub initial_size: usize,
    /// Multiplicative growth factor applied when the table must extend.
    pub growth_factor: f64,
    /// Fraction of the table (0.0..=1.0) that a GC pass must free for growth to be skipped.
    pub minimum_free_node_percentage_after_gc: f64,
    /// When `false`, the table never runs GC and always grows instead.
    pub use_garbage_collection: bool,
    /// Per-cache-family divider: cache slot count is `next_prime(table_size / divider)`.
    pub cache_dividers: CacheDividers,
    /// When `true`, a manager logs `statistics()` at `log::info!` when it is dropped.
    pub log_statistics_on_shutdown: bool,
}

/// Divider parameters for each operation cache family (see §4.3).
#[derive(Debug, Clone, Copy)]
pub struct CacheDividers {
    pub negation: usize,
    pub binary: usize,
    pub implication: usize,
    pub if_then_else: usize,
    pub compose: usize,
    pub quantification: usize,
    pub satisfaction_count: usize,
}

impl Default for CacheDividers {
    fn default() -> Self {
        CacheDividers {
            negation: 16,
            binary: 4,
            implication: 8,
            if_then_else: 4,
            compose: 8,
            quantification: 8,
            satisfaction_count: 8,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            initial_size: 1 << 16,
            growth_factor: 2.0,
            minimum_free_node_percentage_after_gc: 0.1,
            use_garbage_collection: true,
            cache_dividers: CacheDividers::default(),
            log_statistics_on_shutdown: false,
        }
    }
}
