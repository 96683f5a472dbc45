pub mod round_stats;

pub use round_stats::RoundStats;
