pub mod scenario;
pub mod util;

pub use util::{iteration_seed, parse_seeds, report_timestamp, split_csv};
