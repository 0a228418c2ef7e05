pub mod fs_transport;
pub mod harness;
pub mod reports;
pub mod tester;

pub use fs_transport::FsTransport;
pub use tester::{LogicTester, ScenarioResult};
