pub mod action;
pub mod debug;
pub mod interactive;
pub mod judge;
pub mod poller;
pub mod render;
pub mod storage;
pub mod style;
pub mod verdict;

pub use debug::DebugDump;
pub use judge::Judge;
pub use poller::{PollTimedOut, StatusPoller, StatusSource};
pub use storage::Repository;
pub use verdict::Verdict;
