pub mod change;
pub mod snapshot;
pub mod task;

pub use change::StoreChange;
pub use snapshot::Snapshot;
pub use task::{ListKind, Task};
