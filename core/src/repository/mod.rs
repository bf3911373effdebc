pub mod memory;
pub mod traits;

pub use memory::InMemoryTaskLists;
pub use traits::TaskListRepository;
