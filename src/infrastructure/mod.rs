pub mod memory_session;
pub mod session;

pub use memory_session::{MemoryPage, MemorySession};
pub use session::{ChromiumSession, PageSession};
