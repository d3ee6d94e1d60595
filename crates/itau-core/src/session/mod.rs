//! Session cache types.

mod entry;
mod memory;

pub use entry::SessionEntry;
pub use memory::MemorySessionStore;
