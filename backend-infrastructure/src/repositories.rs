pub mod memory_ledger;
pub mod roster_files;

pub use memory_ledger::*;
pub use roster_files::*;
