// Domain value objects
pub mod identifiers;
pub mod scan_token;

pub use identifiers::*;
pub use scan_token::*;
