// Internal
pub mod square;
// Exports
pub use square::*;
