pub mod fs;
pub mod keys;
