pub mod errors;
pub mod shutdown;

#[cfg(test)]
pub mod fixtures;

pub use errors::*;
pub use shutdown::*;
