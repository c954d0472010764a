mod params;
mod scanner;

pub use params::*;
pub use scanner::*;

#[cfg(test)]
pub(crate) use params::params_block_bytes;
