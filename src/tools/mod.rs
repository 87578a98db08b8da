pub mod output;
pub mod params;

pub use params::*;
