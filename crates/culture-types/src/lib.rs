pub mod grid;
pub mod cell;
pub mod bins;
pub mod params;
pub mod error;

pub use grid::*;
pub use cell::*;
pub use bins::*;
pub use params::*;
pub use error::*;
