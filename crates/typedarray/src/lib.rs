#![doc = include_str!("../README.md")]

mod array;
mod describe;
mod error;
mod growth;
mod handle;
mod iterator;
mod options;
mod value;

pub use array::*;
pub use describe::{Describe, Indent};
pub use error::*;
pub use growth::*;
pub use handle::*;
pub use iterator::*;
pub use options::*;
pub use value::*;

const ONE_KIB: usize = 1024;
