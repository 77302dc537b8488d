#[macro_use]
extern crate log;
extern crate rand;
extern crate rand_xorshift;
extern crate thiserror;

mod error;
mod logger;
mod random;
mod range;
mod select;
mod value;

pub use self::error::*;
pub use self::logger::*;
pub use self::random::*;
pub use self::range::*;
pub use self::select::*;
pub use self::value::*;
