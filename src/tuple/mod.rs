pub mod tuple;
pub use tuple::*;

pub mod numeric;
pub use numeric::*;
