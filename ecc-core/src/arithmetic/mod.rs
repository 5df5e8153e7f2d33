mod modular;
mod point;

pub use modular::{invert, reduce};
pub use point::Point;
