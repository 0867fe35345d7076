pub mod conference;
pub mod normalize;

pub use conference::*;
pub use normalize::*;
