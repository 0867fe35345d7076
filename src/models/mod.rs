pub mod section;
pub mod submission;

pub use section::*;
pub use submission::*;
