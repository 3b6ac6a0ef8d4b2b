pub mod error;
pub mod path;
pub mod size;
pub mod types;

pub use error::*;
pub use path::*;
pub use size::*;
pub use types::*;
