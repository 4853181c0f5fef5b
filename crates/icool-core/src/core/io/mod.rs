//! Reading problem definitions and writing `for001.dat` decks.

pub mod format;
pub mod input;
pub mod problem;
pub mod traits;

pub use input::IcoolInput;
pub use problem::{ProblemFile, ProblemLoadError};
pub use traits::For001;
