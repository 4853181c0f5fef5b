//! Modeled parameters: the discriminated parameter engine and the typed
//! families built on it.

pub mod beam;
pub mod field;
pub mod material;
pub mod modeled;

pub use beam::{Correlation, Distribution};
pub use field::{Accel, Field, Sol};
pub use material::Material;
pub use modeled::ModeledParameter;
