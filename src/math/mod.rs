pub mod matrix4x4;

pub use matrix4x4::{Decomposed, Matrix4x4};
