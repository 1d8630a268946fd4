//! Formatting engine: length estimator, number writer, field renderer and the
//! format interpreter.

pub mod field;
pub mod length;
pub mod number;
pub mod printf;
