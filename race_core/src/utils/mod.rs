pub mod hhmmss;
pub mod validation;
