//! Output formatting and the final sanitization pass.

mod json;
mod validate;

pub use json::{to_json, JsonFormat};
pub use validate::OutputValidator;
