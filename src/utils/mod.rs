//! Shared helpers: code generation, URL validation, anonymous usage cookie.

pub mod code_generator;
pub mod url_validator;
pub mod usage_cookie;
