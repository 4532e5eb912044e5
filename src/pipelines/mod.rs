//! Render pipeline construction.
//!
//! - `basic` builds the opaque triangle-list pipeline used by [`crate::shader::Shader`]

pub mod basic;
