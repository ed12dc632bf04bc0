//! brace uses a type known as a `Syntax` to understand which delimiters
//! surround the expressions in a template. This module defines the
//! [`Builder`] type, which provides methods to easily generate a `Syntax`.
//!
//! After a `Syntax` has been created, it can be passed to an
//! [`Engine`][`crate::Engine`] and used to compile templates.
mod builder;

pub use builder::{Builder, Marker};
