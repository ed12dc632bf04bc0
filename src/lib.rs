//! brace - Expression Templates
//!
//! Replaces every `{{ expression }}` in a template with the value of the
//! expression, evaluated against a [`Scope`] of data. Expressions may read
//! paths such as `order.items[0].name`, do arithmetic, compare values, combine
//! conditions with `&&` and `||`, choose with `? :`, and call a fixed set of
//! functions with `fn.<name>(...)`.
//!
//! ```
//! use brace::{compile, Flags, Scope};
//! use serde_json::json;
//!
//! let scope = Scope::from(json!({
//!     "name": "ahoj",
//!     "total": 100,
//!     "answered": 1.2444,
//! }));
//! let result = compile(
//!     "{{fn.ucfirst(name)}}: {{fn.round((answered / total) * 100, 2)}} %",
//!     &scope,
//!     Flags::empty(),
//! );
//!
//! assert_eq!(result, "Ahoj: 1.24 %");
//! assert_eq!(result.used_paths(), ["name", "answered", "total"]);
//! ```
//!
//! Evaluation never fails. Anything that cannot be evaluated, from a missing
//! key to a function called with the wrong arguments, becomes null and
//! renders as nothing.
pub mod compile;
pub mod encode;
pub mod function;
pub mod render;
pub mod syntax;
pub mod value;

mod engine;
mod log;
mod pipe;
mod region;
mod scope;

pub use compile::{compile, CompileResult};
pub use engine::{Engine, Flags};
pub use log::Error;
pub use scope::Scope;
pub use value::Value;
