//! Named filters and the expression language behind them.
//!
//! The module is split into:
//! - **Catalog**: the fixed, ordered `{label, expression}` list (data, not
//!   code branches)
//! - **Expr**: parser for the filter-function chain grammar
//! - **Apply**: pixel application (color matrices, transfer functions,
//!   Gaussian blur)
//!
//! The seam between selection and rendering is the expression *string*: the
//! session stores only the string, and export parses and applies it. That is
//! what lets custom `--expr` chains ride the same path as catalog presets.

pub mod apply;
pub mod catalog;
pub mod expr;

pub use apply::apply_chain;
pub use catalog::{find, identity, FilterPreset, PRESETS};
pub use expr::{parse, FilterChain, FilterOp, ParseError};
