//! Document output formats
//!
//! Every format implements [`Formatter`] and is looked up by name through a
//! [`FormatRegistry`]. The default registry carries `json`, `markup`,
//! `treeviz` and `yaml`.

mod registry;
mod serialized;
mod treeviz;

pub use registry::{FormatError, FormatRegistry, Formatter, DEFAULT_REGISTRY};
pub use serialized::{JsonFormatter, MarkupFormatter, YamlFormatter};
pub use treeviz::{to_treeviz_str, TreevizFormatter};
