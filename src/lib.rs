//! Flow type annotations to React prop-types validators
//!
//! # Example
//!
//! ```
//! use flow_prop_types::builder::*;
//! use flow_prop_types::{MemoryLoader, Options, ConvertConfig, SourceFile, StaticRefs};
//! use flow_prop_types::{ValidatorExpr, convert_type_to_validators};
//!
//! let file = SourceFile::new("/Foo.js", Default::default());
//! let props = object(vec![field("a", number()), optional_field("b", string())]);
//!
//! let refs = StaticRefs::default();
//! let loader = MemoryLoader::new();
//! let config = ConvertConfig::default();
//! let options = Options { refs: &refs, loader: &loader, config: &config };
//!
//! let fields = convert_type_to_validators(&props, &file, &options).unwrap();
//! assert_eq!(
//!     ValidatorExpr::Object(fields).to_string(),
//!     "{\n  a: PropTypes.number.isRequired,\n  b: PropTypes.string\n}"
//! );
//! ```

pub mod ast;
pub mod builder;
pub mod convert;
pub mod error;
pub mod host;
pub mod literal;
pub mod module;
pub mod options;
mod print;
pub mod resolver;
pub mod scope;
pub mod validator;

pub use convert::convert_type_to_validators;
pub use error::{ConvertError, ErrorKind, LoadError, SourceLocation};
pub use host::{ComponentReport, Transformed, transform};
pub use module::{MemoryLoader, ModuleLoader, ResolutionOptions, SourceFile};
pub use options::{ConvertConfig, ImportTarget, Options, PluginOptions, StaticRefs, ValidatorRefs};
pub use validator::{Conversion, Field, LiteralValue, ValidatorExpr};
