//! KRM Function SDK
//!
//! The pieces every Kubernetes Resource Model function needs, without the
//! function logic itself:
//! - [`ResourceList`]: the wire envelope read from stdin and written to stdout
//! - [`FunctionResult`]: diagnostic records appended to the list
//! - [`ResourceListProcessor`] and [`run`]: the seam a function implements
//!   and the driver that wires it to I/O
//!
//! # Example
//!
//! ```no_run
//! use krm_fn::{KrmError, ResourceList, ResourceListProcessor};
//!
//! struct Noop;
//!
//! impl ResourceListProcessor for Noop {
//!     fn process(&self, _rl: &mut ResourceList) -> Result<(), KrmError> {
//!         Ok(())
//!     }
//! }
//!
//! # fn main() -> Result<(), KrmError> {
//! let rl = krm_fn::run(&Noop, std::io::stdin(), std::io::stdout())?;
//! assert!(!rl.has_errors());
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod object;
pub mod processor;
pub mod resource_list;
pub mod result;

pub use error::KrmError;
pub use object::{decode_object, is_resource};
pub use processor::{run, ResourceListProcessor};
pub use resource_list::ResourceList;
pub use result::{Field, File, FunctionResult, ResourceRef, Severity};
