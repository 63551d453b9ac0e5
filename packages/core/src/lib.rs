//! # Prooftree Core
//!
//! The data side of the proof tree editor:
//!
//! - [`ast`]: nodes, fields, line styles and immutable tree snapshots
//! - [`id_generator`]: session-unique opaque identifiers
//! - [`locator`]: depth-first search for nodes and fields by predicate
//! - [`serializer`]: deterministic prftree markup output
//! - [`reader`]: prftree markup back into a tree
//!
//! ```rust
//! use prooftree_core::{serialize, IdGenerator, ProofTree};
//!
//! let mut ids = IdGenerator::new("example");
//! let mut tree = ProofTree::blank(&mut ids);
//! tree.root_mut().conclusion.value = "A".to_string();
//!
//! assert_eq!(serialize(&tree), "\\prftree\n{ A }\n");
//! ```

pub mod ast;
pub mod error;
pub mod id_generator;
pub mod lexer;
pub mod locator;
pub mod reader;
pub mod serializer;

pub use ast::{Field, FieldId, FieldRole, LineStyle, Node, NodeId, ProofTree, Validity};
pub use error::{format_errors, ParseError, ParseResult, StructureError};
pub use id_generator::IdGenerator;
pub use reader::read_markup;
pub use serializer::{serialize, serialize_node, Serializer, INDENT};
