//! Reading and writing EmulationStation `gamelist.xml` files.
//!
//! Parsing yields one [`GameNode`] per `<game>` element with every child
//! tag and attribute preserved; writing emits the same shape back out.

pub mod error;
pub mod reader;
pub mod writer;

pub use error::XmlError;
pub use reader::{parse_gamelist, parse_gamelist_file};
pub use writer::{write_gamelist, write_gamelist_file};

pub use gamelist_core::GameNode;
