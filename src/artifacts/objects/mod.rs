//! Stored object types
//!
//! Everything the repository remembers lives in the content store as an
//! object identified by the SHA-1 of its serialized form. Three types exist:
//!
//! - **Blob**: exact file contents
//! - **Tree**: a staged snapshot, mapping paths to blob digests
//! - **Commit**: a tree digest plus history metadata
//!
//! All objects share the framing `<type> <size>\0<content>`; the digest is
//! computed over the full framed payload, so identical type+content always
//! collapses to the same object.

pub mod blob;
pub mod commit;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod tree;

/// Length of a SHA-1 digest in hexadecimal form
pub const OBJECT_ID_LENGTH: usize = 40;
