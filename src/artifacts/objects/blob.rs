//! Blob object
//!
//! Blobs hold exact file contents, nothing else. Each unique content is
//! stored once, keyed by its digest.
//!
//! On disk: `blob <size>\0<content>`, zlib-compressed.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::io::{BufRead, Write};

#[derive(Debug, Clone, new)]
pub struct Blob {
    content: String,
}

impl Blob {
    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let content_bytes = self.content.as_bytes();

        let mut blob_bytes = Vec::new();
        let header = format!("{} {}\0", self.object_type().as_str(), content_bytes.len());
        blob_bytes.write_all(header.as_bytes())?;
        blob_bytes.write_all(content_bytes)?;

        Ok(Bytes::from(blob_bytes))
    }
}

impl Unpackable for Blob {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        // the framing has already been read
        let content = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;

        let content = String::from_utf8(content)?;
        Ok(Self::new(content))
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }
}
