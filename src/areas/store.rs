//! Content-addressed object store
//!
//! Objects live under `.keep/objects/` at `<first-2-digest-chars>/<rest>`;
//! the fan-out directory is created the first time a prefix is seen and
//! carries no meaning. Writes are write-once: storing an object whose
//! digest is already present is a no-op, so identical content is never
//! stored twice.
//!
//! Blob payloads are zlib-compressed on disk; tree and commit payloads are
//! plain text. Reads tell the two apart by the zlib header byte (plain
//! objects always start with their ASCII type tag) and each typed decode
//! path checks the framing before parsing.

use crate::artifacts::core::RepoError;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::Tree;
use anyhow::Context;
use bytes::Bytes;
use std::io::{BufRead, Cursor, Read, Write};
use std::path::Path;

/// First byte of a zlib stream (any compression level).
const ZLIB_MAGIC: u8 = 0x78;

#[derive(Debug)]
pub struct ObjectStore {
    path: Box<Path>,
}

impl ObjectStore {
    pub fn new(path: Box<Path>) -> Self {
        ObjectStore { path }
    }

    pub fn objects_path(&self) -> &Path {
        &self.path
    }

    /// Persist an object and return its digest. Idempotent: if an object
    /// with the same digest already exists the write is skipped entirely.
    pub fn store(&self, object: &impl Object) -> anyhow::Result<ObjectId> {
        let oid = object.object_id()?;
        let object_path = self.path.join(oid.to_path());

        if !object_path.exists() {
            std::fs::create_dir_all(
                object_path
                    .parent()
                    .context(format!("Invalid object path {}", object_path.display()))?,
            )
            .context(format!(
                "Unable to create object directory {}",
                object_path.display()
            ))?;

            let payload = object.serialize()?;
            let payload = if object.object_type().is_compressed() {
                Self::compress(payload)?
            } else {
                payload
            };

            std::fs::write(&object_path, &payload).context(format!(
                "Unable to write object file {}",
                object_path.display()
            ))?;
        }

        Ok(oid)
    }

    /// Read an object's framed payload, reversing compression when the
    /// on-disk bytes are a zlib stream.
    pub fn load(&self, object_id: &ObjectId) -> anyhow::Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        if !object_path.exists() {
            return Err(RepoError::ObjectNotFound(object_id.to_string()).into());
        }

        let raw = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        if raw.first() == Some(&ZLIB_MAGIC) {
            Self::decompress(raw.into())
        } else {
            Ok(raw.into())
        }
    }

    pub fn parse_blob(&self, object_id: &ObjectId) -> anyhow::Result<Blob> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Blob => Blob::deserialize(object_reader),
            other => Err(anyhow::anyhow!(
                "object {object_id} is a {other}, not a blob"
            )),
        }
    }

    pub fn parse_tree(&self, object_id: &ObjectId) -> anyhow::Result<Tree> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Tree => Tree::deserialize(object_reader),
            other => Err(anyhow::anyhow!(
                "object {object_id} is a {other}, not a tree"
            )),
        }
    }

    pub fn parse_commit(&self, object_id: &ObjectId) -> anyhow::Result<Commit> {
        let (object_type, object_reader) = self.parse_object_as_bytes(object_id)?;

        match object_type {
            ObjectType::Commit => Commit::deserialize(object_reader),
            other => Err(anyhow::anyhow!(
                "object {object_id} is a {other}, not a commit"
            )),
        }
    }

    fn parse_object_as_bytes(
        &self,
        object_id: &ObjectId,
    ) -> anyhow::Result<(ObjectType, impl BufRead)> {
        let object_content = self.load(object_id)?;
        let mut object_reader = Cursor::new(object_content);

        let object_type = ObjectType::parse_object_type(&mut object_reader)?;

        Ok((object_type, object_reader))
    }

    fn compress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut encoder =
            flate2::write::ZlibEncoder::new(Vec::new(), flate2::Compression::default());
        encoder
            .write_all(&data)
            .context("Unable to compress object content")?;

        encoder
            .finish()
            .map(|compressed_content| compressed_content.into())
            .context("Unable to finish compressing object content")
    }

    fn decompress(data: Bytes) -> anyhow::Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder
            .read_to_end(&mut decompressed_content)
            .context("Unable to decompress object content")?;

        Ok(decompressed_content.into())
    }

}
