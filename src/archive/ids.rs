use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};

use crate::archive::manifest::Manifest;
use crate::error::ManifestError;

/// Overwrites every record's `id` with its 1-based position.
pub fn assign_sequential_ids(manifest: &mut Manifest) {
    for (index, record) in manifest.records_mut().iter_mut().enumerate() {
        record.set_id(index as u64 + 1);
    }
}

/// Two-space indent, literal UTF-8, trailing newline.
pub fn encode_manifest(manifest: &Manifest) -> Result<Vec<u8>, ManifestError> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut ser = Serializer::with_formatter(&mut buf, formatter);
    manifest
        .serialize(&mut ser)
        .map_err(|source| ManifestError::Serialize { source })?;
    buf.push(b'\n');
    Ok(buf)
}

/// Replaces `path` atomically; a failed run leaves any previous file intact.
pub fn write_manifest(path: &Path, manifest: &Manifest) -> Result<(), ManifestError> {
    let bytes = encode_manifest(manifest)?;
    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut tmp =
        tempfile::NamedTempFile::new_in(parent).map_err(|err| ManifestError::io(parent, err))?;
    tmp.write_all(&bytes)
        .and_then(|()| tmp.as_file().sync_all())
        .map_err(|err| ManifestError::io(tmp.path(), err))?;
    tmp.persist(path)
        .map_err(|err| ManifestError::io(path, err.error))?;

    tracing::debug!(path = %path.display(), records = manifest.len(), "manifest written");
    Ok(())
}

/// True when both paths name the same existing file.
pub fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}
