//! Nix archive (NAR) serialization
//!
//! Produces the canonical byte stream that content hashes are computed
//! over. Directory children are emitted in byte-wise name order, so the
//! encoding depends only on names, entry kinds, the owner-execute bit and
//! file contents, never on directory listing order or timestamps.

use crate::error::{ClosureError, Result};
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

const NAR_MAGIC: &[u8] = b"nix-archive-1";

/// Streaming NAR encoder over any writer.
pub struct NarWriter<W: Write> {
    out: W,
}

impl<W: Write> NarWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Serialize the filesystem entry at `root`.
    ///
    /// The walk is depth-first in sorted order, which is exactly NAR order;
    /// `open_dirs` tracks the depths of directory nodes not yet closed.
    pub fn dump(&mut self, root: &Path) -> Result<()> {
        self.string(NAR_MAGIC)
            .map_err(|e| ClosureError::io(root, e))?;

        let walker = WalkDir::new(root)
            .follow_links(false)
            .follow_root_links(false)
            .sort_by_file_name();

        let mut open_dirs: Vec<usize> = Vec::new();
        for entry in walker {
            let entry = entry?;
            let depth = entry.depth();
            while let Some(&open) = open_dirs.last() {
                if open < depth {
                    break;
                }
                open_dirs.pop();
                self.close_directory(open)
                    .map_err(|e| ClosureError::io(root, e))?;
            }
            if self.write_entry(&entry)? {
                open_dirs.push(depth);
            }
        }

        while let Some(open) = open_dirs.pop() {
            self.close_directory(open)
                .map_err(|e| ClosureError::io(root, e))?;
        }
        self.out.flush().map_err(|e| ClosureError::io(root, e))
    }

    /// Emit one entry. Returns true when a directory node was opened and
    /// must be closed once its children are written.
    fn write_entry(&mut self, entry: &DirEntry) -> Result<bool> {
        let path = entry.path();
        let io_err = |e: io::Error| ClosureError::io(path, e);

        if entry.depth() > 0 {
            self.string(b"entry").map_err(io_err)?;
            self.string(b"(").map_err(io_err)?;
            self.string(b"name").map_err(io_err)?;
            self.string(&name_bytes(entry)).map_err(io_err)?;
            self.string(b"node").map_err(io_err)?;
        }

        self.string(b"(").map_err(io_err)?;
        self.string(b"type").map_err(io_err)?;

        let file_type = entry.file_type();
        if file_type.is_dir() {
            self.string(b"directory").map_err(io_err)?;
            return Ok(true);
        }

        if file_type.is_file() {
            let metadata = entry.metadata()?;
            self.write_regular(path, &metadata)?;
        } else if file_type.is_symlink() {
            let target = fs::read_link(path).map_err(io_err)?;
            self.string(b"symlink").map_err(io_err)?;
            self.string(b"target").map_err(io_err)?;
            self.string(&os_bytes(target.as_os_str())).map_err(io_err)?;
        } else {
            return Err(ClosureError::UnsupportedFileType(path.to_path_buf()));
        }

        self.string(b")").map_err(io_err)?;
        if entry.depth() > 0 {
            self.string(b")").map_err(io_err)?;
        }
        Ok(false)
    }

    fn write_regular(&mut self, path: &Path, metadata: &fs::Metadata) -> Result<()> {
        let io_err = |e: io::Error| ClosureError::io(path, e);

        self.string(b"regular").map_err(io_err)?;
        if is_executable(metadata) {
            self.string(b"executable").map_err(io_err)?;
            self.string(b"").map_err(io_err)?;
        }
        self.string(b"contents").map_err(io_err)?;

        let file = File::open(path).map_err(io_err)?;
        self.write_contents(path, file, metadata.len())
    }

    /// Copy exactly `len` bytes of `reader` as a NAR string. A reader that
    /// ends early means the file shrank after its size was taken.
    fn write_contents<R: Read>(&mut self, path: &Path, reader: R, len: u64) -> Result<()> {
        let io_err = |e: io::Error| ClosureError::io(path, e);

        self.out.write_all(&len.to_le_bytes()).map_err(io_err)?;
        let copied = io::copy(&mut reader.take(len), &mut self.out).map_err(io_err)?;
        if copied != len {
            return Err(ClosureError::ContentChanged(path.to_path_buf()));
        }
        self.pad(len).map_err(io_err)
    }

    fn close_directory(&mut self, depth: usize) -> io::Result<()> {
        self.string(b")")?;
        if depth > 0 {
            self.string(b")")?;
        }
        Ok(())
    }

    /// Length-prefixed, zero-padded string.
    fn string(&mut self, bytes: &[u8]) -> io::Result<()> {
        let len = bytes.len() as u64;
        self.out.write_all(&len.to_le_bytes())?;
        self.out.write_all(bytes)?;
        self.pad(len)
    }

    fn pad(&mut self, len: u64) -> io::Result<()> {
        let rem = (len % 8) as usize;
        if rem != 0 {
            self.out.write_all(&[0u8; 8][..8 - rem])?;
        }
        Ok(())
    }
}

/// Serialize `path` as a NAR into `out`.
pub fn dump_path<W: Write>(path: &Path, out: W) -> Result<W> {
    let mut writer = NarWriter::new(out);
    writer.dump(path)?;
    Ok(writer.into_inner())
}

fn name_bytes(entry: &DirEntry) -> Vec<u8> {
    os_bytes(entry.file_name())
}

#[cfg(unix)]
fn os_bytes(s: &std::ffi::OsStr) -> Vec<u8> {
    use std::os::unix::ffi::OsStrExt;
    s.as_bytes().to_vec()
}

#[cfg(not(unix))]
fn os_bytes(s: &std::ffi::OsStr) -> Vec<u8> {
    s.to_string_lossy().into_owned().into_bytes()
}

#[cfg(unix)]
fn is_executable(metadata: &fs::Metadata) -> bool {
    use std::os::unix::fs::PermissionsExt;
    metadata.permissions().mode() & 0o100 != 0
}

#[cfg(not(unix))]
fn is_executable(_metadata: &fs::Metadata) -> bool {
    false
}
