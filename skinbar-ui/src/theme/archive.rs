//! Read access to theme package contents

use std::fs::File;
use std::io::{Read, Seek};
use std::path::{Component, Path, PathBuf};

use zip::result::ZipError;
use zip::ZipArchive;

use super::ThemeError;

/// Upper bound on the buffer reserved up front from a zip entry's declared size.
const MAX_PREALLOC: u64 = 1 << 20;

/// Initial buffer size for an entry declaring `declared` bytes.
fn prealloc_len(declared: u64) -> usize {
    declared.min(MAX_PREALLOC) as usize
}

/// Something theme entries can be read from by path.
pub trait ArchiveSource {
    /// Raw bytes of the file entry at `path`.
    ///
    /// Fails with [`ThemeError::MissingEntry`] when nothing is stored under
    /// that path and [`ThemeError::NotAFile`] when the entry is a directory.
    fn read_entry(&mut self, path: &str) -> Result<Vec<u8>, ThemeError>;
}

/// Theme packed as a zip archive.
pub struct ZipSource<R> {
    archive: ZipArchive<R>,
}

impl ZipSource<File> {
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ThemeError> {
        let file = File::open(path.as_ref())?;
        Self::new(file)
    }
}

impl<R: Read + Seek> ZipSource<R> {
    pub fn new(reader: R) -> Result<Self, ThemeError> {
        Ok(Self {
            archive: ZipArchive::new(reader)?,
        })
    }
}

impl<R: Read + Seek> ArchiveSource for ZipSource<R> {
    fn read_entry(&mut self, path: &str) -> Result<Vec<u8>, ThemeError> {
        let mut file = match self.archive.by_name(path) {
            Ok(file) => file,
            Err(ZipError::FileNotFound) => return Err(ThemeError::MissingEntry(path.to_string())),
            Err(e) => return Err(e.into()),
        };
        if !file.is_file() {
            return Err(ThemeError::NotAFile(path.to_string()));
        }
        let mut buf = Vec::with_capacity(prealloc_len(file.size()));
        file.read_to_end(&mut buf)?;
        Ok(buf)
    }
}

/// Theme unpacked into a directory.
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl ArchiveSource for DirectorySource {
    fn read_entry(&mut self, path: &str) -> Result<Vec<u8>, ThemeError> {
        // Only plain relative paths, so an entry cannot name a file outside the package.
        let inside = Path::new(path)
            .components()
            .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
        if !inside {
            return Err(ThemeError::MissingEntry(path.to_string()));
        }
        let full = self.root.join(path);
        if !full.exists() {
            return Err(ThemeError::MissingEntry(path.to_string()));
        }
        if !full.is_file() {
            return Err(ThemeError::NotAFile(path.to_string()));
        }
        Ok(std::fs::read(full)?)
    }
}

/// Open a theme package: a directory is read as unpacked, anything else as zip.
pub fn open_package(path: impl AsRef<Path>) -> Result<Box<dyn ArchiveSource>, ThemeError> {
    let path = path.as_ref();
    if path.is_dir() {
        Ok(Box::new(DirectorySource::new(path)))
    } else {
        Ok(Box::new(ZipSource::open(path)?))
    }
}
