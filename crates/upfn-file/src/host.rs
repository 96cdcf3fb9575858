//! Filesystem access with the host's ambient authority.
//!
//! Paths are resolved exactly as the operating system resolves them, so
//! symlinks are followed wherever they lead.

use std::fs;
use std::io::{self, Read};

use camino::Utf8Path;
use cap_std::ambient_authority;
use cap_std::fs::{Dir, File};

/// Read-only filesystem operations used by the provider.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem {
    /// Reads the whole file at `path`.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the file cannot be read.
    fn read(&self, path: &Utf8Path) -> io::Result<Vec<u8>>;

    /// Reports whether anything exists at `path`, following symlinks.
    fn exists(&self, path: &Utf8Path) -> bool;

    /// Returns the names of the entries in `dir`, in no particular order.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error when the directory cannot be read.
    fn list(&self, dir: &Utf8Path) -> io::Result<Vec<String>>;
}

/// The host filesystem, reached with ambient authority.
#[derive(Debug, Default, Clone, Copy)]
pub struct HostFilesystem;

impl Filesystem for HostFilesystem {
    fn read(&self, path: &Utf8Path) -> io::Result<Vec<u8>> {
        let mut file = File::open_ambient(path, ambient_authority())?;
        let mut contents = Vec::new();
        file.read_to_end(&mut contents)?;
        Ok(contents)
    }

    fn exists(&self, path: &Utf8Path) -> bool {
        fs::metadata(path).is_ok()
    }

    fn list(&self, dir: &Utf8Path) -> io::Result<Vec<String>> {
        let handle = Dir::open_ambient_dir(dir, ambient_authority())?;
        handle
            .entries()?
            .map(|entry| entry.map(|found| found.file_name().to_string_lossy().into_owned()))
            .collect()
    }
}
