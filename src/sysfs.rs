use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::Path;

/// File access used by [`crate::ControlService`].
///
/// Kept behind a trait so callers can substitute a recording or failing
/// implementation.
pub trait SysfsIo {
    fn read_text(&self, path: &Path) -> io::Result<String>;
    fn write_text(&self, path: &Path, content: &str) -> io::Result<()>;
}

/// Plain `std::fs` access to the real sysfs tree.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sysfs;

impl SysfsIo for Sysfs {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path)
    }

    // One write call per payload; the driver parses each write as a whole command.
    // Control files are never created: a missing one must surface as NotFound.
    fn write_text(&self, path: &Path, content: &str) -> io::Result<()> {
        let mut file = OpenOptions::new().write(true).truncate(true).open(path)?;
        file.write_all(content.as_bytes())
    }
}

impl<T: SysfsIo + ?Sized> SysfsIo for &T {
    fn read_text(&self, path: &Path) -> io::Result<String> {
        (**self).read_text(path)
    }

    fn write_text(&self, path: &Path, content: &str) -> io::Result<()> {
        (**self).write_text(path, content)
    }
}
