use std::fs::File;
use std::io::{self, Read};
use std::ops::Deref;
use std::path::Path;

#[cfg(target_os = "linux")]
use std::sync::atomic::{AtomicBool, Ordering};

use memmap2::Mmap;

/// Whole input held either as a read-only mapping or an owned buffer.
/// Dereferences to `&[u8]`.
pub enum FileData {
    Mmap(Mmap),
    Owned(Vec<u8>),
}

impl Deref for FileData {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            FileData::Mmap(m) => m,
            FileData::Owned(v) => v,
        }
    }
}

/// Files at least this large are mapped instead of read().
const MMAP_THRESHOLD: u64 = 1024 * 1024;

/// Cleared after the first EPERM so later opens skip the O_NOATIME attempt.
#[cfg(target_os = "linux")]
static NOATIME_SUPPORTED: AtomicBool = AtomicBool::new(true);

#[cfg(target_os = "linux")]
fn open_noatime(path: &Path) -> io::Result<File> {
    use std::os::unix::fs::OpenOptionsExt;
    if NOATIME_SUPPORTED.load(Ordering::Relaxed) {
        match std::fs::OpenOptions::new()
            .read(true)
            .custom_flags(libc::O_NOATIME)
            .open(path)
        {
            Ok(f) => return Ok(f),
            // O_NOATIME needs file ownership or CAP_FOWNER
            Err(ref e) if e.raw_os_error() == Some(libc::EPERM) => {
                NOATIME_SUPPORTED.store(false, Ordering::Relaxed);
            }
            Err(e) => return Err(e),
        }
    }
    File::open(path)
}

#[cfg(not(target_os = "linux"))]
fn open_noatime(path: &Path) -> io::Result<File> {
    File::open(path)
}

/// Read a whole file. Large regular files are mapped, everything else (small
/// files, pipes, devices, or a failed mapping) is read into a Vec.
pub fn read_file(path: &Path) -> io::Result<FileData> {
    let file = open_noatime(path)?;
    let metadata = file.metadata()?;

    if metadata.file_type().is_file() && metadata.len() >= MMAP_THRESHOLD {
        // SAFETY: read-only mapping; the file is not modified by this process.
        if let Ok(mmap) = unsafe { Mmap::map(&file) } {
            // The input is consumed in one forward pass.
            #[cfg(unix)]
            let _ = mmap.advise(memmap2::Advice::Sequential);
            return Ok(FileData::Mmap(mmap));
        }
    }

    let mut buf = Vec::with_capacity(metadata.len() as usize);
    (&file).read_to_end(&mut buf)?;
    Ok(FileData::Owned(buf))
}

/// Read all of stdin into a Vec.
pub fn read_stdin() -> io::Result<Vec<u8>> {
    read_all(&mut io::stdin().lock())
}

/// Drain a reader to EOF. Capacity grows geometrically, so a producer that
/// hands over a few bytes per read() costs no more than one delivering large blocks.
pub fn read_all(reader: &mut impl Read) -> io::Result<Vec<u8>> {
    const PREALLOC: usize = 64 * 1024;

    let mut buf = Vec::with_capacity(PREALLOC);
    reader.read_to_end(&mut buf)?;
    Ok(buf)
}
