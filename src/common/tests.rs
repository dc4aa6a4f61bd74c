use super::io::{FileData, read_all, read_file};
use super::io_error_msg;

#[test]
fn test_read_file_small() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("small.txt");
    std::fs::write(&path, "Hi. Send me some $").unwrap();

    let data = read_file(&path).unwrap();
    assert!(matches!(data, FileData::Owned(_)));
    assert_eq!(&*data, b"Hi. Send me some $");
}

#[test]
fn test_read_file_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.txt");
    std::fs::write(&path, "").unwrap();

    assert!(read_file(&path).unwrap().is_empty());
}

#[test]
fn test_read_file_large_uses_full_contents() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("large.bin");
    let content: Vec<u8> = (0..=255u8).cycle().take(3 * 1024 * 1024 + 17).collect();
    std::fs::write(&path, &content).unwrap();

    let data = read_file(&path).unwrap();
    assert!(matches!(data, FileData::Mmap(_)));
    assert_eq!(data.len(), content.len());
    assert_eq!(&*data, &content[..]);
}

#[test]
fn test_read_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let err = match read_file(&dir.path().join("nope")) {
        Ok(_) => panic!("expected an error"),
        Err(e) => e,
    };
    assert_eq!(err.kind(), std::io::ErrorKind::NotFound);
    assert!(!io_error_msg(&err).contains("os error"));
}

#[test]
fn test_read_all_from_slice() {
    let mut input: &[u8] = b"\xc3\x85skar det?";
    assert_eq!(read_all(&mut input).unwrap(), b"\xc3\x85skar det?");
}

/// Reader that hands over at most `step` bytes per read(), like a line-buffered pipe.
struct Trickle<'a> {
    data: &'a [u8],
    step: usize,
    calls: usize,
}

impl std::io::Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        let n = self.data.len().min(self.step).min(buf.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        self.calls += 1;
        Ok(n)
    }
}

#[test]
fn test_read_all_small_reads() {
    let content: Vec<u8> = b"Hi. Send me some $, thank you.\n"
        .iter()
        .copied()
        .cycle()
        .take(1024 * 1024)
        .collect();
    let mut reader = Trickle {
        data: &content,
        step: 80,
        calls: 0,
    };

    let start = std::time::Instant::now();
    let data = read_all(&mut reader).unwrap();
    let elapsed = start.elapsed();

    assert_eq!(data, content);
    assert!(reader.calls >= content.len() / 80);
    // 13k reads of 80 bytes; zero-filling a large chunk per read takes tens of seconds.
    assert!(elapsed < std::time::Duration::from_secs(2), "{:?}", elapsed);
}

#[test]
fn test_read_all_retries_interrupted() {
    struct Flaky {
        interrupted: bool,
        data: &'static [u8],
    }
    impl std::io::Read for Flaky {
        fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
            if !self.interrupted {
                self.interrupted = true;
                return Err(std::io::ErrorKind::Interrupted.into());
            }
            let n = self.data.len().min(buf.len());
            buf[..n].copy_from_slice(&self.data[..n]);
            self.data = &self.data[n..];
            Ok(n)
        }
    }

    let mut reader = Flaky {
        interrupted: false,
        data: b"abc",
    };
    assert_eq!(read_all(&mut reader).unwrap(), b"abc");
}

#[test]
fn test_io_error_msg_custom() {
    let e = std::io::Error::other("boom");
    assert_eq!(io_error_msg(&e), "boom");
}
