pub mod io;

#[cfg(test)]
mod tests;

/// Restore default SIGPIPE handling so `fbrepl ... | head` exits quietly.
/// Rust ignores SIGPIPE by default, which turns a closed pipe into a write error.
/// Call at the start of main().
#[inline]
pub fn reset_sigpipe() {
    #[cfg(unix)]
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}

/// Format an IO error without the " (os error N)" suffix Rust's Display adds,
/// e.g. "No such file or directory".
pub fn io_error_msg(e: &std::io::Error) -> String {
    match e.raw_os_error() {
        Some(raw) => {
            let msg = std::io::Error::from_raw_os_error(raw).to_string();
            msg.replace(&format!(" (os error {})", raw), "")
        }
        None => e.to_string(),
    }
}
