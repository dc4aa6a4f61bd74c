/// Use mimalloc as the global allocator for the library and the binary.
/// Faster than glibc malloc for the per-chunk output buffers of parallel apply.
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

pub mod common;
pub mod replace;
