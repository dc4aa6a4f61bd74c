use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::process;

use clap::Parser;

use fbrepl::common::io::{read_file, read_stdin};
use fbrepl::common::{io_error_msg, reset_sigpipe};
use fbrepl::replace::{ByteReplacer, Error, Preset, unescape};

const TOOL_NAME: &str = "fbrepl";

#[derive(Parser)]
#[command(
    name = "fbrepl",
    version,
    about = "Replace or delete single ASCII bytes using a lookup table",
    override_usage = "fbrepl [OPTION]... [FILE]...",
    after_help = "Pairs are applied in one pass; when a byte is named twice the later pair wins.\n\
                  Presets come first, then --pair, then --delete.\n\
                  Bytes 128-255 are never changed, so UTF-8 text passes through intact.\n\
                  With no FILE, or when FILE is -, read standard input."
)]
struct Cli {
    /// Add a preset pair list: lower, upper, strip-punct, space-whitespace, strip-whitespace
    #[arg(short = 'p', long = "preset", value_name = "NAME")]
    presets: Vec<Preset>,

    /// Replace FROM with TO (one byte each, backslash escapes allowed); an empty TO deletes FROM
    #[arg(
        short = 'e',
        long = "pair",
        num_args = 2,
        value_names = ["FROM", "TO"],
        allow_hyphen_values = true
    )]
    pairs: Vec<String>,

    /// Delete every byte in CHARS (backslash escapes allowed)
    #[arg(
        short = 'd',
        long = "delete",
        value_name = "CHARS",
        allow_hyphen_values = true
    )]
    delete: Vec<String>,

    /// Input files
    files: Vec<String>,
}

/// Match/replacement list flattened from the command line, with the argument
/// each entry came from so errors can point back at it.
struct PairList {
    entries: Vec<Vec<u8>>,
    origins: Vec<String>,
}

impl PairList {
    fn push(&mut self, entry: Vec<u8>, origin: String) {
        self.entries.push(entry);
        self.origins.push(origin);
    }

    /// Describe a table error in terms of the user's arguments.
    fn describe(&self, err: &Error) -> String {
        let origin = |index: usize| self.origins.get(index).map(String::as_str);
        match *err {
            Error::OutOfRange { index, value } => match origin(index) {
                Some(o) => format!(
                    "byte 0x{:02X} in {} is outside the ASCII range 0-127",
                    value, o
                ),
                None => err.to_string(),
            },
            Error::TooLong(index) => match origin(index) {
                Some(o) => format!("{} is longer than one byte", o),
                None => err.to_string(),
            },
            Error::KeyNotOneByte(index) => match origin(index) {
                Some(o) => format!("{} must be exactly one byte", o),
                None => err.to_string(),
            },
            _ => err.to_string(),
        }
    }
}

/// Flatten the command line into one match/replacement list.
fn collect_pairs(cli: &Cli) -> PairList {
    let mut pairs = PairList {
        entries: Vec::new(),
        origins: Vec::new(),
    };
    for preset in &cli.presets {
        for s in preset.pairs() {
            pairs.push(s.as_bytes().to_vec(), format!("preset '{}'", preset));
        }
    }
    for (i, arg) in cli.pairs.iter().enumerate() {
        let role = if i % 2 == 0 { "FROM" } else { "TO" };
        pairs.push(unescape(arg), format!("--pair {} '{}'", role, arg));
    }
    for chars in &cli.delete {
        for b in unescape(chars) {
            let origin = format!("--delete '{}'", chars);
            pairs.push(vec![b], origin.clone());
            pairs.push(Vec::new(), origin);
        }
    }
    pairs
}

/// Enlarge the stdin/stdout pipe buffers on Linux for higher throughput.
#[cfg(target_os = "linux")]
fn enlarge_pipes() {
    for &fd in &[0i32, 1] {
        for &size in &[8 * 1024 * 1024i32, 1024 * 1024, 256 * 1024] {
            if unsafe { libc::fcntl(fd, libc::F_SETPIPE_SZ, size) } > 0 {
                break;
            }
        }
    }
}

/// Exit quietly on a closed pipe, otherwise report the write error.
fn write_failed(e: &io::Error) -> ! {
    if e.kind() == io::ErrorKind::BrokenPipe {
        process::exit(0);
    }
    eprintln!("{}: write error: {}", TOOL_NAME, io_error_msg(e));
    process::exit(1);
}

fn main() {
    reset_sigpipe();

    #[cfg(target_os = "linux")]
    enlarge_pipes();

    let cli = Cli::parse();

    let pairs = collect_pairs(&cli);
    let replacer = match ByteReplacer::from_string_pairs(&pairs.entries) {
        Ok(r) => r,
        Err(Error::EmptyInput) => {
            eprintln!("{}: no replacements given", TOOL_NAME);
            eprintln!("Try '{} --help' for more information.", TOOL_NAME);
            process::exit(1);
        }
        Err(e) => {
            eprintln!("{}: {}", TOOL_NAME, pairs.describe(&e));
            process::exit(1);
        }
    };

    let files: Vec<String> = if cli.files.is_empty() {
        vec!["-".to_string()]
    } else {
        cli.files
    };

    let stdout = io::stdout();
    let mut out = BufWriter::with_capacity(256 * 1024, stdout.lock());
    let mut had_error = false;

    for filename in &files {
        if filename == "-" {
            // stdin is already an owned buffer: compact it in place instead of copying.
            let mut data = match read_stdin() {
                Ok(d) => d,
                Err(e) => {
                    eprintln!("{}: standard input: {}", TOOL_NAME, io_error_msg(&e));
                    had_error = true;
                    continue;
                }
            };
            replacer.apply_in_place(&mut data);
            if let Err(e) = out.write_all(&data) {
                write_failed(&e);
            }
        } else {
            let data = match read_file(Path::new(filename)) {
                Ok(d) => d,
                Err(e) => {
                    eprintln!("{}: {}: {}", TOOL_NAME, filename, io_error_msg(&e));
                    had_error = true;
                    continue;
                }
            };
            if let Err(e) = replacer.apply_to(&data, &mut out) {
                write_failed(&e);
            }
        }
    }

    if let Err(e) = out.flush() {
        write_failed(&e);
    }

    if had_error {
        process::exit(1);
    }
}
