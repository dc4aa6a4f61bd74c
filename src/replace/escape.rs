/// Decode backslash escapes in a command-line pair argument.
///
/// Supports `\\`, `\a`, `\b`, `\f`, `\n`, `\r`, `\t`, `\v` and octal `\NNN`
/// (1-3 digits, value <= 255). An unknown escape yields the escaped byte itself;
/// a trailing lone backslash is kept literally.
pub fn unescape(arg: &str) -> Vec<u8> {
    let bytes = arg.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\\' {
            let (b, consumed) = decode_escape(&bytes[i + 1..]);
            out.push(b);
            i += 1 + consumed;
        } else {
            out.push(bytes[i]);
            i += 1;
        }
    }
    out
}

/// Decode the escape body following a backslash. Returns the byte and how many
/// bytes of `rest` were consumed.
fn decode_escape(rest: &[u8]) -> (u8, usize) {
    let Some(&first) = rest.first() else {
        return (b'\\', 0);
    };
    match first {
        b'a' => (0x07, 1),
        b'b' => (0x08, 1),
        b'f' => (0x0C, 1),
        b'n' => (b'\n', 1),
        b'r' => (b'\r', 1),
        b't' => (b'\t', 1),
        b'v' => (0x0B, 1),
        b'0'..=b'7' => {
            let mut val = u16::from(first - b'0');
            let mut consumed = 1;
            for &d in rest[1..].iter().take(2) {
                if !(b'0'..=b'7').contains(&d) {
                    break;
                }
                let next = val * 8 + u16::from(d - b'0');
                if next > 255 {
                    break;
                }
                val = next;
                consumed += 1;
            }
            (val as u8, consumed)
        }
        other => (other, 1),
    }
}
