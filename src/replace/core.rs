use std::io::{self, Write};

use rayon::prelude::*;

use super::error::{Error, Result};

/// Replacement byte that marks a deletion in raw byte-pair input (ASCII BACKSPACE).
pub const DELETE_SENTINEL: u8 = 8;

/// Highest byte value a pair may name. 128..=255 always pass through untouched,
/// which keeps UTF-8 continuation bytes and 8-bit encodings intact.
pub const ASCII_MAX: u8 = 127;

/// Output chunk for `apply_to`: one write() per 8MB of input.
const BUF_SIZE: usize = 8 * 1024 * 1024;

/// Inputs at or above 4MB are split across the rayon pool.
const PARALLEL_THRESHOLD: usize = 4 * 1024 * 1024;

/// What happens to one input byte.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Action {
    /// Pass the byte through unchanged.
    #[default]
    Keep,
    /// Drop the byte from the output.
    Delete,
    /// Emit the given byte instead.
    ReplaceWith(u8),
}

/// Execution plan picked once at construction from the table contents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Strategy {
    Identity,
    Delete1(u8),
    Delete2(u8, u8),
    Delete3(u8, u8, u8),
    Table,
}

impl Strategy {
    fn plan(actions: &[Action; 256]) -> Self {
        let mut deleted = [0u8; 3];
        let mut count = 0;
        for (byte, action) in actions.iter().enumerate() {
            match *action {
                Action::Keep => {}
                Action::ReplaceWith(b) if b as usize == byte => {}
                Action::Delete if count < deleted.len() => {
                    deleted[count] = byte as u8;
                    count += 1;
                }
                _ => return Strategy::Table,
            }
        }
        match count {
            0 => Strategy::Identity,
            1 => Strategy::Delete1(deleted[0]),
            2 => Strategy::Delete2(deleted[0], deleted[1]),
            _ => Strategy::Delete3(deleted[0], deleted[1], deleted[2]),
        }
    }
}

/// A 256-entry substitution table addressed by byte value.
///
/// Built once from a pair list and immutable afterwards, so one instance can be
/// shared by reference across threads that each apply it to their own input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteReplacer {
    actions: [Action; 256],
    strategy: Strategy,
}

impl Default for ByteReplacer {
    fn default() -> Self {
        Self::identity()
    }
}

/// Reject empty and odd-length pair lists.
#[inline]
fn check_shape(len: usize) -> Result<()> {
    if len == 0 {
        return Err(Error::EmptyInput);
    }
    if len % 2 != 0 {
        return Err(Error::OddLength(len));
    }
    Ok(())
}

impl ByteReplacer {
    /// A table where every byte maps to `Keep`.
    pub fn identity() -> Self {
        Self::from_table([Action::Keep; 256])
    }

    fn from_table(actions: [Action; 256]) -> Self {
        let strategy = Strategy::plan(&actions);
        Self { actions, strategy }
    }

    /// Build from a flat slice of (match, replacement) byte pairs, e.g.
    /// `[b'.', 8, b'$', b'S']` removes dots and turns dollars into `S`.
    ///
    /// A replacement of [`DELETE_SENTINEL`] deletes the match. Every byte must be
    /// in 0..=127. Later pairs overwrite earlier ones for the same match byte.
    pub fn from_byte_pairs(pairs: &[u8]) -> Result<Self> {
        check_shape(pairs.len())?;
        if let Some(index) = pairs.iter().position(|&b| b > ASCII_MAX) {
            return Err(Error::OutOfRange {
                index,
                value: pairs[index],
            });
        }

        let mut actions = [Action::Keep; 256];
        for pair in pairs.chunks_exact(2) {
            actions[pair[0] as usize] = match pair[1] {
                DELETE_SENTINEL => Action::Delete,
                b => Action::ReplaceWith(b),
            };
        }
        Ok(Self::from_table(actions))
    }

    /// Build from alternating match/replacement strings, e.g. `[".", "", "$", "S"]`.
    ///
    /// Match entries must be exactly one byte. Replacements are one byte or empty,
    /// where empty means delete.
    pub fn from_string_pairs<S: AsRef<[u8]>>(pairs: &[S]) -> Result<Self> {
        check_shape(pairs.len())?;
        for (index, entry) in pairs.iter().enumerate() {
            match *entry.as_ref() {
                [] if index % 2 == 0 => return Err(Error::KeyNotOneByte(index)),
                [] => {}
                [value] if value > ASCII_MAX => {
                    return Err(Error::OutOfRange { index, value });
                }
                [_] => {}
                _ => return Err(Error::TooLong(index)),
            }
        }

        let mut actions = [Action::Keep; 256];
        for pair in pairs.chunks_exact(2) {
            let key = pair[0].as_ref()[0];
            actions[key as usize] = match pair[1].as_ref().first() {
                Some(&b) => Action::ReplaceWith(b),
                None => Action::Delete,
            };
        }
        Ok(Self::from_table(actions))
    }

    /// Build from explicit (match, action) entries.
    ///
    /// Unlike the byte-pair form this can replace with NUL or BACKSPACE. Errors
    /// report the entry position as `index`.
    pub fn from_actions<I>(entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, Action)>,
    {
        let mut actions = [Action::Keep; 256];
        let mut any = false;
        for (index, (key, action)) in entries.into_iter().enumerate() {
            if key > ASCII_MAX {
                return Err(Error::OutOfRange { index, value: key });
            }
            if let Action::ReplaceWith(value) = action {
                if value > ASCII_MAX {
                    return Err(Error::OutOfRange { index, value });
                }
            }
            actions[key as usize] = action;
            any = true;
        }
        if !any {
            return Err(Error::EmptyInput);
        }
        Ok(Self::from_table(actions))
    }

    #[inline]
    pub fn action(&self, byte: u8) -> Action {
        self.actions[byte as usize]
    }

    pub fn actions(&self) -> &[Action; 256] {
        &self.actions
    }

    /// True if applying this table can never change its input.
    pub fn is_identity(&self) -> bool {
        self.strategy == Strategy::Identity
    }

    /// Replace or remove bytes from `data`, returning a new buffer no longer than the input.
    pub fn apply(&self, data: &[u8]) -> Vec<u8> {
        let mut out = vec![0u8; data.len()];
        let n = self.apply_into(data, &mut out);
        out.truncate(n);
        out
    }

    /// Apply the table inside `data`, compacting over deleted bytes.
    pub fn apply_in_place(&self, data: &mut Vec<u8>) {
        if self.strategy == Strategy::Identity {
            return;
        }
        let mut wp = 0;
        for rp in 0..data.len() {
            let b = data[rp];
            match self.actions[b as usize] {
                Action::Keep => {
                    data[wp] = b;
                    wp += 1;
                }
                Action::ReplaceWith(r) => {
                    data[wp] = r;
                    wp += 1;
                }
                Action::Delete => {}
            }
        }
        data.truncate(wp);
    }

    /// Apply the table across all rayon threads. Output is identical to [`apply`](Self::apply).
    /// Small inputs take the sequential path.
    pub fn apply_parallel(&self, data: &[u8]) -> Vec<u8> {
        let num_threads = rayon::current_num_threads().max(1);
        if data.len() < PARALLEL_THRESHOLD || num_threads <= 1 {
            return self.apply(data);
        }
        self.apply_chunked(data, data.len().div_ceil(num_threads))
    }

    pub(super) fn apply_chunked(&self, data: &[u8], chunk_size: usize) -> Vec<u8> {
        let parts: Vec<Vec<u8>> = data
            .par_chunks(chunk_size.max(1))
            .map(|chunk| self.apply(chunk))
            .collect();
        let total = parts.iter().map(Vec::len).sum();
        let mut out = Vec::with_capacity(total);
        for part in &parts {
            out.extend_from_slice(part);
        }
        out
    }

    /// Apply the table to `data` and write the result, in 8MB chunks.
    /// Large inputs are transformed in parallel first.
    pub fn apply_to(&self, data: &[u8], writer: &mut impl Write) -> io::Result<()> {
        if data.is_empty() {
            return Ok(());
        }
        if self.strategy == Strategy::Identity {
            return writer.write_all(data);
        }
        if data.len() >= PARALLEL_THRESHOLD && rayon::current_num_threads() > 1 {
            return writer.write_all(&self.apply_parallel(data));
        }

        let buf_size = data.len().min(BUF_SIZE);
        let mut buf = vec![0u8; buf_size];
        for chunk in data.chunks(buf_size) {
            let n = self.apply_into(chunk, &mut buf);
            writer.write_all(&buf[..n])?;
        }
        Ok(())
    }

    /// Write the transformed `src` to the front of `dst`, returning the length written.
    /// `dst` must be at least as long as `src`.
    fn apply_into(&self, src: &[u8], dst: &mut [u8]) -> usize {
        debug_assert!(dst.len() >= src.len());
        match self.strategy {
            Strategy::Identity => {
                dst[..src.len()].copy_from_slice(src);
                src.len()
            }
            Strategy::Delete1(a) => copy_runs(src, memchr::memchr_iter(a, src), dst),
            Strategy::Delete2(a, b) => copy_runs(src, memchr::memchr2_iter(a, b, src), dst),
            Strategy::Delete3(a, b, c) => {
                copy_runs(src, memchr::memchr3_iter(a, b, c, src), dst)
            }
            Strategy::Table => translate_compact(&self.actions, src, dst),
        }
    }
}

/// Table walk: one lookup per byte, write cursor advances unless the byte is deleted.
#[inline]
fn translate_compact(actions: &[Action; 256], src: &[u8], dst: &mut [u8]) -> usize {
    let mut wp = 0;
    for &b in src {
        match actions[b as usize] {
            Action::Keep => {
                dst[wp] = b;
                wp += 1;
            }
            Action::ReplaceWith(r) => {
                dst[wp] = r;
                wp += 1;
            }
            Action::Delete => {}
        }
    }
    wp
}

/// Bulk-copy the runs between deleted positions found by memchr.
#[inline]
fn copy_runs(src: &[u8], deleted: impl Iterator<Item = usize>, dst: &mut [u8]) -> usize {
    let mut wp = 0;
    let mut last = 0;
    for pos in deleted {
        if pos > last {
            let run = pos - last;
            dst[wp..wp + run].copy_from_slice(&src[last..pos]);
            wp += run;
        }
        last = pos + 1;
    }
    if last < src.len() {
        let run = src.len() - last;
        dst[wp..wp + run].copy_from_slice(&src[last..]);
        wp += run;
    }
    wp
}
