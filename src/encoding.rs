//! Charset sniffing and streaming decode of candidate files.
//!
//! Files are read as opaque bytes: a fixed-size prefix is fed to a
//! statistical detector, the stream is rewound to byte zero, and the whole
//! file is then decoded incrementally while lines are split off. UTF-16 and
//! UTF-8 BOMs override the sniffed guess via the BOM-sniffing decoder.

use chardetng::EncodingDetector;
use encoding_rs::{CoderResult, Decoder, Encoding, UTF_8};
use std::fs::File;
use std::io::{self, BufReader, Read, Seek, SeekFrom};
use std::path::Path;

/// Bytes of file prefix fed to the statistical detector.
pub const SNIFF_LEN: usize = 4096;

/// Raw read buffer for the underlying byte stream.
const RAW_BUFFER_LEN: usize = 65536;

/// Chunk size for each incremental decode step.
const DECODE_CHUNK_LEN: usize = 8192;

/// Best-effort guess of the encoding of `prefix`, or `None` when there is
/// nothing to go on. Never fails; callers fall back to UTF-8.
pub fn detect(prefix: &[u8]) -> Option<&'static Encoding> {
    if prefix.is_empty() {
        return None;
    }
    let mut detector = EncodingDetector::new();
    detector.feed(prefix, true);
    Some(detector.guess(None, true))
}

/// Open `path`, sniff its encoding from the leading [`SNIFF_LEN`] bytes,
/// rewind to the start, and return a line reader decoding the full stream.
pub fn open_decoded_reader(path: &Path) -> io::Result<DecodedLineReader<BufReader<File>>> {
    let mut file = File::open(path)?;
    let mut prefix = vec![0u8; SNIFF_LEN];
    let sniffed = read_prefix(&mut file, &mut prefix);
    file.seek(SeekFrom::Start(0))?;
    let encoding = detect(&prefix[..sniffed]).unwrap_or(UTF_8);
    log::debug!("{}: decoding as {}", path.display(), encoding.name());
    let reader = BufReader::with_capacity(RAW_BUFFER_LEN, file);
    Ok(DecodedLineReader::new(reader, encoding))
}

/// Fill `buf` from the stream start as far as possible. Detection is
/// best-effort, so read errors simply truncate the sample.
fn read_prefix(file: &mut File, buf: &mut [u8]) -> usize {
    let mut filled = 0;
    while filled < buf.len() {
        match file.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(_) => break,
        }
    }
    filled
}

/// Incremental line reader over a byte stream in a known encoding.
///
/// A line is a maximal run up to `\n`; a trailing `\r` is stripped so CRLF
/// input behaves like LF input. A final unterminated line is still yielded.
pub struct DecodedLineReader<R: Read> {
    inner: R,
    decoder: Decoder,
    raw: Vec<u8>,
    /// Decoded text not yet returned; `start` is the consumed offset into it.
    decoded: String,
    start: usize,
    eof: bool,
}

impl<R: Read> DecodedLineReader<R> {
    pub fn new(inner: R, encoding: &'static Encoding) -> Self {
        Self {
            inner,
            decoder: encoding.new_decoder(),
            raw: vec![0u8; DECODE_CHUNK_LEN],
            decoded: String::with_capacity(RAW_BUFFER_LEN),
            start: 0,
            eof: false,
        }
    }

    /// Next decoded line, or `None` at end of stream.
    pub fn next_line(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(pos) = self.decoded[self.start..].find('\n') {
                let end = self.start + pos;
                let mut line = self.decoded[self.start..end].to_string();
                if line.ends_with('\r') {
                    line.pop();
                }
                self.start = end + 1;
                self.compact();
                return Ok(Some(line));
            }
            if self.eof {
                if self.start < self.decoded.len() {
                    let line = self.decoded[self.start..].to_string();
                    self.start = self.decoded.len();
                    return Ok(Some(line));
                }
                return Ok(None);
            }
            self.fill()?;
        }
    }

    /// Read one raw chunk and decode it onto the pending text.
    fn fill(&mut self) -> io::Result<()> {
        let n = loop {
            match self.inner.read(&mut self.raw) {
                Ok(n) => break n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => return Err(e),
            }
        };
        let last = n == 0;
        let mut consumed = 0;
        loop {
            let needed = self
                .decoder
                .max_utf8_buffer_length(n - consumed)
                .unwrap_or(DECODE_CHUNK_LEN * 4);
            self.decoded.reserve(needed);
            let (result, read, _had_errors) =
                self.decoder
                    .decode_to_string(&self.raw[consumed..n], &mut self.decoded, last);
            consumed += read;
            match result {
                CoderResult::InputEmpty => break,
                CoderResult::OutputFull => continue,
            }
        }
        if last {
            self.eof = true;
        }
        Ok(())
    }

    /// Drop already-consumed text so long files do not pin the whole decode.
    fn compact(&mut self) {
        if self.start >= RAW_BUFFER_LEN {
            self.decoded.drain(..self.start);
            self.start = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::UTF_8;
    use std::io::Cursor;

    fn lines_of(bytes: &[u8], encoding: &'static Encoding) -> Vec<String> {
        let mut reader = DecodedLineReader::new(Cursor::new(bytes.to_vec()), encoding);
        let mut lines = Vec::new();
        while let Some(line) = reader.next_line().unwrap() {
            lines.push(line);
        }
        lines
    }

    #[test]
    fn splits_lf_and_crlf_lines() {
        let lines = lines_of(b"alpha\nbeta\r\ngamma", UTF_8);
        assert_eq!(lines, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn empty_input_yields_no_lines() {
        assert!(lines_of(b"", UTF_8).is_empty());
    }

    #[test]
    fn trailing_newline_does_not_add_a_line() {
        let lines = lines_of(b"only\n", UTF_8);
        assert_eq!(lines, vec!["only"]);
    }

    #[test]
    fn decodes_utf16le_with_bom() {
        // "hi\nyo" as UTF-16 LE with BOM; the BOM-sniffing decoder must
        // override whatever encoding the reader was constructed with.
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "hi\nyo".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        let lines = lines_of(&bytes, UTF_8);
        assert_eq!(lines, vec!["hi", "yo"]);
    }

    #[test]
    fn detect_is_none_for_empty_prefix() {
        assert!(detect(b"").is_none());
    }

    #[test]
    fn detect_handles_legacy_single_byte_text() {
        // "café" in windows-1252.
        let encoding = detect(b"caf\xe9 au lait, tr\xe8s bien").unwrap();
        let (decoded, _, _) = encoding.decode(b"caf\xe9");
        assert_eq!(decoded, "café");
    }

    #[test]
    fn detect_recognises_utf8_multibyte_text() {
        let encoding = detect("こんにちは世界".as_bytes()).unwrap();
        assert_eq!(encoding, UTF_8);
    }

    #[test]
    fn long_lines_spanning_chunks_are_reassembled() {
        let long = "x".repeat(DECODE_CHUNK_LEN * 2 + 17);
        let input = format!("{long}\nshort");
        let lines = lines_of(input.as_bytes(), UTF_8);
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], long);
        assert_eq!(lines[1], "short");
    }
}
