// Copyright (c) 2025 Trie Dictionary Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Line-oriented flat file codec.
//!
//! One record per stored word: `<word>,<definition>\n`. The word is everything
//! before the first comma, the definition everything after it up to the line
//! terminator. There is no header, footer or escaping.

use std::io::{BufRead, Write};

use tracing::{debug, info};

use super::{CodecError, CodecResult};
use crate::data_structures::TrieStore;

/// Separates the word from the definition within a record.
pub const FIELD_SEPARATOR: u8 = b',';

/// Terminates every record.
pub const RECORD_TERMINATOR: u8 = b'\n';

/// Counters reported by [`decode_into`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeStats {
    /// Records inserted into the store
    pub records: usize,

    /// Non-empty lines that were not records
    pub skipped: usize,
}

/// Writes every word of `store` to `sink`, one record per line.
///
/// Record order follows the store's traversal and is not stable across runs.
/// The sink is flushed before returning.
///
/// # Returns
///
/// * `Ok(usize)` - The number of records written.
/// * `Err(CodecError::Io)` - If writing to the sink failed.
/// * `Err(CodecError::InvalidRecord)` - If some word or definition would not
///   read back unchanged; nothing is written in that case.
pub fn encode<W: Write>(store: &TrieStore, mut sink: W) -> CodecResult<usize> {
    check_store(store)?;

    let mut written = 0;
    let mut failure = None;

    store.traverse(|word, definition| {
        if failure.is_some() {
            return;
        }
        match write_record(&mut sink, word, definition) {
            Ok(()) => written += 1,
            Err(e) => failure = Some(e),
        }
    });

    if let Some(e) = failure {
        return Err(CodecError::Io(e));
    }
    sink.flush()?;

    debug!(records = written, "Encoded dictionary");
    Ok(written)
}

/// Checks that `word` can be the word field of a record.
pub fn check_word(word: &[u8]) -> CodecResult<()> {
    let reason = if word.contains(&FIELD_SEPARATOR) {
        "word contains the field separator"
    } else if word.contains(&RECORD_TERMINATOR) {
        "word contains a line break"
    } else {
        return Ok(());
    };
    Err(invalid(word, reason))
}

/// Checks that a (word, definition) pair reads back as the same record.
pub fn check_record(word: &[u8], definition: &str) -> CodecResult<()> {
    check_word(word)?;
    if definition.as_bytes().contains(&RECORD_TERMINATOR) {
        return Err(invalid(word, "definition contains a line break"));
    }
    Ok(())
}

/// Checks every record of `store`, reporting the first bad one.
pub fn check_store(store: &TrieStore) -> CodecResult<()> {
    let mut result = Ok(());
    store.traverse(|word, definition| {
        if result.is_ok() {
            result = check_record(word, definition);
        }
    });
    result
}

fn invalid(word: &[u8], reason: &'static str) -> CodecError {
    CodecError::InvalidRecord {
        word: String::from_utf8_lossy(word).into_owned(),
        reason,
    }
}

fn write_record<W: Write>(sink: &mut W, word: &[u8], definition: &str) -> std::io::Result<()> {
    sink.write_all(word)?;
    sink.write_all(&[FIELD_SEPARATOR])?;
    sink.write_all(definition.as_bytes())?;
    sink.write_all(&[RECORD_TERMINATOR])
}

/// Reads records from `source` into a fresh store.
///
/// # Returns
///
/// * `Ok(TrieStore)` - The populated store.
/// * `Err(CodecError)` - If reading from the source failed.
pub fn decode<R: BufRead>(source: R) -> CodecResult<TrieStore> {
    let mut store = TrieStore::new();
    decode_into(&mut store, source)?;
    Ok(store)
}

/// Reads records from `source` into an existing store.
///
/// Only the `\n` terminator is stripped; a `\r` or trailing whitespace stays
/// part of the definition. Lines without a separator and lines with an empty
/// word are skipped. Records for words already in `store` overwrite them.
pub fn decode_into<R: BufRead>(store: &mut TrieStore, mut source: R) -> CodecResult<DecodeStats> {
    let mut stats = DecodeStats::default();
    let mut line = Vec::new();
    let mut line_no = 0usize;

    loop {
        line.clear();
        if source.read_until(RECORD_TERMINATOR, &mut line)? == 0 {
            break;
        }
        line_no += 1;

        if line.last() == Some(&RECORD_TERMINATOR) {
            line.pop();
        }
        if line.is_empty() {
            continue;
        }

        let Some((word, definition)) = split_record(&line) else {
            debug!(line = line_no, "Skipping line without a separator");
            stats.skipped += 1;
            continue;
        };

        match store.insert(word, String::from_utf8_lossy(definition)) {
            Ok(_) => stats.records += 1,
            Err(e) => {
                debug!(line = line_no, error = %e, "Skipping unusable record");
                stats.skipped += 1;
            }
        }
    }

    info!(records = stats.records, skipped = stats.skipped, "Decoded dictionary");
    Ok(stats)
}

/// Splits a line at the first separator.
fn split_record(line: &[u8]) -> Option<(&[u8], &[u8])> {
    let pos = line.iter().position(|&b| b == FIELD_SEPARATOR)?;
    Some((&line[..pos], &line[pos + 1..]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use test_case::test_case;

    fn decode_str(input: &str) -> TrieStore {
        decode(Cursor::new(input.as_bytes().to_vec())).unwrap()
    }

    #[test]
    fn test_encode_single_record() {
        let mut store = TrieStore::new();
        store.insert("hello", "a greeting").unwrap();

        let mut out = Vec::new();
        assert_eq!(encode(&store, &mut out).unwrap(), 1);
        assert_eq!(out, b"hello,a greeting\n");
    }

    #[test]
    fn test_encode_empty_store() {
        let mut out = Vec::new();
        assert_eq!(encode(&TrieStore::new(), &mut out).unwrap(), 0);
        assert!(out.is_empty());
    }

    #[test]
    fn test_encode_one_line_per_word() {
        let mut store = TrieStore::new();
        store.insert("a", "1").unwrap();
        store.insert("ab", "2").unwrap();
        store.insert("b", "3,with,commas").unwrap();

        let mut out = Vec::new();
        encode(&store, &mut out).unwrap();

        let text = String::from_utf8(out).unwrap();
        let mut lines: Vec<&str> = text.lines().collect();
        lines.sort();
        assert_eq!(lines, vec!["a,1", "ab,2", "b,3,with,commas"]);
    }

    #[test]
    fn test_hello_help_scenario() {
        let mut store = TrieStore::new();
        store.insert("hello", "a greeting").unwrap();
        store.insert("help", "assistance").unwrap();
        assert!(store.lookup("hel").unwrap_err().is_not_found());
        assert!(store.lookup("helpful").unwrap_err().is_not_found());

        let mut out = Vec::new();
        encode(&store, &mut out).unwrap();
        let decoded = decode(Cursor::new(out)).unwrap();

        assert_eq!(decoded.lookup("help").unwrap(), "assistance");
        assert_eq!(decoded.lookup("hello").unwrap(), "a greeting");
        assert!(decoded.lookup("hel").unwrap_err().is_not_found());
    }

    #[test_case("a,b,c", "a", "b,c" ; "comma in definition kept verbatim")]
    #[test_case("word,", "word", "" ; "empty definition")]
    #[test_case("word,def\r", "word", "def\r" ; "carriage return kept")]
    #[test_case("word, padded ", "word", " padded " ; "whitespace kept")]
    #[test_case("no newline,at end", "no newline", "at end" ; "unterminated last line")]
    fn test_decode_record(input: &str, word: &str, definition: &str) {
        let store = decode_str(input);
        assert_eq!(store.len(), 1);
        assert_eq!(store.lookup(word).unwrap(), definition);
    }

    #[test_case("noseparatorhere" ; "no separator")]
    #[test_case(",orphan definition" ; "empty word")]
    #[test_case("\n\n\n" ; "blank lines")]
    #[test_case("" ; "empty input")]
    fn test_decode_yields_no_words(input: &str) {
        let store = decode_str(input);
        assert!(store.is_empty());
        assert!(store.lookup("noseparatorhere").unwrap_err().is_not_found());
    }

    #[test]
    fn test_decode_later_record_wins() {
        let store = decode_str("key,old\nkey,new\n");
        assert_eq!(store.len(), 1);
        assert_eq!(store.lookup("key").unwrap(), "new");
    }

    #[test]
    fn test_decode_into_stats() {
        let mut store = TrieStore::new();
        store.insert("existing", "kept").unwrap();

        let input = "one,1\nbroken\n\ntwo,2\n,nothing\n";
        let stats = decode_into(&mut store, Cursor::new(input)).unwrap();

        assert_eq!(stats, DecodeStats { records: 2, skipped: 2 });
        assert_eq!(store.len(), 3);
        assert_eq!(store.lookup("existing").unwrap(), "kept");
    }

    #[test]
    fn test_decode_invalid_utf8_definition() {
        let store = decode(Cursor::new(b"w,\xff\n".to_vec())).unwrap();
        assert_eq!(store.lookup("w").unwrap(), "\u{fffd}");
    }

    #[test_case("bad,word", "fine" ; "separator in word")]
    #[test_case("bad\nword", "fine" ; "line break in word")]
    #[test_case("k", "line1\nother,x" ; "line break in definition")]
    fn test_encode_rejects_unreadable_record(word: &str, definition: &str) {
        let mut store = TrieStore::new();
        store.insert("good", "kept").unwrap();
        store.insert(word, definition).unwrap();

        let mut out = Vec::new();
        let err = encode(&store, &mut out).unwrap_err();

        assert!(matches!(err, CodecError::InvalidRecord { .. }));
        assert!(out.is_empty());
    }

    #[test]
    fn test_check_record() {
        assert!(check_record(b"word", "a, b and c").is_ok());
        assert!(check_record(b"word", "ends with\r").is_ok());
        assert!(check_word(b"a,b").is_err());
        assert!(check_record(b"word", "two\nlines").is_err());
    }

    #[test]
    fn test_encode_propagates_write_failure() {
        struct FailingSink;

        impl Write for FailingSink {
            fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
                Err(std::io::Error::new(std::io::ErrorKind::Other, "disk full"))
            }

            fn flush(&mut self) -> std::io::Result<()> {
                Ok(())
            }
        }

        let mut store = TrieStore::new();
        store.insert("a", "b").unwrap();

        let err = encode(&store, FailingSink).unwrap_err();
        assert!(err.to_string().contains("disk full"));
    }
}
