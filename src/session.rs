//! Interactive dictionary session.
//!
//! A numbered menu read from any `BufRead` and written to any `Write`, so the
//! binary drives it with stdin/stdout and tests drive it with buffers.

use std::io::{BufRead, Write};
use std::str::FromStr;

use tracing::{debug, error};

use crate::codec::{check_word, FIELD_SEPARATOR};
use crate::data_structures::TrieStore;
use crate::error::{DictionaryError, DictionaryResult};
use crate::storage::DictionaryFile;

const MENU: &str = "\n1. Add Word\n2. Search Word\n3. Exit\nEnter your choice: ";
const NOT_FOUND: &str = "Word not found in the dictionary.";

/// An entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    /// Add a word and its definition
    Add,
    /// Look up a word
    Search,
    /// Leave the session
    Exit,
}

impl FromStr for MenuChoice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().parse::<u32>() {
            Ok(1) => Ok(Self::Add),
            Ok(2) => Ok(Self::Search),
            Ok(3) => Ok(Self::Exit),
            _ => Err(()),
        }
    }
}

/// Counters for one session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    /// Words added or redefined
    pub added: usize,
    /// Lookups that found a definition
    pub found: usize,
    /// Lookups that missed
    pub missed: usize,
}

/// The menu loop over a borrowed store.
pub struct Session<'a, R, W> {
    store: &'a mut TrieStore,
    input: R,
    output: W,
    stats: SessionStats,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    /// Creates a session that edits `store`.
    pub fn new(store: &'a mut TrieStore, input: R, output: W) -> Self {
        Self {
            store,
            input,
            output,
            stats: SessionStats::default(),
        }
    }

    /// Runs the menu until the user exits or input ends, even mid-command.
    pub fn run(mut self) -> DictionaryResult<SessionStats> {
        loop {
            write!(self.output, "{MENU}")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                break;
            };

            let keep_going = match line.parse::<MenuChoice>() {
                Ok(MenuChoice::Add) => self.add_word()?,
                Ok(MenuChoice::Search) => self.search_word()?,
                Ok(MenuChoice::Exit) => false,
                Err(()) => {
                    self.say("Invalid choice. Please try again.")?;
                    true
                }
            };

            if !keep_going {
                break;
            }
        }

        self.say("Exiting the program. Goodbye!")?;
        debug!(stats = ?self.stats, "Session finished");
        Ok(self.stats)
    }

    /// Returns `false` when input ended mid-command.
    fn add_word(&mut self) -> DictionaryResult<bool> {
        self.prompt("Enter the word: ")?;
        let Some((word, rest)) = self.read_token()? else {
            return Ok(false);
        };

        if let Err(e) = check_word(word.as_bytes()) {
            debug!(error = %e, "Word refused");
            self.say(&format!(
                "Words cannot contain '{}'.",
                char::from(FIELD_SEPARATOR)
            ))?;
            return Ok(true);
        }

        self.prompt("Enter the definition: ")?;
        let definition = match rest {
            Some(rest) => rest,
            None => match self.read_line()? {
                Some(line) => line,
                None => return Ok(false),
            },
        };

        let is_new = self.store.insert(&word, definition)?;
        debug!(%word, is_new, "Word added");
        self.stats.added += 1;
        self.say("Word added to the dictionary.")?;
        Ok(true)
    }

    /// Returns `false` when input ended mid-command.
    fn search_word(&mut self) -> DictionaryResult<bool> {
        self.prompt("Enter the word to search: ")?;
        let Some((word, _)) = self.read_token()? else {
            return Ok(false);
        };

        match self.store.lookup(&word) {
            Ok(definition) => {
                let message = format!("Definition of '{word}': {definition}");
                self.stats.found += 1;
                self.say(&message)?;
            }
            Err(e) => {
                debug!(error = %e, "Lookup missed");
                self.stats.missed += 1;
                self.say(NOT_FOUND)?;
            }
        }
        Ok(true)
    }

    /// Reads the next whitespace-delimited token, skipping blank lines.
    ///
    /// Text following the token on the same line (minus the one separating
    /// character) is returned as well so that `word definition` typed on a
    /// single line needs no second prompt.
    fn read_token(&mut self) -> DictionaryResult<Option<(String, Option<String>)>> {
        while let Some(line) = self.read_line()? {
            let trimmed = line.trim_start();
            if trimmed.is_empty() {
                continue;
            }
            let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());

            let word = trimmed[..end].to_string();
            let mut rest = trimmed[end..].chars();
            rest.next();
            let rest = rest.as_str();
            let rest = (!rest.is_empty()).then(|| rest.to_string());
            return Ok(Some((word, rest)));
        }
        Ok(None)
    }

    /// Reads one line without its terminator; `None` at end of input.
    ///
    /// Input is taken as bytes, so stray non-UTF-8 bytes are replaced rather
    /// than ending the session.
    fn read_line(&mut self) -> DictionaryResult<Option<String>> {
        let mut line = Vec::new();
        if self.input.read_until(b'\n', &mut line)? == 0 {
            return Ok(None);
        }
        if line.last() == Some(&b'\n') {
            line.pop();
            if line.last() == Some(&b'\r') {
                line.pop();
            }
        }
        Ok(Some(String::from_utf8_lossy(&line).into_owned()))
    }

    fn prompt(&mut self, text: &str) -> DictionaryResult<()> {
        write!(self.output, "{text}")?;
        self.output.flush()?;
        Ok(())
    }

    fn say(&mut self, text: &str) -> DictionaryResult<()> {
        writeln!(self.output, "{text}")?;
        Ok(())
    }
}

/// Loads `file`, runs an interactive session over it, then saves it.
///
/// A load failure is reported and the session starts empty. The store is
/// saved even when the session itself fails part way; the first error is
/// returned once saving has been attempted.
pub fn run_interactive<R, W>(
    file: &DictionaryFile,
    input: R,
    mut output: W,
) -> DictionaryResult<SessionStats>
where
    R: BufRead,
    W: Write,
{
    let path = file.path().display().to_string();
    let mut store = match file.load() {
        Ok(Some(store)) => {
            writeln!(output, "Dictionary loaded from {path}")?;
            store
        }
        Ok(None) => {
            writeln!(output, "No dictionary found at {path}, starting empty.")?;
            TrieStore::new()
        }
        Err(e) => {
            error!(error = %e, "Failed to load dictionary");
            writeln!(output, "Unable to open file for loading: {e}")?;
            TrieStore::new()
        }
    };

    let outcome = Session::new(&mut store, input, &mut output).run();
    if let Err(e) = &outcome {
        error!(error = %e, "Session ended early");
    }

    let saved = match file.save(&store) {
        Ok(_) => writeln!(output, "Dictionary saved to {path}").map_err(DictionaryError::from),
        Err(e) => {
            error!(error = %e, "Failed to save dictionary");
            if let Err(write_err) = writeln!(output, "Unable to open file for saving: {e}") {
                debug!(error = %write_err, "Could not report save failure");
            }
            Err(e)
        }
    };

    let stats = outcome?;
    saved?;
    Ok(stats)
}
