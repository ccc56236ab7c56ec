use std::fs;
use std::path::{Path, PathBuf};

use itertools::Itertools;
use rand::Rng;
use thiserror::Error;
use tracing::{error, info};

pub const RANDOM_TEXT_MIN_LEN: usize = 40;
pub const RANDOM_TEXT_MAX_LEN: usize = 80;
const RANDOM_CODE_POINTS: std::ops::RangeInclusive<u8> = 33..=125;

/// Highest `text_<n>` resource number
pub const MAX_TEXT_NUMBER: u8 = 9;
pub const LONG_TEXT_NAME: &str = "long_text";

#[derive(Debug, Error)]
pub enum TextSourceError {
    #[error("cannot read text resource {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("text resource {} is empty", .0.display())]
    Empty(PathBuf),

    #[error("no text resource numbered {0} (expected 0-9)")]
    OutOfRange(u8),
}

/// Random run of printable ASCII symbols, 40 to 80 long
pub fn random_text<R: Rng>(rng: &mut R) -> String {
    let len = rng.gen_range(RANDOM_TEXT_MIN_LEN..=RANDOM_TEXT_MAX_LEN);
    (0..len)
        .map(|_| char::from(rng.gen_range(RANDOM_CODE_POINTS)))
        .collect()
}

/// Directory of text resources: `text_0` .. `text_9` and `long_text`
#[derive(Debug, Clone)]
pub struct TextLibrary {
    dir: PathBuf,
}

impl TextLibrary {
    pub fn new<P: AsRef<Path>>(dir: P) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
        }
    }


    /// Contents of `text_<n>` for typing verbatim
    pub fn numbered(&self, n: u8) -> Result<String, TextSourceError> {
        if n > MAX_TEXT_NUMBER {
            return Err(TextSourceError::OutOfRange(n));
        }
        let raw = self.read(&format!("text_{n}"))?;
        Ok(normalize_line_endings(&raw)
            .trim_end_matches('\n')
            .to_string())
    }

    /// A numbered resource picked at random
    pub fn random_numbered<R: Rng>(&self, rng: &mut R) -> Result<String, TextSourceError> {
        self.numbered(rng.gen_range(0..=MAX_TEXT_NUMBER))
    }

    /// The long corpus for the running line, its lines joined by single spaces
    pub fn long_text(&self) -> Result<String, TextSourceError> {
        let raw = self.read(LONG_TEXT_NAME)?;
        Ok(normalize_line_endings(&raw).lines().join(" "))
    }

    fn read(&self, name: &str) -> Result<String, TextSourceError> {
        let path = self.dir.join(name);
        let text = fs::read_to_string(&path).map_err(|source| {
            error!(path = %path.display(), %source, "failed to read text resource");
            TextSourceError::Read {
                path: path.clone(),
                source,
            }
        })?;

        if text.trim().is_empty() {
            return Err(TextSourceError::Empty(path));
        }
        info!(path = %path.display(), chars = text.chars().count(), "loaded text resource");
        Ok(text)
    }
}

fn normalize_line_endings(text: &str) -> String {
    text.replace("\r\n", "\n").replace('\r', "\n")
}
