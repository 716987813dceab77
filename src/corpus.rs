use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;
use thiserror::Error;

/// Sentences in file order, each a list of whitespace-separated tokens.
pub type Corpus = Vec<Vec<String>>;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} line {line} is not valid UTF-8")]
    Utf8 { path: PathBuf, line: usize },
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, CorpusError> {
    let file = File::open(path).map_err(|source| CorpusError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// Reads one sentence per line. Blank lines become empty sentences so that
/// hypothesis and reference files stay aligned by line number.
pub fn read_corpus(path: &Path) -> Result<Corpus, CorpusError> {
    let reader = open_maybe_gz(path)?;
    parse_corpus(reader, path)
}

fn parse_corpus<R: BufRead>(mut reader: R, path: &Path) -> Result<Corpus, CorpusError> {
    let mut buf = Vec::new();
    let mut sentences = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        let read = reader
            .read_until(b'\n', &mut buf)
            .map_err(|source| CorpusError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        if read == 0 {
            break;
        }
        line_no += 1;
        let line = std::str::from_utf8(&buf).map_err(|_| CorpusError::Utf8 {
            path: path.to_path_buf(),
            line: line_no,
        })?;
        let line = line.trim_end_matches(['\n', '\r']);
        sentences.push(line.split_whitespace().map(str::to_string).collect());
    }

    tracing::debug!(
        path = %path.display(),
        sentences = sentences.len(),
        "read corpus"
    );
    Ok(sentences)
}

#[cfg(test)]
#[path = "../tests/src_inline/corpus/tests.rs"]
mod tests;
