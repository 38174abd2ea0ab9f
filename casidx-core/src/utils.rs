use std::ffi::OsStr;
use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::path::Path;

use anyhow::{Context, Result};
use flate2::read::MultiGzDecoder;

///
/// Get a reader for either a gzip'd or non-gzip'd file.
///
/// # Arguments
///
/// - path: path to the file to read
///
pub fn get_dynamic_reader(path: &Path) -> Result<BufReader<Box<dyn Read>>> {
    let is_gzipped = path.extension() == Some(OsStr::new("gz"));
    let file = File::open(path).with_context(|| format!("Failed to open file: {:?}", path))?;
    let file: Box<dyn Read> = match is_gzipped {
        true => Box::new(MultiGzDecoder::new(file)),
        false => Box::new(file),
    };

    Ok(BufReader::new(file))
}

///
/// Get a reader for either a gzipped, non-gzipped file, or stdin
///
/// # Arguments
///
/// - file_path: path to the file to read, or '-' for stdin
///
pub fn get_dynamic_reader_w_stdin(file_path: &str) -> Result<BufReader<Box<dyn Read>>> {
    if file_path == "-" {
        Ok(BufReader::new(Box::new(std::io::stdin()) as Box<dyn Read>))
    } else {
        get_dynamic_reader(Path::new(file_path))
    }
}

///
/// Read a whole text buffer, decompressing it if needed.
///
pub fn read_text(path: &Path) -> Result<String> {
    let mut reader = get_dynamic_reader(path)?;
    let mut text = String::new();
    reader
        .read_to_string(&mut text)
        .with_context(|| format!("Text file is not valid UTF-8: {:?}", path))?;
    Ok(text)
}

/// `true` for lines that carry no record: blank lines and `#` comments.
#[inline]
pub fn is_comment_line(line: &str) -> bool {
    let trimmed = line.trim_start();
    trimmed.is_empty() || trimmed.starts_with('#')
}

///
/// Split an annotation line `type<TAB>begin<TAB>end` into its three fields.
///
/// Columns beyond the third are ignored. Returns `None` when a field is missing or an
/// offset does not parse.
///
pub fn parse_annotation_line(line: &str) -> Option<(&str, u32, u32)> {
    let mut fields = line.split('\t');
    let type_name = fields.next()?.trim();
    let begin = fields.next()?.trim().parse::<u32>().ok()?;
    let end = fields.next()?.trim().parse::<u32>().ok()?;
    if type_name.is_empty() {
        return None;
    }
    Some((type_name, begin, end))
}

///
/// Parse a span written as `begin:end` (as used on the command line).
///
pub fn parse_span(s: &str) -> Option<(u32, u32)> {
    let (begin, end) = s.split_once(':')?;
    Some((begin.trim().parse().ok()?, end.trim().parse().ok()?))
}
