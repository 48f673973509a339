//! Tabular alignment input (plain or gzip-compressed)

use flate2::read::MultiGzDecoder;
use foldplot_core::RawTable;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use crate::error::{CliError, CliResult};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Read a header-first table from `path`, decompressing gzip input
pub fn read_table(path: &Path) -> CliResult<RawTable> {
    if !path.exists() {
        return Err(CliError::file_not_found(path.to_path_buf()));
    }

    let mut file = File::open(path)?;
    let mut magic = [0u8; 2];
    let n = file.read(&mut magic)?;
    let file = File::open(path)?;

    let source = path.display().to_string();
    if n == 2 && magic == GZIP_MAGIC {
        log::debug!("Reading gzip-compressed input {}", source);
        parse_table(BufReader::new(MultiGzDecoder::new(file)), &source)
    } else {
        parse_table(BufReader::new(file), &source)
    }
}

/// Parse rows separated by tabs (or whitespace when a line has no tab).
///
/// Lines starting with `#` are comments, except a `#query_name` header.
pub fn parse_table<R: BufRead>(reader: R, source: &str) -> CliResult<RawTable> {
    let mut header: Option<Vec<String>> = None;
    let mut rows = Vec::new();

    for (i, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| CliError::parse(source.to_string(), format!("line {}: {}", i + 1, e)))?;
        let line = line.trim_end_matches(['\r', '\n']);
        if line.trim().is_empty() {
            continue;
        }
        let is_header_line = header.is_none() && line.starts_with("#query_name");
        if line.starts_with('#') && !is_header_line {
            continue;
        }

        let fields = split_fields(line);
        if header.is_none() {
            header = Some(fields);
        } else {
            rows.push(fields);
        }
    }

    let header = header.ok_or_else(|| CliError::parse(source.to_string(), "no header row found".to_string()))?;
    log::debug!("Read {} rows from {}", rows.len(), source);
    Ok(RawTable::new(header, rows))
}

fn split_fields(line: &str) -> Vec<String> {
    if line.contains('\t') {
        line.split('\t').map(|s| s.trim().to_string()).collect()
    } else {
        line.split_whitespace().map(|s| s.to_string()).collect()
    }
}
