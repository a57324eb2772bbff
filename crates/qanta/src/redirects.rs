//! Reader for redirect CSV files.
//!
//! Each record is `source,target` with no header row. Quoted fields may
//! contain commas and newlines; inside quotes a quote is written either
//! doubled (`""`) or escaped with `\`.

use crate::error::{Error, Result};
use std::collections::HashMap;

fn csv_error(err: csv::Error) -> Error {
    Error::Redirects {
        line: err.position().map_or(0, |p| p.line()),
        message: err.to_string(),
    }
}

/// Parse a redirect CSV document into an alias → target map.
///
/// Targets are not checked here; the reference index drops redirects whose
/// target is not a canonical title. A repeated alias keeps its last target.
pub fn parse_redirects(input: &str) -> Result<HashMap<String, String>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .escape(Some(b'\\'))
        .from_reader(input.as_bytes());

    let mut redirects = HashMap::new();
    for result in rdr.records() {
        let record = result.map_err(csv_error)?;
        match (record.len(), record.get(0), record.get(1)) {
            (2, Some(source), Some(target)) => {
                redirects.insert(source.to_string(), target.to_string());
            }
            (len, _, _) => {
                return Err(Error::Redirects {
                    line: record.position().map_or(0, |p| p.line()),
                    message: format!("expected 2 fields, found {len}"),
                })
            }
        }
    }
    Ok(redirects)
}
