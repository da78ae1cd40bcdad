use crate::window::{RvaWindow, parse_hex};

/// Substring marking the header row of the export table.
const TABLE_HEADER_MARKER: &str = "RVA";

/// Row marking the section following the export table.
const TABLE_END_MARKER: &str = "Summary";

/// Number of rows (header and separator) preceding the exports.
const TABLE_PREAMBLE_LEN: usize = 2;

/// Sort key given to rows that are not exports.
///
/// Every RVA column is 8 zero-padded hex digits, so these rows sort first.
const NON_EXPORT_SORT_KEY: &str = "00000000";

/// Splits the dumper output into lines.
///
/// Only `\r\n` pairs separate lines.
pub fn split_lines(dump: &str) -> impl Iterator<Item = &str> {
    dump.split("\r\n")
}

/// Keeps the rows of the export table, without its header and separator.
///
/// Rows are retained from the first one containing `RVA` up to (excluding)
/// the first one equal to `Summary` once trimmed.
pub fn extract_table_lines<'a>(lines: impl IntoIterator<Item = &'a str>) -> Vec<&'a str> {
    let mut started = false;
    let mut done = false;

    lines
        .into_iter()
        .filter(|line| {
            if line.trim() == TABLE_END_MARKER {
                done = true;
            }
            if line.contains(TABLE_HEADER_MARKER) {
                started = true;
            }
            started && !done
        })
        .skip(TABLE_PREAMBLE_LEN)
        .collect()
}

/// Sorts table rows by their RVA column, keeping the relative order of rows
/// with equal keys.
pub fn sort_table_lines(lines: &mut [&str]) {
    lines.sort_by(|a, b| sort_key(a).cmp(sort_key(b)));
}

fn sort_key(line: &str) -> &str {
    let fields = line.split_whitespace().collect::<Vec<_>>();

    match fields.as_slice() {
        [_, _, rva, _] => *rva,
        _ => NON_EXPORT_SORT_KEY,
    }
}

/// Exported symbol, as listed in an export table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportRecord {
    /// Ordinal column, verbatim.
    pub ordinal: String,

    /// Hint column, verbatim.
    pub hint: String,

    /// RVA column, verbatim (zero-padded hexadecimal).
    pub rva_text: String,

    /// Parsed RVA of the export.
    pub rva: u64,

    /// Name of the exported symbol.
    pub name: String,
}

impl ExportRecord {
    /// Parses an export table row.
    ///
    /// Returns `None` if the row does not have exactly four columns.
    pub fn parse_line(line: &str) -> crate::Result<Option<Self>> {
        let fields = line.split_whitespace().collect::<Vec<_>>();

        let [ordinal, hint, rva_text, name] = fields.as_slice() else {
            return Ok(None);
        };

        let rva = parse_hex(rva_text).map_err(|source| crate::Error::InvalidRva {
            line: line.to_owned(),
            source,
        })?;

        Ok(Some(Self {
            ordinal: (*ordinal).to_owned(),
            hint: (*hint).to_owned(),
            rva_text: (*rva_text).to_owned(),
            rva,
            name: (*name).to_owned(),
        }))
    }
}

/// Export table rows of a dumper output, sorted by RVA.
#[derive(Debug)]
pub struct ExportTable<'a> {
    lines: Vec<&'a str>,
}

impl<'a> ExportTable<'a> {
    /// Extracts and sorts the export table of a dumper output.
    pub fn from_dump(dump: &'a str) -> Self {
        let mut lines = extract_table_lines(split_lines(dump));

        sort_table_lines(&mut lines);

        tracing::debug!(rows = lines.len(), "extracted export table");

        Self { lines }
    }

    /// Returns the sorted table rows, including the ones that are not exports.
    pub fn lines(&self) -> &[&'a str] {
        &self.lines
    }

    /// Returns the exports whose RVA lies strictly inside the given window,
    /// in ascending RVA order.
    pub fn near(&self, window: &RvaWindow) -> crate::Result<Vec<ExportRecord>> {
        let records = self.exports_near(window).collect::<crate::Result<Vec<_>>>()?;

        tracing::debug!(matches = records.len(), "filtered export table");

        Ok(records)
    }

    /// Iterates over the exports whose RVA lies strictly inside the given
    /// window, in ascending RVA order.
    ///
    /// Every export row is parsed, including the ones outside the window. A
    /// row with a malformed RVA yields an error after the exports preceding
    /// it have been yielded.
    pub fn exports_near(
        &self,
        window: &RvaWindow,
    ) -> impl Iterator<Item = crate::Result<ExportRecord>> + '_ {
        let window = *window;

        self.lines
            .iter()
            .copied()
            .filter_map(move |line| match ExportRecord::parse_line(line) {
                Ok(Some(record)) => window.contains(record.rva).then_some(Ok(record)),
                Ok(None) => {
                    tracing::trace!(line, "skipping non-export row");
                    None
                }
                Err(e) => Some(Err(e)),
            })
    }
}
