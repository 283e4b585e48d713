//! Table output: resolved rows → tab-separated values.
//!
//! Column order is part of the contract: `index`, `image`, `question`,
//! `answer`. Question text may legitimately contain tabs or newlines; the
//! csv writer quotes such fields, so the file stays one-record-per-row for
//! any compliant reader (pandas' `read_csv(sep="\t")` included).

use crate::error::Mcq2TsvError;
use crate::output::ResolvedRow;
use std::io;
use std::path::Path;
use tracing::debug;

/// Serialize rows as TSV into any writer.
///
/// With `include_header`, the header row is derived from the field names of
/// [`ResolvedRow`], in declaration order.
pub fn write_table<W: io::Write>(
    writer: W,
    rows: &[ResolvedRow],
    include_header: bool,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b'\t')
        .has_headers(include_header)
        .from_writer(writer);

    for row in rows {
        // csv::Error is io::Error-or-serialisation; flatten to io for callers.
        wtr.serialize(row).map_err(io::Error::other)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Write rows to a file atomically (temp file + rename), creating parent
/// directories as needed. A crash mid-write never leaves a partial table at
/// the destination.
pub fn write_table_file(
    path: &Path,
    rows: &[ResolvedRow],
    include_header: bool,
) -> Result<(), Mcq2TsvError> {
    let io_err = |source: io::Error| Mcq2TsvError::OutputWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
    }

    let tmp_path = path.with_extension("tsv.tmp");
    let file = std::fs::File::create(&tmp_path).map_err(io_err)?;
    write_table(io::BufWriter::new(file), rows, include_header).map_err(io_err)?;
    std::fs::rename(&tmp_path, path).map_err(io_err)?;

    debug!("wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
