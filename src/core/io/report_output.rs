// Text result protocol
//
// One alignment is reported as three tab-separated lines:
//
//   SCORE\t<int>
//   ALNQ\t<aligned query>
//   ALNT\t<aligned target>
//
// In batch mode each block is preceded by `PAIR\t<query id>\t<target id>`.

use crate::core::alignment::Alignment;
use std::io::{self, Write};

/// Write the three-line report for one alignment
pub fn write_report<W: Write + ?Sized>(writer: &mut W, aln: &Alignment) -> io::Result<()> {
    writeln!(writer, "SCORE\t{}", aln.score)?;
    writer.write_all(b"ALNQ\t")?;
    writer.write_all(&aln.aligned_query)?;
    writer.write_all(b"\nALNT\t")?;
    writer.write_all(&aln.aligned_target)?;
    writer.write_all(b"\n")
}

/// Write the header line of a batch block
pub fn write_pair_header<W: Write + ?Sized>(
    writer: &mut W,
    query_id: &str,
    target_id: &str,
) -> io::Result<()> {
    writeln!(writer, "PAIR\t{}\t{}", query_id, target_id)
}
