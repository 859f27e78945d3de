/// Source file record tag.
pub const SOURCE_FILE: &str = "SF:";
/// Per-line hit record tag.
pub const LINE_DATA: &str = "DA:";
/// Per-function hit record tag.
pub const FUNCTION_DATA: &str = "FNDA:";
/// Terminator of one source file section.
pub const END_OF_RECORD: &str = "end_of_record";

/// Return the file name of an `SF:` line with surrounding whitespace removed.
pub fn source_file(line: &str) -> Option<&str> {
    line.strip_prefix(SOURCE_FILE).map(str::trim)
}

/// True for lines that carry actual hit data (`DA:` or `FNDA:`).
pub fn is_hit_record(line: &str) -> bool {
    line.starts_with(LINE_DATA) || line.starts_with(FUNCTION_DATA)
}

/// Format an `SF:` line.
pub fn format_source_file(name: &str) -> String {
    format!("{SOURCE_FILE}{name}")
}

/// Append one LCOV section for `name` with the given `(line, hits)` pairs.
///
/// Pairs are written in the order given, followed by the `LH`/`LF` summary.
pub fn write_section(out: &mut Vec<String>, name: &str, lines: &[(u32, u64)]) {
    out.push(format_source_file(name));
    for (line, hits) in lines {
        out.push(format!("{LINE_DATA}{line},{hits}"));
    }
    let hit = lines.iter().filter(|(_, hits)| *hits > 0).count();
    out.push(format!("LH:{hit}"));
    out.push(format!("LF:{}", lines.len()));
    out.push(END_OF_RECORD.to_string());
}
