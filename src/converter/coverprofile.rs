use std::collections::{BTreeMap, HashMap};

use crate::converter::Converter;
use crate::detection::COVERPROFILE_HEADER;
use crate::error::NormalizeError;
use crate::lcov;

/// Largest line span a single block may cover before it is rejected.
pub const MAX_BLOCK_LINES: u32 = 100_000;

/// Converts Go coverprofiles (`go test -coverprofile`) to LCOV.
///
/// Each block line has the shape
/// `file.go:startLine.startCol,endLine.endCol numStmt count`. Every source
/// line a block spans receives the block's count; when blocks overlap the
/// highest count is kept. Files are emitted in order of first appearance.
/// Blocks spanning more than [`MAX_BLOCK_LINES`] lines are skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct GoCoverprofileConverter;

/// One parsed block line.
#[derive(Debug, PartialEq, Eq)]
struct ProfileBlock<'a> {
    file: &'a str,
    start_line: u32,
    end_line: u32,
    count: u64,
}

impl<'a> ProfileBlock<'a> {
    fn parse(line: &'a str) -> Option<Self> {
        // File names may contain spaces, so split the numeric fields off the end.
        let mut fields = line.rsplitn(3, ' ');
        let count = fields.next()?.parse().ok()?;
        let _num_stmt: u32 = fields.next()?.parse().ok()?;
        let location = fields.next()?;

        let (file, range) = location.rsplit_once(':')?;
        let (start, end) = range.split_once(',')?;
        let start_line = line_of(start)?;
        let end_line = line_of(end)?;

        if file.is_empty() || end_line < start_line {
            return None;
        }
        if end_line - start_line >= MAX_BLOCK_LINES {
            return None;
        }
        Some(Self {
            file,
            start_line,
            end_line,
            count,
        })
    }
}

fn line_of(position: &str) -> Option<u32> {
    let (line, column) = position.split_once('.')?;
    column.parse::<u32>().ok()?;
    line.parse().ok()
}

impl Converter for GoCoverprofileConverter {
    fn convert(&self, lines: &[&str]) -> Result<Vec<String>, NormalizeError> {
        let mut order: Vec<&str> = Vec::new();
        let mut files: HashMap<&str, BTreeMap<u32, u64>> = HashMap::new();

        for (idx, raw) in lines.iter().enumerate() {
            let line = raw.trim();
            // Merged profiles repeat the header; skip every occurrence.
            if line.is_empty() || line.starts_with(COVERPROFILE_HEADER) {
                continue;
            }
            let Some(block) = ProfileBlock::parse(line) else {
                tracing::debug!(line = idx + 1, "skipping unrecognized coverprofile line");
                continue;
            };

            let hits = files.entry(block.file).or_insert_with(|| {
                order.push(block.file);
                BTreeMap::new()
            });
            for number in block.start_line..=block.end_line {
                hits.entry(number)
                    .and_modify(|existing| *existing = (*existing).max(block.count))
                    .or_insert(block.count);
            }
        }

        let mut out = Vec::new();
        for file in order {
            let pairs: Vec<(u32, u64)> = files[file].iter().map(|(&l, &c)| (l, c)).collect();
            lcov::write_section(&mut out, file, &pairs);
        }
        Ok(out)
    }
}
