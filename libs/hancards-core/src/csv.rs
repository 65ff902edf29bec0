//! CSV word-list import and export.
//!
//! # Format
//! ```text
//! pack_category,pack_name,korean,english
//! TC3,TC3 - Bài 1,학기,semester
//! TC3,TC3 - Bài 1,과목,subject
//! TC3,TC3 - Bài 2,대인 관계,"social relations, friends"
//! ```
//!
//! A `pack_name,korean,english` header (or no header at all) selects the
//! three-column layout with an empty category. Fields follow the usual CSV
//! quoting rules; a doubled quote inside a quoted field is a literal quote.

use crate::error::{ExportError, ImportError};
use crate::types::{Pack, Word};
use ::csv::{ReaderBuilder, StringRecord, Terminator, Trim, WriterBuilder};
use serde::{Deserialize, Serialize};

type Result<T> = std::result::Result<T, ImportError>;

/// One parsed data row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvRow {
    pub pack_category: String,
    pub pack_name: String,
    pub korean: String,
    pub english: String,
}

/// Parsed rows plus the number of data lines that were dropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParseReport {
    pub rows: Vec<CsvRow>,
    pub skipped: usize,
}

/// Words destined for one pack, grouped by category and name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackDraft {
    pub category: String,
    pub name: String,
    pub words: Vec<Word>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Layout {
    /// `pack_category,pack_name,korean,english`
    WithCategory,
    /// `pack_name,korean,english`
    NameOnly,
}

impl Layout {
    fn columns(self) -> usize {
        match self {
            Self::WithCategory => 4,
            Self::NameOnly => 3,
        }
    }
}

/// Parse CSV text into rows.
///
/// A line with an unbalanced quote is counted as one skipped row so the rest
/// of the paste still imports.
pub fn parse_rows(text: &str) -> Result<ParseReport> {
    if text.trim().is_empty() {
        return Err(ImportError::EmptyInput);
    }

    let mut skipped = 0;
    let mut kept = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        if line.matches('"').count() % 2 == 1 {
            tracing::debug!(line = idx + 1, "skipping row with unbalanced quote");
            skipped += 1;
            continue;
        }
        kept.push(line);
    }
    let kept = kept.join("\n");

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(kept.as_bytes());
    let mut records = reader.records().peekable();

    let layout = match records.peek() {
        Some(Ok(first)) => detect_header(first),
        _ => None,
    };
    let layout = match layout {
        Some(layout) => {
            records.next();
            layout
        }
        None => Layout::NameOnly,
    };

    let mut rows = Vec::new();
    for result in records {
        match result {
            Ok(record) => match build_row(&record, layout) {
                Some(row) => rows.push(row),
                None => skipped += 1,
            },
            Err(err) => {
                tracing::debug!(error = %err, "skipping unreadable csv record");
                skipped += 1;
            }
        }
    }

    if rows.is_empty() {
        return Err(ImportError::NoValidRows);
    }
    tracing::debug!(rows = rows.len(), skipped, "parsed csv");
    Ok(ParseReport { rows, skipped })
}

fn detect_header(record: &StringRecord) -> Option<Layout> {
    let header: String = record
        .iter()
        .collect::<Vec<_>>()
        .join(",")
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if header.starts_with("pack_category,pack_name") {
        Some(Layout::WithCategory)
    } else if header.starts_with("pack_name") {
        Some(Layout::NameOnly)
    } else {
        None
    }
}

fn build_row(record: &StringRecord, layout: Layout) -> Option<CsvRow> {
    if record.len() < layout.columns() {
        return None;
    }
    let field = |i: usize| record.get(i).unwrap_or_default().to_string();
    let row = match layout {
        Layout::WithCategory => CsvRow {
            pack_category: field(0),
            pack_name: field(1),
            korean: field(2),
            english: field(3),
        },
        Layout::NameOnly => CsvRow {
            pack_category: String::new(),
            pack_name: field(0),
            korean: field(1),
            english: field(2),
        },
    };
    if row.pack_name.is_empty() || row.korean.is_empty() || row.english.is_empty() {
        return None;
    }
    Some(row)
}

/// Group rows into pack drafts by `(category, name)`, keeping first-seen order.
pub fn group_rows(rows: Vec<CsvRow>) -> Vec<PackDraft> {
    let mut drafts: Vec<PackDraft> = Vec::new();
    for row in rows {
        let word = Word::new(row.korean, row.english);
        match drafts
            .iter_mut()
            .find(|d| d.category == row.pack_category && d.name == row.pack_name)
        {
            Some(draft) => draft.words.push(word),
            None => drafts.push(PackDraft {
                category: row.pack_category,
                name: row.pack_name,
                words: vec![word],
            }),
        }
    }
    drafts
}

/// Parse and group in one step.
pub fn parse_packs(text: &str) -> Result<(Vec<PackDraft>, usize)> {
    let report = parse_rows(text)?;
    Ok((group_rows(report.rows), report.skipped))
}

/// Serialize packs to the four-column format.
pub fn export(packs: &[Pack]) -> std::result::Result<String, ExportError> {
    let mut buf = Vec::new();
    {
        let mut writer = WriterBuilder::new()
            .terminator(Terminator::Any(b'\n'))
            .from_writer(&mut buf);
        writer.write_record(["pack_category", "pack_name", "korean", "english"])?;
        for pack in packs {
            for word in &pack.words {
                writer.write_record([
                    pack.category.as_str(),
                    pack.name.as_str(),
                    word.korean.as_str(),
                    word.english.as_str(),
                ])?;
            }
        }
        writer.flush()?;
    }
    Ok(String::from_utf8(buf)?)
}

/// Prompt asking a language model to turn study material into importable CSV.
/// `None` for blank material.
pub fn conversion_prompt(material: &str) -> Option<String> {
    let material = material.trim();
    if material.is_empty() {
        return None;
    }
    Some(format!(
        "Convert the following Korean study material into a CSV with exactly 4 columns: pack_category, pack_name, korean, english.

Rules:
- First row must be exactly: pack_category,pack_name,korean,english
- Use the lesson/topic title as pack_name (same value for all words in the same lesson)
- Use the course/book/overall group as pack_category (same value for all packs in the same group)
- korean = the Korean word or phrase
- english = the English or Vietnamese translation (keep it concise, under 80 chars)
- If a value contains a comma, wrap it in double quotes
- Output ONLY the raw CSV. No explanation, no markdown fences, no extra text.

Naming rules (very important):
- Keep pack_category SHORT: max 20 characters. Use only the essential identifier (e.g. \"TC3\", \"TOPIK1\", \"Book2\").
- Keep pack_name SHORT: max 30 characters. Use only the core topic or lesson number (e.g. \"Bài 1\", \"L3 Family\").
- pack_category and pack_name must NOT contain any of these symbols: \" ' , \\ / | : ; ( ) [ ] {{ }}
- Use only plain alphanumeric characters, spaces, hyphens, and dots.

Material:
{material}"
    ))
}
