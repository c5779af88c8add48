//! CSV export and member import.
//!
//! Every exported cell is quoted and embedded `"` are doubled; rows are joined
//! with `\n`. Import accepts the same quoting but also bare cells.

use crate::model::records::{Attendance, Donation, Member};

/// Record that can be written as one CSV row.
pub trait CsvRecord {
    fn csv_header() -> &'static [&'static str];
    fn csv_row(&self) -> Vec<String>;
}

impl CsvRecord for Attendance {
    fn csv_header() -> &'static [&'static str] {
        &["id", "member_id", "checked_in_at", "method"]
    }

    fn csv_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.member_id.clone().unwrap_or_default(),
            self.checked_in_at.to_rfc3339(),
            self.method.clone(),
        ]
    }
}

impl CsvRecord for Donation {
    fn csv_header() -> &'static [&'static str] {
        &["id", "amount", "donor_name", "fund", "created_at"]
    }

    fn csv_row(&self) -> Vec<String> {
        vec![
            self.id.clone(),
            self.amount.to_string(),
            self.donor_name.clone(),
            self.fund.clone(),
            self.created_at.to_rfc3339(),
        ]
    }
}

const MEMBER_EXPORT_HEADER: &[&str] = &["first_name", "last_name", "email", "phone"];

/// Quotes one cell.
pub fn quote_cell(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

/// Renders a header row followed by `rows`.
pub fn to_csv<I>(header: &[&str], rows: I) -> String
where
    I: IntoIterator<Item = Vec<String>>,
{
    let header_line = header
        .iter()
        .map(|cell| quote_cell(cell))
        .collect::<Vec<_>>()
        .join(",");
    std::iter::once(header_line)
        .chain(rows.into_iter().map(|row| {
            row.iter()
                .map(|cell| quote_cell(cell))
                .collect::<Vec<_>>()
                .join(",")
        }))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Exports records with their own header; `None` when there is nothing to
/// export.
pub fn records_to_csv<R: CsvRecord>(records: &[R]) -> Option<String> {
    if records.is_empty() {
        return None;
    }
    Some(to_csv(R::csv_header(), records.iter().map(CsvRecord::csv_row)))
}

/// Member directory export: name, email and phone columns only.
pub fn members_to_csv(members: &[Member]) -> String {
    to_csv(
        MEMBER_EXPORT_HEADER,
        members.iter().map(|member| {
            vec![
                member.first_name.clone(),
                member.last_name.clone(),
                member.email.clone(),
                member.phone.clone(),
            ]
        }),
    )
}

/// Member fields read from one import row.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportedMember {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
}

/// Parses an import body: the first non-blank line is a header and is
/// skipped; columns are first name, last name, email, phone. Missing columns
/// become empty strings.
pub fn parse_member_import(text: &str) -> Vec<ImportedMember> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .skip(1)
        .map(|line| {
            let mut cells = split_csv_line(line).into_iter();
            let mut next = || cells.next().unwrap_or_default();
            ImportedMember {
                first_name: next(),
                last_name: next(),
                email: next(),
                phone: next(),
            }
        })
        .collect()
}

fn split_csv_line(line: &str) -> Vec<String> {
    let mut cells = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes && chars.peek() == Some(&'"') => {
                current.push('"');
                chars.next();
            }
            '"' => in_quotes = !in_quotes,
            ',' if !in_quotes => cells.push(std::mem::take(&mut current)),
            other => current.push(other),
        }
    }
    cells.push(current);
    cells
}
