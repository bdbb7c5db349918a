//! Tab-separated ledger file format
//!
//! One transaction per line:
//!
//! ```text
//! "Robert"	"Mike"	33.28	"For pizza"
//! ```
//!
//! Names and comments are double-quoted; inside quotes `\"` is a literal
//! quote, `\\` a literal backslash and `\n`, `\r`, `\t` stand for line
//! feed, carriage return and tab, so every record stays on one line. The
//! comment field may be left out.
//! Blank lines and lines starting with `#` are ignored.
//!
//! Import is line-by-line recoverable: a malformed line is reported in the
//! [`ImportReport`] and the remaining lines are still imported.

use crate::{Error, Ledger, Result, Transaction};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Why a line was rejected
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Line ended before a required field
    #[error("missing {0} field")]
    MissingField(&'static str),

    /// Field did not start with `"`
    #[error("expected quoted {0}")]
    ExpectedQuote(&'static str),

    /// Closing quote never found
    #[error("unterminated quote in {0}")]
    UnterminatedQuote(&'static str),

    /// Text after the last field
    #[error("unexpected trailing input '{0}'")]
    TrailingInput(String),

    /// Amount is not a finite number
    #[error("invalid amount '{0}'")]
    InvalidAmount(String),

    /// Amount is zero or negative
    #[error("amount must be positive, got {0}")]
    NonPositiveAmount(String),

    /// Payer and recipient are the same
    #[error("payer and recipient are both '{0}'")]
    SelfTransaction(String),

    /// Name is empty
    #[error("participant name must not be empty")]
    EmptyName,

    /// Ledger refused the record for another reason
    #[error("rejected by ledger: {0}")]
    Rejected(String),
}

/// Rejected line in an import
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("line {line}: {kind}")]
pub struct ParseError {
    /// 1-based line number
    pub line: usize,

    /// What went wrong
    pub kind: ParseErrorKind,
}

/// One parsed line, names not yet resolved
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// Payer name
    pub payer: String,

    /// Recipient name
    pub recipient: String,

    /// Amount paid
    pub amount: f64,

    /// Comment, empty when absent
    pub comment: String,
}

/// Outcome of an import
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportReport {
    /// Transactions added to the ledger
    pub imported: usize,

    /// Lines that were skipped
    pub errors: Vec<ParseError>,
}

impl ImportReport {
    /// True when every data line was imported
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Parse one line. Returns `Ok(None)` for blank and comment lines.
pub fn parse_line(line: &str) -> std::result::Result<Option<Record>, ParseErrorKind> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        return Ok(None);
    }

    let mut cursor = Cursor::new(trimmed);
    let payer = cursor.quoted("payer")?;
    let recipient = cursor.quoted("recipient")?;

    let raw_amount = cursor.bare("amount")?;
    let amount: f64 = raw_amount
        .parse()
        .ok()
        .filter(|a: &f64| a.is_finite())
        .ok_or_else(|| ParseErrorKind::InvalidAmount(raw_amount.to_string()))?;
    if amount <= 0.0 {
        return Err(ParseErrorKind::NonPositiveAmount(raw_amount.to_string()));
    }

    let comment = if cursor.at_end() {
        String::new()
    } else {
        cursor.quoted("comment")?
    };

    if !cursor.at_end() {
        return Err(ParseErrorKind::TrailingInput(cursor.rest().to_string()));
    }

    Ok(Some(Record {
        payer,
        recipient,
        amount,
        comment,
    }))
}

/// Render one transaction as a line, without the newline
pub fn format_line(ledger: &Ledger, tx: &Transaction) -> String {
    let name = |id| ledger.participant_name(id).unwrap_or_default();
    format!(
        "{}\t{}\t{}\t{}",
        quote(name(tx.payer)),
        quote(name(tx.recipient)),
        tx.amount,
        quote(tx.comment_str())
    )
}

/// Wrap in double quotes, escaping `"`, `\` and line/tab breaks
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push('"');
    for c in text.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            _ => out.push(c),
        }
    }
    out.push('"');
    out
}

impl Ledger {
    /// Import every valid line of `text`
    pub fn import_str(&mut self, text: &str) -> ImportReport {
        let mut report = ImportReport::default();

        for (index, line) in text.lines().enumerate() {
            let line_no = index + 1;
            let result = parse_line(line).and_then(|record| match record {
                Some(record) => self.add_record(&record).map(|_| true),
                None => Ok(false),
            });

            match result {
                Ok(true) => report.imported += 1,
                Ok(false) => {}
                Err(kind) => {
                    tracing::warn!(line = line_no, error = %kind, "Skipping malformed line");
                    report.errors.push(ParseError {
                        line: line_no,
                        kind,
                    });
                }
            }
        }

        report
    }

    /// Import a ledger file
    ///
    /// A missing or unreadable file leaves the ledger untouched.
    pub fn import_file(&mut self, path: impl AsRef<Path>) -> Result<ImportReport> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let report = self.import_str(&text);

        tracing::info!(
            path = %path.display(),
            imported = report.imported,
            rejected = report.errors.len(),
            "Imported ledger file"
        );
        Ok(report)
    }

    /// Write every transaction in recording order
    pub fn export<W: Write>(&self, mut out: W) -> Result<()> {
        writeln!(
            out,
            "# split-ledger export, {} transactions, {}",
            self.len(),
            chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        for tx in self.transactions() {
            writeln!(out, "{}", format_line(self, tx))?;
        }
        out.flush()?;
        Ok(())
    }

    /// Write the ledger to `path`, replacing any existing file
    pub fn export_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = fs::File::create(path)?;
        self.export(BufWriter::new(file))?;

        tracing::info!(path = %path.display(), transactions = self.len(), "Exported ledger");
        Ok(())
    }

    fn add_record(&mut self, record: &Record) -> std::result::Result<(), ParseErrorKind> {
        self.add_transaction(
            &record.payer,
            &record.recipient,
            record.amount,
            &record.comment,
        )
        .map(|_| ())
        .map_err(|e| match e {
            Error::SelfTransaction { name } => ParseErrorKind::SelfTransaction(name),
            Error::EmptyName => ParseErrorKind::EmptyName,
            err @ (Error::Config(_) | Error::Io(_)) => ParseErrorKind::Rejected(err.to_string()),
        })
    }
}

/// Field scanner over one line
struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn new(line: &'a str) -> Self {
        Self { rest: line }
    }

    fn skip_whitespace(&mut self) {
        self.rest = self.rest.trim_start();
    }

    fn at_end(&mut self) -> bool {
        self.skip_whitespace();
        self.rest.is_empty()
    }

    fn rest(&self) -> &'a str {
        self.rest
    }

    fn quoted(&mut self, field: &'static str) -> std::result::Result<String, ParseErrorKind> {
        if self.at_end() {
            return Err(ParseErrorKind::MissingField(field));
        }

        let rest = self.rest;
        let mut chars = rest.char_indices();
        match chars.next() {
            Some((_, '"')) => {}
            _ => return Err(ParseErrorKind::ExpectedQuote(field)),
        }

        let mut value = String::new();
        let mut escaped = false;
        for (i, c) in chars {
            if escaped {
                value.push(match c {
                    'n' => '\n',
                    'r' => '\r',
                    't' => '\t',
                    other => other,
                });
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                self.rest = &rest[i + 1..];
                return Ok(value);
            } else {
                value.push(c);
            }
        }

        Err(ParseErrorKind::UnterminatedQuote(field))
    }

    fn bare(&mut self, field: &'static str) -> std::result::Result<&'a str, ParseErrorKind> {
        if self.at_end() {
            return Err(ParseErrorKind::MissingField(field));
        }

        let line = self.rest;
        let end = line.find(char::is_whitespace).unwrap_or(line.len());
        let (token, rest) = line.split_at(end);
        self.rest = rest;
        Ok(token)
    }
}
