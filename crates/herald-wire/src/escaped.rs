//! Escaped delimited format
//!
//! Same layout as [`SimpleFormat`](crate::SimpleFormat), but a backslash
//! escapes itself, the delimiter and the separator inside tags and values,
//! so any text survives the round trip.

use herald_core::{HeraldError, HeraldResult};

use crate::{check_arity, Format, DEFAULT_DELIMITER, SEPARATOR};

const ESCAPE: char = '\\';

/// Delimited format with backslash escaping
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EscapedFormat {
    delimiter: char,
}

impl EscapedFormat {
    pub fn new() -> Self {
        EscapedFormat {
            delimiter: DEFAULT_DELIMITER,
        }
    }

    /// Use a custom delimiter; it must differ from the separator and the escape
    pub fn with_delimiter(delimiter: char) -> HeraldResult<Self> {
        if delimiter == SEPARATOR || delimiter == ESCAPE {
            return Err(HeraldError::format(format!(
                "delimiter cannot be {:?}",
                delimiter
            )));
        }
        Ok(EscapedFormat { delimiter })
    }

    fn push_escaped(&self, out: &mut String, field: &str) {
        for c in field.chars() {
            if c == ESCAPE || c == SEPARATOR || c == self.delimiter {
                out.push(ESCAPE);
            }
            out.push(c);
        }
    }

    fn push_segment(&self, out: &mut String, fields: &[String]) {
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                out.push(self.delimiter);
            }
            self.push_escaped(out, field);
        }
    }

    /// Split into segments of unescaped fields
    fn scan(&self, text: &str) -> HeraldResult<Vec<Vec<String>>> {
        let mut segments = Vec::new();
        let mut fields = Vec::new();
        let mut field = String::new();
        let mut chars = text.chars();

        while let Some(c) = chars.next() {
            if c == ESCAPE {
                match chars.next() {
                    Some(e) if e == ESCAPE || e == SEPARATOR || e == self.delimiter => {
                        field.push(e)
                    }
                    Some(e) => {
                        return Err(HeraldError::format(format!("unknown escape \\{}", e)))
                    }
                    None => return Err(HeraldError::format("dangling escape at end of input")),
                }
            } else if c == self.delimiter {
                fields.push(std::mem::take(&mut field));
            } else if c == SEPARATOR {
                fields.push(std::mem::take(&mut field));
                segments.push(std::mem::take(&mut fields));
            } else {
                field.push(c);
            }
        }
        fields.push(field);
        segments.push(fields);
        Ok(segments)
    }
}

impl Default for EscapedFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl Format for EscapedFormat {
    fn name(&self) -> &'static str {
        "escaped"
    }

    fn encode(&self, tags: &[String], values: &[String]) -> HeraldResult<String> {
        check_arity(tags.len(), values.len())?;
        if tags.iter().any(String::is_empty) {
            return Err(HeraldError::format("empty type tag"));
        }

        let mut out = String::new();
        self.push_segment(&mut out, tags);
        out.push(SEPARATOR);
        self.push_segment(&mut out, values);
        Ok(out)
    }

    fn decode(&self, text: &str) -> HeraldResult<(Vec<String>, Vec<String>)> {
        let mut segments = self.scan(text)?;
        if segments.len() != 2 {
            return Err(HeraldError::format(format!(
                "expected exactly two segments, found {}",
                segments.len()
            )));
        }
        let values = segments.pop().unwrap_or_default();
        let tags = segments.pop().unwrap_or_default();

        let no_tags = tags.len() == 1 && tags[0].is_empty();
        let no_values = values.len() == 1 && values[0].is_empty();
        if no_tags {
            if !no_values {
                return Err(HeraldError::ArityMismatch {
                    tags: 0,
                    values: values.len(),
                });
            }
            return Ok((Vec::new(), Vec::new()));
        }

        check_arity(tags.len(), values.len())?;
        Ok((tags, values))
    }
}
