//! Simple delimited format
//!
//! Wire layout: `<tag1>D<tag2>...D<tagN>,<val1>D<val2>...D<valN>`
//! where `D` defaults to `~`. Tags and values must not contain `D` or `,`;
//! the encoder rejects them instead of producing ambiguous text.

use herald_core::{HeraldError, HeraldResult};

use crate::format::split_segments;
use crate::{check_arity, Format, DEFAULT_DELIMITER, SEPARATOR};

/// Delimiter-joined tags, a comma, delimiter-joined values
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SimpleFormat {
    delimiter: char,
}

impl SimpleFormat {
    pub fn new() -> Self {
        SimpleFormat {
            delimiter: DEFAULT_DELIMITER,
        }
    }

    /// Use a custom delimiter; it must differ from the segment separator
    pub fn with_delimiter(delimiter: char) -> HeraldResult<Self> {
        if delimiter == SEPARATOR {
            return Err(HeraldError::format(format!(
                "delimiter cannot be the separator {:?}",
                SEPARATOR
            )));
        }
        Ok(SimpleFormat { delimiter })
    }

    #[inline]
    pub fn delimiter(&self) -> char {
        self.delimiter
    }

    fn check_field(&self, kind: &str, field: &str) -> HeraldResult<()> {
        if field.contains(self.delimiter) || field.contains(SEPARATOR) {
            return Err(HeraldError::format(format!(
                "{} {:?} contains a reserved character ({:?} or {:?})",
                kind, field, self.delimiter, SEPARATOR
            )));
        }
        Ok(())
    }

    fn split_segment(&self, segment: &str) -> Vec<String> {
        segment.split(self.delimiter).map(str::to_string).collect()
    }
}

impl Default for SimpleFormat {
    fn default() -> Self {
        Self::new()
    }
}

impl Format for SimpleFormat {
    fn name(&self) -> &'static str {
        "simple"
    }

    fn encode(&self, tags: &[String], values: &[String]) -> HeraldResult<String> {
        check_arity(tags.len(), values.len())?;
        for tag in tags {
            if tag.is_empty() {
                return Err(HeraldError::format("empty type tag"));
            }
            self.check_field("tag", tag)?;
        }
        for value in values {
            self.check_field("value", value)?;
        }

        let delim = self.delimiter.to_string();
        let mut out = tags.join(delim.as_str());
        out.push(SEPARATOR);
        out.push_str(&values.join(delim.as_str()));
        Ok(out)
    }

    fn decode(&self, text: &str) -> HeraldResult<(Vec<String>, Vec<String>)> {
        let (tag_segment, value_segment) = split_segments(text, SEPARATOR)?;

        // An empty tag segment can only mean an empty list
        if tag_segment.is_empty() {
            if !value_segment.is_empty() {
                let values = self.split_segment(value_segment).len();
                return Err(HeraldError::ArityMismatch { tags: 0, values });
            }
            return Ok((Vec::new(), Vec::new()));
        }

        let tags = self.split_segment(tag_segment);
        let values = self.split_segment(value_segment);
        check_arity(tags.len(), values.len())?;
        Ok((tags, values))
    }
}
