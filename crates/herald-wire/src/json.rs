//! JSON format
//!
//! Encodes as `{"types":[...],"values":[...]}`.

use herald_core::{HeraldError, HeraldResult};
use serde::{Deserialize, Serialize};

use crate::{check_arity, Format};

#[derive(Serialize, Deserialize)]
struct Document {
    types: Vec<String>,
    values: Vec<String>,
}

/// JSON object holding parallel `types` and `values` arrays
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct JsonFormat;

impl Format for JsonFormat {
    fn name(&self) -> &'static str {
        "json"
    }

    fn encode(&self, tags: &[String], values: &[String]) -> HeraldResult<String> {
        check_arity(tags.len(), values.len())?;
        if tags.iter().any(String::is_empty) {
            return Err(HeraldError::format("empty type tag"));
        }
        let doc = Document {
            types: tags.to_vec(),
            values: values.to_vec(),
        };
        serde_json::to_string(&doc).map_err(|e| HeraldError::format(e.to_string()))
    }

    fn decode(&self, text: &str) -> HeraldResult<(Vec<String>, Vec<String>)> {
        let doc: Document =
            serde_json::from_str(text).map_err(|e| HeraldError::format(e.to_string()))?;
        check_arity(doc.types.len(), doc.values.len())?;
        Ok((doc.types, doc.values))
    }
}
