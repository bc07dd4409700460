//! Parser for bill document object keys.

use regex::Regex;
use std::sync::OnceLock;

const KEY_PATTERN: &str = r"raw/congress/data/(?P<congress>\d+)/bills/(?P<type>\w+)/\D+(?P<number>\d+)/text-versions/(?P<version>\w+)/document\.txt";

static KEY_REGEX: OnceLock<Regex> = OnceLock::new();

fn key_regex() -> &'static Regex {
    KEY_REGEX.get_or_init(|| Regex::new(KEY_PATTERN).expect("bill key pattern compiles"))
}

/// Structural components captured from a bill document key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillKeyComponents {
    /// Congress number, e.g. `118`.
    pub congress: String,
    /// Bill type slug, e.g. `hr` or `sconres`.
    pub bill_type: String,
    /// Bill number within its congress and type.
    pub bill_number: String,
    /// Text version identifier, e.g. `ih` or `enr`.
    pub version_id: String,
}

/// Extracts bill components from an object key.
///
/// Matching uses search semantics, so storage prefixes ahead of the grammar
/// are ignored. The bill number is the contiguous digit run immediately
/// before `/text-versions/`; digit-free directories between the type segment
/// and that run are absorbed, and digits embedded in the type segment belong
/// to the type. A digit inside an absorbed intermediate directory makes the
/// key unmatchable. Keys outside the grammar return `None`.
pub fn parse_bill_key(key: &str) -> Option<BillKeyComponents> {
    let captures = key_regex().captures(key)?;
    Some(BillKeyComponents {
        congress: captures["congress"].to_string(),
        bill_type: captures["type"].to_string(),
        bill_number: captures["number"].to_string(),
        version_id: captures["version"].to_string(),
    })
}
