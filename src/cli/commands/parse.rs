use crate::core::Source;
use crate::parser::{ContextCarryingParser, ParseOutcome};
use crate::storage::{local::LocalLogStorage, LogStorage};
use anyhow::Result;
use std::path::Path;

/// 1つのログをパースする
pub fn parse_log_file(log: &Path, source: Source) -> Result<ParseOutcome> {
    let Some(text) = LocalLogStorage::new().read_log(log)? else {
        anyhow::bail!("Log file does not exist: {}", log.display());
    };
    Ok(ContextCarryingParser::new(source).parse_str(&text))
}

/// 1つのログをパースし、レコードをJSONで標準出力に書く
pub fn execute_parse(log: &Path, source: Source) -> Result<ParseOutcome> {
    let outcome = parse_log_file(log, source)?;

    println!("{}", serde_json::to_string_pretty(&outcome.entries)?);
    eprintln!(
        "📊 {}: {} records, {} skipped lines",
        log.display(),
        outcome.entries.len(),
        outcome.non_record_lines()
    );

    Ok(outcome)
}
