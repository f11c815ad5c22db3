// Template Method: `DataMiner::mine` fixes the order of steps. Each miner
// supplies its own parsing, and may override optional hooks that run at
// fixed points in that order.

use std::io;

use lazy_static::lazy_static;
use regex::Regex;

use crate::transcript::Transcript;

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub name: String,
    pub score: u32,
}

pub trait DataMiner {
    fn format(&self) -> &'static str;

    /// Required step.
    fn parse(&self, raw: &str) -> Vec<Record>;

    /// Hook: runs between extraction and parsing.
    fn before_parse(&self, _raw: &str) -> Option<String> {
        None
    }

    /// Hook: runs between analysis and reporting.
    fn after_analysis(&self, _records: &[Record]) -> Option<String> {
        None
    }

    /// The template method. Not meant to be overridden.
    fn mine(&self, source: &str) -> Vec<String> {
        let mut steps = vec![format!("open {} source", self.format())];
        steps.push(format!("extract {} bytes", source.len()));
        if let Some(note) = self.before_parse(source) {
            steps.push(format!("hook {note}"));
        }
        let records = self.parse(source);
        steps.push(format!("parse {} records", records.len()));
        let total: u64 = records.iter().map(|r| u64::from(r.score)).sum();
        let average = u64::try_from(records.len())
            .ok()
            .filter(|&n| n > 0)
            .map_or(0, |n| total / n);
        steps.push(format!("analyze average score {average}"));
        if let Some(note) = self.after_analysis(&records) {
            steps.push(format!("hook {note}"));
        }
        steps.push(format!("report {} rows", records.len()));
        steps.push("close".to_string());
        steps
    }
}

pub struct CsvMiner;

impl DataMiner for CsvMiner {
    fn format(&self) -> &'static str {
        "csv"
    }

    fn parse(&self, raw: &str) -> Vec<Record> {
        raw.lines()
            .skip(1)
            .filter_map(|line| {
                let (name, score) = line.split_once(',')?;
                Some(Record {
                    name: name.trim().to_string(),
                    score: score.trim().parse().ok()?,
                })
            })
            .collect()
    }

    fn before_parse(&self, raw: &str) -> Option<String> {
        raw.lines()
            .next()
            .map(|header| format!("skip header {header:?}"))
    }
}

lazy_static! {
    static ref JSON_RECORD: Regex =
        Regex::new(r#"\{\s*"name"\s*:\s*"([^"]*)"\s*,\s*"score"\s*:\s*(\d+)\s*\}"#)
            .expect("record pattern is valid");
}

pub struct JsonMiner;

impl DataMiner for JsonMiner {
    fn format(&self) -> &'static str {
        "json"
    }

    fn parse(&self, raw: &str) -> Vec<Record> {
        JSON_RECORD
            .captures_iter(raw)
            .filter_map(|caps| {
                Some(Record {
                    name: caps[1].to_string(),
                    score: caps[2].parse().ok()?,
                })
            })
            .collect()
    }

    fn after_analysis(&self, records: &[Record]) -> Option<String> {
        let best = records.iter().max_by_key(|r| r.score)?;
        Some(format!("top scorer {} ({})", best.name, best.score))
    }
}

const CSV_SOURCE: &str = "name,score\nann,90\nbob,75\ncid,60";
const JSON_SOURCE: &str =
    r#"[{"name": "ann", "score": 90}, {"name": "bob", "score": 75}, {"name": "cid", "score": 60}]"#;

pub fn run(out: &mut Transcript<'_>) -> io::Result<()> {
    let miners: [(&dyn DataMiner, &str); 2] = [(&CsvMiner, CSV_SOURCE), (&JsonMiner, JSON_SOURCE)];
    for (miner, source) in miners {
        for step in miner.mine(source) {
            out.line(miner.format(), step)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transcript::capture;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_both_parsers_agree() {
        assert_eq!(CsvMiner.parse(CSV_SOURCE), JsonMiner.parse(JSON_SOURCE));
        assert_eq!(CsvMiner.parse(CSV_SOURCE).len(), 3);
    }

    #[test]
    fn test_hooks_land_at_fixed_positions() {
        let csv = CsvMiner.mine(CSV_SOURCE);
        let json = JsonMiner.mine(JSON_SOURCE);
        assert_eq!(csv[2], "hook skip header \"name,score\"");
        assert_eq!(json[4], "hook top scorer ann (90)");
        // Skeleton steps are identical apart from the hooks and the format.
        let strip = |steps: &[String]| -> Vec<String> {
            steps
                .iter()
                .filter(|s| !s.starts_with("hook") && !s.starts_with("open") && !s.starts_with("extract"))
                .cloned()
                .collect()
        };
        assert_eq!(strip(csv.as_slice()), strip(json.as_slice()));
    }

    #[test]
    fn test_empty_source() {
        let steps = JsonMiner.mine("[]");
        assert!(steps.contains(&"analyze average score 0".to_string()));
        assert!(!steps.iter().any(|s| s.starts_with("hook")));
    }

    #[test]
    fn test_average_of_large_scores() {
        let source = "name,score\nann,4294967295\nbob,4294967295\ncid,4294967293";
        let steps = CsvMiner.mine(source);
        assert_eq!(steps[4], "analyze average score 4294967294");
    }

    #[test]
    fn test_transcript() {
        let text = capture(run).unwrap();
        let expected_csv = "\
csv: open csv source
csv: extract 31 bytes
csv: hook skip header \"name,score\"
csv: parse 3 records
csv: analyze average score 75
csv: report 3 rows
csv: close
";
        assert!(text.starts_with(expected_csv));
        assert!(text.contains("json: analyze average score 75\njson: hook top scorer ann (90)\n"));
    }
}
