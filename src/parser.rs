use std::path::Path;

use tracing::{debug, info};

use crate::config::ParserConfig;
use crate::error::Result;
use crate::model::{ParseMode, Record};
use crate::patterns::{PatternSet, DATABASE_NAME, HOSTS, LINE_NUMBER};
use crate::reader::FileReader;

const HOST_SEPARATOR: &str = " | ";

/// 日志解析器：按模式把整份日志内容转换为扁平记录，保留最近一次的结果。
#[derive(Debug, Clone)]
pub struct LogParser {
    config: ParserConfig,
    records: Vec<Record>,
}

impl LogParser {
    /// 使用内置模式表构造。
    pub fn new() -> Result<Self> {
        Ok(Self::with_config(ParserConfig::builtin()?))
    }

    pub fn with_config(config: ParserConfig) -> Self {
        Self {
            config,
            records: Vec::new(),
        }
    }

    pub fn parse_file(&mut self, path: &Path, mode: ParseMode) -> Result<&[Record]> {
        let content = FileReader::new().read_to_string(path)?;
        info!(mode = %mode, path = %path.display(), "parsing");
        Ok(self.parse_content(&content, mode))
    }

    /// 解析内容并覆盖上一次的结果。
    pub fn parse_content(&mut self, content: &str, mode: ParseMode) -> &[Record] {
        let patterns = self.config.patterns(mode);
        self.records = match mode {
            ParseMode::Cluster => extract_cluster(content, patterns),
            ParseMode::Database => extract_database(content, patterns),
        };
        debug!(mode = %mode, records = self.records.len(), "extraction finished");
        &self.records
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }
}

/// 在整份内容中为每个字段找第一个匹配，汇总成至多一条记录。
pub fn extract_cluster(content: &str, patterns: &PatternSet) -> Vec<Record> {
    let mut record = Record::new();
    for pattern in patterns.iter() {
        let Some(value) = pattern.capture(content) else {
            continue;
        };
        if pattern.field == HOSTS {
            record.insert(pattern.field.as_str(), join_hosts(value));
        } else {
            record.insert(pattern.field.as_str(), value);
        }
    }

    if record.is_empty() {
        Vec::new()
    } else {
        vec![record]
    }
}

/// 逐行匹配；只保留 database_name 非空的行。
pub fn extract_database(content: &str, patterns: &PatternSet) -> Vec<Record> {
    content
        .trim_end()
        .split('\n')
        .enumerate()
        .filter_map(|(idx, line)| {
            let mut record = Record::new();
            record.insert(LINE_NUMBER, (idx + 1).to_string());
            for pattern in patterns.iter() {
                record.insert(pattern.field.as_str(), pattern.capture(line).unwrap_or(""));
            }
            record
                .get(DATABASE_NAME)
                .is_some_and(|name| !name.is_empty())
                .then_some(record)
        })
        .collect()
}

/// `'a', 'b' ,''` -> `a | b`
fn join_hosts(raw: &str) -> String {
    raw.split(',')
        .filter_map(|piece| {
            let piece = piece.trim();
            let piece = piece.strip_prefix('\'').unwrap_or(piece);
            let piece = piece.strip_suffix('\'').unwrap_or(piece);
            (!piece.is_empty()).then_some(piece)
        })
        .collect::<Vec<_>>()
        .join(HOST_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::patterns::{PRIMARY_HOST, REPLICA_SET_NAME};

    fn cluster() -> PatternSet {
        PatternSet::cluster().unwrap()
    }

    fn database() -> PatternSet {
        PatternSet::database().unwrap()
    }

    #[test]
    fn cluster_status_snippet() {
        let content = "\
rs0:PRIMARY> rs.isMaster()
{
    setName: 'rs0',
    hosts: [ 'mongo1:27017', 'mongo2:27017' ],
    primary: 'mongo1:27017',
}";
        let records = extract_cluster(content, &cluster());
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.get(REPLICA_SET_NAME), Some("rs0"));
        assert_eq!(r.get(HOSTS), Some("mongo1:27017 | mongo2:27017"));
        assert_eq!(r.get(PRIMARY_HOST), Some("mongo1:27017"));
        let names: Vec<&str> = r.field_names().collect();
        assert_eq!(names, vec![REPLICA_SET_NAME, HOSTS, PRIMARY_HOST]);
    }

    #[test]
    fn cluster_fields_span_lines_and_take_first_match() {
        let content = "hosts: [\n  'a:1',\n  'b:2'\n]\nprimary: 'a:1'\nprimary: 'b:2'";
        let records = extract_cluster(content, &cluster());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get(HOSTS), Some("a:1 | b:2"));
        assert_eq!(records[0].get(PRIMARY_HOST), Some("a:1"));
        assert_eq!(records[0].get(REPLICA_SET_NAME), None);
    }

    #[test]
    fn cluster_without_matches_is_empty() {
        assert!(extract_cluster("nothing to see here", &cluster()).is_empty());
        assert!(extract_cluster("", &cluster()).is_empty());
    }

    #[test]
    fn hosts_drop_empty_entries_and_quotes() {
        let records = extract_cluster("hosts: [ 'h1' , '', 'h2' ]", &cluster());
        assert_eq!(records[0].get(HOSTS), Some("h1 | h2"));
    }

    #[test]
    fn empty_host_list_is_present_but_empty() {
        let records = extract_cluster("hosts: [ ]", &cluster());
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].get(HOSTS), Some(""));
    }

    #[test]
    fn unquoted_hosts_are_kept() {
        assert_eq!(join_hosts("h1:27017, h2:27017"), "h1:27017 | h2:27017");
        assert_eq!(join_hosts("'only'"), "only");
    }

    #[test]
    fn database_lines_are_numbered_from_one() {
        let content = "start\n** DATABASE: foo\nnoise\nmore noise\n** DATABASE: bar\n";
        let records = extract_database(content, &database());
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].get(LINE_NUMBER), Some("2"));
        assert_eq!(records[0].get(DATABASE_NAME), Some("foo"));
        assert_eq!(records[1].get(LINE_NUMBER), Some("5"));
        assert_eq!(records[1].get(DATABASE_NAME), Some("bar"));
    }

    #[test]
    fn database_handles_crlf_and_blank_content() {
        let records = extract_database("** DATABASE: admin\r\n** DATABASE: local\r\n", &database());
        let names: Vec<&str> = records.iter().filter_map(|r| r.get(DATABASE_NAME)).collect();
        assert_eq!(names, vec!["admin", "local"]);

        assert!(extract_database("", &database()).is_empty());
        assert!(extract_database("\n\n  \n", &database()).is_empty());
    }

    #[test]
    fn extraction_is_idempotent() {
        let content = "** DATABASE: a\nx\n** DATABASE: b";
        let set = database();
        assert_eq!(extract_database(content, &set), extract_database(content, &set));

        let mut parser = LogParser::new().unwrap();
        let first = parser.parse_content(content, ParseMode::Database).to_vec();
        let second = parser.parse_content(content, ParseMode::Database).to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn parse_content_replaces_previous_result() {
        let mut parser = LogParser::new().unwrap();
        parser.parse_content("** DATABASE: a", ParseMode::Database);
        assert_eq!(parser.records().len(), 1);
        parser.parse_content("no match", ParseMode::Cluster);
        assert!(parser.records().is_empty());
    }
}
