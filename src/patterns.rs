use regex::{Regex, RegexBuilder};

use crate::error::{MongoLogError, Result};

pub const REPLICA_SET_NAME: &str = "replica_set_name";
pub const HOSTS: &str = "hosts";
pub const PRIMARY_HOST: &str = "primary_host";
pub const DATABASE_NAME: &str = "database_name";
pub const LINE_NUMBER: &str = "line_number";

/// 集群拓扑字段（rs.status() / isMaster 输出）。
pub const CLUSTER_PATTERNS: &[(&str, &str)] = &[
    (REPLICA_SET_NAME, r"setName:\s*'([^']+)'"),
    (HOSTS, r"hosts:\s*\[\s*([^\]]*)\s*\]"),
    (PRIMARY_HOST, r"primary:\s*'([^']+)'"),
];

/// 库名标记行，如 `** DATABASE: admin`。
pub const DATABASE_PATTERNS: &[(&str, &str)] = &[(DATABASE_NAME, r"\*\* DATABASE:\s*([^\s]+)")];

#[derive(Debug, Clone)]
pub struct FieldPattern {
    pub field: String,
    pub regex: Regex,
}

impl FieldPattern {
    /// Trimmed text of capture group 1 of the first match, if any.
    pub fn capture<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.regex
            .captures(text)
            .map(|caps| caps.get(1).map_or("", |m| m.as_str()).trim())
    }
}

/// 已编译的一组字段模式，保持声明顺序。
#[derive(Debug, Clone)]
pub struct PatternSet {
    fields: Vec<FieldPattern>,
}

impl PatternSet {
    pub fn compile(entries: &[(&str, &str)]) -> Result<Self> {
        let fields = entries
            .iter()
            .map(|(field, pattern)| {
                let regex = compile_regex(field, pattern)?;
                Ok(FieldPattern {
                    field: field.to_string(),
                    regex,
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { fields })
    }

    pub fn cluster() -> Result<Self> {
        Self::compile(CLUSTER_PATTERNS)
    }

    pub fn database() -> Result<Self> {
        Self::compile(DATABASE_PATTERNS)
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldPattern> {
        self.fields.iter()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

fn compile_regex(field: &str, pattern: &str) -> Result<Regex> {
    let re = RegexBuilder::new(pattern)
        .build()
        .map_err(|e| MongoLogError::Pattern {
            field: field.to_string(),
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })?;
    if re.captures_len() < 2 {
        return Err(MongoLogError::Pattern {
            field: field.to_string(),
            pattern: pattern.to_string(),
            reason: "pattern needs a capture group".to_string(),
        });
    }
    Ok(re)
}
