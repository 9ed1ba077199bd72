use crate::error::Result;
use crate::model::ParseMode;
use crate::patterns::PatternSet;

/// 解析器配置：每种模式对应一组已编译的字段模式。
#[derive(Debug, Clone)]
pub struct ParserConfig {
    pub cluster: PatternSet,
    pub database: PatternSet,
}

impl ParserConfig {
    /// 内置模式表；编译失败属于配置错误，在启动时直接返回。
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            cluster: PatternSet::cluster()?,
            database: PatternSet::database()?,
        })
    }

    pub fn patterns(&self, mode: ParseMode) -> &PatternSet {
        match mode {
            ParseMode::Cluster => &self.cluster,
            ParseMode::Database => &self.database,
        }
    }
}
