//! MongoDB 日志字段提取核心库
//! 读取日志 -> 按模式提取记录 -> 输出 CSV。

pub mod cli;
pub mod config;
pub mod csv_output;
pub mod error;
pub mod model;
pub mod parser;
pub mod patterns;
pub mod reader;

pub use csv_output::{write_csv, write_records, OutputSink};
pub use error::{ErrorKind, MongoLogError, Result};
pub use model::{ParseMode, Record};
pub use parser::{extract_cluster, extract_database, LogParser};
