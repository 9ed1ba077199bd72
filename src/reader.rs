use std::fs::File;
use std::io::Read;
use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use flate2::read::GzDecoder;
use tracing::debug;

use crate::error::{MongoLogError, Result};

/// File reader: loads a whole log file as one UTF-8 string, gunzipping `.gz` input.
#[derive(Clone, Default)]
pub struct FileReader;

impl FileReader {
    pub fn new() -> Self {
        Self
    }

    /// Read the entire content. A UTF-8 BOM is dropped; any other encoding is rejected.
    pub fn read_to_string(&self, path: &Path) -> Result<String> {
        let bytes = self.read_bytes(path)?;
        debug!(path = %path.display(), bytes = bytes.len(), "read input");
        decode_utf8(path, &bytes)
    }

    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        let file = File::open(path).map_err(|e| MongoLogError::from_io(path, e))?;
        let mut buf = Vec::new();
        if is_gz(path) {
            GzDecoder::new(file)
                .read_to_end(&mut buf)
                .map_err(|e| MongoLogError::from_io(path, e))?;
        } else {
            let mut file = file;
            file.read_to_end(&mut buf)
                .map_err(|e| MongoLogError::from_io(path, e))?;
        }
        Ok(buf)
    }
}

fn is_gz(path: &Path) -> bool {
    matches!(path.extension().and_then(|s| s.to_str()), Some("gz"))
}

fn decode_utf8(path: &Path, bytes: &[u8]) -> Result<String> {
    let body = match Encoding::for_bom(bytes) {
        Some((enc, bom_len)) if enc == UTF_8 => &bytes[bom_len..],
        Some((enc, _)) => {
            return Err(MongoLogError::Encoding {
                path: path.to_path_buf(),
                detected: enc.name().to_string(),
            })
        }
        None => bytes,
    };

    match UTF_8.decode_without_bom_handling_and_without_replacement(body) {
        Some(text) => Ok(text.into_owned()),
        None => {
            let mut detector = EncodingDetector::new();
            detector.feed(body, true);
            Err(MongoLogError::Encoding {
                path: path.to_path_buf(),
                detected: detector.guess(None, true).name().to_string(),
            })
        }
    }
}
