//! Compressed size measurement

use crate::diff::Compression;
use flate2::write::GzEncoder;
use std::io::{self, Write};

/// Brotli quality used for measurement (maximum)
pub const BROTLI_QUALITY: i32 = 11;

/// Brotli window size (log2) used for measurement
pub const BROTLI_WINDOW: i32 = 22;

/// Size of `data` after applying `compression`.
///
/// # Examples
///
/// ```
/// use sizewatch::collect::compressed_size;
/// use sizewatch::diff::Compression;
///
/// let data = "const a = 1;\n".repeat(200);
/// assert_eq!(compressed_size(data.as_bytes(), Compression::None)?, 2600);
/// assert!(compressed_size(data.as_bytes(), Compression::Gzip)? < 2600);
/// # Ok::<(), std::io::Error>(())
/// ```
pub fn compressed_size(data: &[u8], compression: Compression) -> io::Result<u64> {
    match compression {
        Compression::None => Ok(data.len() as u64),
        Compression::Gzip => gzip_size(data),
        Compression::Brotli => brotli_size(data),
    }
}

fn gzip_size(data: &[u8]) -> io::Result<u64> {
    let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
    encoder.write_all(data)?;
    Ok(encoder.finish()?.len() as u64)
}

fn brotli_size(data: &[u8]) -> io::Result<u64> {
    let params = brotli::enc::BrotliEncoderParams {
        quality: BROTLI_QUALITY,
        lgwin: BROTLI_WINDOW,
        ..Default::default()
    };

    let mut output = Vec::new();
    brotli::BrotliCompress(&mut &data[..], &mut output, &params)?;
    Ok(output.len() as u64)
}
