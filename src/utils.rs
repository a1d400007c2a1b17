use crate::digest::MAX_CHUNK_SIZE;

/// Parse a byte count such as `10MB`, `4KiB` or `10000000`.
///
/// Returns 0 when the text is not understood.
pub fn parse_size(s: &str) -> u64 {
    let s = s.trim().to_lowercase();
    let units = [
        ("gib", 1024u64.pow(3)),
        ("mib", 1024u64.pow(2)),
        ("kib", 1024),
        ("gb", 1000u64.pow(3)),
        ("mb", 1000u64.pow(2)),
        ("kb", 1000),
        ("g", 1000u64.pow(3)),
        ("m", 1000u64.pow(2)),
        ("k", 1000),
        ("b", 1),
    ];

    for (unit, mult) in units {
        if let Some(number) = s.strip_suffix(unit) {
            if let Ok(val) = number.trim().parse::<f64>() {
                return (val * mult as f64) as u64;
            }
        }
    }
    s.replace('_', "").parse().unwrap_or(0)
}

/// clap value parser for chunk sizes; rejects zero, garbage and anything
/// above [`MAX_CHUNK_SIZE`].
pub fn parse_chunk_size(s: &str) -> Result<usize, String> {
    match usize::try_from(parse_size(s)) {
        Ok(n) if (1..=MAX_CHUNK_SIZE).contains(&n) => Ok(n),
        Ok(0) | Err(_) => Err(format!("invalid chunk size: {s:?}")),
        Ok(_) => Err(format!("chunk size {s:?} exceeds {MAX_CHUNK_SIZE} bytes")),
    }
}
