use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 over `lines`, each terminated by `\n`.
///
/// Hashing line by line keeps `["ab", "c"]` and `["a", "bc"]` distinct.
pub fn digest_lines<I, S>(lines: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut hasher = Sha256::new();
    for line in lines {
        hasher.update(line.as_ref().as_bytes());
        hasher.update(b"\n");
    }
    format!("{:x}", hasher.finalize())
}
