pub const MAX_INPUT_SIZE: usize = 64 * 1024;

/// The longest valid UTF-8 prefix of `data`, capped at [`MAX_INPUT_SIZE`] bytes.
pub fn signature_text(data: &[u8]) -> &str {
    let data = &data[..data.len().min(MAX_INPUT_SIZE)];
    match std::str::from_utf8(data) {
        Ok(text) => text,
        Err(err) => std::str::from_utf8(&data[..err.valid_up_to()]).unwrap_or_default(),
    }
}

/// First line is a class signature, every following line a method signature.
pub fn split_signatures(text: &str) -> (&str, Vec<&str>) {
    let mut lines = text.split('\n');
    let class = lines.next().unwrap_or_default();
    (class, lines.collect())
}
