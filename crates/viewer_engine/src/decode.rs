use encoding_rs::{Encoding, UTF_8};

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DecodeError {
    #[error("failed to decode {file} with {encoding}")]
    DecodeFailure { file: String, encoding: String },
}

/// Decode snapshot file bytes into UTF-8: BOM -> strict UTF-8.
pub fn decode_text(file: &str, bytes: &[u8]) -> Result<String, DecodeError> {
    // 1) BOM aware decode using encoding_rs helper
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        return decode_with(file, &bytes[bom_len..], encoding);
    }

    // 2) Exports are written as UTF-8; anything else is an error
    decode_with(file, bytes, UTF_8)
}

fn decode_with(file: &str, bytes: &[u8], enc: &'static Encoding) -> Result<String, DecodeError> {
    enc.decode_without_bom_handling_and_without_replacement(bytes)
        .map(|text| text.into_owned())
        .ok_or_else(|| DecodeError::DecodeFailure {
            file: file.to_string(),
            encoding: enc.name().to_string(),
        })
}
