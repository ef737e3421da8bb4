use crate::config;
use crate::error::{ArtifactError, BuildError};
use std::path::Path;

/// Parses the `-mfmt=c` output of glslc (`{0x07230203,0x00010000,...}`) into SPIR-V words.
pub fn parse_c_array(text: &str) -> Result<Vec<u32>, ArtifactError> {
    let text = text.trim();
    let body = match (text.find('{'), text.rfind('}')) {
        (Some(open), Some(close)) if open < close => &text[open + 1..close],
        _ => text,
    };

    let words = body
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(parse_word)
        .collect::<Result<Vec<u32>, ArtifactError>>()?;

    match words.first().copied() {
        None => Err(ArtifactError::Empty),
        Some(magic) if magic != config::SPIRV_MAGIC => Err(ArtifactError::BadMagic(magic)),
        Some(_) => Ok(words),
    }
}

fn parse_word(token: &str) -> Result<u32, ArtifactError> {
    let hex = token.strip_prefix("0x").or_else(|| token.strip_prefix("0X"));
    let parsed = match hex {
        Some(hex) => u32::from_str_radix(hex, 16),
        None => token.parse(),
    };
    parsed.map_err(|_| ArtifactError::BadToken(token.to_string()))
}

pub fn read_spirv_artifact(path: &Path) -> Result<Vec<u32>, BuildError> {
    let text = std::fs::read_to_string(path).map_err(|source| BuildError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_c_array(&text).map_err(|source| BuildError::InvalidArtifact {
        path: path.to_path_buf(),
        source,
    })
}
