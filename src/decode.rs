use std::borrow::Cow;
use std::sync::LazyLock;

use encoding_rs::Encoding;

use crate::error::{Error, Result};
use crate::Config;

/// How to handle malformed byte sequences while decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EncErrors {
    /// Substitute U+FFFD for malformed sequences.
    #[default]
    Replace,
    /// Fail on the first malformed sequence.
    Strict,
    /// Drop malformed sequences.
    Ignore,
}

/// Charset declarations live in <head>; a bounded prescan keeps the byte
/// path independent of document size.
const CHARSET_PRESCAN_BYTES: usize = 4096;

static CHARSET_META_PATTERN: LazyLock<regex::bytes::Regex> = LazyLock::new(|| {
    regex::bytes::Regex::new(r#"(?i-u)<meta[^>]+charset=["']?([^'"/>\s]+)"#).unwrap()
});

/// Convert an HTML byte buffer into a string.
///
/// Strategy order: the encoding forced by `Config::encoding` if any, then
/// an encoding declared in a `<meta charset>` tag near the start of the
/// buffer, then UTF-8, then `Config::default_encoding`. A declared
/// encoding that is unknown or fails to decode falls through to the later
/// attempts; only when every strategy fails is `DecodeFailure` returned.
pub(crate) fn decode_html(bytes: &[u8], config: &Config) -> Result<String> {
    if let Some(label) = &config.encoding {
        let encoding = Encoding::for_label(label.as_bytes())
            .ok_or_else(|| Error::DecodeFailure(format!("unknown encoding label {label:?}")))?;
        return decode_with(encoding, bytes, config.enc_errors)
            .ok_or_else(|| Error::DecodeFailure(format!("input is not valid {label}")));
    }

    if let Some(label) = sniff_meta_charset(bytes) {
        if let Some(encoding) = Encoding::for_label(label.as_bytes()) {
            if let Some(decoded) = decode_with(encoding, bytes, config.enc_errors) {
                return Ok(decoded);
            }
        }
        // unknown or failing declared encoding: proceed as if undeclared
    }

    if let Some(decoded) = decode_with(encoding_rs::UTF_8, bytes, EncErrors::Strict) {
        return Ok(decoded);
    }
    if let Some(encoding) = Encoding::for_label(config.default_encoding.as_bytes()) {
        if let Some(decoded) = decode_with(encoding, bytes, EncErrors::Strict) {
            return Ok(decoded);
        }
    }
    Err(Error::DecodeFailure(
        "no declared encoding, and input is valid neither as UTF-8 nor as the default encoding"
            .to_string(),
    ))
}

/// Extract the charset label declared in a leading `<meta>` tag, if any.
fn sniff_meta_charset(bytes: &[u8]) -> Option<String> {
    let head = &bytes[..bytes.len().min(CHARSET_PRESCAN_BYTES)];
    CHARSET_META_PATTERN
        .captures(head)
        .and_then(|caps| caps.get(1))
        .map(|m| String::from_utf8_lossy(m.as_bytes()).into_owned())
}

fn decode_with(encoding: &'static Encoding, bytes: &[u8], errors: EncErrors) -> Option<String> {
    let (decoded, _, had_errors) = encoding.decode(bytes);
    match errors {
        EncErrors::Replace => Some(decoded.into_owned()),
        EncErrors::Strict => {
            if had_errors {
                None
            } else {
                Some(decoded.into_owned())
            }
        }
        EncErrors::Ignore => {
            // Malformed sequences decoded to U+FFFD; drop them.
            if had_errors {
                Some(decoded.chars().filter(|&c| c != '\u{FFFD}').collect())
            } else {
                Some(decoded.into_owned())
            }
        }
    }
}

/// Remap the C1 control characters that browsers treat as Windows-1252
/// entity numbers (&#128;..&#159;) to the characters those entities stand
/// for. Code points in the range without a mapping are left unchanged.
pub(crate) fn remap_control_entities(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|c| ('\u{80}'..='\u{9f}').contains(&c)) {
        return Cow::Borrowed(text);
    }
    Cow::Owned(
        text.chars()
            .map(|c| match c {
                '\u{83}' => '\u{192}',  // ƒ
                '\u{84}' => '\u{201e}', // „
                '\u{85}' => '\u{2026}', // …
                '\u{86}' => '\u{2020}', // †
                '\u{87}' => '\u{2021}', // ‡
                '\u{88}' => '\u{2c6}',  // ˆ
                '\u{89}' => '\u{2030}', // ‰
                '\u{8a}' => '\u{160}',  // Š
                '\u{8b}' => '\u{2039}', // ‹
                '\u{8c}' => '\u{152}',  // Œ
                '\u{91}' => '\u{2018}', // '
                '\u{92}' => '\u{2019}', // '
                '\u{93}' => '\u{201c}', // "
                '\u{94}' => '\u{201d}', // "
                '\u{95}' => '\u{2022}', // •
                '\u{96}' => '\u{2013}', // –
                '\u{97}' => '\u{2014}', // —
                '\u{98}' => '\u{2dc}',  // ˜
                '\u{99}' => '\u{2122}', // ™
                '\u{9a}' => '\u{161}',  // š
                '\u{9b}' => '\u{203a}', // ›
                '\u{9c}' => '\u{153}',  // œ
                '\u{9f}' => '\u{178}',  // Ÿ
                other => other,
            })
            .collect(),
    )
}
