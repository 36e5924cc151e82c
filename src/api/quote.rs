//! Codificación de enlaces: sólo `A-Z a-z 0-9 - . _ ~` quedan literales.
use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'.').remove(b'_').remove(b'~');

pub fn quote(text: &str) -> String { utf8_percent_encode(text, UNRESERVED).to_string() }

/// Decodifica una sola vez; secuencias inválidas se dejan tal cual.
pub fn unquote(text: &str) -> String { percent_decode_str(text).decode_utf8_lossy().into_owned() }
