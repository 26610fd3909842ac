use std::str::FromStr;

use thiserror::Error;

pub type ParseResult<T> = Result<T, ParseError>;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unexpected end of line, expected '{exp}'")]
    UnexpectedEof { exp: String },

    #[error("Expected \"{exp}\", but got \"{got}\"")]
    UnexpectedSlice { exp: String, got: String },
}

/// Consumes the slice until a non-ascii whitespace character is reached.
pub fn take_ws(bytes: &[u8]) -> &[u8] {
    let i = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());

    &bytes[i..]
}

/// Takes the next character from the slice. If none is found, the slice is left as-is.
pub const fn take_1(bytes: &[u8]) -> (Option<u8>, &[u8]) {
    let [b, bytes @ ..] = bytes else {
        return (None, bytes);
    };

    (Some(*b), bytes)
}

/// Like `take_1`, but doesn't consume the token
pub fn peek_1(bytes: &[u8]) -> Option<u8> {
    let [b, _bytes @ ..] = bytes else { return None };

    Some(*b)
}

/// Expects `bytes` to start with `bs`, and consumes it.
pub fn expect_slice<'a>(bs: &[u8], bytes: &'a [u8]) -> ParseResult<&'a [u8]> {
    if let Some(rest) = bytes.strip_prefix(bs) {
        return Ok(rest);
    }

    let exp = String::from_utf8_lossy(bs).to_string();

    if bytes.is_empty() {
        return Err(ParseError::UnexpectedEof { exp });
    }

    let (got, _) = take_until_ws(bytes);

    Err(ParseError::UnexpectedSlice {
        exp,
        got: String::from_utf8_lossy(got.unwrap_or(bytes)).to_string(),
    })
}

/// Advance the slice until `P` is satisfied, without consuming the matching byte. If `P` is
/// never satisfied the whole slice is taken.
///
/// Returns `None` when nothing was taken.
#[inline]
pub fn take_until_fn<P>(p: P, bytes: &[u8]) -> (Option<&[u8]>, &[u8])
where
    P: Fn(u8) -> bool,
{
    let i = bytes.iter().position(|&a| p(a)).unwrap_or(bytes.len());

    if i == 0 {
        (None, bytes)
    } else {
        let (res, bytes) = bytes.split_at(i);

        (Some(res), bytes)
    }
}

/// Like `take_until_fn`, but stops at the first ascii whitespace character found, without
/// consuming it.
pub fn take_until_ws(bytes: &[u8]) -> (Option<&[u8]>, &[u8]) {
    take_until_fn(|a| a.is_ascii_whitespace(), bytes)
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConvertError {
    #[error("Error parsing bytes from UTF-8")]
    InvalidUTF8,

    #[error("Failed to convert \"{str}\"")]
    ParseError { str: String },
}

/// Converts `&[u8]` to `T` if `T: FromStr`.
pub fn convert<T: FromStr>(bytes: &[u8]) -> Result<T, ConvertError> {
    let Ok(str) = str::from_utf8(bytes) else {
        return Err(ConvertError::InvalidUTF8);
    };

    let Ok(res) = str.parse::<T>() else {
        return Err(ConvertError::ParseError {
            str: str.to_string(),
        });
    };

    Ok(res)
}

#[cfg(test)]
mod tests {
    use super::ConvertError;
    use super::ParseError;

    #[test]
    fn test_take_ws_full_ws() {
        let bytes = b"  ";

        let res = super::take_ws(bytes);

        assert_eq!(res, b"")
    }

    #[test]
    fn test_take_until_ws_without_ws() {
        let (res, rest) = super::take_until_ws(b"right");

        assert_eq!(res, Some(b"right".as_slice()));
        assert_eq!(rest, b"");
    }

    #[test]
    fn test_take_until_ws_leading_ws() {
        let (res, rest) = super::take_until_ws(b" 0");

        assert_eq!(res, None);
        assert_eq!(rest, b" 0");
    }

    #[test]
    fn test_expect_slice() {
        assert_eq!(super::expect_slice(b"->", b"-> a"), Ok(b" a".as_slice()));
        assert_eq!(
            super::expect_slice(b"->", b"=> a"),
            Err(ParseError::UnexpectedSlice {
                exp: "->".to_string(),
                got: "=>".to_string()
            })
        );
        assert_eq!(
            super::expect_slice(b"->", b""),
            Err(ParseError::UnexpectedEof {
                exp: "->".to_string()
            })
        );
    }

    #[test]
    fn test_convert() {
        assert_eq!(super::convert::<u8>(b"12"), Ok(12));
        assert_eq!(
            super::convert::<u8>(b"256"),
            Err(ConvertError::ParseError {
                str: "256".to_string()
            })
        );
    }
}
