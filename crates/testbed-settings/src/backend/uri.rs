//! Minimal RFC 3986 splitting for backend descriptors.
//!
//! Only what descriptor parsing needs: syntax checking, scheme extraction, and
//! `[userinfo@]host[:port]` authority parsing. Errors are plain cause strings;
//! the caller decides which descriptor error kind they map to.

use std::sync::OnceLock;

use regex::Regex;

/// RFC 3986 appendix B reference splitter.
const URI_PATTERN: &str = r"^(?:([^:/?#]+):)?(?://([^/?#]*))?([^?#]*)(?:\?([^#]*))?(?:#(.*))?$";

/// Scheme grammar: ALPHA *( ALPHA / DIGIT / "+" / "-" / "." ).
const SCHEME_PATTERN: &str = r"^[A-Za-z][A-Za-z0-9+.\-]*$";

static URI_REGEX: OnceLock<Regex> = OnceLock::new();
static SCHEME_REGEX: OnceLock<Regex> = OnceLock::new();

fn uri_regex() -> &'static Regex {
    URI_REGEX.get_or_init(|| Regex::new(URI_PATTERN).expect("invalid regex pattern"))
}

fn scheme_regex() -> &'static Regex {
    SCHEME_REGEX.get_or_init(|| Regex::new(SCHEME_PATTERN).expect("invalid regex pattern"))
}

/// The components of a syntactically valid URI reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct UriParts<'a> {
    /// Scheme, if the reference is absolute.
    pub scheme: Option<&'a str>,
    /// Everything between `scheme:` and the fragment.
    pub scheme_specific_part: &'a str,
    /// Authority, if the reference has a `//` component.
    pub authority: Option<&'a str>,
}

/// A parsed authority.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct HostPort {
    /// Host, `None` when empty. IPv6 literals keep their brackets.
    pub host: Option<String>,
    /// Port, `None` when absent or zero.
    pub port: Option<u16>,
}

/// Splits `input` into URI components, rejecting anything that is not a
/// syntactically valid URI reference.
pub(crate) fn split_uri(input: &str) -> Result<UriParts<'_>, String> {
    check_characters(input)?;

    if input.starts_with(':') {
        return Err("expected scheme name at index 0".to_string());
    }

    let captures = uri_regex()
        .captures(input)
        .ok_or_else(|| "malformed URI reference".to_string())?;

    let scheme = captures.get(1).map(|m| m.as_str());
    if let Some(scheme) = scheme {
        if !scheme_regex().is_match(scheme) {
            return Err(format!("illegal character in scheme name: {}", scheme));
        }
    }

    let without_fragment = match input.find('#') {
        Some(idx) => &input[..idx],
        None => input,
    };
    let scheme_specific_part = match scheme {
        Some(scheme) => &without_fragment[scheme.len() + 1..],
        None => without_fragment,
    };
    if scheme.is_some() && scheme_specific_part.is_empty() {
        return Err(format!(
            "expected scheme-specific part at index {}",
            input.len()
        ));
    }

    Ok(UriParts {
        scheme,
        scheme_specific_part,
        authority: captures.get(2).map(|m| m.as_str()),
    })
}

/// Parses `[userinfo@]host[:port]`.
pub(crate) fn parse_authority(authority: &str) -> Result<HostPort, String> {
    let host_port = match authority.rsplit_once('@') {
        Some((_, rest)) => rest,
        None => authority,
    };

    let (host, port) = if let Some(bracketed) = host_port.strip_prefix('[') {
        let (literal, rest) = bracketed
            .split_once(']')
            .ok_or_else(|| format!("unterminated IPv6 address: {}", host_port))?;
        let port = match rest {
            "" => None,
            _ => Some(
                rest.strip_prefix(':')
                    .ok_or_else(|| format!("unexpected text after IPv6 address: {}", rest))?,
            ),
        };
        (format!("[{}]", literal), port)
    } else {
        let (host, port) = match host_port.split_once(':') {
            Some((host, port)) => (host, Some(port)),
            None => (host_port, None),
        };
        if host.contains(['[', ']']) {
            return Err(format!("misplaced bracket in host: {}", host));
        }
        (host.to_string(), port)
    };

    Ok(HostPort {
        host: if host.is_empty() { None } else { Some(host) },
        port: port.map(parse_port).transpose()?.flatten(),
    })
}

/// Parses a port; empty and zero mean "no port".
///
/// Ports must fit in a `u16`. Values above 65535 are rejected here, although
/// a lenient URL parser would accept them and fail only on connect.
fn parse_port(port: &str) -> Result<Option<u16>, String> {
    if port.is_empty() {
        return Ok(None);
    }
    if !port.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("invalid port number: {}", port));
    }
    let value: u32 = port
        .parse()
        .map_err(|_| format!("port out of range: {}", port))?;
    let value = u16::try_from(value).map_err(|_| format!("port out of range: {}", port))?;
    Ok(if value == 0 { None } else { Some(value) })
}

fn check_characters(input: &str) -> Result<(), String> {
    let bytes = input.as_bytes();
    for (idx, c) in input.char_indices() {
        let ok = match c {
            'A'..='Z' | 'a'..='z' | '0'..='9' => true,
            '-' | '.' | '_' | '~' => true,
            ':' | '/' | '?' | '#' | '[' | ']' | '@' => true,
            '!' | '$' | '&' | '\'' | '(' | ')' | '*' | '+' | ',' | ';' | '=' => true,
            '%' => {
                let escape = bytes.get(idx + 1..idx + 3);
                if !escape.is_some_and(|e| e.iter().all(u8::is_ascii_hexdigit)) {
                    return Err(format!("malformed escape pair at index {}", idx));
                }
                true
            }
            c => !c.is_ascii() && !c.is_control() && !c.is_whitespace(),
        };
        if !ok {
            return Err(format!("illegal character {:?} at index {}", c, idx));
        }
    }
    Ok(())
}
