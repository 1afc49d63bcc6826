//! Domain normalization
//!
//! Two flavours exist on purpose. Link lines have their authority sliced out
//! ([`normalize_link`]); domains-file entries only get the literal `www.`
//! strip ([`strip_www`]) and are otherwise taken as written.
//!
//! Hosts are never rewritten: no lowercasing, IDNA or port defaulting, so
//! both sides of a match compare the text the user wrote.

const WWW_PREFIX: &str = "www.";

/// Strip a single leading `www.` from a domain token
#[inline]
pub fn strip_www(domain: &str) -> &str {
    domain.strip_prefix(WWW_PREFIX).unwrap_or(domain)
}

/// `scheme ":"` prefix length per RFC 3986, if the line starts with one
fn scheme_len(line: &str) -> Option<usize> {
    let colon = line.find(':')?;
    let scheme = &line[..colon];

    let mut chars = scheme.chars();
    let first = chars.next()?;
    if !first.is_ascii_alphabetic() {
        return None;
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.')) {
        return None;
    }

    Some(colon + 1)
}

/// The `host[:port]` part of a URL's authority, exactly as written
///
/// Needs a `//` authority, either after `scheme:` or at the start of the
/// line. `userinfo@` is dropped. Returns `None` if there is no authority or
/// it is empty.
pub fn authority_of(line: &str) -> Option<&str> {
    let rest = match scheme_len(line) {
        Some(len) => &line[len..],
        None => line,
    };
    let rest = rest.strip_prefix("//")?;

    let end = rest.find(['/', '?', '#']).unwrap_or(rest.len());
    let authority = &rest[..end];
    let host_port = match authority.rfind('@') {
        Some(at) => &authority[at + 1..],
        None => authority,
    };

    if host_port.is_empty() {
        None
    } else {
        Some(host_port)
    }
}

/// Extract the host (and port) of a URL line
///
/// Lines without an authority (bare domains, `mailto:` style URLs) are
/// returned as written after trimming. Returns `None` for blank lines.
pub fn host_of(line: &str) -> Option<&str> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    match authority_of(line) {
        Some(host) => Some(host),
        None => {
            log::trace!("No authority, using line as-is: {}", line);
            Some(line)
        }
    }
}

/// Normalize a link line to its bare domain
///
/// This is the single normalization shared by domain extraction and the
/// link side of matching.
pub fn normalize_link(line: &str) -> Option<String> {
    host_of(line).map(|host| strip_www(host).to_string())
}
