//! Storage-format markup scanning.
//!
//! Three views over a raw fragment:
//! - [`scan_macros`]: structured-macro occurrences with their parameter bags
//! - [`scan_markers`]: inline emoticon markers with their offsets
//! - [`clean_text`]: the human-readable text with tags and entities resolved
//!
//! The scanner is regex-based and tolerant: malformed markup yields fewer
//! results, never an error.

use std::collections::BTreeMap;
use std::ops::Range;
use std::sync::LazyLock;

use regex::{Captures, Regex};

static TOKEN_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"(?s)",
        r"(?P<open><ac:structured-macro\b(?P<open_attrs>[^>]*?)(?P<self_close>/)?>)",
        r"|(?P<close></ac:structured-macro\s*>)",
        r"|(?P<empty_param><ac:parameter\b[^>]*/>)",
        r"|(?P<param><ac:parameter\b(?P<param_attrs>[^>]*)>(?P<value>.*?)</ac:parameter\s*>)",
    ))
    .expect("token pattern is valid")
});

static ATTR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"([\w:-]+)\s*=\s*(?:"([^"]*)"|'([^']*)')"#).expect("attribute pattern is valid")
});

static PARAM_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)<ac:parameter\b[^>]*/>|<ac:parameter\b[^>]*>.*?</ac:parameter\s*>")
        .expect("parameter pattern is valid")
});

static CDATA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!\[CDATA\[(.*?)\]\]>").expect("cdata pattern is valid"));

static EMOTICON_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"<ac:emoticon\b(?P<attrs>[^>]*?)/?>").expect("emoticon pattern is valid")
});

static TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("tag pattern is valid"));

/// Longest entity body we try to decode (`&#x10FFFF;` fits).
const MAX_ENTITY_LEN: usize = 10;

// ---------------------------------------------------------------------------
// Macros
// ---------------------------------------------------------------------------

/// One `<ac:structured-macro>` occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Macro {
    /// The `ac:name` attribute, e.g. `jira` or `status`.
    pub kind: String,
    /// Parameter name → cleaned value. First occurrence of a name wins.
    pub params: BTreeMap<String, String>,
    /// Byte span from the opening tag to the end of the closing tag.
    pub span: Range<usize>,
}

impl Macro {
    /// Whether this macro has the given type (ASCII case-insensitive).
    #[must_use]
    pub fn is(&self, kind: &str) -> bool {
        self.kind.eq_ignore_ascii_case(kind)
    }

    #[must_use]
    pub fn param(&self, name: &str) -> Option<&str> {
        self.params.get(name).map(String::as_str)
    }
}

/// All macro occurrences in `fragment`, ordered by opening position.
///
/// Parameters attach to the innermost open macro. Macros still open at the
/// end of the fragment are emitted with a span reaching the end.
#[must_use]
pub fn scan_macros(fragment: &str) -> Vec<Macro> {
    let mut open: Vec<Macro> = Vec::new();
    let mut found: Vec<Macro> = Vec::new();

    for caps in TOKEN_RE.captures_iter(fragment) {
        if let Some(tag) = caps.name("open") {
            let attrs = caps.name("open_attrs").map_or("", |m| m.as_str());
            let occurrence = Macro {
                kind: attribute(attrs, "ac:name").unwrap_or_default(),
                params: BTreeMap::new(),
                span: tag.start()..tag.end(),
            };
            if caps.name("self_close").is_some() {
                found.push(occurrence);
            } else {
                open.push(occurrence);
            }
        } else if let Some(tag) = caps.name("close") {
            if let Some(mut occurrence) = open.pop() {
                occurrence.span.end = tag.end();
                found.push(occurrence);
            }
        } else if caps.name("param").is_some() {
            let Some(current) = open.last_mut() else {
                continue;
            };
            let attrs = caps.name("param_attrs").map_or("", |m| m.as_str());
            let name = attribute(attrs, "ac:name").unwrap_or_default();
            let value = caps.name("value").map_or("", |m| m.as_str());
            current
                .params
                .entry(name)
                .or_insert_with(|| clean_text(value));
        }
    }

    for mut occurrence in open.drain(..) {
        occurrence.span.end = fragment.len();
        found.push(occurrence);
    }

    found.sort_by_key(|m| m.span.start);
    found
}

// ---------------------------------------------------------------------------
// Markers
// ---------------------------------------------------------------------------

/// An inline `<ac:emoticon>` marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Marker {
    /// The `ac:name` attribute, e.g. `red-star`.
    pub name: String,
    /// The `ac:emoji-shortname` attribute without colons, e.g. `red_circle`.
    pub shortname: Option<String>,
    /// Byte offset of the marker tag in the scanned fragment.
    pub offset: usize,
}

impl Marker {
    /// Shortname when present, else the name.
    #[must_use]
    pub fn identifier(&self) -> &str {
        self.shortname.as_deref().unwrap_or(&self.name)
    }

    /// Whether either name equals `identifier`.
    #[must_use]
    pub fn matches(&self, identifier: &str) -> bool {
        self.name == identifier || self.shortname.as_deref() == Some(identifier)
    }
}

/// All emoticon markers in `fragment`, in document order.
#[must_use]
pub fn scan_markers(fragment: &str) -> Vec<Marker> {
    EMOTICON_RE
        .captures_iter(fragment)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let marker = marker_from_attrs(caps.name("attrs").map_or("", |m| m.as_str()), whole.start());
            (!marker.name.is_empty() || marker.shortname.is_some()).then_some(marker)
        })
        .collect()
}

fn marker_from_attrs(attrs: &str, offset: usize) -> Marker {
    Marker {
        name: attribute(attrs, "ac:name").unwrap_or_default(),
        shortname: attribute(attrs, "ac:emoji-shortname")
            .map(|s| s.trim_matches(':').to_string())
            .filter(|s| !s.is_empty()),
        offset,
    }
}

// ---------------------------------------------------------------------------
// Text
// ---------------------------------------------------------------------------

/// Human-readable text of a fragment.
///
/// Parameter elements are dropped, CDATA is unwrapped, emoticons become
/// `:identifier:`, every other tag becomes a space, entities are decoded,
/// and whitespace (NBSP included) is collapsed.
#[must_use]
pub fn clean_text(fragment: &str) -> String {
    let without_params = PARAM_RE.replace_all(fragment, " ");
    let unwrapped = CDATA_RE.replace_all(&without_params, "$1");
    let with_markers = EMOTICON_RE.replace_all(&unwrapped, |caps: &Captures<'_>| {
        let marker = marker_from_attrs(caps.name("attrs").map_or("", |m| m.as_str()), 0);
        let id = marker.identifier();
        if id.is_empty() {
            " ".to_string()
        } else {
            format!(" :{id}: ")
        }
    });
    let stripped = TAG_RE.replace_all(&with_markers, " ");
    decode_entities(&stripped)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Decode HTML entities. Unknown or malformed entities are kept verbatim.
#[must_use]
pub fn decode_entities(text: &str) -> String {
    if !text.contains('&') {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail
            .find(';')
            .filter(|&end| end <= MAX_ENTITY_LEN + 1)
            .and_then(|end| decode_entity(&tail[1..end]).map(|c| (c, end)));
        match decoded {
            Some((c, end)) => {
                out.push(c);
                rest = &tail[end + 1..];
            }
            None => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(body: &str) -> Option<char> {
    if let Some(number) = body.strip_prefix('#') {
        let code = match number.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => number.parse().ok()?,
        };
        return char::from_u32(code);
    }

    let c = match body {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => '\u{a0}',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "hellip" => '\u{2026}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201c}',
        "rdquo" => '\u{201d}',
        "bull" => '\u{2022}',
        "middot" => '\u{b7}',
        "rarr" => '\u{2192}',
        "larr" => '\u{2190}',
        "copy" => '\u{a9}',
        "reg" => '\u{ae}',
        "trade" => '\u{2122}',
        "deg" => '\u{b0}',
        "aacute" => '\u{e1}',
        "atilde" => '\u{e3}',
        "ccedil" => '\u{e7}',
        "eacute" => '\u{e9}',
        "ecirc" => '\u{ea}',
        "iacute" => '\u{ed}',
        "oacute" => '\u{f3}',
        "otilde" => '\u{f5}',
        "uacute" => '\u{fa}',
        _ => return None,
    };
    Some(c)
}

/// Value of attribute `name` in a tag's attribute text, entity-decoded.
fn attribute(attrs: &str, name: &str) -> Option<String> {
    ATTR_RE.captures_iter(attrs).find_map(|caps| {
        if caps.get(1)?.as_str() != name {
            return None;
        }
        let value = caps.get(2).or_else(|| caps.get(3))?.as_str();
        Some(decode_entities(value))
    })
}
