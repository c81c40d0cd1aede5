//! Overlay text sanitizer.
//!
//! Parses the fragment with `tl` and writes back only benign markup:
//!
//! - active elements (`script`, `style`, `iframe`, ...) are dropped with their content
//! - unknown elements are unwrapped, their children kept
//! - `on*` handlers, inline `style` and script-capable URLs are removed
//! - comments are dropped, stray `<`/`>` in text are escaped
//!
//! A `<` that cannot open a tag (`a < b`, `1<2`) is escaped before parsing,
//! otherwise the parser would swallow the text after it.

use std::borrow::Cow;

use crate::utils::html::{escape, escape_attr, escape_text, is_void_element, unescape};

/// Removed together with everything inside them.
const DROPPED: &[&str] = &[
    "applet", "base", "button", "embed", "form", "frame", "frameset", "head", "iframe", "input",
    "link", "math", "meta", "noscript", "object", "option", "script", "select", "style", "svg",
    "template", "textarea", "title",
];

/// Written back as-is (minus unsafe attributes).
const ALLOWED: &[&str] = &[
    "a", "abbr", "b", "bdi", "bdo", "blockquote", "br", "cite", "code", "del", "dfn", "div", "em",
    "h1", "h2", "h3", "h4", "h5", "h6", "hr", "i", "ins", "kbd", "li", "mark", "ol", "p", "pre",
    "q", "s", "samp", "small", "span", "strong", "sub", "sup", "time", "u", "ul", "var", "wbr",
];

const ALLOWED_ATTRS: &[&str] = &["class", "dir", "href", "lang", "title"];

const UNSAFE_SCHEMES: &[&str] = &["javascript:", "vbscript:", "data:"];

/// Sanitize user-supplied overlay text for insertion into the preview.
pub fn sanitize(input: &str) -> String {
    let input = escape_stray_lt(input);
    let input = input.as_ref();
    let Ok(dom) = tl::parse(input, tl::ParserOptions::default()) else {
        // Unparseable: show it as plain text
        return escape(input).into_owned();
    };

    let parser = dom.parser();
    let mut out = String::with_capacity(input.len());
    for handle in dom.children() {
        write_node(*handle, parser, &mut out);
    }
    out
}

/// Escape every `<` not followed by a letter, `/` or `!`.
fn escape_stray_lt(input: &str) -> Cow<'_, str> {
    let opens_markup = |rest: &str| {
        rest.chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '/' || c == '!')
    };

    let is_stray = |i: usize| !opens_markup(&input[i + 1..]);
    if !input.match_indices('<').any(|(i, _)| is_stray(i)) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len() + 8);
    let mut last = 0;
    for (i, _) in input.match_indices('<') {
        if is_stray(i) {
            out.push_str(&input[last..i]);
            out.push_str("&lt;");
            last = i + 1;
        }
    }
    out.push_str(&input[last..]);
    Cow::Owned(out)
}

fn write_node(handle: tl::NodeHandle, parser: &tl::Parser, out: &mut String) {
    let Some(node) = handle.get(parser) else {
        return;
    };

    match node {
        tl::Node::Tag(tag) => {
            let name = tag.name().as_utf8_str().to_ascii_lowercase();
            if DROPPED.contains(&name.as_str()) {
                return;
            }

            let keep = ALLOWED.contains(&name.as_str());
            if keep {
                out.push('<');
                out.push_str(&name);
                for (key, value) in tag.attributes().iter() {
                    let key = key.to_ascii_lowercase();
                    // tl hands back the raw text, entities still encoded
                    let value = value
                        .map(|v| unescape(&v).into_owned())
                        .unwrap_or_default();
                    if is_allowed_attr(&name, &key, &value) {
                        out.push(' ');
                        out.push_str(&key);
                        out.push_str("=\"");
                        out.push_str(&escape_attr(&value));
                        out.push('"');
                    }
                }
                out.push('>');
            }

            for child in tag.children().top().iter() {
                write_node(*child, parser, out);
            }

            if keep && !is_void_element(&name) {
                out.push_str("</");
                out.push_str(&name);
                out.push('>');
            }
        }
        tl::Node::Raw(bytes) => out.push_str(&escape_text(&bytes.as_utf8_str())),
        tl::Node::Comment(_) => {}
    }
}

fn is_allowed_attr(tag: &str, key: &str, value: &str) -> bool {
    if !ALLOWED_ATTRS.contains(&key) {
        return false;
    }
    if key == "href" {
        return tag == "a" && is_safe_url(value);
    }
    true
}

fn is_safe_url(value: &str) -> bool {
    // Browsers ignore whitespace and control characters inside the scheme
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace() && !c.is_control())
        .collect::<String>()
        .to_ascii_lowercase();
    !UNSAFE_SCHEMES.iter().any(|scheme| compact.starts_with(scheme))
}
