//! Pull-based tag event stream over one page of markup.
//!
//! The stream reflects the markup as written: no tree is built, nothing is
//! auto-closed, and nesting is never validated. Malformed fragments degrade to
//! text instead of failing, since the corpus is hand-authored from a template.

/// Ordered attribute list of one open tag.
///
/// Names are ASCII-lowercased. Lookups return the first occurrence when an
/// attribute is repeated, and valueless attributes map to the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes(
    /// `(name, value)` pairs in source order.
    Vec<(String, String)>,
);

impl Attributes {
    /// Whether an attribute with this name is present at all.
    pub fn contains(&self, name: &str) -> bool {
        return self.0.iter().any(|(n, _)| return n == name);
    }

    /// Value of the first attribute with this name.
    pub fn get(&self, name: &str) -> Option<&str> {
        return self
            .0
            .iter()
            .find(|(n, _)| return n == name)
            .map(|(_, v)| return v.as_str());
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for Attributes {
    fn from_iter<I: IntoIterator<Item = (N, V)>>(iter: I) -> Self {
        return Self(iter.into_iter().map(|(n, v)| return (n.into(), v.into())).collect());
    }
}

/// One structural event, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StructuralEvent<'a> {
    /// An end tag, or the implicit end of a raw-text element body.
    Close(String),
    /// `<!...>` content without the delimiters, e.g. `DOCTYPE html`.
    Declaration(&'a str),
    /// A start tag (self-closing or not) with its attributes.
    Open(String, Attributes),
    /// Character data between tags, verbatim.
    Text(&'a str),
}

/// Lazy event iterator over one page. Restartable by calling [`parse`] again.
pub struct Events<'a> {
    /// Byte offset of the next unread character.
    pos: usize,
    /// Set after `<script>`/`<style>`: the body up to the matching end tag is text.
    raw_text: Option<String>,
    /// The full page source.
    src: &'a str,
}

/// Outcome of trying to read markup at a `<`.
enum Markup<'a> {
    /// A tag or declaration was read; the event may be absent for comments.
    Event(Option<StructuralEvent<'a>>, usize),
    /// The `<` does not start markup and is plain text.
    NotMarkup,
    /// Markup started but never terminated before end of input.
    Unterminated,
}

/// Elements whose bodies are never scanned for tags.
const RAW_TEXT_ELEMENTS: [&str; 2] = ["script", "style"];

/// Start streaming events over `src`.
pub const fn parse(src: &str) -> Events<'_> {
    return Events {
        pos: 0,
        raw_text: None,
        src,
    };
}

impl<'a> Iterator for Events<'a> {
    type Item = StructuralEvent<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(tag) = self.raw_text.take() {
            if let Some(body) = self.raw_text_body(&tag) {
                return Some(StructuralEvent::Text(body));
            }
        }

        while self.pos < self.src.len() {
            let rest = self.src.get(self.pos..).unwrap_or("");
            let Some(lt) = rest.find('<') else {
                self.pos = self.src.len();
                return Some(StructuralEvent::Text(rest));
            };
            if lt > 0 {
                self.pos = self.pos.saturating_add(lt);
                return Some(StructuralEvent::Text(rest.get(..lt).unwrap_or("")));
            }

            match self.read_markup() {
                Markup::Event(event, end) => {
                    self.pos = end;
                    if event.is_some() {
                        return event;
                    }
                },
                Markup::NotMarkup => return Some(self.text_through_next_lt()),
                Markup::Unterminated => {
                    self.pos = self.src.len();
                    return Some(StructuralEvent::Text(rest));
                },
            }
        }
        return None;
    }
}

impl<'a> Events<'a> {
    /// Byte at `idx`, if any.
    fn byte_at(&self, idx: usize) -> Option<u8> {
        return self.src.as_bytes().get(idx).copied();
    }

    /// Read the body of a raw-text element; `None` when it is empty.
    fn raw_text_body(&mut self, tag: &str) -> Option<&'a str> {
        let rest = self.src.get(self.pos..).unwrap_or("");
        let needle = format!("</{tag}");
        let len = find_ascii_case_insensitive(rest, &needle).unwrap_or(rest.len());
        self.pos = self.pos.saturating_add(len);
        let body = rest.get(..len).unwrap_or("");
        return if body.is_empty() { None } else { Some(body) };
    }

    /// Dispatch on what follows the `<` at the current position.
    fn read_markup(&mut self) -> Markup<'a> {
        let start = self.pos;
        let rest = self.src.get(start..).unwrap_or("");

        if rest.starts_with("<!--") {
            let end = rest
                .get(4..)
                .and_then(|body| return body.find("-->"))
                .map_or(self.src.len(), |idx| return start.saturating_add(idx).saturating_add(7));
            return Markup::Event(None, end);
        }
        if rest.starts_with("<!") {
            let Some(gt) = rest.find('>') else {
                return Markup::Unterminated;
            };
            let decl = rest.get(2..gt).unwrap_or("");
            return Markup::Event(Some(StructuralEvent::Declaration(decl)), start.saturating_add(gt).saturating_add(1));
        }
        if rest.starts_with("<?") {
            return match rest.find('>') {
                Some(gt) => Markup::Event(None, start.saturating_add(gt).saturating_add(1)),
                None => Markup::Unterminated,
            };
        }
        if rest.starts_with("</") {
            if !self.byte_at(start.saturating_add(2)).is_some_and(|b| return b.is_ascii_alphabetic()) {
                return Markup::NotMarkup;
            }
            let Some(gt) = rest.find('>') else {
                return Markup::Unterminated;
            };
            let inner = rest.get(2..gt).unwrap_or("");
            let name = inner
                .split(|c: char| return c.is_ascii_whitespace() || c == '/')
                .next()
                .unwrap_or("")
                .to_ascii_lowercase();
            return Markup::Event(Some(StructuralEvent::Close(name)), start.saturating_add(gt).saturating_add(1));
        }
        if self.byte_at(start.saturating_add(1)).is_some_and(|b| return b.is_ascii_alphabetic()) {
            return self.read_start_tag();
        }
        return Markup::NotMarkup;
    }

    /// Read `<name attr=value ...>` starting at the current `<`.
    fn read_start_tag(&mut self) -> Markup<'a> {
        let mut cur = self.pos.saturating_add(1);
        let name_start = cur;
        while self.byte_at(cur).is_some_and(|b| return !is_tag_delimiter(b)) {
            cur = cur.saturating_add(1);
        }
        let name = self.src.get(name_start..cur).unwrap_or("").to_ascii_lowercase();

        let mut attributes = Vec::new();
        let mut self_closing = false;
        loop {
            cur = self.skip_whitespace(cur);
            match self.byte_at(cur) {
                None => return Markup::Unterminated,
                Some(b'>') => break,
                Some(b'/') => {
                    self_closing = true;
                    cur = cur.saturating_add(1);
                    continue;
                },
                Some(_) => {},
            }
            self_closing = false;

            let attr_start = cur;
            while self.byte_at(cur).is_some_and(|b| return !is_tag_delimiter(b) && b != b'=') {
                cur = cur.saturating_add(1);
            }
            let attr_name = self.src.get(attr_start..cur).unwrap_or("").to_ascii_lowercase();

            cur = self.skip_whitespace(cur);
            let mut value = String::new();
            if self.byte_at(cur) == Some(b'=') {
                cur = self.skip_whitespace(cur.saturating_add(1));
                match self.read_attribute_value(cur) {
                    Some((raw, end)) => {
                        value = decode_basic_entities(raw);
                        cur = end;
                    },
                    None => return Markup::Unterminated,
                }
            }
            if !attr_name.is_empty() {
                attributes.push((attr_name, value));
            }
        }

        if !self_closing && RAW_TEXT_ELEMENTS.contains(&name.as_str()) {
            self.raw_text = Some(name.clone());
        }
        let event = StructuralEvent::Open(name, Attributes(attributes));
        return Markup::Event(Some(event), cur.saturating_add(1));
    }

    /// Read a quoted or unquoted attribute value at `cur`, returning it and the offset past it.
    fn read_attribute_value(&self, cur: usize) -> Option<(&'a str, usize)> {
        let rest = self.src.get(cur..)?;
        match self.byte_at(cur)? {
            quote @ (b'"' | b'\'') => {
                let body = rest.get(1..)?;
                let close = body.find(char::from(quote))?;
                return Some((body.get(..close)?, cur.saturating_add(close).saturating_add(2)));
            },
            _ => {
                let len = rest
                    .find(|c: char| return c.is_ascii_whitespace() || c == '>')
                    .unwrap_or(rest.len());
                return Some((rest.get(..len)?, cur.saturating_add(len)));
            },
        }
    }

    /// Advance past ASCII whitespace.
    fn skip_whitespace(&self, mut cur: usize) -> usize {
        while self.byte_at(cur).is_some_and(|b| return b.is_ascii_whitespace()) {
            cur = cur.saturating_add(1);
        }
        return cur;
    }

    /// Emit a stray `<` and whatever text follows it up to the next `<`.
    fn text_through_next_lt(&mut self) -> StructuralEvent<'a> {
        let rest = self.src.get(self.pos..).unwrap_or("");
        let len = rest
            .get(1..)
            .and_then(|tail| return tail.find('<'))
            .map_or(rest.len(), |idx| return idx.saturating_add(1));
        self.pos = self.pos.saturating_add(len);
        return StructuralEvent::Text(rest.get(..len).unwrap_or(""));
    }
}

/// Decode `&amp; &lt; &gt; &quot; &#39;` so values compare equal to plain paths.
fn decode_basic_entities(raw: &str) -> String {
    if !raw.contains('&') {
        return raw.to_string();
    }
    return raw
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
}

/// Byte offset of the first case-insensitive occurrence of an ASCII `needle`.
fn find_ascii_case_insensitive(haystack: &str, needle: &str) -> Option<usize> {
    return haystack
        .as_bytes()
        .windows(needle.len())
        .position(|window| return window.eq_ignore_ascii_case(needle.as_bytes()));
}

/// Bytes that end a tag or attribute name.
const fn is_tag_delimiter(b: u8) -> bool {
    return b.is_ascii_whitespace() || b == b'>' || b == b'/';
}
