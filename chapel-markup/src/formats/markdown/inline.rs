//! Inline scanning for a single line of markup.
//!
//! The scanner walks the line once, left to right. At each position the
//! recognizers are tried in a fixed priority order; the first one that matches
//! consumes its whole span and the walk resumes after it. Text that matches
//! nothing is carried through as [`InlineContent::Text`].
//!
//! Emphasis contents (bold, italic, strikethrough) and link text are scanned
//! recursively. While looking for a closing delimiter the scanner jumps over
//! *atoms* (inline code, images, videos, links) so characters inside a URL or
//! a code span can never close or open emphasis.
//!
//! # Lookup tables
//!
//! Every search the recognizers need ("next `)` at or after i", "where does
//! the closing-delimiter search starting at i stop") is answered from a table
//! built right to left before the walk starts. Building the tables is linear
//! in the line length, each recognizer is then O(1), and recursion only ever
//! rescans the disjoint spans it consumed. Emphasis cannot nest in itself and
//! links cannot nest in links, so the recursion depth is bounded and a whole
//! line stays linear no matter how many unclosed openers it holds.
//!
//! All delimiters are ASCII, so every index the scanner slices at is a char
//! boundary even when the line contains multi-byte text.

use crate::ir::nodes::{Image, InlineContent, Link, Video};

const VIDEO_OPEN: &[u8] = b"[[video:";
const VIDEO_CLOSE: &[u8] = b"]]";

/// Which atoms a closing-delimiter search may jump over.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Atoms {
    /// Code, images, videos and links (used inside emphasis)
    All,
    /// Code, images and videos (used inside link text, links do not nest)
    NoLinks,
}

/// Parse one line (no `\n`) into inline content.
pub fn parse_inlines(line: &str) -> Vec<InlineContent> {
    Scanner::new(line).parse()
}

/// One line plus its lookup tables. Every table has `len + 1` entries and
/// uses `len` for "not found".
struct Scanner<'a> {
    line: &'a str,
    bytes: &'a [u8],
    next_backtick: Vec<usize>,
    next_paren: Vec<usize>,
    /// Next `](`
    next_link_mid: Vec<usize>,
    /// Next `]]`
    next_video_close: Vec<usize>,
    /// Next non-whitespace char, valid at char boundaries only
    next_solid: Vec<usize>,
    /// Where a link-text search starting at i stops (a `]` outside atoms)
    link_text_stop: Vec<usize>,
    stop_star: Vec<usize>,
    stop_underscore: Vec<usize>,
    stop_tilde: Vec<usize>,
}

impl<'a> Scanner<'a> {
    fn new(line: &'a str) -> Self {
        let bytes = line.as_bytes();
        let n = bytes.len();
        let mut scanner = Scanner {
            line,
            bytes,
            next_backtick: next_positions(n, |i| bytes[i] == b'`'),
            next_paren: next_positions(n, |i| bytes[i] == b')'),
            next_link_mid: next_positions(n, |i| bytes[i..].starts_with(b"](")),
            next_video_close: next_positions(n, |i| bytes[i..].starts_with(VIDEO_CLOSE)),
            next_solid: next_solid(line),
            link_text_stop: Vec::new(),
            stop_star: Vec::new(),
            stop_underscore: Vec::new(),
            stop_tilde: Vec::new(),
        };

        // Link spans depend on `link_text_stop`, so it has to exist before
        // the emphasis tables (which jump over links) are built.
        let plain = scanner.atom_ends(Atoms::NoLinks);
        scanner.link_text_stop = scan_stops(bytes, &plain, b']');

        let all = scanner.atom_ends(Atoms::All);
        scanner.stop_star = scan_stops(bytes, &all, b'*');
        scanner.stop_underscore = scan_stops(bytes, &all, b'_');
        scanner.stop_tilde = scan_stops(bytes, &all, b'~');
        scanner
    }

    fn len(&self) -> usize {
        self.bytes.len()
    }

    fn parse(&self) -> Vec<InlineContent> {
        let mut content = Vec::new();
        let mut text_start = 0;
        let mut pos = 0;

        while pos < self.len() {
            match self.token(pos) {
                Some((node, end)) => {
                    push_text(&mut content, &self.line[text_start..pos]);
                    content.push(node);
                    pos = end;
                    text_start = end;
                }
                None => pos += 1,
            }
        }
        push_text(&mut content, &self.line[text_start..]);

        content
    }

    /// Try every recognizer at `pos`, in priority order.
    fn token(&self, pos: usize) -> Option<(InlineContent, usize)> {
        match self.bytes[pos] {
            b'!' => self.image(pos),
            b'[' => self.video(pos).or_else(|| self.link(pos)),
            b'`' => self.code(pos),
            b'*' => self
                .delimited(pos, b"**", &self.stop_star)
                .map(|(c, end)| (InlineContent::Bold(c), end)),
            b'_' => self
                .delimited(pos, b"_", &self.stop_underscore)
                .map(|(c, end)| (InlineContent::Italic(c), end)),
            b'~' => self
                .delimited(pos, b"~~", &self.stop_tilde)
                .map(|(c, end)| (InlineContent::Strikethrough(c), end)),
            _ => None,
        }
    }

    fn image(&self, pos: usize) -> Option<(InlineContent, usize)> {
        let (alt_end, src_end) = self.image_span(pos)?;
        let image = Image {
            src: self.line[alt_end + 2..src_end].to_string(),
            alt: self.line[pos + 2..alt_end].to_string(),
        };
        Some((InlineContent::Image(image), src_end + 1))
    }

    fn video(&self, pos: usize) -> Option<(InlineContent, usize)> {
        let src_end = self.video_span(pos)?;
        let video = Video {
            src: self.line[pos + VIDEO_OPEN.len()..src_end].trim().to_string(),
        };
        Some((InlineContent::Video(video), src_end + VIDEO_CLOSE.len()))
    }

    fn code(&self, pos: usize) -> Option<(InlineContent, usize)> {
        let end = self.code_span(pos)?;
        Some((InlineContent::Code(self.line[pos + 1..end].to_string()), end + 1))
    }

    fn link(&self, pos: usize) -> Option<(InlineContent, usize)> {
        let (text_end, href_end) = self.link_span(pos)?;
        let link = Link {
            text: parse_inlines(&self.line[pos + 1..text_end]),
            href: self.line[text_end + 2..href_end].to_string(),
        };
        Some((InlineContent::Link(link), href_end + 1))
    }

    /// Emphasis-like spans: `delim content delim` where `content` is
    /// non-empty and the first delimiter byte outside atoms starts the
    /// closing delimiter.
    fn delimited(
        &self,
        pos: usize,
        delim: &[u8],
        stops: &[usize],
    ) -> Option<(Vec<InlineContent>, usize)> {
        if !self.bytes[pos..].starts_with(delim) {
            return None;
        }
        let content_start = pos + delim.len();
        let close = stops[content_start];
        if close == self.len() || close == content_start || !self.bytes[close..].starts_with(delim)
        {
            return None;
        }
        let inner = parse_inlines(&self.line[content_start..close]);
        Some((inner, close + delim.len()))
    }

    /// `![alt](src)`: alt runs to the first `](`, src to the first `)`.
    /// Returns the positions of that `](` and `)`.
    fn image_span(&self, pos: usize) -> Option<(usize, usize)> {
        if !self.bytes[pos..].starts_with(b"![") {
            return None;
        }
        let alt_end = self.next_link_mid[pos + 2];
        if alt_end == self.len() {
            return None;
        }
        let src_start = alt_end + 2;
        let src_end = self.next_paren[src_start];
        (src_end < self.len() && src_end > src_start).then_some((alt_end, src_end))
    }

    /// `[[video: src]]`, whitespace around the source is ignored but some
    /// source must remain. Returns the position of the closing `]]`.
    fn video_span(&self, pos: usize) -> Option<usize> {
        if !self.bytes[pos..].starts_with(VIDEO_OPEN) {
            return None;
        }
        let src_start = pos + VIDEO_OPEN.len();
        let src_end = self.next_video_close[src_start];
        (src_end < self.len() && self.next_solid[src_start] < src_end).then_some(src_end)
    }

    /// `` `code` ``: at least one character, no backtick inside. Returns the
    /// closing backtick.
    fn code_span(&self, pos: usize) -> Option<usize> {
        let start = pos + 1;
        let end = self.next_backtick[start];
        (end < self.len() && end > start).then_some(end)
    }

    /// `[text](href)`: text is non-empty and has no `]` outside atoms.
    /// Returns the positions of the `](` and the closing `)`.
    fn link_span(&self, pos: usize) -> Option<(usize, usize)> {
        let text_start = pos + 1;
        let text_end = self.link_text_stop[text_start];
        if text_end == self.len()
            || text_end == text_start
            || !self.bytes[text_end..].starts_with(b"](")
        {
            return None;
        }
        let href_start = text_end + 2;
        let href_end = self.next_paren[href_start];
        (href_end < self.len() && href_end > href_start).then_some((text_end, href_end))
    }

    /// End of the atom starting at `pos`, if there is one.
    fn atom_end(&self, pos: usize, atoms: Atoms) -> Option<usize> {
        match self.bytes[pos] {
            b'`' => self.code_span(pos).map(|end| end + 1),
            b'!' => self.image_span(pos).map(|(_, src_end)| src_end + 1),
            b'[' => self
                .video_span(pos)
                .map(|src_end| src_end + VIDEO_CLOSE.len())
                .or_else(|| match atoms {
                    Atoms::All => self.link_span(pos).map(|(_, href_end)| href_end + 1),
                    Atoms::NoLinks => None,
                }),
            _ => None,
        }
    }

    fn atom_ends(&self, atoms: Atoms) -> Vec<Option<usize>> {
        (0..self.len()).map(|pos| self.atom_end(pos, atoms)).collect()
    }
}

fn push_text(content: &mut Vec<InlineContent>, text: &str) {
    if !text.is_empty() {
        content.push(InlineContent::Text(text.to_string()));
    }
}

/// `table[i]` is the first `j >= i` with `hit(j)`, or `len`.
fn next_positions(len: usize, hit: impl Fn(usize) -> bool) -> Vec<usize> {
    let mut table = vec![len; len + 1];
    for i in (0..len).rev() {
        table[i] = if hit(i) { i } else { table[i + 1] };
    }
    table
}

fn next_solid(line: &str) -> Vec<usize> {
    let mut table = vec![line.len(); line.len() + 1];
    let mut next = line.len();
    for (i, ch) in line.char_indices().rev() {
        if !ch.is_whitespace() {
            next = i;
        }
        table[i] = next;
    }
    table
}

/// `table[i]` is where a left-to-right search from `i` for `target` stops,
/// jumping over the atom spans in `ends`.
fn scan_stops(bytes: &[u8], ends: &[Option<usize>], target: u8) -> Vec<usize> {
    let len = bytes.len();
    let mut table = vec![len; len + 1];
    for i in (0..len).rev() {
        table[i] = match ends[i] {
            Some(end) => table[end],
            None if bytes[i] == target => i,
            None => table[i + 1],
        };
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(s: &str) -> InlineContent {
        InlineContent::Text(s.to_string())
    }

    #[test]
    fn plain_text_is_one_node() {
        assert_eq!(
            parse_inlines("plain text, no markup"),
            vec![text("plain text, no markup")]
        );
    }

    #[test]
    fn empty_line_has_no_content() {
        assert!(parse_inlines("").is_empty());
    }

    #[test]
    fn image_is_not_swallowed_by_link() {
        assert_eq!(
            parse_inlines("![alt](http://x/a.png)"),
            vec![InlineContent::Image(Image {
                src: "http://x/a.png".to_string(),
                alt: "alt".to_string(),
            })]
        );
    }

    #[test]
    fn failed_image_leaves_bang_and_link() {
        assert_eq!(
            parse_inlines("![alt]()(x)"),
            vec![text("![alt]()(x)")]
        );
        assert_eq!(
            parse_inlines("! [a](u)"),
            vec![
                text("! "),
                InlineContent::Link(Link {
                    text: vec![text("a")],
                    href: "u".to_string(),
                }),
            ]
        );
    }

    #[test]
    fn video_source_is_trimmed() {
        assert_eq!(
            parse_inlines("[[video:   http://x/v.mp4 ]]"),
            vec![InlineContent::Video(Video {
                src: "http://x/v.mp4".to_string(),
            })]
        );
    }

    #[test]
    fn empty_video_is_literal() {
        assert_eq!(parse_inlines("[[video: ]]"), vec![text("[[video: ]]")]);
    }

    #[test]
    fn inline_code_keeps_markup_literal() {
        assert_eq!(
            parse_inlines("run `**x**` now"),
            vec![
                text("run "),
                InlineContent::Code("**x**".to_string()),
                text(" now"),
            ]
        );
    }

    #[test]
    fn empty_backticks_fall_through() {
        assert_eq!(
            parse_inlines("``a`"),
            vec![text("`"), InlineContent::Code("a".to_string())]
        );
    }

    #[test]
    fn bold_italic_and_strike() {
        assert_eq!(
            parse_inlines("**b** _i_ ~~s~~"),
            vec![
                InlineContent::Bold(vec![text("b")]),
                text(" "),
                InlineContent::Italic(vec![text("i")]),
                text(" "),
                InlineContent::Strikethrough(vec![text("s")]),
            ]
        );
    }

    #[test]
    fn italic_nests_inside_bold() {
        assert_eq!(
            parse_inlines("**grace _and_ peace**"),
            vec![InlineContent::Bold(vec![
                text("grace "),
                InlineContent::Italic(vec![text("and")]),
                text(" peace"),
            ])]
        );
    }

    #[test]
    fn nested_asterisks_stay_literal() {
        assert_eq!(parse_inlines("**a*b*c**"), vec![text("**a*b*c**")]);
    }

    #[test]
    fn unclosed_bold_is_literal() {
        assert_eq!(parse_inlines("**unclosed"), vec![text("**unclosed")]);
    }

    #[test]
    fn single_tilde_breaks_strikethrough() {
        assert_eq!(parse_inlines("~~a~b~~"), vec![text("~~a~b~~")]);
    }

    #[test]
    fn link_url_underscores_do_not_become_italics() {
        assert_eq!(
            parse_inlines("[notes](http://x/a_b_c)"),
            vec![InlineContent::Link(Link {
                text: vec![text("notes")],
                href: "http://x/a_b_c".to_string(),
            })]
        );
    }

    #[test]
    fn italic_closing_search_skips_link_urls() {
        assert_eq!(
            parse_inlines("_see [a](http://x/a_b)_"),
            vec![InlineContent::Italic(vec![
                text("see "),
                InlineContent::Link(Link {
                    text: vec![text("a")],
                    href: "http://x/a_b".to_string(),
                }),
            ])]
        );
    }

    #[test]
    fn bold_skips_code_containing_asterisk() {
        assert_eq!(
            parse_inlines("**use `a*b`**"),
            vec![InlineContent::Bold(vec![
                text("use "),
                InlineContent::Code("a*b".to_string()),
            ])]
        );
    }

    #[test]
    fn linked_image() {
        assert_eq!(
            parse_inlines("[![logo](/l.png)](/home)"),
            vec![InlineContent::Link(Link {
                text: vec![InlineContent::Image(Image {
                    src: "/l.png".to_string(),
                    alt: "logo".to_string(),
                })],
                href: "/home".to_string(),
            })]
        );
    }

    #[test]
    fn link_text_stops_at_first_bracket() {
        assert_eq!(
            parse_inlines("[a [b](c) d](e)"),
            vec![
                InlineContent::Link(Link {
                    text: vec![text("a [b")],
                    href: "c".to_string(),
                }),
                text(" d](e)"),
            ]
        );
    }

    #[test]
    fn snake_case_words_get_italics() {
        assert_eq!(
            parse_inlines("__init__"),
            vec![
                text("_"),
                InlineContent::Italic(vec![text("init")]),
                text("_"),
            ]
        );
    }

    #[test]
    fn multibyte_text_survives() {
        assert_eq!(
            parse_inlines("Á **ñ** ü"),
            vec![
                text("Á "),
                InlineContent::Bold(vec![text("ñ")]),
                text(" ü"),
            ]
        );
    }

    #[test]
    fn unclosed_openers_stay_literal() {
        let line = "[!".repeat(3);
        assert_eq!(parse_inlines(&line), vec![text(&line)]);

        let line = format!("**{}", "[![".repeat(3));
        assert_eq!(parse_inlines(&line), vec![text(&line)]);
    }

    #[test]
    fn closing_search_tables_skip_atoms() {
        let scanner = Scanner::new("a `*` *");
        assert_eq!(scanner.stop_star[0], 6);
        assert_eq!(scanner.stop_star[3], 3);

        let scanner = Scanner::new("[x](y]) ]");
        assert_eq!(scanner.link_text_stop[1], 2);
    }

    #[test]
    fn video_needs_a_non_blank_source() {
        let scanner = Scanner::new("[[video: \u{a0} ]] [[video: é]]");
        assert_eq!(scanner.video_span(0), None);
        assert!(scanner.video_span(15).is_some());
    }
}
