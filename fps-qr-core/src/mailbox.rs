//! RFC 5322 mailbox parsing
//!
//! Accepts a single `addr-spec` (`local@domain`) or `name-addr`
//! (`Display Name <local@domain>`), with surrounding whitespace and
//! parenthesised comments. Local parts may be dot-atoms or quoted strings;
//! domains may be dot-atoms or bracketed IP literals.
//!
//! Groups (`name: mailbox;`) are rejected. RFC 2047 encoded words in a
//! display name are kept as plain atoms.

use crate::error::{Error, Result};
use std::net::IpAddr;

/// A parsed mailbox
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mailbox {
    /// Display name, or the text of a trailing comment
    pub display_name: Option<String>,
    /// `local@domain`, with any quoting removed from the local part
    pub address: String,
}

/// Parse exactly one mailbox; trailing text other than comments is an error
pub fn parse_mailbox(input: &str) -> Result<Mailbox> {
    let mut cursor = Cursor { rest: input };
    let mailbox = cursor.mailbox()?;

    if !cursor.skip_cfws() {
        return Err(invalid("unbalanced comment"));
    }
    if !cursor.rest.is_empty() {
        return Err(invalid(format!("unexpected trailing text {:?}", cursor.rest)));
    }

    Ok(mailbox)
}

fn invalid(reason: impl Into<String>) -> Error {
    Error::InvalidAddress(reason.into())
}

struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    fn peek(&self) -> Option<char> {
        self.rest.chars().next()
    }

    fn consume(&mut self, expected: char) -> bool {
        match self.rest.strip_prefix(expected) {
            Some(rest) => {
                self.rest = rest;
                true
            }
            None => false,
        }
    }

    fn skip_space(&mut self) {
        self.rest = self.rest.trim_start_matches(is_wsp);
    }

    /// Whitespace and comments; false on an unclosed comment
    fn skip_cfws(&mut self) -> bool {
        self.skip_space();
        while self.consume('(') {
            if self.comment().is_none() {
                return false;
            }
            self.skip_space();
        }
        true
    }

    /// `name-addr / addr-spec`
    fn mailbox(&mut self) -> Result<Mailbox> {
        self.skip_space();
        if self.rest.is_empty() {
            return Err(invalid("empty address"));
        }

        // addr-spec is the narrower grammar, so it goes first
        let start = self.rest;
        match self.addr_spec() {
            Ok(address) => {
                self.skip_space();
                let mut display_name = None;
                if self.consume('(') {
                    let comment = self.comment().ok_or_else(|| invalid("unbalanced comment"))?;
                    let words: Vec<&str> = comment.split(is_wsp).filter(|w| !w.is_empty()).collect();
                    if !words.is_empty() {
                        display_name = Some(words.join(" "));
                    }
                }
                return Ok(Mailbox {
                    display_name,
                    address,
                });
            }
            Err(_) => self.rest = start,
        }

        let display_name = if self.peek() == Some('<') {
            None
        } else {
            Some(self.phrase()?)
        };

        self.skip_space();
        if !self.consume('<') {
            return Err(invalid("missing '@' or angle-addr"));
        }
        let address = self.addr_spec()?;
        if !self.consume('>') {
            return Err(invalid("unclosed angle-addr"));
        }

        Ok(Mailbox {
            display_name,
            address,
        })
    }

    /// `local-part "@" domain`
    fn addr_spec(&mut self) -> Result<String> {
        self.skip_space();
        let local = match self.peek() {
            None => return Err(invalid("missing local part")),
            Some('"') => {
                let quoted = self.quoted_string()?;
                if quoted.is_empty() {
                    return Err(invalid("empty quoted local part"));
                }
                quoted
            }
            Some(_) => self.atom(true, false)?.to_string(),
        };

        if !self.consume('@') {
            return Err(invalid("missing '@'"));
        }

        self.skip_space();
        let domain = match self.peek() {
            None => return Err(invalid("missing domain")),
            Some('[') => self.domain_literal()?,
            Some(_) => self.atom(true, false)?.to_string(),
        };

        Ok(format!("{}@{}", local, domain))
    }

    /// `1*word`; stops at the first token that is not a word
    fn phrase(&mut self) -> Result<String> {
        let mut words: Vec<String> = Vec::new();

        loop {
            if !words.is_empty() && !self.skip_cfws() {
                return Err(invalid("unbalanced comment"));
            }
            self.skip_space();

            let word = match self.peek() {
                None => break,
                Some('"') => self.quoted_string(),
                Some(_) => self.atom(true, true).map(str::to_string),
            };
            match word {
                Ok(word) => words.push(word),
                Err(_) => break,
            }
        }

        if words.is_empty() {
            return Err(invalid("missing display name"));
        }
        Ok(words.join(" "))
    }

    /// Run of atext; `dot` admits `.`, `permissive` skips the dot-atom
    /// placement rules
    fn atom(&mut self, dot: bool, permissive: bool) -> Result<&'a str> {
        let rest = self.rest;
        let end = rest
            .find(|c: char| !is_atext(c, dot))
            .unwrap_or(rest.len());
        if end == 0 {
            return Err(invalid("expected atom"));
        }

        let (atom, tail) = rest.split_at(end);
        if !permissive && (atom.starts_with('.') || atom.ends_with('.') || atom.contains("..")) {
            return Err(invalid(format!("misplaced dot in {:?}", atom)));
        }

        self.rest = tail;
        Ok(atom)
    }

    /// `DQUOTE *(qtext / quoted-pair / WSP) DQUOTE`, returned unquoted
    fn quoted_string(&mut self) -> Result<String> {
        let rest = self.rest;
        let mut chars = rest.char_indices().skip(1);
        let mut text = String::new();

        while let Some((i, c)) = chars.next() {
            match c {
                '"' => {
                    self.rest = &rest[i + 1..];
                    return Ok(text);
                }
                '\\' => match chars.next() {
                    Some((_, escaped)) if is_vchar(escaped) || is_wsp(escaped) => text.push(escaped),
                    Some((_, escaped)) => {
                        return Err(invalid(format!("bad escaped character {:?}", escaped)))
                    }
                    None => break,
                },
                c if is_qtext(c) || is_wsp(c) => text.push(c),
                c => return Err(invalid(format!("bad character {:?} in quoted string", c))),
            }
        }

        Err(invalid("unclosed quoted string"))
    }

    /// `"[" *dtext "]"` holding an IPv4 or IPv6 address
    fn domain_literal(&mut self) -> Result<String> {
        let rest = self.rest;
        let body = rest.strip_prefix('[').ok_or_else(|| invalid("missing '['"))?;
        let end = body.find(']').ok_or_else(|| invalid("unclosed domain literal"))?;
        let dtext = &body[..end];

        if let Some(c) = dtext.chars().find(|&c| !is_dtext(c)) {
            return Err(invalid(format!("bad character {:?} in domain literal", c)));
        }
        if dtext.parse::<IpAddr>().is_err() {
            return Err(invalid(format!("{:?} is not an IP address", dtext)));
        }

        self.rest = &body[end + 1..];
        Ok(format!("[{}]", dtext))
    }

    /// Comment body after the opening `(`; nested parentheses balance,
    /// `\` escapes the next character. None if the comment never closes.
    fn comment(&mut self) -> Option<String> {
        let rest = self.rest;
        let mut chars = rest.char_indices();
        let mut depth = 1usize;
        let mut text = String::new();

        while let Some((i, c)) = chars.next() {
            match c {
                '\\' => match chars.next() {
                    Some((_, escaped)) => text.push(escaped),
                    None => text.push(c),
                },
                '(' => {
                    depth += 1;
                    text.push(c);
                }
                ')' => {
                    depth -= 1;
                    if depth == 0 {
                        self.rest = &rest[i + 1..];
                        return Some(text);
                    }
                    text.push(c);
                }
                c => text.push(c),
            }
        }

        None
    }
}

fn is_wsp(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// Printable ASCII, or any non-ASCII character
fn is_vchar(c: char) -> bool {
    ('!'..='~').contains(&c) || !c.is_ascii()
}

fn is_atext(c: char, dot: bool) -> bool {
    match c {
        '.' => dot,
        '(' | ')' | '<' | '>' | '[' | ']' | ':' | ';' | '@' | '\\' | ',' | '"' => false,
        c => is_vchar(c),
    }
}

fn is_qtext(c: char) -> bool {
    c != '\\' && c != '"' && is_vchar(c)
}

fn is_dtext(c: char) -> bool {
    !matches!(c, '[' | ']' | '\\') && is_vchar(c)
}
