use std::fmt::Write;
use std::ops::ControlFlow;

use crate::utils::trace_log;
use crate::{Declaration, Emitter, Token, WriteError};

/// Serializes tokens back into XML text.
///
/// There is one method per [`Token`] variant, and [`Writer::write_token`] dispatching to them.
/// Text is escaped according to where it ends up, so the output tokenizes back into the tokens it
/// was written from.
///
/// `Writer` is also an [`Emitter`], so it can be handed to [`crate::tokenize`] directly:
///
/// ```
/// use xmlgum::{tokenize, Cursor, ParseState, Writer};
///
/// let input = r#"<a href="x&amp;y">1 &lt; 2</a>"#;
/// let mut writer = Writer::new(String::new());
/// tokenize(&mut writer, &mut ParseState::default(), &mut Cursor::new(input)).unwrap();
/// assert_eq!(writer.finish().unwrap(), input);
/// ```
#[derive(Debug)]
pub struct Writer<W> {
    output: W,
    error: Option<WriteError>,
}

impl<W: Write> Writer<W> {
    /// Create a writer appending to `output`.
    pub fn new(output: W) -> Self {
        Writer {
            output,
            error: None,
        }
    }

    /// The text sink written to so far.
    pub fn get_ref(&self) -> &W {
        &self.output
    }

    /// Take the text sink back.
    pub fn into_inner(self) -> W {
        self.output
    }

    /// Take the text sink back, or the error that made this writer stop when it was used as an
    /// [`Emitter`].
    ///
    /// # Errors
    ///
    /// The first error encountered while emitting.
    pub fn finish(self) -> Result<W, WriteError> {
        match self.error {
            Some(e) => Err(e),
            None => Ok(self.output),
        }
    }

    /// Write any token.
    ///
    /// # Errors
    ///
    /// See the individual `write_*` methods.
    pub fn write_token(&mut self, token: &Token<'_>) -> Result<(), WriteError> {
        match *token {
            Token::CharData(ref text) => self.write_char_data(text),
            Token::Comment(ref content) => self.write_comment(content),
            Token::Pi {
                ref target,
                ref content,
            } => self.write_pi(target, content),
            Token::CDataSection(ref content) => self.write_cdata(content),
            Token::EntityReference(ref name) => self.write_entity_reference(name),
            Token::Attr {
                ref name,
                ref value,
            } => self.write_attr(name, value),
            Token::OpenElement(ref name) => self.write_open_element(name),
            Token::OpenTagDone => self.write_open_tag_done(),
            Token::EmptyOpenTagDone => self.write_empty_open_tag_done(),
            Token::CloseElement(ref name) => self.write_close_element(name),
            Token::Doctype {
                ref name,
                ref pubid_literal,
                ref system_literal,
            } => self.write_doctype(name, pubid_literal.as_deref(), system_literal.as_deref()),
            Token::DoctypeDone => self.write_doctype_done(),
        }
    }

    /// Write `text` with `&` and `<` escaped. `>` is escaped where it could end up as part of
    /// `]]>`: after `]]`, or at the start of `text` if only `]` precede it.
    ///
    /// # Errors
    ///
    /// Only if the sink fails.
    pub fn write_char_data(&mut self, text: &str) -> Result<(), WriteError> {
        escape(&mut self.output, text, false)
    }

    /// Write ` name="value"`, with `&`, `<`, `>` and `"` in the value escaped.
    ///
    /// # Errors
    ///
    /// Only if the sink fails.
    pub fn write_attr(&mut self, name: &str, value: &str) -> Result<(), WriteError> {
        self.output.write_char(' ')?;
        self.output.write_str(name)?;
        self.output.write_str("=\"")?;
        escape(&mut self.output, value, true)?;
        self.output.write_char('"')?;
        Ok(())
    }

    /// Write `<name`.
    ///
    /// # Errors
    ///
    /// Only if the sink fails.
    pub fn write_open_element(&mut self, name: &str) -> Result<(), WriteError> {
        self.output.write_char('<')?;
        self.output.write_str(name)?;
        Ok(())
    }

    /// Write `>`.
    ///
    /// # Errors
    ///
    /// Only if the sink fails.
    pub fn write_open_tag_done(&mut self) -> Result<(), WriteError> {
        self.output.write_char('>')?;
        Ok(())
    }

    /// Write `/>`.
    ///
    /// # Errors
    ///
    /// Only if the sink fails.
    pub fn write_empty_open_tag_done(&mut self) -> Result<(), WriteError> {
        self.output.write_str("/>")?;
        Ok(())
    }

    /// Write `</name>`.
    ///
    /// # Errors
    ///
    /// Only if the sink fails.
    pub fn write_close_element(&mut self, name: &str) -> Result<(), WriteError> {
        self.output.write_str("</")?;
        self.output.write_str(name)?;
        self.output.write_char('>')?;
        Ok(())
    }

    /// Write `<!--content-->`.
    ///
    /// # Errors
    ///
    /// [`WriteError::InvalidComment`] if `content` contains `--` or ends with `-`.
    pub fn write_comment(&mut self, content: &str) -> Result<(), WriteError> {
        if content.contains("--") || content.ends_with('-') {
            return Err(WriteError::InvalidComment);
        }
        self.output.write_str("<!--")?;
        self.output.write_str(content)?;
        self.output.write_str("-->")?;
        Ok(())
    }

    /// Write `<![CDATA[content]]>`.
    ///
    /// # Errors
    ///
    /// [`WriteError::InvalidCDataSection`] if `content` contains `]]>`.
    pub fn write_cdata(&mut self, content: &str) -> Result<(), WriteError> {
        if content.contains("]]>") {
            return Err(WriteError::InvalidCDataSection);
        }
        self.output.write_str("<![CDATA[")?;
        self.output.write_str(content)?;
        self.output.write_str("]]>")?;
        Ok(())
    }

    /// Write `<?target content?>`, or `<?target?>` if `content` is empty.
    ///
    /// # Errors
    ///
    /// [`WriteError::InvalidProcessingInstruction`] if `content` contains `?>`.
    pub fn write_pi(&mut self, target: &str, content: &str) -> Result<(), WriteError> {
        if content.contains("?>") {
            return Err(WriteError::InvalidProcessingInstruction);
        }
        self.output.write_str("<?")?;
        self.output.write_str(target)?;
        if !content.is_empty() {
            self.output.write_char(' ')?;
            self.output.write_str(content)?;
        }
        self.output.write_str("?>")?;
        Ok(())
    }

    /// Write `&name;`.
    ///
    /// # Errors
    ///
    /// Only if the sink fails.
    pub fn write_entity_reference(&mut self, name: &str) -> Result<(), WriteError> {
        self.output.write_char('&')?;
        self.output.write_str(name)?;
        self.output.write_char(';')?;
        Ok(())
    }

    /// Write the header of a document type declaration, `<!DOCTYPE name` followed by the
    /// external id if there is one. [`Writer::write_doctype_done`] closes it.
    ///
    /// Literals are quoted with `"`, or with `'` if they contain `"`.
    ///
    /// # Errors
    ///
    /// [`WriteError::MissingSystemLiteral`] if there is a public id but no system literal,
    /// [`WriteError::UnquotableLiteral`] if a literal contains both quote characters.
    pub fn write_doctype(
        &mut self,
        name: &str,
        pubid_literal: Option<&str>,
        system_literal: Option<&str>,
    ) -> Result<(), WriteError> {
        let (pubid_quote, system_quote) = match (pubid_literal, system_literal) {
            (Some(_), None) => return Err(WriteError::MissingSystemLiteral),
            (pubid, system) => (
                pubid.map(literal_quote).transpose()?,
                system.map(literal_quote).transpose()?,
            ),
        };

        self.output.write_str("<!DOCTYPE ")?;
        self.output.write_str(name)?;

        if let (Some(pubid), Some(quote)) = (pubid_literal, pubid_quote) {
            self.output.write_str(" PUBLIC ")?;
            write_quoted(&mut self.output, pubid, quote)?;
        } else if system_literal.is_some() {
            self.output.write_str(" SYSTEM")?;
        }

        if let (Some(system), Some(quote)) = (system_literal, system_quote) {
            self.output.write_char(' ')?;
            write_quoted(&mut self.output, system, quote)?;
        }

        Ok(())
    }

    /// Write the `>` closing a document type declaration.
    ///
    /// # Errors
    ///
    /// Only if the sink fails.
    pub fn write_doctype_done(&mut self) -> Result<(), WriteError> {
        self.output.write_char('>')?;
        Ok(())
    }

    /// Write an XML declaration. `encoding` is left out if absent, `standalone` unless it is
    /// `false`.
    ///
    /// ```
    /// use xmlgum::{Declaration, Writer};
    ///
    /// let mut writer = Writer::new(String::new());
    /// writer.write_declaration(&Declaration::default()).unwrap();
    /// assert_eq!(writer.into_inner(), r#"<?xml version="1.0"?>"#);
    /// ```
    ///
    /// # Errors
    ///
    /// [`WriteError::UnquotableLiteral`] if a value contains both quote characters.
    pub fn write_declaration(&mut self, declaration: &Declaration<'_>) -> Result<(), WriteError> {
        let version_quote = literal_quote(&declaration.version)?;
        let encoding_quote = declaration
            .encoding
            .as_deref()
            .map(literal_quote)
            .transpose()?;

        self.output.write_str("<?xml version=")?;
        write_quoted(&mut self.output, &declaration.version, version_quote)?;

        if let (Some(encoding), Some(quote)) = (declaration.encoding.as_deref(), encoding_quote) {
            self.output.write_str(" encoding=")?;
            write_quoted(&mut self.output, encoding, quote)?;
        }

        if !declaration.standalone {
            self.output.write_str(" standalone=\"no\"")?;
        }

        self.output.write_str("?>")?;
        Ok(())
    }
}

impl<'a, W: Write> Emitter<'a> for Writer<W> {
    fn emit(&mut self, token: Token<'a>) -> ControlFlow<()> {
        if self.error.is_some() {
            return ControlFlow::Break(());
        }

        match self.write_token(&token) {
            Ok(()) => ControlFlow::Continue(()),
            Err(e) => {
                trace_log!("writer: {} while writing {:?}", e, token);
                self.error = Some(e);
                ControlFlow::Break(())
            }
        }
    }
}

/// Pick the quote character for a literal that can't contain escapes.
fn literal_quote(literal: &str) -> Result<char, WriteError> {
    if !literal.contains('"') {
        Ok('"')
    } else if !literal.contains('\'') {
        Ok('\'')
    } else {
        Err(WriteError::UnquotableLiteral)
    }
}

fn write_quoted<W: Write>(output: &mut W, literal: &str, quote: char) -> Result<(), WriteError> {
    output.write_char(quote)?;
    output.write_str(literal)?;
    output.write_char(quote)?;
    Ok(())
}

fn escape<W: Write>(output: &mut W, text: &str, in_attribute: bool) -> Result<(), WriteError> {
    let mut written = 0;

    for (i, c) in text.char_indices() {
        let replacement = match c {
            '&' => "&amp;",
            '<' => "&lt;",
            '>' if in_attribute || completes_cdata_end(&text[..i]) => "&gt;",
            '"' if in_attribute => "&quot;",
            _ => continue,
        };
        output.write_str(&text[written..i])?;
        output.write_str(replacement)?;
        written = i + c.len_utf8();
    }

    output.write_str(&text[written..])?;
    Ok(())
}

/// Whether `>` after `before` might complete a `]]>`, which character data must not contain.
/// The brackets can also be at the end of the previous token.
fn completes_cdata_end(before: &str) -> bool {
    before.ends_with("]]") || before.bytes().all(|b| b == b']')
}
