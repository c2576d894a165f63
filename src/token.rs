use std::borrow::Cow;

/// A single lexical XML token.
///
/// Payloads borrow from the input buffer wherever they are a plain view into it, and are owned
/// where text had to be synthesized, e.g. for resolved references or attribute values containing
/// references.
///
/// A start tag is split up into multiple tokens: `<a x="1">` produces
/// [`Token::OpenElement`], one [`Token::Attr`] per attribute, and then either
/// [`Token::OpenTagDone`] or [`Token::EmptyOpenTagDone`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token<'a> {
    /// A run of character data, or the replacement text of a character reference or built-in
    /// entity. Never empty.
    CharData(Cow<'a, str>),

    /// The contents of `<!--...-->`.
    Comment(Cow<'a, str>),

    /// A processing instruction, `<?target content?>`.
    Pi {
        /// The processor this instruction is aimed at.
        target: Cow<'a, str>,
        /// Everything after the whitespace that follows the target. May be empty.
        content: Cow<'a, str>,
    },

    /// The contents of `<![CDATA[...]]>`.
    CDataSection(Cow<'a, str>),

    /// A reference to an entity that is not one of the five built-in ones, `&name;`. Only
    /// produced in content, it is up to the consumer to resolve or reject it.
    EntityReference(Cow<'a, str>),

    /// An attribute of the current start tag, with all references resolved.
    Attr {
        /// The attribute name.
        name: Cow<'a, str>,
        /// The attribute value, without quotes.
        value: Cow<'a, str>,
    },

    /// The `<name` of a start tag.
    OpenElement(Cow<'a, str>),

    /// The `>` of a start tag.
    OpenTagDone,

    /// The `/>` of an empty-element tag. No [`Token::CloseElement`] follows.
    EmptyOpenTagDone,

    /// An end tag, `</name>`.
    CloseElement(Cow<'a, str>),

    /// A document type declaration header, `<!DOCTYPE name PUBLIC "pubid" "system"`.
    Doctype {
        /// The name of the root element.
        name: Cow<'a, str>,
        /// The public identifier, if the external id is `PUBLIC`.
        pubid_literal: Option<Cow<'a, str>>,
        /// The system identifier, if there is an external id.
        system_literal: Option<Cow<'a, str>>,
    },

    /// The `>` closing a document type declaration.
    DoctypeDone,
}

impl<'a> Token<'a> {
    /// Copy all borrowed payloads so the token no longer depends on the input buffer.
    #[must_use]
    pub fn into_owned(self) -> Token<'static> {
        fn own(s: Cow<'_, str>) -> Cow<'static, str> {
            Cow::Owned(s.into_owned())
        }

        match self {
            Token::CharData(text) => Token::CharData(own(text)),
            Token::Comment(content) => Token::Comment(own(content)),
            Token::Pi { target, content } => Token::Pi {
                target: own(target),
                content: own(content),
            },
            Token::CDataSection(content) => Token::CDataSection(own(content)),
            Token::EntityReference(name) => Token::EntityReference(own(name)),
            Token::Attr { name, value } => Token::Attr {
                name: own(name),
                value: own(value),
            },
            Token::OpenElement(name) => Token::OpenElement(own(name)),
            Token::OpenTagDone => Token::OpenTagDone,
            Token::EmptyOpenTagDone => Token::EmptyOpenTagDone,
            Token::CloseElement(name) => Token::CloseElement(own(name)),
            Token::Doctype {
                name,
                pubid_literal,
                system_literal,
            } => Token::Doctype {
                name: own(name),
                pubid_literal: pubid_literal.map(own),
                system_literal: system_literal.map(own),
            },
            Token::DoctypeDone => Token::DoctypeDone,
        }
    }
}

#[test]
fn test_into_owned() {
    let input = String::from("hello");
    let token = Token::CharData(Cow::Borrowed(input.as_str())).into_owned();
    drop(input);
    assert_eq!(token, Token::CharData("hello".into()));
}
