use std::fmt;

macro_rules! impl_error {
    ($(
        $string:literal <=> $variant:ident,
    )*) => {
        /// All well-formedness and encoding errors the tokenizer can produce.
        ///
        /// Every variant has a stable `kebab-case` code, see [`ErrorKind::as_str`].
        #[derive(Debug, Eq, PartialEq, Clone, Copy, Hash)]
        pub enum ErrorKind {
            $(
                #[doc = concat!("The `", $string, "` error.")]
                $variant
            ),*
        }

        impl std::str::FromStr for ErrorKind {
            type Err = ();

            /// Parse a `kebab-case` error code into an enum variant.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $string => Ok(Self::$variant), )*
                    _ => Err(())
                }
            }
        }

        impl ErrorKind {
            /// Convert an enum variant back into its `kebab-case` error code.
            #[must_use]
            pub fn as_str(&self) -> &'static str {
                match *self {
                    $( Self::$variant => $string, )*
                }
            }
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.as_str().fmt(f)
    }
}

impl_error! {
    // tags
    "eof-before-tag-name" <=> EofBeforeTagName,
    "eof-in-tag" <=> EofInTag,
    "invalid-first-character-of-tag-name" <=> InvalidFirstCharacterOfTagName,
    "invalid-name-start-character" <=> InvalidNameStartCharacter,
    "invalid-character-in-tag" <=> InvalidCharacterInTag,
    "eof-in-close-tag" <=> EofInCloseTag,
    "invalid-character-in-close-tag" <=> InvalidCharacterInCloseTag,
    "eof-after-solidus-in-tag" <=> EofAfterSolidusInTag,
    "unexpected-solidus-in-tag" <=> UnexpectedSolidusInTag,

    // attributes
    "missing-whitespace-between-attributes" <=> MissingWhitespaceBetweenAttributes,
    "missing-equals-after-attribute-name" <=> MissingEqualsAfterAttributeName,
    "missing-quote-before-attribute-value" <=> MissingQuoteBeforeAttributeValue,
    "eof-in-attribute" <=> EofInAttribute,
    "less-than-in-attribute-value" <=> LessThanInAttributeValue,
    "unknown-entity-in-attribute-value" <=> UnknownEntityInAttributeValue,

    // markup declarations
    "invalid-markup-declaration" <=> InvalidMarkupDeclaration,
    "eof-in-markup-declaration" <=> EofInMarkupDeclaration,
    "eof-in-comment" <=> EofInComment,
    "double-hyphen-in-comment" <=> DoubleHyphenInComment,
    "eof-in-cdata" <=> EofInCdata,
    "eof-in-processing-instruction" <=> EofInProcessingInstruction,
    "missing-whitespace-after-processing-instruction-target" <=> MissingWhitespaceAfterProcessingInstructionTarget,

    // doctype
    "eof-in-doctype" <=> EofInDoctype,
    "missing-whitespace-in-doctype" <=> MissingWhitespaceInDoctype,
    "missing-quote-before-doctype-literal" <=> MissingQuoteBeforeDoctypeLiteral,
    "invalid-character-in-pubid-literal" <=> InvalidCharacterInPubidLiteral,
    "internal-subset-unsupported" <=> InternalSubsetUnsupported,
    "invalid-character-in-doctype" <=> InvalidCharacterInDoctype,

    // references
    "eof-in-character-reference" <=> EofInCharacterReference,
    "uppercase-x-in-character-reference" <=> UppercaseXInCharacterReference,
    "absence-of-digits-in-character-reference" <=> AbsenceOfDigitsInCharacterReference,
    "invalid-character-reference" <=> InvalidCharacterReference,
    "missing-semicolon-after-character-reference" <=> MissingSemicolonAfterCharacterReference,
    "eof-in-entity-reference" <=> EofInEntityReference,
    "missing-semicolon-after-entity-reference" <=> MissingSemicolonAfterEntityReference,

    // nesting, only reported by the pull tokenizer
    "mismatched-close-tag" <=> MismatchedCloseTag,
    "unexpected-close-tag" <=> UnexpectedCloseTag,
    "unclosed-element" <=> UnclosedElement,

    // encoding and xml declaration
    "unsupported-encoding" <=> UnsupportedEncoding,
    "invalid-utf8" <=> InvalidUtf8,
    "eof-in-declaration" <=> EofInDeclaration,
    "missing-version-in-declaration" <=> MissingVersionInDeclaration,
    "declaration-attributes-out-of-order" <=> DeclarationAttributesOutOfOrder,
    "unknown-declaration-attribute" <=> UnknownDeclarationAttribute,
    "invalid-standalone-value" <=> InvalidStandaloneValue,
    "missing-whitespace-in-declaration" <=> MissingWhitespaceInDeclaration,
    "malformed-declaration-attribute" <=> MalformedDeclarationAttribute,
}

/// A fatal tokenizer error.
///
/// There is no error recovery: the tokenization call that produced this error is aborted, and
/// all tokens emitted before it remain with the emitter.
#[derive(Debug, Eq, PartialEq, Clone, Copy, thiserror::Error)]
#[error("{kind} at byte {offset}")]
pub struct Error {
    /// What went wrong.
    pub kind: ErrorKind,
    /// Byte offset into the input buffer of the call that failed.
    pub offset: usize,
}

impl Error {
    pub(crate) fn new(kind: ErrorKind, offset: usize) -> Self {
        Error { kind, offset }
    }
}

/// Errors returned by [`crate::Writer`].
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    /// The underlying text sink failed.
    #[error("failed to write to output")]
    Fmt(#[from] fmt::Error),
    /// A DOCTYPE literal contains both `"` and `'` and can't be quoted.
    #[error("doctype literal contains both quote characters")]
    UnquotableLiteral,
    /// A comment contains `--` or ends with `-`.
    #[error("comment contains \"--\" or ends with \"-\"")]
    InvalidComment,
    /// A CDATA section contains `]]>`.
    #[error("cdata section contains \"]]>\"")]
    InvalidCDataSection,
    /// Processing instruction content contains `?>`.
    #[error("processing instruction contains \"?>\"")]
    InvalidProcessingInstruction,
    /// A DOCTYPE has a public identifier but no system literal.
    #[error("doctype public identifier without system literal")]
    MissingSystemLiteral,
}

#[test]
fn test_error_codes_roundtrip() {
    let kind: ErrorKind = "double-hyphen-in-comment".parse().unwrap();
    assert_eq!(kind, ErrorKind::DoubleHyphenInComment);
    assert_eq!(kind.as_str(), "double-hyphen-in-comment");
    assert_eq!(
        Error::new(kind, 7).to_string(),
        "double-hyphen-in-comment at byte 7"
    );
}
