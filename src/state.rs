/// The lexical region the tokenizer is currently in.
///
/// This is the only state that needs to be kept between two calls to [`crate::tokenize`].
/// Together with the unconsumed input it fully describes where tokenization stopped.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Hash)]
pub enum ParseState {
    /// Between tags: character data, references and markup.
    #[default]
    Tags,
    /// Inside of a start tag, after its name. Attributes are read here.
    Attrs,
    /// Inside of `<!DOCTYPE ...>`, after the external id.
    InDoctype,
}
