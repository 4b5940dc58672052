use crate::lexer::Token;

/// The operator that follows a command on the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Delimiter {
    /// End of line, no trailing operator.
    #[default]
    None,
    /// `;`: the next command starts only after this one has terminated.
    Sequential,
    /// `&`: the next command may start while this one is still running.
    Concurrent,
}

impl Delimiter {
    /// Recognizes a token that is exactly a delimiter.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            ";" => Some(Delimiter::Sequential),
            "&" => Some(Delimiter::Concurrent),
            _ => None,
        }
    }
}

/// One segment of a command line together with the delimiter that closed it.
///
/// `argv` may be empty for segments produced by a stray delimiter; such
/// segments are kept in the [`Chain`] but never dispatched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    /// Program name followed by its arguments.
    pub argv: Vec<Token>,
    /// The delimiter that terminated this segment.
    pub delimiter_after: Delimiter,
}

impl ParsedCommand {
    pub fn is_empty(&self) -> bool {
        self.argv.is_empty()
    }
}

/// All commands parsed from one input line, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Chain {
    pub commands: Vec<ParsedCommand>,
}

impl Chain {
    /// True when nothing on the line can be dispatched.
    pub fn is_noop(&self) -> bool {
        self.commands.iter().all(ParsedCommand::is_empty)
    }

    /// True when the line ended with a `&` token, leaving its last command in the background.
    pub fn ends_in_background(&self) -> bool {
        matches!(
            self.commands.last(),
            Some(ParsedCommand {
                delimiter_after: Delimiter::Concurrent,
                ..
            })
        )
    }

    /// Commands that will actually be dispatched.
    pub fn dispatchable(&self) -> impl Iterator<Item = &ParsedCommand> {
        self.commands.iter().filter(|c| !c.is_empty())
    }
}

struct ChainBuilder {
    tokens: Vec<Token>,
    pos: usize,
}

impl ChainBuilder {
    fn from(tokens: Vec<Token>) -> Self {
        ChainBuilder { tokens, pos: 0 }
    }

    fn build_chain(mut self) -> Chain {
        let mut commands = Vec::new();
        while self.peek().is_some() {
            commands.push(self.parse_segment());
        }
        Chain { commands }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn consume(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    /// Parse a segment: word* (';' | '&' | end)
    fn parse_segment(&mut self) -> ParsedCommand {
        let mut argv = Vec::new();

        while let Some(token) = self.consume() {
            if let Some(delimiter_after) = Delimiter::from_token(&token) {
                return ParsedCommand {
                    argv,
                    delimiter_after,
                };
            }
            argv.push(token);
        }

        ParsedCommand {
            argv,
            delimiter_after: Delimiter::None,
        }
    }
}

/// Groups a token sequence into a [`Chain`] in a single left-to-right pass.
///
/// A token equal to `;` or `&` closes the current segment and is recorded as its
/// delimiter; running out of tokens closes it with [`Delimiter::None`]. An empty
/// token sequence yields an empty chain.
pub fn construct_chain(tokens: Vec<Token>) -> Chain {
    let chain = ChainBuilder::from(tokens).build_chain();
    tracing::debug!(?chain, "parsed command line");
    chain
}
