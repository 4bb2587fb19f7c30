use crate::frontend::lexer::Spanned;
use crate::frontend::token::Token;

pub struct TokenDumper {
    pub color: bool,
    pub show_debug_repr: bool, // if false, prints the source form of each token
}

impl Default for TokenDumper {
    fn default() -> Self {
        Self {
            color: true,
            show_debug_repr: true,
        }
    }
}

impl TokenDumper {
    // ANSI colors
    const RESET: &'static str = "\x1b[0m";
    const DIM: &'static str = "\x1b[2m";
    const RED: &'static str = "\x1b[31m";
    const YEL: &'static str = "\x1b[33m";
    const CYN: &'static str = "\x1b[36m";
    const MAG: &'static str = "\x1b[35m";

    pub fn new() -> Self {
        Self::default()
    }

    pub fn no_color(mut self) -> Self {
        self.color = false;
        self
    }

    pub fn pretty(mut self) -> Self {
        self.show_debug_repr = false;
        self
    }

    pub fn dump(&self, tokens: &[Spanned]) {
        print!("{}", self.render(tokens));
    }

    /// One line per token: position, kind, token.
    pub fn render(&self, tokens: &[Spanned]) -> String {
        tokens.iter().map(|s| self.render_one(s)).collect()
    }

    fn render_one(&self, s: &Spanned) -> String {
        let kind = self.kind(&s.token);
        let colr = if self.color { self.color(&s.token) } else { "" };
        let reset = if self.color { Self::RESET } else { "" };

        let shown = match &s.token {
            Token::Error(e) => format!("{}", e.kind),
            token if self.show_debug_repr => format!("{:?}", token),
            token => format!("{}", token),
        };

        format!(
            "[{:02}:{:02}] {}{:<8} {}{}\n",
            s.span.line, s.span.col, colr, kind, shown, reset
        )
    }

    fn kind(&self, t: &Token) -> &'static str {
        match t {
            Token::Eof => "EOF",
            Token::Error(_) => "ERROR",
            Token::Literal(_) => "LITERAL",
            Token::Id(_) => "ID",
            Token::KwType(_) => "KWTYPE",
            Token::KwConst | Token::KwRet => "KEYWORD",
            Token::Punct(_) => "PUNCT",
        }
    }

    fn color(&self, t: &Token) -> &'static str {
        match t {
            Token::Eof => Self::DIM,
            Token::Error(_) => Self::RED,
            Token::Literal(_) => Self::CYN,
            Token::Id(_) => Self::YEL,
            Token::Punct(_) => Self::MAG,
            _ => Self::RESET,
        }
    }
}
