//! Heading and title templates.
//!
//! A template is plain text with `%date%`, `%repo%`, `%link%` and `%version%`
//! placeholders. It is parsed once into tokens and rendered in a single pass,
//! so a value that itself contains a placeholder is never substituted again.
//! Any other `%...%` sequence is kept literally.

/// A template placeholder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Placeholder {
    /// `%date%`: the formatted release date.
    Date,
    /// `%repo%`: the repository name.
    Repo,
    /// `%link%`: the repository URL.
    Link,
    /// `%version%`: the release label.
    Version,
}

impl Placeholder {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "date" => Some(Self::Date),
            "repo" => Some(Self::Repo),
            "link" => Some(Self::Link),
            "version" => Some(Self::Version),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Literal(String),
    Placeholder(Placeholder),
}

/// Values substituted into a template.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateValues<'a> {
    /// Value of `%date%`.
    pub date: &'a str,
    /// Value of `%repo%`.
    pub repo: &'a str,
    /// Value of `%link%`.
    pub link: &'a str,
    /// Value of `%version%`.
    pub version: &'a str,
}

impl TemplateValues<'_> {
    fn get(&self, placeholder: Placeholder) -> &str {
        match placeholder {
            Placeholder::Date => self.date,
            Placeholder::Repo => self.repo,
            Placeholder::Link => self.link,
            Placeholder::Version => self.version,
        }
    }
}

/// A parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    tokens: Vec<Token>,
}

impl Template {
    /// Parses a template string.
    #[must_use]
    pub fn parse(source: &str) -> Self {
        let mut tokens = Vec::new();
        let mut literal = String::new();
        let mut rest = source;

        while let Some(start) = rest.find('%') {
            literal.push_str(&rest[..start]);
            let after = &rest[start + 1..];

            let placeholder = after
                .find('%')
                .and_then(|end| Placeholder::from_name(&after[..end]).map(|p| (p, end)));

            if let Some((placeholder, end)) = placeholder {
                if !literal.is_empty() {
                    tokens.push(Token::Literal(std::mem::take(&mut literal)));
                }
                tokens.push(Token::Placeholder(placeholder));
                rest = &after[end + 1..];
            } else {
                // Not a placeholder: keep the `%` and rescan from the next char.
                literal.push('%');
                rest = after;
            }
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            tokens.push(Token::Literal(literal));
        }

        Self { tokens }
    }

    /// Renders the template with the given values.
    #[must_use]
    pub fn render(&self, values: &TemplateValues<'_>) -> String {
        let mut out = String::new();
        for token in &self.tokens {
            match token {
                Token::Literal(text) => out.push_str(text),
                Token::Placeholder(p) => out.push_str(values.get(*p)),
            }
        }
        out
    }
}

impl Default for Template {
    fn default() -> Self {
        Self::parse("[%date%] [%repo%](%link%) %version%")
    }
}
