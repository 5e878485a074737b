//! ILIKE pattern construction and evaluation

use regex::Regex;

const ESCAPE: char = '\\';

/// Substring pattern in SQL `LIKE` syntax, wrapped in `%...%`
///
/// With escaping on, `%`, `_` and `\` from the query are matched literally.
/// With escaping off they keep their `LIKE` meaning, which lets a query such
/// as `10%` match `10 Hands` as well as `10%`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LikePattern {
    pattern: String,
    escaped: bool,
}

impl LikePattern {
    /// Builds a `%query%` pattern
    pub fn contains(query: &str, escape_wildcards: bool) -> Self {
        let body = if escape_wildcards {
            escape_like(query)
        } else {
            query.to_string()
        };

        Self {
            pattern: format!("%{}%", body),
            escaped: escape_wildcards,
        }
    }

    /// The pattern text to bind against `ILIKE $1 ESCAPE '\'`
    pub fn as_str(&self) -> &str {
        &self.pattern
    }

    pub fn is_escaped(&self) -> bool {
        self.escaped
    }

    /// Compiles the pattern to a case-insensitive anchored regex with the
    /// same semantics PostgreSQL gives `ILIKE ... ESCAPE '\'`
    pub fn to_regex(&self) -> Result<Regex, regex::Error> {
        let mut expr = String::with_capacity(self.pattern.len() * 2 + 8);
        expr.push_str("(?is)^");

        let mut chars = self.pattern.chars();

        while let Some(c) = chars.next() {
            match c {
                ESCAPE => match chars.next() {
                    Some(literal) => push_literal(&mut expr, literal),
                    None => push_literal(&mut expr, ESCAPE),
                },
                '%' => expr.push_str(".*"),
                '_' => expr.push('.'),
                other => push_literal(&mut expr, other),
            }
        }

        expr.push('$');
        Regex::new(&expr)
    }
}

fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());

    for c in query.chars() {
        if matches!(c, '%' | '_' | ESCAPE) {
            escaped.push(ESCAPE);
        }
        escaped.push(c);
    }

    escaped
}

fn push_literal(expr: &mut String, c: char) {
    let mut buf = [0u8; 4];
    expr.push_str(&regex::escape(c.encode_utf8(&mut buf)));
}
