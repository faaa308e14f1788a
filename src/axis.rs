use crate::error::SweepError;
use pest::error::InputLocation;
use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;

#[derive(Parser)]
#[grammar = "axis.pest"]
struct ListParser;

/// The candidate values for one positional argument of the target
/// program. Always holds at least one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Axis {
    values: Vec<String>,
}

impl Axis {
    pub fn singleton(value: &str) -> Self {
        Self {
            values: vec![value.to_string()],
        }
    }

    pub fn from_values(values: Vec<String>) -> Option<Self> {
        if values.is_empty() {
            return None;
        }
        Some(Self { values })
    }

    pub fn values(&self) -> &[String] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Comma-joined values, with path separators dropped so the label can
    /// be embedded in a file name.
    pub fn label(&self) -> String {
        self.values.join(",").replace('/', "")
    }
}

/// Builds the axes list from the tokens that follow the target program.
/// Tokens starting with `[` are list literals, anything else is taken
/// verbatim as a single value. The first malformed token aborts parsing.
pub fn parse_axes<S: AsRef<str>>(
    tokens: &[S],
) -> Result<Vec<Axis>, SweepError> {
    tokens.iter().map(|t| parse_axis(t.as_ref())).collect()
}

pub fn parse_axis(token: &str) -> Result<Axis, SweepError> {
    if !token.starts_with('[') {
        return Ok(Axis::singleton(token));
    }
    let values = parse_list(token)?;
    Axis::from_values(values).ok_or_else(|| SweepError::EmptyAxis {
        token: token.to_string(),
    })
}

fn parse_list(token: &str) -> Result<Vec<String>, SweepError> {
    let mut pairs = ListParser::parse(Rule::list, token).map_err(|e| {
        let position = match e.location {
            InputLocation::Pos(pos) => pos,
            InputLocation::Span((start, _)) => start,
        };
        SweepError::Parse {
            token: token.to_string(),
            message: format!(
                "{} at position {}",
                e.variant.message(),
                position
            ),
        }
    })?;

    let list = match pairs.next() {
        Some(list) => list,
        None => return Ok(vec![]),
    };
    Ok(list
        .into_inner()
        .filter(|p| p.as_rule() != Rule::EOI)
        .map(build_value)
        .collect())
}

fn build_value(pair: Pair<Rule>) -> String {
    match pair.as_rule() {
        Rule::quoted => pair
            .into_inner()
            .next()
            .map(|inner| unescape(inner.as_str()))
            .unwrap_or_default(),
        // bare items swallow the whitespace before the next separator
        _ => pair.as_str().trim().to_string(),
    }
}

fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some('r') => out.push('\r'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out
}
