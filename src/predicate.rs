//! Pluggable predicate language
//!
//! Literal expression bodies are opaque strings; the engine evaluating them
//! is injected into the PDP rather than resolved from any global registry,
//! so the combining semantics can be tested against a trivial mock language
//! and hosts can bring their own syntax.
//!
//! The built-in [`ContextPredicate`] covers the common case: one comparison
//! (or a bare boolean attribute) over context paths. Logical conjunction and
//! disjunction belong to expression compositions, not to the leaf language.

use std::fmt;

use serde_json::Value;

use crate::context::EvaluationContext;
use crate::evaluation::CauseCode;

/// Evaluates a literal predicate body against the context.
///
/// Implementations must be pure: no I/O, no mutation, same answer for the
/// same `(context, source)` pair.
pub trait PredicateEngine {
    fn evaluate(&self, ctx: &EvaluationContext<'_>, source: &str) -> Result<bool, PredicateError>;
}

impl<F> PredicateEngine for F
where
    F: Fn(&EvaluationContext<'_>, &str) -> Result<bool, PredicateError>,
{
    fn evaluate(&self, ctx: &EvaluationContext<'_>, source: &str) -> Result<bool, PredicateError> {
        self(ctx, source)
    }
}

/// Failure to parse or evaluate a predicate body.
///
/// Carries the cause code the failure collapses to when the evaluator turns
/// it into an indeterminate result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredicateError {
    pub code: CauseCode,
    pub message: String,
}

impl PredicateError {
    /// A parse or evaluation failure of the predicate body itself.
    pub fn syntax(message: impl Into<String>) -> Self {
        Self { code: CauseCode::SyntaxError, message: message.into() }
    }
}

impl fmt::Display for PredicateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for PredicateError {}

/// The built-in predicate language.
///
/// Grammar, one predicate per literal body:
///
/// ```text
/// predicate  := operand op operand | '!'? path | '!'? bool
/// op         := '==' '!=' '<=' '>=' '<' '>' 'in' 'contains' 'startsWith' 'endsWith'
/// operand    := path | literal
/// literal    := 'string' | number | true | false | null | '[' literal, … ']'
/// path       := root ('.' segment)*      root ∈ subject object action environment
/// ```
///
/// Paths resolve against the evaluation context:
///
/// * `subject.user_id`, `subject.roles`, `subject.attributes.<name>` (or the
///   shorthand `subject.<name>`)
/// * `object.name`, `object.sub_resource_names`, `object.data.<field…>`,
///   `object.attributes.<name>` (or `object.<name>`)
/// * `action.request.method`, `action.request.path`,
///   `action.request.path_params.<name>`, `action.request.query.<name>`,
///   `action.request.headers.<name>`, `action.request.cookies.<name>`,
///   `action.request.session.<name>`, `action.request.body.<field…>`,
///   `action.attributes.<name>` (or `action.<name>`)
/// * `environment.global.<name>`, `environment.service.<name>`
///
/// An unresolvable path or a type-mismatched comparison is an error, never a
/// silent `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextPredicate;

impl ContextPredicate {
    pub fn new() -> Self {
        Self
    }
}

impl PredicateEngine for ContextPredicate {
    fn evaluate(&self, ctx: &EvaluationContext<'_>, source: &str) -> Result<bool, PredicateError> {
        let parsed = Parser::new(source).parse()?;
        match parsed {
            Predicate::Comparison { lhs, op, rhs } => {
                let lhs = resolve_operand(ctx, &lhs)?;
                let rhs = resolve_operand(ctx, &rhs)?;
                compare(&lhs, op, &rhs)
            }
            Predicate::Truthy { path, negated } => {
                let value = resolve_path(ctx, &path)?;
                match value {
                    Value::Bool(b) => Ok(b != negated),
                    other => Err(PredicateError::syntax(format!(
                        "path '{}' is not a boolean (found {other})",
                        path.join(".")
                    ))),
                }
            }
            Predicate::Constant(b) => Ok(b),
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Op {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    In,
    Contains,
    StartsWith,
    EndsWith,
}

#[derive(Debug, Clone)]
enum Operand {
    Path(Vec<String>),
    Literal(Value),
}

#[derive(Debug, Clone)]
enum Predicate {
    Comparison { lhs: Operand, op: Op, rhs: Operand },
    Truthy { path: Vec<String>, negated: bool },
    Constant(bool),
}

struct Parser<'s> {
    input: &'s str,
    bytes: &'s [u8],
    pos: usize,
}

impl<'s> Parser<'s> {
    fn new(input: &'s str) -> Self {
        Self { input, bytes: input.as_bytes(), pos: 0 }
    }

    fn parse(mut self) -> Result<Predicate, PredicateError> {
        self.skip_ws();
        let negated = self.eat_byte(b'!');
        self.skip_ws();

        let first = self.parse_operand()?;
        self.skip_ws();

        if negated || self.at_end() {
            if !self.at_end() {
                return Err(self.trailing_input());
            }
            return match first {
                Operand::Path(path) => Ok(Predicate::Truthy { path, negated }),
                Operand::Literal(Value::Bool(b)) => Ok(Predicate::Constant(b != negated)),
                Operand::Literal(_) => {
                    Err(PredicateError::syntax("a bare predicate must be a context path or boolean"))
                }
            };
        }

        let op = self.parse_operator()?;
        self.skip_ws();
        let second = self.parse_operand()?;
        self.skip_ws();
        if !self.at_end() {
            return Err(self.trailing_input());
        }
        Ok(Predicate::Comparison { lhs: first, op, rhs: second })
    }

    fn parse_operator(&mut self) -> Result<Op, PredicateError> {
        for (symbol, op) in [
            ("==", Op::Eq),
            ("!=", Op::Ne),
            ("<=", Op::Le),
            (">=", Op::Ge),
            ("<", Op::Lt),
            (">", Op::Gt),
        ] {
            if self.eat_str(symbol) {
                return Ok(op);
            }
        }
        let word = self.peek_word();
        let op = match word.as_str() {
            "in" => Op::In,
            "contains" => Op::Contains,
            "startsWith" => Op::StartsWith,
            "endsWith" => Op::EndsWith,
            "" => return Err(PredicateError::syntax("expected an operator")),
            other => return Err(PredicateError::syntax(format!("unknown operator '{other}'"))),
        };
        self.pos += word.len();
        Ok(op)
    }

    fn parse_operand(&mut self) -> Result<Operand, PredicateError> {
        self.skip_ws();
        match self.bytes.get(self.pos) {
            None => Err(PredicateError::syntax("unexpected end of predicate")),
            Some(b'\'') => Ok(Operand::Literal(Value::String(self.parse_string()?))),
            Some(b'[') => Ok(Operand::Literal(self.parse_list()?)),
            Some(c) if c.is_ascii_digit() || *c == b'-' => {
                Ok(Operand::Literal(self.parse_number()?))
            }
            Some(_) => {
                let word = self.peek_word();
                match word.as_str() {
                    "true" => {
                        self.pos += 4;
                        Ok(Operand::Literal(Value::Bool(true)))
                    }
                    "false" => {
                        self.pos += 5;
                        Ok(Operand::Literal(Value::Bool(false)))
                    }
                    "null" => {
                        self.pos += 4;
                        Ok(Operand::Literal(Value::Null))
                    }
                    _ => self.parse_path(),
                }
            }
        }
    }

    fn parse_path(&mut self) -> Result<Operand, PredicateError> {
        let mut segments = Vec::new();
        loop {
            let segment = self.peek_word();
            if segment.is_empty() {
                return Err(PredicateError::syntax(format!(
                    "expected a path segment at offset {}",
                    self.pos
                )));
            }
            self.pos += segment.len();
            segments.push(segment);
            if !self.eat_byte(b'.') {
                break;
            }
        }
        Ok(Operand::Path(segments))
    }

    fn parse_string(&mut self) -> Result<String, PredicateError> {
        self.pos += 1; // opening quote
        let start = self.pos;
        while let Some(&c) = self.bytes.get(self.pos) {
            if c == b'\'' {
                let s = self.input[start..self.pos].to_string();
                self.pos += 1;
                return Ok(s);
            }
            self.pos += 1;
        }
        Err(PredicateError::syntax("unterminated string literal"))
    }

    fn parse_number(&mut self) -> Result<Value, PredicateError> {
        let start = self.pos;
        let _ = self.eat_byte(b'-');
        while let Some(&c) = self.bytes.get(self.pos) {
            if c.is_ascii_digit() || c == b'.' {
                self.pos += 1;
            } else {
                break;
            }
        }
        let text = &self.input[start..self.pos];
        serde_json::from_str::<Value>(text)
            .ok()
            .filter(Value::is_number)
            .ok_or_else(|| PredicateError::syntax(format!("invalid number literal '{text}'")))
    }

    fn parse_list(&mut self) -> Result<Value, PredicateError> {
        self.pos += 1; // opening bracket
        let mut items = Vec::new();
        loop {
            self.skip_ws();
            if self.eat_byte(b']') {
                return Ok(Value::Array(items));
            }
            let item = self.parse_operand()?;
            match item {
                Operand::Literal(v) => items.push(v),
                Operand::Path(_) => {
                    return Err(PredicateError::syntax("list literals may only hold literals"))
                }
            }
            self.skip_ws();
            if self.eat_byte(b',') {
                continue;
            }
            if self.eat_byte(b']') {
                return Ok(Value::Array(items));
            }
            return Err(PredicateError::syntax("expected ',' or ']' in list literal"));
        }
    }

    fn peek_word(&self) -> String {
        self.input[self.pos..]
            .chars()
            .take_while(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect()
    }

    fn skip_ws(&mut self) {
        while matches!(self.bytes.get(self.pos), Some(c) if c.is_ascii_whitespace()) {
            self.pos += 1;
        }
    }

    fn eat_byte(&mut self, expected: u8) -> bool {
        if self.bytes.get(self.pos) == Some(&expected) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_str(&mut self, expected: &str) -> bool {
        if self.input[self.pos..].starts_with(expected) {
            self.pos += expected.len();
            true
        } else {
            false
        }
    }

    fn at_end(&self) -> bool {
        self.pos >= self.bytes.len()
    }

    fn trailing_input(&self) -> PredicateError {
        PredicateError::syntax(format!(
            "unexpected trailing input '{}'",
            self.input[self.pos..].trim()
        ))
    }
}

// ---------------------------------------------------------------------------
// Path resolution
// ---------------------------------------------------------------------------

fn resolve_operand(ctx: &EvaluationContext<'_>, operand: &Operand) -> Result<Value, PredicateError> {
    match operand {
        Operand::Literal(v) => Ok(v.clone()),
        Operand::Path(path) => resolve_path(ctx, path),
    }
}

fn resolve_path(ctx: &EvaluationContext<'_>, path: &[String]) -> Result<Value, PredicateError> {
    let unresolved = || {
        PredicateError::syntax(format!("cannot resolve context path '{}'", path.join(".")))
    };
    let parts: Vec<&str> = path.iter().map(String::as_str).collect();

    let resolved = match parts.as_slice() {
        ["subject", "user_id"] => Some(Value::String(ctx.subject.user_id.clone())),
        ["subject", "roles"] => {
            Some(Value::Array(ctx.subject.roles.iter().cloned().map(Value::String).collect()))
        }
        ["subject", "attributes", tail @ ..] => lookup(&ctx.subject.attributes, tail),
        ["subject", name, tail @ ..] => {
            ctx.subject.attributes.get(*name).and_then(|v| walk(v, tail))
        }

        ["object", "name"] => Some(Value::String(ctx.object.name.clone())),
        ["object", "sub_resource_names"] => ctx
            .object
            .sub_resource_names
            .as_ref()
            .map(|names| Value::Array(names.iter().cloned().map(Value::String).collect())),
        ["object", "data", tail @ ..] => {
            ctx.object.data.as_ref().and_then(|data| walk(data, tail))
        }
        ["object", "attributes", tail @ ..] => lookup(&ctx.object.attributes, tail),
        ["object", name, tail @ ..] => {
            ctx.object.attributes.get(*name).and_then(|v| walk(v, tail))
        }

        ["action", "request", request_path @ ..] => {
            ctx.action.request.as_ref().and_then(|r| resolve_request(r, request_path))
        }
        ["action", "attributes", tail @ ..] => lookup(&ctx.action.attributes, tail),
        ["action", name, tail @ ..] => {
            ctx.action.attributes.get(*name).and_then(|v| walk(v, tail))
        }

        ["environment", "global", tail @ ..] => lookup(&ctx.environment.global, tail),
        ["environment", "service", tail @ ..] => lookup(&ctx.environment.service, tail),

        _ => None,
    };
    resolved.ok_or_else(unresolved)
}

fn resolve_request(request: &crate::context::HttpRequest, path: &[&str]) -> Option<Value> {
    match path {
        ["method"] => Some(Value::String(request.method.clone())),
        ["path"] => Some(Value::String(request.path.clone())),
        ["path_params", name] => {
            request.path_params.get(*name).map(|v| Value::String(v.clone()))
        }
        ["query", name] => request
            .query
            .get(*name)
            .map(|v| Value::Array(v.iter().cloned().map(Value::String).collect())),
        ["headers", name] => request
            .headers
            .get(*name)
            .map(|v| Value::Array(v.iter().cloned().map(Value::String).collect())),
        ["cookies", name] => request.cookies.get(*name).map(|v| Value::String(v.clone())),
        ["session", name, tail @ ..] => {
            request.session.get(*name).and_then(|v| walk(v, tail))
        }
        ["body", tail @ ..] => request.body.as_ref().and_then(|b| walk(b, tail)),
        _ => None,
    }
}

fn lookup(map: &std::collections::HashMap<String, Value>, path: &[&str]) -> Option<Value> {
    let (name, tail) = path.split_first()?;
    map.get(*name).and_then(|v| walk(v, tail))
}

fn walk(value: &Value, path: &[&str]) -> Option<Value> {
    let mut current = value;
    for segment in path {
        current = match current {
            Value::Object(map) => map.get(*segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current.clone())
}

// ---------------------------------------------------------------------------
// Comparison
// ---------------------------------------------------------------------------

fn compare(lhs: &Value, op: Op, rhs: &Value) -> Result<bool, PredicateError> {
    match op {
        Op::Eq => Ok(values_equal(lhs, rhs)),
        Op::Ne => Ok(!values_equal(lhs, rhs)),
        Op::Lt | Op::Le | Op::Gt | Op::Ge => order(lhs, op, rhs),
        Op::In => match rhs {
            Value::Array(items) => Ok(items.iter().any(|item| values_equal(lhs, item))),
            other => Err(PredicateError::syntax(format!(
                "'in' requires a list on the right-hand side (found {other})"
            ))),
        },
        Op::Contains => match (lhs, rhs) {
            (Value::Array(items), needle) => {
                Ok(items.iter().any(|item| values_equal(item, needle)))
            }
            (Value::String(haystack), Value::String(needle)) => Ok(haystack.contains(needle)),
            (l, r) => Err(PredicateError::syntax(format!(
                "'contains' requires a list or string haystack (found {l} contains {r})"
            ))),
        },
        Op::StartsWith | Op::EndsWith => match (lhs, rhs) {
            (Value::String(l), Value::String(r)) => Ok(if op == Op::StartsWith {
                l.starts_with(r.as_str())
            } else {
                l.ends_with(r.as_str())
            }),
            (l, r) => Err(PredicateError::syntax(format!(
                "string operator applied to non-strings ({l}, {r})"
            ))),
        },
    }
}

fn values_equal(lhs: &Value, rhs: &Value) -> bool {
    match (lhs.as_f64(), rhs.as_f64()) {
        (Some(l), Some(r)) => l == r,
        _ => lhs == rhs,
    }
}

fn order(lhs: &Value, op: Op, rhs: &Value) -> Result<bool, PredicateError> {
    let ordering = match (lhs, rhs) {
        (Value::String(l), Value::String(r)) => l.cmp(r),
        _ => match (lhs.as_f64(), rhs.as_f64()) {
            (Some(l), Some(r)) => l
                .partial_cmp(&r)
                .ok_or_else(|| PredicateError::syntax("numbers are not comparable"))?,
            _ => {
                return Err(PredicateError::syntax(format!(
                    "ordering comparison requires two numbers or two strings ({lhs}, {rhs})"
                )))
            }
        },
    };
    Ok(match op {
        Op::Lt => ordering.is_lt(),
        Op::Le => ordering.is_le(),
        Op::Gt => ordering.is_gt(),
        Op::Ge => ordering.is_ge(),
        _ => unreachable!("order called with non-ordering operator"),
    })
}
