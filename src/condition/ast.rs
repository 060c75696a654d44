//! Condition syntax tree
//!
//! A condition is a tree of `&`/`|` joins over single comparisons such as
//! `HEALTH>50` or `TRT?[genius, athletic]`. `Display` renders a node back to
//! the canonical spelling, which the parser accepts again.

use std::fmt;

/// Node of a parsed condition
#[derive(Debug, Clone, PartialEq)]
pub enum AstNode {
    Single(SingleCondition),
    And(Box<AstNode>, Box<AstNode>),
    Or(Box<AstNode>, Box<AstNode>),
}

impl AstNode {
    /// Every property name referenced by the tree, left to right
    pub fn properties(&self) -> Vec<&str> {
        let mut out = Vec::new();
        self.collect_properties(&mut out);
        out
    }

    fn collect_properties<'a>(&'a self, out: &mut Vec<&'a str>) {
        match self {
            AstNode::Single(cond) => out.push(&cond.property),
            AstNode::And(l, r) | AstNode::Or(l, r) => {
                l.collect_properties(out);
                r.collect_properties(out);
            }
        }
    }
}

/// `PROPERTY <op> value`
#[derive(Debug, Clone, PartialEq)]
pub struct SingleCondition {
    /// Upper-cased property name
    pub property: String,
    pub operator: Operator,
    pub value: ConditionValue,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Greater,
    Less,
    GreaterEqual,
    LessEqual,
    /// `=`; "contains" against a list property
    Equal,
    /// `!=`; "does not contain" against a list property
    NotEqual,
    /// `?`, any listed value matches
    IncludesAny,
    /// `!`, no listed value matches
    ExcludesAll,
}

impl Operator {
    /// Search order for splitting a comparison. Two-character symbols come
    /// first so `>=` is never read as `>`.
    pub const SYMBOLS: [(&'static str, Operator); 8] = [
        (">=", Operator::GreaterEqual),
        ("<=", Operator::LessEqual),
        ("!=", Operator::NotEqual),
        (">", Operator::Greater),
        ("<", Operator::Less),
        ("=", Operator::Equal),
        ("?", Operator::IncludesAny),
        ("!", Operator::ExcludesAll),
    ];

    pub fn symbol(self) -> &'static str {
        match self {
            Operator::GreaterEqual => ">=",
            Operator::LessEqual => "<=",
            Operator::NotEqual => "!=",
            Operator::Greater => ">",
            Operator::Less => "<",
            Operator::Equal => "=",
            Operator::IncludesAny => "?",
            Operator::ExcludesAll => "!",
        }
    }

    /// Membership operator this one is the negation of
    pub fn negated_membership(self) -> Option<Operator> {
        match self {
            Operator::NotEqual => Some(Operator::Equal),
            Operator::ExcludesAll => Some(Operator::IncludesAny),
            _ => None,
        }
    }
}

/// Right-hand side of a comparison
#[derive(Debug, Clone, PartialEq)]
pub enum ConditionValue {
    Number(f64),
    Text(String),
    List(Vec<String>),
}

impl fmt::Display for ConditionValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConditionValue::Number(n) => write!(f, "{n}"),
            ConditionValue::Text(t) => f.write_str(t),
            ConditionValue::List(items) => write!(f, "[{}]", items.join(",")),
        }
    }
}

impl fmt::Display for SingleCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.property, self.operator.symbol(), self.value)
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AstNode::Single(cond) => cond.fmt(f),
            AstNode::And(l, r) => {
                // parenthesize an OR operand so precedence survives
                for (i, side) in [l, r].into_iter().enumerate() {
                    if i == 1 {
                        f.write_str(" & ")?;
                    }
                    if matches!(**side, AstNode::Or(..)) {
                        write!(f, "({side})")?;
                    } else {
                        side.fmt(f)?;
                    }
                }
                Ok(())
            }
            AstNode::Or(l, r) => write!(f, "{l} | {r}"),
        }
    }
}
