//! Condition evaluator

use crate::character::Character;
use crate::condition::ast::{AstNode, ConditionValue, Operator, SingleCondition};

/// Property value types for evaluation
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue<'a> {
    Number(f64),
    List(Vec<&'a str>),
}

/// Anything a condition can be evaluated against
pub trait ConditionScope {
    /// Resolve an upper-cased property name, `None` when unknown
    fn property(&self, name: &str) -> Option<PropertyValue<'_>>;
}

fn ids(items: &[String]) -> PropertyValue<'_> {
    PropertyValue::List(items.iter().map(String::as_str).collect())
}

impl ConditionScope for Character {
    fn property(&self, name: &str) -> Option<PropertyValue<'_>> {
        let value = match name {
            "AGE" => PropertyValue::Number(f64::from(self.age)),
            "HEALTH" => PropertyValue::Number(f64::from(self.health)),
            "HAPPINESS" => PropertyValue::Number(f64::from(self.happiness)),
            "INTELLIGENCE" | "SMARTS" => PropertyValue::Number(f64::from(self.intelligence)),
            "LOOKS" => PropertyValue::Number(f64::from(self.looks)),
            "MONEY" => PropertyValue::Number(self.money as f64),
            "GPA" => PropertyValue::Number(self.best_gpa()),
            "TRT" => ids(&self.traits),
            "ACH" => ids(&self.achievements),
            "EVT" => ids(&self.event_history),
            "CLB" => ids(&self.clubs),
            // Degrees match by course id or by tier key
            "DEG" => PropertyValue::List(
                self.degrees
                    .iter()
                    .flat_map(|d| [d.course_id.as_str(), d.tier.key()])
                    .collect(),
            ),
            _ => return None,
        };
        Some(value)
    }
}

/// A character together with the GPA of the program it is enrolled in
#[derive(Debug, Clone, Copy)]
pub struct LifeView<'a> {
    pub character: &'a Character,
    pub gpa: Option<f64>,
}

impl<'a> LifeView<'a> {
    pub fn new(character: &'a Character, gpa: Option<f64>) -> Self {
        Self { character, gpa }
    }
}

impl ConditionScope for LifeView<'_> {
    fn property(&self, name: &str) -> Option<PropertyValue<'_>> {
        match (name, self.gpa) {
            ("GPA", Some(gpa)) => Some(PropertyValue::Number(gpa)),
            _ => self.character.property(name),
        }
    }
}

/// Evaluate an AST against a scope
pub fn check<S: ConditionScope + ?Sized>(ast: &AstNode, scope: &S) -> bool {
    match ast {
        AstNode::Single(cond) => check_single(cond, scope),
        AstNode::And(left, right) => check(left, scope) && check(right, scope),
        AstNode::Or(left, right) => check(left, scope) || check(right, scope),
    }
}

fn item_matches(item: &str, value: &ConditionValue) -> bool {
    match value {
        ConditionValue::Text(text) => item == text,
        ConditionValue::Number(n) => item.parse::<f64>().map_or(false, |v| v == *n),
        ConditionValue::List(arr) => arr.iter().any(|a| a == item),
    }
}

fn check_single<S: ConditionScope + ?Sized>(cond: &SingleCondition, scope: &S) -> bool {
    let Some(prop_value) = scope.property(&cond.property) else {
        tracing::debug!(
            target: "alt_life::condition",
            property = %cond.property,
            "unknown condition property"
        );
        return false;
    };

    // `!=` and `!` are the negations of `=` and `?`
    match cond.operator.negated_membership() {
        Some(positive) => compare(&prop_value, &cond.value, positive).map(|hit| !hit),
        None => compare(&prop_value, &cond.value, cond.operator),
    }
    .unwrap_or(false)
}

/// `None` for combinations that have no meaning, e.g. `TRT>5`
fn compare(prop: &PropertyValue<'_>, value: &ConditionValue, op: Operator) -> Option<bool> {
    let result = match (prop, value, op) {
        (PropertyValue::Number(pv), ConditionValue::Number(cv), op) => match op {
            Operator::Greater => pv > cv,
            Operator::Less => pv < cv,
            Operator::GreaterEqual => pv >= cv,
            Operator::LessEqual => pv <= cv,
            Operator::Equal => (pv - cv).abs() < f64::EPSILON,
            _ => return None,
        },

        // Number is one of the listed values
        (PropertyValue::Number(pv), ConditionValue::List(arr), Operator::IncludesAny) => arr
            .iter()
            .any(|a| a.parse::<f64>().map_or(false, |v| v == *pv)),

        // List contains a single id
        (
            PropertyValue::List(list),
            value @ (ConditionValue::Text(_) | ConditionValue::Number(_)),
            Operator::Equal,
        ) => list.iter().any(|item| item_matches(item, value)),

        (PropertyValue::List(list), value @ ConditionValue::List(_), Operator::IncludesAny) => {
            list.iter().any(|item| item_matches(item, value))
        }

        _ => return None,
    };
    Some(result)
}
