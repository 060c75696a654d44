//! Condition parsing cache

use crate::condition::ast::AstNode;
use crate::condition::evaluator::{self, ConditionScope};
use crate::condition::parser;
use crate::error::Result;
use ahash::AHashMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;

/// Global condition cache keyed by the raw condition string
static CONDITION_CACHE: Lazy<RwLock<AHashMap<String, AstNode>>> =
    Lazy::new(|| RwLock::new(AHashMap::with_capacity(512)));

/// Get or parse a condition string, using cache for repeated conditions
#[inline]
pub fn get_or_parse(condition: &str) -> Result<AstNode> {
    {
        let cache = CONDITION_CACHE.read();
        if let Some(ast) = cache.get(condition) {
            return Ok(ast.clone());
        }
    }

    let ast = parser::parse(condition)?;
    CONDITION_CACHE
        .write()
        .insert(condition.to_string(), ast.clone());
    Ok(ast)
}

/// Check a condition against a scope. An empty condition always holds.
#[inline]
pub fn check_condition<S: ConditionScope + ?Sized>(condition: &str, scope: &S) -> Result<bool> {
    if condition.trim().is_empty() {
        return Ok(true);
    }

    let ast = get_or_parse(condition)?;
    Ok(evaluator::check(&ast, scope))
}

/// Optional content condition: absent holds, malformed fails closed with a warning
pub fn condition_holds<S: ConditionScope + ?Sized>(condition: Option<&str>, scope: &S) -> bool {
    let Some(condition) = condition else {
        return true;
    };
    match check_condition(condition, scope) {
        Ok(result) => result,
        Err(err) => {
            tracing::warn!(
                target: "alt_life::condition",
                condition,
                error = %err,
                "condition.invalid"
            );
            false
        }
    }
}

/// Clear the condition cache
pub fn clear_cache() {
    CONDITION_CACHE.write().clear();
}

pub fn cache_size() -> usize {
    CONDITION_CACHE.read().len()
}
