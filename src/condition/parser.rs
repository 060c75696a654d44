//! Condition string parser

use crate::condition::ast::{AstNode, ConditionValue, Operator, SingleCondition};
use crate::error::{AltLifeError, Result};

/// Parse a condition string into an AST
pub fn parse(condition: &str) -> Result<AstNode> {
    let condition = condition.trim();
    if condition.is_empty() {
        return Err(AltLifeError::InvalidCondition("Empty condition".to_string()));
    }

    let tokens = tokenize(condition)?;
    parse_tokens(&tokens)
}

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Condition(String),
    And,
    Or,
    OpenParen,
    CloseParen,
}

fn flush(current: &mut String, tokens: &mut Vec<Token>) {
    if !current.is_empty() {
        tokens.push(Token::Condition(std::mem::take(current)));
    }
}

fn tokenize(condition: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut paren_depth: i32 = 0;

    for c in condition.chars() {
        match c {
            // Whitespace is insignificant: "AGE >= 18" reads as "AGE>=18"
            c if c.is_whitespace() => {}
            '(' => {
                flush(&mut current, &mut tokens);
                tokens.push(Token::OpenParen);
                paren_depth += 1;
            }
            ')' => {
                flush(&mut current, &mut tokens);
                tokens.push(Token::CloseParen);
                paren_depth -= 1;
                if paren_depth < 0 {
                    return Err(AltLifeError::InvalidCondition(
                        "Unbalanced parentheses".to_string(),
                    ));
                }
            }
            '&' => {
                flush(&mut current, &mut tokens);
                tokens.push(Token::And);
            }
            '|' => {
                flush(&mut current, &mut tokens);
                tokens.push(Token::Or);
            }
            _ => current.push(c),
        }
    }
    flush(&mut current, &mut tokens);

    if paren_depth != 0 {
        return Err(AltLifeError::InvalidCondition(
            "Unbalanced parentheses".to_string(),
        ));
    }

    Ok(tokens)
}

/// True when the first token opens a group closed by the last token
fn wrapped_in_parens(tokens: &[Token]) -> bool {
    if tokens.len() < 2
        || tokens[0] != Token::OpenParen
        || tokens[tokens.len() - 1] != Token::CloseParen
    {
        return false;
    }
    let mut depth = 0;
    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::OpenParen => depth += 1,
            Token::CloseParen => {
                depth -= 1;
                if depth == 0 && i != tokens.len() - 1 {
                    return false;
                }
            }
            _ => {}
        }
    }
    true
}

fn parse_tokens(tokens: &[Token]) -> Result<AstNode> {
    if tokens.is_empty() {
        return Err(AltLifeError::InvalidCondition(
            "Empty token list".to_string(),
        ));
    }

    // Find the lowest precedence operator (OR binds looser than AND)
    let mut paren_depth = 0;
    let mut or_pos = None;
    let mut and_pos = None;

    for (i, token) in tokens.iter().enumerate() {
        match token {
            Token::OpenParen => paren_depth += 1,
            Token::CloseParen => paren_depth -= 1,
            Token::Or if paren_depth == 0 => or_pos = Some(i),
            Token::And if paren_depth == 0 => and_pos = Some(i),
            _ => {}
        }
    }

    if let Some(pos) = or_pos {
        let left = parse_tokens(&tokens[..pos])?;
        let right = parse_tokens(&tokens[pos + 1..])?;
        return Ok(AstNode::Or(Box::new(left), Box::new(right)));
    }

    if let Some(pos) = and_pos {
        let left = parse_tokens(&tokens[..pos])?;
        let right = parse_tokens(&tokens[pos + 1..])?;
        return Ok(AstNode::And(Box::new(left), Box::new(right)));
    }

    if wrapped_in_parens(tokens) {
        return parse_tokens(&tokens[1..tokens.len() - 1]);
    }

    if let [Token::Condition(cond)] = tokens {
        return parse_single_condition(cond);
    }

    Err(AltLifeError::InvalidCondition(format!(
        "Cannot parse tokens: {:?}",
        tokens
    )))
}

fn parse_single_condition(condition: &str) -> Result<AstNode> {
    for (op_str, operator) in Operator::SYMBOLS {
        if let Some(pos) = condition.find(op_str) {
            let property = condition[..pos].trim().to_ascii_uppercase();
            if property.is_empty() {
                return Err(AltLifeError::InvalidCondition(format!(
                    "Missing property in: {}",
                    condition
                )));
            }
            let value = parse_value(&condition[pos + op_str.len()..])?;

            return Ok(AstNode::Single(SingleCondition {
                property,
                operator,
                value,
            }));
        }
    }

    Err(AltLifeError::InvalidCondition(format!(
        "No operator found in: {}",
        condition
    )))
}

fn unquote(s: &str) -> &str {
    s.trim().trim_matches(|c| c == '"' || c == '\'')
}

fn parse_value(value_str: &str) -> Result<ConditionValue> {
    let value_str = value_str.trim();
    if value_str.is_empty() {
        return Err(AltLifeError::InvalidCondition("Missing value".to_string()));
    }

    if let Some(inner) = value_str
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
    {
        let items: Vec<String> = inner
            .split(',')
            .map(unquote)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        return Ok(ConditionValue::List(items));
    }

    if let Ok(n) = value_str.parse::<f64>() {
        return Ok(ConditionValue::Number(n));
    }

    Ok(ConditionValue::Text(unquote(value_str).to_string()))
}
