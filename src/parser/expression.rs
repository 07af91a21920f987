//! Expression grammar: logical-or -> logical-and -> comparison -> additive
//! -> multiplicative -> unary -> primary. One grammar, reused identically
//! by conditions, call arguments, and `say` items: the distilled reference
//! this crate grew from gave conditions a richer comparison set (including
//! `!=`) than general expressions ever got, and never wired `divided by`
//! into the general multiplicative production at all. Both operators are
//! first-class here in the single shared production chain.

use super::{ParseResult, Parser};
use crate::ast::expr::{BinaryOp, ComparisonOp, Expr, Literal, LogicalOp, UnaryOp};
use crate::token::TokenType;

impl Parser {
    pub(super) fn parse_expression(&mut self) -> ParseResult<Expr> {
        self.parse_logical_or()
    }

    fn parse_logical_or(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_logical_and()?;
        while self.check(&TokenType::Or) {
            let span = self.current_span();
            self.advance();
            let right = self.parse_logical_and()?;
            left = Expr::LogicalOp { op: LogicalOp::Or, left: Box::new(left), right: Some(Box::new(right)), span };
        }
        Ok(left)
    }

    fn parse_logical_and(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_comparison()?;
        // Inside a `with` argument list `and` is only ever the next-argument
        // separator (Open Question (b)), never the logical connective, so a
        // trailing `and` is left for `parse_optional_args`'s own loop to
        // consume instead of being swallowed here.
        while !self.in_arg_list() && self.check(&TokenType::And) {
            let span = self.current_span();
            self.advance();
            let right = self.parse_comparison()?;
            left = Expr::LogicalOp { op: LogicalOp::And, left: Box::new(left), right: Some(Box::new(right)), span };
        }
        Ok(left)
    }

    fn parse_comparison(&mut self) -> ParseResult<Expr> {
        let left = self.parse_additive()?;
        let span = self.current_span();
        if self.match_token(&TokenType::Is) {
            let negated = self.match_token(&TokenType::Not);
            let op = if self.match_token(&TokenType::Greater) {
                self.expect(&TokenType::Than)?;
                if self.match_token(&TokenType::Or) {
                    self.expect(&TokenType::Equal)?;
                    ComparisonOp::GreaterOrEqual
                } else {
                    ComparisonOp::GreaterThan
                }
            } else if self.match_token(&TokenType::Less) {
                self.expect(&TokenType::Than)?;
                if self.match_token(&TokenType::Or) {
                    self.expect(&TokenType::Equal)?;
                    ComparisonOp::LessOrEqual
                } else {
                    ComparisonOp::LessThan
                }
            } else if self.match_token(&TokenType::Equal) {
                if negated {
                    ComparisonOp::NotEqual
                } else {
                    ComparisonOp::Equal
                }
            } else {
                return Err(crate::error::KaynatError::parser(
                    "expected a comparison after 'is'",
                    self.current_span(),
                ));
            };
            let op = if negated && op != ComparisonOp::NotEqual { negate_comparison(op) } else { op };
            let right = self.parse_additive()?;
            return Ok(Expr::Comparison { op, left: Box::new(left), right: Box::new(right), span });
        }
        Ok(left)
    }

    fn parse_additive(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_multiplicative()?;
        loop {
            let span = self.current_span();
            if self.match_token(&TokenType::Plus) {
                let right = self.parse_multiplicative()?;
                left = Expr::BinaryOp { op: BinaryOp::Add, left: Box::new(left), right: Box::new(right), span };
            } else if self.match_token(&TokenType::Minus) {
                let right = self.parse_multiplicative()?;
                left =
                    Expr::BinaryOp { op: BinaryOp::Subtract, left: Box::new(left), right: Box::new(right), span };
            } else {
                break;
            }
        }
        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> ParseResult<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let span = self.current_span();
            if self.match_token(&TokenType::Multiplied) {
                self.expect(&TokenType::By)?;
                let right = self.parse_unary()?;
                left =
                    Expr::BinaryOp { op: BinaryOp::Multiply, left: Box::new(left), right: Box::new(right), span };
            } else if self.match_token(&TokenType::Divided) {
                self.expect(&TokenType::By)?;
                let right = self.parse_unary()?;
                left = Expr::BinaryOp { op: BinaryOp::Divide, left: Box::new(left), right: Box::new(right), span };
            } else {
                break;
            }
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> ParseResult<Expr> {
        let span = self.current_span();
        if self.match_token(&TokenType::Negative) {
            let operand = self.parse_unary()?;
            return Ok(Expr::UnaryOp { op: UnaryOp::Negate, operand: Box::new(operand), span });
        }
        if self.match_token(&TokenType::Not) {
            let operand = self.parse_unary()?;
            return Ok(Expr::UnaryOp { op: UnaryOp::Not, operand: Box::new(operand), span });
        }
        self.parse_primary()
    }

    pub(super) fn parse_primary(&mut self) -> ParseResult<Expr> {
        let span = self.current_span();
        match self.peek().kind.clone() {
            TokenType::Number(n) => {
                self.advance();
                Ok(Expr::Literal(Literal::Number(n), span))
            }
            TokenType::Boolean(b) => {
                self.advance();
                Ok(Expr::Literal(Literal::Boolean(b), span))
            }
            TokenType::Nothing => {
                self.advance();
                Ok(Expr::Literal(Literal::Nothing, span))
            }
            TokenType::My | TokenType::This => {
                let receiver = if matches!(self.peek().kind, TokenType::My) { "my" } else { "this" }.to_string();
                self.advance();
                let property = self.expect_identifier()?;
                Ok(Expr::PropertyAccess { receiver, property, span })
            }
            TokenType::A => {
                self.advance();
                self.expect(&TokenType::List)?;
                self.expect(&TokenType::Containing)?;
                let mut elements = vec![self.parse_expression()?];
                while self.match_token(&TokenType::Comma) {
                    elements.push(self.parse_expression()?);
                }
                Ok(Expr::ListLiteral(elements, span))
            }
            TokenType::Identifier(name) => {
                self.advance();
                if self.check(&TokenType::With) {
                    let args = self.parse_optional_args()?;
                    return Ok(Expr::Call { name, args, span });
                }
                Ok(Expr::Identifier(name, span))
            }
            other => Err(crate::error::KaynatError::parser(format!("expected an expression, found {other}"), span)),
        }
    }
}

fn negate_comparison(op: ComparisonOp) -> ComparisonOp {
    match op {
        ComparisonOp::GreaterThan => ComparisonOp::LessOrEqual,
        ComparisonOp::LessThan => ComparisonOp::GreaterOrEqual,
        ComparisonOp::GreaterOrEqual => ComparisonOp::LessThan,
        ComparisonOp::LessOrEqual => ComparisonOp::GreaterThan,
        ComparisonOp::Equal => ComparisonOp::NotEqual,
        ComparisonOp::NotEqual => ComparisonOp::Equal,
    }
}
