//! Blueprint, contract, and instance-creation parsing.

use super::{ParseResult, Parser};
use crate::ast::stmt::{ClassMember, Stmt};
use crate::token::{Span, TokenType};

impl Parser {
    pub(super) fn parse_blueprint_body(&mut self, span: Span, is_abstract: bool) -> ParseResult<Stmt> {
        self.expect(&TokenType::Called)?;
        let name = self.expect_identifier()?;
        let parent = if self.match_token(&TokenType::Extends) { Some(self.expect_identifier()?) } else { None };
        self.expect(&TokenType::Period)?;

        let mut members = Vec::new();
        while !self.check(&TokenType::End) {
            members.push(self.parse_class_member()?);
        }
        self.expect(&TokenType::End)?;
        self.expect(&TokenType::Period)?;
        Ok(Stmt::ClassDef { name, parent, members, is_abstract, span })
    }

    fn parse_class_member(&mut self) -> ParseResult<ClassMember> {
        self.match_token(&TokenType::It);
        if self.match_token(&TokenType::Has) {
            let name = self.expect_identifier()?;
            self.expect(&TokenType::Period)?;
            return Ok(ClassMember::Property { name });
        }
        self.expect(&TokenType::To)?;
        let name = self.expect_identifier()?;
        let params = if self.match_token(&TokenType::Comma) {
            self.expect(&TokenType::Take)?;
            self.parse_params()?
        } else {
            Vec::new()
        };
        if self.match_token(&TokenType::Comma) {
            self.match_token(&TokenType::Do);
        }
        self.expect(&TokenType::Period)?;
        let body = self.parse_block_until(&[TokenType::End])?;
        self.expect(&TokenType::End)?;
        self.expect(&TokenType::Period)?;
        Ok(ClassMember::Method { name, params, body })
    }

    pub(super) fn parse_contract_body(&mut self, span: Span) -> ParseResult<Stmt> {
        self.expect(&TokenType::Called)?;
        let name = self.expect_identifier()?;
        self.expect(&TokenType::Period)?;
        let mut required_methods = Vec::new();
        while self.match_token(&TokenType::It) {
            self.expect(&TokenType::Requires)?;
            required_methods.push(self.expect_identifier()?);
            self.expect(&TokenType::Period)?;
        }
        self.expect(&TokenType::End)?;
        self.expect(&TokenType::Period)?;
        Ok(Stmt::ContractDef { name, required_methods, span })
    }

    pub(super) fn parse_create_instance(&mut self, span: Span) -> ParseResult<Stmt> {
        let class_name = self.expect_identifier()?;
        self.expect(&TokenType::Called)?;
        let variable = self.expect_identifier()?;
        let args = self.parse_optional_args()?;
        self.expect(&TokenType::Period)?;
        Ok(Stmt::CreateInstance { class_name, args, variable, span })
    }
}
