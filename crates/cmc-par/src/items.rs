//! Top-level declarations: functions, global variables, parameters.

use std::io::Read;

use cmc_lex::TokenKind;

use crate::ast::*;
use crate::Parser;

impl<'a, R: Read> Parser<'a, R> {
    /// Parses `type IDENT` followed by a function or variable tail.
    pub(crate) fn parse_top_decl(&mut self) -> Option<Node> {
        let data_type = self.parse_type_specifier()?;

        if !self.check(TokenKind::Identifier) {
            self.error_at_current(format!(
                "expected identifier, got {}",
                self.current().kind
            ));
            return None;
        }
        let name = self.bump().lexeme;

        if self.check(TokenKind::LParen) {
            self.parse_function_tail(name, data_type)
        } else {
            self.parse_variable_tail(name, data_type)
        }
    }

    /// Parses one of the type keywords `int`, `char`, `void`.
    pub(crate) fn parse_type_specifier(&mut self) -> Option<DataType> {
        let data_type = match self.current().kind {
            TokenKind::Int => DataType::Int,
            TokenKind::Char => DataType::Char,
            TokenKind::Void => DataType::Void,
            _ => {
                self.error_at_current(format!(
                    "expected type specifier, got {}",
                    self.current().kind
                ));
                return None;
            }
        };
        self.bump();
        Some(data_type)
    }

    /// Parses `( [param_list] )` and either a body or `;`.
    fn parse_function_tail(&mut self, name: String, return_type: DataType) -> Option<Node> {
        self.bump();

        let params = self.parse_param_list();
        self.eat(TokenKind::RParen);

        let body = if self.check(TokenKind::LBrace) {
            Some(Box::new(self.parse_compound_stmt()))
        } else {
            self.eat(TokenKind::Semicolon);
            None
        };

        Some(Node::Function(Function {
            name,
            return_type,
            params,
            body,
        }))
    }

    /// Parses the comma-separated parameter list.
    ///
    /// Returns absent for `()`. A list that is exactly the keyword `void`
    /// with no identifier collapses to an empty ParamList.
    fn parse_param_list(&mut self) -> Option<Box<Node>> {
        if self.check(TokenKind::RParen) {
            return None;
        }

        let mut params = Vec::new();
        loop {
            match self.parse_param() {
                Some(param) => params.push(param),
                None => break,
            }
            if !self.check(TokenKind::Comma) {
                break;
            }
            self.bump();
        }

        if params.len() == 1 && is_void_marker(&params[0]) {
            params.clear();
        }

        Some(Box::new(Node::ParamList(params)))
    }

    /// Parses `type [ IDENT [ '[' ']' ] ]`.
    fn parse_param(&mut self) -> Option<Node> {
        let data_type = self.parse_type_specifier()?;

        let name = if self.check(TokenKind::Identifier) {
            Some(self.bump().lexeme)
        } else {
            None
        };

        let mut is_array = false;
        if name.is_some() && self.check(TokenKind::LBracket) {
            self.bump();
            self.eat(TokenKind::RBracket);
            is_array = true;
        }

        Some(Node::Parameter(Parameter {
            name,
            data_type,
            is_array,
        }))
    }

    /// Parses `[ '[' [INT] ']' ] [ '=' expression ] ';'` after the name.
    ///
    /// Shared by top-level and local variable declarations.
    pub(crate) fn parse_variable_tail(&mut self, name: String, data_type: DataType) -> Option<Node> {
        let mut is_array = false;
        let mut size = 0;

        if self.check(TokenKind::LBracket) {
            self.bump();
            is_array = true;
            if self.check(TokenKind::Integer) {
                size = self.bump().lexeme.parse().unwrap_or(0);
            }
            self.eat(TokenKind::RBracket);
        }

        let init = if self.check(TokenKind::Assign) {
            self.bump();
            self.parse_expression().map(Box::new)
        } else {
            None
        };

        self.eat(TokenKind::Semicolon);

        Some(Node::VariableDecl(VariableDecl {
            name,
            data_type,
            is_array,
            size,
            init,
        }))
    }
}

/// True for the `(void)` marker parameter: type void, no name, no brackets.
fn is_void_marker(node: &Node) -> bool {
    matches!(
        node,
        Node::Parameter(Parameter {
            name: None,
            data_type: DataType::Void,
            is_array: false,
        })
    )
}
