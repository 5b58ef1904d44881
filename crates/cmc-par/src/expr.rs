//! Expression parsing.
//!
//! Precedence is resolved by the nesting of the grammar levels, lowest
//! binding outermost:
//!
//! | Level | Operators | Associativity |
//! |-------|-----------|---------------|
//! | 1 | `=` | Right |
//! | 2 | `\|\|` | Left |
//! | 3 | `&&` | Left |
//! | 4 | `==`, `!=` | Left |
//! | 5 | `<`, `>`, `<=`, `>=` | Left |
//! | 6 | `+`, `-` | Left |
//! | 7 | `*`, `/`, `%` | Left |
//! | 8 | unary `-`, `!`, `~` | Prefix |
//! | 9 | `[]`, `()`, `++`, `--` | Postfix |
//!
//! A failed sub-expression is reported where it fails and the slot is
//! left absent; no tokens are discarded at this level.

use std::io::Read;

use cmc_lex::TokenKind;

use crate::ast::*;
use crate::Parser;

impl<'a, R: Read> Parser<'a, R> {
    /// Main expression entry point.
    pub(crate) fn parse_expression(&mut self) -> Option<Node> {
        self.parse_assignment()
    }

    /// `assignment = logical_or [ '=' assignment ]` (right-associative).
    fn parse_assignment(&mut self) -> Option<Node> {
        let target = self.parse_logical_or()?;

        if self.check(TokenKind::Assign) {
            self.bump();
            let value = self.parse_assignment().map(Box::new);
            return Some(Node::AssignExpr(AssignExpr {
                target: Box::new(target),
                value,
            }));
        }

        Some(target)
    }

    /// `logical_or = logical_and { '||' logical_and }`
    fn parse_logical_or(&mut self) -> Option<Node> {
        let mut left = self.parse_logical_and()?;

        while self.check(TokenKind::Or) {
            self.bump();
            let right = self.parse_logical_and().map(Box::new);
            left = Node::BinaryExpr(BinaryExpr {
                op: BinOp::LogOr,
                left: Box::new(left),
                right,
            });
        }

        Some(left)
    }

    /// `logical_and = equality { '&&' equality }`
    fn parse_logical_and(&mut self) -> Option<Node> {
        let mut left = self.parse_equality()?;

        while self.check(TokenKind::And) {
            self.bump();
            let right = self.parse_equality().map(Box::new);
            left = Node::BinaryExpr(BinaryExpr {
                op: BinOp::LogAnd,
                left: Box::new(left),
                right,
            });
        }

        Some(left)
    }

    /// `equality = relational { ('=='|'!=') relational }`
    fn parse_equality(&mut self) -> Option<Node> {
        let mut left = self.parse_relational()?;

        loop {
            let op = match self.current().kind {
                TokenKind::Eq => BinOp::Eq,
                TokenKind::Neq => BinOp::Neq,
                _ => break,
            };
            self.bump();
            let right = self.parse_relational().map(Box::new);
            left = Node::BinaryExpr(BinaryExpr {
                op,
                left: Box::new(left),
                right,
            });
        }

        Some(left)
    }

    /// `relational = additive { ('<'|'>'|'<='|'>=') additive }`
    fn parse_relational(&mut self) -> Option<Node> {
        let mut left = self.parse_additive()?;

        loop {
            let op = match self.current().kind {
                TokenKind::Lt => BinOp::Lt,
                TokenKind::Gt => BinOp::Gt,
                TokenKind::Lte => BinOp::Lte,
                TokenKind::Gte => BinOp::Gte,
                _ => break,
            };
            self.bump();
            let right = self.parse_additive().map(Box::new);
            left = Node::BinaryExpr(BinaryExpr {
                op,
                left: Box::new(left),
                right,
            });
        }

        Some(left)
    }

    /// `additive = multiplicative { ('+'|'-') multiplicative }`
    fn parse_additive(&mut self) -> Option<Node> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.bump();
            let right = self.parse_multiplicative().map(Box::new);
            left = Node::BinaryExpr(BinaryExpr {
                op,
                left: Box::new(left),
                right,
            });
        }

        Some(left)
    }

    /// `multiplicative = unary { ('*'|'/'|'%') unary }`
    fn parse_multiplicative(&mut self) -> Option<Node> {
        let mut left = self.parse_unary()?;

        loop {
            let op = match self.current().kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            self.bump();
            let right = self.parse_unary().map(Box::new);
            left = Node::BinaryExpr(BinaryExpr {
                op,
                left: Box::new(left),
                right,
            });
        }

        Some(left)
    }

    /// `unary = ('-'|'!'|'~') unary | postfix`
    fn parse_unary(&mut self) -> Option<Node> {
        let op = match self.current().kind {
            TokenKind::Minus => UnOp::Negate,
            TokenKind::Not => UnOp::LogNot,
            TokenKind::BitNot => UnOp::BitNot,
            _ => return self.parse_postfix(),
        };
        self.bump();

        let operand = self.parse_unary().map(Box::new);
        Some(Node::UnaryExpr(UnaryExpr { op, operand }))
    }

    /// `postfix = primary { subscript | call | '++' | '--' }`
    fn parse_postfix(&mut self) -> Option<Node> {
        let mut expr = self.parse_primary()?;

        loop {
            match self.current().kind {
                TokenKind::LBracket => {
                    self.bump();
                    let index = self.parse_expression().map(Box::new);
                    self.eat(TokenKind::RBracket);
                    expr = Node::SubscriptExpr(SubscriptExpr {
                        target: Box::new(expr),
                        index,
                    });
                }
                TokenKind::LParen => {
                    self.bump();
                    let args = self.parse_arg_list();
                    self.eat(TokenKind::RParen);
                    expr = Node::CallExpr(CallExpr {
                        callee: Box::new(expr),
                        args,
                    });
                }
                TokenKind::Inc => {
                    self.bump();
                    expr = Node::UnaryExpr(UnaryExpr {
                        op: UnOp::PostInc,
                        operand: Some(Box::new(expr)),
                    });
                }
                TokenKind::Dec => {
                    self.bump();
                    expr = Node::UnaryExpr(UnaryExpr {
                        op: UnOp::PostDec,
                        operand: Some(Box::new(expr)),
                    });
                }
                _ => break,
            }
        }

        Some(expr)
    }

    /// Parses the comma-separated call arguments; absent when empty.
    fn parse_arg_list(&mut self) -> Option<Box<Node>> {
        if self.check(TokenKind::RParen) {
            return None;
        }

        let mut args = Vec::new();
        loop {
            match self.parse_expression() {
                Some(arg) => args.push(arg),
                None => break,
            }
            if !self.check(TokenKind::Comma) {
                break;
            }
            self.bump();
        }

        Some(Box::new(Node::ArgList(args)))
    }

    /// `primary = IDENT | INT_LIT | CHAR_LIT | STR_LIT | '(' expression ')'`
    ///
    /// Literal tokens are decoded here; identifier and string text is
    /// copied out of the token before the lexer reclaims it.
    fn parse_primary(&mut self) -> Option<Node> {
        match self.current().kind {
            TokenKind::Identifier => {
                let token = self.bump();
                Some(Node::Identifier(token.lexeme))
            }
            TokenKind::Integer => {
                let token = self.bump();
                Some(Node::Integer(token.lexeme.parse().unwrap_or(0)))
            }
            TokenKind::Character => {
                let token = self.bump();
                let value = token.lexeme.chars().next().map_or(0, |c| c as u8);
                Some(Node::Character(value))
            }
            TokenKind::Str => {
                let token = self.bump();
                Some(Node::Str(token.lexeme))
            }
            TokenKind::LParen => {
                self.bump();
                let expr = self.parse_expression();
                self.eat(TokenKind::RParen);
                expr
            }
            _ => {
                self.error_at_current(format!(
                    "expected expression, got {}",
                    self.current().kind
                ));
                None
            }
        }
    }
}
