//! Statement parsing and block-level synchronization.

use std::io::Read;

use cmc_lex::TokenKind;

use crate::ast::*;
use crate::Parser;

impl<'a, R: Read> Parser<'a, R> {
    /// Parses a single statement, dispatching on the current token.
    pub(crate) fn parse_statement(&mut self) -> Option<Node> {
        match self.current().kind {
            kind if kind.is_type_specifier() => self.parse_var_decl(),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::LBrace => Some(self.parse_compound_stmt()),
            _ => self.parse_expression_stmt(),
        }
    }

    /// Parses `{ { statement } }` with panic-mode recovery per statement.
    pub(crate) fn parse_compound_stmt(&mut self) -> Node {
        self.eat(TokenKind::LBrace);

        let mut stmts = Vec::new();
        while !self.check(TokenKind::RBrace) && !self.at_eof() {
            match self.parse_statement() {
                Some(stmt) => stmts.push(stmt),
                None => self.sync_statement(),
            }
        }

        self.eat(TokenKind::RBrace);
        Node::CompoundStmt(stmts)
    }

    /// Statement-level recovery: discard to the next `;`, `}`, or EOF.
    /// A `;` is consumed so the block continues with the next statement.
    fn sync_statement(&mut self) {
        while !self.at_eof() {
            match self.current().kind {
                TokenKind::Semicolon => {
                    self.bump();
                    return;
                }
                TokenKind::RBrace => return,
                _ => {
                    self.bump();
                }
            }
        }
    }

    /// Parses a local declaration: `type IDENT [array] [init] ';'`.
    fn parse_var_decl(&mut self) -> Option<Node> {
        let data_type = self.parse_type_specifier()?;

        if !self.check(TokenKind::Identifier) {
            self.error_at_current(format!(
                "expected identifier, got {}",
                self.current().kind
            ));
            return None;
        }
        let name = self.bump().lexeme;

        self.parse_variable_tail(name, data_type)
    }

    /// Parses `if '(' expression ')' statement [ 'else' statement ]`.
    fn parse_if_stmt(&mut self) -> Option<Node> {
        self.bump();

        self.eat(TokenKind::LParen);
        let condition = self.parse_expression().map(Box::new);
        self.eat(TokenKind::RParen);

        let then_branch = self.parse_statement().map(Box::new);

        let else_branch = if self.check(TokenKind::Else) {
            self.bump();
            self.parse_statement().map(Box::new)
        } else {
            None
        };

        Some(Node::IfStmt(IfStmt {
            condition,
            then_branch,
            else_branch,
        }))
    }

    /// Parses `while '(' expression ')' statement`.
    fn parse_while_stmt(&mut self) -> Option<Node> {
        self.bump();

        self.eat(TokenKind::LParen);
        let condition = self.parse_expression().map(Box::new);
        self.eat(TokenKind::RParen);

        let body = self.parse_statement().map(Box::new);

        Some(Node::WhileStmt(WhileStmt { condition, body }))
    }

    /// Parses `return [ expression ] ';'`.
    fn parse_return_stmt(&mut self) -> Option<Node> {
        self.bump();

        let value = if self.check(TokenKind::Semicolon) {
            None
        } else {
            self.parse_expression().map(Box::new)
        };

        self.eat(TokenKind::Semicolon);
        Some(Node::ReturnStmt(ReturnStmt { value }))
    }

    /// Parses `[ expression ] ';'`.
    ///
    /// Fails (returning None) when the leading token starts no
    /// expression; the enclosing block synchronizes.
    fn parse_expression_stmt(&mut self) -> Option<Node> {
        if self.check(TokenKind::Semicolon) {
            self.bump();
            return Some(Node::ExprStmt(Vec::new()));
        }

        let expr = self.parse_expression()?;
        self.eat(TokenKind::Semicolon);
        Some(Node::ExprStmt(vec![expr]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::parse;

    /// Parses a function body and returns its statements.
    fn body_of(source: &str) -> (Vec<Node>, usize) {
        let (tree, handler) = parse(source);
        let Node::Program(mut decls) = tree else {
            panic!("expected Program");
        };
        assert_eq!(decls.len(), 1);
        let Node::Function(func) = decls.remove(0) else {
            panic!("expected Function");
        };
        let Some(body) = func.body else {
            panic!("expected a body");
        };
        let Node::CompoundStmt(stmts) = *body else {
            panic!("expected CompoundStmt");
        };
        (stmts, handler.count())
    }

    #[test]
    fn test_empty_block() {
        let (stmts, errors) = body_of("void f() { }");
        assert!(stmts.is_empty());
        assert_eq!(errors, 0);
    }

    #[test]
    fn test_empty_statement() {
        let (stmts, errors) = body_of("void f() { ; }");
        assert_eq!(stmts, vec![Node::ExprStmt(Vec::new())]);
        assert_eq!(errors, 0);
    }

    #[test]
    fn test_expression_statement() {
        let (stmts, errors) = body_of("void f() { g(); }");
        assert_eq!(stmts.len(), 1);
        let Node::ExprStmt(children) = &stmts[0] else {
            panic!("expected ExprStmt");
        };
        assert_eq!(children.len(), 1);
        assert!(matches!(children[0], Node::CallExpr(_)));
        assert_eq!(errors, 0);
    }

    #[test]
    fn test_local_declaration() {
        let (stmts, errors) = body_of("void f() { int x = 3; }");
        assert_eq!(stmts.len(), 1);
        let Node::VariableDecl(var) = &stmts[0] else {
            panic!("expected VariableDecl");
        };
        assert_eq!(var.name, "x");
        assert_eq!(var.init.as_deref(), Some(&Node::Integer(3)));
        assert_eq!(errors, 0);
    }

    #[test]
    fn test_local_array_declaration() {
        let (stmts, _) = body_of("void f() { char line[80]; }");
        let Node::VariableDecl(var) = &stmts[0] else {
            panic!("expected VariableDecl");
        };
        assert!(var.is_array);
        assert_eq!(var.size, 80);
    }

    #[test]
    fn test_if_without_else() {
        let (stmts, errors) = body_of("void f() { if (x) g(); }");
        let Node::IfStmt(if_stmt) = &stmts[0] else {
            panic!("expected IfStmt");
        };
        assert!(if_stmt.condition.is_some());
        assert!(if_stmt.then_branch.is_some());
        assert!(if_stmt.else_branch.is_none());
        assert_eq!(errors, 0);
    }

    #[test]
    fn test_if_with_else() {
        let (stmts, errors) = body_of("void f() { if (x) g(); else h(); }");
        let Node::IfStmt(if_stmt) = &stmts[0] else {
            panic!("expected IfStmt");
        };
        assert!(if_stmt.else_branch.is_some());
        assert_eq!(errors, 0);
    }

    #[test]
    fn test_dangling_else_binds_to_inner_if() {
        let (stmts, errors) = body_of("void f() { if (a) if (b) g(); else h(); }");
        let Node::IfStmt(outer) = &stmts[0] else {
            panic!("expected IfStmt");
        };
        assert!(outer.else_branch.is_none());
        let Some(then) = outer.then_branch.as_deref() else {
            panic!("expected then branch");
        };
        let Node::IfStmt(inner) = then else {
            panic!("expected nested IfStmt");
        };
        assert!(inner.else_branch.is_some());
        assert_eq!(errors, 0);
    }

    #[test]
    fn test_while_statement() {
        let (stmts, errors) = body_of("void f() { while (i < 10) i = i + 1; }");
        let Node::WhileStmt(while_stmt) = &stmts[0] else {
            panic!("expected WhileStmt");
        };
        assert!(while_stmt.condition.is_some());
        assert!(while_stmt.body.is_some());
        assert_eq!(errors, 0);
    }

    #[test]
    fn test_return_with_value() {
        let (stmts, errors) = body_of("int f() { return 42; }");
        assert_eq!(
            stmts,
            vec![Node::ReturnStmt(ReturnStmt {
                value: Some(Box::new(Node::Integer(42))),
            })]
        );
        assert_eq!(errors, 0);
    }

    #[test]
    fn test_return_without_value() {
        let (stmts, errors) = body_of("void f() { return; }");
        assert_eq!(stmts, vec![Node::ReturnStmt(ReturnStmt { value: None })]);
        assert_eq!(errors, 0);
    }

    #[test]
    fn test_nested_blocks() {
        let (stmts, errors) = body_of("void f() { { int x; } { } }");
        assert_eq!(stmts.len(), 2);
        assert!(matches!(stmts[0], Node::CompoundStmt(_)));
        assert!(matches!(stmts[1], Node::CompoundStmt(_)));
        assert_eq!(errors, 0);
    }

    #[test]
    fn test_block_recovers_after_bad_statement() {
        // ')' starts no statement; the block discards through the ';'
        // and keeps parsing.
        let (stmts, errors) = body_of("void f() { ) bad bad; int x; }");
        assert_eq!(stmts.len(), 1);
        assert!(matches!(stmts[0], Node::VariableDecl(_)));
        assert!(errors >= 1);
    }

    #[test]
    fn test_block_recovery_stops_at_rbrace() {
        let (tree, handler) = parse("void f() { ) } int a;");
        let Node::Program(decls) = tree else {
            panic!("expected Program");
        };
        assert_eq!(decls.len(), 2);
        assert!(matches!(decls[1], Node::VariableDecl(_)));
        assert!(handler.count() >= 1);
    }

    #[test]
    fn test_unterminated_block_reaches_eof() {
        let (tree, handler) = parse("int main() { return ; ");
        let Node::Program(decls) = tree else {
            panic!("expected Program");
        };
        assert_eq!(decls.len(), 1);
        let Node::Function(func) = &decls[0] else {
            panic!("expected Function");
        };
        let Some(body) = func.body.as_deref() else {
            panic!("expected body");
        };
        let Node::CompoundStmt(stmts) = body else {
            panic!("expected CompoundStmt");
        };
        assert_eq!(stmts.len(), 1);
        assert!(handler.count() >= 1);
    }
}
