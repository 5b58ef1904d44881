//! Human-readable tree dump.
//!
//! Two spaces per indent level. Fixed-arity nodes print their kind and a
//! one-line summary, then labelled sub-sections one level deeper with the
//! child subtree below; sequence nodes print their children directly.
//! `(none)` marks an absent optional child; `NULL` marks a required child
//! lost to error recovery.

use std::fmt;

use crate::ast::*;

/// Displays a [`Node`] as an indented tree.
///
/// ```
/// use cmc_par::{Node, TreeDump};
///
/// let node = Node::Integer(7);
/// assert_eq!(format!("{}", TreeDump(&node)), "Integer: 7\n");
/// ```
pub struct TreeDump<'a>(pub &'a Node);

impl fmt::Display for TreeDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_node(f, self.0, 0)
    }
}

impl Node {
    /// Renders the tree rooted at this node.
    pub fn dump(&self) -> String {
        TreeDump(self).to_string()
    }
}

fn write_indent(f: &mut fmt::Formatter<'_>, level: usize) -> fmt::Result {
    for _ in 0..level {
        f.write_str("  ")?;
    }
    Ok(())
}

/// Writes a labelled child slot. When the child is absent, `missing`
/// (`(none)` or `NULL`) is printed on the label line.
fn write_slot(
    f: &mut fmt::Formatter<'_>,
    level: usize,
    label: &str,
    child: Option<&Node>,
    missing: &str,
) -> fmt::Result {
    write_indent(f, level + 1)?;
    match child {
        Some(node) => {
            writeln!(f, "{}", label)?;
            write_node(f, node, level + 2)
        }
        None => writeln!(f, "{} {}", label, missing),
    }
}

/// Writes a labelled child slot that is simply omitted when absent.
fn write_opt_slot(
    f: &mut fmt::Formatter<'_>,
    level: usize,
    label: &str,
    child: Option<&Node>,
) -> fmt::Result {
    match child {
        Some(node) => write_slot(f, level, label, Some(node), ""),
        None => Ok(()),
    }
}

/// Renders a character value: printable ASCII as `'c'`, others as `'\xHH'`.
fn render_char(b: u8) -> String {
    if (0x20..=0x7E).contains(&b) {
        format!("'{}'", b as char)
    } else {
        format!("'\\x{:02X}'", b)
    }
}

/// Renders a declaration's type, with the array suffix when applicable.
fn render_decl_type(data_type: DataType, is_array: bool, size: i64) -> String {
    if !is_array {
        format!("{}", data_type)
    } else if size > 0 {
        format!("{}[{}]", data_type, size)
    } else {
        format!("{}[]", data_type)
    }
}

fn write_seq(
    f: &mut fmt::Formatter<'_>,
    level: usize,
    kind: &str,
    children: &[Node],
) -> fmt::Result {
    write_indent(f, level)?;
    writeln!(f, "{}", kind)?;
    for child in children {
        write_node(f, child, level + 1)?;
    }
    Ok(())
}

fn write_node(f: &mut fmt::Formatter<'_>, node: &Node, level: usize) -> fmt::Result {
    match node {
        Node::Program(decls) => write_seq(f, level, "Program", decls),
        Node::ParamList(params) => write_seq(f, level, "ParamList", params),
        Node::CompoundStmt(stmts) => write_seq(f, level, "CompoundStmt", stmts),
        Node::ExprStmt(children) => write_seq(f, level, "ExprStmt", children),
        Node::ArgList(args) => write_seq(f, level, "ArgList", args),

        Node::Function(func) => {
            write_indent(f, level)?;
            writeln!(f, "Function: {} (returns {})", func.name, func.return_type)?;
            write_slot(f, level, "Parameters:", func.params.as_deref(), "(none)")?;
            write_slot(f, level, "Body:", func.body.as_deref(), "(none)")
        }
        Node::Parameter(param) => {
            write_indent(f, level)?;
            let name = param.name.as_deref().unwrap_or("<anonymous>");
            let ty = render_decl_type(param.data_type, param.is_array, 0);
            writeln!(f, "Parameter: {} ({})", name, ty)
        }
        Node::VariableDecl(var) => {
            write_indent(f, level)?;
            let ty = render_decl_type(var.data_type, var.is_array, var.size);
            writeln!(f, "VariableDecl: {} ({})", var.name, ty)?;
            write_opt_slot(f, level, "Initializer:", var.init.as_deref())
        }
        Node::AssignExpr(assign) => {
            write_indent(f, level)?;
            writeln!(f, "AssignExpr")?;
            write_slot(f, level, "Target:", Some(&assign.target), "NULL")?;
            write_slot(f, level, "Value:", assign.value.as_deref(), "NULL")
        }
        Node::IfStmt(if_stmt) => {
            write_indent(f, level)?;
            writeln!(f, "IfStmt")?;
            write_slot(f, level, "Condition:", if_stmt.condition.as_deref(), "NULL")?;
            write_slot(f, level, "If Branch:", if_stmt.then_branch.as_deref(), "NULL")?;
            write_opt_slot(f, level, "Else Branch:", if_stmt.else_branch.as_deref())
        }
        Node::WhileStmt(while_stmt) => {
            write_indent(f, level)?;
            writeln!(f, "WhileStmt")?;
            write_slot(f, level, "Condition:", while_stmt.condition.as_deref(), "NULL")?;
            write_slot(f, level, "Body:", while_stmt.body.as_deref(), "NULL")
        }
        Node::ReturnStmt(ret) => {
            write_indent(f, level)?;
            writeln!(f, "ReturnStmt")?;
            write_opt_slot(f, level, "Value:", ret.value.as_deref())
        }
        Node::BinaryExpr(binary) => {
            write_indent(f, level)?;
            writeln!(f, "BinaryExpr: {}", binary.op)?;
            write_slot(f, level, "Left:", Some(&binary.left), "NULL")?;
            write_slot(f, level, "Right:", binary.right.as_deref(), "NULL")
        }
        Node::UnaryExpr(unary) => {
            write_indent(f, level)?;
            writeln!(f, "UnaryExpr: {}", unary.op)?;
            write_slot(f, level, "Operand:", unary.operand.as_deref(), "NULL")
        }
        Node::CallExpr(call) => {
            write_indent(f, level)?;
            writeln!(f, "CallExpr")?;
            write_slot(f, level, "Callee:", Some(&call.callee), "NULL")?;
            write_slot(f, level, "Arguments:", call.args.as_deref(), "(none)")
        }
        Node::SubscriptExpr(sub) => {
            write_indent(f, level)?;
            writeln!(f, "SubscriptExpr")?;
            write_slot(f, level, "Target:", Some(&sub.target), "NULL")?;
            write_slot(f, level, "Index:", sub.index.as_deref(), "NULL")
        }

        Node::Identifier(name) => {
            write_indent(f, level)?;
            writeln!(f, "Identifier: {}", name)
        }
        Node::Integer(value) => {
            write_indent(f, level)?;
            writeln!(f, "Integer: {}", value)
        }
        Node::Character(value) => {
            write_indent(f, level)?;
            writeln!(f, "Character: {}", render_char(*value))
        }
        Node::Str(text) => {
            write_indent(f, level)?;
            writeln!(f, "String: \"{}\"", text)
        }
    }
}
