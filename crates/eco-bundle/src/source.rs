//! `to_source`: re-emitting an AST node as the source text the bundled
//! script carries. Mirrors `eco_eval::Evaluate` in shape (a dispatch
//! trait implemented downstream over `eco_par::ast`, one match arm per
//! variant) but walks toward text instead of toward a `Value`.
//!
//! `Stmt::Import`/`Stmt::Export` are the only variants that do anything
//! beyond string assembly — they drive the bundler's module graph walk
//! and aggregate the current module's exports, so they live in
//! `bundler.rs` instead of here.

use eco_par::ast::{
    AssignOp, BinaryOp, DestructuredValue, Expr, FunctionBody, FunctionExpr, HtmlAttrValue,
    HtmlExpr, IncDecOp, LiteralValue, ObjectField, Stmt, TemplatePart, UnaryOp, Variable,
    VariableLeft,
};

use crate::bundler::Bundler;
use crate::error::BundleError;

pub trait ToSource {
    fn to_source(&self, bundler: &mut Bundler) -> Result<String, BundleError>;
}

impl ToSource for Stmt {
    fn to_source(&self, bundler: &mut Bundler) -> Result<String, BundleError> {
        Ok(match self {
            Stmt::Noop => ";".to_string(),
            Stmt::VarDecl { is_const, variable } => {
                format!("{} {};", if *is_const { "const" } else { "let" }, variable.to_source(bundler)?)
            }
            Stmt::Block(stmts) => block_to_source(stmts, bundler)?,
            Stmt::If { cond, then_branch, else_branch } => {
                let mut out =
                    format!("if ({}) {}", cond.to_source(bundler)?, then_branch.to_source(bundler)?);
                if let Some(else_branch) = else_branch {
                    out.push_str(&format!(" else {}", else_branch.to_source(bundler)?));
                }
                out
            }
            Stmt::While { cond, body } => {
                format!("while ({}) {}", cond.to_source(bundler)?, body.to_source(bundler)?)
            }
            Stmt::Return(expr) => match expr {
                Some(expr) => format!("return {};", expr.to_source(bundler)?),
                None => "return;".to_string(),
            },
            Stmt::Throw(expr) => format!("throw {};", expr.to_source(bundler)?),
            Stmt::TryCatch { try_block, catch_block, catch_name, finally_block } => {
                let mut out = format!("try {}", try_block.to_source(bundler)?);
                if let Some(catch_block) = catch_block {
                    match catch_name {
                        Some(name) => out.push_str(&format!(" catch ({name})")),
                        None => out.push_str(" catch"),
                    }
                    out.push_str(&format!(" {}", catch_block.to_source(bundler)?));
                }
                if let Some(finally_block) = finally_block {
                    out.push_str(&format!(" finally {}", finally_block.to_source(bundler)?));
                }
                out
            }
            // Handled by the bundler: triggers recursion and records
            // exports rather than being pure string assembly.
            Stmt::Import(_) | Stmt::Export(_) => {
                unreachable!("Import/Export are emitted by Bundler::emit_module_body")
            }
            Stmt::Expr(expr) => format!("{};", expr.to_source(bundler)?),
        })
    }
}

fn block_to_source(stmts: &[Stmt], bundler: &mut Bundler) -> Result<String, BundleError> {
    let mut out = "{\n".to_string();
    for stmt in stmts {
        out.push_str(&stmt.to_source(bundler)?);
        out.push('\n');
    }
    out.push('}');
    Ok(out)
}

impl ToSource for Expr {
    fn to_source(&self, bundler: &mut Bundler) -> Result<String, BundleError> {
        Ok(match self {
            Expr::Literal(lit) => lit.to_source(),
            Expr::Load(name) => name.to_string(),
            Expr::Parens(inner) => format!("({})", inner.to_source(bundler)?),
            Expr::Spread(inner) => format!("...{}", inner.to_source(bundler)?),
            Expr::Array(items) => {
                let items = items
                    .iter()
                    .map(|e| e.to_source(bundler))
                    .collect::<Result<Vec<_>, _>>()?
                    .join(", ");
                format!("[{items}]")
            }
            Expr::Object(fields) => {
                let fields = fields
                    .iter()
                    .map(|f| f.to_source(bundler))
                    .collect::<Result<Vec<_>, _>>()?
                    .join(", ");
                format!("{{ {fields} }}")
            }
            Expr::Function(func) => func.to_source(bundler)?,
            Expr::Unary { op, expr } => {
                let op = match op {
                    UnaryOp::Neg => "-",
                    UnaryOp::Not => "!",
                };
                format!("{op}{}", expr.to_source(bundler)?)
            }
            Expr::IncOrDec { is_prefix, op, expr } => {
                let op = match op {
                    IncDecOp::Inc => "++",
                    IncDecOp::Dec => "--",
                };
                let target = expr.to_source(bundler)?;
                if *is_prefix {
                    format!("{op}{target}")
                } else {
                    format!("{target}{op}")
                }
            }
            Expr::Binary { left, op, right } => {
                format!("{} {} {}", left.to_source(bundler)?, binary_op_lexeme(*op), right.to_source(bundler)?)
            }
            Expr::Assignment { target, op, value } => {
                format!("{} {} {}", target.to_source(bundler)?, assign_op_lexeme(*op), value.to_source(bundler)?)
            }
            Expr::Ternary { cond, then_branch, else_branch } => {
                format!(
                    "{} ? {} : {}",
                    cond.to_source(bundler)?,
                    then_branch.to_source(bundler)?,
                    else_branch.to_source(bundler)?
                )
            }
            Expr::ArrayAccess { object, index } => {
                format!("{}[{}]", object.to_source(bundler)?, index.to_source(bundler)?)
            }
            Expr::FieldAccess { object, field } => format!("{}.{field}", object.to_source(bundler)?),
            Expr::FuncCall { callee, args } => {
                format!("{}({})", callee.to_source(bundler)?, args_to_source(args, bundler)?)
            }
            Expr::MethodCall { object, field_name, args } => {
                format!(
                    "{}.{field_name}({})",
                    object.to_source(bundler)?,
                    args_to_source(args, bundler)?
                )
            }
            Expr::New { class_name, args } => format!("new {class_name}({})", args_to_source(args, bundler)?),
            Expr::Typeof(expr) => format!("typeof {}", expr.to_source(bundler)?),
            Expr::Html(html) => html.to_source(bundler)?,
            Expr::HtmlBraced(expr) => format!("{{{}}}", expr.to_source(bundler)?),
            Expr::HtmlText(text) => text.to_string(),
            Expr::TemplateString(parts) => {
                let mut out = "`".to_string();
                for part in parts {
                    match part {
                        TemplatePart::Content(text) => out.push_str(text.as_str()),
                        TemplatePart::Interpolation(expr) => {
                            out.push_str(&format!("${{{}}}", expr.to_source(bundler)?))
                        }
                    }
                }
                out.push('`');
                out
            }
        })
    }
}

fn args_to_source(args: &[Expr], bundler: &mut Bundler) -> Result<String, BundleError> {
    Ok(args.iter().map(|a| a.to_source(bundler)).collect::<Result<Vec<_>, _>>()?.join(", "))
}

fn binary_op_lexeme(op: BinaryOp) -> &'static str {
    match op {
        BinaryOp::OrOr => "||",
        BinaryOp::AndAnd => "&&",
        BinaryOp::EqEqEq => "===",
        BinaryOp::EqEq => "==",
        BinaryOp::NotEqEq => "!==",
        BinaryOp::NotEq => "!=",
        BinaryOp::Lt => "<",
        BinaryOp::Gt => ">",
        BinaryOp::Lte => "<=",
        BinaryOp::Gte => ">=",
        BinaryOp::Add => "+",
        BinaryOp::Sub => "-",
        BinaryOp::Mul => "*",
        BinaryOp::Div => "/",
    }
}

fn assign_op_lexeme(op: AssignOp) -> &'static str {
    match op {
        AssignOp::Assign => "=",
        AssignOp::AddAssign => "+=",
        AssignOp::SubAssign => "-=",
        AssignOp::MulAssign => "*=",
        AssignOp::DivAssign => "/=",
    }
}

impl LiteralValue {
    fn to_source(&self) -> String {
        match self {
            LiteralValue::Number(n) => format_number(*n),
            LiteralValue::String(s) => escape_string_literal(s.as_str()),
            LiteralValue::Bool(b) => b.to_string(),
            LiteralValue::Null => "null".to_string(),
            LiteralValue::Undefined => "undefined".to_string(),
        }
    }
}

fn format_number(n: f64) -> String {
    if n == n.trunc() && n.is_finite() {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

fn escape_string_literal(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('\'');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            _ => out.push(ch),
        }
    }
    out.push('\'');
    out
}

impl ToSource for Variable {
    fn to_source(&self, bundler: &mut Bundler) -> Result<String, BundleError> {
        let left = self.left.to_source(bundler)?;
        match &self.default_value {
            Some(expr) => Ok(format!("{left} = {}", expr.to_source(bundler)?)),
            None => Ok(left),
        }
    }
}

impl ToSource for VariableLeft {
    fn to_source(&self, bundler: &mut Bundler) -> Result<String, BundleError> {
        Ok(match self {
            VariableLeft::Identifier(name) => name.to_string(),
            VariableLeft::DestructureArray(elements) => {
                let parts = elements
                    .iter()
                    .map(|el| match el {
                        Some(el) => el.to_source(bundler),
                        None => Ok(String::new()),
                    })
                    .collect::<Result<Vec<_>, _>>()?
                    .join(", ");
                format!("[{parts}]")
            }
            VariableLeft::DestructureObject(elements) => {
                let parts = elements
                    .iter()
                    .map(|el| el.to_source(bundler))
                    .collect::<Result<Vec<_>, _>>()?
                    .join(", ");
                format!("{{ {parts} }}")
            }
        })
    }
}

impl ToSource for DestructuredValue {
    fn to_source(&self, bundler: &mut Bundler) -> Result<String, BundleError> {
        let mut out = if self.is_rest { format!("...{}", self.name) } else { self.name.to_string() };
        if let Some(default) = &self.default {
            out.push_str(&format!(" = {}", default.to_source(bundler)?));
        }
        Ok(out)
    }
}

impl ToSource for ObjectField {
    fn to_source(&self, bundler: &mut Bundler) -> Result<String, BundleError> {
        Ok(match self {
            ObjectField::Regular { key, value: Some(value) } => {
                format!("{key}: {}", value.to_source(bundler)?)
            }
            ObjectField::Regular { key, value: None } => key.to_string(),
            ObjectField::Dynamic { key, value } => {
                format!("[{}]: {}", key.to_source(bundler)?, value.to_source(bundler)?)
            }
            ObjectField::Spread { value } => format!("...{}", value.to_source(bundler)?),
        })
    }
}

impl ToSource for FunctionExpr {
    fn to_source(&self, bundler: &mut Bundler) -> Result<String, BundleError> {
        let params = self
            .parameters
            .iter()
            .map(|p| p.to_source(bundler))
            .collect::<Result<Vec<_>, _>>()?
            .join(", ");
        let body = match &self.body {
            FunctionBody::Block(stmts) => block_to_source(stmts, bundler)?,
            FunctionBody::Expr(expr) => expr.to_source(bundler)?,
        };
        Ok(format!("({params}) => {body}"))
    }
}

impl ToSource for HtmlExpr {
    fn to_source(&self, bundler: &mut Bundler) -> Result<String, BundleError> {
        let open_tag = self.tag_name.map(|s| s.to_string()).unwrap_or_default();
        let mut attrs = String::new();
        for attr in &self.attributes {
            attrs.push(' ');
            attrs.push_str(attr.name.as_str());
            match &attr.value {
                HtmlAttrValue::StringLit(s) => {
                    attrs.push_str(&format!("=\"{}\"", s.as_str()))
                }
                HtmlAttrValue::Expr(expr) => {
                    attrs.push_str(&format!("={{{}}}", expr.to_source(bundler)?))
                }
                HtmlAttrValue::Present => {}
            }
        }
        if self.children.is_empty() && self.tag_name.is_some() {
            return Ok(format!("<{open_tag}{attrs}/>"));
        }
        let children = self
            .children
            .iter()
            .map(|c| c.to_source(bundler))
            .collect::<Result<Vec<_>, _>>()?
            .join("");
        Ok(format!("<{open_tag}{attrs}>{children}</{open_tag}>"))
    }
}
