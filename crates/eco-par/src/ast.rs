//! The closed AST: two families, statements and expressions, plus the
//! handful of sub-structures (`Variable`, object fields) shared between
//! var-decls, destructuring, and parameters.
//!
//! This replaces a `ParseNode`/`StatementNode`/`ExpressionNode` base-class
//! hierarchy with one sum type per family and a pair of dispatch traits
//! (`Evaluate` in `eco-eval`, `ToSource` in `eco-bundle`) implemented over
//! them downstream — there is no inheritance to walk here, just `match`.

use eco_util::Symbol;

#[derive(Clone, Debug, PartialEq)]
pub enum Stmt {
    Noop,
    VarDecl { is_const: bool, variable: Variable },
    Block(Vec<Stmt>),
    If { cond: Expr, then_branch: Box<Stmt>, else_branch: Option<Box<Stmt>> },
    While { cond: Expr, body: Box<Stmt> },
    Return(Option<Expr>),
    Throw(Expr),
    TryCatch {
        try_block: Box<Stmt>,
        catch_block: Option<Box<Stmt>>,
        catch_name: Option<Symbol>,
        finally_block: Option<Box<Stmt>>,
    },
    Import(ImportStmt),
    Export(ExportStmt),
    /// An expression used as a statement, e.g. `f(x);`.
    Expr(Expr),
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImportStmt {
    pub default_name: Option<Symbol>,
    pub namespace_name: Option<Symbol>,
    pub objects: Option<Vec<ImportBinding>>,
    pub from_file: Symbol,
}

#[derive(Clone, Debug, PartialEq)]
pub struct ImportBinding {
    pub name: Symbol,
    pub alias: Option<Symbol>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum ExportStmt {
    Default(Expr),
    VarDecl { is_const: bool, variable: Variable },
    /// `export { a, b as c } from 'file'` (`all = false`) or
    /// `export * from 'file'` (`all = true`, `named` empty).
    From { file: Symbol, all: bool, named: Vec<ExportBinding> },
}

#[derive(Clone, Debug, PartialEq)]
pub struct ExportBinding {
    pub name: Symbol,
    pub alias: Option<Symbol>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Expr {
    Literal(LiteralValue),
    Load(Symbol),
    Parens(Box<Expr>),
    Spread(Box<Expr>),
    Array(Vec<Expr>),
    Object(Vec<ObjectField>),
    Function(FunctionExpr),
    Unary { op: UnaryOp, expr: Box<Expr> },
    IncOrDec { is_prefix: bool, op: IncDecOp, expr: Box<Expr> },
    Binary { left: Box<Expr>, op: BinaryOp, right: Box<Expr> },
    Assignment { target: Box<Expr>, op: AssignOp, value: Box<Expr> },
    Ternary { cond: Box<Expr>, then_branch: Box<Expr>, else_branch: Box<Expr> },
    ArrayAccess { object: Box<Expr>, index: Box<Expr> },
    FieldAccess { object: Box<Expr>, field: Symbol },
    FuncCall { callee: Box<Expr>, args: Vec<Expr> },
    MethodCall { object: Box<Expr>, field_name: Symbol, args: Vec<Expr> },
    New { class_name: Symbol, args: Vec<Expr> },
    Typeof(Box<Expr>),
    Html(HtmlExpr),
    HtmlBraced(Box<Expr>),
    HtmlText(Symbol),
    TemplateString(Vec<TemplatePart>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum LiteralValue {
    Number(f64),
    String(Symbol),
    Bool(bool),
    Null,
    Undefined,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IncDecOp {
    Inc,
    Dec,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinaryOp {
    OrOr,
    AndAnd,
    EqEqEq,
    EqEq,
    NotEqEq,
    NotEq,
    Lt,
    Gt,
    Lte,
    Gte,
    Add,
    Sub,
    Mul,
    Div,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AssignOp {
    Assign,
    AddAssign,
    SubAssign,
    MulAssign,
    DivAssign,
}

#[derive(Clone, Debug, PartialEq)]
pub struct FunctionExpr {
    pub parameters: Vec<Variable>,
    pub body: FunctionBody,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FunctionBody {
    Block(Vec<Stmt>),
    Expr(Box<Expr>),
}

#[derive(Clone, Debug, PartialEq)]
pub enum ObjectField {
    Regular { key: Symbol, value: Option<Expr> },
    Dynamic { key: Expr, value: Expr },
    Spread { value: Expr },
}

#[derive(Clone, Debug, PartialEq)]
pub struct HtmlExpr {
    pub tag_name: Option<Symbol>,
    pub attributes: Vec<HtmlAttr>,
    pub children: Vec<Expr>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HtmlAttr {
    pub name: Symbol,
    pub value: HtmlAttrValue,
}

#[derive(Clone, Debug, PartialEq)]
pub enum HtmlAttrValue {
    StringLit(Symbol),
    Expr(Box<Expr>),
    /// A bare attribute name with no `=value`, meaning `true`.
    Present,
}

#[derive(Clone, Debug, PartialEq)]
pub enum TemplatePart {
    Content(Symbol),
    Interpolation(Box<Expr>),
}

/// `{variable_type, left, default_value?}` — shared by `let`/`const`
/// declarations, function parameters, and the element list of a
/// destructuring pattern.
#[derive(Clone, Debug, PartialEq)]
pub struct Variable {
    pub left: VariableLeft,
    pub default_value: Option<Box<Expr>>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum VariableLeft {
    Identifier(Symbol),
    /// May hold `None` slots for array-destructure holes (`[a, , b]`);
    /// object destructure never produces a hole.
    DestructureArray(Vec<Option<DestructuredValue>>),
    DestructureObject(Vec<DestructuredValue>),
}

#[derive(Clone, Debug, PartialEq)]
pub struct DestructuredValue {
    pub name: Symbol,
    pub default: Option<Box<Expr>>,
    pub is_rest: bool,
}
