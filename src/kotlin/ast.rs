//! AST node definitions for the accepted Kotlin subset
//!
//! The tree is deliberately small: it covers the declaration and expression
//! forms that annotated documentation sources actually use. Every node is an
//! immutable value; transformations build new nodes instead of mutating in
//! place.
//!
//! Annotations appear in two positions and both are modeled explicitly:
//! declarations carry them in a modifier list ([`Function::annotations`],
//! [`Property::annotations`]), while expressions carry them through the
//! [`Annotated`] wrapper node.

// ============================================================================
// File structure
// ============================================================================

/// A parsed source file: optional package header, imports, then statements
#[derive(Debug, Clone, PartialEq)]
pub struct KtFile {
    pub package: Option<PackageHeader>,
    pub imports: Vec<Import>,
    pub statements: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PackageHeader {
    pub path: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Import {
    pub path: Vec<String>,
    pub wildcard: bool,
}

impl Import {
    /// True if any segment of the import path equals the given name
    pub fn references(&self, segment: &str) -> bool {
        self.path.iter().any(|s| s == segment)
    }
}

// ============================================================================
// Statements and declarations
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    Declaration(Declaration),
    Expression(Expr),
    For(ForLoop),
    While(WhileLoop),
    Return(Option<Expr>),
    Comment(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    Function(Function),
    Property(Property),
}

impl Declaration {
    pub fn annotations(&self) -> &[AnnotationEntry] {
        match self {
            Declaration::Function(f) => &f.annotations,
            Declaration::Property(p) => &p.annotations,
        }
    }

    /// Copy of this declaration with its annotation list replaced
    pub fn with_annotations(&self, annotations: Vec<AnnotationEntry>) -> Declaration {
        match self {
            Declaration::Function(f) => Declaration::Function(Function {
                annotations,
                ..f.clone()
            }),
            Declaration::Property(p) => Declaration::Property(Property {
                annotations,
                ..p.clone()
            }),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            Declaration::Function(_) => "function declaration",
            Declaration::Property(_) => "property declaration",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub annotations: Vec<AnnotationEntry>,
    pub modifiers: Vec<String>,
    pub name: String,
    pub params: Vec<Param>,
    pub return_type: Option<TypeRef>,
    pub body: FunctionBody,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FunctionBody {
    Block(Vec<Statement>),
    Expression(Box<Expr>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub ty: TypeRef,
    pub default: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Property {
    pub annotations: Vec<AnnotationEntry>,
    pub modifiers: Vec<String>,
    pub mutable: bool,
    pub name: String,
    pub ty: Option<TypeRef>,
    pub initializer: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypeRef {
    pub names: Vec<String>,
    pub args: Vec<TypeRef>,
    pub nullable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForLoop {
    pub binding: String,
    pub iterable: Expr,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WhileLoop {
    pub condition: Expr,
    pub body: Vec<Statement>,
}

// ============================================================================
// Annotations
// ============================================================================

/// One annotation occurrence, e.g. `@Media.Image` or `@Suppress("unused")`
#[derive(Debug, Clone, PartialEq)]
pub struct AnnotationEntry {
    pub names: Vec<String>,
    pub args: Vec<Argument>,
}

impl AnnotationEntry {
    pub fn dotted_name(&self) -> String {
        self.names.join(".")
    }
}

// ============================================================================
// Expressions
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Annotated(Annotated),
    StringTemplate(StringTemplate),
    Call(Call),
    Name(String),
    Literal(Literal),
    Unary(Unary),
    Binary(Binary),
    Member(Member),
    Index(IndexAccess),
    Paren(Box<Expr>),
    If(IfExpr),
    Lambda(Lambda),
}

impl Expr {
    /// Wrap an expression in an annotation list, collapsing the wrapper
    /// entirely when the list is empty
    pub fn annotated(annotations: Vec<AnnotationEntry>, expr: Expr) -> Expr {
        if annotations.is_empty() {
            expr
        } else {
            Expr::Annotated(Annotated {
                annotations,
                expr: Box::new(expr),
            })
        }
    }

    /// Short description of the expression form, for error messages
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Annotated(_) => "annotated expression",
            Expr::StringTemplate(_) => "string template",
            Expr::Call(_) => "call expression",
            Expr::Name(_) => "name",
            Expr::Literal(_) => "literal",
            Expr::Unary(_) => "unary expression",
            Expr::Binary(_) => "binary expression",
            Expr::Member(_) => "member access",
            Expr::Index(_) => "index access",
            Expr::Paren(_) => "parenthesized expression",
            Expr::If(_) => "if expression",
            Expr::Lambda(_) => "lambda",
        }
    }
}

/// An expression prefixed by one or more annotations
#[derive(Debug, Clone, PartialEq)]
pub struct Annotated {
    pub annotations: Vec<AnnotationEntry>,
    pub expr: Box<Expr>,
}

/// A string literal with its interpolation structure preserved
///
/// Segments carry verbatim source text: escape sequences in regular strings
/// stay unprocessed and interpolation segments include their `$`/`${}` syntax.
/// Printing a template is the concatenation of its segments inside quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct StringTemplate {
    pub raw: bool,
    pub segments: Vec<TemplateSegment>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TemplateSegment {
    Literal(String),
    Interpolation(String),
}

impl StringTemplate {
    pub fn from_literal(raw: bool, text: &str) -> StringTemplate {
        let segments = if text.is_empty() {
            Vec::new()
        } else {
            vec![TemplateSegment::Literal(text.to_string())]
        };
        StringTemplate { raw, segments }
    }

    /// Concatenation of all segments, interpolation syntax included verbatim
    pub fn rendered(&self) -> String {
        self.segments
            .iter()
            .map(|segment| match segment {
                TemplateSegment::Literal(text) => text.as_str(),
                TemplateSegment::Interpolation(text) => text.as_str(),
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub callee: Box<Expr>,
    pub args: Vec<Argument>,
    pub lambda: Option<Lambda>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    pub name: Option<String>,
    pub value: Expr,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    pub params: Vec<String>,
    pub body: Vec<Statement>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Number(String),
    Boolean(bool),
    Char(String),
    Null,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Unary {
    pub op: UnaryOp,
    pub expr: Box<Expr>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UnaryOp {
    Neg,
    Not,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Binary {
    pub lhs: Box<Expr>,
    pub op: BinaryOp,
    pub rhs: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Range,
    /// Infix function application, e.g. `0 until width`
    Infix(String),
    Assign,
    PlusAssign,
    MinusAssign,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Member {
    pub receiver: Box<Expr>,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndexAccess {
    pub receiver: Box<Expr>,
    pub index: Box<Expr>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IfExpr {
    pub condition: Box<Expr>,
    pub then_block: Vec<Statement>,
    pub else_branch: Option<ElseBranch>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ElseBranch {
    Block(Vec<Statement>),
    If(Box<IfExpr>),
}
