/// An abstract syntax tree (AST) node representing an expression in the
/// language.
///
/// `Expr` covers every expression form: template calls, numeric and unit
/// literals, array literals, conditionals, parameter references, aborts, and
/// string literals. Each variant models a distinct syntactic construct and
/// carries the source line it was parsed from for error reporting.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A template call such as `Add<5, 8>` or `nat::Inc<3>`.
    Call {
        /// Module alias for qualified calls (`alias::Name<...>`), if any.
        module:    Option<String>,
        /// Name of the template being called.
        callee:    String,
        /// Argument expressions, in call order.
        arguments: Vec<Self>,
        /// Line number in the source code.
        line:      usize,
    },
    /// A non-negative numeric literal, e.g. `42`.
    ///
    /// Numbers are surface sugar for a sequence of that many units and
    /// evaluate directly to the compact count value.
    NumberLiteral {
        /// The literal count.
        value: usize,
        /// Line number in the source code.
        line:  usize,
    },
    /// The indivisible unit literal, written `_`.
    UnitLiteral {
        /// Line number in the source code.
        line: usize,
    },
    /// Array literal expression, e.g. `[1, ...Rest, _]`.
    ArrayLiteral {
        /// Elements of the array, plain or spread.
        items: Vec<ArrayItem>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Conditional expression: `evaluatee extends condition ? then : else`.
    Conditional {
        /// The value being tested.
        evaluatee:   Box<Self>,
        /// Either a plain expression (equality test) or a bracketed pattern.
        condition:   Condition,
        /// Expression evaluated when the condition holds.
        then_branch: Box<Self>,
        /// Expression evaluated when the condition does not hold.
        else_branch: Box<Self>,
        /// Line number in the source code.
        line:        usize,
    },
    /// Reference to a template parameter by name.
    ParameterReference {
        /// Name of the parameter.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// Deliberate halt: `abort` or `abort("message")`.
    Abort {
        /// Optional message reported with the failure.
        message: Option<String>,
        /// Line number in the source code.
        line:    usize,
    },
    /// A string literal, e.g. `"hi"`.
    ///
    /// Strings are sugar for a tagged sequence of character codes; see the
    /// value model for the exact shape.
    StringLiteral {
        /// The literal text with escapes already resolved.
        text: String,
        /// Line number in the source code.
        line: usize,
    },
}

impl Expr {
    /// Gets the line number from `self`.
    /// ## Example
    /// ```
    /// use inferra::ast::Expr;
    ///
    /// let expr = Expr::ParameterReference { name: "X".to_string(),
    ///                                       line: 5, };
    ///
    /// assert_eq!(expr.line_number(), 5);
    /// ```
    #[must_use]
    pub const fn line_number(&self) -> usize {
        match self {
            Self::Call { line, .. }
            | Self::NumberLiteral { line, .. }
            | Self::UnitLiteral { line, .. }
            | Self::ArrayLiteral { line, .. }
            | Self::Conditional { line, .. }
            | Self::ParameterReference { line, .. }
            | Self::Abort { line, .. }
            | Self::StringLiteral { line, .. } => *line,
        }
    }
}

/// A single element of an array literal.
///
/// Spread elements splice the elements of their operand into the surrounding
/// array instead of nesting it.
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayItem {
    /// A plain element expression.
    Expression(Expr),
    /// A spread element, written `...expr`.
    Spread(Expr),
}

/// The condition of a conditional expression.
///
/// A bracketed condition is a structural pattern that can capture parts of
/// the evaluatee; anything else is compared for deep equality.
#[derive(Debug, Clone, PartialEq)]
pub enum Condition {
    /// A plain expression compared against the evaluatee after
    /// normalization.
    Value(Box<Expr>),
    /// A sequence pattern, written `[item, ...]`.
    Pattern(Vec<PatternItem>),
}

/// A single item of a sequence pattern.
///
/// Patterns mix ordinary expressions with capture markers. Only the marker
/// variants are specific to patterns; expressions and spreads behave as they
/// do in array literals.
#[derive(Debug, Clone, PartialEq)]
pub enum PatternItem {
    /// A concrete element expression matched by equality.
    Expression(Expr),
    /// A spread of a concrete expression, written `...expr`.
    Spread(Expr),
    /// A capture marker, written `infer Name`, `infer`, `...infer Name` or
    /// `...infer`.
    Infer {
        /// Name to bind the matched value to; anonymous when absent.
        name:   Option<String>,
        /// Whether this capture is variadic and matches a sub-sequence.
        spread: bool,
        /// Line number in the source code.
        line:   usize,
    },
    /// A skip marker, written `skip expr`.
    ///
    /// Consumes as many positions as the operand counts without binding
    /// anything.
    Skip {
        /// Expression producing the number of positions to consume.
        count: Expr,
        /// Line number in the source code.
        line:  usize,
    },
}

/// A single parameter of a template declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDecl {
    /// The parameter name.
    pub name:    String,
    /// Default value evaluated when the call site omits this argument.
    /// Defaults may reference parameters declared before this one.
    pub default: Option<Expr>,
    /// Line number in the source code.
    pub line:    usize,
}

/// A named, parameterized template declaration.
///
/// Templates are the language's unit of abstraction: a call binds the
/// parameters and evaluates the body. Declarations are immutable once parsed
/// and owned by exactly one module.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDeclaration {
    /// The template name.
    pub name:       String,
    /// Ordered parameter list.
    pub parameters: Vec<ParameterDecl>,
    /// The body expression evaluated on every call.
    pub body:       Expr,
    /// Whether other modules may import or call this template.
    pub exported:   bool,
    /// Line number in the source code.
    pub line:       usize,
}

/// An import declaration.
///
/// Either or both of `alias` and `names` may be present: an alias enables
/// qualified `alias::Name<...>` calls, while specific names become callable
/// unqualified in the importing module.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportDeclaration {
    /// Path of the imported module, relative to the importing file.
    pub path:  String,
    /// Module alias for qualified calls, if any.
    pub alias: Option<String>,
    /// Specific template names imported into the local scope.
    pub names: Vec<String>,
    /// Line number in the source code.
    pub line:  usize,
}

/// A top-level program item.
///
/// A program is a sequence of these; declarations populate the module scope
/// and expressions are evaluated in order.
#[derive(Debug, Clone, PartialEq)]
pub enum AstItem {
    /// A template declaration.
    Type(TypeDeclaration),
    /// An import declaration.
    Import(ImportDeclaration),
    /// A top-level expression evaluated for its result.
    Expression(Expr),
}
