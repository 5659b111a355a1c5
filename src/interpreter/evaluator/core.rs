use std::{collections::HashMap, path::PathBuf, rc::Rc};

use crate::{
    ast::{ArrayItem, Condition, Expr},
    error::RuntimeError,
    interpreter::{evaluator::module::ModuleContext, value::core::Value},
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// An ephemeral mapping from parameter name to bound value.
///
/// A fresh environment is created per template invocation and is only ever
/// extended when a pattern match succeeds; values never outlive the call
/// they were bound for.
pub type Environment = HashMap<String, Value>;

/// Stores the per-run evaluation state.
///
/// This struct owns the module-context cache and the stack of in-progress
/// module loads used for cycle detection. One evaluator is created per
/// top-level run and dropped when the run completes, so cached contexts
/// never leak across runs.
///
/// ## Usage
///
/// Build the root context with [`Evaluator::context_for`], then call
/// [`Evaluator::eval`] once per top-level expression with an empty
/// environment.
pub struct Evaluator {
    /// Cache of fully built module contexts, keyed by resolved file path.
    /// Write-once per path; diamond-shaped import graphs reuse entries.
    pub(crate) contexts: HashMap<PathBuf, Rc<ModuleContext>>,
    /// Paths whose contexts are currently being built. An import that
    /// re-enters this stack is a cycle.
    pub(crate) loading:  Vec<PathBuf>,
}

#[allow(clippy::new_without_default)]
impl Evaluator {
    /// Creates a new evaluator with an empty module cache.
    #[must_use]
    pub fn new() -> Self {
        Self { contexts: HashMap::new(),
               loading:  Vec::new(), }
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// This is the main entry point for expression evaluation.
    /// The evaluator dispatches based on expression variant: calls, numeric
    /// and unit literals, array literals, conditionals, parameter
    /// references, aborts, and string literals. Evaluation is recursive and
    /// performs no memoization; repeated identical sub-calls are recomputed.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    /// - `env`: Parameter bindings of the enclosing template invocation.
    /// - `context`: Module scope the expression's names resolve against.
    ///
    /// # Returns
    /// The computed value. Results are not normalized here; comparisons and
    /// the top-level report normalize where required.
    pub fn eval(&self,
                expr: &Expr,
                env: &Environment,
                context: &Rc<ModuleContext>)
                -> EvalResult<Value> {
        match expr {
            Expr::Call { module,
                         callee,
                         arguments,
                         line, } => {
                self.eval_call(module.as_deref(), callee, arguments, *line, env, context)
            },
            Expr::NumberLiteral { value, .. } => Ok(Value::Count(*value)),
            Expr::UnitLiteral { .. } => Ok(Value::Unit),
            Expr::ArrayLiteral { items, .. } => {
                Ok(Value::Sequence(self.eval_array_items(items, env, context)?))
            },
            Expr::Conditional { evaluatee,
                                condition,
                                then_branch,
                                else_branch,
                                .. } => {
                self.eval_conditional(evaluatee, condition, then_branch, else_branch, env, context)
            },
            Expr::ParameterReference { name, line } => {
                env.get(name)
                   .cloned()
                   .ok_or_else(|| RuntimeError::UnboundParameter { name: name.clone(),
                                                                   line: *line, })
            },
            Expr::Abort { message, line } => {
                Err(RuntimeError::Aborted { message: message.clone(),
                                            line:    *line, })
            },
            Expr::StringLiteral { text, .. } => Ok(Value::from_text(text)),
        }
    }

    /// Evaluates a list of array elements left-to-right, splicing spreads.
    ///
    /// A spread element's value must be a sequence (its elements are spliced
    /// in) or a count (that many fresh units are appended). Spreading a bare
    /// unit fails.
    ///
    /// The pattern matcher shares this routine to evaluate runs of concrete
    /// pattern items, so nested spreads flatten identically in both places.
    ///
    /// # Errors
    /// - `InvalidSpread` when a spread operand evaluates to a unit.
    /// - Any error raised while evaluating an element.
    pub(crate) fn eval_array_items(&self,
                                   items: &[ArrayItem],
                                   env: &Environment,
                                   context: &Rc<ModuleContext>)
                                   -> EvalResult<Vec<Value>> {
        let mut values = Vec::new();

        for item in items {
            match item {
                ArrayItem::Expression(expr) => values.push(self.eval(expr, env, context)?),
                ArrayItem::Spread(expr) => match self.eval(expr, env, context)? {
                    Value::Sequence(elements) => values.extend(elements),
                    Value::Count(n) => values.extend(std::iter::repeat_n(Value::Unit, n)),
                    Value::Unit => {
                        return Err(RuntimeError::InvalidSpread { line: expr.line_number() });
                    },
                },
            }
        }

        Ok(values)
    }

    /// Evaluates a conditional expression.
    ///
    /// A plain condition is compared against the evaluatee by deep equality
    /// after normalizing both sides; no bindings are produced. A pattern
    /// condition delegates to the structural matcher, and a successful
    /// match evaluates the then-branch with the captured bindings layered
    /// over (overriding) the current environment. A failed match is not an
    /// error: the else-branch is evaluated in the unmodified environment.
    fn eval_conditional(&self,
                        evaluatee: &Expr,
                        condition: &Condition,
                        then_branch: &Expr,
                        else_branch: &Expr,
                        env: &Environment,
                        context: &Rc<ModuleContext>)
                        -> EvalResult<Value> {
        match condition {
            Condition::Value(expr) => {
                let expected = self.eval(expr, env, context)?.normalize();
                let actual = self.eval(evaluatee, env, context)?.normalize();

                let branch = if expected == actual {
                    then_branch
                } else {
                    else_branch
                };
                self.eval(branch, env, context)
            },
            Condition::Pattern(items) => {
                match self.match_pattern(evaluatee, items, env, context)? {
                    Some(bindings) => {
                        let mut merged = env.clone();
                        merged.extend(bindings);
                        self.eval(then_branch, &merged, context)
                    },
                    None => self.eval(else_branch, env, context),
                }
            },
        }
    }
}
