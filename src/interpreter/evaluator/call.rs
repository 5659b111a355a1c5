use std::rc::Rc;

use crate::{
    ast::{Expr, TypeDeclaration},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Environment, EvalResult, Evaluator},
            module::{ModuleContext, TemplateEntry},
        },
        value::core::Value,
    },
};

impl Evaluator {
    /// Evaluates a template call.
    ///
    /// Resolution finds the template declaration and the context its body
    /// and defaults evaluate against; a template always executes against
    /// the context of the module that declared it, never the call site's.
    ///
    /// Arguments bind left-to-right. A supplied positional argument is
    /// evaluated in the caller's environment and context. An omitted
    /// argument falls back to the parameter's default, which is evaluated
    /// lazily in the callee's context and sees only the bindings
    /// accumulated for earlier parameters of this same call. Arguments
    /// beyond the parameter list are ignored.
    ///
    /// # Parameters
    /// - `module`: Module alias for qualified calls.
    /// - `callee`: The template name.
    /// - `arguments`: Argument expressions, in call order.
    /// - `line`: Line number for error reporting.
    /// - `env`: The caller's environment.
    /// - `context`: The caller's module context.
    ///
    /// # Returns
    /// The value of the template body under the bound parameters.
    ///
    /// # Errors
    /// - Resolution failures (`UnknownModule`, `UnknownExport`,
    ///   `UnknownTemplate`).
    /// - `MissingArgument` when a parameter has neither an argument nor a
    ///   default.
    /// - Any error raised while evaluating arguments, defaults, or the
    ///   body.
    pub(crate) fn eval_call(&self,
                            module: Option<&str>,
                            callee: &str,
                            arguments: &[Expr],
                            line: usize,
                            env: &Environment,
                            context: &Rc<ModuleContext>)
                            -> EvalResult<Value> {
        let (declaration, call_context) = self.resolve_template(module, callee, line, context)?;

        let mut bound = Environment::new();
        for (index, parameter) in declaration.parameters.iter().enumerate() {
            let value = if let Some(argument) = arguments.get(index) {
                self.eval(argument, env, context)?
            } else if let Some(default) = &parameter.default {
                self.eval(default, &bound, &call_context)?
            } else {
                return Err(RuntimeError::MissingArgument { parameter: parameter.name.clone(),
                                                           template:  declaration.name.clone(),
                                                           line, });
            };
            bound.insert(parameter.name.clone(), value);
        }

        self.eval(&declaration.body, &bound, &call_context)
    }

    /// Resolves a callee name to its declaration and evaluation context.
    ///
    /// Qualified names look the alias up among the current module's import
    /// links and may only reach exported templates of the target module.
    /// Unqualified names search the current module's scope in declaration
    /// order; a forwarding entry redirects to the defining module, whose
    /// context becomes the call context.
    fn resolve_template(&self,
                        module: Option<&str>,
                        callee: &str,
                        line: usize,
                        context: &Rc<ModuleContext>)
                        -> EvalResult<(Rc<TypeDeclaration>, Rc<ModuleContext>)> {
        if let Some(alias) = module {
            let link = context.modules
                              .iter()
                              .find(|link| link.alias.as_deref() == Some(alias))
                              .ok_or_else(|| RuntimeError::UnknownModule { name: alias.to_string(),
                                                                           line })?;
            let declaration = link.context
                                  .exported_local(callee)
                                  .ok_or_else(|| RuntimeError::UnknownExport { name:   callee.to_string(),
                                                                               module: alias.to_string(),
                                                                               line, })?;

            return Ok((declaration.clone(), link.context.clone()));
        }

        let entry = context.templates
                           .iter()
                           .find(|entry| entry.name() == callee)
                           .ok_or_else(|| RuntimeError::UnknownTemplate { name: callee.to_string(),
                                                                          line })?;

        match entry {
            TemplateEntry::Local(declaration) => Ok((declaration.clone(), context.clone())),
            TemplateEntry::Imported { name, module } => {
                let link = context.modules
                                  .iter()
                                  .find(|link| link.path == *module)
                                  .ok_or_else(|| RuntimeError::UnknownModule { name: module.display().to_string(),
                                                                               line })?;
                let declaration =
                    link.context
                        .local(name)
                        .ok_or_else(|| RuntimeError::UnknownTemplate { name: name.clone(),
                                                                       line })?;

                Ok((declaration.clone(), link.context.clone()))
            },
        }
    }
}
