use std::rc::Rc;

use crate::{
    ast::{ArrayItem, Expr, PatternItem},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Environment, EvalResult, Evaluator},
            module::ModuleContext,
        },
        value::core::Value,
    },
};

/// One flattened expectation the evaluatee's elements are checked against.
///
/// Literal atoms come from evaluated runs of concrete pattern items and are
/// compared by deep equality; infer atoms bind (or silently consume) the
/// element at their position.
enum Atom {
    /// A concrete value expected at this position.
    Literal(Value),
    /// A capture at this position. Skip markers expand into anonymous,
    /// non-spread infer atoms.
    Infer {
        /// Name to bind, if the capture is named.
        name:   Option<String>,
        /// Whether the capture consumes a contiguous middle slice.
        spread: bool,
    },
}

impl Evaluator {
    /// Matches a normalized evaluatee against a sequence pattern.
    ///
    /// The evaluatee expression is evaluated and normalized first. A bare
    /// unit never matches; a count is treated as a virtual sequence of that
    /// many units.
    ///
    /// The pattern's concrete items are evaluated in the current
    /// environment and flattened into positional atoms (see
    /// [`Evaluator::flatten_pattern`]). With no spread capture the
    /// evaluatee's length must equal the atom count exactly; with one, it
    /// must be at least the atom count minus one. Atoms are then anchored
    /// from the front up to the spread capture and from the back behind it,
    /// comparing literals and binding named captures as they are passed.
    /// The spread capture receives the contiguous middle slice that
    /// remains, normalized.
    ///
    /// # Returns
    /// - `Ok(Some(bindings))` on a match, with one entry per named capture.
    /// - `Ok(None)` when the pattern does not match; the caller evaluates
    ///   the false branch. Match failure is never an error.
    ///
    /// # Errors
    /// Only genuine evaluation failures inside pattern sub-expressions
    /// (including `InvalidSkip` for a non-count skip operand) propagate.
    pub(crate) fn match_pattern(&self,
                                evaluatee: &Expr,
                                items: &[PatternItem],
                                env: &Environment,
                                context: &Rc<ModuleContext>)
                                -> EvalResult<Option<Environment>> {
        let elements = match self.eval(evaluatee, env, context)?.normalize() {
            Value::Unit => return Ok(None),
            Value::Count(n) => vec![Value::Unit; n],
            Value::Sequence(values) => values,
        };

        let atoms = self.flatten_pattern(items, env, context)?;

        let has_spread = atoms.iter()
                              .any(|atom| matches!(atom, Atom::Infer { spread: true, .. }));
        if has_spread {
            if elements.len() + 1 < atoms.len() {
                return Ok(None);
            }
        } else if atoms.len() != elements.len() {
            return Ok(None);
        }

        let mut bindings = Environment::new();

        // Front pass, up to the spread capture if there is one.
        let mut spread_start = None;
        for (index, atom) in atoms.iter().enumerate() {
            match atom {
                Atom::Infer { spread: true, .. } => {
                    spread_start = Some(index);
                    break;
                },
                Atom::Infer { name, .. } => {
                    if let Some(name) = name {
                        bindings.insert(name.clone(), elements[index].clone());
                    }
                },
                Atom::Literal(value) => {
                    if *value != elements[index] {
                        return Ok(None);
                    }
                },
            }
        }

        // Back pass: the atoms behind the spread anchor against the tail of
        // the evaluatee, and the spread takes the middle slice in between.
        if let Some(start) = spread_start {
            let tail = atoms.len() - 1 - start;
            let middle_end = elements.len() - tail;

            for (offset, atom) in atoms[start + 1..].iter().enumerate() {
                let element = &elements[middle_end + offset];
                match atom {
                    Atom::Infer { name, .. } => {
                        if let Some(name) = name {
                            bindings.insert(name.clone(), element.clone());
                        }
                    },
                    Atom::Literal(value) => {
                        if value != element {
                            return Ok(None);
                        }
                    },
                }
            }

            if let Atom::Infer { name: Some(name), .. } = &atoms[start] {
                let middle = elements[start..middle_end].to_vec();
                bindings.insert(name.clone(), Value::Sequence(middle).normalize());
            }
        }

        Ok(Some(bindings))
    }

    /// Evaluates a pattern's items into one flat list of positional atoms.
    ///
    /// Maximal runs of concrete items (expressions and spreads) between
    /// capture markers are evaluated together as an array literal, so
    /// nested spreads flatten exactly as they do in arrays. A run that
    /// normalizes to a count contributes that many unit expectations;
    /// otherwise each of its elements becomes one literal atom. A skip
    /// marker evaluates its operand, which must normalize to a count, and
    /// contributes that many anonymous captures. Infer markers pass through
    /// as single atoms.
    fn flatten_pattern(&self,
                       items: &[PatternItem],
                       env: &Environment,
                       context: &Rc<ModuleContext>)
                       -> EvalResult<Vec<Atom>> {
        let mut atoms = Vec::new();
        let mut run = Vec::new();

        for item in items {
            match item {
                PatternItem::Expression(expr) => run.push(ArrayItem::Expression(expr.clone())),
                PatternItem::Spread(expr) => run.push(ArrayItem::Spread(expr.clone())),
                PatternItem::Infer { name, spread, .. } => {
                    self.flush_run(&mut run, &mut atoms, env, context)?;
                    atoms.push(Atom::Infer { name:   name.clone(),
                                             spread: *spread, });
                },
                PatternItem::Skip { count, line } => {
                    self.flush_run(&mut run, &mut atoms, env, context)?;

                    let count = match self.eval(count, env, context)?.normalize() {
                        Value::Count(n) => n,
                        _ => return Err(RuntimeError::InvalidSkip { line: *line }),
                    };
                    atoms.extend((0..count).map(|_| Atom::Infer { name:   None,
                                                                  spread: false, }));
                },
            }
        }
        self.flush_run(&mut run, &mut atoms, env, context)?;

        Ok(atoms)
    }

    /// Evaluates one pending run of concrete items into literal atoms.
    fn flush_run(&self,
                 run: &mut Vec<ArrayItem>,
                 atoms: &mut Vec<Atom>,
                 env: &Environment,
                 context: &Rc<ModuleContext>)
                 -> EvalResult<()> {
        if run.is_empty() {
            return Ok(());
        }

        let values = self.eval_array_items(run, env, context)?;
        run.clear();

        match Value::Sequence(values).normalize() {
            Value::Count(n) => atoms.extend((0..n).map(|_| Atom::Literal(Value::Unit))),
            Value::Sequence(values) => atoms.extend(values.into_iter().map(Atom::Literal)),
            Value::Unit => atoms.push(Atom::Literal(Value::Unit)),
        }

        Ok(())
    }
}
