use std::{
    fs,
    path::{Path, PathBuf},
    rc::Rc,
};

use crate::{
    ast::{AstItem, ImportDeclaration, TypeDeclaration},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Evaluator},
        parser::item::parse_source,
    },
};

/// The per-module scope of a program file.
///
/// A context owns the templates a module's expressions may call: local
/// declarations plus forwarding entries for specifically imported names, in
/// declaration order, and links to every imported module for qualified
/// calls. Contexts are built once per resolved file path and shared through
/// the evaluator's cache for the lifetime of the run.
pub struct ModuleContext {
    /// Resolved path of the module's source file.
    pub path:      PathBuf,
    /// Local declarations and import forwards, in declaration order.
    /// Unqualified lookup takes the first name match.
    pub templates: Vec<TemplateEntry>,
    /// Links to imported modules, used for qualified calls and forward
    /// resolution.
    pub modules:   Vec<ModuleLink>,
}

/// A single entry of a module's template scope.
pub enum TemplateEntry {
    /// A template declared in this module.
    Local(Rc<TypeDeclaration>),
    /// A forwarding entry created by a specific-name import. The template
    /// itself lives in (and evaluates against) the defining module.
    Imported {
        /// The imported template name.
        name:   String,
        /// Resolved path of the defining module.
        module: PathBuf,
    },
}

impl TemplateEntry {
    /// The name this entry is found under.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Local(declaration) => &declaration.name,
            Self::Imported { name, .. } => name,
        }
    }
}

/// A link from an importing module to an imported one.
pub struct ModuleLink {
    /// Resolved path of the imported module.
    pub path:    PathBuf,
    /// Alias for qualified calls, when the import declared one.
    pub alias:   Option<String>,
    /// The imported module's context.
    pub context: Rc<ModuleContext>,
}

impl ModuleContext {
    /// Finds a locally declared template by name.
    ///
    /// Forwarding entries are not considered; imports do not re-export.
    pub(crate) fn local(&self, name: &str) -> Option<&Rc<TypeDeclaration>> {
        self.templates.iter().find_map(|entry| match entry {
                                 TemplateEntry::Local(declaration) if declaration.name == name => {
                                     Some(declaration)
                                 },
                                 _ => None,
                             })
    }

    /// Finds a locally declared, exported template by name.
    pub(crate) fn exported_local(&self, name: &str) -> Option<&Rc<TypeDeclaration>> {
        self.local(name).filter(|declaration| declaration.exported)
    }
}

impl Evaluator {
    /// Returns the context for a module, building it on first use.
    ///
    /// This is the entry point for the root program: the caller parses the
    /// source itself and hands over the items. Every module reachable
    /// through imports is loaded eagerly, depth-first in declaration order,
    /// before this function returns.
    ///
    /// # Parameters
    /// - `path`: Path of the module's source file; imports resolve relative
    ///   to its directory.
    /// - `items`: The module's parsed top-level items.
    ///
    /// # Returns
    /// The shared module context.
    ///
    /// # Errors
    /// - `ModuleNotFound` when an imported file cannot be read.
    /// - `ModuleParse` when an imported file fails to parse.
    /// - `ImportCycle` when the import graph reaches a module that is still
    ///   being built.
    /// - `UnknownImport` / `UnknownExport` when a specifically imported name
    ///   is missing or not exported.
    pub fn context_for(&mut self, path: &Path, items: &[AstItem]) -> EvalResult<Rc<ModuleContext>> {
        let path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        self.build_context(path, items)
    }

    /// Builds a module context from parsed items, memoizing by path.
    ///
    /// The path is pushed onto the in-progress stack while imports are
    /// processed so that cyclic imports are detected instead of recursing
    /// forever; the finished context is inserted into the cache exactly
    /// once.
    fn build_context(&mut self,
                     path: PathBuf,
                     items: &[AstItem])
                     -> EvalResult<Rc<ModuleContext>> {
        if let Some(context) = self.contexts.get(&path) {
            return Ok(context.clone());
        }

        self.loading.push(path.clone());

        let mut templates = Vec::new();
        let mut modules = Vec::new();

        for item in items {
            match item {
                AstItem::Type(declaration) => {
                    templates.push(TemplateEntry::Local(Rc::new(declaration.clone())));
                },
                AstItem::Import(import) => {
                    let link = self.load_module(&path, import)?;

                    for name in &import.names {
                        match link.context.local(name) {
                            None => {
                                return Err(RuntimeError::UnknownImport { name:   name.clone(),
                                                                         module: import.path
                                                                                       .clone(),
                                                                         line:   import.line, });
                            },
                            Some(declaration) if !declaration.exported => {
                                return Err(RuntimeError::UnknownExport { name:   name.clone(),
                                                                         module: import.path
                                                                                       .clone(),
                                                                         line:   import.line, });
                            },
                            Some(_) => {
                                templates.push(TemplateEntry::Imported { name:   name.clone(),
                                                                         module: link.path
                                                                                     .clone(), });
                            },
                        }
                    }

                    modules.push(link);
                },
                AstItem::Expression(_) => {},
            }
        }

        self.loading.pop();

        let context = Rc::new(ModuleContext { path: path.clone(),
                                              templates,
                                              modules });
        self.contexts.insert(path, context.clone());
        Ok(context)
    }

    /// Reads, parses, and builds the context of one imported module.
    ///
    /// The import path is resolved relative to the importing file's
    /// directory. Reading happens before the cycle check so that a missing
    /// file reports as such rather than as a cycle.
    fn load_module(&mut self,
                   importer: &Path,
                   import: &ImportDeclaration)
                   -> EvalResult<ModuleLink> {
        let joined = importer.parent()
                             .unwrap_or_else(|| Path::new(""))
                             .join(&import.path);
        let source =
            fs::read_to_string(&joined).map_err(|_| RuntimeError::ModuleNotFound { path: import.path
                                                                                             .clone(),
                                                                                   line: import.line, })?;
        let path = joined.canonicalize().unwrap_or(joined);

        if self.loading.contains(&path) {
            return Err(RuntimeError::ImportCycle { path: import.path.clone(),
                                                   line: import.line, });
        }

        let items =
            parse_source(&source).map_err(|e| RuntimeError::ModuleParse { path:    import.path
                                                                                         .clone(),
                                                                          message: e.to_string(),
                                                                          line:    import.line, })?;
        let context = self.build_context(path.clone(), &items)?;

        Ok(ModuleLink { path,
                        alias: import.alias.clone(),
                        context })
    }
}
