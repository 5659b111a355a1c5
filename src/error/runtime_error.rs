#[derive(Debug)]
/// Represents all errors that can occur during evaluation.
pub enum RuntimeError {
    /// Referenced a parameter that is not bound in the current environment.
    UnboundParameter {
        /// The name of the parameter.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// A call omitted a required argument that has no default value.
    MissingArgument {
        /// The name of the parameter.
        parameter: String,
        /// The name of the template being called.
        template:  String,
        /// The source line where the error occurred.
        line:      usize,
    },
    /// Called a template name that is not declared or imported.
    UnknownTemplate {
        /// The name of the template.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Used a module alias that no import declares.
    UnknownModule {
        /// The alias or path of the module.
        name: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// Requested a name the target module does not declare.
    UnknownImport {
        /// The name of the template.
        name:   String,
        /// The path of the module searched.
        module: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// Requested a template the target module declares but does not export.
    UnknownExport {
        /// The name of the template.
        name:   String,
        /// The module searched (alias or path).
        module: String,
        /// The source line where the error occurred.
        line:   usize,
    },
    /// Tried to spread a bare unit into an array.
    InvalidSpread {
        /// The source line where the error occurred.
        line: usize,
    },
    /// A skip marker's operand did not evaluate to a count.
    InvalidSkip {
        /// The source line where the error occurred.
        line: usize,
    },
    /// An abort expression was reached.
    Aborted {
        /// Optional message attached to the abort.
        message: Option<String>,
        /// The source line where the error occurred.
        line:    usize,
    },
    /// The import graph contains a cycle through the given module.
    ImportCycle {
        /// The path of the module being re-entered.
        path: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An imported module's source file could not be read.
    ModuleNotFound {
        /// The path that failed to load.
        path: String,
        /// The source line where the error occurred.
        line: usize,
    },
    /// An imported module's source failed to parse.
    ModuleParse {
        /// The path of the module that failed to parse.
        path:    String,
        /// The parse failure, rendered.
        message: String,
        /// The source line of the import declaration.
        line:    usize,
    },
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnboundParameter { name, line } => {
                write!(f, "Error on line {line}: Parameter '{name}' is not bound.")
            },
            Self::MissingArgument { parameter,
                                    template,
                                    line, } => write!(f,
                                                      "Error on line {line}: No value passed for parameter '{parameter}' when calling template '{template}'."),
            Self::UnknownTemplate { name, line } => {
                write!(f, "Error on line {line}: Template '{name}' not found.")
            },
            Self::UnknownModule { name, line } => {
                write!(f, "Error on line {line}: Could not find module '{name}'.")
            },
            Self::UnknownImport { name, module, line } => write!(f,
                                                                 "Error on line {line}: Could not find template '{name}' in module '{module}'."),
            Self::UnknownExport { name, module, line } => write!(f,
                                                                 "Error on line {line}: Template '{name}' in module '{module}' is not exported."),
            Self::InvalidSpread { line } => {
                write!(f, "Error on line {line}: Cannot spread a unit into an array.")
            },
            Self::InvalidSkip { line } => {
                write!(f, "Error on line {line}: Non-count value passed to skip.")
            },
            Self::Aborted { message, line } => match message {
                Some(message) => write!(f,
                                        "Error on line {line}: Exiting due to abort keyword: {message}"),
                None => write!(f, "Error on line {line}: Exiting due to abort keyword."),
            },
            Self::ImportCycle { path, line } => {
                write!(f, "Error on line {line}: Import cycle through module '{path}'.")
            },
            Self::ModuleNotFound { path, line } => {
                write!(f, "Error on line {line}: Could not read module '{path}'.")
            },
            Self::ModuleParse { path, message, line } => write!(f,
                                                                "Error on line {line}: Failed to parse module '{path}': {message}"),
        }
    }
}

impl std::error::Error for RuntimeError {}
