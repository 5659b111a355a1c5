use crate::util::text::{char_for_code, escape_quotes};

/// Sentinel count tagging a sequence as string-shaped.
///
/// A sequence whose first element is this count and whose second element is
/// a sequence of counts renders as quoted text. The tag is a representation
/// convention, not a distinct value variant: an ordinary sequence that
/// happens to begin with this count is rendered as a string too.
pub const STRING_MAGIC_NUMBER: usize = 51224;

/// Represents a runtime value in the interpreter.
///
/// Every result of evaluation is built from these three variants. Sequences
/// of units represent unary-encoded non-negative integers; `Count` is their
/// compact canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// The indivisible primitive.
    Unit,
    /// The canonical compact form of a unit-only sequence, carrying its
    /// length. Never nested inside itself; nesting happens only within
    /// `Sequence`.
    Count(usize),
    /// An ordered, heterogeneous list of values.
    Sequence(Vec<Self>),
}

impl From<usize> for Value {
    fn from(n: usize) -> Self {
        Self::Count(n)
    }
}

impl From<Vec<Self>> for Value {
    fn from(values: Vec<Self>) -> Self {
        Self::Sequence(values)
    }
}

impl Value {
    /// Canonicalizes the value bottom-up.
    ///
    /// A sequence whose elements all normalize to units collapses to a
    /// count of its length; every other value is returned with its elements
    /// normalized. The function is pure and idempotent, and every equality
    /// comparison in the interpreter is performed on normalized values.
    ///
    /// # Examples
    /// ```
    /// use inferra::interpreter::value::core::Value;
    ///
    /// let units = Value::Sequence(vec![Value::Unit, Value::Unit]);
    /// assert_eq!(units.normalize(), Value::Count(2));
    ///
    /// let mixed = Value::Sequence(vec![Value::Count(1), Value::Unit]);
    /// assert_eq!(mixed.clone().normalize(), mixed);
    /// ```
    #[must_use]
    pub fn normalize(self) -> Self {
        match self {
            Self::Sequence(items) => {
                let items = items.into_iter()
                                 .map(Self::normalize)
                                 .collect::<Vec<_>>();
                if items.iter().all(Self::is_unit) {
                    Self::Count(items.len())
                } else {
                    Self::Sequence(items)
                }
            },
            other => other,
        }
    }

    /// Builds the string-shaped value for a literal text.
    ///
    /// The result is `[STRING_MAGIC_NUMBER, [code, code, ...]]` with one
    /// count per character of the text.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let codes = text.chars()
                        .map(|c| Self::Count(c as usize))
                        .collect::<Vec<_>>();
        Self::Sequence(vec![Self::Count(STRING_MAGIC_NUMBER), Self::Sequence(codes)])
    }

    /// Returns `true` if the value is [`Unit`].
    ///
    /// [`Unit`]: Value::Unit
    #[must_use]
    pub const fn is_unit(&self) -> bool {
        matches!(self, Self::Unit)
    }
}

/// Extracts the rendered text of a string-shaped sequence.
///
/// The shape check mirrors the tagging convention: the first element must be
/// the magic count and the second a sequence containing only counts. Any
/// further elements are ignored.
fn string_text(items: &[Value]) -> Option<String> {
    let [Value::Count(STRING_MAGIC_NUMBER), Value::Sequence(codes), ..] = items else {
        return None;
    };

    let mut text = String::with_capacity(codes.len());
    for code in codes {
        match code {
            Value::Count(code) => text.push(char_for_code(*code)),
            _ => return None,
        }
    }
    Some(text)
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unit => write!(f, "_"),
            Self::Count(n) => write!(f, "{n}"),
            Self::Sequence(items) => {
                if let Some(text) = string_text(items) {
                    return write!(f, "\"{}\"", escape_quotes(&text));
                }

                write!(f, "[")?;

                for (index, value) in items.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }

                    write!(f, "{value}")?;
                }

                write!(f, "]")
            },
        }
    }
}
