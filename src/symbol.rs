#![forbid(unsafe_code)]

//! Symbol model consumed by the validation engine
//!
//! Front-ends produce [`Symbol`]s for every declaration carrying the marker
//! attribute. The engine only reads them.

use crate::types::Language;
use std::collections::BTreeSet;
use std::fmt;
use std::path::PathBuf;

/// Source position used for diagnostic attribution (1-indexed)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    /// File the declaration lives in
    pub file: PathBuf,

    /// Line number (1-indexed)
    pub line: u32,

    /// Column number (1-indexed)
    pub column: u32,
}

impl Location {
    pub fn new(file: impl Into<PathBuf>, line: u32, column: u32) -> Self {
        Self {
            file: file.into(),
            line,
            column,
        }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
    }
}

/// Declaration modifiers relevant to the checks
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Static,
    /// The binding cannot be reassigned (`final` in Java, `const`/`static` in Rust)
    Final,
    Volatile,
    Transient,
}

/// Set of modifiers attached to a declaration
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(BTreeSet<Modifier>);

impl Modifiers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, modifier: Modifier) {
        self.0.insert(modifier);
    }

    pub fn contains(&self, modifier: Modifier) -> bool {
        self.0.contains(&modifier)
    }

    pub fn is_final(&self) -> bool {
        self.contains(Modifier::Final)
    }

    pub fn iter(&self) -> impl Iterator<Item = Modifier> + '_ {
        self.0.iter().copied()
    }
}

impl<const N: usize> From<[Modifier; N]> for Modifiers {
    fn from(modifiers: [Modifier; N]) -> Self {
        Modifiers(modifiers.into_iter().collect())
    }
}

/// Structural description of a declared type
///
/// Names are kept as written in the source so that the string-type check can
/// be a nominal comparison against the canonical name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Language primitive (`int`, `i32`, `str`, `bool`, ...)
    Primitive(String),
    /// Nominal type referenced by (possibly qualified) name
    Named(String),
    /// Borrowed reference to another type
    Reference {
        mutable: bool,
        referent: Box<TypeRef>,
    },
    /// Array or slice of another type
    Array(Box<TypeRef>),
    /// Anything else (generics, tuples, function pointers), as source text
    Other(String),
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(name) | TypeRef::Named(name) | TypeRef::Other(name) => {
                f.write_str(name)
            }
            TypeRef::Reference { mutable, referent } => {
                if *mutable {
                    write!(f, "&mut {}", referent)
                } else {
                    write!(f, "&{}", referent)
                }
            }
            TypeRef::Array(element) => write!(f, "[{}]", element),
        }
    }
}

/// A literal value resolved at compile time
#[derive(Debug, Clone, PartialEq)]
pub enum ConstantValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
    Char(char),
}

impl ConstantValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConstantValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Name of the value's runtime type, used in log output
    pub fn type_name(&self) -> &'static str {
        match self {
            ConstantValue::Str(_) => "string",
            ConstantValue::Int(_) => "integer",
            ConstantValue::Float(_) => "float",
            ConstantValue::Bool(_) => "boolean",
            ConstantValue::Char(_) => "char",
        }
    }
}

impl fmt::Display for ConstantValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstantValue::Str(s) => f.write_str(s),
            ConstantValue::Int(i) => write!(f, "{}", i),
            ConstantValue::Float(x) => write!(f, "{}", x),
            ConstantValue::Bool(b) => write!(f, "{}", b),
            ConstantValue::Char(c) => write!(f, "{}", c),
        }
    }
}

/// Introspection data available for field declarations
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub declared_type: TypeRef,
    pub modifiers: Modifiers,
    /// Present only when the initializer is a compile-time constant expression
    pub constant_value: Option<ConstantValue>,
}

/// What kind of declaration a symbol is
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolKind {
    Field(FieldDecl),
    Method,
    /// Class, struct, enum, interface, trait or other type-level declaration
    Type,
    LocalVariable,
    /// Any other annotatable declaration, described for log output
    Other(String),
}

impl SymbolKind {
    pub fn describe(&self) -> &str {
        match self {
            SymbolKind::Field(_) => "field",
            SymbolKind::Method => "method",
            SymbolKind::Type => "type",
            SymbolKind::LocalVariable => "local variable",
            SymbolKind::Other(description) => description,
        }
    }
}

/// One annotated declaration in a compilation unit
#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    pub language: Language,
    pub kind: SymbolKind,
    pub location: Location,
}

impl Symbol {
    pub fn new(
        name: impl Into<String>,
        language: Language,
        kind: SymbolKind,
        location: Location,
    ) -> Self {
        Self {
            name: name.into(),
            language,
            kind,
            location,
        }
    }

    /// Field data, if this symbol is a field
    pub fn as_field(&self) -> Option<&FieldDecl> {
        match &self.kind {
            SymbolKind::Field(field) => Some(field),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modifiers_from_array() {
        let modifiers = Modifiers::from([Modifier::Static, Modifier::Final]);
        assert!(modifiers.is_final());
        assert!(modifiers.contains(Modifier::Static));
        assert!(!modifiers.contains(Modifier::Public));
        assert_eq!(modifiers.iter().count(), 2);
    }

    #[test]
    fn test_type_ref_display() {
        let str_ref = TypeRef::Reference {
            mutable: false,
            referent: Box::new(TypeRef::Primitive("str".to_string())),
        };
        assert_eq!(str_ref.to_string(), "&str");

        let array = TypeRef::Array(Box::new(TypeRef::Named("String".to_string())));
        assert_eq!(array.to_string(), "[String]");
    }

    #[test]
    fn test_location_display() {
        let location = Location::new("src/lib.rs", 4, 7);
        assert_eq!(location.to_string(), "src/lib.rs:4:7");
    }

    #[test]
    fn test_as_field() {
        let location = Location::new("A.java", 1, 1);
        let method = Symbol::new("foo", Language::Java, SymbolKind::Method, location.clone());
        assert!(method.as_field().is_none());

        let field = Symbol::new(
            "BAR",
            Language::Java,
            SymbolKind::Field(FieldDecl {
                declared_type: TypeRef::Named("String".to_string()),
                modifiers: Modifiers::from([Modifier::Final]),
                constant_value: Some(ConstantValue::Str("x".to_string())),
            }),
            location,
        );
        let decl = field.as_field().unwrap();
        assert_eq!(decl.constant_value.as_ref().and_then(|v| v.as_str()), Some("x"));
    }

    #[test]
    fn test_constant_type_names() {
        assert_eq!(ConstantValue::Int(3).type_name(), "integer");
        assert_eq!(ConstantValue::Str("a".into()).type_name(), "string");
        assert_eq!(ConstantValue::Char('c').to_string(), "c");
    }
}
