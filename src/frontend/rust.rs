#![forbid(unsafe_code)]

//! Rust front-end
//!
//! Marker attributes are outer attributes whose path ends in the marker name
//! (`#[regex]`, `#[checks::regex]`). tree-sitter places outer attributes as
//! siblings before the item they decorate, in every list that can hold
//! attributed entries (items, statements, struct fields, variants,
//! parameters), so the walk tracks a pending marker per sibling list.
//!
//! Mapping to the symbol model:
//!
//! | declaration              | kind          | modifiers            |
//! |--------------------------|---------------|----------------------|
//! | `const`                  | field         | static, final        |
//! | `static`                 | field         | static, final        |
//! | `static mut`             | field         | static               |
//! | struct field             | field         | (visibility only)    |
//! | `fn`                     | method        |                      |
//! | struct/enum/union/trait  | type          |                      |
//! | `let`                    | local variable|                      |

use crate::error::FrontendError;
use crate::frontend::{
    Frontend, ParserCache, SourceUnit, has_child_kind, last_segment, named_children,
    node_location, node_text,
};
use crate::symbol::{ConstantValue, FieldDecl, Modifier, Modifiers, Symbol, SymbolKind, TypeRef};
use crate::types::Language;
use std::collections::HashMap;
use tree_sitter::Node;

/// Front-end for `.rs` sources
#[derive(Debug, Clone)]
pub struct RustFrontend {
    parsers: ParserCache,
}

impl RustFrontend {
    /// Creates the front-end, verifying the grammar loads
    pub fn new() -> Result<Self, FrontendError> {
        let parsers = ParserCache::new();
        parsers.get_parser(Language::Rust)?;
        Ok(Self { parsers })
    }
}

impl Frontend for RustFrontend {
    fn language(&self) -> Language {
        Language::Rust
    }

    fn annotated_symbols(
        &self,
        unit: &SourceUnit,
        marker: &str,
    ) -> Result<Vec<Symbol>, FrontendError> {
        let tree = self.parsers.parse(Language::Rust, unit)?;
        let root = tree.root_node();

        let mut collector = Collector {
            unit,
            marker,
            evaluator: ConstEvaluator::collect(root, unit.content, is_crate_root(unit)),
            symbols: Vec::new(),
        };
        collector.visit(root);

        tracing::debug!(
            file = %unit.path.display(),
            symbols = collector.symbols.len(),
            "collected annotated rust declarations"
        );
        Ok(collector.symbols)
    }
}

/// `lib.rs` and `main.rs` are where `crate::` paths start
fn is_crate_root(unit: &SourceUnit) -> bool {
    unit.path
        .file_name()
        .is_some_and(|name| name == "lib.rs" || name == "main.rs")
}

struct Collector<'u, 't> {
    unit: &'u SourceUnit<'u>,
    marker: &'u str,
    evaluator: ConstEvaluator<'t, 'u>,
    symbols: Vec<Symbol>,
}

impl<'u, 't> Collector<'u, 't> {
    fn visit(&mut self, node: Node<'t>) {
        let in_tuple_fields = node.kind() == "ordered_field_declaration_list";
        let mut marked = false;
        let mut public = false;
        let mut tuple_index = 0usize;

        for child in named_children(node) {
            if child.kind() == "attribute_item" {
                marked |= self.is_marker(child);
                continue;
            }
            if child.is_extra() {
                continue;
            }
            if in_tuple_fields && child.kind() == "visibility_modifier" {
                public = true;
                continue;
            }

            if marked {
                let symbol = if in_tuple_fields {
                    self.tuple_field(child, tuple_index, public)
                } else {
                    self.classify(child)
                };
                self.symbols.push(symbol);
            }
            if in_tuple_fields {
                tuple_index += 1;
            }
            marked = false;
            public = false;

            self.visit(child);
        }
    }

    fn is_marker(&self, attribute_item: Node) -> bool {
        let Some(attribute) = named_children(attribute_item)
            .into_iter()
            .find(|child| child.kind() == "attribute")
        else {
            return false;
        };

        match attribute.named_child(0) {
            Some(path) if matches!(path.kind(), "identifier" | "scoped_identifier") => {
                last_segment(node_text(path, self.unit.content)) == self.marker
            }
            _ => false,
        }
    }

    fn text(&self, node: Node) -> &'u str {
        node_text(node, self.unit.content)
    }

    fn classify(&self, node: Node<'t>) -> Symbol {
        let name_node = match node.kind() {
            "let_declaration" | "parameter" => node.child_by_field_name("pattern"),
            "impl_item" => node.child_by_field_name("type"),
            _ => node.child_by_field_name("name"),
        };
        let name = name_node
            .map(|n| self.text(n).to_string())
            .unwrap_or_else(|| node.kind().to_string());
        let location = node_location(name_node.unwrap_or(node), self.unit.path);

        let kind = match node.kind() {
            "const_item" => SymbolKind::Field(self.item_field(node, true)),
            "static_item" => {
                let mutable = has_child_kind(node, "mutable_specifier");
                SymbolKind::Field(self.item_field(node, !mutable))
            }
            "field_declaration" => SymbolKind::Field(FieldDecl {
                declared_type: self.declared_type(node),
                modifiers: visibility(node),
                constant_value: None,
            }),
            "function_item" | "function_signature_item" => SymbolKind::Method,
            "struct_item" | "enum_item" | "union_item" | "trait_item" | "type_item" => {
                SymbolKind::Type
            }
            "let_declaration" => SymbolKind::LocalVariable,
            "enum_variant" => SymbolKind::Other("enum variant".to_string()),
            "mod_item" => SymbolKind::Other("module".to_string()),
            "impl_item" => SymbolKind::Other("impl block".to_string()),
            "parameter" | "self_parameter" => SymbolKind::Other("parameter".to_string()),
            other => SymbolKind::Other(other.replace('_', " ")),
        };

        Symbol::new(name, Language::Rust, kind, location)
    }

    /// `const` and `static` items; `immutable` is false only for `static mut`
    fn item_field(&self, node: Node<'t>, immutable: bool) -> FieldDecl {
        let mut modifiers = visibility(node);
        modifiers.insert(Modifier::Static);
        if immutable {
            modifiers.insert(Modifier::Final);
        }

        FieldDecl {
            declared_type: self.declared_type(node),
            modifiers,
            constant_value: node
                .child_by_field_name("value")
                .and_then(|value| self.evaluator.eval(value)),
        }
    }

    fn tuple_field(&self, type_node: Node, index: usize, public: bool) -> Symbol {
        let mut modifiers = Modifiers::new();
        if public {
            modifiers.insert(Modifier::Public);
        }
        Symbol::new(
            index.to_string(),
            Language::Rust,
            SymbolKind::Field(FieldDecl {
                declared_type: type_ref(type_node, self.unit.content),
                modifiers,
                constant_value: None,
            }),
            node_location(type_node, self.unit.path),
        )
    }

    fn declared_type(&self, node: Node) -> TypeRef {
        node.child_by_field_name("type")
            .map(|ty| type_ref(ty, self.unit.content))
            .unwrap_or_else(|| TypeRef::Other("_".to_string()))
    }
}

fn visibility(node: Node) -> Modifiers {
    let mut modifiers = Modifiers::new();
    if has_child_kind(node, "visibility_modifier") {
        modifiers.insert(Modifier::Public);
    }
    modifiers
}

/// Converts a type node to the structural type model
pub(crate) fn type_ref(node: Node, source: &str) -> TypeRef {
    match node.kind() {
        "reference_type" => {
            let referent = node
                .child_by_field_name("type")
                .map(|inner| type_ref(inner, source))
                .unwrap_or_else(|| TypeRef::Other("_".to_string()));
            TypeRef::Reference {
                mutable: has_child_kind(node, "mutable_specifier"),
                referent: Box::new(referent),
            }
        }
        "primitive_type" => TypeRef::Primitive(node_text(node, source).to_string()),
        "type_identifier" | "scoped_type_identifier" => {
            TypeRef::Named(strip_whitespace(node_text(node, source)))
        }
        "array_type" => {
            let element = node
                .child_by_field_name("element")
                .map(|inner| type_ref(inner, source))
                .unwrap_or_else(|| TypeRef::Other("_".to_string()));
            TypeRef::Array(Box::new(element))
        }
        _ => TypeRef::Other(strip_whitespace(node_text(node, source))),
    }
}

fn strip_whitespace(text: &str) -> String {
    text.chars().filter(|c| !c.is_whitespace()).collect()
}

/// Items visible to constant folding in one module or block
struct Scope<'t, 's> {
    name: Option<&'s str>,
    parent: Option<usize>,
    /// Blocks also see the items of enclosing scopes; modules do not
    is_module: bool,
    consts: HashMap<&'s str, Node<'t>>,
}

/// Folds constant initializers of one source unit
///
/// Scope 0 is the file's top-level module. A plain identifier resolves in
/// the enclosing module, or in enclosing blocks and then their module; paths
/// (`self::`, `super::`, `inner::`) walk the module tree of the unit.
/// `crate::` paths resolve only when the unit is a crate root.
struct ConstEvaluator<'t, 's> {
    source: &'s str,
    crate_root: bool,
    scopes: Vec<Scope<'t, 's>>,
    scope_by_node: HashMap<usize, usize>,
}

impl<'t, 's> ConstEvaluator<'t, 's> {
    fn collect(root: Node<'t>, source: &'s str, crate_root: bool) -> Self {
        let mut evaluator = Self {
            source,
            crate_root,
            scopes: vec![Scope {
                name: None,
                parent: None,
                is_module: true,
                consts: HashMap::new(),
            }],
            scope_by_node: HashMap::new(),
        };
        evaluator.collect_from(root, 0);
        evaluator
    }

    fn collect_from(&mut self, node: Node<'t>, scope: usize) {
        for child in named_children(node) {
            let inner = match child.kind() {
                "const_item" if holds_items(node) => {
                    self.register(child, scope);
                    scope
                }
                "mod_item" => {
                    let Some(body) = child.child_by_field_name("body") else {
                        continue;
                    };
                    let name = child
                        .child_by_field_name("name")
                        .map(|name| node_text(name, self.source));
                    let module = self.open_scope(body, name, scope, true);
                    self.collect_from(body, module);
                    continue;
                }
                "block" => self.open_scope(child, None, scope, false),
                _ => scope,
            };
            self.collect_from(child, inner);
        }
    }

    fn open_scope(
        &mut self,
        node: Node<'t>,
        name: Option<&'s str>,
        parent: usize,
        is_module: bool,
    ) -> usize {
        let index = self.scopes.len();
        self.scopes.push(Scope {
            name,
            parent: Some(parent),
            is_module,
            consts: HashMap::new(),
        });
        self.scope_by_node.insert(node.id(), index);
        index
    }

    fn register(&mut self, item: Node<'t>, scope: usize) {
        let Some(name) = item.child_by_field_name("name") else {
            return;
        };
        let name = node_text(name, self.source);
        if let Some(target) = self.scopes.get_mut(scope) {
            target.consts.entry(name).or_insert(item);
        }
    }

    /// Innermost module or block containing `node`
    fn enclosing_scope(&self, node: Node<'t>) -> usize {
        let mut current = node.parent();
        while let Some(ancestor) = current {
            if let Some(&scope) = self.scope_by_node.get(&ancestor.id()) {
                return scope;
            }
            current = ancestor.parent();
        }
        0
    }

    fn module_of(&self, scope: usize) -> usize {
        let mut current = scope;
        while let Some(entry) = self.scopes.get(current) {
            match entry.parent {
                Some(parent) if !entry.is_module => current = parent,
                _ => break,
            }
        }
        current
    }

    fn parent_module(&self, module: usize) -> Option<usize> {
        let parent = self.scopes.get(module)?.parent?;
        Some(self.module_of(parent))
    }

    fn child_module(&self, module: usize, name: &str) -> Option<usize> {
        self.scopes.iter().position(|scope| {
            scope.is_module
                && scope.name == Some(name)
                && scope.parent.map(|parent| self.module_of(parent)) == Some(module)
        })
    }

    /// Plain identifier lookup: enclosing blocks, then their module
    fn lookup(&self, name: &str, scope: usize) -> Option<Node<'t>> {
        let mut current = Some(scope);
        while let Some(index) = current {
            let entry = self.scopes.get(index)?;
            if let Some(&item) = entry.consts.get(name) {
                return Some(item);
            }
            if entry.is_module {
                return None;
            }
            current = entry.parent;
        }
        None
    }

    /// Resolves `self::X`, `super::X`, `crate::X` and `inner::X`
    fn lookup_path(&self, path: Node<'t>, scope: usize) -> Option<Node<'t>> {
        let mut segments = Vec::new();
        path_segments(path, self.source, &mut segments)?;
        let (name, modules) = segments.split_last()?;

        let mut module = self.module_of(scope);
        for (i, segment) in modules.iter().enumerate() {
            let leading = modules[..i].iter().all(|s| matches!(*s, "self" | "super"));
            module = match *segment {
                "self" if i == 0 => module,
                "crate" if i == 0 && self.crate_root => 0,
                "super" if leading => self.parent_module(module)?,
                "self" | "crate" | "super" => return None,
                child => self.child_module(module, child)?,
            };
        }
        self.scopes.get(module)?.consts.get(name).copied()
    }

    fn eval(&self, node: Node<'t>) -> Option<ConstantValue> {
        let scope = self.enclosing_scope(node);
        self.eval_guarded(node, scope, &mut Vec::new())
    }

    /// Value of a `const` item; cycles are not constant
    fn const_value(&self, item: Node<'t>, resolving: &mut Vec<usize>) -> Option<ConstantValue> {
        if resolving.contains(&item.id()) {
            return None;
        }
        resolving.push(item.id());
        let scope = self.enclosing_scope(item);
        let value = item
            .child_by_field_name("value")
            .and_then(|value| self.eval_guarded(value, scope, resolving));
        resolving.pop();
        value
    }

    fn eval_guarded(
        &self,
        node: Node<'t>,
        scope: usize,
        resolving: &mut Vec<usize>,
    ) -> Option<ConstantValue> {
        let text = node_text(node, self.source);
        match node.kind() {
            "string_literal" | "raw_string_literal" | "char_literal" | "integer_literal"
            | "float_literal" | "boolean_literal" => literal_value(node.kind(), text),
            "parenthesized_expression" => {
                self.eval_guarded(node.named_child(0)?, scope, resolving)
            }
            "unary_expression" => {
                let operand = self.eval_guarded(node.named_child(0)?, scope, resolving)?;
                match (text.trim_start().chars().next()?, operand) {
                    ('-', ConstantValue::Int(i)) => i.checked_neg().map(ConstantValue::Int),
                    ('-', ConstantValue::Float(x)) => Some(ConstantValue::Float(-x)),
                    ('!', ConstantValue::Bool(b)) => Some(ConstantValue::Bool(!b)),
                    ('!', ConstantValue::Int(i)) => Some(ConstantValue::Int(!i)),
                    _ => None,
                }
            }
            "identifier" => {
                let item = self.lookup(text, scope)?;
                self.const_value(item, resolving)
            }
            "scoped_identifier" => {
                let item = self.lookup_path(node, scope)?;
                self.const_value(item, resolving)
            }
            "macro_invocation" => self.eval_concat(node),
            _ => None,
        }
    }

    /// `concat!` over literal arguments
    fn eval_concat(&self, node: Node<'t>) -> Option<ConstantValue> {
        let name = node.child_by_field_name("macro")?;
        if last_segment(node_text(name, self.source)) != "concat" {
            return None;
        }
        let tokens = named_children(node)
            .into_iter()
            .find(|child| child.kind() == "token_tree")?;

        let mut out = String::new();
        let mut cursor = tokens.walk();
        for token in tokens.children(&mut cursor) {
            if !token.is_named() {
                if matches!(token.kind(), "(" | ")" | "[" | "]" | "{" | "}" | ",") {
                    continue;
                }
                return None;
            }
            let value = literal_value(token.kind(), node_text(token, self.source))?;
            match value {
                ConstantValue::Float(x) => out.push_str(&format!("{:?}", x)),
                other => out.push_str(&other.to_string()),
            }
        }
        Some(ConstantValue::Str(out))
    }
}

/// Item lists whose `const` entries are nameable by plain identifiers
fn holds_items(node: Node) -> bool {
    match node.kind() {
        "source_file" | "block" => true,
        "declaration_list" => node.parent().is_some_and(|parent| parent.kind() == "mod_item"),
        _ => false,
    }
}

/// Flattens a path such as `super::inner::NAME` into its segments
fn path_segments<'s>(node: Node, source: &'s str, out: &mut Vec<&'s str>) -> Option<()> {
    match node.kind() {
        "identifier" | "self" | "super" | "crate" => out.push(node_text(node, source)),
        "scoped_identifier" => {
            path_segments(node.child_by_field_name("path")?, source, out)?;
            out.push(node_text(node.child_by_field_name("name")?, source));
        }
        _ => return None,
    }
    Some(())
}

/// Decodes a literal token; byte and C strings have no `str` value
fn literal_value(kind: &str, text: &str) -> Option<ConstantValue> {
    match kind {
        "string_literal" => {
            let body = text.strip_prefix('"')?.strip_suffix('"')?;
            unescape(body).map(ConstantValue::Str)
        }
        "raw_string_literal" => raw_string_body(text).map(|s| ConstantValue::Str(s.to_string())),
        "char_literal" => {
            if let Some(byte) = text.strip_prefix('b') {
                let decoded = unescape(byte.strip_prefix('\'')?.strip_suffix('\'')?)?;
                let mut chars = decoded.chars();
                let c = chars.next().filter(|c| c.is_ascii())?;
                return chars.next().is_none().then_some(ConstantValue::Int(c as i64));
            }
            let decoded = unescape(text.strip_prefix('\'')?.strip_suffix('\'')?)?;
            let mut chars = decoded.chars();
            let c = chars.next()?;
            chars.next().is_none().then_some(ConstantValue::Char(c))
        }
        "integer_literal" => parse_integer(text).map(ConstantValue::Int),
        "float_literal" => parse_float(text).map(ConstantValue::Float),
        "boolean_literal" => match text {
            "true" => Some(ConstantValue::Bool(true)),
            "false" => Some(ConstantValue::Bool(false)),
            _ => None,
        },
        _ => None,
    }
}

fn raw_string_body(text: &str) -> Option<&str> {
    let rest = text.strip_prefix('r')?;
    let hashes = rest.len() - rest.trim_start_matches('#').len();
    let inner = &rest[hashes..];
    let inner = inner.strip_prefix('"')?;
    let inner = inner.get(..inner.len().checked_sub(hashes)?)?;
    inner.strip_suffix('"')
}

const INTEGER_SUFFIXES: [&str; 12] = [
    "i128", "u128", "isize", "usize", "i64", "u64", "i32", "u32", "i16", "u16", "i8", "u8",
];

fn parse_integer(text: &str) -> Option<i64> {
    let cleaned: String = text.chars().filter(|&c| c != '_').collect();
    let digits = INTEGER_SUFFIXES
        .iter()
        .find_map(|suffix| cleaned.strip_suffix(suffix))
        .unwrap_or(&cleaned);

    if let Some(hex) = digits.strip_prefix("0x") {
        i64::from_str_radix(hex, 16).ok()
    } else if let Some(octal) = digits.strip_prefix("0o") {
        i64::from_str_radix(octal, 8).ok()
    } else if let Some(binary) = digits.strip_prefix("0b") {
        i64::from_str_radix(binary, 2).ok()
    } else {
        digits.parse().ok()
    }
}

fn parse_float(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|&c| c != '_').collect();
    let digits = cleaned
        .strip_suffix("f32")
        .or_else(|| cleaned.strip_suffix("f64"))
        .unwrap_or(&cleaned);
    digits.parse().ok()
}

/// Decodes Rust string escapes, including line continuations
fn unescape(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'n' => out.push('\n'),
            'r' => out.push('\r'),
            't' => out.push('\t'),
            '\\' => out.push('\\'),
            '0' => out.push('\0'),
            '\'' => out.push('\''),
            '"' => out.push('"'),
            'x' => {
                let hi = chars.next()?.to_digit(16)?;
                let lo = chars.next()?.to_digit(16)?;
                let byte = hi * 16 + lo;
                if byte > 0x7f {
                    return None;
                }
                out.push(char::from_u32(byte)?);
            }
            'u' => {
                if chars.next()? != '{' {
                    return None;
                }
                let mut code = String::new();
                loop {
                    match chars.next()? {
                        '}' => break,
                        '_' => {}
                        digit => code.push(digit),
                    }
                }
                out.push(char::from_u32(u32::from_str_radix(&code, 16).ok()?)?);
            }
            '\n' | '\r' => {
                while chars.peek().is_some_and(|c| c.is_whitespace()) {
                    chars.next();
                }
            }
            _ => return None,
        }
    }

    Some(out)
}
