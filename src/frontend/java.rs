#![forbid(unsafe_code)]

//! Java front-end
//!
//! Annotations live in a declaration's `modifiers` node, next to the modifier
//! keywords, so a declaration is marked when one of its annotations names the
//! marker (`@Regex` or `@org.kinrill.annotation.Regex`).
//!
//! Constant values follow Java's constant-expression rules: only `final`
//! variables of primitive or `String` type whose initializer folds from
//! literals, operators and other such variables of the same unit. A simple
//! name is looked up in the enclosing class and then outward, so a non-final
//! field shadows an outer constant; `Type.NAME` looks in that class only.
//! Integer arithmetic wraps at `int` or `long` width.

use crate::error::FrontendError;
use crate::frontend::{
    Frontend, ParserCache, SourceUnit, last_segment, named_children, node_location, node_text,
};
use crate::symbol::{ConstantValue, FieldDecl, Modifier, Modifiers, Symbol, SymbolKind, TypeRef};
use crate::types::Language;
use std::collections::HashMap;
use tree_sitter::Node;

/// Front-end for `.java` sources
#[derive(Debug, Clone)]
pub struct JavaFrontend {
    parsers: ParserCache,
}

impl JavaFrontend {
    /// Creates the front-end, verifying the grammar loads
    pub fn new() -> Result<Self, FrontendError> {
        let parsers = ParserCache::new();
        parsers.get_parser(Language::Java)?;
        Ok(Self { parsers })
    }
}

impl Frontend for JavaFrontend {
    fn language(&self) -> Language {
        Language::Java
    }

    fn annotated_symbols(
        &self,
        unit: &SourceUnit,
        marker: &str,
    ) -> Result<Vec<Symbol>, FrontendError> {
        let tree = self.parsers.parse(Language::Java, unit)?;
        let root = tree.root_node();

        let mut collector = Collector {
            unit,
            marker,
            evaluator: ConstEvaluator::collect(root, unit.content),
            symbols: Vec::new(),
        };
        collector.visit(root);

        tracing::debug!(
            file = %unit.path.display(),
            symbols = collector.symbols.len(),
            "collected annotated java declarations"
        );
        Ok(collector.symbols)
    }
}

fn modifiers_node(node: Node) -> Option<Node> {
    named_children(node)
        .into_iter()
        .find(|child| child.kind() == "modifiers")
}

/// Modifier keywords of a declaration
fn modifiers_of(node: Node) -> Modifiers {
    let mut modifiers = Modifiers::new();
    let Some(list) = modifiers_node(node) else {
        return modifiers;
    };

    let mut cursor = list.walk();
    for keyword in list.children(&mut cursor) {
        let modifier = match keyword.kind() {
            "public" => Modifier::Public,
            "protected" => Modifier::Protected,
            "private" => Modifier::Private,
            "static" => Modifier::Static,
            "final" => Modifier::Final,
            "volatile" => Modifier::Volatile,
            "transient" => Modifier::Transient,
            _ => continue,
        };
        modifiers.insert(modifier);
    }
    modifiers
}

/// Declarations whose variables are `public static final` without saying so
fn is_interface_constant(node: Node) -> bool {
    node.kind() == "constant_declaration"
}

struct Collector<'u, 't> {
    unit: &'u SourceUnit<'u>,
    marker: &'u str,
    evaluator: ConstEvaluator<'t, 'u>,
    symbols: Vec<Symbol>,
}

impl<'u, 't> Collector<'u, 't> {
    fn visit(&mut self, node: Node<'t>) {
        for child in named_children(node) {
            if self.is_marked(child) {
                self.classify(child);
            }
            self.visit(child);
        }
    }

    fn is_marked(&self, node: Node) -> bool {
        let Some(list) = modifiers_node(node) else {
            return false;
        };
        named_children(list).into_iter().any(|annotation| {
            matches!(annotation.kind(), "marker_annotation" | "annotation")
                && annotation
                    .child_by_field_name("name")
                    .is_some_and(|name| last_segment(self.text(name)) == self.marker)
        })
    }

    fn text(&self, node: Node) -> &'u str {
        node_text(node, self.unit.content)
    }

    fn push(&mut self, name_node: Option<Node>, node: Node, kind: SymbolKind) {
        let name = name_node
            .map(|n| self.text(n).to_string())
            .unwrap_or_else(|| node.kind().to_string());
        let location = node_location(name_node.unwrap_or(node), self.unit.path);
        self.symbols
            .push(Symbol::new(name, Language::Java, kind, location));
    }

    fn classify(&mut self, node: Node<'t>) {
        let name = node.child_by_field_name("name");
        match node.kind() {
            "field_declaration" | "constant_declaration" => self.fields(node),
            "local_variable_declaration" => {
                for declarator in node.children_by_field_name("declarator", &mut node.walk()) {
                    let name = declarator.child_by_field_name("name");
                    self.push(name, declarator, SymbolKind::LocalVariable);
                }
            }
            "method_declaration"
            | "constructor_declaration"
            | "compact_constructor_declaration"
            | "annotation_type_element_declaration" => self.push(name, node, SymbolKind::Method),
            "class_declaration"
            | "interface_declaration"
            | "enum_declaration"
            | "record_declaration"
            | "annotation_type_declaration" => self.push(name, node, SymbolKind::Type),
            "formal_parameter" | "spread_parameter" => {
                self.push(name, node, SymbolKind::Other("parameter".to_string()))
            }
            "enum_constant" => {
                self.push(name, node, SymbolKind::Other("enum constant".to_string()))
            }
            "package_declaration" => {
                self.push(None, node, SymbolKind::Other("package".to_string()))
            }
            other => {
                let description = other.trim_end_matches("_declaration").replace('_', " ");
                self.push(name, node, SymbolKind::Other(description))
            }
        }
    }

    /// One field symbol per declarator: `@Regex final String A = "a", B = "b";`
    fn fields(&mut self, node: Node<'t>) {
        let mut modifiers = modifiers_of(node);
        if is_interface_constant(node) {
            modifiers.insert(Modifier::Public);
            modifiers.insert(Modifier::Static);
            modifiers.insert(Modifier::Final);
        }
        let base_type = node
            .child_by_field_name("type")
            .map(|ty| type_ref(ty, self.unit.content))
            .unwrap_or_else(|| TypeRef::Other("_".to_string()));

        for declarator in node.children_by_field_name("declarator", &mut node.walk()) {
            let declared_type = with_declarator_dimensions(base_type.clone(), declarator);
            let constant_value = if modifiers.is_final() {
                self.evaluator.declarator_value(&declared_type, declarator)
            } else {
                None
            };

            let field = FieldDecl {
                declared_type,
                modifiers: modifiers.clone(),
                constant_value,
            };
            let name = declarator.child_by_field_name("name");
            self.push(name, declarator, SymbolKind::Field(field));
        }
    }
}

/// `String names[]` declares an array through the declarator
fn with_declarator_dimensions(base: TypeRef, declarator: Node) -> TypeRef {
    match declarator.child_by_field_name("dimensions") {
        Some(dimensions) => {
            let mut cursor = dimensions.walk();
            let depth = dimensions
                .children(&mut cursor)
                .filter(|token| token.kind() == "[")
                .count();
            (0..depth).fold(base, |ty, _| TypeRef::Array(Box::new(ty)))
        }
        None => base,
    }
}

/// Converts a type node to the structural type model
pub(crate) fn type_ref(node: Node, source: &str) -> TypeRef {
    match node.kind() {
        "integral_type" | "floating_point_type" | "boolean_type" | "void_type" => {
            TypeRef::Primitive(node_text(node, source).to_string())
        }
        "type_identifier" | "scoped_type_identifier" => TypeRef::Named(
            node_text(node, source)
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect(),
        ),
        "array_type" => {
            let element = node
                .child_by_field_name("element")
                .map(|inner| type_ref(inner, source))
                .unwrap_or_else(|| TypeRef::Other("_".to_string()));
            let dimensions = node.child_by_field_name("dimensions");
            let depth = dimensions.map_or(1, |d| {
                let mut cursor = d.walk();
                d.children(&mut cursor)
                    .filter(|token| token.kind() == "[")
                    .count()
                    .max(1)
            });
            (0..depth).fold(element, |ty, _| TypeRef::Array(Box::new(ty)))
        }
        _ => TypeRef::Other(node_text(node, source).to_string()),
    }
}

fn is_constant_type(ty: &TypeRef) -> bool {
    match ty {
        TypeRef::Primitive(name) => name != "void",
        TypeRef::Named(name) => name == "String" || name == "java.lang.String",
        _ => false,
    }
}

/// A field as seen by constant folding; non-final fields still shadow
struct FieldEntry<'t> {
    declared_type: TypeRef,
    declarator: Node<'t>,
    is_final: bool,
    scope: usize,
}

/// Fields declared directly in one class body
struct ClassScope<'t, 's> {
    name: Option<&'s str>,
    parent: Option<usize>,
    fields: HashMap<&'s str, FieldEntry<'t>>,
}

impl<'t, 's> ClassScope<'t, 's> {
    fn new(name: Option<&'s str>, parent: Option<usize>) -> Self {
        Self {
            name,
            parent,
            fields: HashMap::new(),
        }
    }
}

/// Folds Java constant expressions within one compilation unit
///
/// Scope 0 is the compilation unit itself; every class body, including
/// anonymous ones, gets its own scope chained to the enclosing one.
struct ConstEvaluator<'t, 's> {
    source: &'s str,
    scopes: Vec<ClassScope<'t, 's>>,
    scope_by_node: HashMap<usize, usize>,
}

impl<'t, 's> ConstEvaluator<'t, 's> {
    fn collect(root: Node<'t>, source: &'s str) -> Self {
        let mut evaluator = Self {
            source,
            scopes: vec![ClassScope::new(None, None)],
            scope_by_node: HashMap::new(),
        };
        evaluator.collect_from(root, 0);
        evaluator
    }

    fn collect_from(&mut self, node: Node<'t>, scope: usize) {
        for child in named_children(node) {
            let inner = match child.kind() {
                "field_declaration" | "constant_declaration" => {
                    self.collect_fields(child, scope);
                    scope
                }
                "class_declaration" | "interface_declaration" | "enum_declaration"
                | "record_declaration" | "annotation_type_declaration" => {
                    let name = child
                        .child_by_field_name("name")
                        .map(|name| node_text(name, self.source));
                    self.open_scope(child, name, scope)
                }
                "class_body" if matches!(node.kind(), "object_creation_expression" | "enum_constant") => {
                    self.open_scope(child, None, scope)
                }
                _ => scope,
            };
            self.collect_from(child, inner);
        }
    }

    fn open_scope(&mut self, node: Node<'t>, name: Option<&'s str>, parent: usize) -> usize {
        let index = self.scopes.len();
        self.scopes.push(ClassScope::new(name, Some(parent)));
        self.scope_by_node.insert(node.id(), index);
        index
    }

    fn collect_fields(&mut self, declaration: Node<'t>, scope: usize) {
        let Some(ty) = declaration.child_by_field_name("type") else {
            return;
        };
        let base_type = type_ref(ty, self.source);
        let is_final = is_interface_constant(declaration) || modifiers_of(declaration).is_final();

        for declarator in declaration.children_by_field_name("declarator", &mut declaration.walk()) {
            let Some(name) = declarator.child_by_field_name("name") else {
                continue;
            };
            let name = node_text(name, self.source);
            let Some(class) = self.scopes.get_mut(scope) else {
                return;
            };
            class
                .fields
                .entry(name)
                .or_insert_with(|| FieldEntry {
                    declared_type: with_declarator_dimensions(base_type.clone(), declarator),
                    declarator,
                    is_final,
                    scope,
                });
        }
    }

    /// Innermost class scope containing `node`
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

    fn declarator_value(
        &self,
        declared_type: &TypeRef,
        declarator: Node<'t>,
    ) -> Option<ConstantValue> {
        let scope = self.enclosing_scope(declarator);
        self.fold(declared_type, declarator, scope, &mut Vec::new())
            .map(Folded::into_constant)
    }

    /// Simple name lookup: the enclosing class first, then outward
    fn lookup(&self, name: &str, scope: usize) -> Option<&FieldEntry<'t>> {
        let mut current = Some(scope);
        while let Some(index) = current {
            let class = self.scopes.get(index)?;
            if let Some(field) = class.fields.get(name) {
                return Some(field);
            }
            current = class.parent;
        }
        None
    }

    /// Class named `name` as seen from `scope`
    fn find_class(&self, name: &str, scope: usize) -> Option<usize> {
        let mut current = Some(scope);
        while let Some(index) = current {
            let class = self.scopes.get(index)?;
            if class.name == Some(name) {
                return Some(index);
            }
            if let Some(member) = self.member_class(index, name) {
                return Some(member);
            }
            current = class.parent;
        }
        None
    }

    fn member_class(&self, outer: usize, name: &str) -> Option<usize> {
        self.scopes
            .iter()
            .position(|class| class.parent == Some(outer) && class.name == Some(name))
    }

    /// Class scope named by a qualifier such as `Outer.Inner`
    fn class_path(&self, qualifier: Node<'t>, scope: usize) -> Option<usize> {
        match qualifier.kind() {
            "identifier" => self.find_class(node_text(qualifier, self.source), scope),
            "field_access" => {
                let object = qualifier.child_by_field_name("object")?;
                let member = node_text(qualifier.child_by_field_name("field")?, self.source);
                match self.class_path(object, scope) {
                    Some(outer) => self.member_class(outer, member),
                    // package prefix, as in `com.example.Patterns`
                    None => self.find_class(member, scope),
                }
            }
            _ => None,
        }
    }

    /// Value of a `final` field; cycles are not constant
    fn field_value(&self, field: &FieldEntry<'t>, resolving: &mut Vec<usize>) -> Option<Folded> {
        if !field.is_final {
            return None;
        }
        let id = field.declarator.id();
        if resolving.contains(&id) {
            return None;
        }

        resolving.push(id);
        let value = self.fold(&field.declared_type, field.declarator, field.scope, resolving);
        resolving.pop();
        value
    }

    fn fold(
        &self,
        declared_type: &TypeRef,
        declarator: Node<'t>,
        scope: usize,
        resolving: &mut Vec<usize>,
    ) -> Option<Folded> {
        if !is_constant_type(declared_type) {
            return None;
        }
        let value = declarator.child_by_field_name("value")?;
        let folded = self.eval(value, scope, resolving)?;
        coerce(declared_type, folded)
    }

    fn eval(&self, node: Node<'t>, scope: usize, resolving: &mut Vec<usize>) -> Option<Folded> {
        let text = node_text(node, self.source);
        match node.kind() {
            "string_literal" => string_literal(text).map(Folded::Str),
            "character_literal" => {
                let decoded = unescape(text.strip_prefix('\'')?.strip_suffix('\'')?)?;
                let mut chars = decoded.chars();
                let c = chars.next()?;
                chars.next().is_none().then_some(Folded::Char(c))
            }
            "decimal_integer_literal" | "hex_integer_literal" | "octal_integer_literal"
            | "binary_integer_literal" => parse_integer(text),
            "decimal_floating_point_literal" => parse_float(text).map(Folded::Float),
            "true" => Some(Folded::Bool(true)),
            "false" => Some(Folded::Bool(false)),
            "parenthesized_expression" => self.eval(node.named_child(0)?, scope, resolving),
            "identifier" => {
                let field = self.lookup(text, scope)?;
                self.field_value(field, resolving)
            }
            "field_access" => {
                let class = self.class_path(node.child_by_field_name("object")?, scope)?;
                let name = node_text(node.child_by_field_name("field")?, self.source);
                let field = self.scopes.get(class)?.fields.get(name)?;
                self.field_value(field, resolving)
            }
            "unary_expression" => {
                let operator = node.child_by_field_name("operator")?.kind();
                let operand = self.eval(node.child_by_field_name("operand")?, scope, resolving)?;
                unary(operator, operand)
            }
            "binary_expression" => {
                let operator = node.child_by_field_name("operator")?.kind();
                let left = self.eval(node.child_by_field_name("left")?, scope, resolving)?;
                let right = self.eval(node.child_by_field_name("right")?, scope, resolving)?;
                binary(operator, left, right)
            }
            "ternary_expression" => {
                let condition =
                    self.eval(node.child_by_field_name("condition")?, scope, resolving)?;
                let branch = match condition {
                    Folded::Bool(true) => node.child_by_field_name("consequence")?,
                    Folded::Bool(false) => node.child_by_field_name("alternative")?,
                    _ => return None,
                };
                self.eval(branch, scope, resolving)
            }
            "cast_expression" => {
                let target = type_ref(node.child_by_field_name("type")?, self.source);
                let value = self.eval(node.child_by_field_name("value")?, scope, resolving)?;
                match &target {
                    TypeRef::Primitive(name) => cast(name, value),
                    other if is_constant_type(other) => value.is_str().then_some(value),
                    _ => None,
                }
            }
            _ => None,
        }
    }
}

/// A folded value at its Java width; `byte` and `short` fold as `int`
#[derive(Debug, Clone, PartialEq)]
enum Folded {
    Str(String),
    Int(i32),
    Long(i64),
    Float(f64),
    Bool(bool),
    Char(char),
}

impl Folded {
    fn into_constant(self) -> ConstantValue {
        match self {
            Folded::Str(s) => ConstantValue::Str(s),
            Folded::Int(i) => ConstantValue::Int(i64::from(i)),
            Folded::Long(l) => ConstantValue::Int(l),
            Folded::Float(x) => ConstantValue::Float(x),
            Folded::Bool(b) => ConstantValue::Bool(b),
            Folded::Char(c) => ConstantValue::Char(c),
        }
    }

    fn is_str(&self) -> bool {
        matches!(self, Folded::Str(_))
    }

    /// Unary numeric promotion to `int`
    fn as_int(&self) -> Option<i32> {
        match self {
            Folded::Int(i) => Some(*i),
            Folded::Char(c) => Some(*c as i32),
            _ => None,
        }
    }

    fn as_long(&self) -> Option<i64> {
        match self {
            Folded::Long(l) => Some(*l),
            other => other.as_int().map(i64::from),
        }
    }

    fn as_double(&self) -> Option<f64> {
        match self {
            Folded::Float(x) => Some(*x),
            other => other.as_long().map(|l| l as f64),
        }
    }

    /// String conversion used by `+` concatenation
    fn concat_text(&self) -> String {
        match self {
            Folded::Str(s) => s.clone(),
            Folded::Int(i) => i.to_string(),
            Folded::Long(l) => l.to_string(),
            Folded::Float(x) => format!("{:?}", x),
            Folded::Bool(b) => b.to_string(),
            Folded::Char(c) => c.to_string(),
        }
    }
}

/// Assignment conversion of a folded value to the variable's declared type
fn coerce(declared: &TypeRef, value: Folded) -> Option<Folded> {
    let TypeRef::Primitive(name) = declared else {
        return value.is_str().then_some(value);
    };

    match (name.as_str(), value) {
        ("boolean", Folded::Bool(b)) => Some(Folded::Bool(b)),
        ("float" | "double", value) => value.as_double().map(Folded::Float),
        ("long", value) => value.as_long().map(Folded::Long),
        ("int", value) => value.as_int().map(Folded::Int),
        // narrowing an int constant is allowed only when the value fits
        (narrow @ ("byte" | "short" | "char"), value) => {
            let wide = value.as_int()?;
            let narrowed = cast(narrow, Folded::Int(wide))?;
            (narrowed.as_int()? == wide).then_some(narrowed)
        }
        _ => None,
    }
}

/// Explicit primitive cast, truncating to the target width
fn cast(target: &str, value: Folded) -> Option<Folded> {
    match (target, value) {
        ("boolean", Folded::Bool(b)) => Some(Folded::Bool(b)),
        (_, Folded::Bool(_) | Folded::Str(_)) => None,
        ("float" | "double", value) => value.as_double().map(Folded::Float),
        ("long", Folded::Float(x)) => Some(Folded::Long(x as i64)),
        (_, Folded::Float(x)) => cast(target, Folded::Int(x as i32)),
        ("long", value) => value.as_long().map(Folded::Long),
        ("int", value) => value.as_long().map(|l| Folded::Int(l as i32)),
        ("short", value) => value.as_long().map(|l| Folded::Int(i32::from(l as i16))),
        ("byte", value) => value.as_long().map(|l| Folded::Int(i32::from(l as i8))),
        ("char", value) => value
            .as_long()
            .and_then(|l| char::from_u32(u32::from(l as u16)))
            .map(Folded::Char),
        _ => None,
    }
}

fn unary(operator: &str, operand: Folded) -> Option<Folded> {
    match (operator, operand) {
        ("!", Folded::Bool(b)) => Some(Folded::Bool(!b)),
        ("-", Folded::Float(x)) => Some(Folded::Float(-x)),
        ("+", Folded::Float(x)) => Some(Folded::Float(x)),
        ("-", Folded::Long(l)) => Some(Folded::Long(l.wrapping_neg())),
        ("+", Folded::Long(l)) => Some(Folded::Long(l)),
        ("~", Folded::Long(l)) => Some(Folded::Long(!l)),
        (op, value) => {
            let i = value.as_int()?;
            match op {
                "-" => Some(Folded::Int(i.wrapping_neg())),
                "+" => Some(Folded::Int(i)),
                "~" => Some(Folded::Int(!i)),
                _ => None,
            }
        }
    }
}

/// Binary operators with Java's numeric promotion; integer arithmetic wraps
fn binary(operator: &str, left: Folded, right: Folded) -> Option<Folded> {
    if operator == "+" && (left.is_str() || right.is_str()) {
        return Some(Folded::Str(left.concat_text() + &right.concat_text()));
    }

    if let (Folded::Bool(a), Folded::Bool(b)) = (&left, &right) {
        let (a, b) = (*a, *b);
        return match operator {
            "&&" | "&" => Some(Folded::Bool(a && b)),
            "||" | "|" => Some(Folded::Bool(a || b)),
            "^" | "!=" => Some(Folded::Bool(a != b)),
            "==" => Some(Folded::Bool(a == b)),
            _ => None,
        };
    }

    if matches!(operator, "<<" | ">>" | ">>>") {
        return shift(operator, left, right.as_long()?);
    }

    if matches!(left, Folded::Float(_)) || matches!(right, Folded::Float(_)) {
        let (a, b) = (left.as_double()?, right.as_double()?);
        return match operator {
            "+" => Some(Folded::Float(a + b)),
            "-" => Some(Folded::Float(a - b)),
            "*" => Some(Folded::Float(a * b)),
            "/" => Some(Folded::Float(a / b)),
            "%" => Some(Folded::Float(a % b)),
            _ => compare(operator, a, b),
        };
    }

    if matches!(left, Folded::Long(_)) || matches!(right, Folded::Long(_)) {
        let (a, b) = (left.as_long()?, right.as_long()?);
        return match operator {
            "+" => Some(Folded::Long(a.wrapping_add(b))),
            "-" => Some(Folded::Long(a.wrapping_sub(b))),
            "*" => Some(Folded::Long(a.wrapping_mul(b))),
            "/" => (b != 0).then(|| Folded::Long(a.wrapping_div(b))),
            "%" => (b != 0).then(|| Folded::Long(a.wrapping_rem(b))),
            "&" => Some(Folded::Long(a & b)),
            "|" => Some(Folded::Long(a | b)),
            "^" => Some(Folded::Long(a ^ b)),
            _ => compare(operator, a, b),
        };
    }

    let (a, b) = (left.as_int()?, right.as_int()?);
    match operator {
        "+" => Some(Folded::Int(a.wrapping_add(b))),
        "-" => Some(Folded::Int(a.wrapping_sub(b))),
        "*" => Some(Folded::Int(a.wrapping_mul(b))),
        "/" => (b != 0).then(|| Folded::Int(a.wrapping_div(b))),
        "%" => (b != 0).then(|| Folded::Int(a.wrapping_rem(b))),
        "&" => Some(Folded::Int(a & b)),
        "|" => Some(Folded::Int(a | b)),
        "^" => Some(Folded::Int(a ^ b)),
        _ => compare(operator, a, b),
    }
}

/// Shifts take the left operand's width and mask the distance to it
fn shift(operator: &str, value: Folded, distance: i64) -> Option<Folded> {
    if let Folded::Long(a) = value {
        let s = (distance & 0x3f) as u32;
        let shifted = match operator {
            "<<" => a << s,
            ">>" => a >> s,
            ">>>" => ((a as u64) >> s) as i64,
            _ => return None,
        };
        return Some(Folded::Long(shifted));
    }

    let a = value.as_int()?;
    let s = (distance & 0x1f) as u32;
    let shifted = match operator {
        "<<" => a << s,
        ">>" => a >> s,
        ">>>" => ((a as u32) >> s) as i32,
        _ => return None,
    };
    Some(Folded::Int(shifted))
}

fn compare<T: PartialOrd>(operator: &str, a: T, b: T) -> Option<Folded> {
    let result = match operator {
        "==" => a == b,
        "!=" => a != b,
        "<" => a < b,
        "<=" => a <= b,
        ">" => a > b,
        ">=" => a >= b,
        _ => return None,
    };
    Some(Folded::Bool(result))
}

/// Parses an integer literal at its Java width: `int` unless suffixed `L`
///
/// Hex, octal and binary literals are two's complement bit patterns of that
/// width, so `0xFFFFFFFF` is `-1`. The decimal literals `2147483648` and
/// `9223372036854775808L` only occur under unary minus and fold to the minimum.
fn parse_integer(text: &str) -> Option<Folded> {
    let cleaned: String = text.chars().filter(|&c| c != '_').collect();
    let long = cleaned.ends_with(['l', 'L']);
    let digits = cleaned.trim_end_matches(['l', 'L']);

    let (radix, body) = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        (16, hex)
    } else if let Some(binary) = digits
        .strip_prefix("0b")
        .or_else(|| digits.strip_prefix("0B"))
    {
        (2, binary)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..])
    } else {
        (10, digits)
    };
    let magnitude = u64::from_str_radix(body, radix).ok()?;

    match (long, radix) {
        (true, 10) => i64::try_from(magnitude)
            .ok()
            .or((magnitude == 1 << 63).then_some(i64::MIN))
            .map(Folded::Long),
        (true, _) => Some(Folded::Long(magnitude as i64)),
        (false, 10) => i32::try_from(magnitude)
            .ok()
            .or((magnitude == 1 << 31).then_some(i32::MIN))
            .map(Folded::Int),
        (false, _) => u32::try_from(magnitude)
            .ok()
            .map(|bits| Folded::Int(bits as i32)),
    }
}

fn parse_float(text: &str) -> Option<f64> {
    let cleaned: String = text.chars().filter(|&c| c != '_').collect();
    cleaned
        .trim_end_matches(['f', 'F', 'd', 'D'])
        .parse()
        .ok()
}

/// Decodes a string literal or text block
fn string_literal(text: &str) -> Option<String> {
    if let Some(block) = text.strip_prefix("\"\"\"") {
        return text_block(block.strip_suffix("\"\"\"")?);
    }
    unescape(text.strip_prefix('"')?.strip_suffix('"')?)
}

/// Strips incidental indentation from a text block, then decodes escapes
fn text_block(body: &str) -> Option<String> {
    let (_, content) = body.split_once('\n')?;
    let lines: Vec<&str> = content.split('\n').collect();

    let indent = lines
        .iter()
        .enumerate()
        .filter(|(i, line)| *i == lines.len() - 1 || !line.trim().is_empty())
        .map(|(_, line)| line.len() - line.trim_start().len())
        .min()
        .unwrap_or(0);

    let stripped: Vec<&str> = lines
        .iter()
        .map(|line| line.get(indent..).unwrap_or("").trim_end())
        .collect();
    unescape(&stripped.join("\n"))
}

/// Decodes Java escape sequences, including `\s` and line continuations
fn unescape(body: &str) -> Option<String> {
    let mut out = String::with_capacity(body.len());
    let mut chars = body.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next()? {
            'b' => out.push('\u{8}'),
            't' => out.push('\t'),
            'n' => out.push('\n'),
            'f' => out.push('\u{c}'),
            'r' => out.push('\r'),
            's' => out.push(' '),
            '"' => out.push('"'),
            '\'' => out.push('\''),
            '\\' => out.push('\\'),
            '\n' => {}
            'u' => {
                while chars.peek() == Some(&'u') {
                    chars.next();
                }
                let code: String = (0..4).filter_map(|_| chars.next()).collect();
                if code.len() != 4 {
                    return None;
                }
                out.push(char::from_u32(u32::from_str_radix(&code, 16).ok()?)?);
            }
            digit @ '0'..='7' => {
                let mut value = digit.to_digit(8)?;
                let max_len = if digit <= '3' { 3 } else { 2 };
                for _ in 1..max_len {
                    match chars.peek().and_then(|c| c.to_digit(8)) {
                        Some(next) => {
                            value = value * 8 + next;
                            chars.next();
                        }
                        None => break,
                    }
                }
                out.push(char::from_u32(value)?);
            }
            _ => return None,
        }
    }

    Some(out)
}
