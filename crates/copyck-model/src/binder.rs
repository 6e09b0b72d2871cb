//! Binder: lowers [`ProgramSource`]s into a [`NodeArena`] with resolved
//! references.
//!
//! Binding runs in three passes:
//! 1. declare every class (so `extends` and type names can refer forward,
//!    across files),
//! 2. declare members: fields, methods, constructors and their parameters,
//!    with canonicalised types,
//! 3. per file, render Java-like source text and lower constructor bodies,
//!    resolving each name against the enclosing scopes.
//!
//! Names that cannot be resolved are kept as unresolved references; they
//! are not errors. The checker treats them as non-matching.

use copyck_common::Span;
use rustc_hash::{FxHashMap, FxHashSet};
use thiserror::Error;
use tracing::{debug, trace};

use crate::base::{ClassId, ConstructorId, Declaration, ExprId, FileId, StmtId};
use crate::node::{CallKind, Expression, Statement};
use crate::node_arena::{NodeArena, ReferenceResolver};
use crate::printer::Printer;
use crate::source::{
    ClassSource, ConstructorSource, ExprSource, ProgramSource, StatementSource,
};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BindError {
    #[error("duplicate class '{name}' in {file} (first declared in {first_file})")]
    DuplicateClass {
        name: String,
        file: String,
        first_file: String,
    },
    #[error("duplicate field '{field}' in class '{class}'")]
    DuplicateField { class: String, field: String },
}

/// Bind a whole program (all files at once, so superclasses may live in
/// other files).
pub fn bind_program(sources: &[ProgramSource]) -> Result<NodeArena, BindError> {
    let mut binder = BinderState::new();
    binder.bind_sources(sources)?;
    Ok(binder.into_arena())
}

/// Lexical scopes of one constructor body.
struct BodyScope {
    class: ClassId,
    constructor: ConstructorId,
    scopes: Vec<FxHashMap<String, Declaration>>,
}

impl BodyScope {
    fn lookup(&self, name: &str) -> Option<Declaration> {
        self.scopes
            .iter()
            .rev()
            .find_map(|scope| scope.get(name).copied())
    }

    fn declare(&mut self, name: &str, declaration: Declaration) {
        if let Some(scope) = self.scopes.last_mut() {
            scope.insert(name.to_string(), declaration);
        }
    }
}

/// Accumulates the rendered text of one file.
#[derive(Default)]
struct SourceWriter {
    text: String,
    indent: usize,
}

impl SourceWriter {
    fn pos(&self) -> u32 {
        u32::try_from(self.text.len()).unwrap_or(u32::MAX)
    }

    fn write(&mut self, s: &str) {
        self.text.push_str(s);
    }

    /// Write `s` and return its span.
    fn write_spanned(&mut self, s: &str) -> Span {
        let start = self.pos();
        self.write(s);
        Span::new(start, self.pos())
    }

    fn write_indent(&mut self) {
        for _ in 0..self.indent {
            self.text.push_str("    ");
        }
    }

    fn newline(&mut self) {
        self.text.push('\n');
    }
}

pub struct BinderState {
    arena: NodeArena,
}

impl Default for BinderState {
    fn default() -> Self {
        Self::new()
    }
}

impl BinderState {
    pub fn new() -> Self {
        BinderState {
            arena: NodeArena::new(),
        }
    }

    pub fn into_arena(self) -> NodeArena {
        self.arena
    }

    pub fn bind_sources(&mut self, sources: &[ProgramSource]) -> Result<(), BindError> {
        let mut declared: Vec<(FileId, Vec<ClassId>)> = Vec::with_capacity(sources.len());
        for source in sources {
            declared.push(self.declare_classes(source)?);
        }
        for (source, (_, classes)) in sources.iter().zip(&declared) {
            for (class_source, &class) in source.classes.iter().zip(classes) {
                self.declare_members(class, class_source)?;
            }
        }
        for (source, (file, classes)) in sources.iter().zip(&declared) {
            self.bind_file(*file, source, classes);
        }
        Ok(())
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    fn declare_classes(
        &mut self,
        source: &ProgramSource,
    ) -> Result<(FileId, Vec<ClassId>), BindError> {
        debug!(
            file = %source.file,
            classes = source.classes.len(),
            "declaring classes"
        );
        let file = self.arena.add_file(source.file.clone());
        let mut classes = Vec::with_capacity(source.classes.len());
        for class in &source.classes {
            let qualified_name = match class.package.as_deref() {
                Some(package) if !package.is_empty() => format!("{package}.{}", class.name),
                _ => class.name.clone(),
            };
            if let Some(existing) = self.arena.lookup_class(&qualified_name) {
                let first_file = self
                    .arena
                    .class(existing)
                    .map(|c| self.arena.file_name(c.file).to_string())
                    .unwrap_or_default();
                return Err(BindError::DuplicateClass {
                    name: qualified_name,
                    file: source.file.clone(),
                    first_file,
                });
            }
            classes.push(self.arena.add_class(
                file,
                class.name.clone(),
                qualified_name,
                class.extends.clone(),
            ));
        }
        Ok((file, classes))
    }

    fn declare_members(&mut self, class: ClassId, source: &ClassSource) -> Result<(), BindError> {
        let mut seen = FxHashSet::default();
        for field in &source.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(BindError::DuplicateField {
                    class: self.qualified_name(class),
                    field: field.name.clone(),
                });
            }
            let ty = self.canonical_type(class, &field.ty);
            self.arena.add_field(
                class,
                field.name.clone(),
                ty,
                field.is_static,
                field.is_final,
                field.initializer.is_some(),
            );
        }
        for method in &source.methods {
            self.arena.add_method(class, method.clone());
        }
        for constructor in &source.constructors {
            let id = self.arena.add_constructor(Some(class));
            for param in &constructor.parameters {
                let ty = self.canonical_type(class, &param.ty);
                self.arena.add_parameter(id, param.name.clone(), ty);
            }
        }
        Ok(())
    }

    fn qualified_name(&self, class: ClassId) -> String {
        self.arena
            .class(class)
            .map(|c| c.qualified_name.clone())
            .unwrap_or_default()
    }

    /// Canonical text of a type name as seen from inside `context`:
    /// a qualified class name, a class in the same package, a unique simple
    /// class name, or the text unchanged (primitives, unknown types).
    fn canonical_type(&self, context: ClassId, ty: &str) -> String {
        let ty = ty.trim();
        if self.arena.lookup_class(ty).is_some() {
            return ty.to_string();
        }
        let package = self
            .arena
            .class(context)
            .and_then(|c| c.qualified_name.rsplit_once('.'))
            .map(|(package, _)| package);
        if let Some(package) = package {
            let candidate = format!("{package}.{ty}");
            if self.arena.lookup_class(&candidate).is_some() {
                return candidate;
            }
        }
        if let Some(found) = self.arena.lookup_class_by_simple_name(ty) {
            return self.qualified_name(found);
        }
        ty.to_string()
    }

    // =========================================================================
    // Files and bodies
    // =========================================================================

    fn bind_file(&mut self, file: FileId, source: &ProgramSource, classes: &[ClassId]) {
        let mut writer = SourceWriter::default();
        let mut current_package: Option<&str> = None;
        for (class_source, &class) in source.classes.iter().zip(classes) {
            let package = class_source.package.as_deref().filter(|p| !p.is_empty());
            if let Some(name) = package
                && package != current_package
            {
                writer.write(&format!("package {name};"));
                writer.newline();
                current_package = package;
            }
            self.bind_class(&mut writer, class, class_source);
        }
        self.arena.set_source_text(file, writer.text);
    }

    fn bind_class(&mut self, writer: &mut SourceWriter, class: ClassId, source: &ClassSource) {
        let Some(data) = self.arena.class(class) else {
            return;
        };
        let fields = data.fields.clone();
        let methods = data.methods.clone();
        let constructors = data.constructors.clone();

        let class_start = writer.pos();
        writer.write("class ");
        let name_span = writer.write_spanned(&source.name);
        if let Some(extends) = &source.extends {
            writer.write(" extends ");
            writer.write(extends);
        }
        writer.write(" {");
        writer.newline();
        writer.indent += 1;

        for (field_source, field) in source.fields.iter().zip(fields) {
            writer.write_indent();
            if field_source.is_static {
                writer.write("static ");
            }
            if field_source.is_final {
                writer.write("final ");
            }
            writer.write(&field_source.ty);
            writer.write(" ");
            let span = writer.write_spanned(&field_source.name);
            if let Some(init) = &field_source.initializer {
                writer.write(" = ");
                writer.write(init);
            }
            writer.write(";");
            writer.newline();
            if let Some(data) = self.arena.field_mut(field) {
                data.span = span;
            }
        }

        for (ctor_source, ctor) in source.constructors.iter().zip(constructors) {
            self.bind_constructor(writer, class, ctor, &source.name, ctor_source);
        }

        for method in methods {
            let name = self
                .arena
                .method(method)
                .map(|m| m.name.clone())
                .unwrap_or_default();
            writer.write_indent();
            writer.write("void ");
            let span = writer.write_spanned(&name);
            writer.write("() {}");
            writer.newline();
            if let Some(data) = self.arena.method_mut(method) {
                data.span = span;
            }
        }

        writer.indent -= 1;
        writer.write("}");
        let span = Span::new(class_start, writer.pos());
        writer.newline();
        if let Some(data) = self.arena.class_mut(class) {
            data.name_span = name_span;
            data.span = span;
        }
    }

    fn bind_constructor(
        &mut self,
        writer: &mut SourceWriter,
        class: ClassId,
        constructor: ConstructorId,
        class_name: &str,
        source: &ConstructorSource,
    ) {
        writer.write_indent();
        let start = writer.pos();
        let name_span = writer.write_spanned(class_name);
        writer.write("(");

        let mut scope = BodyScope {
            class,
            constructor,
            scopes: vec![FxHashMap::default()],
        };
        let params = self
            .arena
            .constructor(constructor)
            .map(|c| c.parameters.clone())
            .unwrap_or_default();
        for (i, (param_source, param)) in source.parameters.iter().zip(params).enumerate() {
            if i > 0 {
                writer.write(", ");
            }
            let span = writer.write_spanned(&format!("{} {}", param_source.ty, param_source.name));
            if let Some(data) = self.arena.parameter_mut(param) {
                data.span = span;
            }
            scope.declare(&param_source.name, Declaration::Parameter(param));
        }
        writer.write(") {");
        writer.newline();

        writer.indent += 1;
        let body = self.bind_statements(writer, &mut scope, &source.body);
        writer.indent -= 1;

        writer.write_indent();
        writer.write("}");
        let span = Span::new(start, writer.pos());
        writer.newline();

        self.arena.set_body(constructor, body);
        if let Some(data) = self.arena.constructor_mut(constructor) {
            data.name_span = name_span;
            data.span = span;
        }
    }

    fn bind_statements(
        &mut self,
        writer: &mut SourceWriter,
        scope: &mut BodyScope,
        statements: &[StatementSource],
    ) -> Vec<StmtId> {
        statements
            .iter()
            .map(|stmt| self.bind_statement(writer, scope, stmt))
            .collect()
    }

    /// Bind a nested statement list in its own lexical scope.
    fn bind_nested(
        &mut self,
        writer: &mut SourceWriter,
        scope: &mut BodyScope,
        statements: &[StatementSource],
    ) -> Vec<StmtId> {
        scope.scopes.push(FxHashMap::default());
        writer.indent += 1;
        let ids = self.bind_statements(writer, scope, statements);
        writer.indent -= 1;
        scope.scopes.pop();
        ids
    }

    fn bind_statement(
        &mut self,
        writer: &mut SourceWriter,
        scope: &mut BodyScope,
        source: &StatementSource,
    ) -> StmtId {
        writer.write_indent();
        let start = writer.pos();
        let kind = match source {
            StatementSource::Assign { lhs, rhs } => {
                let lhs = self.lower_and_write(writer, scope, lhs);
                let rhs = rhs.as_ref().map(|rhs| {
                    writer.write(" = ");
                    self.lower_and_write(writer, scope, rhs)
                });
                writer.write(";");
                Statement::Assignment { lhs, rhs }
            }
            StatementSource::Expr(expr) => {
                let expr = self.lower_and_write(writer, scope, expr);
                writer.write(";");
                Statement::Expression(expr)
            }
            StatementSource::Block(stmts) => {
                writer.write("{");
                writer.newline();
                let stmts = self.bind_nested(writer, scope, stmts);
                writer.write_indent();
                writer.write("}");
                Statement::Block(stmts)
            }
            StatementSource::If {
                condition,
                then,
                otherwise,
            } => {
                writer.write("if (");
                let condition = self.lower_and_write(writer, scope, condition);
                writer.write(") {");
                writer.newline();
                let then_branch = self.bind_nested(writer, scope, then);
                writer.write_indent();
                writer.write("}");
                let else_branch = otherwise.as_ref().map(|otherwise| {
                    writer.write(" else {");
                    writer.newline();
                    let stmts = self.bind_nested(writer, scope, otherwise);
                    writer.write_indent();
                    writer.write("}");
                    stmts
                });
                Statement::If {
                    condition,
                    then_branch,
                    else_branch,
                }
            }
            StatementSource::While { condition, body } => {
                writer.write("while (");
                let condition = match condition {
                    Some(condition) => Some(self.lower_and_write(writer, scope, condition)),
                    None => {
                        writer.write("true");
                        None
                    }
                };
                writer.write(") {");
                writer.newline();
                let body = self.bind_nested(writer, scope, body);
                writer.write_indent();
                writer.write("}");
                Statement::Loop { condition, body }
            }
            StatementSource::Local { name, ty, init } => {
                writer.write(ty);
                writer.write(" ");
                let name_span = writer.write_spanned(name);
                let initializer = init.as_ref().map(|init| {
                    writer.write(" = ");
                    self.lower_and_write(writer, scope, init)
                });
                writer.write(";");
                let canonical = self.canonical_type(scope.class, ty);
                let local = self.arena.add_local(scope.constructor, name.clone(), canonical);
                if let Some(data) = self.arena.local_mut(local) {
                    data.span = name_span;
                }
                scope.declare(name, Declaration::Local(local));
                Statement::Local { local, initializer }
            }
            StatementSource::Other(text) => {
                writer.write(text);
                Statement::Other
            }
        };
        let span = Span::new(start, writer.pos());
        writer.newline();
        self.arena.add_stmt(kind, span)
    }

    /// Lower an expression, render it at the writer's position and patch the
    /// rendered spans back into the arena.
    fn lower_and_write(
        &mut self,
        writer: &mut SourceWriter,
        scope: &BodyScope,
        source: &ExprSource,
    ) -> ExprId {
        let expr = self.lower_expr(scope, source);
        let mut printer = Printer::with_offset(&self.arena, writer.pos());
        printer.print_expr(expr);
        let (text, spans) = printer.into_parts();
        writer.write(&text);
        for (id, span) in spans {
            if let Some(node) = self.arena.expr_mut(id) {
                node.span = span;
            }
        }
        expr
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    fn lower_expr(&mut self, scope: &BodyScope, source: &ExprSource) -> ExprId {
        let kind = match source {
            ExprSource::This => Expression::This,
            ExprSource::Super => Expression::Other {
                text: Some("super".to_string()),
            },
            ExprSource::Name(name)
            | ExprSource::Field {
                qualifier: None,
                name,
            } => {
                let reference = self.arena.add_reference(name.clone());
                match self.resolve_bare_name(scope, name) {
                    Some(decl) => self.arena.bind_reference(reference, decl),
                    None => trace!(name = %name, "unresolved name"),
                }
                Expression::FieldAccess {
                    qualifier: None,
                    reference,
                }
            }
            ExprSource::Field {
                qualifier: Some(qualifier),
                name,
            } => {
                let target = self.qualifier_target(scope, qualifier);
                let qualifier = self.lower_expr(scope, qualifier);
                let target = target.or_else(|| self.class_of_expr(scope, qualifier));
                let reference = self.arena.add_reference(name.clone());
                match target.and_then(|c| self.arena.find_field_in_hierarchy(c, name)) {
                    Some(field) => self
                        .arena
                        .bind_reference(reference, Declaration::Field(field)),
                    None => trace!(name = %name, "unresolved member"),
                }
                Expression::FieldAccess {
                    qualifier: Some(qualifier),
                    reference,
                }
            }
            ExprSource::Call {
                receiver,
                name,
                args,
            } => self.lower_call(scope, receiver.as_deref(), name, args),
            ExprSource::New { class, args } => {
                let arguments: Vec<ExprId> =
                    args.iter().map(|arg| self.lower_expr(scope, arg)).collect();
                let callee = self.arena.add_reference(class.clone());
                let canonical = self.canonical_type(scope.class, class);
                let target = self
                    .arena
                    .class_of_type(&canonical)
                    .and_then(|c| self.resolve_constructor(scope, c, &arguments));
                if let Some(ctor) = target {
                    self.arena
                        .bind_reference(callee, Declaration::Constructor(ctor));
                }
                Expression::Call {
                    kind: CallKind::New,
                    receiver: None,
                    callee,
                    arguments,
                }
            }
            ExprSource::Binary { op, operands } => Expression::Polyadic {
                operator: op.clone(),
                operands: operands
                    .iter()
                    .map(|operand| self.lower_expr(scope, operand))
                    .collect(),
            },
            ExprSource::Conditional {
                condition,
                then,
                otherwise,
            } => Expression::Conditional {
                condition: self.lower_expr(scope, condition),
                when_true: self.lower_expr(scope, then),
                when_false: self.lower_expr(scope, otherwise),
            },
            ExprSource::Paren(inner) => Expression::Parenthesized {
                inner: self.lower_expr(scope, inner),
            },
            ExprSource::Literal(text) | ExprSource::Other(text) => Expression::Other {
                text: Some(text.clone()),
            },
        };
        self.arena.add_expr(kind, Span::DUMMY)
    }

    fn lower_call(
        &mut self,
        scope: &BodyScope,
        receiver: Option<&ExprSource>,
        name: &str,
        args: &[ExprSource],
    ) -> Expression {
        let receiver_target = receiver.and_then(|r| self.qualifier_target(scope, r));
        let receiver = receiver.map(|r| self.lower_expr(scope, r));
        let arguments: Vec<ExprId> = args.iter().map(|arg| self.lower_expr(scope, arg)).collect();
        let callee = self.arena.add_reference(name.to_string());

        let resolved = match (receiver, name) {
            (None, "super") => self
                .arena
                .superclass_of(scope.class)
                .and_then(|sup| self.resolve_constructor(scope, sup, &arguments))
                .map(Declaration::Constructor),
            (None, "this") => self
                .resolve_constructor(scope, scope.class, &arguments)
                .map(Declaration::Constructor),
            (None, _) => self
                .arena
                .find_method_in_hierarchy(scope.class, name)
                .map(Declaration::Method),
            (Some(receiver), _) => receiver_target
                .or_else(|| self.class_of_expr(scope, receiver))
                .and_then(|c| self.arena.find_method_in_hierarchy(c, name))
                .map(Declaration::Method),
        };
        match resolved {
            Some(decl) => self.arena.bind_reference(callee, decl),
            None => trace!(name = %name, "unresolved call target"),
        }

        Expression::Call {
            kind: CallKind::Invocation,
            receiver,
            callee,
            arguments,
        }
    }

    /// Bare names: enclosing scopes (locals, parameters), then fields of the
    /// class chain (nearest declaration wins), then class names.
    fn resolve_bare_name(&self, scope: &BodyScope, name: &str) -> Option<Declaration> {
        if let Some(decl) = scope.lookup(name) {
            return Some(decl);
        }
        if let Some(field) = self.arena.find_field_in_hierarchy(scope.class, name) {
            return Some(Declaration::Field(field));
        }
        let canonical = self.canonical_type(scope.class, name);
        self.arena
            .class_of_type(&canonical)
            .map(Declaration::Class)
    }

    /// Class whose members a `this.`/`super.` qualifier selects.
    fn qualifier_target(&self, scope: &BodyScope, qualifier: &ExprSource) -> Option<ClassId> {
        match qualifier {
            ExprSource::This => Some(scope.class),
            ExprSource::Super => self.arena.superclass_of(scope.class),
            _ => None,
        }
    }

    /// Static class of an already lowered expression, when it is known.
    fn class_of_expr(&self, scope: &BodyScope, expr: ExprId) -> Option<ClassId> {
        match &self.arena.expr(expr)?.kind {
            Expression::This => Some(scope.class),
            Expression::Parenthesized { inner } => self.class_of_expr(scope, *inner),
            Expression::FieldAccess { reference, .. } => {
                let ty = match self.arena.resolve(*reference)? {
                    Declaration::Field(f) => &self.arena.field(f)?.ty,
                    Declaration::Parameter(p) => &self.arena.parameter(p)?.ty,
                    Declaration::Local(l) => &self.arena.local(l)?.ty,
                    Declaration::Class(c) => return Some(c),
                    Declaration::Constructor(_) | Declaration::Method(_) => return None,
                };
                self.arena.class_of_type(ty)
            }
            Expression::Call { callee, .. } => match self.arena.resolve(*callee)? {
                Declaration::Constructor(ctor) => self.arena.constructor(ctor)?.class,
                _ => None,
            },
            Expression::Polyadic { .. }
            | Expression::Conditional { .. }
            | Expression::Other { .. } => None,
        }
    }

    /// Pick the constructor of `class` an explicit call or `new` targets:
    /// same arity, and when overloaded, the first whose parameter types
    /// accept the argument classes. An argument of no known class (a
    /// literal, a primitive, an expression) only fits a parameter whose
    /// type is not a declared class.
    fn resolve_constructor(
        &self,
        scope: &BodyScope,
        class: ClassId,
        arguments: &[ExprId],
    ) -> Option<ConstructorId> {
        let data = self.arena.class(class)?;
        let candidates: Vec<ConstructorId> = data
            .constructors
            .iter()
            .copied()
            .filter(|&c| {
                self.arena
                    .constructor(c)
                    .is_some_and(|ctor| ctor.parameters.len() == arguments.len())
            })
            .collect();
        if candidates.len() <= 1 {
            return candidates.first().copied();
        }
        candidates.into_iter().find(|&candidate| {
            let Some(ctor) = self.arena.constructor(candidate) else {
                return false;
            };
            ctor.parameters.iter().zip(arguments).all(|(&param, &arg)| {
                let Some(param) = self.arena.parameter(param) else {
                    return false;
                };
                let param_class = self.arena.class_of_type(&param.ty);
                match (self.class_of_expr(scope, arg), param_class) {
                    (Some(arg_class), Some(param_class)) => {
                        self.arena.is_subclass_of(arg_class, param_class)
                    }
                    (None, None) => true,
                    _ => false,
                }
            })
        })
    }
}
