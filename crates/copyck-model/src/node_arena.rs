//! NodeArena: storage, creation (`add_*`) and lookup methods.
//!
//! The arena is filled once (by the binder, or directly by a host or test)
//! and then handed to the checker as `&NodeArena`. Nothing in the checker
//! mutates it.

use copyck_common::Span;
use rustc_hash::{FxHashMap, FxHashSet};
use smallvec::SmallVec;

use crate::base::{
    ClassId, ConstructorId, Declaration, ExprId, FieldId, FileId, LocalId, MethodId, ParameterId,
    RefId, StmtId,
};
use crate::node::{
    ClassData, ConstructorData, ExprNode, Expression, FieldData, LocalData, MethodData,
    ParameterData, ReferenceData, Statement, StmtNode,
};

/// Resolves name references to their declarations.
///
/// `NodeArena` answers from the table the binder filled in. Hosts with
/// their own semantic model can implement this trait and pass it to the
/// checker alongside the arena.
pub trait ReferenceResolver {
    fn resolve(&self, reference: RefId) -> Option<Declaration>;
}

impl<R: ReferenceResolver + ?Sized> ReferenceResolver for &R {
    fn resolve(&self, reference: RefId) -> Option<Declaration> {
        (**self).resolve(reference)
    }
}

#[derive(Clone, Debug, Default)]
pub struct NodeArena {
    files: Vec<String>,
    sources: Vec<Option<String>>,
    classes: Vec<ClassData>,
    fields: Vec<FieldData>,
    constructors: Vec<ConstructorData>,
    parameters: Vec<ParameterData>,
    locals: Vec<LocalData>,
    methods: Vec<MethodData>,
    exprs: Vec<ExprNode>,
    stmts: Vec<StmtNode>,
    references: Vec<ReferenceData>,
    resolutions: Vec<Option<Declaration>>,
    class_by_name: FxHashMap<String, ClassId>,
}

fn next_id(len: usize) -> u32 {
    u32::try_from(len).unwrap_or(u32::MAX)
}

impl NodeArena {
    pub fn new() -> NodeArena {
        NodeArena::default()
    }

    // =========================================================================
    // Creation
    // =========================================================================

    pub fn add_file(&mut self, name: impl Into<String>) -> FileId {
        let id = FileId(next_id(self.files.len()));
        self.files.push(name.into());
        self.sources.push(None);
        id
    }

    /// Attach rendered source text to a file so reporters can show snippets.
    pub fn set_source_text(&mut self, file: FileId, text: String) {
        if let Some(slot) = self.sources.get_mut(file.index()) {
            *slot = Some(text);
        }
    }

    /// Register a class. A later class with the same qualified name replaces
    /// the earlier one in name lookups; the binder rejects such programs
    /// before they get here.
    pub fn add_class(
        &mut self,
        file: FileId,
        name: impl Into<String>,
        qualified_name: impl Into<String>,
        superclass_name: Option<String>,
    ) -> ClassId {
        let id = ClassId(next_id(self.classes.len()));
        let qualified_name = qualified_name.into();
        self.class_by_name.insert(qualified_name.clone(), id);
        self.classes.push(ClassData {
            file,
            name: name.into(),
            qualified_name,
            superclass_name,
            fields: Vec::new(),
            constructors: Vec::new(),
            methods: Vec::new(),
            name_span: Span::DUMMY,
            span: Span::DUMMY,
        });
        id
    }

    pub fn add_field(
        &mut self,
        class: ClassId,
        name: impl Into<String>,
        ty: impl Into<String>,
        is_static: bool,
        is_final: bool,
        has_initializer: bool,
    ) -> FieldId {
        let id = FieldId(next_id(self.fields.len()));
        self.fields.push(FieldData {
            class,
            name: name.into(),
            ty: ty.into(),
            is_static,
            is_final,
            has_initializer,
            span: Span::DUMMY,
        });
        if let Some(data) = self.classes.get_mut(class.index()) {
            data.fields.push(id);
        }
        id
    }

    /// Add a constructor. `class` is `None` for a detached constructor.
    pub fn add_constructor(&mut self, class: Option<ClassId>) -> ConstructorId {
        let id = ConstructorId(next_id(self.constructors.len()));
        self.constructors.push(ConstructorData {
            class,
            parameters: SmallVec::new(),
            body: Vec::new(),
            name_span: Span::DUMMY,
            span: Span::DUMMY,
        });
        if let Some(data) = class.and_then(|c| self.classes.get_mut(c.index())) {
            data.constructors.push(id);
        }
        id
    }

    pub fn add_parameter(
        &mut self,
        constructor: ConstructorId,
        name: impl Into<String>,
        ty: impl Into<String>,
    ) -> ParameterId {
        let id = ParameterId(next_id(self.parameters.len()));
        self.parameters.push(ParameterData {
            constructor,
            name: name.into(),
            ty: ty.into(),
            span: Span::DUMMY,
        });
        if let Some(data) = self.constructors.get_mut(constructor.index()) {
            data.parameters.push(id);
        }
        id
    }

    pub fn add_local(
        &mut self,
        constructor: ConstructorId,
        name: impl Into<String>,
        ty: impl Into<String>,
    ) -> LocalId {
        let id = LocalId(next_id(self.locals.len()));
        self.locals.push(LocalData {
            constructor,
            name: name.into(),
            ty: ty.into(),
            span: Span::DUMMY,
        });
        id
    }

    pub fn add_method(&mut self, class: ClassId, name: impl Into<String>) -> MethodId {
        let id = MethodId(next_id(self.methods.len()));
        self.methods.push(MethodData {
            class,
            name: name.into(),
            span: Span::DUMMY,
        });
        if let Some(data) = self.classes.get_mut(class.index()) {
            data.methods.push(id);
        }
        id
    }

    /// Add an unresolved name reference.
    pub fn add_reference(&mut self, name: impl Into<String>) -> RefId {
        let id = RefId(next_id(self.references.len()));
        self.references.push(ReferenceData { name: name.into() });
        self.resolutions.push(None);
        id
    }

    /// Record what a reference resolves to.
    pub fn bind_reference(&mut self, reference: RefId, declaration: Declaration) {
        if let Some(slot) = self.resolutions.get_mut(reference.index()) {
            *slot = Some(declaration);
        }
    }

    pub fn add_expr(&mut self, kind: Expression, span: Span) -> ExprId {
        let id = ExprId(next_id(self.exprs.len()));
        self.exprs.push(ExprNode { kind, span });
        id
    }

    pub fn add_stmt(&mut self, kind: Statement, span: Span) -> StmtId {
        let id = StmtId(next_id(self.stmts.len()));
        self.stmts.push(StmtNode { kind, span });
        id
    }

    pub fn set_body(&mut self, constructor: ConstructorId, body: Vec<StmtId>) {
        if let Some(data) = self.constructors.get_mut(constructor.index()) {
            data.body = body;
        }
    }

    // =========================================================================
    // Mutable access (construction only)
    // =========================================================================

    pub fn class_mut(&mut self, id: ClassId) -> Option<&mut ClassData> {
        self.classes.get_mut(id.index())
    }

    pub fn field_mut(&mut self, id: FieldId) -> Option<&mut FieldData> {
        self.fields.get_mut(id.index())
    }

    pub fn constructor_mut(&mut self, id: ConstructorId) -> Option<&mut ConstructorData> {
        self.constructors.get_mut(id.index())
    }

    pub fn parameter_mut(&mut self, id: ParameterId) -> Option<&mut ParameterData> {
        self.parameters.get_mut(id.index())
    }

    pub fn local_mut(&mut self, id: LocalId) -> Option<&mut LocalData> {
        self.locals.get_mut(id.index())
    }

    pub fn method_mut(&mut self, id: MethodId) -> Option<&mut MethodData> {
        self.methods.get_mut(id.index())
    }

    pub fn expr_mut(&mut self, id: ExprId) -> Option<&mut ExprNode> {
        self.exprs.get_mut(id.index())
    }

    pub fn stmt_mut(&mut self, id: StmtId) -> Option<&mut StmtNode> {
        self.stmts.get_mut(id.index())
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    pub fn file_name(&self, id: FileId) -> &str {
        self.files.get(id.index()).map_or("", String::as_str)
    }

    pub fn source_text(&self, id: FileId) -> Option<&str> {
        self.sources.get(id.index())?.as_deref()
    }

    pub fn files(&self) -> impl Iterator<Item = FileId> + '_ {
        (0..self.files.len()).map(|i| FileId(next_id(i)))
    }

    pub fn class(&self, id: ClassId) -> Option<&ClassData> {
        self.classes.get(id.index())
    }

    pub fn field(&self, id: FieldId) -> Option<&FieldData> {
        self.fields.get(id.index())
    }

    pub fn constructor(&self, id: ConstructorId) -> Option<&ConstructorData> {
        self.constructors.get(id.index())
    }

    pub fn parameter(&self, id: ParameterId) -> Option<&ParameterData> {
        self.parameters.get(id.index())
    }

    pub fn local(&self, id: LocalId) -> Option<&LocalData> {
        self.locals.get(id.index())
    }

    pub fn method(&self, id: MethodId) -> Option<&MethodData> {
        self.methods.get(id.index())
    }

    pub fn expr(&self, id: ExprId) -> Option<&ExprNode> {
        self.exprs.get(id.index())
    }

    pub fn stmt(&self, id: StmtId) -> Option<&StmtNode> {
        self.stmts.get(id.index())
    }

    pub fn reference(&self, id: RefId) -> Option<&ReferenceData> {
        self.references.get(id.index())
    }

    /// All classes in registration order.
    pub fn classes(&self) -> impl Iterator<Item = ClassId> + '_ {
        (0..self.classes.len()).map(|i| ClassId(next_id(i)))
    }

    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    pub fn lookup_class(&self, qualified_name: &str) -> Option<ClassId> {
        self.class_by_name.get(qualified_name).copied()
    }

    /// Find a class by simple name. Returns `None` when the name is ambiguous.
    pub fn lookup_class_by_simple_name(&self, name: &str) -> Option<ClassId> {
        let mut found = None;
        for (i, class) in self.classes.iter().enumerate() {
            if class.name == name {
                if found.is_some() {
                    return None;
                }
                found = Some(ClassId(next_id(i)));
            }
        }
        found
    }

    /// Resolve a type's canonical text to a declared class.
    pub fn class_of_type(&self, ty: &str) -> Option<ClassId> {
        self.lookup_class(ty)
    }

    /// Weak superclass reference, resolved by name lookup each time: the
    /// qualified name, then a class in the subclass's own package, then a
    /// unique simple name.
    pub fn superclass_of(&self, class: ClassId) -> Option<ClassId> {
        let data = self.class(class)?;
        let name = data.superclass_name.as_deref()?.trim();
        let same_package = || {
            let (package, _) = data.qualified_name.rsplit_once('.')?;
            self.lookup_class(&format!("{package}.{name}"))
        };
        self.lookup_class(name)
            .or_else(same_package)
            .or_else(|| self.lookup_class_by_simple_name(name))
            .filter(|&sup| sup != class)
    }

    /// `class` followed by its superclasses, nearest first. Stops at the
    /// first repeated class so cyclic `extends` chains terminate.
    pub fn ancestors(&self, class: ClassId) -> Vec<ClassId> {
        let mut chain = Vec::new();
        let mut seen = FxHashSet::default();
        let mut current = Some(class);
        while let Some(id) = current {
            if !seen.insert(id) || self.class(id).is_none() {
                break;
            }
            chain.push(id);
            current = self.superclass_of(id);
        }
        chain
    }

    pub fn is_subclass_of(&self, class: ClassId, ancestor: ClassId) -> bool {
        self.ancestors(class).contains(&ancestor)
    }

    /// Nearest field named `name` declared on `class` or a superclass.
    pub fn find_field_in_hierarchy(&self, class: ClassId, name: &str) -> Option<FieldId> {
        self.ancestors(class).into_iter().find_map(|id| {
            self.class(id)?
                .fields
                .iter()
                .copied()
                .find(|&f| self.field(f).is_some_and(|data| data.name == name))
        })
    }

    /// Nearest method named `name` declared on `class` or a superclass.
    pub fn find_method_in_hierarchy(&self, class: ClassId, name: &str) -> Option<MethodId> {
        self.ancestors(class).into_iter().find_map(|id| {
            self.class(id)?
                .methods
                .iter()
                .copied()
                .find(|&m| self.method(m).is_some_and(|data| data.name == name))
        })
    }

    /// File a constructor lives in, through its containing class.
    pub fn constructor_file(&self, constructor: ConstructorId) -> Option<FileId> {
        let class = self.constructor(constructor)?.class?;
        Some(self.class(class)?.file)
    }

    /// Display name of a constructor, e.g. `Point(geo.Point)`.
    pub fn constructor_signature(&self, constructor: ConstructorId) -> String {
        let Some(data) = self.constructor(constructor) else {
            return String::from("<constructor>");
        };
        let name = data
            .class
            .and_then(|c| self.class(c))
            .map_or("<anonymous>", |c| c.name.as_str());
        let params: Vec<&str> = data
            .parameters
            .iter()
            .filter_map(|&p| self.parameter(p))
            .map(|p| p.ty.as_str())
            .collect();
        format!("{name}({})", params.join(", "))
    }
}

impl ReferenceResolver for NodeArena {
    fn resolve(&self, reference: RefId) -> Option<Declaration> {
        self.resolutions.get(reference.index()).copied().flatten()
    }
}
