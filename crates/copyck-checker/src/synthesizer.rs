//! Copy-constructor source generation.
//!
//! Purely templated: the superclass copy constructor is invoked first when
//! one exists, then every copyable field is assigned from the parameter in
//! declaration order.

use std::fmt::Write as _;

use copyck_model::{ClassId, ConstructorId, NodeArena};

use crate::classifier::{find_copy_constructor, has_copy_constructor};
use crate::field_catalog::copyable_fields;

/// Default name of the generated constructor's parameter.
pub const DEFAULT_PARAMETER_NAME: &str = "other";

/// Host service that places generated text into a class. Fire-and-forget.
pub trait TextInserter {
    fn insert(&mut self, class: ClassId, text: &str);
}

impl TextInserter for Vec<(ClassId, String)> {
    fn insert(&mut self, class: ClassId, text: &str) {
        self.push((class, text.to_string()));
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Synthesis {
    /// Source text of the new constructor.
    Generated(String),
    /// The class already declares a copy constructor; nothing is generated.
    AlreadyExists(ConstructorId),
    /// The class id does not exist in the arena.
    UnknownClass,
}

pub struct ConstructorSynthesizer<'a> {
    arena: &'a NodeArena,
    parameter_name: String,
    indent: String,
}

impl<'a> ConstructorSynthesizer<'a> {
    pub fn new(arena: &'a NodeArena) -> Self {
        ConstructorSynthesizer {
            arena,
            parameter_name: DEFAULT_PARAMETER_NAME.to_string(),
            indent: "    ".to_string(),
        }
    }

    #[must_use]
    pub fn with_parameter_name(mut self, name: impl Into<String>) -> Self {
        self.parameter_name = name.into();
        self
    }

    #[must_use]
    pub fn with_indent(mut self, indent: impl Into<String>) -> Self {
        self.indent = indent.into();
        self
    }

    pub fn synthesize(&self, class: ClassId) -> Synthesis {
        let Some(data) = self.arena.class(class) else {
            return Synthesis::UnknownClass;
        };
        if let Some(existing) = find_copy_constructor(self.arena, Some(class)) {
            return Synthesis::AlreadyExists(existing);
        }

        let param = &self.parameter_name;
        let indent = &self.indent;
        let mut code = String::new();
        let _ = writeln!(code, "public {0}({0} {param}) {{", data.name);
        if has_copy_constructor(self.arena, self.arena.superclass_of(class)) {
            let _ = writeln!(code, "{indent}super({param});");
        }
        for field in copyable_fields(self.arena, class) {
            let Some(field) = self.arena.field(field) else {
                continue;
            };
            let name = &field.name;
            let _ = writeln!(code, "{indent}this.{name} = {param}.{name};");
        }
        code.push('}');
        Synthesis::Generated(code)
    }

    /// Generate and hand the text to `inserter`. Returns the synthesis
    /// outcome so callers can tell the user why nothing was inserted.
    pub fn generate_into(&self, class: ClassId, inserter: &mut dyn TextInserter) -> Synthesis {
        let synthesis = self.synthesize(class);
        if let Synthesis::Generated(text) = &synthesis {
            inserter.insert(class, text);
        }
        synthesis
    }
}
