//! Typed indices into the [`NodeArena`](crate::NodeArena).

use serde::Serialize;

macro_rules! arena_index {
    ($($(#[$meta:meta])* $name:ident),+ $(,)?) => {
        $(
            $(#[$meta])*
            #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
            pub struct $name(pub u32);

            impl $name {
                #[inline]
                #[must_use]
                pub const fn index(self) -> usize {
                    self.0 as usize
                }
            }
        )+
    };
}

arena_index!(
    /// A source file registered with the arena.
    FileId,
    /// A class declaration.
    ClassId,
    /// A field declaration. Identity is the declaration, never the name.
    FieldId,
    /// A constructor declaration.
    ConstructorId,
    /// A constructor parameter.
    ParameterId,
    /// A local variable declared inside a constructor body.
    LocalId,
    /// A method declaration (only its name is modelled).
    MethodId,
    /// An expression node.
    ExprId,
    /// A statement node.
    StmtId,
    /// A name reference awaiting resolution.
    RefId,
);

/// What a reference resolves to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Declaration {
    Class(ClassId),
    Field(FieldId),
    Parameter(ParameterId),
    Constructor(ConstructorId),
    Method(MethodId),
    Local(LocalId),
}

impl Declaration {
    #[must_use]
    pub const fn as_field(self) -> Option<FieldId> {
        match self {
            Declaration::Field(id) => Some(id),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_constructor(self) -> Option<ConstructorId> {
        match self {
            Declaration::Constructor(id) => Some(id),
            _ => None,
        }
    }

    /// True for declarations that denote a value binding (the things a
    /// qualifier can evaluate to).
    #[must_use]
    pub const fn is_variable(self) -> bool {
        matches!(
            self,
            Declaration::Field(_) | Declaration::Parameter(_) | Declaration::Local(_)
        )
    }
}
