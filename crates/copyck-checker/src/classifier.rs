//! Copy-constructor detection.
//!
//! A constructor is a copy constructor iff it has exactly one parameter and
//! that parameter's canonical type text equals the qualified name of the
//! class declaring the constructor.

use copyck_model::{ClassId, ConstructorId, NodeArena, ParameterId};

pub fn is_copy_constructor(arena: &NodeArena, constructor: ConstructorId) -> bool {
    copy_parameter(arena, constructor).is_some()
}

/// The sole parameter of a copy constructor; `None` if `constructor` is not
/// one (including detached constructors without a containing class).
pub fn copy_parameter(arena: &NodeArena, constructor: ConstructorId) -> Option<ParameterId> {
    let data = arena.constructor(constructor)?;
    let class = arena.class(data.class?)?;
    let [param] = data.parameters.as_slice() else {
        return None;
    };
    let ty = &arena.parameter(*param)?.ty;
    (*ty == class.qualified_name).then_some(*param)
}

/// First copy constructor declared by `class`, in declaration order.
pub fn find_copy_constructor(arena: &NodeArena, class: Option<ClassId>) -> Option<ConstructorId> {
    arena
        .class(class?)?
        .constructors
        .iter()
        .copied()
        .find(|&ctor| is_copy_constructor(arena, ctor))
}

pub fn has_copy_constructor(arena: &NodeArena, class: Option<ClassId>) -> bool {
    find_copy_constructor(arena, class).is_some()
}
