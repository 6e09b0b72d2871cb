//! Fields a copy constructor is expected to copy.

use copyck_model::{ClassId, FieldData, FieldId, NodeArena};

/// Static fields are never copied; final fields that already carry an
/// initializer cannot be reassigned.
pub fn is_copyable_field(field: &FieldData) -> bool {
    !field.is_static && (!field.is_final || !field.has_initializer)
}

/// Copyable fields declared directly on `class`, in declaration order.
pub fn copyable_fields(arena: &NodeArena, class: ClassId) -> Vec<FieldId> {
    let Some(data) = arena.class(class) else {
        return Vec::new();
    };
    data.fields
        .iter()
        .copied()
        .filter(|&field| arena.field(field).is_some_and(is_copyable_field))
        .collect()
}
