//! Copy constructors must chain to the superclass copy constructor.

use copyck_common::diagnostics::{diagnostic_codes, diagnostic_messages, format_message};
use copyck_common::Diagnostic;
use copyck_model::ConstructorId;
use tracing::debug;

use crate::chain_call::find_explicit_constructor_call;
use crate::classifier::{find_copy_constructor, is_copy_constructor};
use crate::context::CheckerContext;
use crate::sink::DiagnosticSink;

/// Report `constructor` if it is a copy constructor, its superclass has a
/// copy constructor, and its first statement does not call that one.
///
/// Returns whether a diagnostic was reported.
pub fn check_superclass_chain(
    ctx: CheckerContext<'_>,
    constructor: ConstructorId,
    sink: &mut dyn DiagnosticSink,
) -> bool {
    if !is_copy_constructor(ctx.arena, constructor) {
        return false;
    }
    let Some(data) = ctx.arena.constructor(constructor) else {
        return false;
    };
    let superclass = data.class.and_then(|class| ctx.arena.superclass_of(class));
    let Some(super_copy) = find_copy_constructor(ctx.arena, superclass) else {
        return false;
    };

    let called = find_explicit_constructor_call(&ctx, constructor);
    debug!(
        constructor = %ctx.arena.constructor_signature(constructor),
        ?called,
        ?super_copy,
        "superclass chain checked"
    );
    if called == Some(super_copy) {
        return false;
    }

    let mut diagnostic = Diagnostic::from_code(
        ctx.file_of(constructor),
        data.name_span,
        diagnostic_codes::COPY_CONSTRUCTOR_DOES_NOT_CALL_COPY_CONSTRUCTOR_OF_SUPERCLASS,
        &[],
    );
    if let Some(target) = ctx.arena.constructor(super_copy) {
        let signature = ctx.arena.constructor_signature(super_copy);
        diagnostic = diagnostic.with_related(
            ctx.file_of(super_copy),
            target.name_span,
            format_message(
                diagnostic_messages::SUPERCLASS_COPY_CONSTRUCTOR_IS_DECLARED_HERE,
                &[signature.as_str()],
            ),
        );
    }
    sink.report(diagnostic);
    true
}
