//! Centralized recursion limits for the checker and binder.
//!
//! Both the provenance analysis and the body traversal recurse over
//! host-supplied trees. These limits keep pathological inputs from
//! overflowing the stack; when one is hit the affected subtree is treated as
//! "no match" and analysis continues.

/// Maximum expression nesting depth the provenance analysis descends into.
///
/// ```java
/// // Deeply nested wrappers:
/// this.x = ((((((((((other.x)))))))))); // ... 500 levels ...
///
/// // Deeply nested calls:
/// this.x = f(f(f(f(f(other.x)))));
/// ```
pub const MAX_EXPR_CHECK_DEPTH: u32 = 500;

/// Maximum statement nesting depth visited when collecting assignments
/// inside a constructor body.
///
/// ```java
/// { { { { { this.x = other.x; } } } } } // ... 500 levels ...
/// ```
pub const MAX_AST_DEPTH: u32 = 500;
