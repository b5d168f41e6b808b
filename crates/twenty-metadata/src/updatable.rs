//! Which fields a client may write on update.
//!
//! The code generator (setter emission) and the runtime update payload
//! both call [`is_updatable_field`]; neither re-implements the rule.

/// Audit fields the server owns.
pub const AUDIT_FIELDS: [&str; 4] = ["createdAt", "updatedAt", "deletedAt", "createdBy"];

/// A field is updatable unless it is a system field or an audit field.
pub fn is_updatable_field(name: &str, is_system: bool) -> bool {
    !is_system && !AUDIT_FIELDS.contains(&name)
}
