//! Value object trait: equality by value, not identity.

/// Marker trait for value objects.
///
/// Value objects carry no identity and are compared by their attributes. Two
/// [`crate::Email`] values built from `"A@x.com"` and `"a@x.com"` are the same
/// value, while two users with the same email are still distinct entities.
///
/// Implementors are immutable once constructed; "changing" one means building
/// a new value through its validating constructor.
pub trait ValueObject: Clone + PartialEq + core::fmt::Debug {}
