//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
///
/// Ledger records implement this so a single ordered collection type can
/// index them by identifier and enforce name uniqueness.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug + core::fmt::Display;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;

    /// Unique display name, if the entity has one.
    fn name(&self) -> Option<&str> {
        None
    }
}
