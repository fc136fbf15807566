//! Entity trait: identity + continuity across state changes.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Clone + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> &Self::Id;
}

/// Returns the first identifier that occurs more than once in `entities`.
///
/// Collections keyed by entity identity (e.g. a cart keyed by product) use this
/// to validate data coming from outside the domain.
pub fn first_duplicate_id<'a, E, I>(entities: I) -> Option<E::Id>
where
    E: Entity + 'a,
    I: IntoIterator<Item = &'a E>,
{
    let mut seen = std::collections::HashSet::new();
    entities
        .into_iter()
        .map(|entity| entity.id())
        .find(|id| !seen.insert(*id))
        .cloned()
}
