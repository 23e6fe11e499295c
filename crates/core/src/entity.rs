//! Entity trait: identity across catalog reloads.

/// Entity marker + minimal interface.
pub trait Entity {
    /// Strongly-typed entity identifier.
    type Id: Copy + Eq + core::hash::Hash + core::fmt::Debug;

    /// Returns the entity identifier.
    fn id(&self) -> Self::Id;
}

/// Look up an entity by identifier in a loaded list.
pub fn find_by_id<T: Entity>(items: &[T], id: T::Id) -> Option<&T> {
    items.iter().find(|item| item.id() == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Row(u8);

    impl Entity for Row {
        type Id = u8;

        fn id(&self) -> u8 {
            self.0
        }
    }

    #[test]
    fn find_by_id_returns_first_match() {
        let rows = vec![Row(1), Row(2), Row(3)];
        assert_eq!(find_by_id(&rows, 2).map(|r| r.0), Some(2));
        assert!(find_by_id(&rows, 9).is_none());
    }
}
