// Copyright 2025 the Swipestack Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Generational storage for the cards a stack owns.

use alloc::vec::Vec;

use swipestack_dynamics::{ItemLookup, ItemState};

use crate::card::Card;
use crate::types::CardId;

#[derive(Clone, Debug)]
struct Entry<T> {
    generation: u32,
    card: Card<T>,
}

/// Cards by [`CardId`]. Freed slots are reused with a bumped generation.
#[derive(Clone, Debug)]
pub(crate) struct Slots<T> {
    entries: Vec<Option<Entry<T>>>,
    generations: Vec<u32>,
    free_list: Vec<usize>,
}

impl<T> Slots<T> {
    pub(crate) fn new() -> Self {
        Self {
            entries: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
        }
    }

    /// Adopt `card`, assigning it a fresh id.
    pub(crate) fn insert(&mut self, mut card: Card<T>, original: bool) -> CardId {
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            (idx, generation)
        } else {
            self.entries.push(None);
            self.generations.push(1);
            (self.entries.len() - 1, 1)
        };
        let id = CardId::new(idx, generation);
        card.adopt(id, original);
        self.entries[idx] = Some(Entry { generation, card });
        id
    }

    pub(crate) fn remove(&mut self, id: CardId) -> Option<Card<T>> {
        self.get(id)?;
        let entry = self.entries[id.idx()].take()?;
        self.free_list.push(id.idx());
        Some(entry.card)
    }

    pub(crate) fn get(&self, id: CardId) -> Option<&Card<T>> {
        let entry = self.entries.get(id.idx())?.as_ref()?;
        (entry.generation == id.generation()).then_some(&entry.card)
    }

    pub(crate) fn get_mut(&mut self, id: CardId) -> Option<&mut Card<T>> {
        let entry = self.entries.get_mut(id.idx())?.as_mut()?;
        if entry.generation != id.generation() {
            return None;
        }
        Some(&mut entry.card)
    }

    pub(crate) fn ids(&self) -> Vec<CardId> {
        self.iter().map(Card::id).collect()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &Card<T>> + '_ {
        self.entries.iter().flatten().map(|e| &e.card)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len() - self.free_list.len()
    }
}

impl<T> ItemLookup<CardId> for Slots<T> {
    fn item_mut(&mut self, key: &CardId) -> Option<&mut ItemState> {
        self.get_mut(*key).map(Card::item_mut)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stale_ids_do_not_alias() {
        let mut slots = Slots::new();
        let a = slots.insert(Card::new('a'), true);
        assert_eq!(slots.get(a).map(|c| *c.content()), Some('a'));
        assert_eq!(slots.remove(a).map(Card::into_content), Some('a'));
        assert!(slots.remove(a).is_none());

        let b = slots.insert(Card::new('b'), false);
        assert_ne!(a, b);
        assert!(slots.get(a).is_none());
        assert!(slots.item_mut(&a).is_none());
        assert!(slots.item_mut(&b).is_some());
        assert_eq!(slots.len(), 1);
    }

    #[test]
    fn insert_assigns_identity_and_origin() {
        let mut slots = Slots::new();
        let a = slots.insert(Card::new(()), true);
        let b = slots.insert(Card::new(()), false);
        assert_eq!(slots.get(a).map(Card::id), Some(a));
        assert_eq!(slots.get(a).map(Card::is_original), Some(true));
        assert_eq!(slots.get(b).map(Card::is_original), Some(false));
        assert_eq!(slots.ids(), [a, b]);
    }
}
