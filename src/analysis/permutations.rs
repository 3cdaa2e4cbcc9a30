//! Cartesian product over the releases of each required encoder

use std::collections::HashMap;

use crate::catalog::{AuxiliaryId, AuxiliaryRelease};

/// Lazily yields one release per required encoder id
///
/// The state is a tuple of indices advanced like an odometer, rightmost
/// slot fastest. A required id without releases empties the product; no
/// required ids yield exactly one empty tuple.
#[derive(Debug, Clone)]
pub struct AuxiliaryPermutations<'i, 'a> {
    slots: Vec<&'i [&'a AuxiliaryRelease]>,
    cursor: Option<Vec<usize>>,
}

impl<'i, 'a> AuxiliaryPermutations<'i, 'a> {
    pub fn new(
        required_ids: &[AuxiliaryId],
        releases_by_encoder_id: &'i HashMap<AuxiliaryId, Vec<&'a AuxiliaryRelease>>,
    ) -> Self {
        let slots: Vec<&'i [&'a AuxiliaryRelease]> = required_ids
            .iter()
            .map(|id| {
                releases_by_encoder_id
                    .get(id)
                    .map(Vec::as_slice)
                    .unwrap_or(&[])
            })
            .collect();

        let cursor = if slots.iter().any(|s| s.is_empty()) {
            None
        } else {
            Some(vec![0; slots.len()])
        };

        Self { slots, cursor }
    }

    /// Number of tuples the product contains
    pub fn total(&self) -> usize {
        self.slots.iter().map(|s| s.len()).product()
    }

    fn advance(&mut self) {
        let Some(cursor) = self.cursor.as_mut() else {
            return;
        };
        for slot in (0..cursor.len()).rev() {
            cursor[slot] += 1;
            if cursor[slot] < self.slots[slot].len() {
                return;
            }
            cursor[slot] = 0;
        }
        // Every slot wrapped around, including the zero-slot case
        self.cursor = None;
    }
}

impl<'i, 'a> Iterator for AuxiliaryPermutations<'i, 'a> {
    type Item = Vec<&'a AuxiliaryRelease>;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor.as_ref()?;
        let tuple = cursor
            .iter()
            .zip(&self.slots)
            .map(|(&i, slot)| slot[i])
            .collect();
        self.advance();
        Some(tuple)
    }
}
