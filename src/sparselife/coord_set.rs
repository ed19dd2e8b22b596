//! Reusable coordinate deduper for birth-candidate probing.
//!
//! An open-addressed linear-probing hash set for `Coord` keys. Slots are
//! lazily cleared with an epoch stamp, so each generation can start a fresh
//! set without touching the full backing array. Probing starts from
//! `Coord::mix`, the same hash the live set uses.

use super::coord::Coord;

const LOAD_NUM: usize = 3;
const LOAD_DEN: usize = 4;
const MIN_SLOTS: usize = 16;

#[derive(Clone, Copy)]
struct Slot {
    key: Coord,
    stamp: u32,
}

impl Slot {
    const EMPTY: Self = Self {
        key: Coord::new(0, 0),
        stamp: 0,
    };
}

#[inline]
fn slots_for(keys: usize) -> usize {
    keys.saturating_mul(LOAD_DEN)
        .div_ceil(LOAD_NUM)
        .next_power_of_two()
        .max(MIN_SLOTS)
}

pub struct CoordSet {
    slots: Vec<Slot>,
    mask: usize,
    stamp: u32,
    len: usize,
}

impl Default for CoordSet {
    fn default() -> Self {
        Self::new()
    }
}

impl CoordSet {
    pub fn new() -> Self {
        Self::with_capacity(256)
    }

    pub fn with_capacity(cap: usize) -> Self {
        let slots = slots_for(cap);
        Self {
            slots: vec![Slot::EMPTY; slots],
            mask: slots - 1,
            stamp: 1,
            len: 0,
        }
    }

    /// Forget every key in O(1) by bumping the epoch stamp.
    #[inline]
    pub fn begin_step(&mut self) {
        self.len = 0;
        self.stamp = self.stamp.wrapping_add(1);
        if self.stamp == 0 {
            self.stamp = 1;
            for slot in &mut self.slots {
                slot.stamp = 0;
            }
        }
    }

    #[inline]
    pub fn reserve_for(&mut self, keys: usize) {
        if keys == 0 {
            return;
        }
        let needed = slots_for(keys);
        if needed > self.slots.len() {
            self.resize(needed);
        }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Drop every key and give back slots beyond what `keys` needs.
    pub fn shrink_to(&mut self, keys: usize) {
        let target = slots_for(keys);
        if target < self.slots.len() {
            self.slots = vec![Slot::EMPTY; target];
            self.mask = target - 1;
            self.stamp = 1;
            self.len = 0;
        } else {
            self.begin_step();
        }
    }

    #[inline(always)]
    fn needs_grow(&self) -> bool {
        self.len * LOAD_DEN >= self.slots.len() * LOAD_NUM
    }

    fn resize(&mut self, new_slots: usize) {
        debug_assert!(new_slots.is_power_of_two());
        let old_slots = std::mem::replace(&mut self.slots, vec![Slot::EMPTY; new_slots]);
        self.mask = new_slots - 1;
        self.len = 0;

        for slot in old_slots {
            if slot.stamp == self.stamp {
                self.insert_rehash(slot.key);
            }
        }
    }

    #[inline(always)]
    fn insert_rehash(&mut self, key: Coord) {
        let mut pos = key.mix() as usize & self.mask;
        loop {
            let slot = &mut self.slots[pos];
            if slot.stamp != self.stamp {
                *slot = Slot {
                    key,
                    stamp: self.stamp,
                };
                self.len += 1;
                return;
            }
            pos = (pos + 1) & self.mask;
        }
    }

    /// Insert a coordinate.
    /// Returns `true` if newly inserted, `false` if it already existed.
    #[inline]
    pub fn insert(&mut self, key: Coord) -> bool {
        if self.needs_grow() {
            self.resize((self.slots.len() * 2).max(MIN_SLOTS));
        }

        let mut pos = key.mix() as usize & self.mask;
        loop {
            let slot = &mut self.slots[pos];
            if slot.stamp != self.stamp {
                *slot = Slot {
                    key,
                    stamp: self.stamp,
                };
                self.len += 1;
                return true;
            }
            if slot.key == key {
                return false;
            }
            pos = (pos + 1) & self.mask;
        }
    }
}
