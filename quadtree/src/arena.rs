use crate::error::{QuadtreeError, QuadtreeResult};
use smallvec::SmallVec;
use std::fmt;

const MIN_GROWTH: usize = 16;
const STACK_INLINE: usize = 64;

#[derive(Clone)]
enum Slot<T> {
    Occupied(T),
    Free { next: Option<u32> },
}

/// Index-addressed slot store. Indices stay valid across growth; erased slots
/// are threaded into a LIFO free chain and handed out again by `insert`.
///
/// `len` counts live slots, `high_water_mark` counts every slot ever pushed.
#[derive(Clone)]
pub struct Arena<T> {
    slots: Vec<Slot<T>>,
    free_head: Option<u32>,
    live: usize,
}

impl<T> Arena<T> {
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free_head: None,
            live: 0,
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free_head: None,
            live: 0,
        }
    }

    /// Stores `value` in the most recently freed slot, or in a new slot at the end.
    pub fn insert(&mut self, value: T) -> u32 {
        self.live += 1;
        if let Some(index) = self.free_head {
            let slot = &mut self.slots[index as usize];
            self.free_head = match *slot {
                Slot::Free { next } => next,
                Slot::Occupied(_) => unreachable!("free chain points at occupied slot {}", index),
            };
            *slot = Slot::Occupied(value);
            return index;
        }

        self.grow_if_full();
        let index = self.slots.len() as u32;
        self.slots.push(Slot::Occupied(value));
        index
    }

    pub fn insert_default(&mut self) -> u32
    where
        T: Default,
    {
        self.insert(T::default())
    }

    /// Frees the slot and returns its value. Erasing a free slot is an error.
    pub fn erase(&mut self, index: u32) -> QuadtreeResult<T> {
        let len = self.slots.len() as u32;
        let slot = self
            .slots
            .get_mut(index as usize)
            .ok_or(QuadtreeError::IndexOutOfBounds { index, len })?;
        match std::mem::replace(slot, Slot::Free { next: self.free_head }) {
            Slot::Occupied(value) => {
                self.free_head = Some(index);
                self.live -= 1;
                Ok(value)
            }
            vacant @ Slot::Free { .. } => {
                *slot = vacant;
                Err(QuadtreeError::VacantSlot { index })
            }
        }
    }

    pub fn get(&self, index: u32) -> QuadtreeResult<&T> {
        match self.slots.get(index as usize) {
            Some(Slot::Occupied(value)) => Ok(value),
            Some(Slot::Free { .. }) => Err(QuadtreeError::VacantSlot { index }),
            None => Err(QuadtreeError::IndexOutOfBounds {
                index,
                len: self.slots.len() as u32,
            }),
        }
    }

    pub fn get_mut(&mut self, index: u32) -> QuadtreeResult<&mut T> {
        let len = self.slots.len() as u32;
        match self.slots.get_mut(index as usize) {
            Some(Slot::Occupied(value)) => Ok(value),
            Some(Slot::Free { .. }) => Err(QuadtreeError::VacantSlot { index }),
            None => Err(QuadtreeError::IndexOutOfBounds { index, len }),
        }
    }

    /// Checked access that panics on a bad index. Meant for indices the caller
    /// obtained from its own bookkeeping.
    #[inline]
    pub fn at(&self, index: u32) -> &T {
        match self.get(index) {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }

    #[inline]
    pub fn at_mut(&mut self, index: u32) -> &mut T {
        match self.get_mut(index) {
            Ok(value) => value,
            Err(err) => panic!("{}", err),
        }
    }

    /// # Safety
    ///
    /// `index` must refer to an occupied slot below `high_water_mark()`.
    #[inline(always)]
    pub unsafe fn get_unchecked(&self, index: u32) -> &T {
        match self.slots.get_unchecked(index as usize) {
            Slot::Occupied(value) => value,
            Slot::Free { .. } => std::hint::unreachable_unchecked(),
        }
    }

    /// # Safety
    ///
    /// `index` must refer to an occupied slot below `high_water_mark()`.
    #[inline(always)]
    pub unsafe fn get_unchecked_mut(&mut self, index: u32) -> &mut T {
        match self.slots.get_unchecked_mut(index as usize) {
            Slot::Occupied(value) => value,
            Slot::Free { .. } => std::hint::unreachable_unchecked(),
        }
    }

    pub fn is_occupied(&self, index: u32) -> bool {
        matches!(self.slots.get(index as usize), Some(Slot::Occupied(_)))
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    pub fn high_water_mark(&self) -> usize {
        self.slots.len()
    }

    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }

    pub fn reserve(&mut self, additional: usize) {
        self.slots.reserve(additional);
    }

    /// Drops every value and forgets the free chain. Capacity is kept.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
        self.live = 0;
    }

    pub fn iter(&self) -> impl Iterator<Item = (u32, &T)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| match slot {
                Slot::Occupied(value) => Some((index as u32, value)),
                Slot::Free { .. } => None,
            })
    }

    fn grow_if_full(&mut self) {
        let capacity = self.slots.capacity();
        if self.slots.len() < capacity {
            return;
        }
        let additional = capacity.max(MIN_GROWTH);
        self.slots.reserve_exact(additional);
        log::trace!(
            "arena grew from {} to {} slots",
            capacity,
            self.slots.capacity()
        );
    }
}

impl<T> Default for Arena<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Arena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Arena")
            .field("len", &self.live)
            .field("high_water_mark", &self.slots.len())
            .field("capacity", &self.slots.capacity())
            .field("free_head", &self.free_head)
            .finish()
    }
}

// Renders the slot table, free slots as `_`.
impl<T: fmt::Display> fmt::Display for Arena<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (index, slot) in self.slots.iter().enumerate() {
            let sep = if index == 0 { " " } else { ", " };
            match slot {
                Slot::Occupied(value) => write!(f, "{}{}", sep, value)?,
                Slot::Free { .. } => write!(f, "{}_", sep)?,
            }
        }
        write!(f, " }}")
    }
}

/// Push/pop scratch storage for traversals. Lives inline until it outgrows
/// `STACK_INLINE` entries, then moves to the heap once.
pub struct Stack<T> {
    items: SmallVec<[T; STACK_INLINE]>,
}

impl<T> Stack<T> {
    pub fn new() -> Self {
        Self {
            items: SmallVec::new(),
        }
    }

    #[inline(always)]
    pub fn push(&mut self, value: T) {
        self.items.push(value);
    }

    #[inline(always)]
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop()
    }

    pub fn top(&self) -> Option<&T> {
        self.items.last()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    /// True once the stack has moved off its inline buffer.
    pub fn spilled(&self) -> bool {
        self.items.spilled()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Stack<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.items.iter()).finish()
    }
}
