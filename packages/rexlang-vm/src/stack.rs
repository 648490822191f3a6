//! Fixed-capacity downward-growing operand stack.
//!
//! `sp == STACK_CAPACITY` means empty, `sp == 0` means full. Slot `sp` is the
//! top of stack; deeper entries sit at higher indices.

use crate::config::STACK_CAPACITY;
use crate::error::Fault;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperandStack {
    slots: [u32; STACK_CAPACITY],
    sp: usize,
}

impl OperandStack {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slots: [0; STACK_CAPACITY],
            sp: STACK_CAPACITY,
        }
    }

    #[must_use]
    pub const fn sp(&self) -> usize {
        self.sp
    }

    /// Number of words currently on the stack.
    #[must_use]
    pub const fn depth(&self) -> usize {
        STACK_CAPACITY - self.sp
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.sp >= STACK_CAPACITY
    }

    #[must_use]
    pub const fn is_full(&self) -> bool {
        self.sp == 0
    }

    pub fn push(&mut self, value: u32) -> Result<(), Fault> {
        if self.sp == 0 {
            return Err(Fault::StackFull);
        }
        self.sp -= 1;
        self.slots[self.sp] = value;
        Ok(())
    }

    pub fn pop(&mut self) -> Result<u32, Fault> {
        if self.sp >= STACK_CAPACITY {
            return Err(Fault::StackEmpty);
        }
        let value = self.slots[self.sp];
        self.sp += 1;
        Ok(value)
    }

    /// Read the word `depth` entries below the top without popping (0 = top).
    pub fn peek(&self, depth: usize) -> Result<u32, Fault> {
        self.slots
            .get(self.sp.saturating_add(depth))
            .copied()
            .ok_or(Fault::StackEmpty)
    }

    pub fn clear(&mut self) {
        self.slots = [0; STACK_CAPACITY];
        self.sp = STACK_CAPACITY;
    }

    /// Live entries, top of stack first.
    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        self.slots[self.sp..].iter().copied()
    }
}

impl Default for OperandStack {
    fn default() -> Self {
        Self::new()
    }
}
