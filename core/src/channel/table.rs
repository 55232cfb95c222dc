//! channel/table.rs
//! Fixed registry of channels addressed by small integer ids.

use crate::channel::{ChannelError, ChannelKind, InputChannel, OutputChannel};

/// Ordered, fixed-size sequence of channel slots `0..len()`.
/// Populated once at construction; no slot is ever empty and none is added later.
#[derive(Debug)]
pub struct ChannelTable<C> {
    kind: ChannelKind,
    slots: Vec<C>,
}

impl<C> ChannelTable<C> {
    pub fn new(kind: ChannelKind, slots: Vec<C>) -> Self {
        Self { kind, slots }
    }

    pub fn kind(&self) -> ChannelKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Validate `id` against the table size.
    #[inline]
    pub fn check(&self, id: u32) -> Result<usize, ChannelError> {
        let index = id as usize;
        if index >= self.slots.len() {
            return Err(ChannelError::UnknownChannel { kind: self.kind, id, len: self.slots.len() });
        }
        Ok(index)
    }

    #[inline]
    pub fn get(&self, id: u32) -> Result<&C, ChannelError> {
        let index = self.check(id)?;
        Ok(&self.slots[index])
    }

    #[inline]
    pub fn get_mut(&mut self, id: u32) -> Result<&mut C, ChannelError> {
        let index = self.check(id)?;
        Ok(&mut self.slots[index])
    }

    pub fn iter(&self) -> impl Iterator<Item = &C> {
        self.slots.iter()
    }
}

impl ChannelTable<InputChannel> {
    pub fn inputs(slots: Vec<InputChannel>) -> Self {
        Self::new(ChannelKind::Input, slots)
    }

    pub fn input_at(&mut self, id: u32) -> Result<&mut InputChannel, ChannelError> {
        self.get_mut(id)
    }

    pub fn close_all(&mut self) {
        self.slots.iter_mut().for_each(InputChannel::close);
    }
}

impl ChannelTable<OutputChannel> {
    pub fn outputs(slots: Vec<OutputChannel>) -> Self {
        Self::new(ChannelKind::Output, slots)
    }

    pub fn output_at(&mut self, id: u32) -> Result<&mut OutputChannel, ChannelError> {
        self.get_mut(id)
    }

    pub fn close_all(&mut self) {
        self.slots.iter_mut().for_each(OutputChannel::close);
    }
}
