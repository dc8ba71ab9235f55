use std::cell::Cell;

/// Image the gallery switches to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GalleryImage {
    pub src: String,
    pub alt: String,
}

/// Active flag for every thumbnail once `chosen` is activated.
pub fn thumb_flags<T: PartialEq>(thumbs: &[T], chosen: &T) -> Vec<bool> {
    thumbs.iter().map(|thumb| thumb == chosen).collect()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapTicket(u64);

/// Orders deferred image swaps so that only the latest one lands.
///
/// Every switch starts a fade immediately and schedules its swap after the
/// fade delay; a swap whose ticket is no longer current is dropped.
#[derive(Debug, Default)]
pub struct SwapSequencer {
    generation: Cell<u64>,
}

impl SwapSequencer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> SwapTicket {
        let next = self.generation.get().wrapping_add(1);
        self.generation.set(next);
        SwapTicket(next)
    }

    pub fn is_current(&self, ticket: SwapTicket) -> bool {
        self.generation.get() == ticket.0
    }
}
