/// Hands out sequential slot ids for one timetable.
///
/// Each solve context owns its own allocator, so ids never leak between
/// problem instances.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: usize,
}

impl IdAllocator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts numbering at `first`.
    pub fn starting_at(first: usize) -> Self {
        Self { next: first }
    }

    pub fn next_id(&mut self) -> usize {
        let id = self.next;
        self.next += 1;
        id
    }

    /// Returns the id the next call to `next_id` will yield.
    pub fn peek(&self) -> usize {
        self.next
    }
}
