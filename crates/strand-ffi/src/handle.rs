//! Opaque `u64` handles for values owned on the Rust side of the boundary.
//!
//! The upper 32 bits hold the slot index plus one, the lower 32 bits the
//! slot's generation. The bias keeps every issued handle nonzero, so a C
//! caller passing `0` for "no handle" never reaches a live value.
//!
//! Removing a value bumps its slot's generation. A slot whose generation
//! would overflow is retired instead of reused.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Handle {
    slot: u32,
    generation: u32,
}

impl Handle {
    fn to_raw(self) -> u64 {
        ((u64::from(self.slot) + 1) << 32) | u64::from(self.generation)
    }

    fn from_raw(raw: u64) -> Option<Self> {
        let biased = (raw >> 32) as u32;
        Some(Self {
            slot: biased.checked_sub(1)?,
            generation: raw as u32,
        })
    }
}

struct Entry<T> {
    generation: u32,
    value: Option<T>,
}

/// Owned values addressed by generation-checked `u64` handles.
pub(crate) struct HandleTable<T> {
    entries: Vec<Entry<T>>,
    vacant: Vec<u32>,
    live: usize,
}

impl<T> HandleTable<T> {
    /// An empty table. `const` so tables can live in `static Mutex`es.
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
            vacant: Vec::new(),
            live: 0,
        }
    }

    /// Take ownership of `value` and return its handle, which is never 0.
    ///
    /// Hands `value` back only when every addressable slot is in use or
    /// retired.
    pub(crate) fn insert(&mut self, value: T) -> Result<u64, T> {
        let handle = match self.vacant.pop() {
            Some(slot) => {
                let entry = &mut self.entries[slot as usize];
                entry.value = Some(value);
                Handle {
                    slot,
                    generation: entry.generation,
                }
            }
            None => {
                // The slot index must leave room for the +1 bias.
                let Some(slot) = u32::try_from(self.entries.len())
                    .ok()
                    .filter(|&s| s < u32::MAX)
                else {
                    return Err(value);
                };
                self.entries.push(Entry {
                    generation: 0,
                    value: Some(value),
                });
                Handle {
                    slot,
                    generation: 0,
                }
            }
        };
        self.live += 1;
        Ok(handle.to_raw())
    }

    /// Index of the live entry `raw` refers to, if any.
    fn slot_of(&self, raw: u64) -> Option<usize> {
        let handle = Handle::from_raw(raw)?;
        let entry = self.entries.get(handle.slot as usize)?;
        (entry.generation == handle.generation && entry.value.is_some())
            .then_some(handle.slot as usize)
    }

    pub(crate) fn get(&self, raw: u64) -> Option<&T> {
        let slot = self.slot_of(raw)?;
        self.entries[slot].value.as_ref()
    }

    /// Whether `raw` currently refers to a value.
    pub(crate) fn contains(&self, raw: u64) -> bool {
        self.slot_of(raw).is_some()
    }

    /// Take the value out, invalidating `raw`.
    pub(crate) fn remove(&mut self, raw: u64) -> Option<T> {
        let slot = self.slot_of(raw)?;
        let entry = &mut self.entries[slot];
        let value = entry.value.take()?;
        self.live -= 1;
        // On overflow the slot is retired: never pushed back for reuse.
        if let Some(next) = entry.generation.checked_add(1) {
            entry.generation = next;
            self.vacant.push(slot as u32);
        }
        Some(value)
    }

    /// Number of live values.
    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.live
    }
}
