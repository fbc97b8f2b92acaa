//! Fragment reassembly with least-recently-used eviction.

use std::collections::hash_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::num::NonZeroUsize;

use wire::Command;

use crate::fragment::ReliableFragment;
use crate::limits::{
    DEFAULT_MAX_FRAGMENTS, DEFAULT_MAX_MESSAGE_BYTES, DEFAULT_REASSEMBLY_CAPACITY,
};

/// Collects fragments per sequence number until a message is complete.
///
/// At most `capacity` incomplete messages are held. Starting a new one while
/// full silently drops the least recently touched message. Each message is
/// also bounded: a fragment count above `max_fragments` is refused, and a
/// fragment that would push the held payload past `max_message_bytes` is
/// dropped.
#[derive(Debug)]
pub struct Reassembler {
    capacity: NonZeroUsize,
    max_fragments: usize,
    max_message_bytes: usize,
    pending: HashMap<i32, PendingMessage>,
    /// Last-touch stamp to sequence number, oldest first.
    recency: BTreeMap<u64, i32>,
    clock: u64,
    evictions: u64,
    dropped: u64,
}

#[derive(Debug)]
struct PendingMessage {
    fragments_needed: usize,
    fragments: BTreeMap<usize, Vec<u8>>,
    bytes: usize,
    touched: u64,
}

impl Default for Reassembler {
    fn default() -> Self {
        Self::new(NonZeroUsize::new(DEFAULT_REASSEMBLY_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    }
}

impl Reassembler {
    /// Creates a reassembler holding at most `capacity` incomplete messages,
    /// each bounded by the default per-message limits.
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self::with_message_limits(capacity, DEFAULT_MAX_FRAGMENTS, DEFAULT_MAX_MESSAGE_BYTES)
    }

    /// Creates a reassembler with explicit per-message limits.
    #[must_use]
    pub fn with_message_limits(
        capacity: NonZeroUsize,
        max_fragments: usize,
        max_message_bytes: usize,
    ) -> Self {
        Self {
            capacity,
            max_fragments,
            max_message_bytes,
            pending: HashMap::new(),
            recency: BTreeMap::new(),
            clock: 0,
            evictions: 0,
            dropped: 0,
        }
    }

    /// Returns the capacity of the reassembler.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Returns the largest fragment count a message may declare.
    #[must_use]
    pub fn max_fragments(&self) -> usize {
        self.max_fragments
    }

    /// Returns the largest payload a single message may collect.
    #[must_use]
    pub fn max_message_bytes(&self) -> usize {
        self.max_message_bytes
    }

    /// Returns the number of incomplete messages held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Returns `true` if no message is in progress.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    /// Returns `true` if fragments for `sequence_number` are being held.
    #[must_use]
    pub fn contains(&self, sequence_number: i32) -> bool {
        self.pending.contains_key(&sequence_number)
    }

    /// Returns `(received, needed)` fragment counts for a held message.
    #[must_use]
    pub fn progress(&self, sequence_number: i32) -> Option<(usize, usize)> {
        self.pending
            .get(&sequence_number)
            .map(|pending| (pending.fragments.len(), pending.fragments_needed))
    }

    /// Returns the payload bytes held for an incomplete message.
    #[must_use]
    pub fn held_bytes(&self, sequence_number: i32) -> Option<usize> {
        self.pending.get(&sequence_number).map(|pending| pending.bytes)
    }

    /// Returns how many incomplete messages were evicted so far.
    #[must_use]
    pub fn evictions(&self) -> u64 {
        self.evictions
    }

    /// Returns how many fragments were rejected for a bad index or count, or
    /// for exceeding the per-message byte limit.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Adds a fragment, returning the rebuilt `SendReliable` command once
    /// every fragment of its message has arrived.
    ///
    /// The fragment count of the first fragment seen for a sequence number
    /// fixes how many fragments that message needs. A repeated index
    /// overwrites the earlier payload. Fragments with an index outside
    /// `0..needed`, and fragments that would exceed the per-message byte
    /// limit, are dropped.
    pub fn offer(&mut self, fragment: &ReliableFragment<'_>) -> Option<Command<'static>> {
        let sequence = fragment.sequence_number;
        let needed = match self.pending.get(&sequence) {
            Some(pending) => pending.fragments_needed,
            None => usize::try_from(fragment.fragment_count)
                .ok()
                .filter(|&count| count <= self.max_fragments)
                .unwrap_or(0),
        };
        let Some(index) = usize::try_from(fragment.fragment_number)
            .ok()
            .filter(|&index| index < needed)
        else {
            self.dropped += 1;
            tracing::debug!(
                sequence,
                fragment = fragment.fragment_number,
                fragment_count = fragment.fragment_count,
                needed,
                "dropping fragment outside its message"
            );
            return None;
        };

        // Bytes this message would hold once the fragment replaces any
        // earlier payload at the same index.
        let others = self.pending.get(&sequence).map_or(0, |pending| {
            pending.bytes - pending.fragments.get(&index).map_or(0, Vec::len)
        });
        let bytes = match others.checked_add(fragment.payload.len()) {
            Some(bytes) if bytes <= self.max_message_bytes => bytes,
            _ => {
                self.dropped += 1;
                tracing::debug!(
                    sequence,
                    fragment = fragment.fragment_number,
                    held = others,
                    payload = fragment.payload.len(),
                    max = self.max_message_bytes,
                    "dropping fragment over the message size limit"
                );
                return None;
            }
        };

        if !self.pending.contains_key(&sequence) && self.pending.len() >= self.capacity.get() {
            self.evict_least_recent();
        }

        self.clock += 1;
        let now = self.clock;
        let pending = match self.pending.entry(sequence) {
            Entry::Occupied(slot) => {
                let pending = slot.into_mut();
                self.recency.remove(&pending.touched);
                pending
            }
            Entry::Vacant(slot) => slot.insert(PendingMessage {
                fragments_needed: needed,
                fragments: BTreeMap::new(),
                bytes: 0,
                touched: now,
            }),
        };
        pending.fragments.insert(index, fragment.payload.to_vec());
        pending.bytes = bytes;
        pending.touched = now;

        if pending.fragments.len() < pending.fragments_needed {
            self.recency.insert(now, sequence);
            return None;
        }

        let pending = self.pending.remove(&sequence)?;
        let data: Vec<u8> = pending.fragments.into_values().flatten().collect();
        tracing::debug!(
            sequence,
            fragments = pending.fragments_needed,
            bytes = data.len(),
            "reassembled fragmented message"
        );
        Some(Command::reliable(sequence, data))
    }

    fn evict_least_recent(&mut self) {
        if let Some((_, sequence)) = self.recency.pop_first() {
            if let Some(evicted) = self.pending.remove(&sequence) {
                self.evictions += 1;
                tracing::debug!(
                    sequence,
                    received = evicted.fragments.len(),
                    needed = evicted.fragments_needed,
                    "evicting incomplete fragmented message"
                );
            }
        }
    }
}
