//! IdGenerator port - ID minting.
//!
//! Abstracted behind a trait so tests can pair it with a [`FixedClock`] and
//! get deterministic timestamp prefixes.
//!
//! [`FixedClock`]: crate::ports::FixedClock

use ulid::Ulid;

use crate::domain::{TaskId, UserId};
use crate::ports::Clock;

pub trait IdGenerator: Send + Sync {
    fn task_id(&self) -> TaskId;

    fn user_id(&self) -> UserId;
}

/// ULID-based id generator.
///
/// Uses the injected clock for the timestamp part, so ids minted under a
/// fixed clock share a prefix while staying unique via the random part.
pub struct UlidGenerator<C> {
    clock: C,
}

impl<C: Clock> UlidGenerator<C> {
    pub fn new(clock: C) -> Self {
        Self { clock }
    }

    fn next(&self) -> Ulid {
        let timestamp_ms = self.clock.now().timestamp_millis() as u64;
        Ulid::from_parts(timestamp_ms, rand::random())
    }
}

impl<C: Clock> IdGenerator for UlidGenerator<C> {
    fn task_id(&self) -> TaskId {
        TaskId::from_ulid(self.next())
    }

    fn user_id(&self) -> UserId {
        UserId::from_ulid(self.next())
    }
}
