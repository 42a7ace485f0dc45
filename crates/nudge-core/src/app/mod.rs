//! App - application layer.
//!
//! Wires the ports into the scan flow: window -> select -> dispatch -> guard.

pub mod dispatcher;
pub mod scheduler;
pub mod selector;

pub use self::dispatcher::Dispatcher;
pub use self::scheduler::{Scheduler, SchedulerHandle};
pub use self::selector::{Candidate, CandidateSelector, Selection};
