use thiserror::Error;

/// Allocation failures.
///
/// Running out of a reservation is reported instead of aborting; the parser
/// turns it into an internal diagnostic and stops.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum AllocError {
    #[error("reservation of {reserve} bytes exhausted: {requested} bytes requested at offset {used}")]
    OutOfReserve {
        requested: usize,
        used: usize,
        reserve: usize,
    },
    #[error("pool exhausted after {max_slots} slots")]
    PoolExhausted { max_slots: usize },
    #[error("block at offset {offset} is not a live heap allocation")]
    InvalidFree { offset: u32 },
}
