use chrono::{DateTime, Utc};
use dpi_di::Build;
use dpi_shared_contracts::time::TimeService;
use dpi_utils::trace_instrument;

#[derive(Debug, Clone, Copy, Build)]
pub struct TimeServiceImpl;

impl TimeService for TimeServiceImpl {
    #[trace_instrument(skip(self))]
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn now_is_monotonic_enough() {
        let sut = TimeServiceImpl;
        let a = sut.now();
        let b = sut.now();
        assert!(b >= a);
    }
}
