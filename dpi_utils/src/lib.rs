pub use dpi_utils_derive::trace_instrument;

mod macros;

/// Returns the version of this build.
pub const fn dpi_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

pub trait Apply {
    /// Applies the function `f` only if `condition` is `true`.
    fn apply_if(self, condition: bool, f: impl FnOnce(Self) -> Self) -> Self
    where
        Self: Sized,
    {
        if condition {
            f(self)
        } else {
            self
        }
    }
}

impl<T> Apply for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_matches;

    #[test]
    fn apply_if() {
        assert_eq!(1.apply_if(true, |x| x + 1), 2);
        assert_eq!(1.apply_if(false, |x| x + 1), 1);
    }

    #[test]
    fn assert_matches_guard() {
        let value: Result<u8, ()> = Ok(3);
        assert_matches!(value, Ok(x) if *x == 3);
    }
}
