//! Compile-time helpers for carrying validated invariants.

/// Proof wrapper indicating a value has been validated.
///
/// Produced by validation entry points once every check has passed, so
/// functions taking `Validated<T>` can skip re-checking.
#[derive(Debug, Clone, PartialEq)]
pub struct Validated<T>(T);

impl<T> Validated<T> {
    /// Wrap a validated value.
    pub const fn new(value: T) -> Self {
        Self(value)
    }

    /// Borrow the inner value.
    pub const fn get(&self) -> &T {
        &self.0
    }

    /// Consume and return the inner value.
    pub fn into_inner(self) -> T {
        self.0
    }
}

impl<T> std::ops::Deref for Validated<T> {
    type Target = T;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> AsRef<T> for Validated<T> {
    fn as_ref(&self) -> &T {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validated_exposes_inner_value() {
        let validated = Validated::new(String::from("ready"));
        assert_eq!(validated.len(), 5);
        assert_eq!(validated.get(), "ready");
        assert_eq!(validated.into_inner(), "ready");
    }
}
