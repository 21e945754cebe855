use std::any::Any;
use std::fmt;
use std::sync::Arc;

/// A state entry of any type, shared between the store and its readers.
#[derive(Clone)]
pub struct StateValue(Arc<dyn Any + Send + Sync>);

impl StateValue {
    pub fn new<T: Any + Send + Sync>(value: T) -> Self {
        Self(Arc::new(value))
    }

    /// Borrow as `T`, or `None` if a different type is stored.
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.0.downcast_ref::<T>()
    }
}

impl fmt::Debug for StateValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("StateValue(..)")
    }
}

/// Handle returned by `StateStore::subscribe()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub(crate) u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, PartialEq)]
    struct Pending(Option<String>);

    #[test]
    fn downcast_to_stored_type_only() {
        let v = StateValue::new(Pending(Some("abc".into())));
        assert_eq!(v.downcast_ref::<Pending>(), Some(&Pending(Some("abc".into()))));
        assert_eq!(v.downcast_ref::<String>(), None);
    }

    #[test]
    fn clones_point_at_one_value() {
        let a = StateValue::new(String::from("users/list"));
        let b = a.clone();
        let pa: *const String = a.downcast_ref::<String>().unwrap();
        let pb: *const String = b.downcast_ref::<String>().unwrap();
        assert_eq!(pa, pb);
    }
}
