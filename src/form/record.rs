use std::fmt::Debug;
use std::hash::Hash;

/// A statically-shaped set of string fields edited by a form.
pub trait FormRecord: Clone + PartialEq + Debug + Send + 'static {
    type Field: Copy + Eq + Ord + Hash + Debug + Send + 'static;

    /// Every field, in display order.
    fn fields() -> &'static [Self::Field];

    fn get(&self, field: Self::Field) -> &str;

    fn set(&mut self, field: Self::Field, value: String);

    /// Copy of `self` with one field replaced.
    fn with(&self, field: Self::Field, value: &str) -> Self {
        let mut next = self.clone();
        next.set(field, value.to_string());
        next
    }
}
