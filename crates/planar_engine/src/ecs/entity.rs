//! Entity implementation

slotmap::new_key_type! {
    /// Entity identifier
    ///
    /// A generational key: once an entity is destroyed its key never resolves
    /// again, even if the slot is reused.
    pub struct Entity;
}
