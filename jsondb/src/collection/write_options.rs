/// Options for insert operations.
///
/// # Examples
///
/// ```rust
/// use jsondb::collection::{skip_save, InsertOptions};
///
/// assert!(!InsertOptions::default().is_skip_save());
/// assert!(skip_save().is_skip_save());
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct InsertOptions {
    skip_save: bool,
}

impl InsertOptions {
    /// * `skip_save` - If true, no flush follows a successful insert
    pub fn new(skip_save: bool) -> Self {
        Self { skip_save }
    }

    pub fn is_skip_save(&self) -> bool {
        self.skip_save
    }
}

/// Options for remove and update operations.
///
/// By default a remove or update that matches more than one document is
/// refused, so an under-constrained query cannot mutate the collection in
/// bulk by accident. Set `multi` to allow it.
///
/// ```rust
/// use jsondb::collection::{multi, ModifyOptions};
///
/// let options = ModifyOptions::new(true, true);
/// assert!(options.is_multi() && options.is_skip_save());
/// assert!(multi().is_multi());
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct ModifyOptions {
    multi: bool,
    skip_save: bool,
}

impl ModifyOptions {
    /// Creates a new `ModifyOptions`.
    ///
    /// # Arguments
    ///
    /// * `multi` - If true, every matching document is affected
    /// * `skip_save` - If true, no flush follows a successful mutation
    pub fn new(multi: bool, skip_save: bool) -> Self {
        Self { multi, skip_save }
    }

    pub fn is_multi(&self) -> bool {
        self.multi
    }

    pub fn is_skip_save(&self) -> bool {
        self.skip_save
    }
}

/// Creates `InsertOptions` that suppress the automatic flush.
pub fn skip_save() -> InsertOptions {
    InsertOptions::new(true)
}

/// Creates `ModifyOptions` allowing several documents to be affected.
pub fn multi() -> ModifyOptions {
    ModifyOptions::new(true, false)
}
