use std::{
    cell::{Cell, RefCell},
    fmt::Display,
};

/// Represents a trait responsible for handling diagnostics reported while processing source code.
pub trait Handler<T> {
    /// Receive an error and handles it.
    fn receive(&self, error: T);
}

/// Handler that prints every received error to stderr.
#[derive(Debug, Default)]
pub struct PrintHandler {
    printed: Cell<bool>,
}

impl PrintHandler {
    /// Creates a new [`PrintHandler`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether at least one error has been printed.
    #[must_use]
    pub fn has_printed(&self) -> bool {
        self.printed.get()
    }
}

impl<T: Display> Handler<T> for PrintHandler {
    fn receive(&self, error: T) {
        eprintln!("{error}");
        self.printed.set(true);
    }
}

/// Handler that discards every received error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VoidHandler;

impl<T> Handler<T> for VoidHandler {
    fn receive(&self, _error: T) {}
}

/// Handler that keeps every received error, in the order they were reported.
#[derive(Debug)]
pub struct CollectingHandler<T> {
    received: RefCell<Vec<T>>,
}

impl<T> Default for CollectingHandler<T> {
    fn default() -> Self {
        Self {
            received: RefCell::new(Vec::new()),
        }
    }
}

impl<T> CollectingHandler<T> {
    /// Creates a new, empty [`CollectingHandler`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of errors received so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.received.borrow().len()
    }

    /// Whether no error has been received.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.received.borrow().is_empty()
    }

    /// Dissolves the handler into the received errors.
    #[must_use]
    pub fn into_inner(self) -> Vec<T> {
        self.received.into_inner()
    }
}

impl<T> Handler<T> for CollectingHandler<T> {
    fn receive(&self, error: T) {
        self.received.borrow_mut().push(error);
    }
}
