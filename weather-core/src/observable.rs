use std::fmt;

type Listener<T> = Box<dyn Fn(&T)>;

/// A single value cell that notifies its listeners on every `set`.
///
/// Listeners run synchronously, in the order they were bound, before `set`
/// returns. Equal values are not deduplicated. A panicking listener unwinds
/// through `set` and the remaining listeners are not called.
pub struct Observable<T> {
    value: T,
    listeners: Vec<Listener<T>>,
}

impl<T> Observable<T> {
    pub fn new(initial: T) -> Self {
        Self { value: initial, listeners: Vec::new() }
    }

    pub fn set(&mut self, value: T) {
        self.value = value;
        for listener in &self.listeners {
            listener(&self.value);
        }
    }

    pub fn get(&self) -> &T {
        &self.value
    }

    /// Appends a listener. It is not called with the current value; the
    /// first call happens on the next `set`.
    pub fn bind<F>(&mut self, listener: F)
    where
        F: Fn(&T) + 'static,
    {
        self.listeners.push(Box::new(listener));
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl<T: Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &self.value)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
