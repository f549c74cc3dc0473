//! Key-press callback sink.

/// Zero-argument action invoked synchronously from `poll()` whenever a
/// key-press event fires.
///
/// Implemented for every `FnMut()`, which covers plain `fn()` pointers
/// (the default for [`AutoRepeatButton`](crate::AutoRepeatButton)) as well
/// as closures.
pub trait Callback {
    fn call(&mut self);
}

impl<F> Callback for F
where
    F: FnMut(),
{
    #[inline]
    fn call(&mut self) {
        self()
    }
}
