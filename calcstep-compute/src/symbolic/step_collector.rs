/// A sink for the steps an algorithm takes, in the order it takes them.
///
/// Implemented for [`Vec`], which records every step, and for the unit type `()`, which throws
/// them away when only the final result is wanted.
pub trait StepCollector<S> {
    /// Appends a step to the collector.
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}

impl<S, C: StepCollector<S> + ?Sized> StepCollector<S> for &mut C {
    #[inline]
    fn push(&mut self, step: S) {
        (**self).push(step);
    }
}
