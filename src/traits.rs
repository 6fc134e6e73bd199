pub trait Filter {
    /// Perform one step of a filter.
    fn step(&mut self, x: f64) -> f64;
    /// Clears the filter memory without touching its coefficients.
    fn reset(&mut self);
    /// Runs the filter over a whole buffer, in place.
    fn process(&mut self, buf: &mut [f64]) {
        for x in buf.iter_mut() {
            *x = self.step(*x);
        }
    }
}
