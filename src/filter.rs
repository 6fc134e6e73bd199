use crate::math::exp;
use crate::traits::Filter;
use core::f64::consts::PI;

/// A first-order IIR LP filter.
///
/// # Formulas:
/// ## Variables:
/// ```text
///    x = input samples
///    y = output samples
///    a = first filter coefficient
///    b = second filter coefficient
///    fc = cutoff frequency in Hz
/// ```
/// ## Filter function:
/// ```text
///    y[n] = a * x[n] + b * y[n-1]
/// ```
/// ## Coefficients for unity gain at DC:
/// ```text
///    b = e^(-2 * PI * fc / sampleRate)
///    a = 1 - b
/// ```
#[derive(Debug, Clone)]
pub(crate) struct LpFilter1 {
    sample_rate: f64,
    /// filter coefficient a
    a: f64,
    /// filter coefficient b
    b: f64,
    /// y[n-1], last output value
    y1: f64,
    passthrough: bool,
}
impl LpFilter1 {
    /// Creates a filter that passes its input through until a cutoff is set.
    pub fn new(sample_rate: u32) -> Self {
        LpFilter1 {
            sample_rate: f64::from(sample_rate),
            a: 1.0,
            b: 0.0,
            y1: 0.0,
            passthrough: true,
        }
    }

    /// Adjusts the cutoff without resetting the inner state.
    /// A cutoff at or above Nyquist turns the filter into a passthrough.
    pub fn set_cutoff(&mut self, fc: f64) {
        if !fc.is_finite() || fc >= self.sample_rate / 2.0 {
            self.passthrough = true;
            return;
        }
        let fc = fc.max(1.0);
        self.b = exp(-2.0 * PI * fc / self.sample_rate);
        self.a = 1.0 - self.b;
        self.passthrough = false;
    }
}
impl Filter for LpFilter1 {
    fn step(&mut self, x: f64) -> f64 {
        if self.passthrough {
            return x;
        }
        let y = self.a * x + self.b * self.y1;
        self.y1 = y;
        y
    }

    fn reset(&mut self) {
        self.y1 = 0.0;
    }
}

/// A first-order HP filter, built as the input minus its low-passed copy.
///
/// ## Filter function:
/// ```text
///    y[n] = x[n] - lp(x)[n]
/// ```
#[derive(Debug, Clone)]
pub(crate) struct HpFilter1 {
    lp: LpFilter1,
    bypass: bool,
}
impl HpFilter1 {
    pub fn new(sample_rate: u32) -> Self {
        HpFilter1 {
            lp: LpFilter1::new(sample_rate),
            bypass: true,
        }
    }

    /// A cutoff of 0 Hz or less leaves the signal untouched.
    pub fn set_cutoff(&mut self, fc: f64) {
        self.bypass = fc.is_nan() || fc <= 0.0;
        self.lp.set_cutoff(fc);
    }
}
impl Filter for HpFilter1 {
    fn step(&mut self, x: f64) -> f64 {
        if self.bypass {
            return x;
        }
        x - self.lp.step(x)
    }

    fn reset(&mut self) {
        self.lp.reset();
    }
}
