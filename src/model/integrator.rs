//! Adaptive ODE integration for the hepatotoxicity model.
//!
//! Implements the Dormand-Prince 5(4) embedded Runge-Kutta pair with local
//! error control. The 5th-order solution is propagated; the difference to
//! the embedded 4th-order solution estimates the local error, which sets
//! the next step size.
//!
//! The drug -> metabolite -> ROS -> damage chain can have fast initial
//! transients at high amplifier values, so fixed-step schemes are not
//! used here.
//!
//! Reference: Dormand JR, Prince PJ. J Comput Appl Math. 1980;6:19-26
//! Reference: Hairer E, Norsett SP, Wanner G. Solving Ordinary Differential
//! Equations I, 2nd ed., Springer 1993, section II.4

use crate::error::{ConfigurationError, IntegrationError, IntegrationFailure, Result};

// Dormand-Prince tableau
const C2: f64 = 1.0 / 5.0;
const C3: f64 = 3.0 / 10.0;
const C4: f64 = 4.0 / 5.0;
const C5: f64 = 8.0 / 9.0;

const A21: f64 = 1.0 / 5.0;
const A31: f64 = 3.0 / 40.0;
const A32: f64 = 9.0 / 40.0;
const A41: f64 = 44.0 / 45.0;
const A42: f64 = -56.0 / 15.0;
const A43: f64 = 32.0 / 9.0;
const A51: f64 = 19372.0 / 6561.0;
const A52: f64 = -25360.0 / 2187.0;
const A53: f64 = 64448.0 / 6561.0;
const A54: f64 = -212.0 / 729.0;
const A61: f64 = 9017.0 / 3168.0;
const A62: f64 = -355.0 / 33.0;
const A63: f64 = 46732.0 / 5247.0;
const A64: f64 = 49.0 / 176.0;
const A65: f64 = -5103.0 / 18656.0;

// 5th-order weights (also row 7 of the tableau, FSAL)
const B1: f64 = 35.0 / 384.0;
const B3: f64 = 500.0 / 1113.0;
const B4: f64 = 125.0 / 192.0;
const B5: f64 = -2187.0 / 6784.0;
const B6: f64 = 11.0 / 84.0;

// Error weights: 5th-order minus embedded 4th-order
const E1: f64 = 71.0 / 57600.0;
const E3: f64 = -71.0 / 16695.0;
const E4: f64 = 71.0 / 1920.0;
const E5: f64 = -17253.0 / 339200.0;
const E6: f64 = 22.0 / 525.0;
const E7: f64 = -1.0 / 40.0;

/// Configuration for the adaptive integrator
#[derive(Debug, Clone)]
pub struct IntegratorConfig {
    /// Relative tolerance on each state component
    pub rtol: f64,
    /// Absolute tolerance on each state component
    pub atol: f64,
    /// First trial step (hours)
    pub initial_step_h: f64,
    /// Largest allowed step (hours)
    pub max_step_h: f64,
    /// Steps below this size abort the run (hours)
    pub min_step_h: f64,
    /// Accepted + rejected step budget for one run
    pub max_steps: u64,
    /// Safety factor on the step-size prediction
    pub safety: f64,
}

impl Default for IntegratorConfig {
    fn default() -> Self {
        Self {
            rtol: 1e-8,
            atol: 1e-10,
            initial_step_h: 0.1,
            max_step_h: 1.0,
            min_step_h: 1e-12,
            max_steps: 100_000,
            safety: 0.9,
        }
    }
}

/// Dormand-Prince 5(4) integrator for ODE systems
///
/// Solves dy/dt = f(t, y) with step-size control.
pub struct AdaptiveIntegrator {
    /// Configuration
    pub config: IntegratorConfig,
    /// Current simulation time in hours
    pub time_h: f64,
    /// Number of accepted steps
    pub step_count: u64,
    /// Number of rejected steps
    pub rejected_count: u64,
    /// Proposed size of the next step
    step_h: f64,
    /// Stage derivatives
    k: [Vec<f64>; 7],
    y_temp: Vec<f64>,
    y_new: Vec<f64>,
}

impl AdaptiveIntegrator {
    /// Create a new integrator for a system with n variables
    pub fn new(n_variables: usize, config: IntegratorConfig) -> Self {
        let step_h = config.initial_step_h;
        Self {
            config,
            time_h: 0.0,
            step_count: 0,
            rejected_count: 0,
            step_h,
            k: std::array::from_fn(|_| vec![0.0; n_variables]),
            y_temp: vec![0.0; n_variables],
            y_new: vec![0.0; n_variables],
        }
    }

    /// Resize internal buffers if system size changes
    pub fn resize(&mut self, n_variables: usize) {
        if self.y_temp.len() != n_variables {
            for k in self.k.iter_mut() {
                k.resize(n_variables, 0.0);
            }
            self.y_temp.resize(n_variables, 0.0);
            self.y_new.resize(n_variables, 0.0);
        }
    }

    /// Reset integrator state
    pub fn reset(&mut self) {
        self.time_h = 0.0;
        self.step_count = 0;
        self.rejected_count = 0;
        self.step_h = self.config.initial_step_h;
    }

    /// Attempt one step of size `h` from (`t`, `y`).
    ///
    /// Writes the 5th-order candidate into `y_new` and returns the scaled
    /// RMS error norm (<= 1 means acceptable). Non-finite results return
    /// `f64::INFINITY`.
    fn try_step<F>(&mut self, t: f64, h: f64, y: &[f64], derivatives: &F) -> f64
    where
        F: Fn(f64, &[f64], &mut [f64]),
    {
        let n = y.len();
        let [k1, k2, k3, k4, k5, k6, k7] = &mut self.k;

        derivatives(t, y, k1);

        for i in 0..n {
            self.y_temp[i] = y[i] + h * A21 * k1[i];
        }
        derivatives(t + C2 * h, &self.y_temp, k2);

        for i in 0..n {
            self.y_temp[i] = y[i] + h * (A31 * k1[i] + A32 * k2[i]);
        }
        derivatives(t + C3 * h, &self.y_temp, k3);

        for i in 0..n {
            self.y_temp[i] = y[i] + h * (A41 * k1[i] + A42 * k2[i] + A43 * k3[i]);
        }
        derivatives(t + C4 * h, &self.y_temp, k4);

        for i in 0..n {
            self.y_temp[i] =
                y[i] + h * (A51 * k1[i] + A52 * k2[i] + A53 * k3[i] + A54 * k4[i]);
        }
        derivatives(t + C5 * h, &self.y_temp, k5);

        for i in 0..n {
            self.y_temp[i] = y[i]
                + h * (A61 * k1[i] + A62 * k2[i] + A63 * k3[i] + A64 * k4[i] + A65 * k5[i]);
        }
        derivatives(t + h, &self.y_temp, k6);

        for i in 0..n {
            self.y_new[i] = y[i]
                + h * (B1 * k1[i] + B3 * k3[i] + B4 * k4[i] + B5 * k5[i] + B6 * k6[i]);
        }
        derivatives(t + h, &self.y_new, k7);

        let mut sum_sq = 0.0;
        for i in 0..n {
            let err = h
                * (E1 * k1[i] + E3 * k3[i] + E4 * k4[i] + E5 * k5[i] + E6 * k6[i] + E7 * k7[i]);
            let scale = self.config.atol + self.config.rtol * y[i].abs().max(self.y_new[i].abs());
            let ratio = err / scale;
            sum_sq += ratio * ratio;
        }
        let norm = (sum_sq / n.max(1) as f64).sqrt();

        if norm.is_finite() && self.y_new.iter().all(|v| v.is_finite()) {
            norm
        } else {
            f64::INFINITY
        }
    }

    /// Advance `y` in place from the current time to `t_end`.
    ///
    /// Steps are clipped so that `t_end` is hit exactly. When the step size
    /// collapses below `min_step_h` the failure is `NonFinite` if the last
    /// rejected candidate overflowed, otherwise `StepSizeUnderflow`.
    pub fn advance<F>(
        &mut self,
        y: &mut [f64],
        t_end: f64,
        derivatives: &F,
    ) -> std::result::Result<(), IntegrationError>
    where
        F: Fn(f64, &[f64], &mut [f64]),
    {
        self.resize(y.len());

        if y.iter().any(|v| !v.is_finite()) {
            return Err(self.failure(IntegrationFailure::NonFinite));
        }

        let mut last_rejected = false;
        let mut last_non_finite = false;
        loop {
            let remaining = t_end - self.time_h;
            if remaining <= f64::EPSILON * t_end.abs().max(1.0) {
                self.time_h = t_end;
                return Ok(());
            }

            if self.step_count + self.rejected_count >= self.config.max_steps {
                return Err(self.failure(IntegrationFailure::MaxStepsExceeded));
            }
            if self.step_h < self.config.min_step_h {
                let kind = if last_non_finite {
                    IntegrationFailure::NonFinite
                } else {
                    IntegrationFailure::StepSizeUnderflow
                };
                return Err(self.failure(kind));
            }

            let proposed = self.step_h.min(self.config.max_step_h);
            let clipped = proposed >= remaining;
            let h = if clipped { remaining } else { proposed };

            let err = self.try_step(self.time_h, h, y, derivatives);

            if err <= 1.0 {
                y.copy_from_slice(&self.y_new);
                self.time_h = if clipped { t_end } else { self.time_h + h };
                self.step_count += 1;

                let mut factor = if err == 0.0 {
                    5.0
                } else {
                    (self.config.safety * err.powf(-0.2)).clamp(0.2, 5.0)
                };
                if last_rejected {
                    factor = factor.min(1.0);
                }
                let next = h * factor;
                // A step shortened to land on t_end says nothing about the
                // step size the error estimate would allow.
                self.step_h = if clipped { next.max(proposed) } else { next };
                last_rejected = false;
                last_non_finite = false;
            } else {
                self.rejected_count += 1;
                last_non_finite = !err.is_finite();
                let factor = if err.is_finite() {
                    (self.config.safety * err.powf(-0.2)).clamp(0.2, 1.0)
                } else {
                    0.2
                };
                self.step_h = h * factor;
                last_rejected = true;
            }
        }
    }

    fn failure(&self, kind: IntegrationFailure) -> IntegrationError {
        IntegrationError {
            last_stable_time_h: self.time_h,
            kind,
        }
    }
}

/// Check that sample times are finite, strictly increasing, at least 2.
pub fn validate_sample_times(times: &[f64]) -> std::result::Result<(), ConfigurationError> {
    if times.len() < 2 {
        return Err(ConfigurationError::SampleCount(times.len()));
    }
    if times.iter().any(|t| !t.is_finite()) {
        return Err(ConfigurationError::SampleGrid("non-finite sample time".to_string()));
    }
    if let Some(w) = times.windows(2).find(|w| w[1] <= w[0]) {
        return Err(ConfigurationError::SampleGrid(format!(
            "sample times not strictly increasing ({} -> {})",
            w[0], w[1]
        )));
    }
    Ok(())
}

/// Integrate from `initial` at `times[0]` and record the state at every
/// sample time. The first record is `initial` itself.
pub fn integrate<F>(
    derivatives: F,
    initial: &[f64],
    times: &[f64],
    config: &IntegratorConfig,
) -> Result<Vec<Vec<f64>>>
where
    F: Fn(f64, &[f64], &mut [f64]),
{
    validate_sample_times(times)?;

    let mut integrator = AdaptiveIntegrator::new(initial.len(), config.clone());
    integrator.time_h = times[0];

    let mut y = initial.to_vec();
    let mut samples = Vec::with_capacity(times.len());
    samples.push(y.clone());

    for &t in &times[1..] {
        integrator.advance(&mut y, t, &derivatives)?;
        samples.push(y.clone());
    }

    log::debug!(
        "Integrated to t={:.2} h: {} accepted, {} rejected steps",
        integrator.time_h,
        integrator.step_count,
        integrator.rejected_count
    );

    Ok(samples)
}
