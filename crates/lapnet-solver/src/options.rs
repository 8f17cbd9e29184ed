//! Parameters for the solve pipeline.

/// Evenly spaced sample times for time-domain waveforms.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleGrid {
    /// First sample time (s).
    pub t_start: f64,
    /// Last sample time (s), included.
    pub t_stop: f64,
    /// Number of samples.
    pub num_points: usize,
}

impl Default for SampleGrid {
    fn default() -> Self {
        Self {
            t_start: 0.0,
            t_stop: 10.0,
            num_points: 1000,
        }
    }
}

impl SampleGrid {
    pub fn new(t_start: f64, t_stop: f64, num_points: usize) -> Self {
        Self {
            t_start,
            t_stop,
            num_points,
        }
    }

    pub fn with_t_start(mut self, t_start: f64) -> Self {
        self.t_start = t_start;
        self
    }

    pub fn with_t_stop(mut self, t_stop: f64) -> Self {
        self.t_stop = t_stop;
        self
    }

    pub fn with_num_points(mut self, num_points: usize) -> Self {
        self.num_points = num_points;
        self
    }

    /// Spacing between consecutive samples (0 with fewer than two points).
    pub fn step(&self) -> f64 {
        if self.num_points < 2 {
            0.0
        } else {
            (self.t_stop - self.t_start) / (self.num_points - 1) as f64
        }
    }

    /// The sample times, both endpoints included.
    pub fn times(&self) -> Vec<f64> {
        match self.num_points {
            0 => Vec::new(),
            1 => vec![self.t_start],
            n => {
                let step = self.step();
                let mut times: Vec<f64> =
                    (0..n).map(|i| self.t_start + i as f64 * step).collect();
                // Land exactly on the stop time
                times[n - 1] = self.t_stop;
                times
            }
        }
    }
}

/// Options for [`solve_circuit`](crate::solve_circuit).
#[derive(Debug, Clone, Default)]
pub struct SolveOptions {
    pub grid: SampleGrid,
}

impl SolveOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sample on a custom grid.
    pub fn with_grid(mut self, grid: SampleGrid) -> Self {
        self.grid = grid;
        self
    }
}
