//! Fixed timestep accumulator: converts variable browser frame deltas
//! into a whole number of fixed simulation ticks.

pub struct FixedTimestep {
    dt: f32,
    accumulator: f32,
    /// Cap on ticks per frame so a long stall cannot spiral.
    max_ticks: u32,
}

impl FixedTimestep {
    pub fn new(dt: f32) -> Self {
        debug_assert!(dt > 0.0);
        Self {
            dt,
            accumulator: 0.0,
            max_ticks: 10,
        }
    }

    /// Feed one frame's elapsed time; returns how many fixed ticks to run.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.max(0.0);
        self.accumulator = self.accumulator.min(self.dt * self.max_ticks as f32);
        let ticks = (self.accumulator / self.dt) as u32;
        self.accumulator -= ticks as f32 * self.dt;
        ticks
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }
}
