/// Logical time of a simulation run. Advances once per access, hits included.
#[derive(Debug, Default)]
pub struct Clock {
    pub now: u64,
}

impl Clock {
    pub fn new() -> Self {
        Clock { now: 0 }
    }

    /// Advances to the next access and returns its (1-based) time.
    pub fn tick(&mut self) -> u64 {
        self.now += 1;
        self.now
    }
}
