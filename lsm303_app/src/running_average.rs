use lsm303dlhc::ThreeAxes;

/// Per-axis arithmetic mean over every sample pushed so far.
#[derive(Debug, Default)]
pub struct RunningAverage {
    sum: ThreeAxes,
    count: u64,
}

impl RunningAverage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, sample: &ThreeAxes) {
        self.sum.add(sample);
        self.count += 1;
    }

    pub fn count(&self) -> u64 {
        self.count
    }

    pub fn mean(&self) -> Option<ThreeAxes> {
        if self.count == 0 {
            return None;
        }
        let mut avg = self.sum;
        avg.scale(self.count as f64);
        Some(avg)
    }
}
