use std::time::Duration;
use std::thread;
use rand::Rng;
use log::info;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    pub min: Duration,
    pub max: Duration,
}

impl DelayRange {
    pub const fn from_millis(min: u64, max: u64) -> Self {
        DelayRange {
            min: Duration::from_millis(min),
            max: Duration::from_millis(max),
        }
    }

    pub const fn none() -> Self {
        DelayRange::from_millis(0, 0)
    }

    pub fn sample(&self) -> Duration {
        if self.max <= self.min {
            return self.min;
        }
        let mut rng = rand::thread_rng();
        rng.gen_range(self.min..=self.max)
    }
}

pub fn random_page_delay(range: &DelayRange) {
    let delay = range.sample();
    if delay.is_zero() {
        return;
    }
    info!("Waiting for {:.1} seconds (Page Delay)...", delay.as_secs_f64());
    thread::sleep(delay);
}

pub fn random_site_delay(range: &DelayRange) {
    let delay = range.sample();
    if delay.is_zero() {
        return;
    }
    info!("Waiting for {:.1} seconds (Site Delay)...", delay.as_secs_f64());
    thread::sleep(delay);
}
