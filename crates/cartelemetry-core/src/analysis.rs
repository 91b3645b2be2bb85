//! Feed Analysis
//!
//! Averages each telemetry field over a batch of feed samples. Every field
//! is averaged on its own: a sample missing its fuel value still counts
//! toward the speed average.

use crate::feed::FeedSample;

/// Running mean of one field
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Mean {
    sum: f64,
    count: usize,
}

impl Mean {
    fn push(&mut self, value: Option<f64>) {
        if let Some(v) = value.filter(|v| v.is_finite()) {
            self.sum += v;
            self.count += 1;
        }
    }

    fn value(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Per-field averages; `None` means the field had no data
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FieldAverages {
    pub speed: Option<f64>,
    pub rpm: Option<f64>,
    pub fuel: Option<f64>,
    pub temp: Option<f64>,
    /// Valid values behind each average, in speed/rpm/fuel/temp order
    pub counts: [usize; 4],
}

impl FieldAverages {
    /// True when no field had a single valid value
    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|&c| c == 0)
    }
}

/// Average every field over `samples`
pub fn aggregate<'a, I>(samples: I) -> FieldAverages
where
    I: IntoIterator<Item = &'a FeedSample>,
{
    let mut means = [Mean::default(); 4];
    for sample in samples {
        means[0].push(sample.speed);
        means[1].push(sample.rpm);
        means[2].push(sample.fuel);
        means[3].push(sample.temp);
    }

    FieldAverages {
        speed: means[0].value(),
        rpm: means[1].value(),
        fuel: means[2].value(),
        temp: means[3].value(),
        counts: means.map(|m| m.count),
    }
}
