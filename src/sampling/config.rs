use indicatif::{ProgressBar, ProgressStyle};
use rand::SeedableRng;
use rand::rngs::StdRng;

/// Options that change how a sampling call runs but never what it means.
///
/// # Examples
///
/// ```
/// use downsample::SampleConfig;
///
/// let config = SampleConfig::new().with_seed(42).with_progress(false);
/// assert_eq!(config.seed, Some(42));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SampleConfig {
    /// Seed for the random source. `None` seeds from the thread-local generator,
    /// so repeated calls give different samples.
    pub seed: Option<u64>,

    /// Show a per-row progress bar on stderr while probing.
    pub show_progress: bool,
}

impl SampleConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Creates the random source for one sampling call.
    ///
    /// Two calls on a config with the same seed return generators producing the
    /// same sequence.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }
}

/// Builds the probing progress bar, hidden unless `show_progress` is set.
pub(crate) fn probe_progress_bar(show_progress: bool, num_rows: usize) -> ProgressBar {
    if !show_progress {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(num_rows as u64);
    if let Ok(style) = ProgressStyle::with_template(
        "  Probing    {bar:40.cyan/blue} {pos}/{len} rows [{elapsed_precise}]",
    ) {
        bar.set_style(style.progress_chars("##-"));
    }
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_default_is_unseeded_and_quiet() {
        let config = SampleConfig::default();
        assert_eq!(config.seed, None);
        assert!(!config.show_progress);
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let config = SampleConfig::new().with_seed(7);
        let a: Vec<u32> = (0..8).map(|_| config.rng().random_range(0..1000)).collect();
        let mut r1 = config.rng();
        let mut r2 = config.rng();
        let b: Vec<u32> = (0..8).map(|_| r1.random_range(0..1000)).collect();
        let c: Vec<u32> = (0..8).map(|_| r2.random_range(0..1000)).collect();
        assert_eq!(b, c);
        // a fresh generator per draw always yields the first value
        assert!(a.iter().all(|&v| v == a[0]));
    }

    #[test]
    fn test_hidden_progress_bar() {
        let bar = probe_progress_bar(false, 10);
        assert!(bar.is_hidden());
        let bar = probe_progress_bar(true, 10);
        assert_eq!(bar.length(), Some(10));
    }
}
