//! Random meeting sampling.
//!
//! Synthetic datasets should contain some meetings that never got a final
//! decision. `MeetingSampler` drops a random share of meetings before
//! resolution. The RNG is always supplied by the caller; nothing here
//! touches global random state.

use rand::Rng;
use tracing::debug;

use crate::models::Meeting;

/// Drops each meeting independently with probability `skip_ratio`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeetingSampler {
    skip_ratio: f64,
}

impl MeetingSampler {
    /// Roughly one meeting in sixteen left undecided.
    pub const GENERATOR_SKIP_RATIO: f64 = 1.0 / 16.0;

    /// Creates a sampler. The ratio is clamped to `0.0..=1.0`.
    pub fn new(skip_ratio: f64) -> Self {
        Self {
            skip_ratio: if skip_ratio.is_nan() {
                0.0
            } else {
                skip_ratio.clamp(0.0, 1.0)
            },
        }
    }

    /// The effective skip probability.
    pub fn skip_ratio(&self) -> f64 {
        self.skip_ratio
    }

    /// Returns the kept meetings, preserving their order.
    pub fn sample<R: Rng>(&self, meetings: &[Meeting], rng: &mut R) -> Vec<Meeting> {
        self.sample_keeping(meetings, |_| false, rng)
    }

    /// Like [`sample`](Self::sample), but meetings matching `always_keep`
    /// are never dropped and draw nothing from `rng`.
    pub fn sample_keeping<R, F>(
        &self,
        meetings: &[Meeting],
        always_keep: F,
        rng: &mut R,
    ) -> Vec<Meeting>
    where
        R: Rng,
        F: Fn(&Meeting) -> bool,
    {
        if self.skip_ratio == 0.0 {
            return meetings.to_vec();
        }
        let kept: Vec<Meeting> = meetings
            .iter()
            .filter(|m| always_keep(m) || !rng.random_bool(self.skip_ratio))
            .cloned()
            .collect();
        debug!(
            total = meetings.len(),
            kept = kept.len(),
            skip_ratio = self.skip_ratio,
            "meetings sampled"
        );
        kept
    }
}

impl Default for MeetingSampler {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn meetings(n: usize) -> Vec<Meeting> {
        (0..n).map(|i| Meeting::new(i.to_string())).collect()
    }

    #[test]
    fn test_zero_ratio_keeps_all() {
        let mut rng = StdRng::seed_from_u64(1);
        let kept = MeetingSampler::default().sample(&meetings(50), &mut rng);
        assert_eq!(kept.len(), 50);
    }

    #[test]
    fn test_full_ratio_drops_all() {
        let mut rng = StdRng::seed_from_u64(1);
        let kept = MeetingSampler::new(1.0).sample(&meetings(50), &mut rng);
        assert!(kept.is_empty());
    }

    #[test]
    fn test_same_seed_same_sample() {
        let all = meetings(200);
        let sampler = MeetingSampler::new(MeetingSampler::GENERATOR_SKIP_RATIO);
        let a = sampler.sample(&all, &mut StdRng::seed_from_u64(42));
        let b = sampler.sample(&all, &mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
        assert!(a.len() < all.len());
    }

    #[test]
    fn test_order_preserved() {
        let all = meetings(100);
        let kept = MeetingSampler::new(0.5).sample(&all, &mut StdRng::seed_from_u64(3));
        let ids: Vec<usize> = kept.iter().map(|m| m.id.parse().unwrap()).collect();
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_always_keep_survives_full_ratio() {
        let all = meetings(10);
        let kept = MeetingSampler::new(1.0).sample_keeping(
            &all,
            |m| m.id == "3" || m.id == "7",
            &mut StdRng::seed_from_u64(5),
        );
        let ids: Vec<&str> = kept.iter().map(|m| m.id.as_str()).collect();
        assert_eq!(ids, vec!["3", "7"]);
    }

    #[test]
    fn test_ratio_clamped() {
        assert_eq!(MeetingSampler::new(7.0).skip_ratio(), 1.0);
        assert_eq!(MeetingSampler::new(-1.0).skip_ratio(), 0.0);
        assert_eq!(MeetingSampler::new(f64::NAN).skip_ratio(), 0.0);
    }
}
