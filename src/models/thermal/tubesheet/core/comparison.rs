use uom::si::length::millimeter;

use crate::support::tubesheet::{LayoutEngine, LayoutPattern, MinIdConfig};

use super::{TubeSheetConfig, TubeSheetError, TubeSheetResults, derive_results};

/// Results of one config evaluated under every layout pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutComparison {
    entries: Vec<(LayoutPattern, Result<TubeSheetResults, TubeSheetError>)>,
}

/// Evaluates `config` under each of [`LayoutPattern::ALL`].
///
/// The config's own pattern is ignored. All patterns share one memoized engine.
#[must_use]
pub fn compare_layouts(config: &TubeSheetConfig) -> LayoutComparison {
    let engine = LayoutEngine::memoized();
    let solver = MinIdConfig::default();

    let entries = LayoutPattern::ALL
        .into_iter()
        .map(|pattern| {
            let results = derive_results(&config.with_pattern(pattern), &engine, &solver);
            (pattern, results)
        })
        .collect();

    LayoutComparison { entries }
}

impl LayoutComparison {
    /// Results for `pattern`.
    #[must_use]
    pub fn get(&self, pattern: LayoutPattern) -> Option<&Result<TubeSheetResults, TubeSheetError>> {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == pattern)
            .map(|(_, results)| results)
    }

    pub fn iter(
        &self,
    ) -> impl Iterator<Item = (LayoutPattern, &Result<TubeSheetResults, TubeSheetError>)> {
        self.entries.iter().map(|(pattern, results)| (*pattern, results))
    }

    /// The pattern with the smallest minimum shell diameter.
    ///
    /// Ties go to the pattern listed first in [`LayoutPattern::ALL`]. Returns
    /// `None` if no pattern produced a minimum diameter.
    #[must_use]
    pub fn best(&self) -> Option<(LayoutPattern, &TubeSheetResults)> {
        self.iter()
            .filter_map(|(pattern, results)| {
                let results = results.as_ref().ok()?;
                let min_id = results.min_id?.get::<millimeter>();
                Some((pattern, results, min_id))
            })
            .min_by(|a, b| a.2.total_cmp(&b.2))
            .map(|(pattern, results, _)| (pattern, results))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use uom::si::f64::Length;

    fn config() -> TubeSheetConfig {
        TubeSheetConfig::new(
            Length::new::<millimeter>(3.2),
            Length::new::<millimeter>(19.05),
            1.25,
            LayoutPattern::Square90,
        )
        .unwrap()
    }

    #[test]
    fn evaluates_every_pattern() {
        let comparison = compare_layouts(&config().with_min_tubes(30).unwrap());

        let patterns: Vec<_> = comparison.iter().map(|(pattern, _)| pattern).collect();
        assert_eq!(patterns, LayoutPattern::ALL);

        for pattern in LayoutPattern::ALL {
            let results = comparison.get(pattern).unwrap().as_ref().unwrap();
            assert!(results.num_tubes >= 30, "{pattern}: {}", results.num_tubes);
        }
    }

    #[test]
    fn best_has_the_smallest_shell() {
        let comparison = compare_layouts(&config().with_min_tubes(60).unwrap());
        let (_, best) = comparison.best().unwrap();
        let best_id = best.min_id.unwrap();

        for (_, results) in comparison.iter() {
            assert!(best_id <= results.as_ref().unwrap().min_id.unwrap());
        }
    }

    #[test]
    fn nothing_is_best_without_a_driver() {
        let comparison = compare_layouts(&config());
        assert!(comparison.best().is_none());
        assert!(comparison.iter().all(|(_, results)| results.is_ok()));
    }
}
