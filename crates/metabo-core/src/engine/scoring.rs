use super::config::ScoringConfig;
use crate::core::models::rule::TransformationRule;
use crate::core::models::structure::MolecularGraph;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriorityScore {
    pub value: f64,
    /// Highest reaction likelihood among the annotated reacting atoms, if any.
    pub likelihood: Option<f64>,
    pub passed_cutoff: bool,
}

/// Scores one rule application: the rule's priority weight, scaled by the reaction
/// likelihood of the reacting atoms when the parent carries one.
pub fn score(
    parent: &MolecularGraph,
    rule: &TransformationRule,
    reacting_atoms: &[usize],
    config: &ScoringConfig,
) -> PriorityScore {
    let likelihood = reacting_atoms
        .iter()
        .filter_map(|&i| parent.reactivity_of(i))
        .filter(|p| p.is_finite())
        .map(|p| p.clamp(0.0, 1.0))
        .reduce(f64::max);

    let weight = config.weight_for(rule.priority);
    PriorityScore {
        value: weight * likelihood.unwrap_or(1.0),
        likelihood,
        passed_cutoff: likelihood.is_none_or(|p| p >= config.likelihood_cutoff),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::rule::RulePriority;
    use crate::test_support::chain;

    fn parent() -> MolecularGraph {
        chain(&[
            ("C", 3, Some(0.8)),
            ("C", 2, Some(0.3)),
            ("O", 1, None),
            ("N", 2, Some(f64::NAN)),
            ("S", 1, Some(1.4)),
        ])
    }

    fn rule(priority: RulePriority) -> TransformationRule {
        TransformationRule::new("r", "phase1", priority, "O@0")
    }

    #[test]
    fn common_rule_scores_the_atom_likelihood() {
        let s = score(&parent(), &rule(RulePriority::Common), &[0], &ScoringConfig::default());
        assert_eq!(s.value, 0.8);
        assert_eq!(s.likelihood, Some(0.8));
        assert!(s.passed_cutoff);
    }

    #[test]
    fn uncommon_rule_is_down_weighted() {
        let s = score(&parent(), &rule(RulePriority::Uncommon), &[0], &ScoringConfig::default());
        assert!((s.value - 0.4).abs() < 1e-12);
    }

    #[test]
    fn best_reacting_atom_determines_the_likelihood() {
        let s = score(&parent(), &rule(RulePriority::Common), &[1, 0], &ScoringConfig::default());
        assert_eq!(s.likelihood, Some(0.8));
    }

    #[test]
    fn missing_or_invalid_annotations_fall_back_to_the_weight() {
        let config = ScoringConfig::default();
        let unannotated = score(&parent(), &rule(RulePriority::Uncommon), &[2], &config);
        assert_eq!(unannotated.value, 0.5);
        assert_eq!(unannotated.likelihood, None);
        assert!(unannotated.passed_cutoff);

        let nan = score(&parent(), &rule(RulePriority::Common), &[3], &config);
        assert_eq!(nan.likelihood, None);

        let out_of_range = score(&parent(), &rule(RulePriority::Common), &[4], &config);
        assert_eq!(out_of_range.likelihood, Some(1.0));
    }

    #[test]
    fn cutoff_flag_follows_the_likelihood() {
        let config = ScoringConfig {
            likelihood_cutoff: 0.5,
            ..ScoringConfig::default()
        };
        assert!(score(&parent(), &rule(RulePriority::Common), &[0], &config).passed_cutoff);
        assert!(!score(&parent(), &rule(RulePriority::Common), &[1], &config).passed_cutoff);
    }
}
