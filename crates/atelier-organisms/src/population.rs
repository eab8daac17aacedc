//! The population manager: creation, replication, and deletion.
//!
//! Replication inherits the parent's most recent exchanges plus one
//! derived pair, and blends the parent's enrichment with a small random
//! mutation -- children resemble their parents but drift. Deleted ids are
//! terminal and never reused; parents' `child_ids` are deliberately left
//! dangling (see [`PopulationManager::sweep_references`] for the opt-in
//! cleanup).

use std::collections::{BTreeMap, BTreeSet};

use chrono::Utc;
use rand::Rng;
use rust_decimal::Decimal;
use tracing::{debug, info};

use atelier_types::{Organism, OrganismId};

use crate::error::OrganismError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Default cap on active organisms.
pub const DEFAULT_MAX_ACTIVE: usize = 10;

/// Minimum questions an organism must carry before it can replicate.
const MIN_QUESTIONS_FOR_REPLICATION: usize = 5;

/// Number of trailing question/answer pairs a child inherits.
const INHERITED_EXCHANGES: usize = 2;

/// Enrichment threshold above which replication is allowed (0.7).
fn replication_threshold() -> Decimal {
    Decimal::new(7, 1)
}

/// Enrichment threshold below which a worn-out organism becomes
/// deletion-eligible (0.3).
fn deletion_threshold() -> Decimal {
    Decimal::new(3, 1)
}

/// Minimum `passes` and `receives` for deletion eligibility.
const DELETION_MIN_TRAFFIC: u32 = 2;

/// Initial enrichment range for new organisms, in thousandths (0.3--0.8).
const SEED_ENRICHMENT_MILLIS: core::ops::RangeInclusive<i64> = 300..=800;

/// Mutation range applied to a child's inherited enrichment, in
/// thousandths (plus or minus 0.1).
const MUTATION_MILLIS: core::ops::RangeInclusive<i64> = -100..=100;

/// The fixed question/answer log every new organism starts with.
fn seed_exchanges() -> (Vec<String>, Vec<String>) {
    let questions = vec![
        "What is this project building?".to_owned(),
        "Which components changed most recently?".to_owned(),
        "Where is the design weakest?".to_owned(),
    ];
    let answers = vec![
        "A visual interface assembled from canvas components.".to_owned(),
        "The components touched by the latest committed snapshot.".to_owned(),
        "Wherever the problem detector reports open findings.".to_owned(),
    ];
    (questions, answers)
}

// ---------------------------------------------------------------------------
// Deletion eligibility
// ---------------------------------------------------------------------------

/// Pure deletion-eligibility predicate.
///
/// An organism qualifies once it has both received and passed enrichment
/// at least twice while its score has decayed below 0.3. The manager
/// never acts on this itself; callers decide when to
/// [`delete`](PopulationManager::delete).
pub fn is_eligible_for_deletion(organism: &Organism) -> bool {
    organism.receives >= DELETION_MIN_TRAFFIC
        && organism.passes >= DELETION_MIN_TRAFFIC
        && organism.enrichment < deletion_threshold()
}

// ---------------------------------------------------------------------------
// Manager
// ---------------------------------------------------------------------------

/// Creates, replicates, and deletes organisms under a population cap.
#[derive(Debug)]
pub struct PopulationManager {
    /// Living organisms by id.
    organisms: BTreeMap<OrganismId, Organism>,
    /// Ids of deleted organisms. Terminal: never reused, never revived.
    retired: BTreeSet<OrganismId>,
    /// Cap on simultaneously active organisms.
    max_active: usize,
}

impl PopulationManager {
    /// Create a manager with the default cap of 10 active organisms.
    pub const fn new() -> Self {
        Self::with_capacity(DEFAULT_MAX_ACTIVE)
    }

    /// Create a manager with a custom active-population cap.
    pub const fn with_capacity(max_active: usize) -> Self {
        Self {
            organisms: BTreeMap::new(),
            retired: BTreeSet::new(),
            max_active,
        }
    }

    /// Number of active organisms.
    pub fn active_count(&self) -> usize {
        self.organisms.values().filter(|o| o.active).count()
    }

    /// Look up an organism by id.
    pub fn get(&self, id: OrganismId) -> Option<&Organism> {
        self.organisms.get(&id)
    }

    /// Iterate all living organisms.
    pub fn organisms(&self) -> impl Iterator<Item = &Organism> {
        self.organisms.values()
    }

    // -----------------------------------------------------------------------
    // Creation
    // -----------------------------------------------------------------------

    /// Create a generation-1 organism.
    ///
    /// Enrichment is sampled uniformly in `[0.3, 0.8]` -- new organisms
    /// start neither starved nor saturated -- and the question/answer log
    /// starts from the fixed seed set.
    ///
    /// # Errors
    ///
    /// Returns [`OrganismError::PopulationFull`] at the cap.
    pub fn create(&mut self, rng: &mut impl Rng) -> Result<OrganismId, OrganismError> {
        self.create_in_range(rng, SEED_ENRICHMENT_MILLIS)
    }

    /// Create a generation-1 organism with a custom enrichment seed range,
    /// given in thousandths (`300..=800` means `[0.3, 0.8]`).
    ///
    /// # Errors
    ///
    /// Returns [`OrganismError::PopulationFull`] at the cap.
    pub fn create_in_range(
        &mut self,
        rng: &mut impl Rng,
        seed_millis: core::ops::RangeInclusive<i64>,
    ) -> Result<OrganismId, OrganismError> {
        self.ensure_capacity()?;

        let (questions, answers) = seed_exchanges();
        let enrichment = clamp_unit(Decimal::new(rng.random_range(seed_millis), 3));

        let organism = Organism {
            id: OrganismId::new(),
            generation: 1,
            questions,
            answers,
            enrichment,
            active: true,
            parent_id: None,
            child_ids: BTreeSet::new(),
            passes: 0,
            receives: 0,
            created_at: Utc::now(),
        };
        let id = organism.id;
        self.organisms.insert(id, organism);

        info!(organism = %id, %enrichment, "organism created");
        Ok(id)
    }

    /// Append a question/answer exchange to an organism's log.
    ///
    /// This is how AI interaction metadata feeds the population: each
    /// generation request that touches the project records one exchange.
    ///
    /// # Errors
    ///
    /// Returns [`OrganismError::OrganismNotFound`] for an unknown id.
    pub fn record_exchange(
        &mut self,
        id: OrganismId,
        question: &str,
        answer: &str,
    ) -> Result<(), OrganismError> {
        let organism = self
            .organisms
            .get_mut(&id)
            .ok_or(OrganismError::OrganismNotFound(id))?;
        organism.questions.push(question.to_owned());
        organism.answers.push(answer.to_owned());
        Ok(())
    }

    /// Overwrite an organism's enrichment score, clamped to `[0, 1]`.
    ///
    /// # Errors
    ///
    /// Returns [`OrganismError::OrganismNotFound`] for an unknown id.
    pub fn set_enrichment(&mut self, id: OrganismId, value: Decimal) -> Result<(), OrganismError> {
        let organism = self
            .organisms
            .get_mut(&id)
            .ok_or(OrganismError::OrganismNotFound(id))?;
        organism.enrichment = clamp_unit(value);
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Replication
    // -----------------------------------------------------------------------

    /// Replicate a parent organism into a new child.
    ///
    /// Preconditions: the parent is active, its enrichment exceeds 0.7,
    /// and it carries at least 5 questions. The child starts at
    /// `generation = parent.generation + 1` with the parent's last two
    /// exchanges plus one derived pair, `receives = 1`, `passes = 0`.
    /// The parent's `passes` increments and the child id is recorded.
    ///
    /// # Errors
    ///
    /// Returns [`OrganismError::NotEligible`] when a precondition fails,
    /// [`OrganismError::PopulationFull`] at the cap, and
    /// [`OrganismError::OrganismNotFound`] for an unknown parent.
    pub fn replicate(
        &mut self,
        parent_id: OrganismId,
        rng: &mut impl Rng,
    ) -> Result<OrganismId, OrganismError> {
        self.ensure_capacity()?;

        let parent = self
            .organisms
            .get(&parent_id)
            .ok_or(OrganismError::OrganismNotFound(parent_id))?;

        if !parent.active {
            return Err(OrganismError::NotEligible {
                reason: format!("parent {parent_id} is not active"),
            });
        }
        if parent.enrichment <= replication_threshold() {
            return Err(OrganismError::NotEligible {
                reason: format!(
                    "parent enrichment is {}, needs to be above {}",
                    parent.enrichment,
                    replication_threshold()
                ),
            });
        }
        if parent.questions.len() < MIN_QUESTIONS_FOR_REPLICATION {
            return Err(OrganismError::NotEligible {
                reason: format!(
                    "parent carries {} questions, needs at least {MIN_QUESTIONS_FOR_REPLICATION}",
                    parent.questions.len()
                ),
            });
        }

        let generation =
            parent
                .generation
                .checked_add(1)
                .ok_or_else(|| OrganismError::ArithmeticOverflow {
                    context: "generation increment overflow".to_owned(),
                })?;

        // Inherit the trailing exchanges plus one derived pair.
        let mut questions = tail(&parent.questions, INHERITED_EXCHANGES);
        let mut answers = tail(&parent.answers, INHERITED_EXCHANGES);
        let last_answer = parent
            .answers
            .last()
            .cloned()
            .unwrap_or_else(|| "nothing yet".to_owned());
        questions.push(format!("What follows from: {last_answer}"));
        answers.push(format!("A generation {generation} synthesis of: {last_answer}"));

        // Enrichment drifts from the parent by a small mutation.
        let mutation = Decimal::new(rng.random_range(MUTATION_MILLIS), 3);
        let enrichment = clamp_unit(
            parent
                .enrichment
                .checked_add(mutation)
                .unwrap_or(parent.enrichment),
        );

        let child = Organism {
            id: OrganismId::new(),
            generation,
            questions,
            answers,
            enrichment,
            active: true,
            parent_id: Some(parent_id),
            child_ids: BTreeSet::new(),
            passes: 0,
            receives: 1,
            created_at: Utc::now(),
        };
        let child_id = child.id;
        self.organisms.insert(child_id, child);

        if let Some(parent) = self.organisms.get_mut(&parent_id) {
            parent.passes = parent.passes.saturating_add(1);
            parent.child_ids.insert(child_id);
        }

        info!(
            parent = %parent_id,
            child = %child_id,
            generation,
            "organism replicated"
        );
        Ok(child_id)
    }

    // -----------------------------------------------------------------------
    // Deletion
    // -----------------------------------------------------------------------

    /// Delete an organism. Terminal: the id is retired and never reused.
    ///
    /// Works for both eligibility-based cleanup and manual dismissal; the
    /// eligibility predicate is advisory, not enforced here. Parents'
    /// `child_ids` keep the deleted id -- the tolerated soft-dangling
    /// reference -- until [`sweep_references`] runs.
    ///
    /// # Errors
    ///
    /// Returns [`OrganismError::OrganismNotFound`] for an unknown or
    /// already-deleted id.
    ///
    /// [`sweep_references`]: Self::sweep_references
    pub fn delete(&mut self, id: OrganismId) -> Result<Organism, OrganismError> {
        let organism = self
            .organisms
            .remove(&id)
            .ok_or(OrganismError::OrganismNotFound(id))?;
        self.retired.insert(id);
        info!(organism = %id, generation = organism.generation, "organism deleted");
        Ok(organism)
    }

    /// Whether an id belongs to a deleted organism.
    pub fn is_retired(&self, id: OrganismId) -> bool {
        self.retired.contains(&id)
    }

    /// Remove retired ids from every parent's `child_ids`.
    ///
    /// The optional reference-integrity sweep. Returns how many dangling
    /// references were removed.
    pub fn sweep_references(&mut self) -> usize {
        let retired = self.retired.clone();
        let mut removed: usize = 0;
        for organism in self.organisms.values_mut() {
            let before = organism.child_ids.len();
            organism.child_ids.retain(|child| !retired.contains(child));
            removed = removed.saturating_add(before.saturating_sub(organism.child_ids.len()));
        }
        debug!(removed, "reference sweep complete");
        removed
    }

    /// Fail with [`OrganismError::PopulationFull`] at the active cap.
    fn ensure_capacity(&self) -> Result<(), OrganismError> {
        let active = self.active_count();
        if active >= self.max_active {
            return Err(OrganismError::PopulationFull {
                active,
                max: self.max_active,
            });
        }
        Ok(())
    }
}

impl Default for PopulationManager {
    fn default() -> Self {
        Self::new()
    }
}

/// The last `count` entries of a string list, cloned.
fn tail(entries: &[String], count: usize) -> Vec<String> {
    let skip = entries.len().saturating_sub(count);
    entries.iter().skip(skip).cloned().collect()
}

/// Clamp a [`Decimal`] to the `[0, 1]` range.
fn clamp_unit(value: Decimal) -> Decimal {
    if value < Decimal::ZERO {
        Decimal::ZERO
    } else if value > Decimal::ONE {
        Decimal::ONE
    } else {
        value
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    use super::*;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    /// Build a manager whose single organism has the given stats.
    fn manager_with(
        enrichment: Decimal,
        question_count: usize,
        active: bool,
    ) -> (PopulationManager, OrganismId) {
        let mut manager = PopulationManager::new();
        let id = manager.create(&mut rng()).ok().unwrap_or_default();
        for i in 0..question_count.saturating_sub(3) {
            let _ = manager.record_exchange(id, &format!("q{i}"), &format!("a{i}"));
        }
        let _ = manager.set_enrichment(id, enrichment);
        if let Some(organism) = manager.organisms.get_mut(&id) {
            organism.active = active;
        }
        (manager, id)
    }

    fn test_organism(passes: u32, receives: u32, enrichment: Decimal) -> Organism {
        Organism {
            id: OrganismId::new(),
            generation: 1,
            questions: Vec::new(),
            answers: Vec::new(),
            enrichment,
            active: true,
            parent_id: None,
            child_ids: BTreeSet::new(),
            passes,
            receives,
            created_at: Utc::now(),
        }
    }

    // -----------------------------------------------------------------------
    // Creation
    // -----------------------------------------------------------------------

    #[test]
    fn create_seeds_generation_one() {
        let mut manager = PopulationManager::new();
        let id = manager.create(&mut rng()).ok().unwrap_or_default();
        let organism = manager.get(id);

        assert_eq!(organism.map(|o| o.generation), Some(1));
        assert_eq!(organism.map(|o| o.passes), Some(0));
        assert_eq!(organism.map(|o| o.receives), Some(0));
        assert_eq!(organism.map(|o| o.questions.len()), Some(3));
        assert_eq!(organism.and_then(|o| o.parent_id), None);
    }

    #[test]
    fn create_samples_enrichment_in_seed_range() {
        let mut manager = PopulationManager::with_capacity(100);
        let mut rng = rng();
        for _ in 0..50 {
            let id = manager.create(&mut rng).ok().unwrap_or_default();
            let enrichment = manager.get(id).map(|o| o.enrichment).unwrap_or_default();
            assert!(enrichment >= Decimal::new(3, 1), "below 0.3: {enrichment}");
            assert!(enrichment <= Decimal::new(8, 1), "above 0.8: {enrichment}");
        }
    }

    #[test]
    fn create_fails_at_population_cap() {
        let mut manager = PopulationManager::with_capacity(2);
        let mut rng = rng();
        assert!(manager.create(&mut rng).is_ok());
        assert!(manager.create(&mut rng).is_ok());

        let result = manager.create(&mut rng);
        assert!(matches!(
            result,
            Err(OrganismError::PopulationFull { active: 2, max: 2 })
        ));
    }

    // -----------------------------------------------------------------------
    // Replication
    // -----------------------------------------------------------------------

    #[test]
    fn replicate_succeeds_with_eligible_parent() {
        let (mut manager, parent_id) = manager_with(Decimal::new(75, 2), 5, true);
        let child_id = manager.replicate(parent_id, &mut rng());
        assert!(child_id.is_ok());
        let child_id = child_id.ok().unwrap_or_default();

        let child = manager.get(child_id);
        assert_eq!(child.map(|o| o.generation), Some(2));
        assert_eq!(child.map(|o| o.receives), Some(1));
        assert_eq!(child.map(|o| o.passes), Some(0));
        assert_eq!(child.and_then(|o| o.parent_id), Some(parent_id));
        // Two inherited exchanges plus one derived pair.
        assert_eq!(child.map(|o| o.questions.len()), Some(3));
        assert_eq!(child.map(|o| o.answers.len()), Some(3));

        let parent = manager.get(parent_id);
        assert_eq!(parent.map(|o| o.passes), Some(1));
        assert_eq!(
            parent.map(|o| o.child_ids.contains(&child_id)),
            Some(true)
        );
    }

    #[test]
    fn replicate_fails_below_enrichment_threshold() {
        let (mut manager, parent_id) = manager_with(Decimal::new(5, 1), 5, true);
        let result = manager.replicate(parent_id, &mut rng());
        assert!(matches!(result, Err(OrganismError::NotEligible { .. })));
    }

    #[test]
    fn replicate_fails_at_exact_threshold() {
        // 0.7 is not above 0.7.
        let (mut manager, parent_id) = manager_with(Decimal::new(7, 1), 5, true);
        let result = manager.replicate(parent_id, &mut rng());
        assert!(matches!(result, Err(OrganismError::NotEligible { .. })));
    }

    #[test]
    fn replicate_fails_with_too_few_questions() {
        let (mut manager, parent_id) = manager_with(Decimal::new(75, 2), 4, true);
        let result = manager.replicate(parent_id, &mut rng());
        assert!(matches!(result, Err(OrganismError::NotEligible { .. })));
    }

    #[test]
    fn replicate_fails_for_inactive_parent() {
        let (mut manager, parent_id) = manager_with(Decimal::new(75, 2), 5, false);
        let result = manager.replicate(parent_id, &mut rng());
        assert!(matches!(result, Err(OrganismError::NotEligible { .. })));
    }

    #[test]
    fn replicate_fails_for_unknown_parent() {
        let mut manager = PopulationManager::new();
        let result = manager.replicate(OrganismId::new(), &mut rng());
        assert!(matches!(result, Err(OrganismError::OrganismNotFound(_))));
    }

    #[test]
    fn replicate_respects_population_cap() {
        let (mut manager, parent_id) = manager_with(Decimal::new(75, 2), 5, true);
        // Cap of 1: the parent alone fills the population.
        manager.max_active = 1;
        let result = manager.replicate(parent_id, &mut rng());
        assert!(matches!(result, Err(OrganismError::PopulationFull { .. })));
    }

    #[test]
    fn child_enrichment_stays_in_unit_range() {
        for seed in 0..20_u64 {
            let mut r = SmallRng::seed_from_u64(seed);
            let (mut manager, parent_id) = manager_with(Decimal::new(99, 2), 5, true);
            let child_id = manager.replicate(parent_id, &mut r).ok().unwrap_or_default();
            let enrichment = manager
                .get(child_id)
                .map(|o| o.enrichment)
                .unwrap_or_default();
            assert!(enrichment >= Decimal::ZERO);
            assert!(enrichment <= Decimal::ONE);
        }
    }

    // -----------------------------------------------------------------------
    // Deletion
    // -----------------------------------------------------------------------

    #[test]
    fn deletion_eligibility_requires_all_three_conditions() {
        assert!(is_eligible_for_deletion(&test_organism(
            2,
            2,
            Decimal::new(1, 1)
        )));
        // Same traffic, healthy enrichment: not eligible.
        assert!(!is_eligible_for_deletion(&test_organism(
            2,
            2,
            Decimal::new(5, 1)
        )));
        // Low enrichment but insufficient traffic: not eligible.
        assert!(!is_eligible_for_deletion(&test_organism(
            1,
            2,
            Decimal::new(1, 1)
        )));
        assert!(!is_eligible_for_deletion(&test_organism(
            2,
            1,
            Decimal::new(1, 1)
        )));
    }

    #[test]
    fn delete_is_terminal() {
        let mut manager = PopulationManager::new();
        let id = manager.create(&mut rng()).ok().unwrap_or_default();

        assert!(manager.delete(id).is_ok());
        assert!(manager.get(id).is_none());
        assert!(manager.is_retired(id));

        // Deleting again fails: the id is gone for good.
        assert!(matches!(
            manager.delete(id),
            Err(OrganismError::OrganismNotFound(_))
        ));
    }

    #[test]
    fn deleted_child_stays_in_parent_child_ids_until_sweep() {
        let (mut manager, parent_id) = manager_with(Decimal::new(75, 2), 5, true);
        let child_id = manager
            .replicate(parent_id, &mut rng())
            .ok()
            .unwrap_or_default();

        assert!(manager.delete(child_id).is_ok());

        // The soft-dangling reference is tolerated...
        assert_eq!(
            manager
                .get(parent_id)
                .map(|o| o.child_ids.contains(&child_id)),
            Some(true)
        );

        // ...until the explicit sweep removes it.
        assert_eq!(manager.sweep_references(), 1);
        assert_eq!(
            manager
                .get(parent_id)
                .map(|o| o.child_ids.contains(&child_id)),
            Some(false)
        );
    }

    #[test]
    fn sweep_with_no_dangling_references_removes_nothing() {
        let (mut manager, _) = manager_with(Decimal::new(75, 2), 5, true);
        assert_eq!(manager.sweep_references(), 0);
    }

    // -----------------------------------------------------------------------
    // Exchanges
    // -----------------------------------------------------------------------

    #[test]
    fn record_exchange_appends_in_parallel() {
        let mut manager = PopulationManager::new();
        let id = manager.create(&mut rng()).ok().unwrap_or_default();

        assert!(manager.record_exchange(id, "How?", "Like this.").is_ok());
        let organism = manager.get(id);
        assert_eq!(organism.map(|o| o.questions.len()), Some(4));
        assert_eq!(organism.map(|o| o.answers.len()), Some(4));
        assert_eq!(
            organism.and_then(|o| o.questions.last().cloned()),
            Some("How?".to_owned())
        );
    }

    #[test]
    fn record_exchange_unknown_organism_errors() {
        let mut manager = PopulationManager::new();
        let result = manager.record_exchange(OrganismId::new(), "q", "a");
        assert!(matches!(result, Err(OrganismError::OrganismNotFound(_))));
    }

    #[test]
    fn set_enrichment_clamps_to_unit_range() {
        let mut manager = PopulationManager::new();
        let id = manager.create(&mut rng()).ok().unwrap_or_default();

        assert!(manager.set_enrichment(id, Decimal::from(5)).is_ok());
        assert_eq!(manager.get(id).map(|o| o.enrichment), Some(Decimal::ONE));

        assert!(manager.set_enrichment(id, Decimal::from(-5)).is_ok());
        assert_eq!(manager.get(id).map(|o| o.enrichment), Some(Decimal::ZERO));
    }
}
