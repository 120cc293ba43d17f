pub mod builder;
mod config;
pub mod manual;
mod messages;
use log::{debug, info};

use std::fmt::Display;

pub use crate::config::*;
pub use crate::messages::*;

/// The selection state of one ballot.
///
/// The set of categories is fixed when the ballot is created. Each validation
/// call recomputes the disposition of its own category only.
///
/// Mutations on a category that was not declared on this ballot panic: this is
/// a bug in the calling code. Queries on such a category return a blank state.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct BallotState {
    categories: Vec<Category>,
}

impl Default for BallotState {
    fn default() -> Self {
        BallotState::new()
    }
}

impl BallotState {
    /// The standard ballot with the five offices.
    pub fn new() -> BallotState {
        BallotState {
            categories: vec![
                Category::new(CategoryKey::Presidente, 1, "Presidente", 0),
                Category::new(CategoryKey::SenadorNacional, 4, "Senador Nacional", 1),
                Category::new(CategoryKey::SenadorRegional, 5, "Senador Regional", 1),
                Category::new(CategoryKey::Diputado, 3, "Diputado", 2),
                Category::new(CategoryKey::Parlamento, 6, "Parlamento Andino", 2),
            ],
        }
    }

    // Invariant: keys are unique and all categories are blank.
    pub(crate) fn from_categories(categories: Vec<Category>) -> BallotState {
        BallotState { categories }
    }

    /// Validates a category without preferential votes (the president).
    ///
    /// Panics if the category is not declared or if it accepts preferential votes.
    pub fn validate_simple(&mut self, key: CategoryKey, party: Option<&str>) -> Disposition {
        let cat = self.category_mut(key);
        assert!(
            cat.max_preferentials == 0,
            "validate_simple: category {} accepts {} preferential votes",
            key,
            cat.max_preferentials
        );
        match non_empty(party) {
            None => {
                cat.disposition = Disposition::Blank;
                cat.selected_party = None;
            }
            Some(p) => {
                cat.disposition = Disposition::Valid;
                cat.selected_party = Some(p.to_string());
            }
        }
        debug!("validate_simple: {} {:?} -> {}", key, party, cat.disposition);
        cat.disposition
    }

    /// Validates a category that accepts preferential votes.
    ///
    /// Panics if the category is not declared.
    pub fn validate_with_preferentials(
        &mut self,
        key: CategoryKey,
        party: Option<&str>,
        candidates: &[CandidateRef],
    ) -> Disposition {
        self.classify(key, party, candidates).0
    }

    /// Same as `validate_with_preferentials`, but also returns the reason of a
    /// null disposition.
    pub fn classify(
        &mut self,
        key: CategoryKey,
        party: Option<&str>,
        candidates: &[CandidateRef],
    ) -> (Disposition, Option<ErrorKind>) {
        let cat = self.category_mut(key);
        let res = classify_category(cat, non_empty(party), candidates);
        debug!(
            "classify: {} party: {:?} candidates: {:?} -> {:?}",
            key, party, candidates, res
        );
        res
    }

    pub fn disposition(&self, key: CategoryKey) -> Disposition {
        self.category(key)
            .map(|c| c.disposition)
            .unwrap_or(Disposition::Blank)
    }

    pub fn selected_party(&self, key: CategoryKey) -> Option<&str> {
        self.category(key).and_then(|c| c.selected_party.as_deref())
    }

    pub fn preferential_picks(&self, key: CategoryKey) -> &[CandidateNumber] {
        self.category(key)
            .map(|c| c.preferential_picks.as_slice())
            .unwrap_or(&[])
    }

    /// Like `disposition`, for a key coming straight from the form layer.
    pub fn disposition_of(&self, key: &str) -> Disposition {
        key.parse::<CategoryKey>()
            .map(|k| self.disposition(k))
            .unwrap_or(Disposition::Blank)
    }

    pub fn selected_party_of(&self, key: &str) -> Option<&str> {
        key.parse::<CategoryKey>()
            .ok()
            .and_then(|k| self.selected_party(k))
    }

    pub fn preferential_picks_of(&self, key: &str) -> &[CandidateNumber] {
        match key.parse::<CategoryKey>() {
            Ok(k) => self.preferential_picks(k),
            Err(_) => &[],
        }
    }

    pub fn has_unresolved_nulls(&self) -> bool {
        self.categories
            .iter()
            .any(|c| c.disposition == Disposition::Null)
    }

    pub fn is_entirely_blank(&self) -> bool {
        self.categories
            .iter()
            .all(|c| c.disposition == Disposition::Blank)
    }

    /// The categories that are not blank, in declaration order.
    /// This is what gets submitted.
    pub fn export_non_blank(&self) -> Vec<&Category> {
        self.categories
            .iter()
            .filter(|c| c.disposition != Disposition::Blank)
            .collect()
    }

    pub fn reset_all(&mut self) {
        info!("Resetting {} categories", self.categories.len());
        for cat in self.categories.iter_mut() {
            cat.clear();
        }
    }

    /// All the categories, in declaration order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// One line per category for the confirmation view.
    pub fn summary(&self) -> Vec<CategorySummary> {
        self.categories
            .iter()
            .map(|c| CategorySummary {
                display_name: c.display_name.clone(),
                disposition: c.disposition,
                preferential_count: c.preferential_picks.len(),
            })
            .collect()
    }

    fn category(&self, key: CategoryKey) -> Option<&Category> {
        self.categories.iter().find(|c| c.key == key)
    }

    fn category_mut(&mut self, key: CategoryKey) -> &mut Category {
        match self.categories.iter_mut().find(|c| c.key == key) {
            Some(cat) => cat,
            None => panic!("Category {} is not declared on this ballot", key),
        }
    }
}

// A blank party id counts as no party.
fn non_empty(party: Option<&str>) -> Option<&str> {
    party.filter(|p| !p.is_empty())
}

// The decision table for categories with preferential votes. The first matching rule wins.
// The two null outcomes with a party keep the previous party and picks.
fn classify_category(
    cat: &mut Category,
    party: Option<&str>,
    candidates: &[CandidateRef],
) -> (Disposition, Option<ErrorKind>) {
    match (party, candidates) {
        (None, []) => {
            cat.clear();
            (Disposition::Blank, None)
        }
        (Some(p), []) => {
            cat.disposition = Disposition::Valid;
            cat.selected_party = Some(p.to_string());
            cat.preferential_picks.clear();
            (Disposition::Valid, None)
        }
        (Some(_), cands) if cands.len() > cat.max_preferentials as usize => {
            cat.disposition = Disposition::Null;
            (Disposition::Null, Some(ErrorKind::TooManyPreferentials))
        }
        (Some(p), cands) if cands.iter().any(|c| c.party != p) => {
            cat.disposition = Disposition::Null;
            (Disposition::Null, Some(ErrorKind::CandidatesFromOtherParties))
        }
        (Some(p), cands) => {
            cat.disposition = Disposition::Valid;
            cat.selected_party = Some(p.to_string());
            cat.preferential_picks = cands.iter().map(|c| c.number).collect();
            (Disposition::Valid, None)
        }
        (None, _) => {
            cat.clear();
            cat.disposition = Disposition::Null;
            (Disposition::Null, Some(ErrorKind::CandidatesWithoutParty))
        }
    }
}

/// The state of one category as shown on the confirmation view.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct CategorySummary {
    pub display_name: String,
    pub disposition: Disposition,
    pub preferential_count: usize,
}

impl Display for CategorySummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: ", self.display_name)?;
        match (self.disposition, self.preferential_count) {
            (Disposition::Valid, 0) => write!(f, "Válido"),
            (Disposition::Valid, 1) => write!(f, "Válido (con 1 preferencial)"),
            (Disposition::Valid, n) => write!(f, "Válido (con {} preferenciales)", n),
            (Disposition::Null, _) => write!(f, "Nulo"),
            (Disposition::Blank, _) => write!(f, "En Blanco"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn init() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    fn refs(picks: &[(u32, &str)]) -> Vec<CandidateRef> {
        picks
            .iter()
            .map(|(number, party)| CandidateRef::new(*number, party))
            .collect()
    }

    const PREFERENTIAL: [CategoryKey; 4] = [
        CategoryKey::SenadorNacional,
        CategoryKey::SenadorRegional,
        CategoryKey::Diputado,
        CategoryKey::Parlamento,
    ];

    #[test]
    fn starts_blank() {
        init();
        let state = BallotState::new();
        assert!(state.is_entirely_blank());
        assert!(!state.has_unresolved_nulls());
        assert!(state.export_non_blank().is_empty());
        let keys: Vec<CategoryKey> = state.categories().iter().map(|c| c.key).collect();
        assert_eq!(keys, CategoryKey::ALL.to_vec());
    }

    #[test]
    fn simple_party_or_blank() {
        init();
        let mut state = BallotState::new();
        let k = CategoryKey::Presidente;
        assert_eq!(state.validate_simple(k, Some("P3")), Disposition::Valid);
        assert_eq!(state.selected_party(k), Some("P3"));
        assert_eq!(state.validate_simple(k, None), Disposition::Blank);
        assert_eq!(state.selected_party(k), None);
        assert_eq!(state.validate_simple(k, Some("")), Disposition::Blank);
    }

    #[test]
    #[should_panic]
    fn simple_rejects_preferential_category() {
        let mut state = BallotState::new();
        state.validate_simple(CategoryKey::Diputado, Some("P1"));
    }

    #[test]
    #[should_panic]
    fn undeclared_category_panics() {
        let mut state = builder::Builder::new()
            .category(CategoryKey::Presidente, 1, "Presidente", 0)
            .unwrap()
            .build()
            .unwrap();
        state.validate_with_preferentials(CategoryKey::Diputado, Some("P1"), &[]);
    }

    #[test]
    fn nothing_selected_is_blank() {
        init();
        let mut state = BallotState::new();
        for k in PREFERENTIAL {
            state.validate_with_preferentials(k, Some("P1"), &refs(&[(1, "P1")]));
            assert_eq!(state.validate_with_preferentials(k, None, &[]), Disposition::Blank);
            assert_eq!(state.selected_party(k), None);
            assert!(state.preferential_picks(k).is_empty());
        }
        assert!(state.is_entirely_blank());
    }

    #[test]
    fn party_only_is_valid() {
        init();
        let mut state = BallotState::new();
        for k in PREFERENTIAL {
            state.validate_with_preferentials(k, Some("P2"), &refs(&[(4, "P2")]));
            assert_eq!(
                state.validate_with_preferentials(k, Some("P1"), &[]),
                Disposition::Valid
            );
            assert_eq!(state.selected_party(k), Some("P1"));
            assert!(state.preferential_picks(k).is_empty());
        }
    }

    #[test]
    fn diputado_two_picks() {
        init();
        let mut state = BallotState::new();
        let k = CategoryKey::Diputado;
        let res = state.validate_with_preferentials(k, Some("P1"), &refs(&[(5, "P1"), (9, "P1")]));
        assert_eq!(res, Disposition::Valid);
        assert_eq!(state.selected_party_of("diputado"), Some("P1"));
        assert_eq!(state.preferential_picks_of("diputado"), &[5, 9]);
    }

    #[test]
    fn picks_keep_input_order() {
        let mut state = BallotState::new();
        let k = CategoryKey::Parlamento;
        state.validate_with_preferentials(k, Some("P1"), &refs(&[(9, "P1"), (5, "P1")]));
        assert_eq!(state.preferential_picks(k), &[9, 5]);
    }

    #[test]
    fn too_many_picks_is_null() {
        init();
        let mut state = BallotState::new();
        let k = CategoryKey::Diputado;
        let res = state.classify(k, Some("P1"), &refs(&[(5, "P1"), (9, "P1"), (1, "P1")]));
        assert_eq!(res, (Disposition::Null, Some(ErrorKind::TooManyPreferentials)));
        // Checked before the party of the candidates.
        let res = state.classify(k, Some("P1"), &refs(&[(5, "P2"), (9, "P2"), (1, "P2")]));
        assert_eq!(res, (Disposition::Null, Some(ErrorKind::TooManyPreferentials)));
        let res = state.classify(
            CategoryKey::SenadorNacional,
            Some("P1"),
            &refs(&[(5, "P1"), (9, "P1")]),
        );
        assert_eq!(res, (Disposition::Null, Some(ErrorKind::TooManyPreferentials)));
    }

    #[test]
    fn other_party_pick_is_null() {
        init();
        let mut state = BallotState::new();
        let k = CategoryKey::Diputado;
        let res = state.classify(k, Some("P1"), &refs(&[(5, "P2")]));
        assert_eq!(
            res,
            (Disposition::Null, Some(ErrorKind::CandidatesFromOtherParties))
        );
        let res = state.validate_with_preferentials(k, Some("P1"), &refs(&[(5, "P1"), (7, "P3")]));
        assert_eq!(res, Disposition::Null);
    }

    #[test]
    fn rejected_picks_keep_previous_selection() {
        let mut state = BallotState::new();
        let k = CategoryKey::Diputado;
        state.validate_with_preferentials(k, Some("P1"), &refs(&[(5, "P1")]));
        state.validate_with_preferentials(k, Some("P4"), &refs(&[(2, "P2")]));
        assert_eq!(state.disposition(k), Disposition::Null);
        assert_eq!(state.selected_party(k), Some("P1"));
        assert_eq!(state.preferential_picks(k), &[5]);
        state.validate_with_preferentials(k, Some("P4"), &refs(&[(1, "P4"), (2, "P4"), (3, "P4")]));
        assert_eq!(state.selected_party(k), Some("P1"));
        assert_eq!(state.preferential_picks(k), &[5]);
    }

    #[test]
    fn picks_without_party_are_null_and_cleared() {
        init();
        let mut state = BallotState::new();
        let k = CategoryKey::Diputado;
        state.validate_with_preferentials(k, Some("P1"), &refs(&[(3, "P1")]));
        let res = state.classify(k, None, &refs(&[(5, "P1")]));
        assert_eq!(res, (Disposition::Null, Some(ErrorKind::CandidatesWithoutParty)));
        assert_eq!(state.selected_party(k), None);
        assert!(state.preferential_picks(k).is_empty());
    }

    #[test]
    fn null_is_not_terminal() {
        let mut state = BallotState::new();
        let k = CategoryKey::SenadorRegional;
        state.validate_with_preferentials(k, None, &refs(&[(5, "P1")]));
        assert!(state.has_unresolved_nulls());
        assert_eq!(
            state.validate_with_preferentials(k, Some("P1"), &refs(&[(5, "P1")])),
            Disposition::Valid
        );
        assert!(!state.has_unresolved_nulls());
        state.validate_with_preferentials(k, None, &refs(&[(5, "P1")]));
        assert_eq!(state.validate_with_preferentials(k, None, &[]), Disposition::Blank);
    }

    #[test]
    fn zero_capacity_rejects_any_pick() {
        let mut state = BallotState::new();
        let res = state.validate_with_preferentials(
            CategoryKey::Presidente,
            Some("P1"),
            &refs(&[(1, "P1")]),
        );
        assert_eq!(res, Disposition::Null);
    }

    #[test]
    fn reset_clears_everything() {
        init();
        let mut state = BallotState::new();
        state.validate_simple(CategoryKey::Presidente, Some("P1"));
        state.validate_with_preferentials(CategoryKey::Diputado, None, &refs(&[(5, "P1")]));
        state.validate_with_preferentials(CategoryKey::Parlamento, Some("P2"), &refs(&[(1, "P2")]));
        state.reset_all();
        assert!(state.is_entirely_blank());
        assert!(state.categories().iter().all(|c| c.selected_party.is_none()
            && c.preferential_picks.is_empty()));
        state.reset_all();
        assert_eq!(state, BallotState::new());
    }

    #[test]
    fn nulls_and_export() {
        init();
        let mut state = BallotState::new();
        state.validate_with_preferentials(CategoryKey::Parlamento, Some("P2"), &refs(&[(1, "P2")]));
        state.validate_simple(CategoryKey::Presidente, Some("P1"));
        state.validate_with_preferentials(CategoryKey::SenadorNacional, Some("P1"), &[]);
        state.validate_with_preferentials(CategoryKey::Diputado, Some("P1"), &refs(&[(1, "P9")]));
        assert!(state.has_unresolved_nulls());
        assert!(!state.is_entirely_blank());

        let exported: Vec<CategoryKey> = state.export_non_blank().iter().map(|c| c.key).collect();
        assert_eq!(
            exported,
            vec![
                CategoryKey::Presidente,
                CategoryKey::SenadorNacional,
                CategoryKey::Diputado,
                CategoryKey::Parlamento
            ]
        );

        state.validate_with_preferentials(CategoryKey::Diputado, None, &[]);
        assert!(!state.has_unresolved_nulls());
        assert_eq!(state.export_non_blank().len(), 3);
    }

    #[test]
    fn unknown_keys_default_on_reads() {
        let state = BallotState::new();
        assert_eq!(state.disposition_of("alcalde"), Disposition::Blank);
        assert_eq!(state.selected_party_of("alcalde"), None);
        assert!(state.preferential_picks_of("alcalde").is_empty());

        let partial = builder::Builder::new()
            .category(CategoryKey::Diputado, 3, "Diputado", 2)
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(partial.disposition(CategoryKey::Presidente), Disposition::Blank);
        assert!(partial.preferential_picks(CategoryKey::Presidente).is_empty());
    }

    #[test]
    fn summary_lines() {
        let mut state = BallotState::new();
        state.validate_simple(CategoryKey::Presidente, Some("P1"));
        state.validate_with_preferentials(CategoryKey::SenadorNacional, Some("P1"), &refs(&[(2, "P1")]));
        state.validate_with_preferentials(CategoryKey::Diputado, Some("P1"), &refs(&[(2, "P1"), (4, "P1")]));
        state.validate_with_preferentials(CategoryKey::Parlamento, None, &refs(&[(2, "P1")]));
        let lines: Vec<String> = state.summary().iter().map(|s| s.to_string()).collect();
        assert_eq!(
            lines,
            vec![
                "Presidente: Válido",
                "Senador Nacional: Válido (con 1 preferencial)",
                "Senador Regional: En Blanco",
                "Diputado: Válido (con 2 preferenciales)",
                "Parlamento Andino: Nulo",
            ]
        );
    }

    #[test]
    fn category_keys_parse() {
        assert_eq!("senador-nacional".parse::<CategoryKey>(), Ok(CategoryKey::SenadorNacional));
        assert_eq!(
            "Diputado".parse::<CategoryKey>(),
            Err(BallotErrors::UnknownCategory("Diputado".to_string()))
        );
        for k in CategoryKey::ALL {
            assert_eq!(k.as_str().parse::<CategoryKey>(), Ok(k));
        }
    }
}
