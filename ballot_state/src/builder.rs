pub use crate::config::*;
use crate::BallotState;

use log::debug;

/// A builder for declaring the categories of a ballot.
///
/// The standard ballot is available with `BallotState::new()`. The builder is
/// only needed when a ballot carries a different set of offices.
///
/// ```
/// use ballot_state::builder::Builder;
/// use ballot_state::{CandidateRef, CategoryKey, Disposition};
/// # use ballot_state::BallotErrors;
///
/// let mut ballot = Builder::new()
///     .category(CategoryKey::Presidente, 1, "Presidente", 0)?
///     .category(CategoryKey::Diputado, 3, "Diputado", 2)?
///     .build()?;
///
/// ballot.validate_with_preferentials(
///     CategoryKey::Diputado,
///     Some("P1"),
///     &[CandidateRef::new(5, "P1")],
/// );
/// assert_eq!(ballot.disposition(CategoryKey::Diputado), Disposition::Valid);
///
/// # Ok::<(), BallotErrors>(())
/// ```
#[derive(Default)]
pub struct Builder {
    pub(crate) _categories: Vec<Category>,
}

impl Builder {
    pub fn new() -> Builder {
        Builder {
            _categories: Vec::new(),
        }
    }

    /// Declares one more category. Categories keep the order in which they are declared.
    ///
    /// max_preferentials: the number of preferential candidates that may be marked in
    /// this category. 0 means the category only accepts a party.
    pub fn category(
        mut self,
        key: CategoryKey,
        category_id: u32,
        display_name: &str,
        max_preferentials: u32,
    ) -> Result<Builder, BallotErrors> {
        if self._categories.iter().any(|c| c.key == key) {
            return Err(BallotErrors::DuplicateCategory(key));
        }
        self._categories.push(Category::new(
            key,
            category_id,
            display_name,
            max_preferentials,
        ));
        Ok(self)
    }

    pub fn build(self) -> Result<BallotState, BallotErrors> {
        if self._categories.is_empty() {
            return Err(BallotErrors::EmptyBallot);
        }
        debug!("build: categories: {:?}", self._categories);
        Ok(BallotState::from_categories(self._categories))
    }
}
