// ********* Input data structures ***********

use std::error::Error;
use std::fmt::Display;
use std::str::FromStr;

/// The identifier of a party or list, as provided by the caller.
pub type PartyId = String;

/// The number of a candidate inside the list of a party.
pub type CandidateNumber = u32;

/// The offices that can appear on a ballot.
///
/// The textual form of each key is the one used by the form layer
/// (`presidente`, `senador-nacional`, ...).
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash, Ord, PartialOrd)]
pub enum CategoryKey {
    Presidente,
    SenadorNacional,
    SenadorRegional,
    Diputado,
    Parlamento,
}

impl CategoryKey {
    /// All the keys, in the declaration order of the standard ballot.
    pub const ALL: [CategoryKey; 5] = [
        CategoryKey::Presidente,
        CategoryKey::SenadorNacional,
        CategoryKey::SenadorRegional,
        CategoryKey::Diputado,
        CategoryKey::Parlamento,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKey::Presidente => "presidente",
            CategoryKey::SenadorNacional => "senador-nacional",
            CategoryKey::SenadorRegional => "senador-regional",
            CategoryKey::Diputado => "diputado",
            CategoryKey::Parlamento => "parlamento",
        }
    }
}

impl Display for CategoryKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CategoryKey {
    type Err = BallotErrors;

    fn from_str(s: &str) -> Result<CategoryKey, BallotErrors> {
        CategoryKey::ALL
            .iter()
            .find(|k| k.as_str() == s)
            .copied()
            .ok_or_else(|| BallotErrors::UnknownCategory(s.to_string()))
    }
}

/// One preferential selection offered at validation time.
///
/// It is never stored: only the candidate number survives a successful
/// validation.
#[derive(Eq, PartialEq, Debug, Clone, Hash)]
pub struct CandidateRef {
    pub number: CandidateNumber,
    pub party: PartyId,
}

impl CandidateRef {
    pub fn new(number: CandidateNumber, party: &str) -> CandidateRef {
        CandidateRef {
            number,
            party: party.to_string(),
        }
    }
}

// ******** Output data structures *********

/// The classification of the selection made in one category.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum Disposition {
    /// Nothing selected.
    Blank,
    /// A party, optionally refined with preferential candidates of that party.
    Valid,
    /// A selection that cannot be counted.
    Null,
}

impl Disposition {
    /// The label used by the submission layer.
    pub fn as_str(&self) -> &'static str {
        match self {
            Disposition::Blank => "blanco",
            Disposition::Valid => "valido",
            Disposition::Null => "nulo",
        }
    }
}

impl Display for Disposition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The state of one office on the ballot.
#[derive(Eq, PartialEq, Debug, Clone)]
pub struct Category {
    pub key: CategoryKey,
    pub category_id: u32,
    pub display_name: String,
    pub disposition: Disposition,
    pub selected_party: Option<PartyId>,
    // Candidate numbers, in the order they were given.
    pub preferential_picks: Vec<CandidateNumber>,
    pub max_preferentials: u32,
}

impl Category {
    pub fn new(
        key: CategoryKey,
        category_id: u32,
        display_name: &str,
        max_preferentials: u32,
    ) -> Category {
        Category {
            key,
            category_id,
            display_name: display_name.to_string(),
            disposition: Disposition::Blank,
            selected_party: None,
            preferential_picks: Vec::new(),
            max_preferentials,
        }
    }

    pub(crate) fn clear(&mut self) {
        self.disposition = Disposition::Blank;
        self.selected_party = None;
        self.preferential_picks.clear();
    }
}

/// Errors raised while declaring a ballot.
///
/// Rejected selections are not errors: they end up as `Disposition::Null`.
#[derive(Eq, PartialEq, Debug, Clone)]
pub enum BallotErrors {
    EmptyBallot,
    DuplicateCategory(CategoryKey),
    UnknownCategory(String),
}

impl Error for BallotErrors {}

impl Display for BallotErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BallotErrors::EmptyBallot => write!(f, "A ballot needs at least one category"),
            BallotErrors::DuplicateCategory(key) => {
                write!(f, "Category {} is declared more than once", key)
            }
            BallotErrors::UnknownCategory(s) => write!(f, "Unknown category {:?}", s),
        }
    }
}
