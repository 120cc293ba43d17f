/// The reasons a selection can be rejected, as named by the form layer.
#[derive(Eq, PartialEq, Debug, Clone, Copy, Hash)]
pub enum ErrorKind {
    /// Preferential candidates were marked without a party.
    CandidatesWithoutParty,
    /// More preferential candidates than the category allows.
    TooManyPreferentials,
    /// Some preferential candidates belong to another party.
    CandidatesFromOtherParties,
    /// More than one party marked in the same category. Only detected by the form layer.
    MultipleParty,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::CandidatesWithoutParty => "candidatos-sin-partido",
            ErrorKind::TooManyPreferentials => "demasiados-preferenciales",
            ErrorKind::CandidatesFromOtherParties => "candidatos-diferentes-partidos",
            ErrorKind::MultipleParty => "multiple-partido",
        }
    }

    pub fn message(&self) -> &'static str {
        error_message(self.as_str())
    }
}

pub const FALLBACK_MESSAGE: &str = "Selección inválida.";

/// Returns the explanation shown to the voter for an error key.
///
/// Unknown keys get a generic explanation.
pub fn error_message(kind: &str) -> &'static str {
    match kind {
        "candidatos-sin-partido" => {
            "Debes seleccionar primero el partido antes de marcar candidatos preferenciales."
        }
        "demasiados-preferenciales" => {
            "Has seleccionado más candidatos preferenciales de los permitidos (máximo 2)."
        }
        "candidatos-diferentes-partidos" => {
            "Los candidatos preferenciales deben ser del mismo partido seleccionado."
        }
        "multiple-partido" => "Solo puedes seleccionar un partido político por categoría.",
        _ => FALLBACK_MESSAGE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys() {
        assert_eq!(
            error_message("multiple-partido"),
            "Solo puedes seleccionar un partido político por categoría."
        );
        assert_eq!(
            ErrorKind::TooManyPreferentials.message(),
            "Has seleccionado más candidatos preferenciales de los permitidos (máximo 2)."
        );
    }

    #[test]
    fn unknown_key_falls_back() {
        assert_eq!(error_message("partido-fantasma"), "Selección inválida.");
        assert_eq!(error_message(""), FALLBACK_MESSAGE);
    }
}
