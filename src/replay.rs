use log::{debug, info, warn};

use ballot_state::*;
use snafu::{prelude::*, Snafu};

use std::fs;

use serde::de::DeserializeOwned;
use serde_json::json;
use serde_json::Value as JSValue;
use text_diff::print_diff;

pub mod config_reader;

use crate::replay::config_reader::*;

#[derive(Debug, Snafu)]
pub enum BallotCheckError {
    #[snafu(display("Error opening file {path}"))]
    OpeningJson { source: std::io::Error, path: String },
    #[snafu(display("Error parsing the JSON content of {path}"))]
    ParsingJson {
        source: serde_json::Error,
        path: String,
    },
    #[snafu(display("Error writing the output to {path}"))]
    WritingOutput { source: std::io::Error, path: String },
    #[snafu(display("Invalid ballot layout"))]
    InvalidLayout { source: BallotErrors },
    #[snafu(display("Selection #{index}: unknown category {key:?}"))]
    UnknownCategory { key: String, index: usize },
    #[snafu(display("Selection #{index}: category {key} is not on this ballot"))]
    UndeclaredCategory { key: CategoryKey, index: usize },

    #[snafu(whatever, display("{message}"))]
    Whatever {
        message: String,
        #[snafu(source(from(Box<dyn std::error::Error>, Some)))]
        source: Option<Box<dyn std::error::Error>>,
    },
}

pub type BCResult<T> = Result<T, BallotCheckError>;

fn read_json<T: DeserializeOwned>(path: &str) -> BCResult<T> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read content: {:?}", contents);
    serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu { path })
}

/// The payload sent to the backend: one object per category that is not blank.
pub fn build_payload_js(ballot: &BallotState) -> JSValue {
    let l: Vec<JSValue> = ballot
        .export_non_blank()
        .iter()
        .map(|c| {
            json!({
                "id_categoria": c.category_id,
                "nombre": c.display_name,
                "estado": c.disposition.as_str(),
                "id_partido": c.selected_party,
                "candidatos_preferenciales": c.preferential_picks,
            })
        })
        .collect();
    JSValue::Array(l)
}

/// Applies one selection to the ballot.
///
/// Categories without preferential votes go through the simple rule as long as
/// no candidate is marked. Anything else uses the full rule.
pub fn apply_selection(
    ballot: &mut BallotState,
    index: usize,
    sel: &Selection,
) -> BCResult<Disposition> {
    let key = sel
        .category
        .parse::<CategoryKey>()
        .ok()
        .context(UnknownCategorySnafu {
            key: sel.category.as_str(),
            index,
        })?;
    let max_preferentials = ballot
        .categories()
        .iter()
        .find(|c| c.key == key)
        .map(|c| c.max_preferentials)
        .context(UndeclaredCategorySnafu { key, index })?;

    let party = sel.party.as_deref();
    if max_preferentials == 0 && sel.candidates.is_empty() {
        return Ok(ballot.validate_simple(key, party));
    }

    let candidates: Vec<CandidateRef> = sel
        .candidates
        .iter()
        .map(|c| CandidateRef::new(c.numero, c.id_partido.as_str()))
        .collect();
    let (disposition, reason) = ballot.classify(key, party, &candidates);
    if let Some(kind) = reason {
        warn!(
            "Selection #{}: {} is null ({}): {}",
            index,
            key,
            kind.as_str(),
            kind.message()
        );
    }
    Ok(disposition)
}

/// Replays all the selections in order on the ballot described by the layout.
pub fn replay_selections(
    layout: Option<&BallotLayout>,
    selections: &SelectionFile,
) -> BCResult<BallotState> {
    let mut ballot = match layout {
        Some(l) => l.build()?,
        None => BallotState::new(),
    };
    info!(
        "Replaying {} selections on {} categories",
        selections.selections.len(),
        ballot.categories().len()
    );
    for (idx, sel) in selections.selections.iter().enumerate() {
        let index = idx + 1;
        let disposition = apply_selection(&mut ballot, index, sel)?;
        debug!(
            "replay_selections: #{} {} -> {}",
            index, sel.category, disposition
        );
    }
    Ok(ballot)
}

fn write_output(out: &str, content: &str) -> BCResult<()> {
    if out == "stdout" {
        println!("{}", content);
        Ok(())
    } else {
        info!("Writing output to {}", out);
        fs::write(out, content).context(WritingOutputSnafu { path: out })
    }
}

pub fn run_replay(
    config_path: Option<String>,
    input_path: String,
    out_path: Option<String>,
    check_reference_path: Option<String>,
) -> BCResult<()> {
    let layout: Option<BallotLayout> = match config_path {
        Some(p) => {
            info!("Reading ballot layout {:?}", p);
            Some(read_json(p.as_str())?)
        }
        None => None,
    };
    let selections: SelectionFile = read_json(input_path.as_str())?;

    let ballot = replay_selections(layout.as_ref(), &selections)?;

    for line in ballot.summary() {
        println!("{}", line);
    }
    if ballot.has_unresolved_nulls() {
        warn!("The ballot has null categories");
    }
    if ballot.is_entirely_blank() {
        info!("The ballot is entirely blank");
    }

    let payload_js = build_payload_js(&ballot);
    let pretty_js_payload =
        serde_json::to_string_pretty(&payload_js).context(ParsingJsonSnafu { path: "output" })?;

    if let Some(out) = out_path {
        write_output(out.as_str(), pretty_js_payload.as_str())?;
    }

    // The reference payload, if provided for comparison
    if let Some(reference_p) = check_reference_path {
        let reference: JSValue = read_json(reference_p.as_str())?;
        let pretty_js_reference = serde_json::to_string_pretty(&reference)
            .context(ParsingJsonSnafu { path: reference_p.as_str() })?;
        if pretty_js_reference != pretty_js_payload {
            warn!("Found differences with the reference file");
            print_diff(
                pretty_js_reference.as_str(),
                pretty_js_payload.as_str(),
                "\n",
            );
            whatever!(
                "Difference detected between the output and the reference in {}",
                reference_p
            )
        }
    }

    Ok(())
}

#[cfg(test)]
fn run_replay_test(test_name: &str) -> BCResult<()> {
    let test_dir = option_env!("BALLOT_TEST_DIR")
        .unwrap_or(concat!(env!("CARGO_MANIFEST_DIR"), "/tests"));
    info!("Running test {}", test_name);
    let config_p = format!("{}/{}/{}_config.json", test_dir, test_name, test_name);
    let config = if std::path::Path::new(config_p.as_str()).exists() {
        Some(config_p)
    } else {
        None
    };
    run_replay(
        config,
        format!("{}/{}/{}_selections.json", test_dir, test_name, test_name),
        None,
        Some(format!(
            "{}/{}/{}_expected.json",
            test_dir, test_name, test_name
        )),
    )
}

#[cfg(test)]
pub fn test_wrapper(test_name: &str) {
    if let Err(e) = run_replay_test(test_name) {
        panic!("Test {} failed: {}", test_name, e);
    }
}
