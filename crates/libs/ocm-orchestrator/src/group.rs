//! Groups job results by test type, with the sender and receiver labels that
//! form the axes of each matrix.

use std::collections::{BTreeMap, BTreeSet};

use crate::{
    job::{Conclusion, JobResult},
    name::parse_job_name,
    prelude::*,
};

/// One job result placed in its matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupEntry {
    pub sender: String,
    pub receiver: String,
    pub name: String,
    pub run_id: u64,
    pub conclusion: Conclusion,
}

/// Results of one test type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultGroup {
    /// Distinct sender labels, sorted.
    pub senders: BTreeSet<String>,
    /// Distinct receiver labels, sorted.
    pub receivers: BTreeSet<String>,
    /// Entries in result order.
    pub entries: Vec<GroupEntry>,
}

impl ResultGroup {
    /// Entry for the `sender` to `receiver` pair, if that pair ran.
    pub fn entry(&self, sender: &str, receiver: &str) -> Option<&GroupEntry> {
        self.entries
            .iter()
            .find(|entry| entry.sender == sender && entry.receiver == receiver)
    }
}

/// Results grouped by test type, sorted by test type.
pub type ResultGroups = BTreeMap<String, ResultGroup>;

/// Fold `results` into per test type groups.
///
/// Fails on the first job name that cannot be parsed: a skipped entry would
/// shift the matrix.
pub fn group_results(results: &[JobResult]) -> Result<ResultGroups> {
    let mut groups = ResultGroups::new();
    for result in results {
        let parsed = parse_job_name(&result.name)?;
        let group = groups.entry(parsed.test_type).or_default();
        group.senders.insert(parsed.sender.clone());
        group.receivers.insert(parsed.receiver.clone());
        group.entries.push(GroupEntry {
            sender: parsed.sender,
            receiver: parsed.receiver,
            name: result.name.clone(),
            run_id: result.run_id,
            conclusion: result.conclusion,
        });
    }
    Ok(groups)
}
