//! Selection of the jobs a run triggers.

use std::{collections::HashSet, fmt};

use tracing::warn;

use crate::prelude::*;

/// The jobs to run, resolved once at start-up.
///
/// A non-empty override (debug) list always beats the full matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobSelection {
    /// The debug override list.
    Override(Vec<String>),
    /// The full matrix.
    Full(Vec<String>),
}

impl JobSelection {
    /// Pick the override list when non-empty, the full list otherwise.
    ///
    /// Duplicate names are dropped, keeping their first occurrence, so every
    /// job name appears once per run.
    pub fn resolve(override_jobs: Vec<String>, full: Vec<String>) -> Result<Self> {
        let selection = if override_jobs.is_empty() {
            Self::Full(dedup(full))
        } else {
            Self::Override(dedup(override_jobs))
        };
        if selection.jobs().is_empty() {
            return Err(Error::NoJobs);
        }
        Ok(selection)
    }

    /// Split a comma separated list, trimming entries and dropping empty ones.
    pub fn parse_csv(csv: &str) -> Vec<String> {
        csv.split(',')
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .map(String::from)
            .collect()
    }

    /// The selected jobs in trigger order.
    pub fn jobs(&self) -> &[String] {
        match self {
            Self::Override(jobs) | Self::Full(jobs) => jobs,
        }
    }

    /// Human readable origin of the selection.
    pub fn source(&self) -> &'static str {
        match self {
            Self::Override(_) => "override",
            Self::Full(_) => "full",
        }
    }
}

fn dedup(jobs: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    jobs.into_iter()
        .filter(|job| {
            let first = seen.insert(job.clone());
            if !first {
                warn!("Ignoring duplicate job {job}");
            }
            first
        })
        .collect()
}

impl fmt::Display for JobSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} job(s) from the {} list", self.jobs().len(), self.source())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_csv_trims_and_drops_empty_entries() {
        let jobs = JobSelection::parse_csv(" login-nc-v27.yml, ,share-with-nc-v27-oc-v10.yml,");
        assert_eq!(
            jobs,
            names(&["login-nc-v27.yml", "share-with-nc-v27-oc-v10.yml"])
        );
    }

    #[test]
    fn test_full_list_when_override_is_empty() {
        let selection = JobSelection::resolve(vec![], names(&["a.yml", "b.yml"])).unwrap();
        assert_eq!(selection, JobSelection::Full(names(&["a.yml", "b.yml"])));
        assert_eq!(selection.to_string(), "2 job(s) from the full list");
    }

    #[test]
    fn test_override_wins() {
        let selection = JobSelection::resolve(names(&["c.yml"]), names(&["a.yml"])).unwrap();
        assert_eq!(selection.jobs(), &names(&["c.yml"])[..]);
        assert_eq!(selection.source(), "override");
    }

    #[test]
    fn test_duplicates_keep_first_occurrence() {
        let selection =
            JobSelection::resolve(vec![], names(&["b.yml", "a.yml", "b.yml"])).unwrap();
        assert_eq!(selection.jobs(), &names(&["b.yml", "a.yml"])[..]);
    }

    #[test]
    fn test_nothing_to_run() {
        assert!(matches!(
            JobSelection::resolve(vec![], vec![]),
            Err(Error::NoJobs)
        ));
    }
}
