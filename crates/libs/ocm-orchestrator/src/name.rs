//! Job name parser.
//!
//! Job names encode what they test: `share-with-nc-v27-oc-v10.yml` is the
//! `share-with` test from `nc v27` to `oc v10`, and `login-nc-sm-v27.yml` is
//! the `login` test of `nc sm v27`. Platform labels may span several tokens and
//! always end with a version token.

use std::fmt;

use crate::{error::MalformedJobNameReason, prelude::*};

/// Test type of single-platform jobs.
pub const LOGIN: &str = "login";

/// Test type and platforms encoded in a job name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ParsedJobName {
    pub test_type: String,
    pub sender: String,
    pub receiver: String,
}

impl fmt::Display for ParsedJobName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} -> {}", self.test_type, self.sender, self.receiver)
    }
}

/// Whether `token` looks like a version (`v` followed by a digit).
pub fn is_version_token(token: &str) -> bool {
    token
        .strip_prefix('v')
        .and_then(|rest| rest.chars().next())
        .is_some_and(|c| c.is_ascii_digit())
}

/// Strip a `.yml`/`.yaml` extension.
fn base_name(name: &str) -> &str {
    name.strip_suffix(".yml")
        .or_else(|| name.strip_suffix(".yaml"))
        .unwrap_or(name)
}

/// Whether `tokens` name a single-platform `login` job: `login` followed by one
/// platform label whose version token ends the name. A `login` name without
/// any version token also counts, so it is reported as missing its version.
fn is_single_platform(tokens: &[&str]) -> bool {
    match tokens.split_first() {
        Some((&LOGIN, rest)) => match rest.iter().position(|token| is_version_token(token)) {
            Some(version) => version + 1 == rest.len(),
            None => true,
        },
        _ => false,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    ReadingTestType,
    ReadingSender,
    ReadingReceiver,
    Done,
}

/// Parse a job name into test type, sender and receiver.
///
/// ```rust
/// use ocm_orchestrator::name::parse_job_name;
///
/// let parsed = parse_job_name("invite-link-ocis-v7-oc-sm-v10.yml").unwrap();
/// assert_eq!(parsed.test_type, "invite-link");
/// assert_eq!(parsed.sender, "ocis v7");
/// assert_eq!(parsed.receiver, "oc sm v10");
/// ```
pub fn parse_job_name(name: &str) -> Result<ParsedJobName> {
    let malformed = |reason| Error::MalformedJobName {
        name: name.to_string(),
        reason,
    };

    let mut state = State::ReadingTestType;
    let mut test_type: Vec<&str> = Vec::with_capacity(2);
    let mut sender: Vec<&str> = Vec::new();
    let mut receiver: Vec<&str> = Vec::new();
    let tokens: Vec<&str> = base_name(name).split('-').collect();
    let login = is_single_platform(&tokens);

    for token in tokens {
        state = match state {
            State::ReadingTestType => {
                test_type.push(token);
                if login {
                    State::ReadingSender
                } else if test_type.len() == 2 {
                    State::ReadingSender
                } else {
                    State::ReadingTestType
                }
            }
            State::ReadingSender => {
                sender.push(token);
                match (is_version_token(token), login) {
                    (false, _) => State::ReadingSender,
                    (true, true) => State::Done,
                    (true, false) => State::ReadingReceiver,
                }
            }
            State::ReadingReceiver => {
                receiver.push(token);
                if is_version_token(token) {
                    State::Done
                } else {
                    State::ReadingReceiver
                }
            }
            State::Done => return Err(malformed(MalformedJobNameReason::TrailingTokens)),
        };
    }

    match state {
        State::Done => {}
        State::ReadingTestType => return Err(malformed(MalformedJobNameReason::MissingTestType)),
        State::ReadingSender if login => {
            return Err(malformed(MalformedJobNameReason::MissingPlatformVersion));
        }
        State::ReadingSender => {
            return Err(malformed(MalformedJobNameReason::MissingSenderVersion));
        }
        State::ReadingReceiver => {
            return Err(malformed(MalformedJobNameReason::MissingReceiverVersion));
        }
    }

    let sender = sender.join(" ");
    let receiver = if login {
        sender.clone()
    } else {
        receiver.join(" ")
    };
    Ok(ParsedJobName {
        test_type: test_type.join("-"),
        sender,
        receiver,
    })
}
