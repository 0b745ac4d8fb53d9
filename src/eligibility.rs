use serde::{Deserialize, Serialize};

pub const VOTING_AGE: u32 = 18;

const INELIGIBLE_MESSAGE: &str = "You must be 18 years old and a U.S. citizen to vote.";
const REGISTER_FIRST_MESSAGE: &str = "You need to register to vote first. Check the voting information page for registration details.";
const ELIGIBLE_MESSAGE: &str =
    "Great! You're eligible to vote. Explore the features below to get informed.";

/// Answers to the entry quiz.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct QuizAnswers {
    pub age: Option<u32>,
    /// "yes" or "no"
    pub citizenship: Option<String>,
    /// "yes" or "no"
    pub registered: Option<String>,
    pub address: Option<String>,
    pub election_type: Option<String>,
}

/// Page the presentation layer should continue to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NextPage {
    VotingInfo,
    Candidates,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum QuizOutcome {
    Ineligible,
    NeedsRegistration,
    Eligible {
        address: Option<String>,
        election_type: Option<String>,
    },
}

impl QuizOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            QuizOutcome::Ineligible => INELIGIBLE_MESSAGE,
            QuizOutcome::NeedsRegistration => REGISTER_FIRST_MESSAGE,
            QuizOutcome::Eligible { .. } => ELIGIBLE_MESSAGE,
        }
    }

    pub fn next_page(&self) -> NextPage {
        match self {
            QuizOutcome::Ineligible | QuizOutcome::NeedsRegistration => NextPage::VotingInfo,
            QuizOutcome::Eligible { .. } => NextPage::Candidates,
        }
    }
}

fn is_yes(answer: Option<&str>) -> bool {
    answer.is_some_and(|a| a.trim().eq_ignore_ascii_case("yes"))
}

fn is_no(answer: Option<&str>) -> bool {
    answer.is_some_and(|a| a.trim().eq_ignore_ascii_case("no"))
}

/// Decides where a quiz taker goes next.
///
/// A missing age counts as under age. Only an explicit "no" to the
/// registration question sends an eligible voter to register first.
pub fn evaluate(answers: &QuizAnswers) -> QuizOutcome {
    let of_age = answers.age.is_some_and(|age| age >= VOTING_AGE);
    if !of_age || !is_yes(answers.citizenship.as_deref()) {
        return QuizOutcome::Ineligible;
    }

    if is_no(answers.registered.as_deref()) {
        return QuizOutcome::NeedsRegistration;
    }

    QuizOutcome::Eligible {
        address: answers.address.clone(),
        election_type: answers.election_type.clone(),
    }
}
