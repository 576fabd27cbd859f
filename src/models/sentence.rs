use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::validation::sentence::{validate_sentence, ValidationError};

/// A stored sentence and the page it was taken from.
#[derive(Serialize, Clone, Debug)]
pub struct Sentence {
    pub id: i64,
    /// The owning user.
    pub user_id: i64,
    pub text: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

/// A sentence submitted by a user, not yet stored.
#[derive(Clone, Debug)]
pub struct NewSentence {
    pub user_id: i64,
    pub text: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
}

impl NewSentence {
    pub fn new(user_id: i64, text: String, url: String) -> Self {
        Self {
            user_id,
            text,
            url,
            created_at: Utc::now(),
        }
    }

    /// Runs the text and URL rules against this sentence.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_sentence(&self.text, &self.url)
    }
}

/// Which sentences a query may touch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SentenceFilter {
    All,
    Owner(i64),
}

impl SentenceFilter {
    pub(crate) fn owner(&self) -> Option<i64> {
        match self {
            SentenceFilter::All => None,
            SentenceFilter::Owner(user_id) => Some(*user_id),
        }
    }
}
