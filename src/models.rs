use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Server-maintained tally. `total_votes` is taken from the service as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct VoteStats {
    pub boy_votes: u64,
    pub girl_votes: u64,
    pub total_votes: u64,
}

impl VoteStats {
    pub fn new(boy_votes: u64, girl_votes: u64, total_votes: u64) -> Self {
        Self {
            boy_votes,
            girl_votes,
            total_votes,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoteChoice {
    Boy,
    Girl,
}

impl VoteChoice {
    pub fn as_str(self) -> &'static str {
        match self {
            VoteChoice::Boy => "boy",
            VoteChoice::Girl => "girl",
        }
    }
}

impl fmt::Display for VoteChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("vote_type must be 'boy' or 'girl', got '{0}'")]
pub struct UnknownChoice(pub String);

impl FromStr for VoteChoice {
    type Err = UnknownChoice;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "boy" => Ok(VoteChoice::Boy),
            "girl" => Ok(VoteChoice::Girl),
            other => Err(UnknownChoice(other.to_string())),
        }
    }
}

/// Session-local voting state.
///
/// `NotVoted -> Pending` happens only when a vote is attempted. `Pending`
/// resolves to `Voted` on acceptance and back to `NotVoted` otherwise.
/// `Voted` is terminal for the lifetime of the process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VoteStatus {
    #[default]
    NotVoted,
    Pending,
    Voted,
}

/// Body of the service's read endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsEnvelope {
    pub stats: VoteStats,
}

/// Body sent to the service's write endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRequest {
    pub vote_type: VoteChoice,
}

/// Body returned by the service's write endpoint. An accepted vote must
/// carry the updated tally; a rejected one may carry stale stats, which are
/// dropped.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawReceipt")]
pub enum VoteReceipt {
    Accepted(VoteStats),
    Rejected,
}

#[derive(Deserialize)]
struct RawReceipt {
    success: bool,
    #[serde(default)]
    stats: Option<VoteStats>,
}

impl TryFrom<RawReceipt> for VoteReceipt {
    type Error = &'static str;

    fn try_from(raw: RawReceipt) -> Result<Self, Self::Error> {
        match (raw.success, raw.stats) {
            (true, Some(stats)) => Ok(VoteReceipt::Accepted(stats)),
            (true, None) => Err("accepted vote is missing stats"),
            (false, _) => Ok(VoteReceipt::Rejected),
        }
    }
}

/// Vote payload accepted by the page's own JSON API.
#[derive(Debug, Deserialize)]
pub struct VoteForm {
    pub vote_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageState {
    pub stats: VoteStats,
    pub status: VoteStatus,
    pub boy_percent: f64,
    pub girl_percent: f64,
    pub can_vote: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Info,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn info(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Notice carried through the no-JS form redirect as `/?notice=<kind>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Counted,
    AlreadyVoted,
    InFlight,
    Rejected,
    Failed,
}

impl NoticeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            NoticeKind::Counted => "counted",
            NoticeKind::AlreadyVoted => "already_voted",
            NoticeKind::InFlight => "in_flight",
            NoticeKind::Rejected => "rejected",
            NoticeKind::Failed => "failed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "counted" => Some(NoticeKind::Counted),
            "already_voted" => Some(NoticeKind::AlreadyVoted),
            "in_flight" => Some(NoticeKind::InFlight),
            "rejected" => Some(NoticeKind::Rejected),
            "failed" => Some(NoticeKind::Failed),
            _ => None,
        }
    }

    pub fn notice(self) -> Notice {
        match self {
            NoticeKind::Counted => Notice::info(
                "Thank you!",
                "Your vote is counted. We will know the answer soon!",
            ),
            NoticeKind::AlreadyVoted => {
                Notice::info("You have already voted!", "Thanks for taking part.")
            }
            NoticeKind::InFlight => Notice::info("Hold on", "Your vote is still being sent."),
            NoticeKind::Rejected => Notice::error(
                "Vote not counted",
                "The vote service did not accept the vote. Please try again.",
            ),
            NoticeKind::Failed => {
                Notice::error("Error", "Could not send your vote. Please try again.")
            }
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteOutcome {
    pub notice: Notice,
    pub state: PageState,
}
