use crate::sync::VoteSync;

#[derive(Clone)]
pub struct AppState {
    pub sync: VoteSync,
}

impl AppState {
    pub fn new(sync: VoteSync) -> Self {
        Self { sync }
    }
}
