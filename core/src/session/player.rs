use crate::game_data::job_name;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub job_id: String,
    pub job_name: String,
}

impl Player {
    pub fn new(id: &str, name: &str, job_id: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            job_id: job_id.to_string(),
            job_name: job_name(job_id).to_string(),
        }
    }
}
