use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// The operator session a questionnaire runs under.
///
/// Credentials are checked before a session is built; this only carries
/// the already-validated identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SessionContext {
    pub nurse_name: String,
    pub health_center: String,
    pub robot_id: String,
}

impl SessionContext {
    pub fn new(
        nurse_name: impl Into<String>,
        health_center: impl Into<String>,
        robot_id: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let nurse_name = nurse_name.into().trim().to_string();
        let health_center = health_center.into().trim().to_string();
        if nurse_name.is_empty() {
            return Err(CoreError::MissingField("nurse_name".to_string()));
        }
        if health_center.is_empty() {
            return Err(CoreError::MissingField("health_center".to_string()));
        }
        Ok(Self {
            nurse_name,
            health_center,
            robot_id: robot_id.into(),
        })
    }
}
