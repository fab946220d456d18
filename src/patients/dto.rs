use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::repo_types::Patient;

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreatePatientRequest {
    pub name: String,
    pub email: String,
    pub weight: f64,
    pub height: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdatePatientRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub weight: Option<f64>,
    pub height: Option<f64>,
}

impl UpdatePatientRequest {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.weight.is_none()
            && self.height.is_none()
    }
}

#[derive(Debug, Serialize)]
pub struct PublicPatient {
    pub patient_uuid: Uuid,
    pub name: String,
    pub email: String,
    pub weight: f64,
    pub height: f64,
}

impl From<Patient> for PublicPatient {
    fn from(p: Patient) -> Self {
        Self {
            patient_uuid: p.patient_uuid,
            name: p.name,
            email: p.email,
            weight: p.weight,
            height: p.height,
        }
    }
}
