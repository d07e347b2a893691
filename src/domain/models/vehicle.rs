use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Vehicle {
    pub id: String,
    pub plate: String,
    pub vehicle_type: String,
}
