use serde::{Deserialize, Serialize};

/// Identity, contact and ESG metadata for a reporting entity.
///
/// Every field defaults when the backend omits it; the profile is a
/// read-only snapshot of whatever the server returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompanyProfile {
    pub id: String,
    pub name: String,
    pub industry: String,
    pub country: String,
    pub contact: Contact,
    /// e.g. "GRI", "IFRS S2", "TCFD"
    pub reporting_frameworks: Vec<String>,
    pub area_of_interest: Option<AreaOfInterest>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub name: String,
    pub email: String,
    pub phone: String,
}

/// Geographic area a company reports soil and land data for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AreaOfInterest {
    pub name: String,
    pub area_hectares: Option<f64>,
    /// Polygon ring as `[longitude, latitude]` pairs
    pub coordinates: Vec<[f64; 2]>,
}

impl CompanyProfile {
    /// Name for headers, falling back to the id when the name is blank.
    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            &self.id
        } else {
            &self.name
        }
    }
}

#[cfg(test)]
mod tests {
    use super::CompanyProfile;

    #[test]
    fn test_partial_profile_defaults() {
        let company: CompanyProfile =
            serde_json::from_str(r#"{"id": "c-17", "reporting_frameworks": ["GRI"]}"#).unwrap();
        assert_eq!(company.id, "c-17");
        assert_eq!(company.display_name(), "c-17");
        assert!(company.contact.email.is_empty());
        assert!(company.area_of_interest.is_none());
    }
}
