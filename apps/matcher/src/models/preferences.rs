//! Preference options and the local selection state of the preferences step.
//!
//! Each category is a closed enum. Roles and industries travel over the wire as their
//! display label; locations and stages use short camelCase keys.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "Software Engineer")]
    SoftwareEngineer,
    #[serde(rename = "Product Manager")]
    ProductManager,
    #[serde(rename = "Data Scientist")]
    DataScientist,
    Designer,
    Marketing,
    Sales,
    Operations,
}

impl Role {
    pub const ALL: [Role; 7] = [
        Role::SoftwareEngineer,
        Role::ProductManager,
        Role::DataScientist,
        Role::Designer,
        Role::Marketing,
        Role::Sales,
        Role::Operations,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Role::SoftwareEngineer => "Software Engineer",
            Role::ProductManager => "Product Manager",
            Role::DataScientist => "Data Scientist",
            Role::Designer => "Designer",
            Role::Marketing => "Marketing",
            Role::Sales => "Sales",
            Role::Operations => "Operations",
        }
    }

    pub fn wire_value(self) -> &'static str {
        self.label()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Industry {
    Fintech,
    Healthcare,
    #[serde(rename = "E-commerce")]
    ECommerce,
    #[serde(rename = "AI/ML")]
    AiMl,
    Enterprise,
    Consumer,
    Education,
}

impl Industry {
    pub const ALL: [Industry; 7] = [
        Industry::Fintech,
        Industry::Healthcare,
        Industry::ECommerce,
        Industry::AiMl,
        Industry::Enterprise,
        Industry::Consumer,
        Industry::Education,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Industry::Fintech => "Fintech",
            Industry::Healthcare => "Healthcare",
            Industry::ECommerce => "E-commerce",
            Industry::AiMl => "AI/ML",
            Industry::Enterprise => "Enterprise",
            Industry::Consumer => "Consumer",
            Industry::Education => "Education",
        }
    }

    pub fn wire_value(self) -> &'static str {
        self.label()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkLocation {
    Remote,
    Hybrid,
    Onsite,
}

impl WorkLocation {
    pub const ALL: [WorkLocation; 3] = [
        WorkLocation::Remote,
        WorkLocation::Hybrid,
        WorkLocation::Onsite,
    ];

    pub fn label(self) -> &'static str {
        match self {
            WorkLocation::Remote => "Remote",
            WorkLocation::Hybrid => "Hybrid",
            WorkLocation::Onsite => "On-site",
        }
    }

    pub fn wire_value(self) -> &'static str {
        match self {
            WorkLocation::Remote => "remote",
            WorkLocation::Hybrid => "hybrid",
            WorkLocation::Onsite => "onsite",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CompanyStage {
    Seed,
    SeriesA,
    SeriesB,
    SeriesC,
    Public,
}

impl CompanyStage {
    pub const ALL: [CompanyStage; 5] = [
        CompanyStage::Seed,
        CompanyStage::SeriesA,
        CompanyStage::SeriesB,
        CompanyStage::SeriesC,
        CompanyStage::Public,
    ];

    pub fn label(self) -> &'static str {
        match self {
            CompanyStage::Seed => "Seed",
            CompanyStage::SeriesA => "Series A",
            CompanyStage::SeriesB => "Series B",
            CompanyStage::SeriesC => "Series C+",
            CompanyStage::Public => "Public",
        }
    }

    pub fn wire_value(self) -> &'static str {
        match self {
            CompanyStage::Seed => "seed",
            CompanyStage::SeriesA => "seriesA",
            CompanyStage::SeriesB => "seriesB",
            CompanyStage::SeriesC => "seriesC",
            CompanyStage::Public => "public",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Parsing from CLI input: accepts either the wire value or the label,
// case-insensitively.
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownOption {
    pub category: &'static str,
    pub value: String,
}

impl fmt::Display for UnknownOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} '{}'", self.category, self.value)
    }
}

impl std::error::Error for UnknownOption {}

macro_rules! option_from_str {
    ($ty:ty, $category:literal) => {
        impl FromStr for $ty {
            type Err = UnknownOption;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let wanted = s.trim();
                <$ty>::ALL
                    .into_iter()
                    .find(|opt| {
                        opt.wire_value().eq_ignore_ascii_case(wanted)
                            || opt.label().eq_ignore_ascii_case(wanted)
                    })
                    .ok_or_else(|| UnknownOption {
                        category: $category,
                        value: wanted.to_string(),
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

option_from_str!(Role, "role");
option_from_str!(Industry, "industry");
option_from_str!(WorkLocation, "work location");
option_from_str!(CompanyStage, "company stage");

// ────────────────────────────────────────────────────────────────────────────
// Selection state
// ────────────────────────────────────────────────────────────────────────────

/// The four selection sets of the preferences form.
///
/// Sets keep the order in which options were picked and never hold duplicates.
/// There is no exclusivity between options and no minimum or maximum count.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Preferences {
    roles: Vec<Role>,
    industries: Vec<Industry>,
    locations: Vec<WorkLocation>,
    company_stages: Vec<CompanyStage>,
}

impl Preferences {
    /// Returns `true` when the role is selected after the call.
    pub fn toggle_role(&mut self, role: Role) -> bool {
        toggle(&mut self.roles, role)
    }

    pub fn toggle_industry(&mut self, industry: Industry) -> bool {
        toggle(&mut self.industries, industry)
    }

    pub fn toggle_location(&mut self, location: WorkLocation) -> bool {
        toggle(&mut self.locations, location)
    }

    pub fn toggle_stage(&mut self, stage: CompanyStage) -> bool {
        toggle(&mut self.company_stages, stage)
    }

    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    pub fn industries(&self) -> &[Industry] {
        &self.industries
    }

    pub fn locations(&self) -> &[WorkLocation] {
        &self.locations
    }

    pub fn company_stages(&self) -> &[CompanyStage] {
        &self.company_stages
    }
}

fn toggle<T: PartialEq>(set: &mut Vec<T>, item: T) -> bool {
    if let Some(pos) = set.iter().position(|existing| *existing == item) {
        set.remove(pos);
        false
    } else {
        set.push(item);
        true
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types
// ────────────────────────────────────────────────────────────────────────────

/// Body of `POST /submitPreferences`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PreferencesRequest {
    pub session_id: String,
    pub desired_roles: Vec<String>,
    pub industries: Vec<String>,
    pub work_locations: Vec<String>,
    pub company_stages: Vec<String>,
}

impl PreferencesRequest {
    pub fn new(session_id: &str, prefs: &Preferences) -> Self {
        Self {
            session_id: session_id.to_string(),
            desired_roles: prefs.roles.iter().map(|r| r.wire_value().to_string()).collect(),
            industries: prefs
                .industries
                .iter()
                .map(|i| i.wire_value().to_string())
                .collect(),
            work_locations: prefs
                .locations
                .iter()
                .map(|l| l.wire_value().to_string())
                .collect(),
            company_stages: prefs
                .company_stages
                .iter()
                .map(|s| s.wire_value().to_string())
                .collect(),
        }
    }
}

/// The server's normalized echo of submitted preferences. Cached locally for reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct NormalizedPreferences {
    #[serde(default)]
    pub desired_roles: Vec<String>,
    #[serde(default)]
    pub industries: Vec<String>,
    #[serde(default)]
    pub work_locations: Vec<String>,
    #[serde(default)]
    pub company_stages: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesResponse {
    pub session_id: String,
    pub preferences: NormalizedPreferences,
    #[serde(default)]
    pub message: Option<String>,
}
