use crate::{CoreError, Result as CoreErrorResult};

use std::panic::Location;
use std::str::FromStr;

use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};

/// US state or district of an address, stored and rendered as its
/// two-letter postal code
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum UsState {
    Alabama,
    Alaska,
    Arizona,
    Arkansas,
    California,
    Colorado,
    Connecticut,
    Delaware,
    DistrictOfColumbia,
    Florida,
    Georgia,
    Hawaii,
    Idaho,
    Illinois,
    Indiana,
    Iowa,
    Kansas,
    Kentucky,
    Louisiana,
    Maine,
    Maryland,
    Massachusetts,
    Michigan,
    Minnesota,
    Mississippi,
    Missouri,
    Montana,
    Nebraska,
    Nevada,
    NewHampshire,
    NewJersey,
    NewMexico,
    NewYork,
    NorthCarolina,
    NorthDakota,
    Ohio,
    Oklahoma,
    Oregon,
    Pennsylvania,
    RhodeIsland,
    SouthCarolina,
    SouthDakota,
    Tennessee,
    Texas,
    Utah,
    Vermont,
    Virginia,
    Washington,
    WestVirginia,
    Wisconsin,
    Wyoming,
}

impl UsState {
    pub const ALL: [UsState; 51] = [
        Self::Alabama,
        Self::Alaska,
        Self::Arizona,
        Self::Arkansas,
        Self::California,
        Self::Colorado,
        Self::Connecticut,
        Self::Delaware,
        Self::DistrictOfColumbia,
        Self::Florida,
        Self::Georgia,
        Self::Hawaii,
        Self::Idaho,
        Self::Illinois,
        Self::Indiana,
        Self::Iowa,
        Self::Kansas,
        Self::Kentucky,
        Self::Louisiana,
        Self::Maine,
        Self::Maryland,
        Self::Massachusetts,
        Self::Michigan,
        Self::Minnesota,
        Self::Mississippi,
        Self::Missouri,
        Self::Montana,
        Self::Nebraska,
        Self::Nevada,
        Self::NewHampshire,
        Self::NewJersey,
        Self::NewMexico,
        Self::NewYork,
        Self::NorthCarolina,
        Self::NorthDakota,
        Self::Ohio,
        Self::Oklahoma,
        Self::Oregon,
        Self::Pennsylvania,
        Self::RhodeIsland,
        Self::SouthCarolina,
        Self::SouthDakota,
        Self::Tennessee,
        Self::Texas,
        Self::Utah,
        Self::Vermont,
        Self::Virginia,
        Self::Washington,
        Self::WestVirginia,
        Self::Wisconsin,
        Self::Wyoming,
    ];

    /// Two-letter postal code
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Alabama => "AL",
            Self::Alaska => "AK",
            Self::Arizona => "AZ",
            Self::Arkansas => "AR",
            Self::California => "CA",
            Self::Colorado => "CO",
            Self::Connecticut => "CT",
            Self::Delaware => "DE",
            Self::DistrictOfColumbia => "DC",
            Self::Florida => "FL",
            Self::Georgia => "GA",
            Self::Hawaii => "HI",
            Self::Idaho => "ID",
            Self::Illinois => "IL",
            Self::Indiana => "IN",
            Self::Iowa => "IA",
            Self::Kansas => "KS",
            Self::Kentucky => "KY",
            Self::Louisiana => "LA",
            Self::Maine => "ME",
            Self::Maryland => "MD",
            Self::Massachusetts => "MA",
            Self::Michigan => "MI",
            Self::Minnesota => "MN",
            Self::Mississippi => "MS",
            Self::Missouri => "MO",
            Self::Montana => "MT",
            Self::Nebraska => "NE",
            Self::Nevada => "NV",
            Self::NewHampshire => "NH",
            Self::NewJersey => "NJ",
            Self::NewMexico => "NM",
            Self::NewYork => "NY",
            Self::NorthCarolina => "NC",
            Self::NorthDakota => "ND",
            Self::Ohio => "OH",
            Self::Oklahoma => "OK",
            Self::Oregon => "OR",
            Self::Pennsylvania => "PA",
            Self::RhodeIsland => "RI",
            Self::SouthCarolina => "SC",
            Self::SouthDakota => "SD",
            Self::Tennessee => "TN",
            Self::Texas => "TX",
            Self::Utah => "UT",
            Self::Vermont => "VT",
            Self::Virginia => "VA",
            Self::Washington => "WA",
            Self::WestVirginia => "WV",
            Self::Wisconsin => "WI",
            Self::Wyoming => "WY",
        }
    }
}

impl FromStr for UsState {
    type Err = CoreError;

    #[track_caller]
    fn from_str(s: &str) -> CoreErrorResult<Self> {
        let code = s.trim().to_ascii_uppercase();
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == code)
            .ok_or_else(|| CoreError::InvalidState {
                value: s.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }
}

impl TryFrom<String> for UsState {
    type Error = CoreError;

    #[track_caller]
    fn try_from(value: String) -> CoreErrorResult<Self> {
        Self::from_str(&value)
    }
}

impl From<UsState> for String {
    fn from(state: UsState) -> Self {
        state.as_str().to_string()
    }
}

impl std::fmt::Display for UsState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
