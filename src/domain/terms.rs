// Closed vocabularies accepted by categorization and relation calls

use std::fmt;
use std::str::FromStr;

use crate::error::ClientError;

/// Which listing a categories/tags call refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListTerm {
    Poi,
    Event,
    Route,
}

impl ListTerm {
    pub fn as_str(&self) -> &'static str {
        match self {
            ListTerm::Poi => "poi",
            ListTerm::Event => "event",
            ListTerm::Route => "route",
        }
    }
}

impl FromStr for ListTerm {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "poi" => Ok(ListTerm::Poi),
            "event" => Ok(ListTerm::Event),
            "route" => Ok(ListTerm::Route),
            other => Err(ClientError::InvalidTerm(format!("{} is an invalid term", other))),
        }
    }
}

impl fmt::Display for ListTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Relationship between two POI-based objects
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relation {
    Parent,
    Child,
}

impl Relation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Relation::Parent => "parent",
            Relation::Child => "child",
        }
    }
}

impl FromStr for Relation {
    type Err = ClientError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "parent" => Ok(Relation::Parent),
            "child" => Ok(Relation::Child),
            other => Err(ClientError::InvalidTerm(format!("{} is an invalid relation", other))),
        }
    }
}

impl fmt::Display for Relation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
