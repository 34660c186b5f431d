//! Closed enumerations of the elicitation study vocabulary.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Gesture categories (actions) available in the study. Closed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GestureCategory {
    Export,
    Filter,
    Highlight,
    MultiSelect,
    Pan,
    Rotate,
    SaveView,
    SelectAxis,
    SelectCluster,
    SelectLasso,
    SelectSingle,
    Zoom,
    SelectRange,
}

impl GestureCategory {
    pub const ALL: [Self; 13] = [
        Self::Export,
        Self::Filter,
        Self::Highlight,
        Self::MultiSelect,
        Self::Pan,
        Self::Rotate,
        Self::SaveView,
        Self::SelectAxis,
        Self::SelectCluster,
        Self::SelectLasso,
        Self::SelectSingle,
        Self::Zoom,
        Self::SelectRange,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Export => "Export",
            Self::Filter => "Filter",
            Self::Highlight => "Highlight",
            Self::MultiSelect => "MultiSelect",
            Self::Pan => "Pan",
            Self::Rotate => "Rotate",
            Self::SaveView => "SaveView",
            Self::SelectAxis => "SelectAxis",
            Self::SelectCluster => "SelectCluster",
            Self::SelectLasso => "SelectLasso",
            Self::SelectSingle => "SelectSingle",
            Self::Zoom => "Zoom",
            Self::SelectRange => "SelectRange",
        }
    }
}

impl fmt::Display for GestureCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GestureCategory {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "export" => Ok(Self::Export),
            "filter" => Ok(Self::Filter),
            "highlight" => Ok(Self::Highlight),
            "multiselect" => Ok(Self::MultiSelect),
            "pan" => Ok(Self::Pan),
            "rotate" => Ok(Self::Rotate),
            "saveview" => Ok(Self::SaveView),
            "selectaxis" => Ok(Self::SelectAxis),
            "selectcluster" => Ok(Self::SelectCluster),
            "selectlasso" => Ok(Self::SelectLasso),
            "selectsingle" => Ok(Self::SelectSingle),
            "zoom" => Ok(Self::Zoom),
            "selectrange" => Ok(Self::SelectRange),
            _ => Err(Error::UnknownCategory(s.to_string())),
        }
    }
}

/// Which hand performed a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum HandSide {
    Left,
    Right,
}

impl HandSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "Left",
            Self::Right => "Right",
        }
    }
}

impl fmt::Display for HandSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HandSide {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "l" => Ok(Self::Left),
            "right" | "r" => Ok(Self::Right),
            _ => Err(Error::UnknownHandSide(s.to_string())),
        }
    }
}
