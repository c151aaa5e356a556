use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PropertyType {
    House,
    Studio,
    Villa,
    Apartment,
    Hostel,
    Bungalow,
    Other,
}

impl PropertyType {
    pub const ALL: [PropertyType; 7] = [
        PropertyType::House,
        PropertyType::Studio,
        PropertyType::Villa,
        PropertyType::Apartment,
        PropertyType::Hostel,
        PropertyType::Bungalow,
        PropertyType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PropertyType::House => "House",
            PropertyType::Studio => "Studio",
            PropertyType::Villa => "Villa",
            PropertyType::Apartment => "Apartment",
            PropertyType::Hostel => "Hostel",
            PropertyType::Bungalow => "Bungalow",
            PropertyType::Other => "Other",
        }
    }
}

impl fmt::Display for PropertyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PropertyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PropertyType::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown property type: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facility {
    Laundry,
    Parking,
    Pool,
    Gym,
    Healthcare,
}

impl Facility {
    pub const ALL: [Facility; 5] = [
        Facility::Laundry,
        Facility::Parking,
        Facility::Pool,
        Facility::Gym,
        Facility::Healthcare,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Facility::Laundry => "Laundry",
            Facility::Parking => "Parking",
            Facility::Pool => "Pool",
            Facility::Gym => "Gym",
            Facility::Healthcare => "Healthcare",
        }
    }
}

impl fmt::Display for Facility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Facility {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Facility::ALL
            .iter()
            .copied()
            .find(|facility| facility.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown facility: {}", s))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub name: String,
    pub email: String,
    pub avatar: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Review {
    pub name: String,
    pub avatar: String,
    pub review: String,
    pub rating: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GalleryImage {
    pub image: String,
}

/// Listing attributes. `agent`, `review` and `gallery` hold ids of documents
/// in the agents, reviews and galleries collections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub name: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
    pub description: String,
    pub address: String,
    pub geolocation: String,
    pub price: u32,
    pub area: u32,
    pub bedrooms: u8,
    pub bathrooms: u8,
    pub rating: u8,
    pub facilities: Vec<Facility>,
    pub image: String,
    pub agent: Vec<Id>,
    pub review: Vec<Id>,
    pub gallery: Vec<Id>,
}
