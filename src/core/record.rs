//! Attendance record model.
//!
//! The shape is fixed: two attendance blocks (class and MDM), each split into girls and
//! boys, each holding exactly four social-category counts. Every leaf is a [`Count`],
//! which is either empty (an unfilled field) or a number in `0..=99`.
//!
//! Deserialization doubles as normalization of fetched records: null, missing, blank or
//! unparseable leaves become [`Count::Empty`] and out-of-range numbers are clamped, so a
//! record coming back from the service never carries a null-like value into the form.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A single attendance count, or the empty sentinel for an unfilled field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Count {
    /// Field has not been filled in. Distinct from zero.
    #[default]
    Empty,
    /// A count in `0..=Count::MAX`
    Value(u8),
}

impl Count {
    /// Largest count a field may hold.
    pub const MAX: u8 = 99;

    /// Creates a count, clamping to [`Count::MAX`].
    #[must_use]
    pub fn new(value: u8) -> Self {
        Self::Value(value.min(Self::MAX))
    }

    /// Creates a count from any integer, clamping into `0..=99`.
    #[must_use]
    pub fn clamped(value: i64) -> Self {
        let clamped = value.clamp(0, i64::from(Self::MAX));
        Self::Value(u8::try_from(clamped).unwrap_or(Self::MAX))
    }

    /// Whether the field is unfilled.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        matches!(self, Self::Empty)
    }

    /// Numeric contribution to totals; empty counts as zero.
    #[must_use]
    pub fn value_or_zero(self) -> u32 {
        match self {
            Self::Empty => 0,
            Self::Value(v) => u32::from(v),
        }
    }
}

/// Empty renders as nothing at all, never as `0`.
impl fmt::Display for Count {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => Ok(()),
            Self::Value(v) => write!(f, "{v}"),
        }
    }
}

impl Serialize for Count {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            // The sheet backend stores blank cells as empty strings
            Self::Empty => serializer.serialize_str(""),
            Self::Value(v) => serializer.serialize_u8(*v),
        }
    }
}

/// Leaf values as they may appear in a fetched record.
#[derive(Deserialize)]
#[serde(untagged)]
enum WireCount {
    Integer(i64),
    Float(f64),
    Text(String),
    Other(serde::de::IgnoredAny),
}

impl<'de> Deserialize<'de> for Count {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let count = match Option::<WireCount>::deserialize(deserializer)? {
            Some(WireCount::Integer(v)) => Self::clamped(v),
            Some(WireCount::Float(v)) if v.is_finite() && v.fract().abs() < f64::EPSILON => {
                // Saturating float-to-int cast, then clamped to 0..=99
                #[allow(clippy::cast_possible_truncation)]
                let whole = v as i64;
                Self::clamped(whole)
            }
            Some(WireCount::Text(text)) => text
                .trim()
                .parse::<i64>()
                .map_or(Self::Empty, Self::clamped),
            Some(WireCount::Float(_) | WireCount::Other(_)) | None => Self::Empty,
        };
        Ok(count)
    }
}

/// Treats an explicit `null` for a nested block the same as a missing one.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Social category used to bucket counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Scheduled Caste
    Sc,
    /// Scheduled Tribe
    St,
    /// Socially and Educationally Backward Classes
    Sebc,
    /// Everyone else
    Other,
}

impl Category {
    /// All categories in display and traversal order.
    pub const ALL: [Self; 4] = [Self::Sc, Self::St, Self::Sebc, Self::Other];

    /// Key used on the wire and in field identifiers.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Sc => "SC",
            Self::St => "ST",
            Self::Sebc => "SEBC",
            Self::Other => "OTHER",
        }
    }

    /// Position within [`Category::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Sc => 0,
            Self::St => 1,
            Self::Sebc => 2,
            Self::Other => 3,
        }
    }
}

/// Gender column of a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Gender {
    /// Girls column
    Girls,
    /// Boys column
    Boys,
}

impl Gender {
    /// Girls before boys.
    pub const ALL: [Self; 2] = [Self::Girls, Self::Boys];

    /// Key used on the wire and in field identifiers.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Girls => "girls",
            Self::Boys => "boys",
        }
    }

    /// Position within [`Gender::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Girls => 0,
            Self::Boys => 1,
        }
    }
}

/// The two attendance types recorded per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttendanceKind {
    /// General class attendance
    Class,
    /// Mid-day meal program attendance
    Mdm,
}

impl AttendanceKind {
    /// Class attendance block first.
    pub const ALL: [Self; 2] = [Self::Class, Self::Mdm];

    /// Key used on the wire and in field identifiers.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Class => "classAttendance",
            Self::Mdm => "mdmAttendance",
        }
    }

    /// Heading shown above the block.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Class => "Class Attendance",
            Self::Mdm => "MDM Attendance",
        }
    }

    /// Position within [`AttendanceKind::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Class => 0,
            Self::Mdm => 1,
        }
    }
}

/// Counts for the four social categories of one gender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CountSet {
    /// SC count
    #[serde(rename = "SC", default)]
    pub sc: Count,
    /// ST count
    #[serde(rename = "ST", default)]
    pub st: Count,
    /// SEBC count
    #[serde(rename = "SEBC", default)]
    pub sebc: Count,
    /// OTHER count
    #[serde(rename = "OTHER", default)]
    pub other: Count,
}

impl CountSet {
    /// Count for a category.
    #[must_use]
    pub const fn get(&self, category: Category) -> Count {
        match category {
            Category::Sc => self.sc,
            Category::St => self.st,
            Category::Sebc => self.sebc,
            Category::Other => self.other,
        }
    }

    /// Replaces the count for a category.
    pub const fn set(&mut self, category: Category, count: Count) {
        match category {
            Category::Sc => self.sc = count,
            Category::St => self.st = count,
            Category::Sebc => self.sebc = count,
            Category::Other => self.other = count,
        }
    }

    /// Sum of all four categories, empty counting as zero.
    #[must_use]
    pub fn sum(&self) -> u32 {
        Category::ALL
            .iter()
            .map(|c| self.get(*c).value_or_zero())
            .sum()
    }

    /// Whether every category is unfilled.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        Category::ALL.iter().all(|c| self.get(*c).is_empty())
    }
}

/// Girls and boys counts for one attendance type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CategoryBlock {
    /// Girls counts
    #[serde(default, deserialize_with = "null_as_default")]
    pub girls: CountSet,
    /// Boys counts
    #[serde(default, deserialize_with = "null_as_default")]
    pub boys: CountSet,
}

impl CategoryBlock {
    /// Counts for one gender.
    #[must_use]
    pub const fn gender(&self, gender: Gender) -> &CountSet {
        match gender {
            Gender::Girls => &self.girls,
            Gender::Boys => &self.boys,
        }
    }

    /// Mutable counts for one gender.
    pub const fn gender_mut(&mut self, gender: Gender) -> &mut CountSet {
        match gender {
            Gender::Girls => &mut self.girls,
            Gender::Boys => &mut self.boys,
        }
    }
}

/// The editable part of a record: both attendance blocks.
///
/// This is what the service stores under `attendanceData` and returns under `data`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceData {
    /// Class attendance block
    #[serde(default, deserialize_with = "null_as_default")]
    pub class_attendance: CategoryBlock,
    /// MDM attendance block
    #[serde(default, deserialize_with = "null_as_default")]
    pub mdm_attendance: CategoryBlock,
}

impl AttendanceData {
    /// A fresh record with every field empty.
    #[must_use]
    pub fn blank() -> Self {
        Self::default()
    }

    /// Block for one attendance type.
    #[must_use]
    pub const fn block(&self, kind: AttendanceKind) -> &CategoryBlock {
        match kind {
            AttendanceKind::Class => &self.class_attendance,
            AttendanceKind::Mdm => &self.mdm_attendance,
        }
    }

    /// Mutable block for one attendance type.
    pub const fn block_mut(&mut self, kind: AttendanceKind) -> &mut CategoryBlock {
        match kind {
            AttendanceKind::Class => &mut self.class_attendance,
            AttendanceKind::Mdm => &mut self.mdm_attendance,
        }
    }

    /// Whether all sixteen fields are unfilled.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        AttendanceKind::ALL.iter().all(|kind| {
            let block = self.block(*kind);
            block.girls.is_blank() && block.boys.is_blank()
        })
    }
}

/// A complete record as submitted to the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRecord {
    /// Class of the authenticated teacher
    pub class_name: String,
    /// Day the counts belong to
    pub date: NaiveDate,
    /// All sixteen counts
    pub attendance_data: AttendanceData,
}

/// Identity returned by a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticatedTeacher {
    /// Display name
    pub name: String,
    /// The only class this teacher may record attendance for
    pub assigned_class: String,
}
