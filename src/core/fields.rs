//! Field identifiers and the fixed traversal order used for auto-advance.
//!
//! Sixteen count fields exist: two attendance types, four categories, two genders.
//! [`FIELD_ORDER`] lists them in entry order and a field's position in it is what the
//! form session stores as its focus.

use crate::{
    core::record::{AttendanceKind, Category, Gender},
    errors::{Error, Result},
};
use std::{fmt, str::FromStr};

/// Number of count fields on the form.
pub const FIELD_COUNT: usize = 16;

/// One of the sixteen count fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldId {
    /// Attendance block
    pub kind: AttendanceKind,
    /// Social category row
    pub category: Category,
    /// Gender column
    pub gender: Gender,
}

/// Entry order: class block then MDM block, SC→ST→SEBC→OTHER, girls before boys.
pub const FIELD_ORDER: [FieldId; FIELD_COUNT] = build_order();

const fn build_order() -> [FieldId; FIELD_COUNT] {
    let mut order = [FieldId::new(AttendanceKind::Class, Category::Sc, Gender::Girls); FIELD_COUNT];
    let mut i = 0;
    while i < FIELD_COUNT {
        order[i] = FieldId::new(
            AttendanceKind::ALL[i / 8],
            Category::ALL[(i % 8) / 2],
            Gender::ALL[i % 2],
        );
        i += 1;
    }
    order
}

impl FieldId {
    /// Creates a field identifier.
    #[must_use]
    pub const fn new(kind: AttendanceKind, category: Category, gender: Gender) -> Self {
        Self {
            kind,
            category,
            gender,
        }
    }

    /// Position of this field in [`FIELD_ORDER`].
    #[must_use]
    pub const fn position(self) -> usize {
        self.kind.index() * 8 + self.category.index() * 2 + self.gender.index()
    }

    /// Field at a position in [`FIELD_ORDER`].
    #[must_use]
    pub fn at(position: usize) -> Option<Self> {
        FIELD_ORDER.get(position).copied()
    }

    /// The field that follows this one, or `None` for the last field.
    #[must_use]
    pub fn next(self) -> Option<Self> {
        Self::at(self.position() + 1)
    }
}

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{}",
            self.kind.key(),
            self.category.key(),
            self.gender.key()
        )
    }
}

/// Parses `classAttendance-SC-girls` style identifiers, case-insensitively.
///
/// `class` and `mdm` are accepted as short forms of the block names.
impl FromStr for FieldId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let unknown = || Error::UnknownField {
            name: s.to_string(),
        };
        let mut parts = s.trim().split('-');
        let (Some(kind), Some(category), Some(gender), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(unknown());
        };

        let kind = AttendanceKind::ALL
            .into_iter()
            .find(|k| {
                k.key().eq_ignore_ascii_case(kind)
                    || k.key()
                        .strip_suffix("Attendance")
                        .is_some_and(|short| short.eq_ignore_ascii_case(kind))
            })
            .ok_or_else(unknown)?;
        let category = Category::ALL
            .into_iter()
            .find(|c| c.key().eq_ignore_ascii_case(category))
            .ok_or_else(unknown)?;
        let gender = Gender::ALL
            .into_iter()
            .find(|g| g.key().eq_ignore_ascii_case(gender))
            .ok_or_else(unknown)?;

        Ok(Self::new(kind, category, gender))
    }
}
