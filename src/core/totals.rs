//! Derived totals for the attendance blocks.
//!
//! Totals are never stored: they are recomputed from the current record whenever the
//! form is read, so they cannot drift from the counts they summarize.

use crate::core::record::{AttendanceData, AttendanceKind, CategoryBlock};

/// Totals for one attendance block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    /// Sum of the four girls counts
    pub total_girls: u32,
    /// Sum of the four boys counts
    pub total_boys: u32,
    /// `total_girls + total_boys`
    pub grand_total: u32,
}

/// Totals for both blocks of a form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FormTotals {
    /// Class attendance totals
    pub class_attendance: Totals,
    /// MDM attendance totals
    pub mdm_attendance: Totals,
}

impl FormTotals {
    /// Totals for one attendance type.
    #[must_use]
    pub const fn get(&self, kind: AttendanceKind) -> Totals {
        match kind {
            AttendanceKind::Class => self.class_attendance,
            AttendanceKind::Mdm => self.mdm_attendance,
        }
    }
}

/// Computes the totals of a single block. Empty fields count as zero.
#[must_use]
pub fn block_totals(block: &CategoryBlock) -> Totals {
    let total_girls = block.girls.sum();
    let total_boys = block.boys.sum();
    Totals {
        total_girls,
        total_boys,
        grand_total: total_girls + total_boys,
    }
}

/// Computes the totals of both blocks.
#[must_use]
pub fn form_totals(data: &AttendanceData) -> FormTotals {
    FormTotals {
        class_attendance: block_totals(&data.class_attendance),
        mdm_attendance: block_totals(&data.mdm_attendance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::record::{Category, Count, CountSet};

    fn set(values: [Count; 4]) -> CountSet {
        let mut set = CountSet::default();
        for (category, value) in Category::ALL.into_iter().zip(values) {
            set.set(category, value);
        }
        set
    }

    #[test]
    fn test_blank_block_totals_are_zero() {
        assert_eq!(block_totals(&CategoryBlock::default()), Totals::default());
    }

    #[test]
    fn test_totals_sum_each_gender_and_grand_total() {
        let block = CategoryBlock {
            girls: set([Count::Value(10), Count::Value(5), Count::Empty, Count::Value(1)]),
            boys: set([Count::Empty, Count::Value(99), Count::Value(0), Count::Value(3)]),
        };
        let totals = block_totals(&block);
        assert_eq!(totals.total_girls, 16);
        assert_eq!(totals.total_boys, 102);
        assert_eq!(totals.grand_total, 118);
    }

    #[test]
    fn test_grand_total_identity_holds_for_many_blocks() {
        let choices = [Count::Empty, Count::Value(0), Count::Value(7), Count::Value(99)];
        for a in choices {
            for b in choices {
                for c in choices {
                    let block = CategoryBlock {
                        girls: set([a, b, c, a]),
                        boys: set([c, a, b, b]),
                    };
                    let totals = block_totals(&block);
                    assert_eq!(totals.total_girls + totals.total_boys, totals.grand_total);
                }
            }
        }
    }

    #[test]
    fn test_summing_does_not_fill_empty_fields() {
        let block = CategoryBlock {
            girls: set([Count::Empty, Count::Value(2), Count::Empty, Count::Empty]),
            boys: CountSet::default(),
        };
        let _ = block_totals(&block);
        assert_eq!(block.girls.sc, Count::Empty);
    }

    #[test]
    fn test_form_totals_keep_blocks_separate() {
        let mut data = AttendanceData::blank();
        data.mdm_attendance.boys.set(Category::Other, Count::Value(8));
        let totals = form_totals(&data);
        assert_eq!(totals.get(AttendanceKind::Class).grand_total, 0);
        assert_eq!(totals.get(AttendanceKind::Mdm).total_boys, 8);
        assert_eq!(totals.get(AttendanceKind::Mdm).grand_total, 8);
    }
}
